//! Specification types: the core data model
//!
//! A `TestSpecification` describes one test suite to generate: the subject
//! under test, an ordered list of members (one test block each) and the
//! feature flags that toggle scaffold blocks. Specifications are validated
//! once at construction and are immutable afterwards; the same value can be
//! rendered by every framework.
//!
//! ## Example Spec
//!
//! ```yaml
//! class_name: Calculator
//! test_type: unit
//! include_fixtures: true
//! test_cases:
//!   - name: add
//!     description: Adds two numbers
//!     setup: calc = Calculator()
//!     assertions:
//!       - assert calc.add(2, 3) == 5
//!   - subtract
//! ```

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::OnceLock;

/// Category of the generated suite, echoed in the header
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    #[default]
    Unit,
    Integration,
    E2e,
    /// Adds a mocked HTTP call block to the suite
    Api,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Unit => "unit",
            TestKind::Integration => "integration",
            TestKind::E2e => "e2e",
            TestKind::Api => "api",
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TestKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unit" => Ok(TestKind::Unit),
            "integration" => Ok(TestKind::Integration),
            "e2e" | "end-to-end" => Ok(TestKind::E2e),
            "api" => Ok(TestKind::Api),
            other => Err(Error::validation(
                "test_type",
                format!("'{}' is not one of unit, integration, e2e, api", other),
            )),
        }
    }
}

/// Independent toggles for scaffold blocks
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct FeatureFlags {
    /// Emit a reusable fixture / setup-teardown block
    #[serde(default)]
    pub fixtures: bool,

    /// Import the framework's mocking library
    #[serde(default)]
    pub mocks: bool,

    /// Emit one parametrized sample test
    #[serde(default)]
    pub parametrize: bool,
}

impl FeatureFlags {
    /// Flags enabled in either set
    pub fn union(self, other: FeatureFlags) -> FeatureFlags {
        FeatureFlags {
            fixtures: self.fixtures || other.fixtures,
            mocks: self.mocks || other.mocks,
            parametrize: self.parametrize || other.parametrize,
        }
    }
}

/// One test unit; becomes exactly one test block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Member {
    /// Method/function name or bare label
    pub name: String,

    /// Rendered as the test's doc comment
    pub description: Option<String>,

    /// Inserted verbatim before the body
    pub setup: Option<String>,

    /// Statements/assertions inserted verbatim, one per line
    pub body: Vec<String>,

    /// Inserted verbatim after the body
    pub teardown: Option<String>,

    /// Not rendered
    pub tags: BTreeSet<String>,

    /// Arrange-phase variables (name, value)
    pub inputs: Vec<(String, Value)>,

    /// Arrange-phase `expected` variable
    pub expected: Option<Value>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(setup.into());
        self
    }

    pub fn with_body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn with_teardown(mut self, teardown: impl Into<String>) -> Self {
        self.teardown = Some(teardown.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, value: Value) -> Self {
        self.inputs.push((name.into(), value));
        self
    }

    pub fn with_expected(mut self, value: Value) -> Self {
        self.expected = Some(value);
        self
    }
}

/// A validated, immutable test suite specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSpecification {
    subject: String,
    members: Vec<Member>,
    features: FeatureFlags,
    kind: TestKind,
    module_path: Option<String>,
}

impl TestSpecification {
    /// Start building a specification for `subject`
    pub fn builder(subject: impl Into<String>) -> SpecBuilder {
        SpecBuilder {
            subject: subject.into(),
            members: Vec::new(),
            features: FeatureFlags::default(),
            kind: TestKind::default(),
            module_path: None,
        }
    }

    /// Validate a deserialized spec document entry
    pub fn parse(input: &SpecInput) -> Result<Self> {
        Self::parse_with_defaults(input, FeatureFlags::default())
    }

    /// Like [`parse`](Self::parse), filling absent `include_*` fields from `defaults`
    pub fn parse_with_defaults(input: &SpecInput, defaults: FeatureFlags) -> Result<Self> {
        let features = FeatureFlags {
            fixtures: input.include_fixtures.unwrap_or(defaults.fixtures),
            mocks: input.include_mocks.unwrap_or(defaults.mocks),
            parametrize: input.include_parametrize.unwrap_or(defaults.parametrize),
        };

        let mut builder = Self::builder(input.class_name.clone())
            .features(features)
            .kind(input.test_type);
        if let Some(module) = &input.module_path {
            builder = builder.module_path(module.clone());
        }
        for case in &input.test_cases {
            builder = builder.member(case.to_member());
        }
        builder.build()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn features(&self) -> FeatureFlags {
        self.features
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }

    /// Merge another spec for the same subject into a copy of this one
    ///
    /// Members are appended in order; a member whose name already exists is
    /// dropped (first occurrence wins). Feature flags are OR-ed; kind and
    /// module path keep this spec's values unless unset here.
    pub fn merged_with(&self, other: &TestSpecification) -> TestSpecification {
        let mut merged = self.clone();
        let mut names: HashSet<String> = merged.members.iter().map(|m| m.name.clone()).collect();
        for member in &other.members {
            if names.insert(member.name.clone()) {
                merged.members.push(member.clone());
            }
        }
        merged.features = merged.features.union(other.features);
        if merged.module_path.is_none() {
            merged.module_path = other.module_path.clone();
        }
        merged
    }

    /// Compute hash of spec for provenance headers
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}

/// Builder for [`TestSpecification`]; validation happens in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct SpecBuilder {
    subject: String,
    members: Vec<Member>,
    features: FeatureFlags,
    kind: TestKind,
    module_path: Option<String>,
}

impl SpecBuilder {
    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Add bare members by name
    pub fn methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members.extend(names.into_iter().map(Member::new));
        self
    }

    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn fixtures(mut self, on: bool) -> Self {
        self.features.fixtures = on;
        self
    }

    pub fn mocks(mut self, on: bool) -> Self {
        self.features.mocks = on;
        self
    }

    pub fn parametrize(mut self, on: bool) -> Self {
        self.features.parametrize = on;
        self
    }

    pub fn kind(mut self, kind: TestKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    pub fn build(self) -> Result<TestSpecification> {
        let subject = self.subject.trim().to_string();
        if subject.is_empty() {
            return Err(Error::validation("subject", "must not be empty"));
        }
        if !subject.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::validation(
                "subject",
                "must contain at least one ASCII letter or digit",
            ));
        }

        let module_path = match self.module_path.map(|m| m.trim().to_string()) {
            Some(m) if m.is_empty() => None,
            Some(m) if !module_path_pattern().is_match(&m) => {
                return Err(Error::validation(
                    "module_path",
                    format!("'{}' must not contain whitespace, quotes or backslashes", m),
                ));
            }
            other => other,
        };

        let mut seen = HashSet::new();
        let mut members = Vec::with_capacity(self.members.len());
        for (i, mut member) in self.members.into_iter().enumerate() {
            member.name = member.name.trim().to_string();
            if member.name.is_empty() {
                return Err(Error::validation(
                    format!("members[{}].name", i),
                    "must not be empty",
                ));
            }
            if !seen.insert(member.name.clone()) {
                return Err(Error::DuplicateMemberName {
                    subject,
                    name: member.name,
                });
            }
            members.push(member);
        }

        Ok(TestSpecification {
            subject,
            members,
            features: self.features,
            kind: self.kind,
            module_path,
        })
    }
}

fn module_path_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(r#"^[^\s'"`\\]+$"#).expect("Failed to compile module path pattern")
    })
}

// ============================================================================
// Declarative input (JSON / YAML)
// ============================================================================

/// One spec entry as written in a JSON or YAML document
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "suitegen spec", description = "Test suite specification")]
pub struct SpecInput {
    /// Subject under test (class or module name)
    #[serde(default, alias = "test_name", alias = "subject")]
    pub class_name: String,

    /// Test cases; bare strings are names without a body
    #[serde(default, alias = "methods")]
    pub test_cases: Vec<CaseInput>,

    /// Framework for this entry; falls back to the caller's choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    #[serde(default)]
    pub test_type: TestKind,

    /// Import path of the subject (`calculator`, `./calc`, `com.acme.calc`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_fixtures: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_mocks: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_parametrize: Option<bool>,
}

impl SpecInput {
    /// Inline spec from a subject and bare method names
    pub fn from_methods<I, S>(class_name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class_name: class_name.into(),
            test_cases: methods
                .into_iter()
                .map(|m| CaseInput::Name(m.into()))
                .collect(),
            ..Default::default()
        }
    }
}

/// A test case entry: either a bare name or a detailed object
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CaseInput {
    Name(String),
    Detailed(CaseDetail),
}

/// Detailed test case entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CaseDetail {
    #[serde(default)]
    pub name: String,

    #[serde(default, alias = "test_description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, alias = "setup_code", skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,

    /// Act-phase snippet, emitted before the assertions
    #[serde(default, alias = "action_code", skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, alias = "body", alias = "assertion_code")]
    pub assertions: Lines,

    #[serde(default, alias = "teardown_code", skip_serializing_if = "Option::is_none")]
    pub teardown: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Arrange-phase variables
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub inputs: serde_json::Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
}

/// One line or a list of lines
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Lines {
    One(String),
    Many(Vec<String>),
}

impl Default for Lines {
    fn default() -> Self {
        Lines::Many(Vec::new())
    }
}

impl Lines {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Lines::One(line) => vec![line.clone()],
            Lines::Many(lines) => lines.clone(),
        }
    }
}

impl CaseInput {
    pub fn name(&self) -> &str {
        match self {
            CaseInput::Name(name) => name,
            CaseInput::Detailed(detail) => &detail.name,
        }
    }

    fn to_member(&self) -> Member {
        match self {
            CaseInput::Name(name) => Member::new(name.clone()),
            CaseInput::Detailed(d) => {
                let mut body: Vec<String> = d.action.iter().cloned().collect();
                body.extend(d.assertions.to_vec());
                Member {
                    name: d.name.clone(),
                    description: d.description.clone(),
                    setup: d.setup.clone(),
                    body,
                    teardown: d.teardown.clone(),
                    tags: d.tags.iter().cloned().collect(),
                    inputs: d
                        .inputs
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                    expected: d.expected.clone(),
                }
            }
        }
    }
}

/// A spec file: a single spec object or an array of them
#[derive(Debug, Clone, Default)]
pub struct SpecDocument {
    pub specs: Vec<SpecInput>,
}

impl SpecDocument {
    /// Parse a document from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::SpecParse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a document from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: Value =
            serde_norway::from_str(yaml).map_err(|e| Error::SpecParse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Load a document, choosing the parser by file extension (YAML for
    /// `.yaml`/`.yml`, JSON otherwise)
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let parsed = if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        };
        parsed.map_err(|e| match e {
            Error::SpecParse(msg) => Error::SpecParse(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        let specs = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item)
                    .map_err(|e| Error::SpecParse(format!("entry {}: {}", i + 1, e)))
            })
            .collect::<Result<Vec<SpecInput>>>()?;
        Ok(Self { specs })
    }
}

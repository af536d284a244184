//! Test suite rendering: generate test source from specs
//!
//! One [`Renderer`] per framework family. Every renderer follows the same
//! skeleton (header, imports, suite container, optional fixture scaffold,
//! one block per member, optional parametrized sample, footer) and differs
//! only in lexical rules. Rendering is pure: the same spec and options
//! always produce byte-identical text.

mod builder;
mod jest;
mod junit;
mod pytest;
mod unittest;

pub use builder::SourceBuilder;
pub use jest::JestRenderer;
pub use junit::JUnitRenderer;
pub use pytest::PytestRenderer;
pub use unittest::UnittestRenderer;

use crate::framework::Framework;
use crate::spec::{Member, TestKind, TestSpecification};
use crate::util::dedupe_identifiers;
use chrono::{DateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// Fixed `(input, expected)` table used by the parametrized sample block
pub const SAMPLE_TABLE: [(i64, i64); 3] = [(1, 1), (2, 2), (3, 3)];

/// Renders a specification into test source for one framework
pub trait Renderer: Send + Sync {
    /// Framework this renderer emits
    fn framework(&self) -> Framework;

    /// Render a complete suite; total over validated specs
    fn render(&self, spec: &TestSpecification, options: &RenderOptions) -> RenderedSuite;
}

/// Render `spec` with the built-in renderer for `framework`
pub fn render(spec: &TestSpecification, framework: Framework, options: &RenderOptions) -> RenderedSuite {
    builtin(framework).render(spec, options)
}

/// Built-in renderer for a framework
pub fn builtin(framework: Framework) -> &'static dyn Renderer {
    match framework {
        Framework::Pytest => &PytestRenderer,
        Framework::Unittest => &UnittestRenderer,
        Framework::Jest => &JestRenderer,
        Framework::JUnit => &JUnitRenderer,
    }
}

/// How pytest suites are laid out
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PytestLayout {
    /// `class Test<Subject>:` with test methods
    #[default]
    Class,
    /// Module-level test functions
    Functions,
}

/// Render configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Emit a `Generated at` header line; `None` keeps output reproducible
    pub timestamp: Option<DateTime<Utc>>,
    /// Layout for pytest suites
    pub pytest_layout: PytestLayout,
}

impl RenderOptions {
    /// Options that stamp the current time into the header
    pub fn with_timestamp_now(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }
}

/// A rendered test suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSuite {
    pub framework: Framework,
    pub subject: String,
    /// File name derived from the subject (see [`Framework::file_name`])
    pub file_name: String,
    pub source: String,
}

impl RenderedSuite {
    pub fn new(framework: Framework, subject: &str, source: String) -> Self {
        Self {
            framework,
            subject: subject.to_string(),
            file_name: framework.file_name(subject),
            source,
        }
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Text lines of the provenance header, before comment wrapping
///
/// The timestamp, when requested, is always the single line starting with
/// `Generated at:`.
pub(crate) fn header_lines(
    spec: &TestSpecification,
    framework: Framework,
    options: &RenderOptions,
) -> Vec<String> {
    let mut lines = vec![
        format!("Tests for {}.", spec.subject()),
        String::new(),
        format!(
            "Generated by suitegen ({}, {} tests).",
            framework.id(),
            spec.kind()
        ),
        format!("Spec hash: {}", spec.hash()),
    ];
    if let Some(ts) = options.timestamp {
        lines.push(format!(
            "Generated at: {}",
            ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    lines.push("Regenerating overwrites this file.".into());
    lines
}

/// Names of every test block in a suite
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockNames {
    pub members: Vec<String>,
    pub parametrized: Option<String>,
    pub api_call: Option<String>,
}

/// Test block names, disambiguated after case conversion
///
/// Identifier-based frameworks get `_2`, `_3`, ... suffixes on collisions
/// so the output stays compilable; Jest labels are strings and may repeat.
pub(crate) fn block_names(spec: &TestSpecification, framework: Framework) -> BlockNames {
    let mut names: Vec<String> = spec
        .members()
        .iter()
        .map(|m| framework.test_name(&m.name))
        .collect();
    let member_count = names.len();
    let parametrize = spec.features().parametrize;
    let api = spec.kind() == TestKind::Api;
    if parametrize {
        names.push(framework.parametrized_name(spec.subject()));
    }
    if api {
        names.push(framework.api_call_name(spec.subject()));
    }
    if framework != Framework::Jest {
        names = dedupe_identifiers(names);
    }

    let mut extras = names.split_off(member_count).into_iter();
    BlockNames {
        members: names,
        parametrized: if parametrize { extras.next() } else { None },
        api_call: if api { extras.next() } else { None },
    }
}

/// The module path when it can follow `from`/`import` verbatim
///
/// Python and Java only import dotted identifier paths. Anything else
/// (`./calc`, `pkg/mod`, a keyword segment) is left to a comment line.
pub(crate) fn dotted_import<'a>(
    spec: &'a TestSpecification,
    reserved: &[&str],
) -> Option<&'a str> {
    spec.module_path().filter(|path| {
        dotted_path_pattern().is_match(path)
            && !path.split('.').any(|segment| reserved.contains(&segment))
    })
}

fn dotted_path_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("Failed to compile dotted path pattern")
    })
}

/// Whether the suite needs the mocking library import
pub(crate) fn needs_mocks(spec: &TestSpecification) -> bool {
    spec.features().mocks || spec.kind() == TestKind::Api
}

/// Language-specific pieces of a test body
pub(crate) struct Dialect {
    /// Line comment prefix
    pub comment: &'static str,
    /// Always-true assertion annotated as not yet implemented
    pub placeholder: &'static str,
    /// Local variable name for an input key
    pub variable: fn(&str) -> String,
    /// Declaration statement for a variable
    pub assign: fn(&str, &Value) -> String,
}

/// Emit a member's body: setup, arrange/act/assert scaffold, body lines or
/// placeholder, teardown
pub(crate) fn emit_body(out: &mut SourceBuilder, member: &Member, dialect: &Dialect) {
    if let Some(setup) = &member.setup {
        out.snippet(setup);
    }

    out.line(format!("{} Arrange", dialect.comment));
    let mut assignments: Vec<(String, &Value)> = member
        .inputs
        .iter()
        .map(|(name, value)| ((dialect.variable)(name), value))
        .collect();
    if let Some(expected) = &member.expected {
        assignments.push(((dialect.variable)("expected"), expected));
    }
    let names = dedupe_identifiers(assignments.iter().map(|(n, _)| n.clone()));
    for (name, (_, value)) in names.iter().zip(&assignments) {
        out.line((dialect.assign)(name, value));
    }

    out.line(format!("{} Act", dialect.comment));
    out.line(format!("{} Assert", dialect.comment));
    if member.body.is_empty() {
        out.line(dialect.placeholder);
    } else {
        for line in &member.body {
            out.snippet(line);
        }
    }

    if let Some(teardown) = &member.teardown {
        out.snippet(teardown);
    }
}

/// Append `_` to reserved words so they can name a variable
pub(crate) fn unreserve(name: String, reserved: &[&str]) -> String {
    let name = if name.is_empty() { "value".to_string() } else { name };
    if reserved.contains(&name.as_str()) {
        format!("{}_", name)
    } else {
        crate::util::to_identifier(&name)
    }
}

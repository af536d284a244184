//! Supported test frameworks and their naming conventions
//!
//! Each framework fixes how a subject becomes a suite name, how a member
//! becomes a test name and how the output file is named. The rules live
//! here so renderers and the output sink agree on them.

use crate::error::{Error, Result};
use crate::util::{to_compact_lower, to_identifier, to_pascal_case, to_snake_case};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Target test framework family
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Python: pytest
    #[serde(alias = "py.test")]
    Pytest,
    /// Python: unittest
    Unittest,
    /// JavaScript: Jest
    Jest,
    /// Java: JUnit 5
    #[serde(alias = "junit5")]
    JUnit,
}

impl Framework {
    /// Every framework, in registry order
    pub const ALL: [Framework; 4] = [
        Framework::Pytest,
        Framework::Unittest,
        Framework::Jest,
        Framework::JUnit,
    ];

    /// Canonical identifier
    pub fn id(&self) -> &'static str {
        match self {
            Framework::Pytest => "pytest",
            Framework::Unittest => "unittest",
            Framework::Jest => "jest",
            Framework::JUnit => "junit",
        }
    }

    /// Host language of the generated source
    pub fn language(&self) -> &'static str {
        match self {
            Framework::Pytest | Framework::Unittest => "python",
            Framework::Jest => "javascript",
            Framework::JUnit => "java",
        }
    }

    /// Extension of generated files (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Framework::Pytest | Framework::Unittest => "py",
            Framework::Jest => "js",
            Framework::JUnit => "java",
        }
    }

    /// Suite container name for a subject
    ///
    /// Python families: `Test<Pascal>`; Jest: the subject itself (a
    /// `describe` label); JUnit: `<Pascal>Test`.
    pub fn suite_name(&self, subject: &str) -> String {
        match self {
            Framework::Pytest | Framework::Unittest => {
                format!("Test{}", to_pascal_case(subject))
            }
            Framework::Jest => subject.to_string(),
            Framework::JUnit => to_identifier(&format!("{}Test", to_pascal_case(subject))),
        }
    }

    /// Test block name for a member
    ///
    /// Python families: `test_<snake>`; Jest: the member itself (a `test`
    /// label); JUnit: `test<Pascal>`.
    pub fn test_name(&self, member: &str) -> String {
        match self {
            Framework::Pytest | Framework::Unittest => format!("test_{}", to_snake_case(member)),
            Framework::Jest => member.to_string(),
            Framework::JUnit => format!("test{}", to_pascal_case(member)),
        }
    }

    /// Name of the extra parametrized sample block
    pub fn parametrized_name(&self, subject: &str) -> String {
        match self {
            Framework::Pytest | Framework::Unittest => {
                format!("test_{}_parametrized", to_snake_case(subject))
            }
            Framework::Jest => format!("{}_parametrized", subject),
            Framework::JUnit => format!("test{}_parametrized", to_pascal_case(subject)),
        }
    }

    /// Name of the mocked API call block (API suites only)
    pub fn api_call_name(&self, subject: &str) -> String {
        match self {
            Framework::Pytest | Framework::Unittest => {
                format!("test_{}_api_call", to_snake_case(subject))
            }
            Framework::Jest => format!("{}_api_call", subject),
            Framework::JUnit => format!("test{}_api_call", to_pascal_case(subject)),
        }
    }

    /// Output file name for a subject
    ///
    /// `test_<snake>.py`, `<compact lowercase>.test.js`, `<Pascal>Test.java`.
    pub fn file_name(&self, subject: &str) -> String {
        match self {
            Framework::Pytest | Framework::Unittest => {
                format!("test_{}.py", to_snake_case(subject))
            }
            Framework::Jest => format!("{}.test.js", to_compact_lower(subject)),
            Framework::JUnit => format!("{}.java", self.suite_name(subject)),
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pytest" | "py.test" => Ok(Framework::Pytest),
            "unittest" => Ok(Framework::Unittest),
            "jest" => Ok(Framework::Jest),
            "junit" | "junit5" => Ok(Framework::JUnit),
            _ => Err(Error::UnknownFramework(s.to_string())),
        }
    }
}

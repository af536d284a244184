//! pytest renderer
//!
//! Also home to the Python lexical helpers shared with the unittest
//! renderer (literals, variable names, docstring header).

use super::{
    block_names, dotted_import, emit_body, header_lines, needs_mocks, unreserve, Dialect,
    PytestLayout, RenderOptions, RenderedSuite, Renderer, SourceBuilder, SAMPLE_TABLE,
};
use crate::framework::Framework;
use crate::spec::TestSpecification;
use crate::util::{docstring_line, escape_single_quoted, to_snake_case};
use serde_json::Value;

pub(super) const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "self", "try", "while",
    "with", "yield",
];

pub(super) const MOCK_IMPORT: &str = "from unittest.mock import MagicMock, Mock, patch";

const DIALECT: Dialect = Dialect {
    comment: "#",
    placeholder: "assert True  # not yet implemented",
    variable: python_variable,
    assign: python_assign,
};

/// Python literal for a JSON value
pub(super) fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", escape_single_quoted(s)),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("'{}': {}", escape_single_quoted(k), python_literal(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

pub(super) fn python_variable(name: &str) -> String {
    unreserve(to_snake_case(name), PYTHON_KEYWORDS)
}

pub(super) fn python_assign(name: &str, value: &Value) -> String {
    format!("{} = {}", name, python_literal(value))
}

/// Module docstring carrying the provenance header
pub(super) fn emit_module_docstring(out: &mut SourceBuilder, lines: &[String]) {
    out.line("\"\"\"");
    for line in lines {
        out.line(docstring_line(line));
    }
    out.line("\"\"\"");
}

/// Renders pytest suites, class-based or as module-level functions
#[derive(Debug, Clone, Copy, Default)]
pub struct PytestRenderer;

impl Renderer for PytestRenderer {
    fn framework(&self) -> Framework {
        Framework::Pytest
    }

    fn render(&self, spec: &TestSpecification, options: &RenderOptions) -> RenderedSuite {
        let source = PytestSuite::new(spec, options).generate();
        RenderedSuite::new(Framework::Pytest, spec.subject(), source)
    }
}

struct PytestSuite<'a> {
    spec: &'a TestSpecification,
    options: &'a RenderOptions,
    in_class: bool,
}

impl<'a> PytestSuite<'a> {
    fn new(spec: &'a TestSpecification, options: &'a RenderOptions) -> Self {
        Self {
            spec,
            options,
            in_class: options.pytest_layout == PytestLayout::Class,
        }
    }

    fn generate(&self) -> String {
        let spec = self.spec;
        let features = spec.features();
        let names = block_names(spec, Framework::Pytest);
        let mut out = SourceBuilder::new("    ");

        emit_module_docstring(&mut out, &header_lines(spec, Framework::Pytest, self.options));
        out.blank();
        out.line("import pytest");
        if needs_mocks(spec) {
            out.line(MOCK_IMPORT);
        }
        if let Some(module) = dotted_import(spec, PYTHON_KEYWORDS) {
            out.line(format!("from {} import *", module));
        } else if let Some(path) = spec.module_path() {
            out.line(format!("# import {}", path));
        }

        if self.in_class {
            out.blank().blank();
            out.line(format!("class {}:", Framework::Pytest.suite_name(spec.subject())));
            out.indent();
            out.line(format!(
                "\"\"\"Test suite for {}\"\"\"",
                docstring_line(spec.subject())
            ));
        }

        if features.fixtures {
            self.gap(&mut out);
            out.line("@pytest.fixture");
            out.line(format!("def sample_fixture({}):", self.params(&[])));
            out.indent();
            out.line("\"\"\"Provide shared test data\"\"\"");
            out.line("# Setup");
            out.line("data = {'key': 'value'}");
            out.line("yield data");
            out.line("# Teardown");
            out.dedent();
        }

        if spec.members().is_empty() {
            self.gap(&mut out);
            out.line("# No test cases specified");
        }

        let fixture_param: &[&str] = if features.fixtures {
            &["sample_fixture"]
        } else {
            &[]
        };
        for (member, name) in spec.members().iter().zip(&names.members) {
            self.gap(&mut out);
            out.line(format!("def {}({}):", name, self.params(fixture_param)));
            out.indent();
            let doc = member
                .description
                .clone()
                .unwrap_or_else(|| format!("Test {}", member.name));
            out.line(format!("\"\"\"{}\"\"\"", docstring_line(&doc)));
            emit_body(&mut out, member, &DIALECT);
            out.dedent();
        }

        if let Some(name) = &names.parametrized {
            self.gap(&mut out);
            out.line("@pytest.mark.parametrize(\"input_val,expected\", [");
            out.indent();
            for (input, expected) in SAMPLE_TABLE {
                out.line(format!("({}, {}),", input, expected));
            }
            out.dedent();
            out.line("])");
            out.line(format!(
                "def {}({}):",
                name,
                self.params(&["input_val", "expected"])
            ));
            out.indent();
            out.line(format!(
                "\"\"\"Parametrized sample for {}\"\"\"",
                docstring_line(spec.subject())
            ));
            out.line("assert input_val == expected");
            out.dedent();
        }

        if let Some(name) = &names.api_call {
            self.gap(&mut out);
            out.line(format!("def {}({}):", name, self.params(&[])));
            out.indent();
            out.line(format!(
                "\"\"\"Mocked API call for {}\"\"\"",
                docstring_line(spec.subject())
            ));
            emit_api_call(&mut out, spec.subject(), "assert response.status_code == 200");
            out.dedent();
        }

        if self.in_class {
            out.dedent();
        }
        out.blank().blank();
        out.line("if __name__ == \"__main__\":");
        out.indent().line("pytest.main([__file__])");
        out.finish()
    }

    /// Separator before a top-level block: one blank line inside the class,
    /// two at module level
    fn gap(&self, out: &mut SourceBuilder) {
        out.blank();
        if !self.in_class {
            out.blank();
        }
    }

    fn params(&self, extra: &[&str]) -> String {
        let mut params: Vec<&str> = Vec::with_capacity(extra.len() + 1);
        if self.in_class {
            params.push("self");
        }
        params.extend_from_slice(extra);
        params.join(", ")
    }
}

/// Body of the mocked HTTP call block; `status_check` asserts on `response`
pub(super) fn emit_api_call(out: &mut SourceBuilder, subject: &str, status_check: &str) {
    let endpoint = format!("/api/{}", to_snake_case(subject));
    out.line("# Arrange");
    out.line("client = MagicMock()");
    out.line("client.get.return_value.status_code = 200");
    out.line("client.get.return_value.json.return_value = {'success': True}");
    out.line("# Act");
    out.line(format!("response = client.get('{}')", endpoint));
    out.line("# Assert");
    out.line(status_check);
    out.line(format!("client.get.assert_called_once_with('{}')", endpoint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Member, TestKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(spec: &TestSpecification, options: &RenderOptions) -> String {
        PytestRenderer.render(spec, options).source
    }

    #[test]
    fn test_class_layout_golden() {
        let spec = TestSpecification::builder("Calculator")
            .member(
                Member::new("add")
                    .with_description("Adds two numbers")
                    .with_body_line("assert add(2, 3) == 5"),
            )
            .methods(["subtract"])
            .build()
            .unwrap();
        let expected = format!(
            r#""""
Tests for Calculator.

Generated by suitegen (pytest, unit tests).
Spec hash: {hash}
Regenerating overwrites this file.
"""

import pytest


class TestCalculator:
    """Test suite for Calculator"""

    def test_add(self):
        """Adds two numbers"""
        # Arrange
        # Act
        # Assert
        assert add(2, 3) == 5

    def test_subtract(self):
        """Test subtract"""
        # Arrange
        # Act
        # Assert
        assert True  # not yet implemented


if __name__ == "__main__":
    pytest.main([__file__])
"#,
            hash = spec.hash()
        );
        assert_eq!(render(&spec, &RenderOptions::default()), expected);
    }

    #[test]
    fn test_function_layout_has_no_self() {
        let spec = TestSpecification::builder("string_utils")
            .methods(["reverse"])
            .fixtures(true)
            .parametrize(true)
            .build()
            .unwrap();
        let options = RenderOptions {
            pytest_layout: PytestLayout::Functions,
            ..Default::default()
        };
        let source = render(&spec, &options);
        assert!(!source.contains("class TestStringUtils"));
        assert!(!source.contains("self"));
        assert!(source.contains("\n\n\ndef test_reverse(sample_fixture):\n"));
        assert!(source.contains("def test_string_utils_parametrized(input_val, expected):"));
    }

    #[test]
    fn test_fixture_and_parametrize_blocks() {
        let spec = TestSpecification::builder("Calculator")
            .methods(["add"])
            .fixtures(true)
            .parametrize(true)
            .build()
            .unwrap();
        let source = render(&spec, &RenderOptions::default());
        assert!(source.contains("    @pytest.fixture\n    def sample_fixture(self):\n"));
        assert!(source.contains("def test_add(self, sample_fixture):"));
        assert!(source.contains("@pytest.mark.parametrize(\"input_val,expected\", [\n        (1, 1),\n        (2, 2),\n        (3, 3),\n    ])"));
        assert!(source.contains("def test_calculator_parametrized(self, input_val, expected):"));
    }

    #[test]
    fn test_imports() {
        let spec = TestSpecification::builder("Calculator")
            .kind(TestKind::Api)
            .module_path("app.calculator")
            .build()
            .unwrap();
        let source = render(&spec, &RenderOptions::default());
        assert!(source.contains("import pytest\nfrom unittest.mock import MagicMock, Mock, patch\nfrom app.calculator import *\n"));
        assert!(source.contains("# No test cases specified"));
        assert!(source.contains("def test_calculator_api_call(self):"));
        assert!(source.contains("response = client.get('/api/calculator')"));
    }

    #[test]
    fn test_inputs_become_assignments() {
        let spec = TestSpecification::builder("Calculator")
            .member(
                Member::new("divide")
                    .with_input("numerator", json!(1))
                    .with_input("class", json!("x'y"))
                    .with_input("flags", json!([true, null]))
                    .with_expected(json!({"ok": false})),
            )
            .build()
            .unwrap();
        let source = render(&spec, &RenderOptions::default());
        assert!(source.contains(
            "        # Arrange\n        numerator = 1\n        class_ = 'x\\'y'\n        flags = [True, None]\n        expected = {'ok': False}\n        # Act\n"
        ));
    }

    #[test]
    fn test_multiline_snippets_reindented() {
        let spec = TestSpecification::builder("Calculator")
            .member(
                Member::new("loop")
                    .with_setup("calc = Calculator()")
                    .with_body_line("for i in range(3):\n    assert calc.add(i, 0) == i")
                    .with_teardown("calc.close()"),
            )
            .build()
            .unwrap();
        let source = render(&spec, &RenderOptions::default());
        assert!(source.contains(
            "        calc = Calculator()\n        # Arrange\n        # Act\n        # Assert\n        for i in range(3):\n            assert calc.add(i, 0) == i\n        calc.close()\n"
        ));
    }

    #[test]
    fn test_docstring_escaped() {
        let spec = TestSpecification::builder("Calculator")
            .member(Member::new("add").with_description("tricky \"\"\" quotes"))
            .build()
            .unwrap();
        let source = render(&spec, &RenderOptions::default());
        assert!(source.contains(r#""""tricky \"\"\" quotes""""#));
    }

    #[test]
    fn test_docstring_ending_in_quote_is_closed() {
        let spec = TestSpecification::builder("Greeter")
            .member(Member::new("greet").with_description("Returns \"hello\""))
            .member(Member::new("path").with_description("Ends in a backslash \\"))
            .build()
            .unwrap();
        let source = render(&spec, &RenderOptions::default());
        assert!(source.contains("        \"\"\"Returns \\\"hello\\\"\"\"\"\n"));
        assert!(source.contains("        \"\"\"Ends in a backslash \\\\\"\"\"\n"));
    }

    #[test]
    fn test_python_literals() {
        assert_eq!(python_literal(&json!(null)), "None");
        assert_eq!(python_literal(&json!(1.5)), "1.5");
        assert_eq!(python_literal(&json!({"a": [1, "b"]})), "{'a': [1, 'b']}");
    }
}

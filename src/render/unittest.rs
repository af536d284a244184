//! unittest renderer

use super::pytest::{
    emit_api_call, emit_module_docstring, python_assign, python_variable, MOCK_IMPORT,
    PYTHON_KEYWORDS,
};
use super::{
    block_names, dotted_import, emit_body, header_lines, needs_mocks, Dialect, RenderOptions,
    RenderedSuite, Renderer, SourceBuilder, SAMPLE_TABLE,
};
use crate::framework::Framework;
use crate::spec::TestSpecification;
use crate::util::docstring_line;

const DIALECT: Dialect = Dialect {
    comment: "#",
    placeholder: "self.assertTrue(True)  # not yet implemented",
    variable: python_variable,
    assign: python_assign,
};

/// Renders `unittest.TestCase` suites
#[derive(Debug, Clone, Copy, Default)]
pub struct UnittestRenderer;

impl Renderer for UnittestRenderer {
    fn framework(&self) -> Framework {
        Framework::Unittest
    }

    fn render(&self, spec: &TestSpecification, options: &RenderOptions) -> RenderedSuite {
        let names = block_names(spec, Framework::Unittest);
        let mut out = SourceBuilder::new("    ");

        emit_module_docstring(&mut out, &header_lines(spec, Framework::Unittest, options));
        out.blank();
        out.line("import unittest");
        if needs_mocks(spec) {
            out.line(MOCK_IMPORT);
        }
        if let Some(module) = dotted_import(spec, PYTHON_KEYWORDS) {
            out.line(format!("from {} import *", module));
        } else if let Some(path) = spec.module_path() {
            out.line(format!("# import {}", path));
        }
        out.blank().blank();

        out.line(format!(
            "class {}(unittest.TestCase):",
            Framework::Unittest.suite_name(spec.subject())
        ));
        out.indent();
        out.line(format!(
            "\"\"\"Test suite for {}\"\"\"",
            docstring_line(spec.subject())
        ));

        if spec.features().fixtures {
            out.blank();
            out.line("def setUp(self):");
            out.indent();
            out.line("\"\"\"Set up test fixtures\"\"\"");
            out.line("self.test_data = {'key': 'value'}");
            out.dedent();
            out.blank();
            out.line("def tearDown(self):");
            out.indent();
            out.line("\"\"\"Tear down test fixtures\"\"\"");
            out.line("self.test_data = None");
            out.dedent();
        }

        if spec.members().is_empty() {
            out.blank();
            out.line("# No test cases specified");
        }

        for (member, name) in spec.members().iter().zip(&names.members) {
            out.blank();
            out.line(format!("def {}(self):", name));
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
            let table: Vec<String> = SAMPLE_TABLE
                .iter()
                .map(|(input, expected)| format!("({}, {})", input, expected))
                .collect();
            out.blank();
            out.line(format!("def {}(self):", name));
            out.indent();
            out.line(format!(
                "\"\"\"Parametrized sample for {}\"\"\"",
                docstring_line(spec.subject())
            ));
            out.line(format!("for input_val, expected in [{}]:", table.join(", ")));
            out.indent();
            out.line("with self.subTest(input_val=input_val):");
            out.indent().line("self.assertEqual(input_val, expected)");
            out.dedent().dedent().dedent();
        }

        if let Some(name) = &names.api_call {
            out.blank();
            out.line(format!("def {}(self):", name));
            out.indent();
            out.line(format!(
                "\"\"\"Mocked API call for {}\"\"\"",
                docstring_line(spec.subject())
            ));
            emit_api_call(&mut out, spec.subject(), "self.assertEqual(response.status_code, 200)");
            out.dedent();
        }

        out.dedent();
        out.blank().blank();
        out.line("if __name__ == '__main__':");
        out.indent().line("unittest.main()");

        RenderedSuite::new(Framework::Unittest, spec.subject(), out.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Member, TestKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_utils_golden() {
        let spec = TestSpecification::builder("StringUtils")
            .member(
                Member::new("reverse_string")
                    .with_description("Reversing a string")
                    .with_setup("utils = StringUtils()")
                    .with_body_line("result = utils.reverse('hello')")
                    .with_body_line("self.assertEqual(result, 'olleh')"),
            )
            .fixtures(true)
            .build()
            .unwrap();
        let expected = format!(
            r#""""
Tests for StringUtils.

Generated by suitegen (unittest, unit tests).
Spec hash: {hash}
Regenerating overwrites this file.
"""

import unittest


class TestStringUtils(unittest.TestCase):
    """Test suite for StringUtils"""

    def setUp(self):
        """Set up test fixtures"""
        self.test_data = {{'key': 'value'}}

    def tearDown(self):
        """Tear down test fixtures"""
        self.test_data = None

    def test_reverse_string(self):
        """Reversing a string"""
        utils = StringUtils()
        # Arrange
        # Act
        # Assert
        result = utils.reverse('hello')
        self.assertEqual(result, 'olleh')


if __name__ == '__main__':
    unittest.main()
"#,
            hash = spec.hash()
        );
        let suite = UnittestRenderer.render(&spec, &RenderOptions::default());
        assert_eq!(suite.source, expected);
        assert_eq!(suite.file_name, "test_string_utils.py");
    }

    #[test]
    fn test_placeholder_and_parametrize() {
        let spec = TestSpecification::builder("Calculator")
            .methods(["add"])
            .parametrize(true)
            .build()
            .unwrap();
        let source = UnittestRenderer.render(&spec, &RenderOptions::default()).source;
        assert!(source.contains("        self.assertTrue(True)  # not yet implemented\n"));
        assert!(source.contains(
            "    def test_calculator_parametrized(self):\n        \"\"\"Parametrized sample for Calculator\"\"\"\n        for input_val, expected in [(1, 1), (2, 2), (3, 3)]:\n            with self.subTest(input_val=input_val):\n                self.assertEqual(input_val, expected)\n"
        ));
    }

    #[test]
    fn test_api_suite_imports_mocks() {
        let spec = TestSpecification::builder("UserService")
            .methods(["fetch"])
            .kind(TestKind::Api)
            .build()
            .unwrap();
        let source = UnittestRenderer.render(&spec, &RenderOptions::default()).source;
        assert!(source.contains("from unittest.mock import MagicMock, Mock, patch"));
        assert!(source.contains("def test_user_service_api_call(self):"));
        assert!(source.contains("self.assertEqual(response.status_code, 200)"));
        assert!(source.contains("(unittest, api tests)"));
    }

    #[test]
    fn test_subject_with_quote_stays_in_docstrings() {
        let spec = TestSpecification::builder("Quote\"")
            .member(Member::new("say").with_description("Says \"hi\""))
            .parametrize(true)
            .build()
            .unwrap();
        let source = UnittestRenderer.render(&spec, &RenderOptions::default()).source;
        assert!(source.contains("\nTests for Quote\\\".\n"));
        assert!(source.contains("class TestQuote(unittest.TestCase):\n    \"\"\"Test suite for Quote\\\"\"\"\"\n"));
        assert!(source.contains("        \"\"\"Says \\\"hi\\\"\"\"\"\n"));
        assert!(source.contains("        \"\"\"Parametrized sample for Quote\\\"\"\"\"\n"));
    }
}

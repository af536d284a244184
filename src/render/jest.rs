//! Jest renderer

use super::{
    block_names, emit_body, header_lines, needs_mocks, unreserve, Dialect, RenderOptions,
    RenderedSuite, Renderer, SourceBuilder, SAMPLE_TABLE,
};
use crate::framework::Framework;
use crate::spec::TestSpecification;
use crate::util::{
    comment_line, escape_single_quoted, to_camel_case, to_identifier, to_pascal_case,
    to_snake_case,
};
use serde_json::Value;

// Reserved words plus the Jest globals a local `const` would shadow
const JS_RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
    "yield", "expect", "jest",
];

const DIALECT: Dialect = Dialect {
    comment: "//",
    placeholder: "expect(true).toBe(true); // not yet implemented",
    variable: js_variable,
    assign: js_assign,
};

fn js_variable(name: &str) -> String {
    unreserve(to_camel_case(name), JS_RESERVED)
}

// JSON is valid JavaScript expression syntax
fn js_assign(name: &str, value: &Value) -> String {
    format!("const {} = {};", name, value)
}

/// Renders Jest `describe`/`test` suites (CommonJS)
#[derive(Debug, Clone, Copy, Default)]
pub struct JestRenderer;

impl Renderer for JestRenderer {
    fn framework(&self) -> Framework {
        Framework::Jest
    }

    fn render(&self, spec: &TestSpecification, options: &RenderOptions) -> RenderedSuite {
        let names = block_names(spec, Framework::Jest);
        let mut out = SourceBuilder::new("  ");

        out.line("/**");
        for line in header_lines(spec, Framework::Jest, options) {
            if line.is_empty() {
                out.line(" *");
            } else {
                out.line(format!(" * {}", comment_line(&line)));
            }
        }
        out.line(" */");
        out.blank();

        let mut imports = false;
        if needs_mocks(spec) {
            out.line("const { jest } = require('@jest/globals');");
            imports = true;
        }
        if let Some(module) = spec.module_path() {
            out.line(format!(
                "const {} = require('{}');",
                to_identifier(&to_pascal_case(spec.subject())),
                module
            ));
            imports = true;
        }
        if imports {
            out.blank();
        }

        out.line(format!(
            "describe('{}', () => {{",
            escape_single_quoted(&Framework::Jest.suite_name(spec.subject()))
        ));
        out.indent();

        let mut first = true;
        let mut gap = |out: &mut SourceBuilder| {
            if !first {
                out.blank();
            }
            first = false;
        };

        if spec.features().fixtures {
            gap(&mut out);
            out.line("let testData;");
            out.blank();
            out.line("beforeEach(() => {");
            out.indent().line("testData = { key: 'value' };");
            out.dedent().line("});");
            out.blank();
            out.line("afterEach(() => {");
            out.indent().line("testData = null;");
            out.dedent().line("});");
        }

        if spec.members().is_empty() {
            gap(&mut out);
            out.line("// No test cases specified");
        }

        for (member, name) in spec.members().iter().zip(&names.members) {
            gap(&mut out);
            out.line(format!("test('{}', () => {{", escape_single_quoted(name)));
            out.indent();
            let doc = member
                .description
                .clone()
                .unwrap_or_else(|| format!("Test {}", member.name));
            out.line(format!("// {}", comment_line(&doc)));
            emit_body(&mut out, member, &DIALECT);
            out.dedent();
            out.line("});");
        }

        if let Some(name) = &names.parametrized {
            gap(&mut out);
            out.line("test.each([");
            out.indent();
            for (input, expected) in SAMPLE_TABLE {
                out.line(format!("[{}, {}],", input, expected));
            }
            out.dedent();
            out.line(format!(
                "])('{} %i -> %i', (input, expected) => {{",
                escape_single_quoted(name)
            ));
            out.indent().line("expect(input).toBe(expected);");
            out.dedent().line("});");
        }

        if let Some(name) = &names.api_call {
            let endpoint = format!("/api/{}", to_snake_case(spec.subject()));
            gap(&mut out);
            out.line(format!("test('{}', async () => {{", escape_single_quoted(name)));
            out.indent();
            out.line("// Arrange");
            out.line("const client = {");
            out.indent().line(
                "get: jest.fn().mockResolvedValue({ status: 200, data: { success: true } }),",
            );
            out.dedent().line("};");
            out.line("// Act");
            out.line(format!("const response = await client.get('{}');", endpoint));
            out.line("// Assert");
            out.line("expect(response.status).toBe(200);");
            out.line(format!(
                "expect(client.get).toHaveBeenCalledWith('{}');",
                endpoint
            ));
            out.dedent();
            out.line("});");
        }

        out.dedent();
        out.line("});");

        RenderedSuite::new(Framework::Jest, spec.subject(), out.finish())
    }
}

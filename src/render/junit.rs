//! JUnit 5 renderer

use super::{
    block_names, dotted_import, emit_body, header_lines, needs_mocks, unreserve, Dialect,
    RenderOptions, RenderedSuite, Renderer, SourceBuilder, SAMPLE_TABLE,
};
use crate::framework::Framework;
use crate::spec::{TestKind, TestSpecification};
use crate::util::{comment_line, escape_double_quoted, to_camel_case, to_snake_case};
use serde_json::Value;

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "goto", "if", "implements", "import", "instanceof",
    "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
    "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized",
    "this", "throw", "throws", "transient", "true", "try", "var", "void", "volatile", "while",
];

const DIALECT: Dialect = Dialect {
    comment: "//",
    placeholder: "assertTrue(true); // not yet implemented",
    variable: java_variable,
    assign: java_assign,
};

fn java_variable(name: &str) -> String {
    unreserve(to_camel_case(name), JAVA_KEYWORDS)
}

/// Typed local declaration; arrays and objects are kept as their JSON text
///
/// Integers beyond `long` range become `BigInteger`.
fn java_assign(name: &str, value: &Value) -> String {
    let (ty, literal) = match value {
        Value::Null => ("Object", "null".to_string()),
        Value::Bool(b) => ("boolean", b.to_string()),
        Value::Number(n) if n.is_f64() => ("double", n.to_string()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ("long", format!("{}L", i)),
            None => (
                "java.math.BigInteger",
                format!("new java.math.BigInteger(\"{}\")", n),
            ),
        },
        Value::String(s) => ("String", format!("\"{}\"", escape_double_quoted(s))),
        Value::Array(_) | Value::Object(_) => (
            "String",
            format!("\"{}\"", escape_double_quoted(&value.to_string())),
        ),
    };
    format!("{} {} = {};", ty, name, literal)
}

/// Renders JUnit 5 (Jupiter) test classes
#[derive(Debug, Clone, Copy, Default)]
pub struct JUnitRenderer;

impl Renderer for JUnitRenderer {
    fn framework(&self) -> Framework {
        Framework::JUnit
    }

    fn render(&self, spec: &TestSpecification, options: &RenderOptions) -> RenderedSuite {
        let features = spec.features();
        let names = block_names(spec, Framework::JUnit);
        let mut out = SourceBuilder::new("    ");

        out.line("/**");
        for line in header_lines(spec, Framework::JUnit, options) {
            if line.is_empty() {
                out.line(" *");
            } else {
                out.line(format!(" * {}", comment_line(&line)));
            }
        }
        out.line(" */");
        out.blank();

        out.line("import org.junit.jupiter.api.*;");
        out.line("import static org.junit.jupiter.api.Assertions.*;");
        if features.parametrize {
            out.line("import org.junit.jupiter.params.ParameterizedTest;");
            out.line("import org.junit.jupiter.params.provider.CsvSource;");
        }
        if needs_mocks(spec) {
            out.line("import static org.mockito.Mockito.*;");
        }
        if spec.kind() == TestKind::Api {
            out.line("import java.util.function.Function;");
        }
        if let Some(module) = dotted_import(spec, JAVA_KEYWORDS) {
            out.line(format!("import {}.*;", module));
        } else if let Some(path) = spec.module_path() {
            out.line(format!("// import {}", path));
        }
        out.blank();

        out.line(format!(
            "public class {} {{",
            Framework::JUnit.suite_name(spec.subject())
        ));
        out.indent();

        if features.fixtures {
            out.blank();
            out.line("private Object testData;");
            out.blank();
            out.line("@BeforeEach");
            out.line("void setUp() {");
            out.indent().line("testData = new Object();");
            out.dedent().line("}");
            out.blank();
            out.line("@AfterEach");
            out.line("void tearDown() {");
            out.indent().line("testData = null;");
            out.dedent().line("}");
        }

        if spec.members().is_empty() {
            out.blank();
            out.line("// No test cases specified");
        }

        for (member, name) in spec.members().iter().zip(&names.members) {
            let doc = member
                .description
                .clone()
                .unwrap_or_else(|| format!("Test {}", member.name));
            out.blank();
            out.line(format!("/** {} */", comment_line(&doc)));
            out.line("@Test");
            out.line(format!("void {}() {{", name));
            out.indent();
            emit_body(&mut out, member, &DIALECT);
            out.dedent();
            out.line("}");
        }

        if let Some(name) = &names.parametrized {
            let rows: Vec<String> = SAMPLE_TABLE
                .iter()
                .map(|(input, expected)| format!("\"{}, {}\"", input, expected))
                .collect();
            out.blank();
            out.line("@ParameterizedTest");
            out.line(format!("@CsvSource({{{}}})", rows.join(", ")));
            out.line(format!("void {}(int input, int expected) {{", name));
            out.indent().line("assertEquals(expected, input);");
            out.dedent().line("}");
        }

        if let Some(name) = &names.api_call {
            let endpoint = format!("/api/{}", to_snake_case(spec.subject()));
            out.blank();
            out.line("@Test");
            out.line("@SuppressWarnings(\"unchecked\")");
            out.line(format!("void {}() {{", name));
            out.indent();
            out.line("// Arrange");
            out.line("Function<String, Integer> client = mock(Function.class);");
            out.line(format!("when(client.apply(\"{}\")).thenReturn(200);", endpoint));
            out.line("// Act");
            out.line(format!("Integer status = client.apply(\"{}\");", endpoint));
            out.line("// Assert");
            out.line("assertEquals(200, status);");
            out.line(format!("verify(client).apply(\"{}\");", endpoint));
            out.dedent();
            out.line("}");
        }

        out.dedent();
        out.line("}");

        RenderedSuite::new(Framework::JUnit, spec.subject(), out.finish())
    }
}

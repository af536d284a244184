//! End-to-end rendering tests: spec documents in, suite text out

use pretty_assertions::assert_eq;
use rstest::rstest;
use suitegen::{
    render, resolve, Error, Framework, Member, RenderOptions, SpecDocument, TestKind,
    TestSpecification,
};

fn parse_one(json: &str) -> TestSpecification {
    let doc = SpecDocument::from_json(json).unwrap();
    TestSpecification::parse(&doc.specs[0]).unwrap()
}

#[test]
fn test_json_spec_round_trip_pytest() {
    let spec = parse_one(
        r#"{
            "class_name": "Calculator",
            "test_cases": [{"name": "add", "assertions": ["assert add(2,3)==5"]}]
        }"#,
    );
    let suite = resolve("pytest")
        .unwrap()
        .render(&spec, &RenderOptions::default());

    assert!(suite.source.contains("def test_add"));
    assert!(suite.source.contains("assert add(2,3)==5"));
    assert_eq!(suite.file_name, "test_calculator.py");
}

#[rstest]
#[case(Framework::Pytest, "class TestUserService:")]
#[case(Framework::Unittest, "class TestUserService(unittest.TestCase):")]
#[case(Framework::Jest, "describe('user_service', () => {")]
#[case(Framework::JUnit, "public class UserServiceTest {")]
fn test_suite_name_rules(#[case] framework: Framework, #[case] expected: &str) {
    let spec = TestSpecification::builder("user_service")
        .methods(["create"])
        .build()
        .unwrap();
    let source = render(&spec, framework, &RenderOptions::default()).source;
    assert!(source.contains(expected), "missing {:?} in:\n{}", expected, source);
}

#[rstest]
#[case(Framework::Pytest, "# No test cases specified")]
#[case(Framework::Unittest, "# No test cases specified")]
#[case(Framework::Jest, "// No test cases specified")]
#[case(Framework::JUnit, "// No test cases specified")]
fn test_empty_member_list_renders_marker(#[case] framework: Framework, #[case] marker: &str) {
    let spec = TestSpecification::builder("Empty").build().unwrap();
    let source = render(&spec, framework, &RenderOptions::default()).source;
    assert!(source.contains(marker));
    assert!(!source.contains("not yet implemented"));
}

#[test]
fn test_duplicate_members_produce_no_suite() {
    let doc = SpecDocument::from_json(
        r#"{"class_name": "Calculator", "test_cases": ["add", {"name": "add"}]}"#,
    )
    .unwrap();
    let err = TestSpecification::parse(&doc.specs[0]).unwrap_err();
    assert!(matches!(err, Error::DuplicateMemberName { ref name, .. } if name == "add"));
    assert!(err.is_input_error());
}

#[test]
fn test_unknown_framework_never_falls_back() {
    let err = resolve("cobol-unit").err().unwrap();
    assert_eq!(
        err.to_string(),
        "Unknown framework 'cobol-unit' (expected one of: pytest, unittest, jest, junit)"
    );
}

#[test]
fn test_yaml_spec_with_every_field() {
    let doc = SpecDocument::from_yaml(
        r#"
class_name: PaymentGateway
test_type: api
module_path: payments.gateway
include_fixtures: true
include_mocks: true
include_parametrize: true
test_cases:
  - name: charge card
    description: Charges a card once
    setup: gateway = PaymentGateway()
    inputs:
      amount: 100
      currency: EUR
    expected: true
    assertions:
      - assert gateway.charge(amount, currency) == expected
    teardown: gateway.close()
    tags: [smoke]
"#,
    )
    .unwrap();
    let spec = TestSpecification::parse(&doc.specs[0]).unwrap();
    assert_eq!(spec.kind(), TestKind::Api);

    let source = render(&spec, Framework::Pytest, &RenderOptions::default()).source;
    for expected in [
        "from unittest.mock import MagicMock, Mock, patch",
        "from payments.gateway import *",
        "def sample_fixture(self):",
        "def test_charge_card(self, sample_fixture):",
        "\"\"\"Charges a card once\"\"\"",
        "gateway = PaymentGateway()",
        "amount = 100",
        "currency = 'EUR'",
        "expected = True",
        "assert gateway.charge(amount, currency) == expected",
        "gateway.close()",
        "def test_payment_gateway_parametrized(self, input_val, expected):",
        "def test_payment_gateway_api_call(self):",
    ] {
        assert!(source.contains(expected), "missing {:?}", expected);
    }
    assert!(!source.contains("smoke"));
}

#[test]
fn test_every_framework_renders_the_same_spec() {
    let spec = TestSpecification::builder("StringUtils")
        .member(Member::new("reverse").with_description("Reverses text"))
        .member(Member::new("upper"))
        .parametrize(true)
        .build()
        .unwrap();

    let files: Vec<String> = Framework::ALL
        .iter()
        .map(|&fw| render(&spec, fw, &RenderOptions::default()).file_name)
        .collect();
    assert_eq!(
        files,
        vec![
            "test_string_utils.py",
            "test_string_utils.py",
            "stringutils.test.js",
            "StringUtilsTest.java"
        ]
    );
}

#[test]
fn test_colliding_member_names_stay_distinct() {
    let spec = TestSpecification::builder("Calc")
        .methods(["fooBar", "foo_bar", "foo bar"])
        .build()
        .unwrap();

    let py = render(&spec, Framework::Unittest, &RenderOptions::default()).source;
    assert!(py.contains("def test_foo_bar(self):"));
    assert!(py.contains("def test_foo_bar_2(self):"));
    assert!(py.contains("def test_foo_bar_3(self):"));

    let java = render(&spec, Framework::JUnit, &RenderOptions::default()).source;
    assert!(java.contains("void testFooBar() {"));
    assert!(java.contains("void testFooBar_2() {"));
    assert!(java.contains("void testFooBar_3() {"));
}

#[rstest]
#[case(Framework::Pytest, "# import ./calculator\n")]
#[case(Framework::Unittest, "# import ./calculator\n")]
#[case(Framework::Jest, "const Calculator = require('./calculator');\n")]
#[case(Framework::JUnit, "// import ./calculator\n")]
fn test_relative_module_path_per_framework(#[case] fw: Framework, #[case] line: &str) {
    let spec = TestSpecification::builder("Calculator")
        .methods(["add"])
        .module_path("./calculator")
        .build()
        .unwrap();
    let source = render(&spec, fw, &RenderOptions::default()).source;
    assert!(source.contains(line), "{}:\n{}", fw, source);
    assert!(!source.contains("from ./calculator"));
    assert!(!source.contains("import ./calculator.*"));
}

#[rstest]
#[case(Framework::Pytest, "from app.calculator import *\n")]
#[case(Framework::Unittest, "from app.calculator import *\n")]
#[case(Framework::Jest, "const Calculator = require('app.calculator');\n")]
#[case(Framework::JUnit, "import app.calculator.*;\n")]
fn test_dotted_module_path_per_framework(#[case] fw: Framework, #[case] line: &str) {
    let spec = TestSpecification::builder("Calculator")
        .methods(["add"])
        .module_path("app.calculator")
        .build()
        .unwrap();
    let source = render(&spec, fw, &RenderOptions::default()).source;
    assert!(source.contains(line), "{}:\n{}", fw, source);
}

use super::*;
use crate::EvalError;
use pretty_assertions::assert_eq;

#[test]
fn type_tag_parses_known_annotations() {
    for tag in TypeTag::ALL {
        assert_eq!(TypeTag::parse(tag.as_str()).ok(), Some(tag));
    }
    assert_eq!(TypeTag::parse("  Int64 ").ok(), Some(TypeTag::Int64));
}

#[test]
fn type_tag_rejects_unknown_annotation() {
    let err = TypeTag::parse("Int16");
    assert!(matches!(
        err,
        Err(EvalError::UnknownTypeAnnotation { ref annotation }) if annotation == "Int16"
    ));
}

#[test]
fn return_type_accepts_void() {
    assert_eq!(ReturnType::parse("void").ok(), Some(ReturnType::Void));
    assert_eq!(
        ReturnType::parse("String").ok(),
        Some(ReturnType::Value(TypeTag::String))
    );
}

#[test]
fn display_forms() {
    assert_eq!(Value::int(14).to_string(), "14");
    assert_eq!(Value::float(14.0).to_string(), "14");
    assert_eq!(Value::float(2.5).to_string(), "2.5");
    assert_eq!(Value::Boolean(false).to_string(), "false");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(Value::text_list(["1", "2", "3"]).to_string(), "[1, 2, 3]");
}

#[test]
fn numeric_view_covers_all_number_tags() {
    assert_eq!(Value::int(3).as_number(), Some(3.0));
    assert_eq!(Value::Float32(1.5).as_number(), Some(1.5));
    assert_eq!(Value::float(-2.0).as_number(), Some(-2.0));
    assert_eq!(Value::string("3").as_number(), None);
    assert_eq!(Value::Boolean(true).as_number(), None);
}

#[test]
fn expression_closure_lowers_to_return() {
    let closure = Closure::new(
        "double",
        vec![Parameter::new("x", TypeTag::Float64)],
        ReturnType::Value(TypeTag::Float64),
        ClosureBody::Expression("x * 2".to_string()),
    );
    assert!(matches!(closure.body(), ClosureBody::Expression(_)));
    assert_eq!(closure.function().body(), ["return x * 2;".to_string()]);
    assert_eq!(closure.function().arity(), 1);
}

#[test]
fn block_closure_splits_statements() {
    let closure = Closure::new(
        "greet",
        Vec::new(),
        ReturnType::Void,
        ClosureBody::Block(r#"console.write("a; b"); return 1"#.to_string()),
    );
    assert!(matches!(closure.body(), ClosureBody::Block(_)));
    assert_eq!(
        closure.function().body(),
        [
            r#"console.write("a; b");"#.to_string(),
            "return 1;".to_string()
        ]
    );
}

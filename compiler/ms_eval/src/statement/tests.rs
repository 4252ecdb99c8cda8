use super::*;
use crate::value::ReturnType;
use crate::EvalError;
use pretty_assertions::assert_eq;

fn parse(text: &str) -> Statement {
    Statement::parse(text).unwrap_or_else(|e| panic!("`{text}` failed to parse: {e}"))
}

#[test]
fn blank_and_comments() {
    assert_eq!(parse("   "), Statement::Empty);
    assert_eq!(parse("// console.write(1);"), Statement::Comment);
}

#[test]
fn return_with_and_without_value() {
    assert_eq!(parse("return a + b;"), Statement::Return(Some("a + b".into())));
    assert_eq!(parse("return;"), Statement::Return(None));
    // `returned = 1` is an assignment, not a return.
    assert_eq!(
        parse("returned = 1;"),
        Statement::Assign {
            name: "returned".into(),
            expr: "1".into()
        }
    );
}

#[test]
fn console_forms() {
    assert_eq!(
        parse(r#"console.write("a, b", x);"#),
        Statement::Write {
            args: vec![r#""a, b""#.into(), "x".into()],
            newline: true
        }
    );
    assert_eq!(
        parse(r#"console.writef("{} + {}", 1, 2);"#),
        Statement::Write {
            args: vec![r#""{} + {}""#.into(), "1".into(), "2".into()],
            newline: false
        }
    );
    assert_eq!(
        parse(r#"console.system("echo hi");"#),
        Statement::System {
            args: vec![r#""echo hi""#.into()]
        }
    );
    assert_eq!(
        parse(r#"console.system("echo {}", who);"#),
        Statement::System {
            args: vec![r#""echo {}""#.into(), "who".into()]
        }
    );
    assert!(matches!(
        Statement::parse("console.write();"),
        Err(EvalError::Syntax { .. })
    ));
}

#[test]
fn typed_declaration() {
    assert_eq!(
        parse("var x: Int32 = 2 + 3;"),
        Statement::Declare {
            name: "x".into(),
            annotation: "Int32".into(),
            expr: "2 + 3".into()
        }
    );
    assert!(matches!(
        Statement::parse("var x = 1;"),
        Err(EvalError::Syntax { .. })
    ));
}

#[test]
fn expression_arrow_function() {
    let Statement::Arrow { name, closure } = parse("var double = |Int32: n| => Int32 n * 2;") else {
        panic!("expected an arrow function");
    };
    assert_eq!(name, "double");
    assert!(matches!(closure.body(), ClosureBody::Expression(_)));
    let function = closure.function();
    assert_eq!(function.arity(), 1);
    assert_eq!(function.params()[0], Parameter::new("n", TypeTag::Int32));
    assert_eq!(function.return_type(), ReturnType::Value(TypeTag::Int32));
    assert_eq!(function.body(), ["return n * 2;"]);
}

#[test]
fn block_arrow_function_without_params() {
    let Statement::Arrow { closure, .. } =
        parse(r#"var greet = |&| => { console.write("hi"); console.write("there"); };"#)
    else {
        panic!("expected an arrow function");
    };
    assert!(matches!(closure.body(), ClosureBody::Block(_)));
    assert_eq!(closure.function().arity(), 0);
    assert_eq!(closure.function().return_type(), ReturnType::Void);
    assert_eq!(
        closure.function().body(),
        [r#"console.write("hi");"#, r#"console.write("there");"#]
    );
}

#[test]
fn arrow_with_unknown_parameter_type() {
    assert!(matches!(
        Statement::parse("var f = |Int8: n| => n;"),
        Err(EvalError::UnknownTypeAnnotation { .. })
    ));
}

#[test]
fn bool_and_list_declarations() {
    assert_eq!(
        parse("bool ok = not false;"),
        Statement::DeclareBool {
            name: "ok".into(),
            expr: "not false".into()
        }
    );
    assert_eq!(
        parse("list v = [1, 2 , 3];"),
        Statement::DeclareList {
            name: "v".into(),
            elements: vec!["1".into(), "2".into(), "3".into()]
        }
    );
    assert_eq!(
        parse("list empty = [];"),
        Statement::DeclareList {
            name: "empty".into(),
            elements: vec![]
        }
    );
}

#[test]
fn control_flow_is_structural() {
    assert_eq!(
        parse("if (x > 1) {"),
        Statement::BlockOpen {
            keyword: "if".into()
        }
    );
    assert_eq!(
        parse("} else {"),
        Statement::BlockOpen {
            keyword: "else".into()
        }
    );
    assert_eq!(parse("}"), Statement::BlockClose);
    // A function named like a keyword prefix is still a call.
    assert_eq!(
        parse("iffy();"),
        Statement::Call {
            name: "iffy".into(),
            args: vec![]
        }
    );
}

#[test]
fn calls_steps_and_assignments() {
    assert_eq!(
        parse("add(1, mul(2, 3));"),
        Statement::Call {
            name: "add".into(),
            args: vec!["1".into(), "mul(2, 3)".into()]
        }
    );
    assert_eq!(
        parse("i++;"),
        Statement::Step {
            name: "i".into(),
            step: Step::Increment
        }
    );
    assert_eq!(
        parse("--i;"),
        Statement::Step {
            name: "i".into(),
            step: Step::Decrement
        }
    );
    assert_eq!(
        parse("x = y == 2;"),
        Statement::Assign {
            name: "x".into(),
            expr: "y == 2".into()
        }
    );
}

#[test]
fn anything_else_is_an_expression() {
    assert_eq!(parse("1 + 2;"), Statement::Expression("1 + 2".into()));
    assert_eq!(parse("x == 2"), Statement::Expression("x == 2".into()));
}

use super::*;
use pretty_assertions::assert_eq;

fn scan_text(source: &str) -> Program {
    let lines: Vec<&str> = source.lines().collect();
    scan(&lines).unwrap()
}

fn statement(line: usize, text: &str) -> Item {
    Item {
        line,
        kind: ItemKind::Statement(text.to_string()),
    }
}

#[test]
fn comments_and_blank_lines_are_dropped() {
    let program = scan_text(
        "// header\n\nvar x: Int32 = 1; // trailing\n/* block\n still block */ console.write(x);\nconsole.write(\"// kept\");",
    );
    assert_eq!(
        program.items,
        vec![
            statement(3, "var x: Int32 = 1;"),
            statement(5, "console.write(x);"),
            statement(6, "console.write(\"// kept\");"),
        ]
    );
}

#[test]
fn microscript_function_with_return_type() {
    let program = scan_text(
        "function add(a: Int32, b: Int32) -> Int32 {\n    return a + b;\n}\nconsole.write(add(1, 2));",
    );
    let expected = Function::new(
        "add",
        vec![
            Parameter::new("a", TypeTag::Int32),
            Parameter::new("b", TypeTag::Int32),
        ],
        ReturnType::Value(TypeTag::Int32),
        vec!["return a + b;".to_string()],
    );
    assert_eq!(
        program.items,
        vec![
            Item {
                line: 1,
                kind: ItemKind::Function(expected),
            },
            statement(4, "console.write(add(1, 2));"),
        ]
    );
    assert!(!program.auto_main);
}

#[test]
fn c_style_main_is_marked_for_auto_run() {
    let program = scan_text("fn main() {\n  console.write(\"hi\");\n}");
    let function = program.functions().next().unwrap();
    assert_eq!(function.name(), "main");
    assert_eq!(function.return_type(), ReturnType::Void);
    assert_eq!(function.body(), ["console.write(\"hi\");"]);
    assert!(program.auto_main);
}

#[test]
fn c_style_return_type_and_void_microscript_function() {
    let program = scan_text("String greet(who: String) {\nreturn who;\n}\nfunction log() {\n}");
    let functions: Vec<_> = program.functions().collect();
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0].return_type(), ReturnType::Value(TypeTag::String));
    assert_eq!(functions[1].return_type(), ReturnType::Void);
    assert!(functions[1].body().is_empty());
}

#[test]
fn nested_braces_stay_in_the_body() {
    let program = scan_text("function f() {\nif (x) {\nreturn 1;\n}\nreturn 2;\n}\nafter();");
    let function = program.functions().next().unwrap();
    assert_eq!(
        function.body(),
        ["if (x) {", "return 1;", "}", "return 2;"]
    );
    assert_eq!(program.items.last(), Some(&statement(7, "after();")));
}

#[test]
fn control_flow_chains_are_skipped_whole() {
    let program = scan_text(
        "if (a) {\nx = 1;\n} elif (b) {\nx = 2;\n}\nelse {\nx = 3;\n}\nwhile (x) {\n}\ndone();",
    );
    assert_eq!(
        program.items,
        vec![
            Item {
                line: 1,
                kind: ItemKind::Skipped {
                    keyword: "if".to_string(),
                    lines: 8,
                },
            },
            Item {
                line: 9,
                kind: ItemKind::Skipped {
                    keyword: "while".to_string(),
                    lines: 2,
                },
            },
            statement(11, "done();"),
        ]
    );
}

#[test]
fn imports_are_recorded() {
    let program = scan_text("import math;");
    assert_eq!(
        program.items,
        vec![Item {
            line: 1,
            kind: ItemKind::Import("math".to_string()),
        }]
    );
}

#[test]
fn unclosed_function_is_an_error() {
    let lines = ["", "function f() {", "return 1;"];
    assert!(matches!(
        scan(&lines),
        Err(SourceError::UnclosedBrace { line: 2 })
    ));
}

#[test]
fn malformed_headers_and_parameters() {
    assert!(matches!(
        scan(&["function (a: Int32) {", "}"]),
        Err(SourceError::MalformedHeader { line: 1, .. })
    ));
    assert!(matches!(
        scan(&["function f(a Int32) {", "}"]),
        Err(SourceError::MalformedParameter { line: 1, .. })
    ));
    assert!(matches!(
        scan(&["function f(a: Int8) {", "}"]),
        Err(SourceError::Type { line: 1, .. })
    ));
    assert!(matches!(
        scan(&["function f() -> Bool {", "}"]),
        Err(SourceError::Type { .. })
    ));
}

#[test]
fn whole_pipeline_with_macros() {
    let program = crate::parse_program("#define GREETING \"hello\"\nconsole.write(GREETING);").unwrap();
    assert_eq!(
        program.items,
        vec![statement(2, "console.write(\"hello\");")]
    );
}

//! Statement shapes.
//!
//! A statement line is matched against an ordered list of shape matchers
//! and turned into a [`Statement`] record before anything runs. The order
//! of the matchers is the dispatch priority:
//!
//! 1. `// comment`
//! 2. `return expr;`
//! 3. `console.write(...)` / `console.writef(...)`
//! 4. `console.system(cmd, args...);`
//! 5. `var name = |params| => ...;` (arrow function)
//! 6. `var name: Type = expr;`
//! 7. `bool name = expr;`
//! 8. `list name = [a, b];`
//! 9. control-flow headers (`if (...) {`) and lone `}`
//! 10. `name(args);`
//! 11. `x++;` `++x;` `x--;` `--x;`
//! 12. `name = expr;`
//! 13. any other text, evaluated as an expression

use crate::errors::{syntax_error, EvalResult};
use crate::text::{
    find_assignment, find_top_level, is_identifier, split_call, split_top_level, strip_call,
};
use crate::value::{Closure, ClosureBody, Parameter, ReturnType, TypeTag};

/// Keywords that open a brace block whose statements are not executed.
pub const CONTROL_FLOW_KEYWORDS: [&str; 5] = ["if", "elif", "else", "while", "for"];

/// Direction of `++` / `--`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Increment,
    Decrement,
}

/// A statement line, classified.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// Blank text.
    Empty,
    Comment,
    Return(Option<String>),
    /// `console.write` (newline) or `console.writef` (no newline). The first
    /// argument is the value or template, the rest fill `{}` placeholders.
    Write { args: Vec<String>, newline: bool },
    /// `console.system`: a command or command template plus its arguments.
    System { args: Vec<String> },
    Arrow { name: String, closure: Closure },
    Declare {
        name: String,
        annotation: String,
        expr: String,
    },
    DeclareBool { name: String, expr: String },
    DeclareList { name: String, elements: Vec<String> },
    /// Header of an `if`/`while`/... block.
    BlockOpen { keyword: String },
    /// A lone `}`.
    BlockClose,
    Call { name: String, args: Vec<String> },
    Step { name: String, step: Step },
    Assign { name: String, expr: String },
    Expression(String),
}

impl Statement {
    /// Classify one line of statement text.
    ///
    /// Fails with `SyntaxError` when the line starts like a known shape but
    /// is malformed, and with `UnknownTypeAnnotation` for a bad arrow
    /// parameter type.
    pub fn parse(text: &str) -> EvalResult<Statement> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Statement::Empty);
        }
        if text.starts_with("//") {
            return Ok(Statement::Comment);
        }
        let body = text.strip_suffix(';').unwrap_or(text).trim_end();

        if let Some(rest) = strip_keyword(body, "return") {
            let expr = rest.trim();
            return Ok(Statement::Return((!expr.is_empty()).then(|| expr.to_string())));
        }
        if let Some(stmt) = parse_console(body)? {
            return Ok(stmt);
        }
        if let Some(rest) = strip_keyword(body, "var") {
            return parse_var(rest, text);
        }
        if let Some(rest) = strip_keyword(body, "bool") {
            let (name, expr) = split_binding(rest, text)?;
            return Ok(Statement::DeclareBool { name, expr });
        }
        if let Some(rest) = strip_keyword(body, "list") {
            return parse_list(rest, text);
        }
        if let Some(keyword) = control_flow_keyword(body) {
            return Ok(Statement::BlockOpen {
                keyword: keyword.to_string(),
            });
        }
        if body == "}" {
            return Ok(Statement::BlockClose);
        }
        if let Some((name, args)) = split_call(body) {
            return Ok(Statement::Call {
                name: name.to_string(),
                args,
            });
        }
        if let Some((name, step)) = parse_step(body) {
            return Ok(Statement::Step {
                name: name.to_string(),
                step,
            });
        }
        if let Some(eq) = find_assignment(body) {
            let name = body[..eq].trim();
            if is_identifier(name) {
                return Ok(Statement::Assign {
                    name: name.to_string(),
                    expr: body[eq + 1..].trim().to_string(),
                });
            }
        }
        Ok(Statement::Expression(body.to_string()))
    }
}

/// `keyword` followed by whitespace (or end of text); returns the rest.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

fn control_flow_keyword(body: &str) -> Option<&'static str> {
    if !body.ends_with('{') {
        return None;
    }
    let body = body.trim_start_matches('}').trim_start();
    CONTROL_FLOW_KEYWORDS.into_iter().find(|keyword| {
        body.strip_prefix(keyword).is_some_and(|rest| {
            rest.starts_with(|c: char| c.is_whitespace() || c == '(' || c == '{')
        })
    })
}

fn parse_console(body: &str) -> EvalResult<Option<Statement>> {
    for (prefix, newline) in [("console.writef", false), ("console.write", true)] {
        if let Some(inner) = strip_call(body, prefix) {
            let args = split_top_level(inner, ',');
            if args.is_empty() {
                return Err(syntax_error(format!("{prefix}() requires at least one argument")));
            }
            return Ok(Some(Statement::Write { args, newline }));
        }
    }
    if let Some(inner) = strip_call(body, "console.system") {
        let args = split_top_level(inner, ',');
        if args.is_empty() {
            return Err(syntax_error("console.system() requires a command"));
        }
        return Ok(Some(Statement::System { args }));
    }
    Ok(None)
}

/// `name = expr` with `name` an identifier.
fn split_binding(rest: &str, stmt: &str) -> EvalResult<(String, String)> {
    let eq = find_top_level(rest, '=').ok_or_else(|| malformed(stmt))?;
    let name = rest[..eq].trim();
    let expr = rest[eq + 1..].trim();
    if !is_identifier(name) || expr.is_empty() {
        return Err(malformed(stmt));
    }
    Ok((name.to_string(), expr.to_string()))
}

fn parse_var(rest: &str, stmt: &str) -> EvalResult<Statement> {
    let eq = rest.find('=').ok_or_else(|| malformed(stmt))?;
    let target = rest[..eq].trim();
    let expr = rest[eq + 1..].trim();

    if expr.starts_with('|') {
        if !is_identifier(target) {
            return Err(malformed(stmt));
        }
        let closure = parse_arrow(target, expr, stmt)?;
        return Ok(Statement::Arrow {
            name: target.to_string(),
            closure,
        });
    }

    let (name, annotation) = target.split_once(':').ok_or_else(|| {
        syntax_error(format!("missing type annotation in `{stmt}`"))
    })?;
    let name = name.trim();
    if !is_identifier(name) || expr.is_empty() {
        return Err(malformed(stmt));
    }
    Ok(Statement::Declare {
        name: name.to_string(),
        annotation: annotation.trim().to_string(),
        expr: expr.to_string(),
    })
}

/// `|Type: a, Type: b| => [Ret] expr` or `|...| => [Ret] { block }`.
fn parse_arrow(name: &str, text: &str, stmt: &str) -> EvalResult<Closure> {
    let after_open = &text[1..];
    let close = after_open.find('|').ok_or_else(|| malformed(stmt))?;
    let params = parse_arrow_params(&after_open[..close])?;
    let rest = after_open[close + 1..].trim_start();
    let rest = rest
        .strip_prefix("=>")
        .ok_or_else(|| syntax_error(format!("expected `=>` in `{stmt}`")))?
        .trim_start();

    let (return_type, rest) = split_return_type(rest)?;
    let body = if let Some(block) = rest.strip_prefix('{') {
        let block = block
            .strip_suffix('}')
            .ok_or_else(|| syntax_error(format!("unclosed arrow function body in `{stmt}`")))?;
        ClosureBody::Block(block.trim().to_string())
    } else if rest.is_empty() {
        return Err(syntax_error(format!("missing arrow function body in `{stmt}`")));
    } else {
        ClosureBody::Expression(rest.to_string())
    };
    Ok(Closure::new(name, params, return_type, body))
}

fn parse_arrow_params(text: &str) -> EvalResult<Vec<Parameter>> {
    let text = text.trim();
    if text.is_empty() || text == "&" {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|param| {
            let (ty, name) = param.split_once(':').ok_or_else(|| {
                syntax_error(format!("invalid arrow parameter `{}`", param.trim()))
            })?;
            let name = name.trim();
            if !is_identifier(name) {
                return Err(syntax_error(format!("invalid parameter name `{name}`")));
            }
            Ok(Parameter::new(name, TypeTag::parse(ty)?))
        })
        .collect()
}

/// Optional leading return-type word after `=>`.
fn split_return_type(text: &str) -> EvalResult<(ReturnType, &str)> {
    let word_len = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    let word = &text[..word_len];
    let rest = text[word_len..].trim_start();
    let is_type = word == "void" || TypeTag::ALL.iter().any(|tag| tag.as_str() == word);
    if is_type && !rest.is_empty() {
        Ok((ReturnType::parse(word)?, rest))
    } else {
        Ok((ReturnType::Void, text))
    }
}

fn parse_list(rest: &str, stmt: &str) -> EvalResult<Statement> {
    let (name, expr) = split_binding(rest, stmt)?;
    let inner = expr
        .strip_prefix('[')
        .and_then(|e| e.strip_suffix(']'))
        .ok_or_else(|| syntax_error(format!("expected `[...]` in `{stmt}`")))?;
    let elements = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(|e| e.trim().to_string()).collect()
    };
    Ok(Statement::DeclareList { name, elements })
}

fn parse_step(body: &str) -> Option<(&str, Step)> {
    let candidates = [
        (body.strip_suffix("++"), Step::Increment),
        (body.strip_suffix("--"), Step::Decrement),
        (body.strip_prefix("++"), Step::Increment),
        (body.strip_prefix("--"), Step::Decrement),
    ];
    candidates.into_iter().find_map(|(name, step)| {
        name.map(str::trim)
            .filter(|n| is_identifier(n))
            .map(|n| (n, step))
    })
}

#[cold]
fn malformed(stmt: &str) -> crate::EvalError {
    syntax_error(format!("malformed declaration `{stmt}`"))
}

#[cfg(test)]
mod tests;

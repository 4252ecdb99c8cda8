//! String literal processing.

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::text::is_identifier;
use crate::value::Value;

/// Process backslash escapes in the body of a string literal.
///
/// Recognized: `\n \t \r \\ \" \' \0`. Any other escape is kept as written.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(c @ ('\\' | '"' | '\'')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Replace every `{identifier}` with the textual form of the bound value.
///
/// Braces around anything that is not an identifier (including `{}`) are
/// left untouched. An unbound identifier fails with `UndefinedVariable`.
pub fn interpolate(text: &str, env: &Environment) -> EvalResult<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                let value = env.lookup_variable(&after[..close])?;
                out.push_str(&value.to_string());
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Fill positional `{}` placeholders with `args`, in order.
///
/// Placeholders beyond the supplied arguments stay as `{}`; surplus
/// arguments are ignored.
pub fn fill_placeholders(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut pieces = template.split("{}");
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        out.push_str(piece);
    }
    let surplus = args.count();
    if surplus > 0 {
        tracing::debug!(surplus, "more arguments than placeholders");
    }
    out
}

//! Line scanner.
//!
//! Turns preprocessed lines into a [`Program`]: an ordered list of items,
//! each tagged with the 1-based line it starts on.
//!
//! - `//` and `/* ... */` comments are stripped and blank lines dropped.
//! - Function declarations become [`ItemKind::Function`] with the lines
//!   between their braces as the body. Two header forms are accepted:
//!   `Int32 add(a: Int32, b: Int32) {` (the first word is the return type,
//!   `fn` meaning void) and `function add(a: Int32, b: Int32) -> Int32 {`
//!   (no arrow meaning void).
//! - `if` / `elif` / `else` / `while` / `for` blocks, including a whole
//!   `if ... else` chain, become [`ItemKind::Skipped`].
//! - `import name` becomes [`ItemKind::Import`].
//! - Everything else is an [`ItemKind::Statement`].

use ms_eval::statement::CONTROL_FLOW_KEYWORDS;
use ms_eval::text::{block_end, identifier_len, is_identifier, matching_paren, split_top_level};
use ms_eval::{Function, Parameter, ReturnType, TypeTag};

use crate::SourceError;

/// Return-type words that open a C-style function header.
const C_STYLE_RETURN_TYPES: [&str; 7] =
    ["String", "Char", "Int32", "Int64", "Float32", "Float64", "fn"];

/// A scanned program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
    /// Set when a C-style `main` function was declared; the driver calls
    /// `main()` after the top level has run.
    pub auto_main: bool,
}

impl Program {
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.items.iter().filter_map(|item| match &item.kind {
            ItemKind::Function(function) => Some(function),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// 1-based source line.
    pub line: usize,
    pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    Function(Function),
    Statement(String),
    /// A control-flow block that is recognized but not executed.
    Skipped { keyword: String, lines: usize },
    Import(String),
}

/// A source line with comments removed, trimmed and known to be non-blank.
struct CodeLine {
    line: usize,
    text: String,
}

/// Scan preprocessed lines into a program.
pub fn scan<S: AsRef<str>>(lines: &[S]) -> Result<Program, SourceError> {
    let code = strip_comments(lines);
    let texts: Vec<&str> = code.iter().map(|c| c.text.as_str()).collect();
    let mut program = Program::default();

    let mut index = 0;
    while index < code.len() {
        let line = code[index].line;
        let text = &code[index].text;

        if let Some(rest) = strip_keyword(text, "import") {
            let module = rest.trim().trim_end_matches(';').trim().to_string();
            tracing::debug!(%module, line, "import is not resolved");
            program.items.push(Item {
                line,
                kind: ItemKind::Import(module),
            });
            index += 1;
            continue;
        }

        if let Some(header) = parse_header(text, line)? {
            let end = block_end(&texts, index).ok_or(SourceError::UnclosedBrace { line })?;
            let body = texts[index + 1..end].iter().map(ToString::to_string).collect();
            if header.c_style && header.name == "main" {
                program.auto_main = true;
            }
            tracing::trace!(name = %header.name, line, "function");
            program.items.push(Item {
                line,
                kind: ItemKind::Function(Function::new(
                    header.name,
                    header.params,
                    header.return_type,
                    body,
                )),
            });
            index = end + 1;
            continue;
        }

        if let Some(keyword) = control_flow_keyword(text) {
            let mut end = block_end(&texts, index).ok_or(SourceError::UnclosedBrace { line })?;
            while let Some(next) = texts.get(end + 1) {
                if !matches!(control_flow_keyword(next), Some("elif" | "else")) {
                    break;
                }
                let next_line = code[end + 1].line;
                end = block_end(&texts, end + 1)
                    .ok_or(SourceError::UnclosedBrace { line: next_line })?;
            }
            program.items.push(Item {
                line,
                kind: ItemKind::Skipped {
                    keyword: keyword.to_string(),
                    lines: end - index + 1,
                },
            });
            index = end + 1;
            continue;
        }

        program.items.push(Item {
            line,
            kind: ItemKind::Statement(text.clone()),
        });
        index += 1;
    }
    Ok(program)
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

/// Keyword of a line that opens a control-flow block.
fn control_flow_keyword(text: &str) -> Option<&'static str> {
    if !text.contains('{') {
        return None;
    }
    let text = text.trim_start_matches('}').trim_start();
    CONTROL_FLOW_KEYWORDS.into_iter().find(|keyword| {
        text.strip_prefix(keyword).is_some_and(|rest| {
            rest.starts_with(|c: char| c.is_whitespace() || c == '(' || c == '{')
        })
    })
}

/// Remove `//` and `/* ... */` comments (outside string literals), trim,
/// and drop lines left blank.
fn strip_comments<S: AsRef<str>>(lines: &[S]) -> Vec<CodeLine> {
    let mut code = Vec::new();
    let mut in_block = false;
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let mut out = String::with_capacity(line.len());
        let mut in_string = false;
        let mut escaped = false;
        let mut chars = line.chars().peekable();
        while let Some(ch) = chars.next() {
            if in_block {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    in_block = false;
                }
                continue;
            }
            if in_string {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_string = false;
                }
                out.push(ch);
                continue;
            }
            match (ch, chars.peek()) {
                ('/', Some('/')) => break,
                ('/', Some('*')) => {
                    chars.next();
                    in_block = true;
                }
                ('"', _) => {
                    in_string = true;
                    out.push(ch);
                }
                _ => out.push(ch),
            }
        }
        let text = out.trim();
        if !text.is_empty() {
            code.push(CodeLine {
                line: index + 1,
                text: text.to_string(),
            });
        }
    }
    code
}

struct Header {
    name: String,
    params: Vec<Parameter>,
    return_type: ReturnType,
    c_style: bool,
}

/// Parse a function header line. `Ok(None)` means the line is not a
/// function declaration at all.
fn parse_header(text: &str, line: usize) -> Result<Option<Header>, SourceError> {
    let keyword_len = text.find(char::is_whitespace).unwrap_or(text.len());
    let keyword = &text[..keyword_len];
    let c_style = C_STYLE_RETURN_TYPES.contains(&keyword);
    if !c_style && keyword != "function" {
        return Ok(None);
    }
    let malformed = || SourceError::MalformedHeader {
        line,
        header: text.to_string(),
    };

    let rest = text[keyword_len..].trim_start();
    let name_len = identifier_len(rest);
    let after_name = rest[name_len..].trim_start();
    if name_len == 0 || !after_name.starts_with('(') {
        return if c_style { Ok(None) } else { Err(malformed()) };
    }
    let name = &rest[..name_len];
    let close = matching_paren(after_name, 0).ok_or_else(malformed)?;
    let tail = after_name[close + 1..].trim();
    let Some(tail) = tail.strip_suffix('{').map(str::trim) else {
        return Err(malformed());
    };

    let type_error = |source: ms_eval::EvalError| SourceError::Type { line, source };
    let return_type = if c_style {
        if !tail.is_empty() {
            return Err(malformed());
        }
        match keyword {
            "fn" => ReturnType::Void,
            tag => ReturnType::Value(TypeTag::parse(tag).map_err(type_error)?),
        }
    } else if tail.is_empty() {
        ReturnType::Void
    } else {
        let annotation = tail.strip_prefix("->").ok_or_else(malformed)?;
        ReturnType::parse(annotation).map_err(type_error)?
    };

    let params = split_top_level(&after_name[1..close], ',')
        .into_iter()
        .map(|param| parse_param(&param, line))
        .collect::<Result<_, _>>()?;

    Ok(Some(Header {
        name: name.to_string(),
        params,
        return_type,
        c_style,
    }))
}

/// `name: Type`.
fn parse_param(param: &str, line: usize) -> Result<Parameter, SourceError> {
    let malformed = || SourceError::MalformedParameter {
        line,
        param: param.to_string(),
    };
    let (name, annotation) = param.split_once(':').ok_or_else(malformed)?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(malformed());
    }
    let ty = TypeTag::parse(annotation).map_err(|source| SourceError::Type { line, source })?;
    Ok(Parameter::new(name, ty))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

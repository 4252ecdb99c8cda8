//! Text helpers shared by the statement matchers and the evaluator.
//!
//! Statements and expressions arrive as raw text. These helpers locate
//! separators at the top level only: outside string and character literals
//! and outside any `()`, `[]` or `{}` nesting.

/// Whether `text` is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// Length in bytes of the identifier at the start of `text` (0 if none).
pub fn identifier_len(text: &str) -> usize {
    let mut len = 0;
    for (i, ch) in text.char_indices() {
        let ok = if i == 0 {
            ch.is_ascii_alphabetic() || ch == '_'
        } else {
            ch.is_ascii_alphanumeric() || ch == '_'
        };
        if !ok {
            break;
        }
        len = i + ch.len_utf8();
    }
    len
}

/// Tracks whether a scan is inside a `"..."` string or `'c'` character
/// literal.
#[derive(Default)]
struct Quotes {
    open: Option<char>,
    escaped: bool,
}

impl Quotes {
    /// Feed one character. True while it belongs to a literal, quotes
    /// included.
    fn step(&mut self, ch: char) -> bool {
        match self.open {
            Some(quote) => {
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' {
                    self.escaped = true;
                } else if ch == quote {
                    self.open = None;
                }
                true
            }
            None if ch == '"' || ch == '\'' => {
                self.open = Some(ch);
                true
            }
            None => false,
        }
    }
}

/// Yields `(byte_index, char)` for characters at the top level.
///
/// Quotes and brackets themselves are never yielded.
fn top_level_chars(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut depth = 0usize;
    let mut quotes = Quotes::default();
    text.char_indices().filter(move |&(_, ch)| {
        if quotes.step(ch) {
            return false;
        }
        match ch {
            '(' | '[' | '{' => {
                depth += 1;
                false
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        }
    })
}

/// Byte index of the first top-level `needle`.
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    top_level_chars(text)
        .find(|&(_, ch)| ch == needle)
        .map(|(i, _)| i)
}

/// Split on top-level `separator`, trimming each piece.
///
/// Blank input yields no pieces.
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, ch) in top_level_chars(text) {
        if ch == separator {
            pieces.push(text[start..i].trim().to_string());
            start = i + ch.len_utf8();
        }
    }
    pieces.push(text[start..].trim().to_string());
    pieces
}

/// Byte index of the top-level `=` of an assignment.
///
/// Skips `==`, `!=`, `<=`, `>=` and `=>`.
pub fn find_assignment(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    top_level_chars(text)
        .filter(|&(_, ch)| ch == '=')
        .map(|(i, _)| i)
        .find(|&i| {
            let prev = i.checked_sub(1).map(|p| bytes[p]);
            let next = bytes.get(i + 1).copied();
            !matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) && !matches!(next, Some(b'=' | b'>'))
        })
}

/// Byte index of the `)` matching the `(` at `open`.
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quotes = Quotes::default();
    for (i, ch) in text[open..].char_indices() {
        if quotes.step(ch) {
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// If `text` is entirely `prefix(inner)`, return `inner`.
///
/// The parenthesis opened right after `prefix` must close at the very end.
pub fn strip_call<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?;
    if !rest.starts_with('(') {
        return None;
    }
    let open = prefix.len();
    let close = matching_paren(text, open)?;
    (close == text.len() - 1).then(|| &text[open + 1..close])
}

/// Split call-like text `name(args)` into the name and raw argument texts.
pub fn split_call(text: &str) -> Option<(&str, Vec<String>)> {
    let len = identifier_len(text);
    if len == 0 {
        return None;
    }
    let name = &text[..len];
    let inner = strip_call(text, name)?;
    Some((name, split_top_level(inner, ',')))
}

/// If `text` is a single character literal `'c'`, return its body.
///
/// The body is one character or one backslash escape.
pub fn char_literal(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let single = match chars.next()? {
        '\\' => chars.next().is_some() && chars.next().is_none(),
        '\'' => false,
        _ => chars.next().is_none(),
    };
    single.then_some(inner)
}

/// If `text` is a single string literal, return the text between the quotes.
pub fn string_literal(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut escaped = false;
    for ch in inner.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return None;
        }
    }
    // A trailing backslash would have escaped the closing quote.
    (!escaped).then_some(inner)
}

/// Split `cond ? a : b` into its three parts.
pub fn split_ternary(text: &str) -> Option<(&str, &str, &str)> {
    let question = find_top_level(text, '?')?;
    let rest = &text[question + 1..];
    let colon = find_top_level(rest, ':')?;
    Some((
        text[..question].trim(),
        rest[..colon].trim(),
        rest[colon + 1..].trim(),
    ))
}

/// Net `{` minus `}` on a line, ignoring braces inside literals.
fn brace_balance(line: &str) -> isize {
    let mut balance = 0isize;
    let mut quotes = Quotes::default();
    for ch in line.chars() {
        if quotes.step(ch) {
            continue;
        }
        match ch {
            '{' => balance += 1,
            '}' => balance -= 1,
            _ => {}
        }
    }
    balance
}

/// Index of the line that closes the brace block opened on `lines[start]`.
pub fn block_end<S: AsRef<str>>(lines: &[S], start: usize) -> Option<usize> {
    let mut open = 0isize;
    for (i, line) in lines.iter().enumerate().skip(start) {
        open += brace_balance(line.as_ref());
        if open <= 0 {
            return Some(i);
        }
    }
    None
}

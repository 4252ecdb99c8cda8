//! `#define` preprocessor.
//!
//! Directives:
//!
//! - `#define NAME value` defines an object-like macro (the value may be empty)
//! - `#define NAME(a, b) body` defines a function-like macro
//! - `#undef NAME` removes both kinds
//!
//! Macro names are upper-case (`[A-Z_][A-Z0-9_]*`). Directive lines are
//! replaced by blank lines so line numbers stay stable. Every other line is
//! expanded repeatedly, at most [`MAX_EXPANSION_PASSES`] times, until it stops
//! changing. Text inside string and character literals is never expanded.

use rustc_hash::FxHashMap;

use ms_eval::text::{identifier_len, matching_paren, split_top_level};

use crate::SourceError;

/// Upper bound on expansion passes per line; stops self-referencing macros.
pub const MAX_EXPANSION_PASSES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
struct FunctionMacro {
    params: Vec<String>,
    body: String,
}

/// Macro table plus the line-by-line driver.
#[derive(Debug, Default)]
pub struct Preprocessor {
    objects: FxHashMap<String, String>,
    functions: FxHashMap<String, FunctionMacro>,
}

/// Run the preprocessor over a whole source text.
pub fn preprocess(source: &str) -> Result<Vec<String>, SourceError> {
    let mut preprocessor = Preprocessor::new();
    source
        .lines()
        .enumerate()
        .map(|(index, line)| preprocessor.process_line(line, index + 1))
        .collect()
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one source line: apply a directive (yielding a blank line) or
    /// return the expanded line.
    pub fn process_line(&mut self, line: &str, line_no: usize) -> Result<String, SourceError> {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("#define") {
            self.define(rest, trimmed, line_no)?;
            return Ok(String::new());
        }
        if let Some(rest) = trimmed.strip_prefix("#undef") {
            let name = rest.trim();
            if !is_macro_name(name) {
                return Err(malformed(trimmed, line_no));
            }
            self.undefine(name);
            return Ok(String::new());
        }
        Ok(self.expand(line))
    }

    pub fn define_object(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.objects.insert(name.into(), value.into());
    }

    pub fn define_function(
        &mut self,
        name: impl Into<String>,
        params: Vec<String>,
        body: impl Into<String>,
    ) {
        self.functions.insert(
            name.into(),
            FunctionMacro {
                params,
                body: body.into(),
            },
        );
    }

    pub fn undefine(&mut self, name: &str) {
        self.objects.remove(name);
        self.functions.remove(name);
    }

    fn define(&mut self, rest: &str, directive: &str, line_no: usize) -> Result<(), SourceError> {
        if !rest.starts_with(char::is_whitespace) {
            return Err(malformed(directive, line_no));
        }
        let rest = rest.trim_start();
        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        if !is_macro_name(name) {
            return Err(malformed(directive, line_no));
        }
        let after = &rest[name_len..];

        if after.starts_with('(') {
            let close = after.find(')').ok_or_else(|| malformed(directive, line_no))?;
            let params = split_top_level(&after[1..close], ',');
            if params.iter().any(|p| identifier_len(p) != p.len()) {
                return Err(malformed(directive, line_no));
            }
            tracing::trace!(%name, ?params, "function-like macro");
            self.define_function(name, params, after[close + 1..].trim());
        } else if after.is_empty() || after.starts_with(char::is_whitespace) {
            tracing::trace!(%name, "object-like macro");
            self.define_object(name, after.trim());
        } else {
            return Err(malformed(directive, line_no));
        }
        Ok(())
    }

    /// Expand macros in `line` until it stops changing.
    pub fn expand(&self, line: &str) -> String {
        if self.objects.is_empty() && self.functions.is_empty() {
            return line.to_string();
        }
        let mut current = line.to_string();
        for _ in 0..MAX_EXPANSION_PASSES {
            let next = self.expand_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// One left-to-right pass. Function-like macros take precedence over
    /// object-like ones of the same name.
    fn expand_once(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut pos = 0;
        while let Some(ch) = line[pos..].chars().next() {
            if ch == '"' || ch == '\'' {
                let end = literal_end(line, pos, ch);
                out.push_str(&line[pos..end]);
                pos = end;
            } else if ch.is_ascii_digit() {
                let len = line[pos..]
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
                    .unwrap_or(line.len() - pos);
                out.push_str(&line[pos..pos + len]);
                pos += len;
            } else if ch.is_ascii_alphabetic() || ch == '_' {
                let len = identifier_len(&line[pos..]);
                let word = &line[pos..pos + len];
                match self.expand_word(line, pos, word) {
                    Some((text, end)) => {
                        out.push_str(&text);
                        pos = end;
                    }
                    None => {
                        out.push_str(word);
                        pos += len;
                    }
                }
            } else {
                out.push(ch);
                pos += ch.len_utf8();
            }
        }
        out
    }

    /// Expansion of the word starting at `start`, and the byte offset
    /// just past what it replaces.
    fn expand_word(&self, line: &str, start: usize, word: &str) -> Option<(String, usize)> {
        let word_end = start + word.len();
        if let Some(mac) = self.functions.get(word) {
            let gap = line[word_end..].len() - line[word_end..].trim_start().len();
            let open = word_end + gap;
            if line[open..].starts_with('(') {
                let close = matching_paren(line, open)?;
                let args = split_top_level(&line[open + 1..close], ',');
                if args.len() == mac.params.len() {
                    return Some((substitute(&mac.body, &mac.params, &args), close + 1));
                }
                tracing::debug!(
                    name = word,
                    expected = mac.params.len(),
                    got = args.len(),
                    "macro call left unexpanded"
                );
                return None;
            }
        }
        self.objects.get(word).map(|value| (value.clone(), word_end))
    }
}

/// Replace whole-word parameter names in `body` with arguments.
fn substitute(body: &str, params: &[String], args: &[String]) -> String {
    let mut out = String::with_capacity(body.len());
    let mut pos = 0;
    while let Some(ch) = body[pos..].chars().next() {
        if ch == '"' || ch == '\'' {
            let end = literal_end(body, pos, ch);
            out.push_str(&body[pos..end]);
            pos = end;
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            let len = identifier_len(&body[pos..]);
            let word = &body[pos..pos + len];
            match params.iter().position(|p| p == word) {
                Some(i) => out.push_str(&args[i]),
                None => out.push_str(word),
            }
            pos += len;
        } else {
            out.push(ch);
            pos += ch.len_utf8();
        }
    }
    out
}

/// Byte offset just past the literal opened by `quote` at `start`, or the
/// end of the line for an unterminated literal.
fn literal_end(line: &str, start: usize, quote: char) -> usize {
    let mut escaped = false;
    for (i, ch) in line[start + 1..].char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return start + 1 + i + 1;
        }
    }
    line.len()
}

fn is_macro_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase() || c == '_')
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cold]
fn malformed(directive: &str, line: usize) -> SourceError {
    SourceError::MalformedDirective {
        line,
        text: directive.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> Vec<String> {
        preprocess(source).unwrap_or_else(|e| panic!("preprocess failed: {e}"))
    }

    #[test]
    fn object_macros_expand_whole_words() {
        let out = run("#define MAX 10\nvar x: Int32 = MAX + MAXIMUM;");
        assert_eq!(out, vec!["", "var x: Int32 = 10 + MAXIMUM;"]);
    }

    #[test]
    fn function_macros_substitute_arguments() {
        let out = run("#define SQUARE(x) ((x) * (x))\nvar y: Int32 = SQUARE(2 + 1);");
        assert_eq!(out[1], "var y: Int32 = ((2 + 1) * (2 + 1));");
    }

    #[test]
    fn nested_expansion_and_undef() {
        let out = run("#define ONE 1\n#define TWO (ONE + ONE)\nTWO;\n#undef TWO\nTWO;");
        assert_eq!(out, vec!["", "", "(1 + 1);", "", "TWO;"]);
    }

    #[test]
    fn wrong_argument_count_is_left_alone() {
        let out = run("#define ADD(a, b) a + b\nADD(1);");
        assert_eq!(out[1], "ADD(1);");
    }

    #[test]
    fn strings_are_not_expanded() {
        let out = run("#define NAME \"bob\"\nconsole.write(\"NAME\", NAME);");
        assert_eq!(out[1], "console.write(\"NAME\", \"bob\");");
    }

    #[test]
    fn character_literals_are_not_expanded() {
        let out = run("#define A 1\nvar c: Char = 'A'; var n: Int32 = A;");
        assert_eq!(out[1], "var c: Char = 'A'; var n: Int32 = 1;");
    }

    #[test]
    fn self_reference_stops_after_pass_limit() {
        let out = run("#define LOOP LOOP + 1\nLOOP;");
        assert_eq!(out[1], format!("LOOP{};", " + 1".repeat(MAX_EXPANSION_PASSES)));
    }

    #[test]
    fn lower_case_names_are_rejected() {
        assert!(matches!(
            preprocess("#define max 10"),
            Err(SourceError::MalformedDirective { line: 1, .. })
        ));
        assert!(preprocess("#undef").is_err());
    }
}

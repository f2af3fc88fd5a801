//! Recursive descent parser for the HOCON subset.
//!
//! Entries are `key = value`, `key : value`, or `key { ... }`; keys are
//! dotted paths of unquoted or quoted segments; values are quoted strings,
//! objects, lists, or unquoted scalars running to the end of the line.
//! Comment lines collected since the previous entry attach to the next
//! entry's value origin; a comment trailing an opening `{` on the same
//! line attaches to that object value, so annotations can be written
//! either above a key or just inside its braces.

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::value::{ConfigObject, ConfigValue, Origin, ValueKind};
use crate::Parse;

pub struct Parser<'src> {
    cursor: Cursor<'src>,
    /// Comment lines seen since the last entry, waiting to be attached.
    comments: Vec<String>,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            comments: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the whole template. Stops at the first error.
    pub fn parse_document(mut self) -> Parse {
        let mut root = ConfigObject::new();
        if let Err(e) = self.document(&mut root) {
            self.errors.push(e);
        }
        Parse::new(root, self.errors)
    }

    fn document(&mut self, root: &mut ConfigObject) -> Result<(), ParseError> {
        self.skip_trivia();
        if self.cursor.peek() == Some('{') {
            self.cursor.bump();
            self.object_body(root, Some('}'))?;
            self.skip_trivia();
            if let Some(c) = self.cursor.peek() {
                return Err(self.err(ParseErrorKind::UnexpectedCharacter(c)));
            }
            Ok(())
        } else {
            self.object_body(root, None)
        }
    }

    /// Parse entries until the terminator (or end of input at the root).
    fn object_body(
        &mut self,
        obj: &mut ConfigObject,
        terminator: Option<char>,
    ) -> Result<(), ParseError> {
        loop {
            self.skip_trivia();
            match self.cursor.peek() {
                None => {
                    return if terminator.is_some() {
                        Err(self.err(ParseErrorKind::UnclosedObject))
                    } else {
                        Ok(())
                    };
                }
                Some(c) if Some(c) == terminator => {
                    self.cursor.bump();
                    return Ok(());
                }
                Some(_) => self.entry(obj)?,
            }
        }
    }

    /// One `key = value` / `key : value` / `key { ... }` entry.
    fn entry(&mut self, obj: &mut ConfigObject) -> Result<(), ParseError> {
        let mut comments = std::mem::take(&mut self.comments);
        let line = self.cursor.line();
        let path = self.key_path()?;
        self.skip_inline_ws();
        match self.cursor.peek() {
            Some('{') => {
                self.cursor.bump();
                self.take_trailing_comment(&mut comments);
                let mut inner = ConfigObject::new();
                self.object_body(&mut inner, Some('}'))?;
                let value = ConfigValue::new(
                    ValueKind::Object(inner),
                    Origin::with_comments(line, comments),
                );
                obj.insert(&path, value, line);
                Ok(())
            }
            Some('=') | Some(':') => {
                self.cursor.bump();
                self.skip_inline_ws();
                let value = self.value(comments)?;
                obj.insert(&path, value, line);
                Ok(())
            }
            _ => Err(self.err(ParseErrorKind::ExpectedValue)),
        }
    }

    // ── Keys ───────────────────────────────────────────────────────────

    fn key_path(&mut self) -> Result<Vec<String>, ParseError> {
        let mut segments = vec![self.key_segment()?];
        while self.cursor.peek() == Some('.') {
            self.cursor.bump();
            segments.push(self.key_segment()?);
        }
        Ok(segments)
    }

    fn key_segment(&mut self) -> Result<String, ParseError> {
        if self.cursor.peek() == Some('"') {
            let content = self.quoted_string()?;
            if content.contains('.') {
                return Err(self.err(ParseErrorKind::QuotedKeyWithDot(content)));
            }
            // Keep the quotes when the content would need them again.
            return Ok(if needs_quoting(&content) {
                format!("\"{}\"", content)
            } else {
                content
            });
        }
        let start = self.cursor.pos();
        self.cursor.bump_while(is_key_char);
        let segment = self.cursor.slice(start, self.cursor.pos());
        if segment.is_empty() {
            return Err(self.err(ParseErrorKind::ExpectedKey));
        }
        Ok(segment.to_string())
    }

    // ── Values ─────────────────────────────────────────────────────────

    fn value(&mut self, comments: Vec<String>) -> Result<ConfigValue, ParseError> {
        let line = self.cursor.line();
        match self.cursor.peek() {
            None => Err(self.err(ParseErrorKind::ExpectedValue)),
            Some('"') => {
                let s = self.quoted_string()?;
                Ok(ConfigValue::new(
                    ValueKind::Str(s),
                    Origin::with_comments(line, comments),
                ))
            }
            Some('{') => {
                self.cursor.bump();
                let mut comments = comments;
                self.take_trailing_comment(&mut comments);
                let mut inner = ConfigObject::new();
                self.object_body(&mut inner, Some('}'))?;
                Ok(ConfigValue::new(
                    ValueKind::Object(inner),
                    Origin::with_comments(line, comments),
                ))
            }
            Some('[') => {
                self.cursor.bump();
                let elems = self.list_elements()?;
                Ok(ConfigValue::new(
                    ValueKind::List(elems),
                    Origin::with_comments(line, comments),
                ))
            }
            Some(_) => self.unquoted_scalar(comments),
        }
    }

    fn list_elements(&mut self) -> Result<Vec<ConfigValue>, ParseError> {
        let mut elems = Vec::new();
        loop {
            self.skip_trivia();
            match self.cursor.peek() {
                None => return Err(self.err(ParseErrorKind::UnclosedList)),
                Some(']') => {
                    self.cursor.bump();
                    return Ok(elems);
                }
                Some(_) => {
                    let comments = std::mem::take(&mut self.comments);
                    elems.push(self.value(comments)?);
                }
            }
        }
    }

    /// An unquoted scalar: runs to end of line, `,`, `]`, `}`, or a
    /// comment. Classified as bool, null, number, or string.
    fn unquoted_scalar(&mut self, comments: Vec<String>) -> Result<ConfigValue, ParseError> {
        let line = self.cursor.line();
        let start = self.cursor.pos();
        while let Some(c) = self.cursor.peek() {
            if matches!(c, '\n' | ',' | ']' | '}' | '#') {
                break;
            }
            if c == '/' && self.cursor.peek2() == Some('/') {
                break;
            }
            if c == '$' && self.cursor.peek2() == Some('{') {
                return Err(self.err(ParseErrorKind::Substitution));
            }
            self.cursor.bump();
        }
        let text = self.cursor.slice(start, self.cursor.pos()).trim();
        if text.is_empty() {
            return Err(ParseError::new(ParseErrorKind::ExpectedValue, line));
        }
        let kind = match text {
            "true" => ValueKind::Bool(true),
            "false" => ValueKind::Bool(false),
            "null" => ValueKind::Null,
            _ if is_number(text) => ValueKind::Number(text.to_string()),
            _ => ValueKind::Str(text.to_string()),
        };
        Ok(ConfigValue::new(kind, Origin::with_comments(line, comments)))
    }

    fn quoted_string(&mut self) -> Result<String, ParseError> {
        // Opening quote.
        self.cursor.bump();
        let mut s = String::new();
        loop {
            match self.cursor.bump() {
                None | Some('\n') => return Err(self.err(ParseErrorKind::UnterminatedString)),
                Some('"') => return Ok(s),
                Some('\\') => match self.cursor.bump() {
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some('/') => s.push('/'),
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('b') => s.push('\u{0008}'),
                    Some('f') => s.push('\u{000C}'),
                    Some(c) => return Err(self.err(ParseErrorKind::InvalidEscape(c))),
                    None => return Err(self.err(ParseErrorKind::UnterminatedString)),
                },
                Some(c) => s.push(c),
            }
        }
    }

    // ── Trivia ─────────────────────────────────────────────────────────

    /// Skip whitespace, newlines, and commas, collecting comment lines.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') | Some(',') => {
                    self.cursor.bump();
                }
                Some('#') => {
                    self.cursor.bump();
                    let text = self.comment_text();
                    self.comments.push(text);
                }
                Some('/') if self.cursor.peek2() == Some('/') => {
                    self.cursor.bump();
                    self.cursor.bump();
                    let text = self.comment_text();
                    self.comments.push(text);
                }
                _ => return,
            }
        }
    }

    fn skip_inline_ws(&mut self) {
        self.cursor.bump_while(|c| matches!(c, ' ' | '\t' | '\r'));
    }

    /// If a comment follows on the current line, read it into `comments`.
    fn take_trailing_comment(&mut self, comments: &mut Vec<String>) {
        self.skip_inline_ws();
        match self.cursor.peek() {
            Some('#') => {
                self.cursor.bump();
                let text = self.comment_text();
                comments.push(text);
            }
            Some('/') if self.cursor.peek2() == Some('/') => {
                self.cursor.bump();
                self.cursor.bump();
                let text = self.comment_text();
                comments.push(text);
            }
            _ => {}
        }
    }

    /// Rest of the current line after a comment marker, newline excluded.
    fn comment_text(&mut self) -> String {
        let start = self.cursor.pos();
        self.cursor.bump_while(|c| c != '\n');
        self.cursor
            .slice(start, self.cursor.pos())
            .trim_end_matches('\r')
            .to_string()
    }

    fn err(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.cursor.line())
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '$')
}

/// Whether a quoted key segment would need quoting if written again.
fn needs_quoting(segment: &str) -> bool {
    segment.is_empty() || !segment.chars().all(is_key_char)
}

/// Full-string decimal number check: optional sign, digits, optional
/// fraction, optional exponent.
fn is_number(text: &str) -> bool {
    let mut rest = text.strip_prefix(['-', '+']).unwrap_or(text);
    let digits = |s: &str| s.chars().take_while(|c| c.is_ascii_digit()).count();

    let int_len = digits(rest);
    if int_len == 0 {
        return false;
    }
    rest = &rest[int_len..];

    if let Some(frac) = rest.strip_prefix('.') {
        let frac_len = digits(frac);
        if frac_len == 0 {
            return false;
        }
        rest = &frac[frac_len..];
    }

    if let Some(exp) = rest.strip_prefix(['e', 'E']) {
        let exp = exp.strip_prefix(['-', '+']).unwrap_or(exp);
        let exp_len = digits(exp);
        if exp_len == 0 {
            return false;
        }
        rest = &exp[exp_len..];
    }

    rest.is_empty()
}

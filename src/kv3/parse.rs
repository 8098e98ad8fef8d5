//! Recursive-descent parser for the KV3 text subset used by physics
//! documents.
//!
//! The cursor walks raw bytes; this is UTF-8 safe because every structural
//! character the parser dispatches on is ASCII, and slices are only taken
//! between structural characters.

use super::Value;
use crate::error::{ExtractError, Result};

pub(crate) fn parse_document(text: &str) -> Result<Value> {
    let mut cur = Cursor::new(text);
    cur.skip_header()?;
    cur.skip_trivia();
    let root = cur.parse_value()?;
    cur.skip_trivia();
    if !cur.at_end() {
        return Err(cur.error("trailing data after document root"));
    }
    Ok(root)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.pos += 1;
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Build a positioned error at the current cursor location.
    fn error(&self, message: impl Into<String>) -> ExtractError {
        let consumed = &self.src.as_bytes()[..self.pos.min(self.src.len())];
        let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = consumed
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(self.pos + 1, |nl| self.pos - nl);
        ExtractError::MalformedDocument {
            line,
            column,
            message: message.into(),
        }
    }

    fn expect(&mut self, byte: u8, what: &str) -> Result<()> {
        if self.peek() == Some(byte) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(what))
        }
    }

    /// Skip the `<!-- ... -->` encoding header, if present.
    fn skip_header(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.rest().starts_with("<!--") {
            match self.rest().find("-->") {
                Some(end) => self.pos += end + 3,
                None => return Err(self.error("unterminated document header")),
            }
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("//") {
                match self.rest().find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'#') => self.parse_byte_array(),
            Some(b'"') => self.parse_string(),
            Some(_) => self.parse_bare(),
            None => Err(self.error("expected a value")),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.bump();
        let mut entries = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(self.error("unterminated object")),
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(entries));
                }
                Some(b',') => {
                    self.bump();
                    continue;
                }
                Some(_) => {}
            }
            let key = self.parse_key()?;
            self.skip_trivia();
            self.expect(b'=', "expected '=' after object key")?;
            self.skip_trivia();
            let value = self.parse_value()?;
            entries.push((key, value));
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("expected an object key"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(self.error("unterminated array")),
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(b',') => self.bump(),
                Some(_) => items.push(self.parse_value()?),
            }
        }
    }

    /// `#[ 0A 1B ... ]` — the raw inner text feeds the blob decoder, which
    /// does its own validation.
    fn parse_byte_array(&mut self) -> Result<Value> {
        self.bump();
        self.expect(b'[', "expected '[' after '#'")?;
        let start = self.pos;
        match self.rest().find(']') {
            Some(end) => {
                let inner = &self.src[start..start + end];
                self.pos = start + end + 1;
                Ok(Value::ByteArray(inner.to_string()))
            }
            None => Err(self.error("unterminated byte array")),
        }
    }

    /// Quoted strings keep their surrounding quotes in the stored token;
    /// consumers strip them, which is what tolerates trailing garbage after
    /// a closing quote in the source data.
    fn parse_string(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.rest().starts_with("\"\"\"") {
            self.pos += 3;
            return match self.rest().find("\"\"\"") {
                Some(end) => {
                    self.pos += end + 3;
                    Ok(Value::Scalar(self.src[start..self.pos].to_string()))
                }
                None => Err(self.error("unterminated multi-line string")),
            };
        }
        self.bump();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(b'"') => {
                    self.bump();
                    return Ok(Value::Scalar(self.src[start..self.pos].to_string()));
                }
                Some(b'\\') => {
                    self.bump();
                    if self.peek().is_some() {
                        self.bump();
                    }
                }
                Some(_) => self.bump(),
            }
        }
    }

    /// Bare scalars: numbers and identifiers, terminated by whitespace or a
    /// container delimiter.
    fn parse_bare(&mut self) -> Result<Value> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' || b == b']' || b == b'}' {
                break;
            }
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("expected a value"));
        }
        Ok(Value::Scalar(self.src[start..self.pos].to_string()))
    }
}

//! Loose object-literal decoding
//!
//! Decodes the one-level JavaScript object literals found in TypeORM
//! decorator arguments, e.g. `{ name: "CompanyName", nullable: true, length: 60 }`.
//!
//! Accepted grammar:
//!
//! ```text
//! object := '{' [ member { ',' member } [ ','] ] '}'
//! member := key ':' value
//! key    := identifier | string
//! value  := string | number | true | false | null | undefined | array
//! array  := '[' [ value { ',' value } [ ','] ] ']'
//! ```
//!
//! Strings may be single or double quoted. Nested objects are not supported.

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at offset {position}")]
pub struct LiteralError {
    pub position: usize,
    pub message: String,
}

/// Decode an object literal into a JSON object
pub fn decode_object(input: &str) -> Result<Map<String, Value>, LiteralError> {
    let mut parser = LiteralParser::new(input);
    parser.skip_whitespace();
    let object = parser.parse_object()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(object)
}

struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            position: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.bump();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn parse_object(&mut self) -> Result<Map<String, Value>, LiteralError> {
        self.expect('{')?;
        let mut object = Map::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(object);
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            self.expect(':')?;
            self.skip_whitespace();
            let value = self.parse_value()?;
            object.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(object);
                }
                Some(ch) => return Err(self.error(format!("expected ',' or '}}', found '{}'", ch))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string(),
            Some(ch) if is_identifier_start(ch) => Ok(self.parse_identifier().to_string()),
            Some(ch) => Err(self.error(format!("invalid key start '{}'", ch))),
            None => Err(self.error("expected key, found end of input")),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string().map(Value::String),
            Some('[') => self.parse_array(),
            Some(ch) if ch == '-' || ch == '.' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if is_identifier_start(ch) => {
                let start = self.pos;
                match self.parse_identifier() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    other => Err(LiteralError {
                        position: start,
                        message: format!("unsupported value '{}'", other),
                    }),
                }
            }
            Some('{') => Err(self.error("nested objects are not supported")),
            Some(ch) => Err(self.error(format!("unexpected character '{}'", ch))),
            None => Err(self.error("expected value, found end of input")),
        }
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(Value::Array(items)),
                Some(ch) => return Err(self.error(format!("expected ',' or ']', found '{}'", ch))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if is_identifier_part(ch)) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn parse_string(&mut self) -> Result<String, LiteralError> {
        let start = self.pos;
        let quote = match self.bump() {
            Some(ch @ ('"' | '\'')) => ch,
            _ => return Err(self.error("expected string")),
        };

        let mut value = String::new();
        loop {
            match self.bump() {
                Some(ch) if ch == quote => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                Some(ch) => value.push(ch),
                None => break,
            }
        }

        Err(LiteralError {
            position: start,
            message: "unterminated string".to_string(),
        })
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '+' | '.')) {
            self.bump();
        }
        let text = &self.input[start..self.pos];

        if let Ok(integer) = text.parse::<i64>() {
            return Ok(Value::Number(integer.into()));
        }

        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| LiteralError {
                position: start,
                message: format!("invalid number '{}'", text),
            })
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

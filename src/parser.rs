//! Recursive-descent parser.
//!
//! One function per grammar production, each pulling tokens from the
//! [`Scanner`] on demand and building the [`Value`] tree bottom-up. An
//! explicit depth counter bounds recursion so adversarial nesting is
//! reported as [`ParseErrorKind::NestingTooDeep`] instead of exhausting
//! the native call stack.
//!
//! The parser does not recover: the first error stops the parse and is
//! returned with its byte offset.

use crate::error::{LexError, ParseError, ParseErrorKind, ParseResult};
use crate::limits::Limits;
use crate::scanner::{Scanner, TokenKind};
use crate::value::{Number, Value};

/// Recursive-descent parser over a single input buffer.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser for the given input.
    pub fn new(input: &'a str, limits: Limits) -> Self {
        Self {
            scanner: Scanner::new(input),
            limits,
            depth: 0,
        }
    }

    /// Parse exactly one top-level value, consuming the entire input.
    ///
    /// Empty or whitespace-only input is rejected rather than coerced to
    /// `Null`; leftover non-whitespace bytes after the value are rejected
    /// as trailing data.
    pub fn parse_document(&mut self) -> ParseResult<Value> {
        if self.scanner.classify() == TokenKind::EndOfInput {
            return Err(ParseError::new(
                ParseErrorKind::EmptyInput,
                self.scanner.position(),
            ));
        }

        let value = self.parse_value()?;

        match self.scanner.classify() {
            TokenKind::EndOfInput => Ok(value),
            _ => Err(ParseError::new(
                ParseErrorKind::TrailingData,
                self.scanner.position(),
            )),
        }
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> ParseResult<Value> {
        match self.scanner.classify() {
            TokenKind::Null => {
                self.scanner.scan_literal("null")?;
                Ok(Value::Null)
            }
            TokenKind::True => {
                self.scanner.scan_literal("true")?;
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                self.scanner.scan_literal("false")?;
                Ok(Value::Bool(false))
            }
            TokenKind::NumberStart => self.parse_number(),
            TokenKind::StringStart => Ok(Value::String(self.scanner.scan_string()?)),
            TokenKind::ArrayOpen => self.parse_array(),
            TokenKind::ObjectOpen => self.parse_object(),
            TokenKind::EndOfInput => Err(ParseError::new(
                ParseErrorKind::UnexpectedEnd,
                self.scanner.position(),
            )),
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedCharacter,
                self.scanner.position(),
            )),
        }
    }

    /// Parse a number token.
    ///
    /// Strict integer conversion is attempted first; fractional or
    /// exponent forms, and integers out of `i64` range, fall back to
    /// floating point.
    fn parse_number(&mut self) -> ParseResult<Value> {
        let offset = self.scanner.position();
        let lexeme = self.scanner.scan_number()?;
        let number = Number::from_lexeme(lexeme)
            .ok_or(ParseError::lex(LexError::MalformedNumber, offset))?;
        Ok(Value::Number(number))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.scanner.bump(); // `[`

        let mut elements = Vec::new();

        if self.scanner.classify() == TokenKind::ArrayClose {
            self.scanner.bump();
            self.leave();
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);

            match self.scanner.classify() {
                TokenKind::Comma => self.scanner.bump(),
                TokenKind::ArrayClose => {
                    self.scanner.bump();
                    break;
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedCommaOrClose,
                        self.scanner.position(),
                    ))
                }
            }
        }

        self.leave();
        Ok(Value::Array(elements))
    }

    /// Parse a JSON object.
    fn parse_object(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.scanner.bump(); // `{`

        let mut members: Vec<(String, Value)> = Vec::new();

        if self.scanner.classify() == TokenKind::ObjectClose {
            self.scanner.bump();
            self.leave();
            return Ok(Value::Object(members));
        }

        loop {
            if self.scanner.classify() != TokenKind::StringStart {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedStringKey,
                    self.scanner.position(),
                ));
            }
            let key = self.scanner.scan_string()?;

            if self.scanner.classify() != TokenKind::Colon {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedColon,
                    self.scanner.position(),
                ));
            }
            self.scanner.bump();

            let value = self.parse_value()?;

            // Duplicate keys: the last occurrence wins, at the position of
            // the first.
            match members.iter().position(|(k, _)| *k == key) {
                Some(i) => members[i].1 = value,
                None => members.push((key, value)),
            }

            match self.scanner.classify() {
                TokenKind::Comma => self.scanner.bump(),
                TokenKind::ObjectClose => {
                    self.scanner.bump();
                    break;
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedCommaOrClose,
                        self.scanner.position(),
                    ))
                }
            }
        }

        self.leave();
        Ok(Value::Object(members))
    }

    /// Enter a nested container, enforcing the depth cap.
    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep,
                self.scanner.position(),
            ));
        }
        Ok(())
    }

    /// Leave a nested container.
    fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Parse a JSON document with default limits.
pub fn parse(input: &str) -> ParseResult<Value> {
    parse_with_limits(input, Limits::default())
}

/// Parse a JSON document with explicit limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> ParseResult<Value> {
    Parser::new(input, limits).parse_document()
}

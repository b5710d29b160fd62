use alloc::string::String;
use alloc::vec::Vec;

use crate::BindError;
use crate::node::{Node, Number};
use crate::token::{StreamingReader, StreamingWriter, Token};

// -----------------------------------------------------------------------------
// TapeToken

/// One recorded token, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TapeToken {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Name(String),
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    /// A token no tokenizer classification applies to.
    Unknown,
    ObjectComma,
    ArrayComma,
}

impl TapeToken {
    /// The reader-side classification; `None` for separators.
    pub const fn token(&self) -> Option<Token> {
        Some(match self {
            Self::StartObject => Token::StartObject,
            Self::EndObject => Token::EndObject,
            Self::StartArray => Token::StartArray,
            Self::EndArray => Token::EndArray,
            Self::Name(_) => Token::Name,
            Self::String(_) => Token::String,
            Self::Number(_) => Token::Number,
            Self::Bool(_) => Token::Boolean,
            Self::Null => Token::Null,
            Self::Unknown => Token::Unknown,
            Self::ObjectComma | Self::ArrayComma => return None,
        })
    }

    #[inline]
    const fn is_separator(&self) -> bool {
        matches!(self, Self::ObjectComma | Self::ArrayComma)
    }
}

// -----------------------------------------------------------------------------
// TokenTape

/// An in-memory token sequence.
///
/// Nothing checks that the sequence is well formed, so tests can feed the
/// engines exactly the stream they want, broken ones included.
///
/// # Examples
///
/// ```
/// use nb_bind::Binder;
/// use nb_bind::adapter::{TapeReader, TokenTape};
///
/// let tape = TokenTape::new()
///     .start_object()
///     .name("a")
///     .boolean(true)
///     .end_object();
///
/// let value: std::collections::BTreeMap<String, bool> =
///     Binder::new().decode(&mut TapeReader::new(&tape)).unwrap();
/// assert_eq!(value["a"], true);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTape {
    tokens: Vec<TapeToken>,
}

impl TokenTape {
    #[inline]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    #[inline]
    pub fn tokens(&self) -> &[TapeToken] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Appends a raw token.
    #[inline]
    pub fn push(mut self, token: TapeToken) -> Self {
        self.tokens.push(token);
        self
    }

    #[inline]
    pub fn start_object(self) -> Self {
        self.push(TapeToken::StartObject)
    }

    #[inline]
    pub fn end_object(self) -> Self {
        self.push(TapeToken::EndObject)
    }

    #[inline]
    pub fn start_array(self) -> Self {
        self.push(TapeToken::StartArray)
    }

    #[inline]
    pub fn end_array(self) -> Self {
        self.push(TapeToken::EndArray)
    }

    #[inline]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.push(TapeToken::Name(name.into()))
    }

    #[inline]
    pub fn string(self, value: impl Into<String>) -> Self {
        self.push(TapeToken::String(value.into()))
    }

    #[inline]
    pub fn number(self, value: impl Into<Number>) -> Self {
        self.push(TapeToken::Number(value.into()))
    }

    #[inline]
    pub fn boolean(self, value: bool) -> Self {
        self.push(TapeToken::Bool(value))
    }

    #[inline]
    pub fn null(self) -> Self {
        self.push(TapeToken::Null)
    }

    #[inline]
    pub fn unknown(self) -> Self {
        self.push(TapeToken::Unknown)
    }

    /// Appends the tokens of a whole node.
    pub fn node(self, node: &Node) -> Self {
        match node {
            Node::Null => self.null(),
            Node::Bool(v) => self.boolean(*v),
            Node::Number(v) => self.number(*v),
            Node::String(v) => self.string(v.as_str()),
            Node::Object(object) => {
                let mut tape = self.start_object();
                for (key, value) in object {
                    tape = tape.name(key).node(value);
                }
                tape.end_object()
            }
            Node::Array(array) => {
                let mut tape = self.start_array();
                for item in array {
                    tape = tape.node(item);
                }
                tape.end_array()
            }
        }
    }

    /// The same tape with separators removed.
    pub fn without_separators(&self) -> Self {
        Self {
            tokens: self
                .tokens
                .iter()
                .filter(|token| !token.is_separator())
                .cloned()
                .collect(),
        }
    }
}

// -----------------------------------------------------------------------------
// TapeReader

/// Reads a [`TokenTape`]. Separators on the tape are ignored.
#[derive(Debug, Clone)]
pub struct TapeReader<'a> {
    tokens: &'a [TapeToken],
    pos: usize,
}

impl<'a> TapeReader<'a> {
    #[inline]
    pub fn new(tape: &'a TokenTape) -> Self {
        Self {
            tokens: &tape.tokens,
            pos: 0,
        }
    }

    /// Number of tokens consumed so far, separators included.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    fn current(&mut self) -> Option<&'a TapeToken> {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.is_separator() {
                return Some(token);
            }
            self.pos += 1;
        }
        None
    }

    /// Steps over the current token without looking at it.
    pub(crate) fn advance(&mut self) {
        if self.current().is_some() {
            self.pos += 1;
        }
    }

    fn found(&mut self) -> Token {
        self.current()
            .and_then(TapeToken::token)
            .unwrap_or(Token::EndOfStream)
    }

    fn expect(&mut self, expected: TapeToken) -> Result<(), BindError> {
        match self.current() {
            Some(token) if *token == expected => {
                self.pos += 1;
                Ok(())
            }
            _ => {
                let name = expected.token().map_or("a token", Token::as_str);
                Err(BindError::mismatch(name, self.found()))
            }
        }
    }
}

impl StreamingReader for TapeReader<'_> {
    #[inline]
    fn peek(&mut self) -> Result<Token, BindError> {
        Ok(self.found())
    }

    fn start_object(&mut self) -> Result<(), BindError> {
        self.expect(TapeToken::StartObject)
    }

    fn end_object(&mut self) -> Result<(), BindError> {
        self.expect(TapeToken::EndObject)
    }

    fn start_array(&mut self) -> Result<(), BindError> {
        self.expect(TapeToken::StartArray)
    }

    fn end_array(&mut self) -> Result<(), BindError> {
        self.expect(TapeToken::EndArray)
    }

    fn next_name(&mut self) -> Result<String, BindError> {
        match self.current() {
            Some(TapeToken::Name(name)) => {
                self.pos += 1;
                Ok(name.clone())
            }
            _ => Err(BindError::mismatch(Token::Name.as_str(), self.found())),
        }
    }

    fn next_string(&mut self) -> Result<String, BindError> {
        match self.current() {
            Some(TapeToken::String(value)) => {
                self.pos += 1;
                Ok(value.clone())
            }
            _ => Err(BindError::mismatch(Token::String.as_str(), self.found())),
        }
    }

    fn next_number(&mut self) -> Result<Number, BindError> {
        match self.current() {
            Some(TapeToken::Number(value)) => {
                self.pos += 1;
                Ok(*value)
            }
            _ => Err(BindError::mismatch(Token::Number.as_str(), self.found())),
        }
    }

    fn next_bool(&mut self) -> Result<bool, BindError> {
        match self.current() {
            Some(TapeToken::Bool(value)) => {
                self.pos += 1;
                Ok(*value)
            }
            _ => Err(BindError::mismatch(Token::Boolean.as_str(), self.found())),
        }
    }

    fn next_null(&mut self) -> Result<(), BindError> {
        self.expect(TapeToken::Null)
    }
}

// -----------------------------------------------------------------------------
// TapeWriter

/// Records every write call, separators included, onto a [`TokenTape`].
#[derive(Debug, Default)]
pub struct TapeWriter {
    tape: TokenTape,
}

impl TapeWriter {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tape: TokenTape::new(),
        }
    }

    #[inline]
    pub fn tape(&self) -> &TokenTape {
        &self.tape
    }

    #[inline]
    pub fn into_tape(self) -> TokenTape {
        self.tape
    }

    #[inline]
    fn record(&mut self, token: TapeToken) -> Result<(), BindError> {
        self.tape.tokens.push(token);
        Ok(())
    }
}

impl StreamingWriter for TapeWriter {
    fn start_object(&mut self) -> Result<(), BindError> {
        self.record(TapeToken::StartObject)
    }

    fn end_object(&mut self) -> Result<(), BindError> {
        self.record(TapeToken::EndObject)
    }

    fn start_array(&mut self) -> Result<(), BindError> {
        self.record(TapeToken::StartArray)
    }

    fn end_array(&mut self) -> Result<(), BindError> {
        self.record(TapeToken::EndArray)
    }

    fn write_name(&mut self, name: &str) -> Result<(), BindError> {
        self.record(TapeToken::Name(name.into()))
    }

    fn write_string(&mut self, value: &str) -> Result<(), BindError> {
        self.record(TapeToken::String(value.into()))
    }

    fn write_number(&mut self, value: Number) -> Result<(), BindError> {
        self.record(TapeToken::Number(value))
    }

    fn write_bool(&mut self, value: bool) -> Result<(), BindError> {
        self.record(TapeToken::Bool(value))
    }

    fn write_null(&mut self) -> Result<(), BindError> {
        self.record(TapeToken::Null)
    }

    fn write_object_comma(&mut self) -> Result<(), BindError> {
        self.record(TapeToken::ObjectComma)
    }

    fn write_array_comma(&mut self) -> Result<(), BindError> {
        self.record(TapeToken::ArrayComma)
    }
}

#[cfg(test)]
mod tests {
    use super::{TapeReader, TapeToken, TapeWriter, TokenTape};
    use crate::BindError;
    use crate::token::{StreamingReader, StreamingWriter, Token};

    #[test]
    fn peek_does_not_consume() {
        let tape = TokenTape::new().string("x");
        let mut reader = TapeReader::new(&tape);
        assert_eq!(reader.peek().unwrap(), Token::String);
        assert_eq!(reader.peek().unwrap(), Token::String);
        assert_eq!(reader.next_string().unwrap(), "x");
        assert_eq!(reader.peek().unwrap(), Token::EndOfStream);
    }

    #[test]
    fn wrong_extractor_is_mismatch() {
        let tape = TokenTape::new().number(1);
        let mut reader = TapeReader::new(&tape);
        let err = reader.next_bool().unwrap_err();
        assert!(matches!(
            err,
            BindError::TokenMismatch { expected: "BOOLEAN", found: Token::Number }
        ));
        assert_eq!(reader.next_i32().unwrap(), 1);
    }

    #[test]
    fn default_skip_walks_nested_values() {
        let tape = TokenTape::new()
            .start_array()
            .start_object()
            .name("a")
            .start_array()
            .null()
            .end_array()
            .end_object()
            .string("after")
            .end_array();
        let mut reader = TapeReader::new(&tape);
        reader.start_array().unwrap();
        reader.next_skip().unwrap();
        assert_eq!(reader.next_string().unwrap(), "after");
        reader.end_array().unwrap();
    }

    #[test]
    fn reader_ignores_recorded_separators() {
        let mut writer = TapeWriter::new();
        writer.start_array().unwrap();
        writer.write_bool(true).unwrap();
        writer.write_array_comma().unwrap();
        writer.write_null().unwrap();
        writer.end_array().unwrap();
        let tape = writer.into_tape();
        assert_eq!(tape.tokens()[2], TapeToken::ArrayComma);
        assert_eq!(tape.without_separators().len(), 4);

        let mut reader = TapeReader::new(&tape);
        reader.start_array().unwrap();
        assert!(reader.next_bool().unwrap());
        reader.next_null().unwrap();
        reader.end_array().unwrap();
    }
}

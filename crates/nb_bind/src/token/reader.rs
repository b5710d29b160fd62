use alloc::format;
use alloc::string::String;

use crate::BindError;
use crate::node::Number;
use crate::token::Token;

// -----------------------------------------------------------------------------
// StreamingReader

macro_rules! narrow_fn {
    ($($(#[$meta:meta])* $name:ident => $ty:ident, $cast:ident;)*) => {
        $(
            $(#[$meta])*
            fn $name(&mut self) -> Result<$ty, BindError> {
                let number = self.next_number()?;
                number.$cast().ok_or_else(|| {
                    BindError::invalid(
                        stringify!($ty),
                        format!("{number} does not fit in `{}`", stringify!($ty)),
                    )
                })
            }
        )*
    };
}

/// A pull-style token source.
///
/// Adapters implement the structural consumers and the five typed extractors.
/// Narrowed numeric extractors and [`next_skip`] have default implementations
/// which adapters may override with cheaper ones.
///
/// Every consuming call must fail with [`BindError::TokenMismatch`] when the
/// current token does not fit, and leave [`peek`] reflecting the next token
/// on success.
///
/// [`peek`]: StreamingReader::peek
/// [`next_skip`]: StreamingReader::next_skip
pub trait StreamingReader {
    /// Classifies the current token without consuming it.
    ///
    /// Repeated calls return the same token.
    fn peek(&mut self) -> Result<Token, BindError>;

    fn start_object(&mut self) -> Result<(), BindError>;

    fn end_object(&mut self) -> Result<(), BindError>;

    fn start_array(&mut self) -> Result<(), BindError>;

    fn end_array(&mut self) -> Result<(), BindError>;

    /// Consumes a field name inside an object.
    fn next_name(&mut self) -> Result<String, BindError>;

    fn next_string(&mut self) -> Result<String, BindError>;

    /// Consumes a number in its widest representation.
    fn next_number(&mut self) -> Result<Number, BindError>;

    fn next_bool(&mut self) -> Result<bool, BindError>;

    fn next_null(&mut self) -> Result<(), BindError>;

    /// Returns `true` while the current object or array has more members.
    #[inline]
    fn has_next(&mut self) -> Result<bool, BindError> {
        Ok(!matches!(
            self.peek()?,
            Token::EndObject | Token::EndArray | Token::EndOfStream
        ))
    }

    narrow_fn! {
        next_i8 => i8, as_i8;
        next_i16 => i16, as_i16;
        /// Consumes a number that must fit in 32 bits.
        next_i32 => i32, as_i32;
        next_i64 => i64, as_i64;
        next_isize => isize, as_isize;
        next_u8 => u8, as_u8;
        next_u16 => u16, as_u16;
        next_u32 => u32, as_u32;
        next_u64 => u64, as_u64;
        next_usize => usize, as_usize;
        next_f32 => f32, as_f32;
        next_f64 => f64, as_f64;
    }

    /// Discards the current value, including any nested structure.
    ///
    /// The default walks the structure token by token without building
    /// values, keeping only a depth counter; adapters holding a materialized
    /// tree can jump over it.
    fn next_skip(&mut self) -> Result<(), BindError> {
        let mut depth = 0_usize;
        loop {
            match self.peek()? {
                Token::StartObject => {
                    self.start_object()?;
                    depth += 1;
                }
                Token::StartArray => {
                    self.start_array()?;
                    depth += 1;
                }
                Token::EndObject if depth > 0 => {
                    self.end_object()?;
                    depth -= 1;
                }
                Token::EndArray if depth > 0 => {
                    self.end_array()?;
                    depth -= 1;
                }
                Token::Name if depth > 0 => {
                    self.next_name()?;
                    continue;
                }
                Token::String => {
                    self.next_string()?;
                }
                Token::Number => {
                    self.next_number()?;
                }
                Token::Boolean => {
                    self.next_bool()?;
                }
                Token::Null => self.next_null()?,
                found => return Err(BindError::mismatch("a value", found)),
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BindError;
    use crate::adapter::{TapeReader, TokenTape};
    use crate::token::{StreamingReader, Token};

    #[test]
    fn skip_stops_after_one_value() {
        let tape = TokenTape::new()
            .start_array()
            .start_object()
            .name("a")
            .start_array()
            .number(1)
            .null()
            .end_array()
            .name("b")
            .boolean(true)
            .end_object()
            .string("after")
            .end_array();
        let mut reader = TapeReader::new(&tape);
        reader.start_array().unwrap();
        reader.next_skip().unwrap();
        assert_eq!(reader.peek().unwrap(), Token::String);
        reader.next_skip().unwrap();
        reader.end_array().unwrap();
        assert_eq!(reader.peek().unwrap(), Token::EndOfStream);
    }

    #[test]
    fn skip_handles_deep_nesting() {
        const DEPTH: usize = 200_000;
        let mut tape = TokenTape::new();
        for _ in 0..DEPTH {
            tape = tape.start_array();
        }
        for _ in 0..DEPTH {
            tape = tape.end_array();
        }
        let mut reader = TapeReader::new(&tape);
        reader.next_skip().unwrap();
        assert_eq!(reader.peek().unwrap(), Token::EndOfStream);
    }

    #[test]
    fn skip_rejects_closing_token() {
        let tape = TokenTape::new().start_array().end_array();
        let mut reader = TapeReader::new(&tape);
        reader.start_array().unwrap();
        let err = reader.next_skip().unwrap_err();
        assert!(matches!(err, BindError::TokenMismatch { .. }));
    }
}

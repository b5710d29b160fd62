//! The token-stream contract between tokenizer adapters and the engines.
//!
//! A [`StreamingReader`] is a pull parser with one current [`Token`]. [`peek`]
//! classifies it without consuming; every other call consumes exactly one
//! logical unit. A [`StreamingWriter`] is the mirror image; separators are
//! requested explicitly by the encoder, so writers with different comma
//! conventions share one traversal.
//!
//! [`peek`]: StreamingReader::peek

// -----------------------------------------------------------------------------
// Modules

mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::StreamingReader;
pub use writer::StreamingWriter;

// -----------------------------------------------------------------------------
// Token

use core::fmt;

/// Classification of the current lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Name,
    String,
    Number,
    Boolean,
    Null,
    EndOfStream,
    Unknown,
}

impl Token {
    /// Returns `true` for tokens that start a value.
    #[inline]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::StartObject
                | Self::StartArray
                | Self::String
                | Self::Number
                | Self::Boolean
                | Self::Null
        )
    }

    /// Returns `true` for `String`, `Number`, `Boolean` and `Null`.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Boolean | Self::Null)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartObject => "START_OBJECT",
            Self::EndObject => "END_OBJECT",
            Self::StartArray => "START_ARRAY",
            Self::EndArray => "END_ARRAY",
            Self::Name => "NAME",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::EndOfStream => "END_OF_STREAM",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Token {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

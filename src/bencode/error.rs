use thiserror::Error;

/// Syntax errors raised while decoding bencoded data.
///
/// Every variant records the byte offset at which the problem was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("malformed integer at offset {offset}")]
    MalformedInteger { offset: usize },

    #[error("malformed string length at offset {offset}")]
    MalformedLength { offset: usize },

    #[error("string at offset {offset} declares {declared} bytes but only {available} remain")]
    TruncatedString {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("unterminated list starting at offset {offset}")]
    UnterminatedList { offset: usize },

    #[error("unterminated dictionary starting at offset {offset}")]
    UnterminatedMap { offset: usize },

    #[error("dictionary key at offset {offset} is not a byte string")]
    NonStringKey { offset: usize },

    #[error("dictionary key at offset {offset} is not greater than the previous key")]
    UnsortedOrDuplicateKey { offset: usize },

    #[error("unknown type tag 0x{tag:02x} at offset {offset}")]
    UnknownTag { offset: usize, tag: u8 },

    #[error("trailing data after value at offset {offset}")]
    TrailingData { offset: usize },

    #[error("nesting too deep at offset {offset}")]
    NestingTooDeep { offset: usize },
}

impl DecodeError {
    /// Byte offset at which the error was detected
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::UnexpectedEof { offset }
            | DecodeError::MalformedInteger { offset }
            | DecodeError::MalformedLength { offset }
            | DecodeError::TruncatedString { offset, .. }
            | DecodeError::UnterminatedList { offset }
            | DecodeError::UnterminatedMap { offset }
            | DecodeError::NonStringKey { offset }
            | DecodeError::UnsortedOrDuplicateKey { offset }
            | DecodeError::UnknownTag { offset, .. }
            | DecodeError::TrailingData { offset }
            | DecodeError::NestingTooDeep { offset } => offset,
        }
    }
}

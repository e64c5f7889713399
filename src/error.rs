use crate::bencode::DecodeError;
use thiserror::Error;

/// A decoded value was well-formed but did not have the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("field '{0}' has the wrong type")]
    WrongType(String),

    #[error("field '{0}' is out of range")]
    OutOfRange(String),

    #[error("pieces length {0} is not a multiple of 20")]
    InvalidPieceTableLength(usize),

    #[error("peers length {0} is not a multiple of 6")]
    InvalidPeerTableLength(usize),
}

#[derive(Error, Debug)]
pub enum BittorrentError {
    #[error("Bencode syntax error: {0}")]
    Syntax(#[from] DecodeError),

    #[error("Invalid structure: {0}")]
    Semantic(#[from] SemanticError),

    #[error("Tracker reported failure: {0}")]
    TrackerFailureReason(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tracker returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("URL parse error: {0}")]
    UrlParseError(String),
}

impl From<url::ParseError> for BittorrentError {
    fn from(err: url::ParseError) -> Self {
        BittorrentError::UrlParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BittorrentError>;

// src/error.rs
//! Error types for the GPS fix reader

use std::fmt;

pub type Result<T> = std::result::Result<T, GpsError>;

#[derive(Debug)]
pub enum GpsError {
    /// Sentence has no `*` checksum separator
    MalformedSentence(String),
    /// Declared checksum disagrees with the computed one
    ChecksumMismatch { expected: String, computed: u8 },
    /// Field count or numeric conversion failure in a checksummed sentence
    Parse(String),
    /// Raw line is not valid UTF-8
    Decode(std::str::Utf8Error),
    /// The transport read itself failed
    Transport(std::io::Error),
    Io(std::io::Error),
    Serial(tokio_serial::Error),
    Json(serde_json::Error),
    Other(String),
}

impl GpsError {
    /// Sentence-level errors are absorbed by the ingest loop; everything
    /// else ends it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GpsError::MalformedSentence(_)
                | GpsError::ChecksumMismatch { .. }
                | GpsError::Parse(_)
                | GpsError::Decode(_)
        )
    }
}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsError::MalformedSentence(s) => write!(f, "Malformed sentence: {}", s),
            GpsError::ChecksumMismatch { expected, computed } => write!(
                f,
                "Checksum mismatch: declared {}, computed {:02X}",
                expected, computed
            ),
            GpsError::Parse(msg) => write!(f, "Parse error: {}", msg),
            GpsError::Decode(e) => write!(f, "Decode error: {}", e),
            GpsError::Transport(e) => write!(f, "Transport fault: {}", e),
            GpsError::Io(e) => write!(f, "IO error: {}", e),
            GpsError::Serial(e) => write!(f, "Serial error: {}", e),
            GpsError::Json(e) => write!(f, "JSON error: {}", e),
            GpsError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for GpsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpsError::Decode(e) => Some(e),
            GpsError::Transport(e) | GpsError::Io(e) => Some(e),
            GpsError::Serial(e) => Some(e),
            GpsError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GpsError {
    fn from(error: std::io::Error) -> Self {
        GpsError::Io(error)
    }
}

impl From<std::str::Utf8Error> for GpsError {
    fn from(error: std::str::Utf8Error) -> Self {
        GpsError::Decode(error)
    }
}

impl From<tokio_serial::Error> for GpsError {
    fn from(error: tokio_serial::Error) -> Self {
        GpsError::Serial(error)
    }
}

impl From<serde_json::Error> for GpsError {
    fn from(error: serde_json::Error) -> Self {
        GpsError::Json(error)
    }
}

impl From<anyhow::Error> for GpsError {
    fn from(error: anyhow::Error) -> Self {
        GpsError::Other(error.to_string())
    }
}

//! # Load Error Types Module
//!
//! Error types raised while reading an additive reference table.
//! Callers are expected to treat any of these as "no reference data available".

/// Errors that can occur while loading a reference table
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The source could not be opened
    Open(String),
    /// The source was opened but reading failed part-way
    Read(String),
    /// The source is not valid UTF-8
    Encoding(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Open(msg) => write!(f, "[TABLE_OPEN] Reference table could not be opened: {}", msg),
            LoadError::Read(msg) => write!(f, "[TABLE_READ] Reference table could not be read: {}", msg),
            LoadError::Encoding(msg) => write!(f, "[TABLE_ENCODING] Reference table is not valid UTF-8: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl LoadError {
    /// Classify an I/O error raised while reading (not opening) a source
    pub fn from_read_error(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::InvalidData => LoadError::Encoding(err.to_string()),
            _ => LoadError::Read(err.to_string()),
        }
    }
}

//! Error types for vcollide.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while parsing documents or extracting geometry.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The document text is not structurally valid KV3.
    #[error("malformed document at {line}:{column}: {message}")]
    MalformedDocument {
        /// 1-based line of the offending byte.
        line: usize,
        /// 1-based column of the offending byte.
        column: usize,
        /// Description of what was expected.
        message: String,
    },

    /// A packed blob contains a character that is neither a hex digit nor
    /// whitespace.
    #[error("invalid character {found:?} at offset {offset} in packed blob")]
    InvalidHexDigit {
        /// The offending character.
        found: char,
        /// Byte offset within the blob text.
        offset: usize,
    },

    /// A packed blob ends in the middle of a two-digit byte token.
    #[error("packed blob ends with an unpaired hex digit")]
    UnpairedHexDigit,

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading triangles from a `.tri` file.
    #[error("failed to load triangles from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

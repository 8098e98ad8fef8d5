//! Decoding of hex-encoded packed arrays.
//!
//! Physics documents store typed arrays (vertex positions, half-edge
//! records, triangle indices) as byte-array leaves: two hex digits per byte
//! separated by single spaces, with a trailing separator after the final
//! byte. This module decodes that text into owned element vectors.
//!
//! # Policy
//!
//! - Whitespace between byte tokens is ignored, including newlines from
//!   wrapped blobs.
//! - Any other non-hex character is a reported error for the blob, never a
//!   garbage byte. Callers skip the owning entry and keep going.
//! - A trailing partial element (fewer than `size_of::<T>()` bytes left
//!   over) is dropped; the source encoder pads arrays, so a partial tail
//!   carries no value.
//!
//! # Example
//!
//! ```
//! use vcollide::blob::decode_blob;
//!
//! let floats: Vec<f32> = decode_blob("00 00 80 3f ").unwrap();
//! assert_eq!(floats, vec![1.0]);
//!
//! let empty: Vec<f32> = decode_blob("").unwrap();
//! assert!(empty.is_empty());
//! ```

use crate::error::{ExtractError, Result};

/// An element type that can be reconstructed from packed little-endian bytes.
///
/// Implemented for the closed set of primitives the document format packs:
/// `u8`, `i32`, and `f32`.
pub trait BlobElement: Sized {
    /// Encoded width of one element in bytes.
    const WIDTH: usize;

    /// Reconstruct one element from exactly [`WIDTH`](Self::WIDTH) bytes.
    fn from_le_bytes(bytes: &[u8]) -> Self;
}

impl BlobElement for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn from_le_bytes(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl BlobElement for i32 {
    const WIDTH: usize = 4;

    #[inline]
    fn from_le_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        i32::from_le_bytes(buf)
    }
}

impl BlobElement for f32 {
    const WIDTH: usize = 4;

    #[inline]
    fn from_le_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        f32::from_le_bytes(buf)
    }
}

/// Decode a hex-pair blob into a vector of `T`.
///
/// Element count is `floor(decoded_byte_count / size_of::<T>())`; empty
/// input yields an empty vector. Pure function over its input.
pub fn decode_blob<T: BlobElement>(text: &str) -> Result<Vec<T>> {
    let bytes = decode_hex(text)?;
    Ok(bytes.chunks_exact(T::WIDTH).map(T::from_le_bytes).collect())
}

/// Decode hex-pair text into raw bytes, ignoring whitespace.
fn decode_hex(text: &str) -> Result<Vec<u8>> {
    // 3 encoded characters per byte in the common case.
    let mut bytes = Vec::with_capacity(text.len() / 3 + 1);
    let mut pending: Option<u8> = None;

    for (offset, ch) in text.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let digit = ch
            .to_digit(16)
            .ok_or(ExtractError::InvalidHexDigit { found: ch, offset })? as u8;
        pending = match pending {
            None => Some(digit),
            Some(hi) => {
                bytes.push((hi << 4) | digit);
                None
            }
        };
    }

    if pending.is_some() {
        return Err(ExtractError::UnpairedHexDigit);
    }
    Ok(bytes)
}

//! Triangle file I/O.
//!
//! The extraction output is the `.tri` format: a headerless flat sequence
//! of 36-byte triangle records. See [`tri`] for the reader and writer.

pub mod tri;

pub use tri::{load, save};

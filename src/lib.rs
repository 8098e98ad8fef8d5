//! # vcollide
//!
//! Extraction of collision geometry from Source 2 physics-definition
//! documents (`.vphys`) into flat binary triangle dumps (`.tri`).
//!
//! A physics document is a KV3 property tree whose leaves may be ordinary
//! scalars or hex-encoded packed arrays (vertex positions, half-edge
//! records, face indices, triangle indices). The pipeline:
//!
//! 1. Parse the document into a path-queryable store ([`kv3`])
//! 2. Decode packed blobs into typed element vectors ([`blob`])
//! 3. Resolve which collision-attribute slots are the `"default"` group
//!    and filter shapes by them ([`collision`])
//! 4. Reconstruct triangles — hulls by bounded half-edge face-loop walking
//!    with fan triangulation, meshes from flat index triples ([`collision`])
//! 5. Accumulate per document and serialize ([`extract`], [`io`])
//!
//! Every index decoded from a document is treated as hostile: all lookups
//! are bounds checked, malformed entries are skipped at the smallest
//! possible granularity, and skips surface as counters in the per-document
//! [`DocumentReport`](extract::DocumentReport).
//!
//! ## Quick Start
//!
//! ```
//! use vcollide::prelude::*;
//!
//! let document = r#"
//! {
//!     m_collisionAttributes =
//!     [
//!         { m_CollisionGroupString = "default" },
//!     ]
//!     m_parts =
//!     [
//!         {
//!             m_rnShape =
//!             {
//!                 m_hulls = [ ]
//!                 m_meshes =
//!                 [
//!                     {
//!                         m_nCollisionAttributeIndex = 0
//!                         m_Mesh =
//!                         {
//!                             m_Triangles = #[ 00 00 00 00 01 00 00 00 02 00 00 00 ]
//!                             m_Vertices = #[ 00 00 00 00 00 00 00 00 00 00 00 00
//!                                             00 00 80 3F 00 00 00 00 00 00 00 00
//!                                             00 00 00 00 00 00 80 3F 00 00 00 00 ]
//!                         }
//!                     },
//!                 ]
//!             }
//!         },
//!     ]
//! }"#;
//!
//! let report = extract_from_str(document).unwrap();
//! assert_eq!(report.triangles.len(), 1);
//! assert_eq!(report.meshes_extracted, 1);
//! ```
//!
//! Processing is pure and per-document: there is no shared state, so an
//! embedding driver may extract many documents in parallel.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blob;
pub mod collision;
pub mod error;
pub mod extract;
pub mod geom;
pub mod io;
pub mod kv3;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use vcollide::prelude::*;
/// ```
pub mod prelude {
    pub use crate::blob::decode_blob;
    pub use crate::collision::{
        resolve_default_indices, triangulate_hull, triangulate_mesh, HalfEdgeRecord, WalkStats,
    };
    pub use crate::error::{ExtractError, Result};
    pub use crate::extract::{extract_document, extract_from_str, DocumentReport};
    pub use crate::geom::Triangle;
    pub use crate::kv3::Document;
}

// Re-export nalgebra types for convenience
pub use nalgebra;

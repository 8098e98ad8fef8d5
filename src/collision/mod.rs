//! Collision shape reconstruction.
//!
//! A physics document describes two kinds of collision shapes, both gated by
//! a collision-attribute slot:
//!
//! - **Hulls**: convex shapes stored as a half-edge mesh (vertex positions,
//!   per-face start half-edges, packed half-edge records). Reconstructed by
//!   [`triangulate_hull`] via bounded face-loop walking with fan
//!   triangulation.
//! - **Meshes**: arbitrary shapes stored as a flat indexed triangle list.
//!   Reconstructed by [`triangulate_mesh`].
//!
//! Only shapes whose attribute slot resolves to the `"default"` collision
//! group ([`resolve_default_indices`]) are extracted.
//!
//! All reconstruction is defensive: indices decoded from the document carry
//! no bounds guarantee, so every lookup is checked and malformed entries are
//! skipped at the smallest possible granularity, surfaced through counters
//! rather than errors.

mod attributes;
mod hull;
mod mesh;

pub use attributes::{clean_label, resolve_default_indices, DEFAULT_GROUP};
pub use hull::{
    records_from_bytes, triangulate_hull, HalfEdgeRecord, WalkStats, MAX_FACE_WALK,
};
pub use mesh::triangulate_mesh;

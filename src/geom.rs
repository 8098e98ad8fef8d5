//! Geometry value types shared across the pipeline.
//!
//! The extraction output is a flat stream of 36-byte triangle records, so
//! [`Triangle`] is laid out to match the on-disk format exactly: three
//! [`Point3<f32>`] positions, nine little-endian IEEE-754 singles in total,
//! with no padding. A `&[Triangle]` therefore casts directly to the output
//! byte stream via [`bytemuck`].

use bytemuck::{Pod, Zeroable};
use nalgebra::Point3;

/// A triangle in the winding order produced by the source geometry.
///
/// Plain value type with no identity; positions are single precision to
/// match both the source blobs and the output records.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3<f32>,
    /// Second vertex.
    pub b: Point3<f32>,
    /// Third vertex.
    pub c: Point3<f32>,
}

impl Triangle {
    /// Size of one encoded triangle record in bytes.
    pub const ENCODED_SIZE: usize = std::mem::size_of::<Triangle>();

    /// Create a triangle from three positions.
    #[inline]
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self { a, b, c }
    }
}

//! Indexed mesh triangulation.

use nalgebra::Point3;

use crate::geom::Triangle;

/// Reconstruct triangles from a flat index list.
///
/// `indices` is interpreted as consecutive triples of vertex-array offsets.
/// A triple is emitted only when all three indices are non-negative and
/// within `vertices` bounds; the number of rejected triples is returned
/// alongside the triangles. A trailing partial triple is left unconsumed.
pub fn triangulate_mesh(vertices: &[Point3<f32>], indices: &[i32]) -> (Vec<Triangle>, usize) {
    let mut triangles = Vec::with_capacity(indices.len() / 3);
    let mut rejected = 0;

    for triple in indices.chunks_exact(3) {
        let resolve = |index: i32| usize::try_from(index).ok().and_then(|i| vertices.get(i));
        match (resolve(triple[0]), resolve(triple[1]), resolve(triple[2])) {
            (Some(&a), Some(&b), Some(&c)) => triangles.push(Triangle::new(a, b, c)),
            _ => rejected += 1,
        }
    }

    (triangles, rejected)
}

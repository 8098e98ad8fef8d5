//! Hull triangulation via half-edge face loops.
//!
//! A convex hull arrives as three decoded arrays: vertex positions, one
//! start half-edge index per face, and packed half-edge records. Each face
//! is reconstructed by walking its loop of `next` pointers from the start
//! half-edge and emitting a triangle fan anchored at the start vertex — a
//! valid triangulation because hull faces are convex and planar.
//!
//! None of the decoded indices carry any bounds guarantee, so every lookup
//! is checked: an invalid face start skips the face, an invalid `next`
//! abandons the remainder of that face's loop (triangles already emitted
//! are kept), and a loop that fails to close within [`MAX_FACE_WALK`] steps
//! is cut off. All three outcomes are counted in [`WalkStats`] instead of
//! being silently dropped.

use nalgebra::Point3;

use crate::geom::Triangle;

/// Safety bound on face-loop walking.
///
/// Malformed cyclic data may never return to the start half-edge; the walk
/// stops after this many steps. Faces with legitimately more edges than
/// this are truncated, not rejected.
pub const MAX_FACE_WALK: usize = 100;

/// One packed half-edge record, in the document's fixed 4-byte layout.
///
/// `twin` and `face` are not consulted by the traversal but are part of the
/// record layout and are preserved as decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfEdgeRecord {
    /// Index of the following half-edge in this face's loop.
    pub next: u8,
    /// Index of the opposing half-edge.
    pub twin: u8,
    /// Index of the vertex this half-edge starts from.
    pub origin: u8,
    /// Index of the owning face.
    pub face: u8,
}

/// Decode packed half-edge records from a raw byte buffer.
///
/// Records are consecutive 4-byte groups; a trailing partial group is
/// dropped.
pub fn records_from_bytes(raw: &[u8]) -> Vec<HalfEdgeRecord> {
    raw.chunks_exact(4)
        .map(|chunk| HalfEdgeRecord {
            next: chunk[0],
            twin: chunk[1],
            origin: chunk[2],
            face: chunk[3],
        })
        .collect()
}

/// Per-hull accounting of defensive skips during face-loop walking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Faces whose start half-edge index was out of range.
    pub faces_skipped: usize,
    /// Walks abandoned mid-loop on an out-of-range half-edge index.
    pub walks_abandoned: usize,
    /// Walks cut off by [`MAX_FACE_WALK`] before the loop closed.
    pub walks_truncated: usize,
}

impl std::ops::AddAssign for WalkStats {
    fn add_assign(&mut self, other: WalkStats) {
        self.faces_skipped += other.faces_skipped;
        self.walks_abandoned += other.walks_abandoned;
        self.walks_truncated += other.walks_truncated;
    }
}

/// Reconstruct the triangle faces of one convex hull.
///
/// For each face start in `faces`, walks the half-edge loop and emits a fan
/// of triangles anchored at the start half-edge's origin vertex. A triangle
/// is only emitted when all three origin indices are within `vertices`
/// bounds. Never indexes out of bounds and always terminates, for any
/// input.
pub fn triangulate_hull(
    vertices: &[Point3<f32>],
    faces: &[u8],
    edges: &[HalfEdgeRecord],
) -> (Vec<Triangle>, WalkStats) {
    let mut triangles = Vec::new();
    let mut stats = WalkStats::default();

    for &start in faces {
        let start = start as usize;
        let Some(anchor) = edges.get(start) else {
            stats.faces_skipped += 1;
            continue;
        };

        let mut edge = anchor.next as usize;
        let mut steps = 0;
        while edge != start && steps < MAX_FACE_WALK {
            let Some(current) = edges.get(edge) else {
                stats.walks_abandoned += 1;
                break;
            };
            let next = current.next as usize;
            if next == start {
                // The fan wedge closing back onto the anchor would repeat
                // the anchor vertex; the face is complete.
                break;
            }
            let Some(following) = edges.get(next) else {
                stats.walks_abandoned += 1;
                break;
            };

            if let (Some(&a), Some(&b), Some(&c)) = (
                vertices.get(anchor.origin as usize),
                vertices.get(current.origin as usize),
                vertices.get(following.origin as usize),
            ) {
                triangles.push(Triangle::new(a, b, c));
            }

            edge = next;
            steps += 1;
        }

        if steps >= MAX_FACE_WALK && edge != start {
            stats.walks_truncated += 1;
        }
    }

    (triangles, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(next: u8, origin: u8) -> HalfEdgeRecord {
        HalfEdgeRecord {
            next,
            twin: 0,
            origin,
            face: 0,
        }
    }

    /// A closed loop of `n` half-edges with origin `i` for edge `i`.
    fn ring(n: u8) -> Vec<HalfEdgeRecord> {
        (0..n).map(|i| record((i + 1) % n, i)).collect()
    }

    fn unit_square() -> Vec<Point3<f32>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_square_face_fans_into_two_triangles() {
        let vertices = unit_square();
        let (triangles, stats) = triangulate_hull(&vertices, &[0], &ring(4));

        assert_eq!(triangles.len(), 2);
        assert_eq!(stats, WalkStats::default());

        // Fan anchored at vertex 0.
        assert_eq!(triangles[0].a, vertices[0]);
        assert_eq!(triangles[0].b, vertices[1]);
        assert_eq!(triangles[0].c, vertices[2]);
        assert_eq!(triangles[1].a, vertices[0]);
        assert_eq!(triangles[1].b, vertices[2]);
        assert_eq!(triangles[1].c, vertices[3]);
    }

    #[test]
    fn test_triangle_face() {
        let vertices = unit_square();
        let (triangles, _) = triangulate_hull(&vertices, &[0], &ring(3));
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_start_out_of_range_skips_face() {
        let vertices = unit_square();
        let (triangles, stats) = triangulate_hull(&vertices, &[9], &ring(4));
        assert!(triangles.is_empty());
        assert_eq!(stats.faces_skipped, 1);
    }

    #[test]
    fn test_broken_next_abandons_walk() {
        let vertices = unit_square();
        // Edge 1's next points outside the edge array; the walk stops
        // before the first wedge is emitted.
        let edges = vec![record(1, 0), record(200, 1), record(3, 2), record(0, 3)];
        let (triangles, stats) = triangulate_hull(&vertices, &[0], &edges);
        assert!(triangles.is_empty());
        assert_eq!(stats.walks_abandoned, 1);
    }

    #[test]
    fn test_origin_out_of_range_drops_triangle_only() {
        // Origins valid except edge 2's; wedges touching it are dropped
        // but the rest of the fan survives.
        let vertices = unit_square();
        let edges = vec![
            record(1, 0),
            record(2, 1),
            record(3, 99),
            record(4, 2),
            record(0, 3),
        ];
        let (triangles, stats) = triangulate_hull(&vertices, &[0], &edges);
        assert_eq!(triangles.len(), 1);
        assert_eq!(stats, WalkStats::default());
    }

    #[test]
    fn test_never_closing_loop_is_truncated() {
        let vertices = unit_square();
        // Edge 1 points to itself; the loop never returns to the start.
        let edges = vec![record(1, 0), record(1, 1)];
        let (triangles, stats) = triangulate_hull(&vertices, &[0], &edges);
        assert_eq!(stats.walks_truncated, 1);
        // Each step emits the same wedge, up to the bound.
        assert_eq!(triangles.len(), MAX_FACE_WALK);
    }

    #[test]
    fn test_adversarial_input_terminates_in_bounds() {
        // Pseudo-random faces/edges; nothing to assert beyond "no panic".
        let vertices = unit_square();
        let mut state: u32 = 0x9e37;
        let mut byte = || {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            (state >> 24) as u8
        };
        let faces: Vec<u8> = (0..64).map(|_| byte()).collect();
        let edge_bytes: Vec<u8> = (0..256).map(|_| byte()).collect();
        let edges = records_from_bytes(&edge_bytes);
        let _ = triangulate_hull(&vertices, &faces, &edges);
    }

    #[test]
    fn test_records_from_bytes_drops_partial_group() {
        let records = records_from_bytes(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            HalfEdgeRecord {
                next: 1,
                twin: 2,
                origin: 3,
                face: 4,
            }
        );
    }

    #[test]
    fn test_empty_inputs() {
        let (triangles, stats) = triangulate_hull(&[], &[], &[]);
        assert!(triangles.is_empty());
        assert_eq!(stats, WalkStats::default());
    }
}

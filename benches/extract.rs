//! Benchmarks for the extraction pipeline.

use std::fmt::Write;

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;

use vcollide::blob::decode_blob;
use vcollide::collision::{triangulate_hull, HalfEdgeRecord};

/// Hex-encode `len` bytes the way documents store packed arrays.
fn hex_blob(len: usize) -> String {
    let mut text = String::with_capacity(len * 3);
    for i in 0..len {
        write!(text, "{:02x} ", (i * 31 % 256) as u8).unwrap();
    }
    text
}

/// A hull of `num_faces` disjoint closed face loops of `ring` edges each.
///
/// Indices are u8 in the document format, so `num_faces * ring` must stay
/// below 256.
fn synthetic_hull(num_faces: usize, ring: usize) -> (Vec<Point3<f32>>, Vec<u8>, Vec<HalfEdgeRecord>) {
    assert!(num_faces * ring <= 256);

    let mut vertices = Vec::with_capacity(num_faces * ring);
    let mut faces = Vec::with_capacity(num_faces);
    let mut edges = Vec::with_capacity(num_faces * ring);

    for f in 0..num_faces {
        let base = f * ring;
        faces.push(base as u8);
        for e in 0..ring {
            let angle = (e as f32) * std::f32::consts::TAU / (ring as f32);
            vertices.push(Point3::new(angle.cos(), angle.sin(), f as f32));
            edges.push(HalfEdgeRecord {
                next: (base + (e + 1) % ring) as u8,
                twin: 0,
                origin: (base + e) as u8,
                face: f as u8,
            });
        }
    }

    (vertices, faces, edges)
}

fn bench_decode(c: &mut Criterion) {
    // 1024 f32 elements.
    let float_blob = hex_blob(4096);
    c.bench_function("decode_floats_4k", |b| {
        b.iter(|| decode_blob::<f32>(&float_blob).unwrap())
    });

    let byte_blob = hex_blob(4096);
    c.bench_function("decode_bytes_4k", |b| {
        b.iter(|| decode_blob::<u8>(&byte_blob).unwrap())
    });
}

fn bench_triangulate(c: &mut Criterion) {
    let (vertices, faces, edges) = synthetic_hull(16, 8);
    c.bench_function("triangulate_hull_16x8", |b| {
        b.iter(|| triangulate_hull(&vertices, &faces, &edges))
    });

    let (vertices, faces, edges) = synthetic_hull(4, 64);
    c.bench_function("triangulate_hull_4x64", |b| {
        b.iter(|| triangulate_hull(&vertices, &faces, &edges))
    });
}

criterion_group!(benches, bench_decode, bench_triangulate);
criterion_main!(benches);

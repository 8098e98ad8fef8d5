//! Per-document extraction driver.
//!
//! Binds the pipeline together for one physics document: resolve which
//! collision-attribute slots belong to the default group, scan each shape
//! category until the store reports absence, decode the qualifying shapes'
//! packed arrays, triangulate, and accumulate.
//!
//! All recoverable conditions are handled by skip-and-continue at the
//! smallest possible granularity (single face, single triangle, single
//! shape entry), so one malformed entry never discards a document's
//! otherwise-valid geometry. Every skip is counted in the returned
//! [`DocumentReport`]; there is no ambient state, so documents may be
//! processed in parallel by an embedding driver.

use nalgebra::Point3;

use crate::blob::{decode_blob, BlobElement};
use crate::collision::{
    records_from_bytes, resolve_default_indices, triangulate_hull, triangulate_mesh, WalkStats,
};
use crate::error::Result;
use crate::geom::Triangle;
use crate::kv3::Document;

const SHAPE_ROOT: &str = "m_parts[0].m_rnShape";

/// Everything extracted from one document, with skip accounting.
///
/// Returned by value per document; callers aggregate across documents as
/// they see fit.
#[derive(Clone, Debug, Default)]
pub struct DocumentReport {
    /// All triangles produced by qualifying shapes, in scan order.
    pub triangles: Vec<Triangle>,
    /// Attribute-slot indices that resolved to the default group, sorted.
    pub accepted_attributes: Vec<usize>,
    /// Hull entries scanned before the store reported absence.
    pub hulls_seen: usize,
    /// Hull entries that produced geometry.
    pub hulls_extracted: usize,
    /// Mesh entries scanned before the store reported absence.
    pub meshes_seen: usize,
    /// Mesh entries that produced geometry.
    pub meshes_extracted: usize,
    /// Qualifying entries skipped over missing, empty, or undecodable
    /// fields (or an unparseable attribute index).
    pub entries_skipped: usize,
    /// How many of those skips were malformed hex blobs.
    pub blob_errors: usize,
    /// Mesh index triples rejected for out-of-range vertex indices.
    pub rejected_triples: usize,
    /// Defensive skips during hull face-loop walking.
    pub walk: WalkStats,
}

/// Parse a document and extract its default-group collision geometry.
pub fn extract_from_str(text: &str) -> Result<DocumentReport> {
    let doc = Document::parse(text)?;
    Ok(extract_document(&doc))
}

/// Extract default-group collision geometry from a parsed document.
pub fn extract_document(doc: &Document) -> DocumentReport {
    let accepted = resolve_default_indices(doc);
    let mut accepted_sorted: Vec<usize> = accepted.iter().copied().collect();
    accepted_sorted.sort_unstable();

    let mut report = DocumentReport {
        accepted_attributes: accepted_sorted,
        ..DocumentReport::default()
    };

    // Hulls.
    for (i, raw_attr) in doc
        .scan(|i| format!("{SHAPE_ROOT}.m_hulls[{i}].m_nCollisionAttributeIndex"))
        .enumerate()
    {
        report.hulls_seen += 1;
        let Some(attr) = parse_attribute_index(raw_attr) else {
            report.entries_skipped += 1;
            continue;
        };
        if !accepted.contains(&attr) {
            continue;
        }

        let base = format!("{SHAPE_ROOT}.m_hulls[{i}].m_Hull");

        // Newer documents store positions in m_VertexPositions; older ones
        // in m_Vertices.
        let raw_vertices = doc
            .get(&format!("{base}.m_VertexPositions"))
            .filter(|raw| !raw.trim().is_empty())
            .or_else(|| doc.get(&format!("{base}.m_Vertices")));
        let floats = match raw_vertices.map(decode_blob::<f32>) {
            Some(Ok(floats)) if !floats.is_empty() => floats,
            Some(Err(_)) => {
                report.blob_errors += 1;
                report.entries_skipped += 1;
                continue;
            }
            _ => {
                report.entries_skipped += 1;
                continue;
            }
        };
        let vertices = points_from_floats(&floats);
        if vertices.is_empty() {
            report.entries_skipped += 1;
            continue;
        }

        let Some(faces) = decode_entry_field::<u8>(doc, &format!("{base}.m_Faces"), &mut report)
        else {
            report.entries_skipped += 1;
            continue;
        };
        let Some(edge_bytes) =
            decode_entry_field::<u8>(doc, &format!("{base}.m_Edges"), &mut report)
        else {
            report.entries_skipped += 1;
            continue;
        };
        let edges = records_from_bytes(&edge_bytes);
        if edges.is_empty() {
            report.entries_skipped += 1;
            continue;
        }

        let (mut triangles, walk) = triangulate_hull(&vertices, &faces, &edges);
        report.walk += walk;
        report.triangles.append(&mut triangles);
        report.hulls_extracted += 1;
    }

    // Meshes.
    for (i, raw_attr) in doc
        .scan(|i| format!("{SHAPE_ROOT}.m_meshes[{i}].m_nCollisionAttributeIndex"))
        .enumerate()
    {
        report.meshes_seen += 1;
        let Some(attr) = parse_attribute_index(raw_attr) else {
            report.entries_skipped += 1;
            continue;
        };
        if !accepted.contains(&attr) {
            continue;
        }

        let base = format!("{SHAPE_ROOT}.m_meshes[{i}].m_Mesh");

        let Some(indices) =
            decode_entry_field::<i32>(doc, &format!("{base}.m_Triangles"), &mut report)
        else {
            report.entries_skipped += 1;
            continue;
        };
        let Some(floats) =
            decode_entry_field::<f32>(doc, &format!("{base}.m_Vertices"), &mut report)
        else {
            report.entries_skipped += 1;
            continue;
        };
        let vertices = points_from_floats(&floats);
        if vertices.is_empty() {
            report.entries_skipped += 1;
            continue;
        }

        let (mut triangles, rejected) = triangulate_mesh(&vertices, &indices);
        report.rejected_triples += rejected;
        report.triangles.append(&mut triangles);
        report.meshes_extracted += 1;
    }

    report
}

fn parse_attribute_index(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

/// Fetch and decode one packed field of a shape entry.
///
/// Returns `None` when the field is absent, empty, or malformed; malformed
/// blobs are additionally counted so they stay auditable.
fn decode_entry_field<T: BlobElement>(
    doc: &Document,
    path: &str,
    report: &mut DocumentReport,
) -> Option<Vec<T>> {
    match doc.get(path).map(decode_blob::<T>) {
        Some(Ok(values)) if !values.is_empty() => Some(values),
        Some(Err(_)) => {
            report.blob_errors += 1;
            None
        }
        _ => None,
    }
}

/// Rebuild positions from a flat run of f32 triples; a trailing partial
/// triple is dropped.
fn points_from_floats(floats: &[f32]) -> Vec<Point3<f32>> {
    floats
        .chunks_exact(3)
        .map(|triple| Point3::new(triple[0], triple[1], triple[2]))
        .collect()
}

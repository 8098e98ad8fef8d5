//! `.tri` triangle dump format.
//!
//! A `.tri` file is exactly `triangle_count * 36` bytes: consecutive
//! [`Triangle`] records with no header, no count, and no padding. Each
//! record is three positions of three little-endian IEEE-754 singles.
//!
//! Writing casts the triangle slice directly to bytes, which assumes a
//! little-endian host — the same assumption the source documents make.
//! Reading reconstructs each component explicitly, so loads are alignment
//! safe.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{ExtractError, Result};
use crate::geom::Triangle;

/// Save triangles to a `.tri` file.
///
/// # Example
///
/// ```no_run
/// use vcollide::geom::Triangle;
/// use vcollide::io::tri;
///
/// let triangles: Vec<Triangle> = Vec::new();
/// tri::save(&triangles, "output/de_dust2.tri").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(triangles: &[Triangle], path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytemuck::cast_slice(triangles))?;
    writer.flush()?;
    Ok(())
}

/// Load triangles from a `.tri` file.
///
/// Rejects files whose length is not a whole number of records.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Triangle>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    if bytes.len() % Triangle::ENCODED_SIZE != 0 {
        return Err(ExtractError::LoadError {
            path: path.to_path_buf(),
            message: format!(
                "length {} is not a multiple of the {}-byte record size",
                bytes.len(),
                Triangle::ENCODED_SIZE,
            ),
        });
    }

    let triangles = bytes
        .chunks_exact(Triangle::ENCODED_SIZE)
        .map(|record| {
            let mut components = record.chunks_exact(4).map(|c| {
                let mut buf = [0u8; 4];
                buf.copy_from_slice(c);
                f32::from_le_bytes(buf)
            });
            let mut point = || {
                // The record size is a multiple of 12; each chunk is present.
                let x = components.next().unwrap_or_default();
                let y = components.next().unwrap_or_default();
                let z = components.next().unwrap_or_default();
                Point3::new(x, y, z)
            };
            Triangle::new(point(), point(), point())
        })
        .collect();

    Ok(triangles)
}

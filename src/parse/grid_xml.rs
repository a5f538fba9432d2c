//! Reader for XML grid documents.
//!
//! ```xml
//! <grid nx="4" ny="4" nz="2" label="anat">
//!   <origin>-10 -10 0</origin>
//!   <spacing>5 5 2.5</spacing>
//!   <values>...</values>
//! </grid>
//! ```
//!
//! `<affine>` (twelve numbers, the upper three rows of the index-to-world
//! matrix) overrides `<origin>`/`<spacing>`. Every `<values>` element adds a
//! brick of `nx * ny * nz` numbers.

use std::path::Path;

use quick_xml::de::from_str;
use serde::Deserialize;

use super::{ParseResult, parse_fixed, parse_numbers};
use crate::geom::{Point3, Transform, Vec3, VoxelGrid};

#[derive(Debug, Deserialize)]
#[serde(rename = "grid")]
struct GridDocument {
    #[serde(rename = "@nx")]
    nx: usize,
    #[serde(rename = "@ny")]
    ny: usize,
    #[serde(rename = "@nz")]
    nz: usize,
    #[serde(rename = "@label", default)]
    label: Option<String>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    spacing: Option<String>,
    #[serde(default)]
    affine: Option<String>,
    #[serde(default)]
    values: Vec<String>,
}

/// Read a grid document from a string.
pub fn parse_str(input: &str) -> ParseResult<VoxelGrid> {
    let document: GridDocument = from_str(input)?;
    log::debug!(
        "grid document: {} x {} x {}, {} bricks",
        document.nx,
        document.ny,
        document.nz,
        document.values.len()
    );

    let index_to_world = index_to_world(&document)?;
    let mut grid = VoxelGrid::new([document.nx, document.ny, document.nz], index_to_world)?;
    if let Some(label) = document.label {
        grid = grid.with_label(label);
    }
    for brick in &document.values {
        grid.push_brick(parse_numbers(brick)?)?;
    }
    Ok(grid)
}

/// Read a grid document from a file.
pub fn read_file(path: &Path) -> ParseResult<VoxelGrid> {
    let text = std::fs::read_to_string(path)?;
    let grid = parse_str(&text)?;
    if grid.label().is_empty() {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(grid.with_label(stem));
    }
    Ok(grid)
}

fn index_to_world(document: &GridDocument) -> ParseResult<Transform> {
    if let Some(affine) = document.affine.as_deref() {
        let m = parse_fixed::<12>("affine", affine)?;
        return Ok(Transform::from_rows([
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
        ]));
    }

    let origin = match document.origin.as_deref() {
        Some(text) => Point3::from_array(parse_fixed::<3>("origin", text)?),
        None => Point3::ORIGIN,
    };
    let spacing = match document.spacing.as_deref() {
        Some(text) => {
            let [dx, dy, dz] = parse_fixed::<3>("spacing", text)?;
            Vec3::new(dx, dy, dz)
        }
        None => Vec3::new(1.0, 1.0, 1.0),
    };
    Ok(Transform::axis_aligned(origin, spacing))
}

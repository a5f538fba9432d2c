//! Readers for ASCII surface node files.
//!
//! Two layouts are accepted:
//! - FreeSurfer ASCII: a `#!ascii` comment, a `nverts ntris` line, `nverts`
//!   vertex rows `x y z [flag]`, then triangle rows (ignored);
//! - plain node lists: one `x y z` row per node.
//!
//! Blank lines and `#` comments are skipped in both.

use std::path::Path;

use super::{ParseError, ParseResult};
use crate::geom::Point3;
use crate::smap::Surface;

/// Parse node coordinates from `input`.
pub fn parse_nodes(input: &str) -> ParseResult<Vec<Point3>> {
    let freesurfer = input
        .lines()
        .next()
        .is_some_and(|line| line.trim_start().starts_with("#!ascii"));

    let mut rows = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, strip_comment(line)))
        .filter(|(_, line)| !line.is_empty());

    if !freesurfer {
        return rows.map(|(line, text)| parse_vertex(line, text)).collect();
    }

    let (line, header) = rows.next().ok_or(ParseError::Surface {
        line: 1,
        reason: "missing vertex/triangle count line".to_owned(),
    })?;
    let mut counts = header.split_whitespace();
    let vertex_count: usize = counts
        .next()
        .ok_or_else(|| surface_error(line, "missing vertex count"))?
        .parse()?;

    // header count is not trusted for sizing
    let mut nodes = Vec::new();
    for _ in 0..vertex_count {
        let (line, text) = rows.next().ok_or_else(|| {
            surface_error(
                line,
                &format!("expected {vertex_count} vertices, found {}", nodes.len()),
            )
        })?;
        nodes.push(parse_vertex(line, text)?);
    }
    Ok(nodes)
}

/// Load a surface file; the label is the file stem.
pub fn read_surface(path: &Path) -> ParseResult<Surface> {
    let text = std::fs::read_to_string(path)?;
    let nodes = parse_nodes(&text)?;
    let label = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    log::debug!("surface `{label}`: {} nodes from {}", nodes.len(), path.display());
    Ok(Surface::new(label, nodes))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => line[..index].trim(),
        None => line.trim(),
    }
}

fn parse_vertex(line: usize, text: &str) -> ParseResult<Point3> {
    let mut coords = [0.0; 3];
    let mut fields = text.split_whitespace();
    for coord in &mut coords {
        *coord = fields
            .next()
            .ok_or_else(|| surface_error(line, "expected x y z"))?
            .parse()?;
    }
    Ok(Point3::from_array(coords))
}

fn surface_error(line: usize, reason: &str) -> ParseError {
    ParseError::Surface {
        line,
        reason: reason.to_owned(),
    }
}

//! Text output of mapping results.
//!
//! Voxel-indexed results produce one row per active voxel in ascending voxel
//! index; MIN/MAX voxels that never received a contribution are left out.
//! MIDPOINT produces one row per node, in node order.

use std::io::{self, Write};

use crate::geom::VoxelGrid;
use crate::smap::{MapOutput, NodeList, NodeValues, Params, SmapOptions, VoxelValues};

/// Write `output` as text rows, preceded by header rows unless
/// `opts.no_head` is set.
pub fn write_output<W: Write>(
    out: &mut W,
    opts: &SmapOptions,
    params: &Params<'_>,
    grid: &VoxelGrid,
    nodes: &NodeList,
    output: &MapOutput,
) -> io::Result<usize> {
    if !opts.no_head {
        write_header(out, opts, params, grid, nodes, output)?;
    }
    let rows = match output {
        MapOutput::Voxel { values, .. } => write_voxel_rows(out, opts, params, grid, values)?,
        MapOutput::Node { values, .. } => write_node_rows(out, opts, grid, values)?,
    };
    out.flush()?;
    Ok(rows)
}

fn write_header<W: Write>(
    out: &mut W,
    opts: &SmapOptions,
    params: &Params<'_>,
    grid: &VoxelGrid,
    nodes: &NodeList,
    output: &MapOutput,
) -> io::Result<()> {
    let [nx, ny, nz] = grid.dims();
    let diagnostics = output.diagnostics();
    writeln!(out, "# surf2vol: {} ({})", opts.map, opts.map.description())?;
    writeln!(out, "# surfaces : {}", nodes.labels().join(" "))?;
    writeln!(
        out,
        "# nodes    : {} x depth {}",
        nodes.node_count(),
        nodes.depth()
    )?;
    if grid.label().is_empty() {
        writeln!(out, "# grid     : {nx} x {ny} x {nz}")?;
    } else {
        writeln!(out, "# grid     : {} ({nx} x {ny} x {nz})", grid.label())?;
    }
    writeln!(
        out,
        "# voxels   : {} total, {} active, {} touched",
        params.nvox(),
        params.active_count(),
        diagnostics.voxels_touched
    )?;
    if opts.map.is_node_indexed() {
        writeln!(out, "#     node    voxel    i    j    k  value")?;
    } else {
        writeln!(out, "#    voxel    i    j    k  value")?;
    }
    Ok(())
}

fn write_voxel_rows<W: Write>(
    out: &mut W,
    opts: &SmapOptions,
    params: &Params<'_>,
    grid: &VoxelGrid,
    values: &VoxelValues,
) -> io::Result<usize> {
    let mut rows = 0;
    for voxel in params.active_voxels() {
        let Some(value) = values.reported(voxel) else {
            continue;
        };
        let [i, j, k] = grid.ijk(voxel);
        writeln!(
            out,
            "{voxel:>10} {i:>4} {j:>4} {k:>4}  {}",
            opts.datum.format(value)
        )?;
        rows += 1;
    }
    Ok(rows)
}

fn write_node_rows<W: Write>(
    out: &mut W,
    opts: &SmapOptions,
    grid: &VoxelGrid,
    values: &NodeValues,
) -> io::Result<usize> {
    for (node, entry) in values.entries().iter().enumerate() {
        let value = opts.datum.format(entry.value);
        match entry.voxel {
            Some(voxel) => {
                let [i, j, k] = grid.ijk(voxel);
                writeln!(out, "{node:>10} {voxel:>8} {i:>4} {j:>4} {k:>4}  {value}")?;
            }
            None => writeln!(out, "{node:>10} {:>8} {:>4} {:>4} {:>4}  {value}", -1, -1, -1, -1)?,
        }
    }
    Ok(values.len())
}

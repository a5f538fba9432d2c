//! Surface-to-voxel mapping.
//!
//! Every mapping function walks the node list, turns each node into one or
//! more sample points, resolves those points through [`Params::resolve`] and
//! folds the hits into its result. Points outside the grid or the inclusion
//! mask are skipped and only counted.

use crate::geom::{Point3, VoxelGrid, VoxelIndex};

use super::{
    ConfigurationError, MapDiagnostics, MapError, MapFunction, MapOutput, NodeList, NodeValue,
    NodeValues, Params, Resolution, SmapOptions, SurfaceSet, VoxelValues,
};

/// Select the mappable surfaces `opts.map` needs, build their node list and
/// map it into `grid`.
pub fn map_surfaces(
    opts: &SmapOptions,
    params: &Params<'_>,
    grid: &VoxelGrid,
    surfaces: &SurfaceSet,
) -> Result<(NodeList, MapOutput), MapError> {
    opts.validate()?;
    let selected = surfaces.select_for(opts.map)?;
    let nodes = NodeList::build(&selected)?;
    let output = apply_map(opts, params, grid, &nodes)?;
    Ok((nodes, output))
}

/// Map `nodes` into `grid` with the function selected in `opts`.
///
/// All configuration and node-list checks run before the first sample is
/// resolved, so an error never leaves a partial result behind.
pub fn apply_map(
    opts: &SmapOptions,
    params: &Params<'_>,
    grid: &VoxelGrid,
    nodes: &NodeList,
) -> Result<MapOutput, MapError> {
    validate_run(opts, params, grid, nodes)?;

    let mut sampler = Sampler {
        opts,
        params,
        grid,
        diagnostics: MapDiagnostics::new(opts.map, nodes.node_count(), nodes.depth()),
    };
    if opts.map.reads_values() && grid.brick_count() == 0 {
        sampler
            .diagnostics
            .add_warning("grid has no value bricks, sampling zeros");
    }

    let output = match opts.map {
        MapFunction::Midpoint => {
            let values = map_midpoints(&mut sampler, nodes);
            MapOutput::Node {
                values,
                diagnostics: sampler.diagnostics,
            }
        }
        MapFunction::Mask2 => {
            let mut values = VoxelValues::new(opts.map, params.nvox());
            map_segments(&mut sampler, nodes, &mut values);
            sampler.diagnostics.voxels_touched = values.touched_count();
            MapOutput::Voxel {
                values,
                diagnostics: sampler.diagnostics,
            }
        }
        MapFunction::Mask
        | MapFunction::Ave
        | MapFunction::Count
        | MapFunction::Min
        | MapFunction::Max => {
            let mut values = VoxelValues::new(opts.map, params.nvox());
            map_columns(&mut sampler, nodes, &mut values);
            sampler.diagnostics.voxels_touched = values.touched_count();
            MapOutput::Voxel {
                values,
                diagnostics: sampler.diagnostics,
            }
        }
    };

    if opts.debug > 0 {
        log::info!("{}", output.diagnostics().summary());
    }
    Ok(output)
}

fn validate_run(
    opts: &SmapOptions,
    params: &Params<'_>,
    grid: &VoxelGrid,
    nodes: &NodeList,
) -> Result<(), MapError> {
    opts.validate()?;
    nodes.validate()?;

    if params.nvox() != grid.nvox() {
        return Err(ConfigurationError::GridMismatch {
            expected: grid.nvox(),
            found: params.nvox(),
        }
        .into());
    }
    if opts.map.needs_pair() && nodes.depth() < 2 {
        return Err(ConfigurationError::DepthTooShallow {
            map: opts.map,
            depth: nodes.depth(),
        }
        .into());
    }
    if opts.map.reads_values() {
        opts.check_brick(grid)?;
    }
    if let Some(node) = opts.debug_node {
        if node >= nodes.node_count() {
            return Err(ConfigurationError::DebugNode {
                node,
                node_count: nodes.node_count(),
            }
            .into());
        }
    }
    Ok(())
}

struct Sampler<'r, 'a> {
    opts: &'r SmapOptions,
    params: &'r Params<'a>,
    grid: &'r VoxelGrid,
    diagnostics: MapDiagnostics,
}

impl Sampler<'_, '_> {
    /// Resolve one sample point of `node`, recording the outcome.
    fn sample(&mut self, node: usize, point: Point3) -> Option<VoxelIndex> {
        self.diagnostics.points_considered += 1;
        let resolution = self.params.resolve(self.grid, point);
        match resolution {
            Resolution::Voxel(_) => self.diagnostics.points_resolved += 1,
            Resolution::OutOfBounds => self.diagnostics.points_out_of_bounds += 1,
            Resolution::Masked(_) => self.diagnostics.points_masked_out += 1,
        }
        if self.opts.traces(node) {
            log::trace!(
                "node {node}: ({:.4}, {:.4}, {:.4}) -> {resolution:?}",
                point.x,
                point.y,
                point.z
            );
        }
        resolution.voxel()
    }

    fn value(&self, voxel: VoxelIndex) -> f64 {
        self.grid.value(self.opts.brick, voxel)
    }
}

/// MASK, AVE, COUNT, MIN and MAX: every column point contributes.
fn map_columns(sampler: &mut Sampler<'_, '_>, nodes: &NodeList, values: &mut VoxelValues) {
    for node in 0..nodes.node_count() {
        for point in nodes.column(node) {
            if let Some(voxel) = sampler.sample(node, point) {
                values.contribute(voxel, sampler.value(voxel));
            }
        }
    }
}

/// Fractions along a segment sampled by MASK2 with `steps` levels.
///
/// Level `n` splits the segment into `n` equal parts and samples the middle of
/// each, so level 1 is the midpoint alone and every extra level only adds
/// points.
pub fn segment_fractions(steps: u32) -> impl Iterator<Item = f64> {
    (1..=steps).flat_map(|level| {
        let n = f64::from(level);
        (0..level).map(move |s| (f64::from(s) + 0.5) / n)
    })
}

/// MASK2: nested sub-step midpoints between the innermost and outermost point.
fn map_segments(sampler: &mut Sampler<'_, '_>, nodes: &NodeList, values: &mut VoxelValues) {
    let steps = sampler.opts.m2_steps;
    for node in 0..nodes.node_count() {
        let (inner, outer) = nodes.segment(node);
        for t in segment_fractions(steps) {
            if let Some(voxel) = sampler.sample(node, inner.lerp(outer, t)) {
                values.contribute(voxel, 1.0);
            }
        }
    }
}

/// MIDPOINT: one grid sample per node.
fn map_midpoints(sampler: &mut Sampler<'_, '_>, nodes: &NodeList) -> NodeValues {
    let mut values = NodeValues::with_capacity(MapFunction::Midpoint, nodes.node_count());
    let mut touched = vec![false; sampler.params.nvox()];
    for node in 0..nodes.node_count() {
        let (inner, outer) = nodes.segment(node);
        let voxel = sampler.sample(node, inner.midpoint(outer));
        let value = voxel.map_or(0.0, |voxel| {
            touched[voxel.get()] = true;
            sampler.value(voxel)
        });
        values.push(NodeValue { voxel, value });
    }
    sampler.diagnostics.voxels_touched = touched.iter().filter(|&&hit| hit).count();
    values
}

//! Counters collected while mapping a node list into a grid.
//!
//! Skipped samples are not errors: a point outside the grid or outside the
//! inclusion mask simply does not contribute. The counters make those skips
//! visible and let callers check that every sample was accounted for:
//! `points_considered == points_resolved + points_out_of_bounds + points_masked_out`.

use super::MapFunction;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MapDiagnostics {
    /// Mapping function that produced the result.
    pub map: MapFunction,

    /// Nodes in the node list.
    pub node_count: usize,

    /// Depth levels per node.
    pub depth: usize,

    /// Sample points generated from the node list.
    ///
    /// Equals `node_count * depth` for the plain column functions; MASK2 and
    /// MIDPOINT generate their own sample points along each segment.
    pub points_considered: usize,

    /// Samples that landed in an active voxel.
    pub points_resolved: usize,

    /// Samples outside the grid.
    pub points_out_of_bounds: usize,

    /// Samples inside the grid but outside the inclusion mask.
    pub points_masked_out: usize,

    /// Distinct voxels that received at least one contribution.
    pub voxels_touched: usize,

    /// Human-readable notes about the run.
    pub warnings: Vec<String>,
}

impl MapDiagnostics {
    #[must_use]
    pub fn new(map: MapFunction, node_count: usize, depth: usize) -> Self {
        Self {
            map,
            node_count,
            depth,
            points_considered: 0,
            points_resolved: 0,
            points_out_of_bounds: 0,
            points_masked_out: 0,
            voxels_touched: 0,
            warnings: Vec::new(),
        }
    }

    /// Samples that did not contribute.
    #[must_use]
    pub fn points_skipped(&self) -> usize {
        self.points_out_of_bounds + self.points_masked_out
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// One-line summary for logs.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: nodes={} depth={} samples={} resolved={} out_of_bounds={} masked={} voxels={}",
            self.map,
            self.node_count,
            self.depth,
            self.points_considered,
            self.points_resolved,
            self.points_out_of_bounds,
            self.points_masked_out,
            self.voxels_touched
        )
    }
}

use crate::geom::VoxelIndex;

use super::{MapDiagnostics, MapFunction};

/// One value per grid voxel.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VoxelValues {
    map: MapFunction,
    values: Vec<f64>,
    hits: Vec<u32>,
}

impl VoxelValues {
    pub(crate) fn new(map: MapFunction, nvox: usize) -> Self {
        Self {
            map,
            values: vec![map.neutral_value(); nvox],
            hits: vec![0; nvox],
        }
    }

    /// Fold one contribution of `sample` into `voxel`.
    pub(crate) fn contribute(&mut self, voxel: VoxelIndex, sample: f64) {
        let v = voxel.get();
        self.hits[v] = self.hits[v].saturating_add(1);
        let slot = &mut self.values[v];
        match self.map {
            MapFunction::Mask | MapFunction::Mask2 => *slot = 1.0,
            MapFunction::Count => *slot += 1.0,
            MapFunction::Ave => *slot += (sample - *slot) / f64::from(self.hits[v]),
            MapFunction::Min => *slot = slot.min(sample),
            MapFunction::Max => *slot = slot.max(sample),
            // node-indexed, never accumulated per voxel
            MapFunction::Midpoint => {}
        }
    }

    #[must_use]
    pub const fn map(&self) -> MapFunction {
        self.map
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw per-voxel values, including neutral sentinels.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn value(&self, voxel: VoxelIndex) -> f64 {
        self.values[voxel.get()]
    }

    /// Number of contributions received by `voxel`.
    #[must_use]
    pub fn hits(&self, voxel: VoxelIndex) -> u32 {
        self.hits[voxel.get()]
    }

    #[must_use]
    pub fn touched(&self, voxel: VoxelIndex) -> bool {
        self.hits[voxel.get()] > 0
    }

    /// Value to report for `voxel`; `None` for MIN/MAX voxels that never
    /// received a contribution.
    #[must_use]
    pub fn reported(&self, voxel: VoxelIndex) -> Option<f64> {
        match self.map {
            MapFunction::Min | MapFunction::Max if !self.touched(voxel) => None,
            _ => Some(self.value(voxel)),
        }
    }

    #[must_use]
    pub fn touched_count(&self) -> usize {
        self.hits.iter().filter(|&&hits| hits > 0).count()
    }
}

/// The sample taken for one node.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct NodeValue {
    /// Voxel the node resolved to, if any.
    pub voxel: Option<VoxelIndex>,
    /// Grid value at that voxel; 0 when unresolved.
    pub value: f64,
}

/// One value per node, in node order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NodeValues {
    map: MapFunction,
    entries: Vec<NodeValue>,
}

impl NodeValues {
    pub(crate) fn with_capacity(map: MapFunction, node_count: usize) -> Self {
        Self {
            map,
            entries: Vec::with_capacity(node_count),
        }
    }

    pub(crate) fn push(&mut self, entry: NodeValue) {
        self.entries.push(entry);
    }

    #[must_use]
    pub const fn map(&self) -> MapFunction {
        self.map
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[NodeValue] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, node: usize) -> Option<&NodeValue> {
        self.entries.get(node)
    }
}

/// Result of one mapping run, indexed by voxel or by node.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "indexed_by", rename_all = "lowercase")]
pub enum MapOutput {
    Voxel {
        values: VoxelValues,
        diagnostics: MapDiagnostics,
    },
    Node {
        values: NodeValues,
        diagnostics: MapDiagnostics,
    },
}

impl MapOutput {
    #[must_use]
    pub const fn diagnostics(&self) -> &MapDiagnostics {
        match self {
            Self::Voxel { diagnostics, .. } | Self::Node { diagnostics, .. } => diagnostics,
        }
    }

    #[must_use]
    pub const fn voxel_values(&self) -> Option<&VoxelValues> {
        match self {
            Self::Voxel { values, .. } => Some(values),
            Self::Node { .. } => None,
        }
    }

    #[must_use]
    pub const fn node_values(&self) -> Option<&NodeValues> {
        match self {
            Self::Node { values, .. } => Some(values),
            Self::Voxel { .. } => None,
        }
    }
}

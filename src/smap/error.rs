use super::MapFunction;

/// Invalid run configuration, detected before any voxel is written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no mapping function selected (use one of: {})", MapFunction::names().join(", "))]
    MissingMapFunction,
    #[error("unknown mapping function `{name}`{}", suggestion_hint(.suggestion))]
    UnknownMapFunction {
        name: String,
        suggestion: Option<&'static str>,
    },
    #[error("unknown output datum `{name}` (use byte, short or float)")]
    UnknownDatum { name: String },
    #[error("node list needs 1 or 2 surfaces, got {count}")]
    SurfaceCount { count: usize },
    #[error("surfaces have no nodes")]
    NoNodes,
    #[error("surfaces disagree on node count: {first} vs {second}")]
    NodeCountMismatch { first: usize, second: usize },
    #[error("mapping function `{map}` needs {required} mappable surfaces, found {available}")]
    TooFewSurfaces {
        map: MapFunction,
        required: usize,
        available: usize,
    },
    #[error("mapping function `{map}` needs paired surfaces, node list has depth {depth}")]
    DepthTooShallow { map: MapFunction, depth: usize },
    #[error("mask2 step count must be positive, got {steps}")]
    NonPositiveSteps { steps: i64 },
    #[error("mask2 step count {steps} exceeds maximum {max}")]
    TooManySteps { steps: u32, max: u32 },
    #[error("debug level {level} exceeds maximum {max}")]
    DebugLevel { level: u8, max: u8 },
    #[error("debug node {node} is out of range (node count {node_count})")]
    DebugNode { node: usize, node_count: usize },
    #[error("parameters were derived from a grid of {found} voxels, mapping grid has {expected}")]
    GridMismatch { expected: usize, found: usize },
    #[error("inclusion mask has {found} voxels, grid has {expected}")]
    MaskLength { expected: usize, found: usize },
    #[error("brick {brick} requested, grid has {available}")]
    BrickOutOfRange { brick: usize, available: usize },
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean `{name}`?"),
        None => String::new(),
    }
}

/// Structural defect in a node list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("node list depth must be at least 1")]
    ZeroDepth,
    #[error("node list holds {found} points, expected depth {depth} x {node_count} nodes = {expected}")]
    ColumnShape {
        depth: usize,
        node_count: usize,
        expected: usize,
        found: usize,
    },
    #[error("node list has {labels} labels for depth {depth}")]
    LabelCount { depth: usize, labels: usize },
}

/// Any fatal error raised by the mapping engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

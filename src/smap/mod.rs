mod diagnostics;
mod engine;
mod error;
mod function;
mod node_list;
mod options;
mod result;
mod surface;

pub use diagnostics::MapDiagnostics;
pub use engine::{apply_map, map_surfaces, segment_fractions};
pub use error::{ConfigurationError, GeometryError, MapError};
pub use function::MapFunction;
pub use node_list::NodeList;
pub use options::{
    DEBUG_MAX_LEVEL, DEBUG_NODE_LEVEL, DEFAULT_M2_STEPS, Datum, MAX_M2_STEPS, Params, Resolution, SmapOptions,
    parse_steps,
};
pub use result::{MapOutput, NodeValue, NodeValues, VoxelValues};
pub use surface::{Surface, SurfaceSet};

#[cfg(test)]
mod tests;

//! Run configuration and the computation context bound to one grid.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point3, VoxelGrid, VoxelIndex};

use super::{ConfigurationError, MapFunction};

/// Highest accepted debug level.
pub const DEBUG_MAX_LEVEL: u8 = 4;
/// Debug level from which the debug node is traced sample by sample.
pub const DEBUG_NODE_LEVEL: u8 = 3;
/// Default number of MASK2 refinement levels.
pub const DEFAULT_M2_STEPS: u32 = 2;
/// Highest accepted MASK2 step count. Level count grows the samples per node
/// quadratically: `steps * (steps + 1) / 2`.
pub const MAX_M2_STEPS: u32 = 100;

/// Convert a user supplied MASK2 step count.
pub fn parse_steps(steps: i64) -> Result<u32, ConfigurationError> {
    u32::try_from(steps)
        .ok()
        .filter(|&steps| steps > 0)
        .ok_or(ConfigurationError::NonPositiveSteps { steps })
}

/// Value type used when rendering output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datum {
    Byte,
    Short,
    Float,
}

impl Datum {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Float => "float",
        }
    }

    /// Render `value` in this datum. Integer data are rounded and clamped to
    /// the type's range.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Byte => format!("{}", value.round().clamp(0.0, f64::from(u8::MAX)) as u8),
            Self::Short => format!(
                "{}",
                value
                    .round()
                    .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
            ),
            Self::Float => format!("{value:.6}"),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Datum {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byte" => Ok(Self::Byte),
            "short" => Ok(Self::Short),
            "float" => Ok(Self::Float),
            other => Err(ConfigurationError::UnknownDatum {
                name: other.to_owned(),
            }),
        }
    }
}

/// Options controlling one surface-to-voxel mapping run.
#[derive(Debug, Clone, PartialEq)]
pub struct SmapOptions {
    /// Selected mapping function
    pub map: MapFunction,
    /// Verbosity; 0 is silent
    pub debug: u8,
    /// Node whose samples are traced at [`DEBUG_NODE_LEVEL`]
    pub debug_node: Option<usize>,
    /// Suppress output header rows
    pub no_head: bool,
    /// MASK2 refinement levels
    pub m2_steps: u32,
    /// Grid brick sampled by value-reading functions
    pub brick: usize,
    /// Output value type
    pub datum: Datum,
}

impl SmapOptions {
    #[must_use]
    pub fn new(map: MapFunction) -> Self {
        Self {
            map,
            debug: 0,
            debug_node: None,
            no_head: false,
            m2_steps: DEFAULT_M2_STEPS,
            brick: 0,
            datum: map.default_datum(),
        }
    }

    /// MASK2 options with an explicit step count.
    #[must_use]
    pub fn with_steps(steps: u32) -> Self {
        Self {
            m2_steps: steps,
            ..Self::new(MapFunction::Mask2)
        }
    }

    #[must_use]
    pub fn with_debug(self, debug: u8) -> Self {
        Self { debug, ..self }
    }

    /// Check the options that do not depend on the grid or the node list.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.debug > DEBUG_MAX_LEVEL {
            return Err(ConfigurationError::DebugLevel {
                level: self.debug,
                max: DEBUG_MAX_LEVEL,
            });
        }
        if self.map == MapFunction::Mask2 {
            if self.m2_steps == 0 {
                return Err(ConfigurationError::NonPositiveSteps { steps: 0 });
            }
            if self.m2_steps > MAX_M2_STEPS {
                return Err(ConfigurationError::TooManySteps {
                    steps: self.m2_steps,
                    max: MAX_M2_STEPS,
                });
            }
        }
        Ok(())
    }

    /// Check `brick` against the bricks of `grid`. A grid without bricks
    /// accepts any index and reads as zero.
    pub fn check_brick(&self, grid: &VoxelGrid) -> Result<(), ConfigurationError> {
        let available = grid.brick_count();
        if available > 0 && self.brick >= available {
            return Err(ConfigurationError::BrickOutOfRange {
                brick: self.brick,
                available,
            });
        }
        Ok(())
    }

    pub(crate) fn traces(&self, node: usize) -> bool {
        self.debug >= DEBUG_NODE_LEVEL && self.debug_node == Some(node)
    }
}

impl Default for SmapOptions {
    fn default() -> Self {
        Self::new(MapFunction::Mask)
    }
}

impl fmt::Display for SmapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "smap options:")?;
        writeln!(f, "   map        : {}", self.map)?;
        writeln!(f, "   debug      : {}", self.debug)?;
        match self.debug_node {
            Some(node) => writeln!(f, "   debug node : {node}")?,
            None => writeln!(f, "   debug node : none")?,
        }
        writeln!(f, "   no_head    : {}", self.no_head)?;
        writeln!(f, "   m2_steps   : {}", self.m2_steps)?;
        writeln!(f, "   brick      : {}", self.brick)?;
        write!(f, "   datum      : {}", self.datum)
    }
}

/// Why a sample point did or did not land in a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Voxel(VoxelIndex),
    OutOfBounds,
    Masked(VoxelIndex),
}

impl Resolution {
    #[must_use]
    pub const fn voxel(self) -> Option<VoxelIndex> {
        match self {
            Self::Voxel(voxel) => Some(voxel),
            Self::OutOfBounds | Self::Masked(_) => None,
        }
    }
}

/// Computation parameters derived once from a grid and its inclusion mask.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    dims: [usize; 3],
    nvox: usize,
    cmask: Option<&'a [bool]>,
    ccount: usize,
}

impl<'a> Params<'a> {
    /// Bind to `grid`, optionally restricted to the voxels set in `cmask`.
    pub fn new(grid: &VoxelGrid, cmask: Option<&'a [bool]>) -> Result<Self, ConfigurationError> {
        let nvox = grid.nvox();
        let ccount = match cmask {
            Some(mask) if mask.len() != nvox => {
                return Err(ConfigurationError::MaskLength {
                    expected: nvox,
                    found: mask.len(),
                });
            }
            Some(mask) => mask.iter().filter(|&&set| set).count(),
            None => nvox,
        };

        Ok(Self {
            dims: grid.dims(),
            nvox,
            cmask,
            ccount,
        })
    }

    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        self.dims
    }

    #[must_use]
    pub const fn nvox(&self) -> usize {
        self.nvox
    }

    /// Voxels in the inclusion mask (all voxels when there is none).
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.ccount
    }

    #[must_use]
    pub fn is_active(&self, voxel: VoxelIndex) -> bool {
        self.cmask
            .map_or(true, |mask| mask.get(voxel.get()).copied().unwrap_or(false))
    }

    /// Active voxels in ascending index order.
    pub fn active_voxels(&self) -> impl Iterator<Item = VoxelIndex> + '_ {
        (0..self.nvox)
            .map(VoxelIndex)
            .filter(|&voxel| self.is_active(voxel))
    }

    /// Resolve `point` against `grid` and the inclusion mask.
    #[must_use]
    pub fn resolve(&self, grid: &VoxelGrid, point: Point3) -> Resolution {
        match grid.resolve(point) {
            Some(voxel) if self.is_active(voxel) => Resolution::Voxel(voxel),
            Some(voxel) => Resolution::Masked(voxel),
            None => Resolution::OutOfBounds,
        }
    }
}

impl fmt::Display for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [nx, ny, nz] = self.dims;
        writeln!(f, "params:")?;
        writeln!(f, "   dims   : {nx} x {ny} x {nz}")?;
        writeln!(f, "   nvox   : {}", self.nvox)?;
        match self.cmask {
            Some(mask) => writeln!(f, "   cmask  : {} voxels", mask.len())?,
            None => writeln!(f, "   cmask  : none")?,
        }
        write!(f, "   ccount : {}", self.ccount)
    }
}

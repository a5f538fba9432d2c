//! Mapping function selection.

use std::fmt;
use std::str::FromStr;

use super::ConfigurationError;
use super::options::Datum;

/// How node-list samples are turned into output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapFunction {
    /// Voxels touched by any column point are set to 1.
    Mask,
    /// One grid sample per node, at the midpoint of its inner/outer segment.
    #[serde(alias = "midpt")]
    Midpoint,
    /// Mask of nested sub-step midpoints along each inner/outer segment.
    Mask2,
    /// Running mean of the grid values of touched voxels.
    Ave,
    /// Number of column points resolving to each voxel.
    Count,
    /// Minimum grid value over contributions.
    Min,
    /// Maximum grid value over contributions.
    Max,
}

impl MapFunction {
    pub const ALL: &'static [Self] = &[
        Self::Mask,
        Self::Midpoint,
        Self::Mask2,
        Self::Ave,
        Self::Count,
        Self::Min,
        Self::Max,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mask => "mask",
            Self::Midpoint => "midpoint",
            Self::Mask2 => "mask2",
            Self::Ave => "ave",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|map| map.name()).collect()
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Mask => "mark every voxel touched by a surface node",
            Self::Midpoint => "sample the grid at each node's inner/outer midpoint",
            Self::Mask2 => "mark voxels along each inner/outer segment (see --m2-steps)",
            Self::Ave => "average grid value over node contributions",
            Self::Count => "count node contributions per voxel",
            Self::Min => "minimum grid value over node contributions",
            Self::Max => "maximum grid value over node contributions",
        }
    }

    /// True when the result is indexed by node rather than by voxel.
    #[must_use]
    pub const fn is_node_indexed(self) -> bool {
        matches!(self, Self::Midpoint)
    }

    /// Whether the function samples grid values (as opposed to geometry only).
    #[must_use]
    pub const fn reads_values(self) -> bool {
        matches!(self, Self::Midpoint | Self::Ave | Self::Min | Self::Max)
    }

    /// Whether the function needs an inner and an outer surface.
    #[must_use]
    pub const fn needs_pair(self) -> bool {
        matches!(self, Self::Midpoint | Self::Mask2)
    }

    /// Value every voxel holds before any contribution.
    #[must_use]
    pub const fn neutral_value(self) -> f64 {
        match self {
            Self::Min => f64::INFINITY,
            Self::Max => f64::NEG_INFINITY,
            Self::Mask | Self::Midpoint | Self::Mask2 | Self::Ave | Self::Count => 0.0,
        }
    }

    #[must_use]
    pub const fn default_datum(self) -> Datum {
        match self {
            Self::Mask | Self::Mask2 => Datum::Byte,
            Self::Count => Datum::Short,
            Self::Midpoint | Self::Ave | Self::Min | Self::Max => Datum::Float,
        }
    }

    /// Closest known name to an unrecognised one, if it is a plausible typo.
    fn suggest(name: &str) -> Option<&'static str> {
        Self::ALL
            .iter()
            .map(|map| (levenshtein::levenshtein(name, map.name()), map.name()))
            .filter(|(distance, _)| *distance <= 2)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate)
    }
}

impl fmt::Display for MapFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapFunction {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(ConfigurationError::MissingMapFunction);
        }
        match name.as_str() {
            "mask" => Ok(Self::Mask),
            "midpoint" | "midpt" => Ok(Self::Midpoint),
            "mask2" => Ok(Self::Mask2),
            "ave" => Ok(Self::Ave),
            "count" => Ok(Self::Count),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(ConfigurationError::UnknownMapFunction {
                suggestion: Self::suggest(&name),
                name,
            }),
        }
    }
}

use crate::geom::Point3;

use super::{ConfigurationError, MapFunction};

/// A surface as consumed by the mapping engine: node coordinates only.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Surface {
    pub label: String,
    pub nodes: Vec<Point3>,
    /// Whether the node coordinates may be mapped into the grid.
    #[serde(default = "default_mappable")]
    pub mappable: bool,
}

fn default_mappable() -> bool {
    true
}

impl Surface {
    #[must_use]
    pub fn new(label: impl Into<String>, nodes: Vec<Point3>) -> Self {
        Self {
            label: label.into(),
            nodes,
            mappable: true,
        }
    }

    #[must_use]
    pub fn unmappable(self) -> Self {
        Self {
            mappable: false,
            ..self
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Ordered collection of loaded surfaces.
#[derive(Debug, Clone, Default)]
pub struct SurfaceSet {
    surfaces: Vec<Surface>,
}

impl SurfaceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// The first `how_many` mappable surfaces, in load order.
    #[must_use]
    pub fn mappable(&self, how_many: usize) -> Vec<&Surface> {
        self.surfaces
            .iter()
            .filter(|surface| surface.mappable)
            .take(how_many)
            .collect()
    }

    /// Surfaces feeding the node list for `map`.
    ///
    /// Paired functions take exactly two mappable surfaces; the others take
    /// one or two, whichever is available.
    pub fn select_for(&self, map: MapFunction) -> Result<Vec<&Surface>, ConfigurationError> {
        let selected = self.mappable(2);
        let required = if map.needs_pair() { 2 } else { 1 };
        if selected.len() < required {
            return Err(ConfigurationError::TooFewSurfaces {
                map,
                required,
                available: selected.len(),
            });
        }
        Ok(selected)
    }
}

impl FromIterator<Surface> for SurfaceSet {
    fn from_iter<I: IntoIterator<Item = Surface>>(iter: I) -> Self {
        Self {
            surfaces: iter.into_iter().collect(),
        }
    }
}

//! Per-node depth columns built from one surface or an inner/outer pair.

use crate::geom::Point3;

use super::{ConfigurationError, GeometryError, Surface};

/// `depth x node_count` points, stored depth-major: level `d` of node `n`
/// lives at `d * node_count + n`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeList {
    points: Vec<Point3>,
    depth: usize,
    node_count: usize,
    labels: Vec<String>,
}

impl NodeList {
    /// Build the columns from one surface (depth 1) or an inner/outer pair
    /// (depth 2). Node `i` of the first surface pairs with node `i` of the
    /// second.
    pub fn build(surfaces: &[&Surface]) -> Result<Self, ConfigurationError> {
        let (first, rest) = match surfaces {
            [first, rest @ ..] if rest.len() <= 1 => (*first, rest),
            _ => {
                return Err(ConfigurationError::SurfaceCount {
                    count: surfaces.len(),
                });
            }
        };

        let node_count = first.node_count();
        if let Some(second) = rest.first() {
            if second.node_count() != node_count {
                return Err(ConfigurationError::NodeCountMismatch {
                    first: node_count,
                    second: second.node_count(),
                });
            }
        }
        if node_count == 0 {
            return Err(ConfigurationError::NoNodes);
        }

        let depth = surfaces.len();
        let mut points = Vec::with_capacity(depth * node_count);
        let mut labels = Vec::with_capacity(depth);
        for surface in surfaces {
            points.extend_from_slice(&surface.nodes);
            labels.push(surface.label.clone());
        }

        log::debug!("node list: depth {depth}, {node_count} nodes, labels {labels:?}");

        Ok(Self {
            points,
            depth,
            node_count,
            labels,
        })
    }

    /// Wrap pre-assembled depth-major points.
    pub fn from_raw(
        points: Vec<Point3>,
        depth: usize,
        node_count: usize,
        labels: Vec<String>,
    ) -> Result<Self, GeometryError> {
        let list = Self {
            points,
            depth,
            node_count,
            labels,
        };
        list.validate()?;
        Ok(list)
    }

    /// Check the column shape invariants.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.depth == 0 {
            return Err(GeometryError::ZeroDepth);
        }
        let expected = self.depth * self.node_count;
        if self.points.len() != expected {
            return Err(GeometryError::ColumnShape {
                depth: self.depth,
                node_count: self.node_count,
                expected,
                found: self.points.len(),
            });
        }
        if self.labels.len() != self.depth {
            return Err(GeometryError::LabelCount {
                depth: self.depth,
                labels: self.labels.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// All nodes at one depth level.
    #[must_use]
    pub fn level(&self, depth: usize) -> &[Point3] {
        let start = depth * self.node_count;
        &self.points[start..start + self.node_count]
    }

    #[must_use]
    pub fn point(&self, depth: usize, node: usize) -> Point3 {
        self.points[depth * self.node_count + node]
    }

    /// The points of one node, innermost first.
    pub fn column(&self, node: usize) -> impl Iterator<Item = Point3> + '_ {
        (0..self.depth).map(move |depth| self.point(depth, node))
    }

    /// Innermost and outermost point of a node.
    #[must_use]
    pub fn segment(&self, node: usize) -> (Point3, Point3) {
        (self.point(0, node), self.point(self.depth - 1, node))
    }
}

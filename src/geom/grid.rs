//! Regular voxel grid with an affine world-to-index mapping.
//!
//! Voxels are stored x-fastest: the flat index of `(i, j, k)` is
//! `i + nx * (j + ny * k)`. A grid may carry several value bricks (e.g. the
//! sub-bricks of a time series), all of length `nx * ny * nz`.

use std::fmt;

use super::{Point3, Transform};

/// Flat index of a voxel inside a [`VoxelGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct VoxelIndex(pub usize);

impl VoxelIndex {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VoxelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Errors raised while assembling a grid.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must all be positive, got {nx} x {ny} x {nz}")]
    EmptyDimensions { nx: usize, ny: usize, nz: usize },
    #[error("grid of {nx} x {ny} x {nz} voxels is too large to index")]
    TooLarge { nx: usize, ny: usize, nz: usize },
    #[error("index-to-world transform is singular")]
    SingularTransform,
    #[error("brick {brick} has {found} values, expected {expected}")]
    BrickLength {
        brick: usize,
        expected: usize,
        found: usize,
    },
}

/// A regular 3D grid of scalar values.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    label: String,
    dims: [usize; 3],
    nvox: usize,
    index_to_world: Transform,
    world_to_index: Transform,
    bricks: Vec<Vec<f64>>,
}

impl VoxelGrid {
    /// Create a grid with no value bricks.
    pub fn new(dims: [usize; 3], index_to_world: Transform) -> Result<Self, GridError> {
        let [nx, ny, nz] = dims;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::EmptyDimensions { nx, ny, nz });
        }
        let nvox = nx
            .checked_mul(ny)
            .and_then(|count| count.checked_mul(nz))
            .ok_or(GridError::TooLarge { nx, ny, nz })?;
        let world_to_index = index_to_world
            .inverse()
            .ok_or(GridError::SingularTransform)?;

        Ok(Self {
            label: String::new(),
            dims,
            nvox,
            index_to_world,
            world_to_index,
            bricks: Vec::new(),
        })
    }

    /// Grid whose world coordinates coincide with voxel indices.
    pub fn identity(dims: [usize; 3]) -> Result<Self, GridError> {
        Self::new(dims, Transform::identity())
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Append a value brick; its length must equal [`Self::nvox`].
    pub fn push_brick(&mut self, values: Vec<f64>) -> Result<(), GridError> {
        if values.len() != self.nvox() {
            return Err(GridError::BrickLength {
                brick: self.bricks.len(),
                expected: self.nvox(),
                found: values.len(),
            });
        }
        self.bricks.push(values);
        Ok(())
    }

    pub fn with_brick(mut self, values: Vec<f64>) -> Result<Self, GridError> {
        self.push_brick(values)?;
        Ok(self)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        self.dims
    }

    #[must_use]
    pub const fn nvox(&self) -> usize {
        self.nvox
    }

    #[must_use]
    pub fn brick_count(&self) -> usize {
        self.bricks.len()
    }

    #[must_use]
    pub fn brick(&self, brick: usize) -> Option<&[f64]> {
        self.bricks.get(brick).map(Vec::as_slice)
    }

    /// Value of `voxel` in `brick`. A grid without bricks reads as all zero.
    #[must_use]
    pub fn value(&self, brick: usize, voxel: VoxelIndex) -> f64 {
        self.bricks
            .get(brick)
            .and_then(|values| values.get(voxel.0))
            .copied()
            .unwrap_or(0.0)
    }

    /// Resolve a world-space point to the voxel containing it.
    ///
    /// Each index-space coordinate is rounded to the nearest integer (halves
    /// round up). Returns `None` when any axis falls outside `[0, dim)` or the
    /// point is not finite.
    #[must_use]
    pub fn resolve(&self, point: Point3) -> Option<VoxelIndex> {
        let ijk = self.resolve_ijk(point)?;
        Some(self.index_of(ijk))
    }

    /// Like [`Self::resolve`] but returns the integer triple.
    #[must_use]
    pub fn resolve_ijk(&self, point: Point3) -> Option<[usize; 3]> {
        let p = self.world_to_index.apply_point(point);
        let mut ijk = [0usize; 3];
        for (axis, coord) in [p.x, p.y, p.z].into_iter().enumerate() {
            let rounded = (coord + 0.5).floor();
            if !rounded.is_finite() || rounded < 0.0 || rounded >= self.dims[axis] as f64 {
                return None;
            }
            ijk[axis] = rounded as usize;
        }
        Some(ijk)
    }

    #[must_use]
    pub const fn index_of(&self, ijk: [usize; 3]) -> VoxelIndex {
        let [nx, ny, _] = self.dims;
        VoxelIndex(ijk[0] + nx * (ijk[1] + ny * ijk[2]))
    }

    #[must_use]
    pub const fn ijk(&self, voxel: VoxelIndex) -> [usize; 3] {
        let [nx, ny, _] = self.dims;
        let i = voxel.0 % nx;
        let j = (voxel.0 / nx) % ny;
        let k = voxel.0 / (nx * ny);
        [i, j, k]
    }

    /// World-space position of the voxel centre at `(i, j, k)`.
    #[must_use]
    pub fn world_at(&self, ijk: [usize; 3]) -> Point3 {
        self.index_to_world.apply_point(Point3::new(
            ijk[0] as f64,
            ijk[1] as f64,
            ijk[2] as f64,
        ))
    }
}

impl fmt::Display for VoxelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [nx, ny, nz] = self.dims;
        write!(
            f,
            "{nx} x {ny} x {nz} ({} voxels, {} bricks)",
            self.nvox(),
            self.bricks.len()
        )
    }
}

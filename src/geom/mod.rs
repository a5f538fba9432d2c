mod core;
mod grid;

pub use self::core::{Point3, Transform, Vec3};
pub use grid::{GridError, VoxelGrid, VoxelIndex};

#[cfg(test)]
mod tests;

mod test_config;

use crate::geom::{Point3, VoxelGrid, VoxelIndex};
use crate::smap::{Surface, VoxelValues};

fn surface(label: &str, points: &[[f64; 3]]) -> Surface {
    Surface::new(label, points.iter().copied().map(Point3::from_array).collect())
}

/// Identity-transform grid whose single brick holds each voxel's flat index.
fn ramp_grid(dims: [usize; 3]) -> VoxelGrid {
    let nvox = dims.iter().product::<usize>();
    VoxelGrid::identity(dims)
        .expect("grid")
        .with_brick((0..nvox).map(|v| v as f64).collect())
        .expect("brick")
}

fn touched(values: &VoxelValues) -> Vec<usize> {
    (0..values.len())
        .filter(|&v| values.touched(VoxelIndex(v)))
        .collect()
}

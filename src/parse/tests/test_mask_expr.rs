use crate::geom::VoxelGrid;
use crate::parse::{ParseError, mask_expr};

fn grid() -> VoxelGrid {
    VoxelGrid::identity([2, 2, 1])
        .expect("grid")
        .with_brick(vec![50.0, 150.0, 250.0, 0.0])
        .expect("brick")
}

#[test]
fn thresholds_on_the_brick_value() {
    let mask = mask_expr::compile_mask(&grid(), "step(a - 100)", 0).expect("mask");
    assert_eq!(mask.mask, vec![false, true, true, false]);
    assert_eq!(mask.active, 2);
}

#[test]
fn exposes_voxel_indices_and_coordinates() {
    let grid = grid();
    let by_index = mask_expr::compile_mask(&grid, "and(iszero(i), j)", 0).expect("mask");
    assert_eq!(by_index.mask, vec![false, false, true, false]);

    let by_position = mask_expr::compile_mask(&grid, "within(x + y, 1, 1)", 0).expect("mask");
    assert_eq!(by_position.mask, vec![false, true, true, false]);
}

#[test]
fn plain_arithmetic_is_truthy_when_non_zero() {
    let mask = mask_expr::compile_mask(&grid(), "a", 0).expect("mask");
    assert_eq!(mask.mask, vec![true, true, true, false]);
}

#[test]
fn rejects_bad_expressions() {
    assert!(matches!(
        mask_expr::compile_mask(&grid(), "  ", 0),
        Err(ParseError::MaskExpression(_))
    ));
    assert!(matches!(
        mask_expr::compile_mask(&grid(), "a +", 0),
        Err(ParseError::MaskExpression(_))
    ));
    assert!(matches!(
        mask_expr::compile_mask(&grid(), "q + 1", 0),
        Err(ParseError::MaskExpression(_))
    ));
}

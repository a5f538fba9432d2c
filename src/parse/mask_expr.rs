//! Voxel inclusion masks from 3dcalc-style expressions.
//!
//! The expression is evaluated once per voxel with these variables:
//! `a` (grid value in the selected brick), `i`, `j`, `k` (voxel indices) and
//! `x`, `y`, `z` (world position of the voxel centre). A non-zero result
//! includes the voxel.

use meval::{Context, ContextProvider, Expr};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{ParseError, ParseResult};
use crate::geom::{VoxelGrid, VoxelIndex};

/// A computed inclusion mask.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelMask {
    pub mask: Vec<bool>,
    /// Number of voxels set in `mask`.
    pub active: usize,
}

/// Evaluate `expression` over every voxel of `grid`, reading brick `brick`.
pub fn compile_mask(grid: &VoxelGrid, expression: &str, brick: usize) -> ParseResult<VoxelMask> {
    let normalized = expression.trim();
    if normalized.is_empty() {
        return Err(ParseError::MaskExpression("empty expression".to_owned()));
    }
    let expr: Expr = normalized
        .parse()
        .map_err(|error: meval::Error| ParseError::MaskExpression(error.to_string()))?;
    let evaluate = |context: &Context<'static>, voxel: usize| -> ParseResult<bool> {
        let variables = VoxelVariables::new(grid, VoxelIndex(voxel), brick);
        expr.eval_with_context((&variables, context))
            .map(|value| value != 0.0)
            .map_err(|error| ParseError::MaskExpression(error.to_string()))
    };

    // meval contexts are not thread-safe, so each rayon worker builds its own
    #[cfg(feature = "parallel")]
    let mask = (0..grid.nvox())
        .into_par_iter()
        .map_init(build_context, |context, voxel| evaluate(context, voxel))
        .collect::<ParseResult<Vec<bool>>>()?;
    #[cfg(not(feature = "parallel"))]
    let mask = {
        let context = build_context();
        (0..grid.nvox())
            .map(|voxel| evaluate(&context, voxel))
            .collect::<ParseResult<Vec<bool>>>()?
    };

    let active = mask.iter().filter(|&&set| set).count();
    log::debug!("mask `{normalized}`: {active} of {} voxels", grid.nvox());
    Ok(VoxelMask { mask, active })
}

struct VoxelVariables {
    a: f64,
    ijk: [f64; 3],
    xyz: [f64; 3],
}

impl VoxelVariables {
    fn new(grid: &VoxelGrid, voxel: VoxelIndex, brick: usize) -> Self {
        let ijk = grid.ijk(voxel);
        let world = grid.world_at(ijk);
        Self {
            a: grid.value(brick, voxel),
            ijk: ijk.map(|index| index as f64),
            xyz: world.to_array(),
        }
    }
}

impl ContextProvider for VoxelVariables {
    fn get_var(&self, name: &str) -> Option<f64> {
        match name {
            "a" => Some(self.a),
            "i" => Some(self.ijk[0]),
            "j" => Some(self.ijk[1]),
            "k" => Some(self.ijk[2]),
            "x" => Some(self.xyz[0]),
            "y" => Some(self.xyz[1]),
            "z" => Some(self.xyz[2]),
            _ => None,
        }
    }
}

fn build_context() -> Context<'static> {
    let mut context = Context::new();
    context.func("step", |value| flag(value > 0.0));
    context.func("ispositive", |value| flag(value > 0.0));
    context.func("isnegative", |value| flag(value < 0.0));
    context.func("iszero", |value| flag(value == 0.0));
    context.func("notzero", |value| flag(value != 0.0));
    context.func("bool", |value| flag(value != 0.0));
    context.func("not", |value| flag(value == 0.0));
    context.func2("and", |a, b| flag(a != 0.0 && b != 0.0));
    context.func2("or", |a, b| flag(a != 0.0 || b != 0.0));
    context.func3("within", |value, lo, hi| flag(value >= lo && value <= hi));
    context
}

fn flag(state: bool) -> f64 {
    if state { 1.0 } else { 0.0 }
}

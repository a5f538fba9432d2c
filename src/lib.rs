#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Map triangulated surfaces (or inner/outer surface pairs) into a voxel grid.
//!
//! The pipeline is: surfaces → [`smap::NodeList`] → [`smap::apply_map`] →
//! [`output::write_output`]. Grids, surfaces and masks can be loaded with the
//! adapters in [`parse`], or assembled directly.

pub mod geom;
pub mod output;
pub mod parse;
pub mod smap;

use std::fmt;

use geom::{GridError, Point3, Transform, Vec3, VoxelGrid};
use parse::ParseError;
use serde::Deserialize;
use smap::{
    ConfigurationError, MapError, MapFunction, MapOutput, Params, SmapOptions, Surface,
    SurfaceSet,
};
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// A complete mapping job: grid, surfaces and options in one document.
#[derive(Debug, Clone, Deserialize)]
pub struct MapRequest {
    pub dims: [usize; 3],
    /// World position of voxel (0, 0, 0).
    #[serde(default)]
    pub origin: Option<[f64; 3]>,
    #[serde(default)]
    pub spacing: Option<[f64; 3]>,
    /// Upper three rows of the index-to-world matrix; overrides origin/spacing.
    #[serde(default)]
    pub affine: Option<[[f64; 4]; 3]>,
    /// Value bricks, each of `nx * ny * nz` values.
    #[serde(default)]
    pub values: Vec<Vec<f64>>,
    pub surfaces: Vec<Surface>,
    pub map: String,
    #[serde(default)]
    pub mask_expr: Option<String>,
    #[serde(default)]
    pub m2_steps: Option<i64>,
    #[serde(default)]
    pub brick: usize,
    #[serde(default)]
    pub debug: u8,
    #[serde(default)]
    pub debug_node: Option<usize>,
}

impl MapRequest {
    fn grid(&self) -> Result<VoxelGrid, GridError> {
        let index_to_world = match self.affine {
            Some(rows) => Transform::from_rows(rows),
            None => {
                let origin = Point3::from_array(self.origin.unwrap_or([0.0; 3]));
                let [dx, dy, dz] = self.spacing.unwrap_or([1.0; 3]);
                Transform::axis_aligned(origin, Vec3::new(dx, dy, dz))
            }
        };
        let mut grid = VoxelGrid::new(self.dims, index_to_world)?;
        for brick in &self.values {
            grid.push_brick(brick.clone())?;
        }
        Ok(grid)
    }

    fn options(&self) -> Result<SmapOptions, ConfigurationError> {
        let map: MapFunction = self.map.parse()?;
        let mut opts = SmapOptions::new(map).with_debug(self.debug);
        if let Some(steps) = self.m2_steps {
            opts.m2_steps = smap::parse_steps(steps)?;
        }
        opts.brick = self.brick;
        opts.debug_node = self.debug_node;
        opts.validate()?;
        Ok(opts)
    }
}

/// Errors raised while running a [`MapRequest`].
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Map(#[from] MapError),
}

impl From<ConfigurationError> for RequestError {
    fn from(err: ConfigurationError) -> Self {
        Self::Map(err.into())
    }
}

/// Run a mapping job end to end.
pub fn map_request(request: &MapRequest) -> Result<MapOutput, RequestError> {
    let opts = request.options()?;
    let grid = request.grid()?;
    if request.mask_expr.is_some() {
        opts.check_brick(&grid)?;
    }
    let mask = request
        .mask_expr
        .as_deref()
        .map(|expression| parse::mask_expr::compile_mask(&grid, expression, opts.brick))
        .transpose()?;
    let params = Params::new(&grid, mask.as_ref().map(|mask| mask.mask.as_slice()))?;
    let surfaces: SurfaceSet = request.surfaces.iter().cloned().collect();

    debug_log!("surf2vol request: map {} on grid {}", opts.map, grid);
    let (_, output) = smap::map_surfaces(&opts, &params, &grid, &surfaces)?;
    Ok(output)
}

/// JavaScript entry point: takes a serialized [`MapRequest`] and returns the
/// serialized [`MapOutput`].
#[wasm_bindgen]
pub fn surf2vol(request: JsValue) -> Result<JsValue, JsValue> {
    let request: MapRequest = serde_wasm_bindgen::from_value(request).map_err(to_js_error)?;
    let output = map_request(&request).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&output).map_err(to_js_error)
}

/// Names of the available mapping functions.
#[wasm_bindgen]
pub fn map_functions() -> Vec<String> {
    MapFunction::names().into_iter().map(str::to_owned).collect()
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

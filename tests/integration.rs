use surf2vol_engine::geom::{Point3, VoxelGrid, VoxelIndex};
use surf2vol_engine::output::write_output;
use surf2vol_engine::parse::{grid_xml, surface_asc};
use surf2vol_engine::smap::{
    ConfigurationError, MapError, MapFunction, MapOutput, NodeList, Params, SmapOptions, Surface,
    SurfaceSet, map_surfaces,
};
use surf2vol_engine::{MapRequest, RequestError, map_request};

const GRID_XML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/ramp_4x4x2.xml"));
const WHITE_ASC: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/lh.white.asc"));
const PIAL_ASC: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/lh.pial.asc"));

fn load_fixture() -> (VoxelGrid, SurfaceSet) {
    let grid = grid_xml::parse_str(GRID_XML).expect("grid");
    let white = surface_asc::parse_nodes(WHITE_ASC).expect("white");
    let pial = surface_asc::parse_nodes(PIAL_ASC).expect("pial");
    let surfaces = [Surface::new("lh.white", white), Surface::new("lh.pial", pial)]
        .into_iter()
        .collect();
    (grid, surfaces)
}

fn render(
    opts: &SmapOptions,
    params: &Params<'_>,
    grid: &VoxelGrid,
    nodes: &NodeList,
    output: &MapOutput,
) -> (String, usize) {
    let mut buffer = Vec::new();
    let rows = write_output(&mut buffer, opts, params, grid, nodes, output).expect("write");
    (String::from_utf8(buffer).expect("utf8"), rows)
}

fn request(map: &str, surfaces: Vec<Surface>) -> MapRequest {
    MapRequest {
        dims: [2, 2, 2],
        origin: None,
        spacing: None,
        affine: None,
        values: vec![(0..8u8).map(f64::from).collect()],
        surfaces,
        map: map.to_owned(),
        mask_expr: None,
        m2_steps: None,
        brick: 0,
        debug: 0,
        debug_node: None,
    }
}

#[test]
fn mask2_from_files_writes_one_row_per_touched_voxel() {
    let (grid, surfaces) = load_fixture();
    let opts = SmapOptions::with_steps(2);
    let params = Params::new(&grid, None).expect("params");
    let (nodes, output) = map_surfaces(&opts, &params, &grid, &surfaces).expect("map");

    let (text, rows) = render(&opts, &params, &grid, &nodes, &output);
    let mut lines = text.lines();

    assert_eq!(
        lines.next(),
        Some("# surf2vol: mask2 (mark voxels along each inner/outer segment (see --m2-steps))")
    );
    assert!(text.contains("# surfaces : lh.white lh.pial"));
    assert!(text.contains("# grid     : ramp (4 x 4 x 2)"));

    let data: Vec<&str> = text.lines().filter(|line| !line.starts_with('#')).collect();
    assert_eq!(rows, 5);
    assert_eq!(data.len(), rows);
    assert_eq!(data[0], "         0    0    0    0  1");
    let voxels: Vec<usize> = data
        .iter()
        .map(|line| line.split_whitespace().next().and_then(|v| v.parse().ok()).expect("voxel"))
        .collect();
    assert_eq!(voxels, vec![0, 9, 13, 16, 31]);
}

#[test]
fn midpoint_from_files_writes_one_row_per_node() {
    let (grid, surfaces) = load_fixture();
    let mut opts = SmapOptions::new(MapFunction::Midpoint);
    opts.no_head = true;
    let params = Params::new(&grid, None).expect("params");
    let (nodes, output) = map_surfaces(&opts, &params, &grid, &surfaces).expect("map");

    let (text, rows) = render(&opts, &params, &grid, &nodes, &output);

    assert_eq!(rows, nodes.node_count());
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec![
            "         0       16    0    0    1  16.000000",
            "         1        9    1    2    0  9.000000",
            "         2       31    3    3    1  31.000000",
        ]
    );
}

#[test]
fn unresolved_midpoints_are_written_as_minus_one() {
    let grid = VoxelGrid::identity([2, 2, 2]).expect("grid");
    let surfaces: SurfaceSet = [
        Surface::new("white", vec![Point3::new(5.0, 5.0, 5.0)]),
        Surface::new("pial", vec![Point3::new(7.0, 5.0, 5.0)]),
    ]
    .into_iter()
    .collect();
    let mut opts = SmapOptions::new(MapFunction::Midpoint);
    opts.no_head = true;
    let params = Params::new(&grid, None).expect("params");
    let (nodes, output) = map_surfaces(&opts, &params, &grid, &surfaces).expect("map");

    let (text, _) = render(&opts, &params, &grid, &nodes, &output);
    assert_eq!(text, "         0       -1   -1   -1   -1  0.000000\n");
}

#[test]
fn masked_voxels_are_left_out_of_the_rows() {
    let (grid, surfaces) = load_fixture();
    let cmask: Vec<bool> = (0..grid.nvox()).map(|v| v >= 10).collect();
    let mut opts = SmapOptions::new(MapFunction::Count);
    opts.no_head = true;
    let params = Params::new(&grid, Some(cmask.as_slice())).expect("params");
    let (nodes, output) = map_surfaces(&opts, &params, &grid, &surfaces).expect("map");

    let (text, rows) = render(&opts, &params, &grid, &nodes, &output);

    // every active voxel gets a row, touched or not
    assert_eq!(rows, params.active_count());
    assert_eq!(rows, 22);
    assert!(text.lines().all(|line| {
        line.split_whitespace()
            .next()
            .and_then(|v| v.parse::<usize>().ok())
            .is_some_and(|v| v >= 10)
    }));
    assert!(text.contains("        31    3    3    1  2\n"));
}

#[test]
fn request_runs_midpoint_end_to_end() {
    let collapsed = vec![Point3::new(1.0, 0.0, 1.0)];
    let output = map_request(&request(
        "midpt",
        vec![Surface::new("white", collapsed.clone()), Surface::new("pial", collapsed)],
    ))
    .expect("request");

    let values = output.node_values().expect("node indexed");
    assert_eq!(values.len(), 1);
    assert_eq!(values.entries()[0].voxel, Some(VoxelIndex(5)));
    assert_eq!(values.entries()[0].value, 5.0);
}

#[test]
fn request_applies_mask_expression() {
    let nodes = (0..8u8)
        .map(|v| Point3::new(f64::from(v % 2), f64::from((v / 2) % 2), f64::from(v / 4)))
        .collect();
    let mut req = request("count", vec![Surface::new("white", nodes)]);
    req.mask_expr = Some("step(a - 5)".to_owned());

    let output = map_request(&req).expect("request");
    let values = output.voxel_values().expect("voxel indexed");

    assert_eq!(values.values(), &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    assert_eq!(output.diagnostics().points_masked_out, 6);
}

#[test]
fn request_reports_configuration_errors() {
    let white = Surface::new("white", vec![Point3::ORIGIN]);

    let err = map_request(&request("maks", vec![white.clone()])).expect_err("unknown map");
    assert!(matches!(
        err,
        RequestError::Map(MapError::Configuration(ConfigurationError::UnknownMapFunction {
            suggestion: Some("mask"),
            ..
        }))
    ));

    let mut req = request("mask2", vec![white.clone(), white]);
    req.m2_steps = Some(-1);
    let err = map_request(&req).expect_err("steps");
    assert!(matches!(
        err,
        RequestError::Map(MapError::Configuration(ConfigurationError::NonPositiveSteps { steps: -1 }))
    ));
}

#[test]
fn lists_every_map_function() {
    assert_eq!(
        surf2vol_engine::map_functions(),
        vec!["mask", "midpoint", "mask2", "ave", "count", "min", "max"]
    );
}

#[test]
fn request_checks_the_brick_before_evaluating_a_mask() {
    let white = Surface::new("white", vec![Point3::ORIGIN]);
    let mut req = request("count", vec![white]);
    req.mask_expr = Some("step(a - 5)".to_owned());
    req.brick = 1;

    let err = map_request(&req).expect_err("brick");
    assert!(matches!(
        err,
        RequestError::Map(MapError::Configuration(ConfigurationError::BrickOutOfRange {
            brick: 1,
            available: 1
        }))
    ));

    // without a mask expression, count never reads the brick
    req.mask_expr = None;
    assert!(map_request(&req).is_ok());
}

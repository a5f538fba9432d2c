use super::{ramp_grid, surface};
use crate::geom::VoxelGrid;
use crate::smap::{
    ConfigurationError, DEBUG_MAX_LEVEL, Datum, MAX_M2_STEPS, MapError, MapFunction, NodeList,
    Params, SmapOptions, apply_map, parse_steps,
};

#[test]
fn map_names_parse_case_insensitively() {
    assert_eq!("MASK".parse::<MapFunction>(), Ok(MapFunction::Mask));
    assert_eq!("midpt".parse::<MapFunction>(), Ok(MapFunction::Midpoint));
    assert_eq!(" Midpoint ".parse::<MapFunction>(), Ok(MapFunction::Midpoint));
    for map in MapFunction::ALL {
        assert_eq!(map.name().parse::<MapFunction>(), Ok(*map));
    }
}

#[test]
fn missing_map_name_is_reported() {
    assert_eq!("".parse::<MapFunction>(), Err(ConfigurationError::MissingMapFunction));
    assert_eq!("   ".parse::<MapFunction>(), Err(ConfigurationError::MissingMapFunction));
}

#[test]
fn unknown_map_name_suggests_a_close_match() {
    let err = "avg".parse::<MapFunction>().expect_err("unknown");
    assert_eq!(
        err,
        ConfigurationError::UnknownMapFunction {
            name: "avg".to_owned(),
            suggestion: Some("ave")
        }
    );
    assert!(err.to_string().contains("did you mean `ave`"));

    let err = "volume".parse::<MapFunction>().expect_err("unknown");
    assert!(matches!(
        err,
        ConfigurationError::UnknownMapFunction { suggestion: None, .. }
    ));
}

#[test]
fn default_datum_follows_the_function() {
    assert_eq!(SmapOptions::new(MapFunction::Mask).datum, Datum::Byte);
    assert_eq!(SmapOptions::new(MapFunction::Count).datum, Datum::Short);
    assert_eq!(SmapOptions::new(MapFunction::Ave).datum, Datum::Float);
}

#[test]
fn datum_formats_and_clamps() {
    assert_eq!(Datum::Byte.format(300.0), "255");
    assert_eq!(Datum::Byte.format(-4.0), "0");
    assert_eq!(Datum::Short.format(-1.6), "-2");
    assert_eq!(Datum::Float.format(0.5), "0.500000");
    assert_eq!("Float".parse::<Datum>(), Ok(Datum::Float));
    assert!("double".parse::<Datum>().is_err());
}

#[test]
fn step_counts_must_be_positive() {
    assert_eq!(parse_steps(4), Ok(4));
    assert_eq!(parse_steps(0), Err(ConfigurationError::NonPositiveSteps { steps: 0 }));
    assert_eq!(parse_steps(-3), Err(ConfigurationError::NonPositiveSteps { steps: -3 }));
}

#[test]
fn debug_level_is_bounded() {
    let opts = SmapOptions::default().with_debug(DEBUG_MAX_LEVEL + 1);
    assert_eq!(
        opts.validate(),
        Err(ConfigurationError::DebugLevel {
            level: DEBUG_MAX_LEVEL + 1,
            max: DEBUG_MAX_LEVEL
        })
    );
    assert!(SmapOptions::default().with_debug(DEBUG_MAX_LEVEL).validate().is_ok());
}

#[test]
fn debug_node_must_exist() {
    let grid = ramp_grid([2, 2, 2]);
    let white = surface("white", &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let nodes = NodeList::build(&[&white]).expect("node list");
    let params = Params::new(&grid, None).expect("params");

    let mut opts = SmapOptions::default().with_debug(3);
    opts.debug_node = Some(2);
    assert_eq!(
        apply_map(&opts, &params, &grid, &nodes),
        Err(MapError::Configuration(ConfigurationError::DebugNode {
            node: 2,
            node_count: 2
        }))
    );

    opts.debug_node = Some(1);
    assert!(apply_map(&opts, &params, &grid, &nodes).is_ok());
}

#[test]
fn params_count_active_voxels() {
    let grid = ramp_grid([2, 2, 1]);
    let cmask = [true, false, true, false];
    let params = Params::new(&grid, Some(&cmask[..])).expect("params");

    assert_eq!(params.nvox(), 4);
    assert_eq!(params.active_count(), 2);
    assert_eq!(
        params.active_voxels().map(|v| v.get()).collect::<Vec<_>>(),
        vec![0, 2]
    );

    let unmasked = Params::new(&grid, None).expect("params");
    assert_eq!(unmasked.active_count(), 4);
}

#[test]
fn mask_length_must_match_the_grid() {
    let grid = ramp_grid([2, 2, 1]);
    let err = Params::new(&grid, Some(&[true; 3][..])).expect_err("length");
    assert_eq!(err, ConfigurationError::MaskLength { expected: 4, found: 3 });
}

#[test]
fn params_from_another_grid_are_rejected() {
    let small = VoxelGrid::identity([2, 2, 2]).expect("grid");
    let large = VoxelGrid::identity([3, 3, 3]).expect("grid");
    let white = surface("white", &[[0.0, 0.0, 0.0]]);
    let nodes = NodeList::build(&[&white]).expect("node list");
    let params = Params::new(&small, None).expect("params");

    let err = apply_map(&SmapOptions::default(), &params, &large, &nodes).expect_err("mismatch");
    assert_eq!(
        err,
        MapError::Configuration(ConfigurationError::GridMismatch {
            expected: 27,
            found: 8
        })
    );
}

#[test]
fn options_display_lists_every_field() {
    let text = SmapOptions::with_steps(5).to_string();
    assert!(text.contains("map        : mask2"));
    assert!(text.contains("m2_steps   : 5"));
    assert!(text.contains("debug node : none"));
}

#[test]
fn step_counts_are_bounded() {
    let steps = parse_steps(4_000_000_000).expect("fits u32");
    let mut opts = SmapOptions::new(MapFunction::Mask2);
    opts.m2_steps = steps;
    assert_eq!(
        opts.validate(),
        Err(ConfigurationError::TooManySteps {
            steps,
            max: MAX_M2_STEPS
        })
    );
    assert!(SmapOptions::with_steps(MAX_M2_STEPS).validate().is_ok());

    // only mask2 samples sub-steps
    opts.map = MapFunction::Mask;
    assert!(opts.validate().is_ok());
}

#[test]
fn brick_index_is_checked_against_the_grid() {
    let grid = ramp_grid([2, 2, 1]);
    let mut opts = SmapOptions::new(MapFunction::Count);
    assert!(opts.check_brick(&grid).is_ok());

    opts.brick = 1;
    assert_eq!(
        opts.check_brick(&grid),
        Err(ConfigurationError::BrickOutOfRange {
            brick: 1,
            available: 1
        })
    );

    let bare = VoxelGrid::identity([2, 2, 1]).expect("grid");
    assert!(opts.check_brick(&bare).is_ok());
}

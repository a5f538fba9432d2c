use crate::geom::Point3;
use crate::parse::{ParseError, surface_asc};

#[test]
fn reads_freesurfer_ascii_vertices() {
    let text = "#!ascii version of lh.white\n\
                3 1\n\
                0.0 1.0 2.0 0\n\
                -1.5 0.5 3.25 0\n\
                4.0 4.0 4.0 0\n\
                0 1 2 0\n";
    let nodes = surface_asc::parse_nodes(text).expect("nodes");

    assert_eq!(
        nodes,
        vec![
            Point3::new(0.0, 1.0, 2.0),
            Point3::new(-1.5, 0.5, 3.25),
            Point3::new(4.0, 4.0, 4.0),
        ]
    );
}

#[test]
fn reads_plain_node_lists_with_comments() {
    let text = "# white matter\n1 2 3\n\n4 5 6 # trailing note\n";
    let nodes = surface_asc::parse_nodes(text).expect("nodes");
    assert_eq!(nodes, vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)]);
}

#[test]
fn truncated_freesurfer_file_is_an_error() {
    let text = "#!ascii\n3 1\n0 0 0 0\n";
    let err = surface_asc::parse_nodes(text).expect_err("truncated");
    assert!(matches!(err, ParseError::Surface { .. }));
    assert!(err.to_string().contains("expected 3 vertices, found 1"));
}

#[test]
fn short_rows_report_their_line() {
    let err = surface_asc::parse_nodes("1 2 3\n4 5\n").expect_err("short row");
    assert!(matches!(err, ParseError::Surface { line: 2, .. }));
}

#[test]
fn huge_vertex_count_is_an_error() {
    let text = format!("#!ascii\n{} 0\n0 0 0 0\n", usize::MAX);
    let err = surface_asc::parse_nodes(&text).expect_err("count exceeds rows");
    assert!(matches!(err, ParseError::Surface { line: 2, .. }));
    assert!(err.to_string().contains("found 1"));
}

/// Roundtrip-Tests: Import -> Export -> Re-Import
use splinekit::{parse_svg_document, write_svg_document, SplinePath, SvgExportOptions};

fn assert_positions_close(a: &SplinePath, b: &SplinePath) {
    assert_eq!(a.points.len(), b.points.len(), "Punktzahl weicht ab");
    for (left, right) in a.points.iter().zip(&b.points) {
        let delta = (left.position - right.position).length();
        assert!(
            delta < 1e-3,
            "Position weicht ab: {:?} vs {:?}",
            left.position,
            right.position
        );
    }
}

#[test]
fn test_roundtrip_preserves_shape_count() {
    let svg_content = include_str!("fixtures/shapes.svg");

    let parsed = parse_svg_document(svg_content).expect("Initiales Parsing fehlgeschlagen");
    let written = write_svg_document(parsed.all(), &SvgExportOptions::default());
    let reparsed = parse_svg_document(&written).expect("Re-Parsing fehlgeschlagen");

    assert_eq!(reparsed.len(), parsed.len());
    // Grundformen werden generisch zurückgeschrieben: Bezier als <path>,
    // lineare Pfade als <polygon>/<polyline>
    assert_eq!(reparsed.paths.len(), 4);
    assert_eq!(reparsed.polygons.len(), 5);
    assert_eq!(reparsed.rectangles.len(), 0);
    assert_eq!(reparsed.ellipses.len(), 0);
    assert_eq!(reparsed.lines.len(), 0);
}

#[test]
fn test_roundtrip_preserves_geometry() {
    let svg_content = include_str!("fixtures/shapes.svg");

    let parsed = parse_svg_document(svg_content).expect("Initiales Parsing fehlgeschlagen");
    let written = write_svg_document(parsed.all(), &SvgExportOptions::default());
    let reparsed = parse_svg_document(&written).expect("Re-Parsing fehlgeschlagen");

    let kasten_vorher = &parsed.rectangles[0];
    let kasten_nachher = reparsed
        .polygons
        .iter()
        .find(|path| path.name == "kasten")
        .expect("kasten fehlt nach dem Roundtrip");
    assert!(kasten_nachher.closed);
    assert_positions_close(kasten_vorher, kasten_nachher);

    let punkt_vorher = &parsed.ellipses[0];
    let punkt_nachher = reparsed
        .paths
        .iter()
        .find(|path| path.name == "punkt")
        .expect("punkt fehlt nach dem Roundtrip");
    assert!(punkt_nachher.closed);
    assert_positions_close(punkt_vorher, punkt_nachher);

    let herz_vorher = &parsed.paths[0];
    let herz_nachher = reparsed
        .paths
        .iter()
        .find(|path| path.name == "herz")
        .expect("herz fehlt nach dem Roundtrip");
    assert_positions_close(herz_vorher, herz_nachher);
}

#[test]
fn test_roundtrip_keeps_names() {
    let svg_content = include_str!("fixtures/shapes.svg");

    let parsed = parse_svg_document(svg_content).expect("Initiales Parsing fehlgeschlagen");
    let written = write_svg_document(parsed.all(), &SvgExportOptions::default());
    let reparsed = parse_svg_document(&written).expect("Re-Parsing fehlgeschlagen");

    let mut names_vorher: Vec<&str> = parsed.all().map(|p| p.name.as_str()).collect();
    let mut names_nachher: Vec<&str> = reparsed.all().map(|p| p.name.as_str()).collect();
    names_vorher.sort_unstable();
    names_nachher.sort_unstable();
    assert_eq!(names_vorher, names_nachher);
}

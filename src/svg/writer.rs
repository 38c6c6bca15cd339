//! Writer für SVG-Dokumente.

use std::path::Path;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};

use crate::core::{ControlPoint, PathType, SplinePath};
use crate::shared::{Axis, SvgExportOptions};

/// Schreibt Spline-Pfade als SVG-String.
///
/// Bezier-Pfade werden zu `<path>`, geschlossene lineare Pfade zu
/// `<polygon>`, offene lineare Pfade zu `<polyline>`. Die `viewBox`
/// umschließt alle projizierten Punkte einschließlich der Handles.
pub fn write_svg_document<'a, I>(paths: I, options: &SvgExportOptions) -> String
where
    I: IntoIterator<Item = &'a SplinePath>,
{
    let paths: Vec<&SplinePath> = paths.into_iter().collect();
    let (min, max) = bounds(&paths, options.axis);

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n");
    output.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n",
        format_float(min.x, options.precision),
        format_float(min.y, options.precision),
        format_float(max.x - min.x, options.precision),
        format_float(max.y - min.y, options.precision),
    ));

    for path in paths {
        if path.points.len() < 2 {
            continue;
        }
        match path.path_type {
            PathType::Bezier => {
                output.push_str(&format!(
                    "    <path id=\"{}\" d=\"{}\"/>\n",
                    escape_xml(&path.name),
                    path_data(path, options)
                ));
            }
            PathType::Linear => {
                if path.closed {
                    // Abschlussduplikat nicht ausschreiben, Z übernimmt das
                    let coords = &path.points[..path.points.len() - 1];
                    output.push_str(&format!(
                        "    <polygon id=\"{}\" points=\"{}\"/>\n",
                        escape_xml(&path.name),
                        point_list(coords, options)
                    ));
                } else {
                    output.push_str(&format!(
                        "    <polyline id=\"{}\" points=\"{}\"/>\n",
                        escape_xml(&path.name),
                        point_list(&path.points, options)
                    ));
                }
            }
        }
    }

    output.push_str("</svg>\n");
    output
}

/// Schreibt Spline-Pfade als SVG-Datei.
pub fn save_svg_document<'a, I>(
    path: impl AsRef<Path>,
    paths: I,
    options: &SvgExportOptions,
) -> Result<()>
where
    I: IntoIterator<Item = &'a SplinePath>,
{
    let path = path.as_ref();
    let content = write_svg_document(paths, options);
    std::fs::write(path, content)
        .with_context(|| format!("Konnte SVG-Datei nicht schreiben: {}", path.display()))?;
    log::info!("SVG gespeichert nach: {}", path.display());
    Ok(())
}

/// Projiziert einen 3D-Punkt auf die Exportebene.
fn project(position: Vec3, axis: Axis) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(position.z, -position.y),
        Axis::Y => Vec2::new(position.x, position.z),
        Axis::Z => Vec2::new(position.x, -position.y),
    }
}

/// Umschließendes Rechteck aller projizierten Punkte und Handles.
fn bounds(paths: &[&SplinePath], axis: Axis) -> (Vec2, Vec2) {
    let mut min = Vec2::splat(f32::MAX);
    let mut max = Vec2::splat(f32::MIN);
    let mut any = false;

    for path in paths {
        for point in &path.points {
            for vector in [point.position, point.tangent_in, point.tangent_out] {
                let projected = project(vector, axis);
                min = min.min(projected);
                max = max.max(projected);
                any = true;
            }
        }
    }

    if any {
        (min, max)
    } else {
        (Vec2::ZERO, Vec2::ZERO)
    }
}

/// `d`-Attribut eines Bezier-Pfads: ein `M`, pro Folgepunkt ein `C`.
/// Beim geschlossenen Pfad schreibt das Abschlussduplikat sein eigenes
/// Segment, erst danach folgt `Z`.
fn path_data(path: &SplinePath, options: &SvgExportOptions) -> String {
    let mut d = String::new();
    if let Some(first) = path.points.first() {
        d.push_str("M ");
        d.push_str(&format_point(project(first.position, options.axis), options.precision));
    }
    for window in path.points.windows(2) {
        let c1 = project(window[0].tangent_out, options.axis);
        let c2 = project(window[1].tangent_in, options.axis);
        let end = project(window[1].position, options.axis);
        d.push_str(&format!(
            " C {} {} {}",
            format_point(c1, options.precision),
            format_point(c2, options.precision),
            format_point(end, options.precision)
        ));
    }
    if path.closed {
        d.push_str(" Z");
    }
    d
}

fn point_list(points: &[ControlPoint], options: &SvgExportOptions) -> String {
    points
        .iter()
        .map(|point| format_point(project(point.position, options.axis), options.precision))
        .collect::<Vec<String>>()
        .join(" ")
}

fn format_point(point: Vec2, precision: usize) -> String {
    format!(
        "{},{}",
        format_float(point.x, precision),
        format_float(point.y, precision)
    )
}

fn format_float(value: f32, precision: usize) -> String {
    format!("{:.prec$}", value, prec = precision)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_path(name: &str, positions: &[(f32, f32)], closed: bool) -> SplinePath {
        let mut path = SplinePath::new(name, PathType::Linear);
        for &(x, y) in positions {
            path.points.push(ControlPoint::linear(Vec3::new(x, y, 0.0)));
        }
        path.closed = closed;
        path
    }

    #[test]
    fn test_format_float_precision() {
        assert_eq!(format_float(123.456_79, 3), "123.457");
        assert_eq!(format_float(100.0, 3), "100.000");
        assert_eq!(format_float(-50.123_456, 1), "-50.1");
    }

    #[test]
    fn open_linear_path_becomes_a_polyline() {
        let path = linear_path("strecke", &[(0.0, 0.0), (10.0, 0.0)], false);
        let svg = write_svg_document([&path], &SvgExportOptions::default());
        assert!(svg.contains("<polyline id=\"strecke\" points=\"0.000,-0.000 10.000,-0.000\"/>"));
    }

    #[test]
    fn closed_linear_path_drops_the_duplicate() {
        // Engine-Raum: Duplikat des ersten Punkts am Ende
        let path = linear_path(
            "dreieck",
            &[(0.0, 0.0), (10.0, 0.0), (10.0, -10.0), (0.0, 0.0)],
            true,
        );
        let svg = write_svg_document([&path], &SvgExportOptions::default());
        assert!(svg.contains("<polygon id=\"dreieck\""));
        assert!(svg.contains("points=\"0.000,-0.000 10.000,-0.000 10.000,10.000\""));
    }

    #[test]
    fn bezier_path_writes_cubic_segments() {
        let mut path = SplinePath::new("kurve", PathType::Bezier);
        path.points.push(ControlPoint::broken(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        ));
        path.points.push(ControlPoint::broken(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ));
        let svg = write_svg_document([&path], &SvgExportOptions::default());
        assert!(svg.contains(
            "d=\"M 0.000,-0.000 C 0.000,-1.000 2.000,-1.000 2.000,-0.000\""
        ));
    }

    #[test]
    fn closed_bezier_path_ends_with_z() {
        let mut path = SplinePath::new("ring", PathType::Bezier);
        for &(x, y) in &[(0.0, 0.0), (4.0, 0.0), (0.0, 0.0)] {
            path.points
                .push(ControlPoint::linear(Vec3::new(x, y, 0.0)));
        }
        path.closed = true;
        let svg = write_svg_document([&path], &SvgExportOptions::default());
        // Zwei C-Segmente: auch das Abschlussduplikat schreibt seins
        assert_eq!(svg.matches(" C ").count(), 2);
        assert!(svg.contains(" Z\""));
    }

    #[test]
    fn viewbox_covers_positions_and_handles() {
        let mut path = SplinePath::new("bogen", PathType::Bezier);
        path.points.push(ControlPoint::broken(
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(0.0, 5.0, 0.0),
        ));
        path.points.push(ControlPoint::broken(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 5.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ));
        let svg = write_svg_document([&path], &SvgExportOptions::default());
        // Handles bei y=5 projizieren auf -5, die viewBox beginnt dort
        assert!(svg.contains("viewBox=\"0.000 -5.000 10.000 5.000\""));
    }

    #[test]
    fn axis_y_projects_the_top_view() {
        let path = linear_path("flach", &[(0.0, 0.0), (1.0, 0.0)], false);
        let mut oben = path.clone();
        oben.points[1].position = Vec3::new(1.0, 2.0, 3.0);
        oben.points[1].tangent_in = oben.points[1].position;
        oben.points[1].tangent_out = oben.points[1].position;
        let options = SvgExportOptions {
            axis: Axis::Y,
            ..SvgExportOptions::default()
        };
        let svg = write_svg_document([&oben], &options);
        assert!(svg.contains("1.000,3.000"));
    }

    #[test]
    fn names_are_escaped() {
        let path = linear_path("a<b>&\"c\"", &[(0.0, 0.0), (1.0, 0.0)], false);
        let svg = write_svg_document([&path], &SvgExportOptions::default());
        assert!(svg.contains("id=\"a&lt;b&gt;&amp;&quot;c&quot;\""));
    }

    #[test]
    fn empty_input_still_produces_a_document() {
        let svg = write_svg_document(std::iter::empty(), &SvgExportOptions::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0.000 0.000 0.000 0.000\""));
        assert!(svg.ends_with("</svg>\n"));
    }
}

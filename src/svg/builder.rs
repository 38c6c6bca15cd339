//! PathBuilder: sammelt Control-Points eines Subpfads im SVG-Raum.
//!
//! Der Builder ist ein reiner Wert, wird pro Subpfad erzeugt und beim
//! Flush konsumiert. Koordinaten bleiben bis [`PathBuilder::finish`]
//! im y-abwärts gerichteten SVG-Raum; erst dort werden Transform,
//! y-Spiegelung und Import-Skalierung angewendet.

use glam::{Mat4, Vec2, Vec3};

use crate::core::{ControlPoint, PathType, PointKind, SplinePath};
use crate::shared::SvgImportOptions;

#[derive(Debug, Clone)]
pub struct PathBuilder {
    name: String,
    path_type: PathType,
    closed: bool,
    points: Vec<ControlPoint>,
}

impl PathBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_type: PathType::Linear,
            closed: false,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Hängt einen linearen Punkt an (Handles auf der Position).
    pub fn linear_to(&mut self, position: Vec2) {
        self.points
            .push(ControlPoint::linear(Vec3::new(position.x, position.y, 0.0)));
    }

    /// Hängt ein kubisches Segment an: der Vorgängerpunkt erhält das
    /// ausgehende Handle `c1`, der neue Punkt das eingehende Handle `c2`.
    pub fn cubic_to(&mut self, c1: Vec2, c2: Vec2, end: Vec2) {
        self.path_type = PathType::Bezier;
        if let Some(prev) = self.points.last_mut() {
            prev.kind = PointKind::Broken;
            prev.tangent_out = Vec3::new(c1.x, c1.y, 0.0);
        }
        let end3 = Vec3::new(end.x, end.y, 0.0);
        self.points
            .push(ControlPoint::broken(end3, Vec3::new(c2.x, c2.y, 0.0), end3));
    }

    /// Schließt den Pfad. Liegt der letzte Punkt noch nicht auf dem
    /// ersten, wird der erste als lineares Schluss-Duplikat angehängt.
    pub fn close(&mut self) {
        let Some(first) = self.points.first().copied() else {
            return;
        };
        let last_at_start = self
            .points
            .last()
            .is_some_and(|p| p.position == first.position);
        if !last_at_start {
            self.points.push(ControlPoint::linear(first.position));
        }
        self.closed = true;
    }

    /// Finalisiert den Subpfad: wendet die komponierte SVG-Matrix
    /// einmalig an, spiegelt y (SVG ist y-abwärts) und skaliert.
    /// Einzelpunkte (nacktes `M`) ergeben keinen Pfad.
    pub fn finish(self, matrix: &Mat4, options: &SvgImportOptions) -> Option<SplinePath> {
        if self.points.len() < 2 {
            return None;
        }
        let mut path = SplinePath::new(self.name, self.path_type);
        path.closed = self.closed;
        path.points = self.points;
        path.transform(matrix);

        let to_engine =
            |v: Vec3| -> Vec3 { Vec3::new(v.x, -v.y, v.z) * options.scale };
        for point in &mut path.points {
            point.position = to_engine(point.position);
            point.tangent_in = to_engine(point.tangent_in);
            point.tangent_out = to_engine(point.tangent_out);
            point.size = options.default_size;
            point.color = options.default_color;
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn linear_points_pass_through_with_flipped_y() {
        let mut builder = PathBuilder::new("p");
        builder.linear_to(Vec2::new(0.0, 0.0));
        builder.linear_to(Vec2::new(10.0, 5.0));

        let path = builder
            .finish(&Mat4::IDENTITY, &SvgImportOptions::default())
            .expect("zwei Punkte ergeben einen Pfad");
        assert_eq!(path.path_type, PathType::Linear);
        assert!(!path.closed);
        assert_eq!(path.points[1].position, Vec3::new(10.0, -5.0, 0.0));
    }

    #[test]
    fn cubic_marks_the_previous_point_broken() {
        let mut builder = PathBuilder::new("p");
        builder.linear_to(Vec2::ZERO);
        builder.cubic_to(
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 3.0),
            Vec2::new(3.0, 3.0),
        );

        let path = builder
            .finish(&Mat4::IDENTITY, &SvgImportOptions::default())
            .expect("Pfad");
        assert_eq!(path.path_type, PathType::Bezier);
        assert_eq!(path.points[0].kind, PointKind::Broken);
        assert_eq!(path.points[0].tangent_out, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(path.points[1].tangent_in, Vec3::new(2.0, -3.0, 0.0));
        assert_eq!(path.points[1].tangent_out, path.points[1].position);
    }

    #[test]
    fn close_duplicates_the_first_point() {
        let mut builder = PathBuilder::new("dreieck");
        builder.linear_to(Vec2::new(0.0, 0.0));
        builder.linear_to(Vec2::new(10.0, 0.0));
        builder.linear_to(Vec2::new(10.0, 10.0));
        builder.close();

        let path = builder
            .finish(&Mat4::IDENTITY, &SvgImportOptions::default())
            .expect("Pfad");
        assert!(path.closed);
        assert_eq!(path.points.len(), 4);
        assert_eq!(path.points[3].position, path.points[0].position);
    }

    #[test]
    fn close_on_a_path_already_at_start_adds_no_point() {
        let mut builder = PathBuilder::new("runde");
        builder.linear_to(Vec2::new(1.0, 0.0));
        builder.cubic_to(
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
        );
        builder.close();

        assert!(builder.is_closed());
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn single_point_yields_no_path() {
        let mut builder = PathBuilder::new("m");
        builder.linear_to(Vec2::ZERO);
        assert!(builder
            .finish(&Mat4::IDENTITY, &SvgImportOptions::default())
            .is_none());
    }

    #[test]
    fn finish_applies_transform_before_the_flip() {
        let mut builder = PathBuilder::new("t");
        builder.linear_to(Vec2::new(0.0, 0.0));
        builder.linear_to(Vec2::new(1.0, 0.0));

        let matrix = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
        let mut options = SvgImportOptions::default();
        options.scale = 10.0;
        options.default_color = Color::BLACK;

        let path = builder.finish(&matrix, &options).expect("Pfad");
        // (1,0) -> Translation (1,2) -> Flip (1,-2) -> Skalierung (10,-20)
        assert_eq!(path.points[1].position, Vec3::new(10.0, -20.0, 0.0));
        assert_eq!(path.points[1].color, Color::BLACK);
    }
}

//! Control-Points und Pfad-Container, das Ausgabeformat des SVG-Konverters.

use glam::{Mat4, Vec3};

use super::Color;

/// Interpolationstyp eines Pfads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathType {
    /// Gerade Segmente zwischen den Punkten
    #[default]
    Linear,
    /// Kubische Bezier-Segmente über die Tangenten-Handles
    Bezier,
}

/// Tangenten-Modus eines Control-Points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointKind {
    /// Beide Handles liegen gespiegelt auf der Position (lineare Ecke)
    #[default]
    SmoothMirrored,
    /// Handles sind unabhängig gesetzt (Kurvenpunkt)
    Broken,
}

/// Einzelner Control-Point mit absoluten Tangenten-Handles.
///
/// `tangent_in`/`tangent_out` sind Positionen im selben Raum wie
/// `position`, keine Richtungsvektoren.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub position: Vec3,
    /// Eingehendes Handle (wirkt auf das Segment davor)
    pub tangent_in: Vec3,
    /// Ausgehendes Handle (wirkt auf das Segment danach)
    pub tangent_out: Vec3,
    /// Normale der Pfadebene
    pub normal: Vec3,
    /// Querschnitts-Größe
    pub size: f32,
    /// Vertex-Farbe
    pub color: Color,
    pub kind: PointKind,
}

impl ControlPoint {
    /// Linearer Punkt: beide Handles fallen auf die Position.
    pub fn linear(position: Vec3) -> Self {
        Self {
            position,
            tangent_in: position,
            tangent_out: position,
            ..Self::default()
        }
    }

    /// Kurvenpunkt mit unabhängigen Handles.
    pub fn broken(position: Vec3, tangent_in: Vec3, tangent_out: Vec3) -> Self {
        Self {
            position,
            tangent_in,
            tangent_out,
            kind: PointKind::Broken,
            ..Self::default()
        }
    }

    /// Wendet eine affine Matrix auf Position und Handles an.
    /// Die Normale wird nur mit dem Rotations-/Skalierungsanteil
    /// transformiert und renormalisiert.
    pub fn transform(&mut self, matrix: &Mat4) {
        self.position = matrix.transform_point3(self.position);
        self.tangent_in = matrix.transform_point3(self.tangent_in);
        self.tangent_out = matrix.transform_point3(self.tangent_out);
        self.normal = matrix
            .transform_vector3(self.normal)
            .try_normalize()
            .unwrap_or(self.normal);
    }
}

impl Default for ControlPoint {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            tangent_in: Vec3::ZERO,
            tangent_out: Vec3::ZERO,
            normal: crate::shared::options::DEFAULT_NORMAL,
            size: crate::shared::options::DEFAULT_POINT_SIZE,
            color: Color::WHITE,
            kind: PointKind::SmoothMirrored,
        }
    }
}

/// Benannter Pfad aus Control-Points, Ergebnis des SVG-Imports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplinePath {
    /// Anzeigename (SVG-`id` oder Elementname mit laufender Nummer)
    pub name: String,
    pub path_type: PathType,
    /// Geschlossene Pfade tragen den ersten Punkt dupliziert am Ende
    pub closed: bool,
    pub points: Vec<ControlPoint>,
}

impl SplinePath {
    pub fn new(name: impl Into<String>, path_type: PathType) -> Self {
        Self {
            name: name.into(),
            path_type,
            closed: false,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Wendet eine Matrix auf alle Punkte an (einmalig beim Finalisieren).
    pub fn transform(&mut self, matrix: &Mat4) {
        for point in &mut self.points {
            point.transform(matrix);
        }
    }

    /// Achsenparallele Bounding-Box über Positionen und Handles.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        let mut min = first.position.min(first.tangent_in).min(first.tangent_out);
        let mut max = first.position.max(first.tangent_in).max(first.tangent_out);
        for p in iter {
            min = min.min(p.position).min(p.tangent_in).min(p.tangent_out);
            max = max.max(p.position).max(p.tangent_in).max(p.tangent_out);
        }
        Some((min, max))
    }
}

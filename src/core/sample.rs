//! Sample-Zustand eines Spline-Punkts, wie ihn die Modifier-Pipeline mutiert.

use glam::{Mat3, Quat, Vec3};

use super::Color;

/// Ausgewerteter Zustand an einer Spline-Position.
///
/// Wird von einem externen Sampler erzeugt und von der Modifier-Pipeline
/// in-place verändert. `forward` und `up` bilden zusammen mit
/// [`SplineSample::right`] ein orthonormales Dreibein.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Position im Weltraum
    pub position: Vec3,
    /// Tangentenrichtung der Spline (normalisiert)
    pub forward: Vec3,
    /// Up-Vektor senkrecht zur Tangente
    pub up: Vec3,
    /// Vertex-Farbe an dieser Stelle
    pub color: Color,
    /// Querschnitts-Größe (Skalar)
    pub size: f32,
    /// Spline-Prozent dieser Probe (0.0..1.0)
    pub percent: f64,
}

impl SplineSample {
    pub fn new(position: Vec3, percent: f64) -> Self {
        Self {
            position,
            percent,
            ..Self::default()
        }
    }

    /// Rechts-Vektor des Dreibeins (`up x forward`).
    pub fn right(&self) -> Vec3 {
        self.up.cross(self.forward)
    }

    /// Orientierung des Samples als Quaternion (siehe [`look_rotation`]).
    pub fn rotation(&self) -> Quat {
        look_rotation(self.forward, self.up)
    }
}

impl Default for SplineSample {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
            up: Vec3::Y,
            color: Color::WHITE,
            size: 1.0,
            percent: 0.0,
        }
    }
}

/// Quaternion, das +Z auf `forward` und +Y (bestmöglich) auf `up` dreht.
///
/// Entartete Eingaben (Nullvektor, `up` parallel zu `forward`) fallen auf
/// Ersatzachsen zurück statt NaN zu produzieren.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.try_normalize().unwrap_or(Vec3::Z);
    let mut r = up.cross(f);
    if r.length_squared() < 1e-12 {
        r = Vec3::Y.cross(f);
        if r.length_squared() < 1e-12 {
            r = Vec3::X;
        }
    }
    let r = r.normalize();
    let u = f.cross(r);
    Quat::from_mat3(&Mat3::from_cols(r, u, f))
}

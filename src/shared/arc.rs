//! Elliptische SVG-Bögen (A-Kommando).
//!
//! Endpunkt- zu Mittelpunkt-Parametrisierung nach SVG 1.1 (F.6.5/F.6.6),
//! Unterteilung an Viertel-Ellipsen-Grenzen und kubische Approximation
//! der Teilbögen.

use std::f64::consts::TAU;

use glam::Vec2;

use super::options::ARC_SEGMENT_EPSILON;

/// Mittelpunkt-Form eines elliptischen Bogens.
///
/// `start_angle` und `sweep_angle` sind Radiant im ungedrehten
/// Ellipsenraum; das Vorzeichen von `sweep_angle` trägt die
/// Drehrichtung (sweep-Flag).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: Vec2,
    /// Radien, bei unerreichbarer Geometrie bereits hochskaliert
    pub radii: Vec2,
    /// x-axis-rotation in Radiant
    pub rotation: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl CenterArc {
    /// Punkt auf der Ellipse bei Winkel `theta`.
    pub fn point_at(&self, theta: f64) -> Vec2 {
        let (sin_t, cos_t) = theta.sin_cos();
        let x = self.radii.x as f64 * cos_t;
        let y = self.radii.y as f64 * sin_t;
        let (sin_r, cos_r) = self.rotation.sin_cos();
        Vec2::new(
            (x * cos_r - y * sin_r) as f32 + self.center.x,
            (x * sin_r + y * cos_r) as f32 + self.center.y,
        )
    }

    /// Ableitung dP/dtheta bei Winkel `theta` (unnormalisiert).
    pub fn tangent_at(&self, theta: f64) -> Vec2 {
        let (sin_t, cos_t) = theta.sin_cos();
        let x = -(self.radii.x as f64) * sin_t;
        let y = self.radii.y as f64 * cos_t;
        let (sin_r, cos_r) = self.rotation.sin_cos();
        Vec2::new(
            (x * cos_r - y * sin_r) as f32,
            (x * sin_r + y * cos_r) as f32,
        )
    }
}

/// Konvertiert die SVG-Endpunkt-Form in die Mittelpunkt-Form.
///
/// `None` bei entarteter Geometrie (Radius ~0 oder identische
/// Endpunkte); der Aufrufer ersetzt den Bogen dann durch eine Gerade,
/// wie es die SVG-Spezifikation verlangt.
pub fn endpoint_to_center(
    from: Vec2,
    to: Vec2,
    radii: Vec2,
    rotation_deg: f32,
    large_arc: bool,
    sweep: bool,
) -> Option<CenterArc> {
    let mut rx = (radii.x as f64).abs();
    let mut ry = (radii.y as f64).abs();
    if rx < 1e-9 || ry < 1e-9 || from.distance_squared(to) < 1e-12 {
        return None;
    }

    let phi = (rotation_deg as f64).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // F.6.5.1: Endpunkt-Differenz in den gedrehten Ellipsenraum
    let dx = (from.x - to.x) as f64 / 2.0;
    let dy = (from.y - to.y) as f64 / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    // F.6.6.2: Radien hochskalieren, wenn die Endpunkte sonst nicht
    // auf einer Ellipse dieser Radien liegen können
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // F.6.5.2: Mittelpunkt im gedrehten Raum
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
    let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    if den.abs() < f64::EPSILON {
        return None;
    }
    let coef = sign * (num / den).max(0.0).sqrt();
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    // F.6.5.3: zurück in Dokumentkoordinaten
    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) as f64 / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) as f64 / 2.0;

    // F.6.5.5/6: Start- und Schwenkwinkel
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let start_angle = angle_between(1.0, 0.0, ux, uy);
    let mut sweep_angle = angle_between(ux, uy, vx, vy);
    if !sweep && sweep_angle > 0.0 {
        sweep_angle -= TAU;
    } else if sweep && sweep_angle < 0.0 {
        sweep_angle += TAU;
    }

    Some(CenterArc {
        center: Vec2::new(cx as f32, cy as f32),
        radii: Vec2::new(rx as f32, ry as f32),
        rotation: phi,
        start_angle,
        sweep_angle,
    })
}

/// Vorzeichenbehafteter Winkel zwischen zwei Vektoren (atan2 von Det/Dot).
fn angle_between(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
}

/// Voll-Ellipsen-Anteile (theta/2π) der Teilbogen-Grenzen von `from`
/// nach `to`.
///
/// Start und Ende sind immer exakt enthalten; dazwischen liegen die
/// Viertel-Grenzen (Vielfache von 0.25) in Durchlaufrichtung. Grenzen
/// näher als [`ARC_SEGMENT_EPSILON`] an ihrem Nachbarn werden in den
/// angrenzenden Teilbogen verschmolzen.
pub fn arc_segment_fractions(from: f64, to: f64) -> Vec<f64> {
    const STEP: f64 = 0.25;
    let mut fractions = vec![from];
    if to > from {
        let mut q = (from / STEP).floor() * STEP + STEP;
        while q < to {
            let prev = *fractions.last().unwrap_or(&from);
            if q - prev > ARC_SEGMENT_EPSILON && to - q > ARC_SEGMENT_EPSILON {
                fractions.push(q);
            }
            q += STEP;
        }
    } else {
        let mut q = (from / STEP).ceil() * STEP - STEP;
        while q > to {
            let prev = *fractions.last().unwrap_or(&from);
            if prev - q > ARC_SEGMENT_EPSILON && q - to > ARC_SEGMENT_EPSILON {
                fractions.push(q);
            }
            q -= STEP;
        }
    }
    fractions.push(to);
    fractions
}

/// Kubische Segmente `(c1, c2, ende)` für einen Bogen in Mittelpunkt-Form.
///
/// Pro Teilbogen gilt die Standard-Approximationskonstante
/// k = 4/3·tan(Δθ/4); ein negatives Δθ (Gegenrichtung) kehrt die
/// Handle-Richtung automatisch um.
pub fn arc_to_cubic_segments(arc: &CenterArc) -> Vec<(Vec2, Vec2, Vec2)> {
    let from = arc.start_angle / TAU;
    let to = (arc.start_angle + arc.sweep_angle) / TAU;
    let fractions = arc_segment_fractions(from, to);
    let mut segments = Vec::with_capacity(fractions.len().saturating_sub(1));
    for pair in fractions.windows(2) {
        let t0 = pair[0] * TAU;
        let t1 = pair[1] * TAU;
        let k = ((4.0 / 3.0) * ((t1 - t0) / 4.0).tan()) as f32;
        let p0 = arc.point_at(t0);
        let p1 = arc.point_at(t1);
        let c1 = p0 + arc.tangent_at(t0) * k;
        let c2 = p1 - arc.tangent_at(t1) * k;
        segments.push((c1, c2, p1));
    }
    segments
}

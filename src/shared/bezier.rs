//! Reine Bezier-Hilfsfunktionen für den SVG-Konverter.
//!
//! Alle Funktionen arbeiten in der 2D-Dokumentebene; die Anhebung in den
//! 3D-Raum passiert erst beim Finalisieren der Pfade.

use glam::Vec2;

/// Handle-Konstante der 4-Punkt-Bezier-Darstellung eines Viertelkreises.
pub const KAPPA: f32 = 0.552_284_75;

/// Kubischer Bezier-Punkt.
///
/// B(t) = (1-t)³·P0 + 3(1-t)²t·C1 + 3(1-t)t²·C2 + t³·P1
pub fn cubic_bezier_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

/// Ableitung des kubischen Beziers.
///
/// B'(t) = 3(1-t)²·(C1-P0) + 6(1-t)t·(C2-C1) + 3t²·(P1-C2)
pub fn cubic_bezier_tangent(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    (c1 - p0) * (3.0 * u * u) + (c2 - c1) * (6.0 * u * t) + (p1 - c2) * (3.0 * t * t)
}

/// Hebt einen quadratischen Bezier auf kubische Kontrollpunkte an.
///
/// C1 = P0 + 2/3·(Q - P0), C2 = P1 + 2/3·(Q - P1); die Kurvenform
/// bleibt dabei exakt erhalten.
pub fn quadratic_to_cubic(p0: Vec2, q: Vec2, p1: Vec2) -> (Vec2, Vec2) {
    let c1 = p0 + (q - p0) * (2.0 / 3.0);
    let c2 = p1 + (q - p1) * (2.0 / 3.0);
    (c1, c2)
}

/// Lineare Interpolation für f64-Prozente.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Geclampte inverse lineare Interpolation für f64-Prozente.
/// Entartetes Intervall (a == b) liefert 0.
pub fn inverse_lerp(a: f64, b: f64, t: f64) -> f64 {
    if (b - a).abs() < f64::EPSILON {
        return 0.0;
    }
    ((t - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cubic_bezier_hits_endpoints() {
        let p0 = Vec2::new(0.0, 0.0);
        let c1 = Vec2::new(1.0, 2.0);
        let c2 = Vec2::new(3.0, 2.0);
        let p1 = Vec2::new(4.0, 0.0);
        assert_eq!(cubic_bezier_point(p0, c1, c2, p1, 0.0), p0);
        assert_eq!(cubic_bezier_point(p0, c1, c2, p1, 1.0), p1);
    }

    #[test]
    fn cubic_tangent_points_along_handles_at_endpoints() {
        let p0 = Vec2::ZERO;
        let c1 = Vec2::new(0.0, 1.0);
        let c2 = Vec2::new(1.0, 2.0);
        let p1 = Vec2::new(2.0, 2.0);
        let t0 = cubic_bezier_tangent(p0, c1, c2, p1, 0.0);
        let t1 = cubic_bezier_tangent(p0, c1, c2, p1, 1.0);
        assert_eq!(t0, (c1 - p0) * 3.0);
        assert_eq!(t1, (p1 - c2) * 3.0);
    }

    #[test]
    fn elevated_quadratic_matches_original() {
        let p0 = Vec2::new(0.0, 0.0);
        let q = Vec2::new(5.0, 10.0);
        let p1 = Vec2::new(10.0, 0.0);
        let (c1, c2) = quadratic_to_cubic(p0, q, p1);
        for t in [0.0_f32, 0.2, 0.5, 0.8, 1.0] {
            let u = 1.0 - t;
            let quad = p0 * (u * u) + q * (2.0 * u * t) + p1 * (t * t);
            let cubic = cubic_bezier_point(p0, c1, c2, p1, t);
            assert_relative_eq!(quad.x, cubic.x, epsilon = 1e-5);
            assert_relative_eq!(quad.y, cubic.y, epsilon = 1e-5);
        }
    }

    #[test]
    fn inverse_lerp_clamps_and_handles_degenerate_interval() {
        assert_relative_eq!(inverse_lerp(0.2, 0.8, 0.5), 0.5);
        assert_relative_eq!(inverse_lerp(0.2, 0.8, 0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(inverse_lerp(0.2, 0.8, 1.0), 1.0);
        assert_relative_eq!(inverse_lerp(0.5, 0.5, 0.7), 0.0, epsilon = 1e-12);
    }
}

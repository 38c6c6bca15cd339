//! Prozedurale Grundformen als Spline-Pfade.
//!
//! Alle Generatoren liefern am Ursprung zentrierte Pfade mit wenigen
//! Control-Points. Die `emit_*`-Helfer schreiben die Geometrie im
//! SVG-Raum in einen [`PathBuilder`] und werden vom SVG-Reader für
//! `rect`, `circle` und `ellipse` mitbenutzt.

use glam::{Mat4, Vec2};

use crate::core::SplinePath;
use crate::shared::bezier::KAPPA;
use crate::shared::SvgImportOptions;
use crate::svg::builder::PathBuilder;

/// Achsenparalleles Rechteck, 4 lineare Ecken, geschlossen.
pub fn rectangle(size: Vec2) -> SplinePath {
    let mut builder = PathBuilder::new("rectangle");
    emit_rect(&mut builder, size);
    finish_local(builder)
}

/// Rechteck mit Viertel-Ellipsen-Ecken, 8 Punkte, Bezier, geschlossen.
/// Die Radien werden auf die halben Kantenlängen geklemmt.
pub fn rounded_rectangle(size: Vec2, radius: Vec2) -> SplinePath {
    let mut builder = PathBuilder::new("rounded_rectangle");
    emit_rounded_rect(&mut builder, size, radius);
    finish_local(builder)
}

/// Ellipse in der 4-Punkt-Kappa-Darstellung, geschlossen.
pub fn ellipse(radii: Vec2) -> SplinePath {
    let mut builder = PathBuilder::new("ellipse");
    emit_ellipse(&mut builder, radii);
    finish_local(builder)
}

/// Stern mit `points` Zacken: `2 * points` alternierende lineare
/// Punkte zwischen Außen- und Innenradius, geschlossen.
pub fn star(points: u32, inner_radius: f32, outer_radius: f32) -> SplinePath {
    let spikes = points.max(2);
    let mut builder = PathBuilder::new("star");
    let step = std::f32::consts::PI / spikes as f32;
    for k in 0..spikes * 2 {
        // Erste Zacke zeigt im SVG-Raum nach oben (-y)
        let angle = -std::f32::consts::FRAC_PI_2 + step * k as f32;
        let radius = if k % 2 == 0 {
            outer_radius
        } else {
            inner_radius
        };
        builder.linear_to(Vec2::new(angle.cos(), angle.sin()) * radius);
    }
    builder.close();
    finish_local(builder)
}

/// Spirale aus Viertelumdrehungs-Bezier-Segmenten mit linear
/// interpoliertem Radius, offen. `turns` wird auf Viertelumdrehungen
/// gerundet.
pub fn spiral(turns: f32, start_radius: f32, end_radius: f32) -> SplinePath {
    let quarters = ((turns * 4.0).round() as i32).max(1) as u32;
    let mut builder = PathBuilder::new("spiral");

    let point_at = |i: u32| -> (Vec2, Vec2, f32) {
        let theta = i as f32 * std::f32::consts::FRAC_PI_2;
        let fraction = i as f32 / quarters as f32;
        let radius = start_radius + (end_radius - start_radius) * fraction;
        let position = Vec2::new(theta.cos(), theta.sin()) * radius;
        let travel = Vec2::new(-theta.sin(), theta.cos());
        (position, travel, radius)
    };

    let (start, _, _) = point_at(0);
    builder.linear_to(start);
    for i in 1..=quarters {
        let (from, from_travel, from_radius) = point_at(i - 1);
        let (to, to_travel, to_radius) = point_at(i);
        let c1 = from + from_travel * (KAPPA * from_radius);
        let c2 = to - to_travel * (KAPPA * to_radius);
        builder.cubic_to(c1, c2, to);
    }
    finish_local(builder)
}

fn finish_local(builder: PathBuilder) -> SplinePath {
    builder
        .finish(&Mat4::IDENTITY, &SvgImportOptions::default())
        .unwrap_or_default()
}

// ── Emitter für den SVG-Reader (SVG-Raum, y-abwärts, zentriert) ─────

/// 4 Ecken relativ zum Formmittelpunkt, im Uhrzeigersinn ab oben-links.
pub(crate) fn emit_rect(builder: &mut PathBuilder, size: Vec2) {
    let half = size * 0.5;
    builder.linear_to(Vec2::new(-half.x, -half.y));
    builder.linear_to(Vec2::new(half.x, -half.y));
    builder.linear_to(Vec2::new(half.x, half.y));
    builder.linear_to(Vec2::new(-half.x, half.y));
    builder.close();
}

/// 8 Punkte: 4 Kantenpaare mit Viertel-Ellipsen-Ecken dazwischen.
pub(crate) fn emit_rounded_rect(builder: &mut PathBuilder, size: Vec2, radius: Vec2) {
    let half = size * 0.5;
    let rx = radius.x.min(half.x).max(0.0);
    let ry = radius.y.min(half.y).max(0.0);
    let hx = KAPPA * rx;
    let hy = KAPPA * ry;

    let start = Vec2::new(-half.x + rx, -half.y);
    builder.linear_to(start);
    // Oberkante und Ecke oben-rechts
    let p = Vec2::new(half.x - rx, -half.y);
    builder.linear_to(p);
    let q = Vec2::new(half.x, -half.y + ry);
    builder.cubic_to(p + Vec2::new(hx, 0.0), q - Vec2::new(0.0, hy), q);
    // Rechte Kante und Ecke unten-rechts
    let p = Vec2::new(half.x, half.y - ry);
    builder.linear_to(p);
    let q = Vec2::new(half.x - rx, half.y);
    builder.cubic_to(p + Vec2::new(0.0, hy), q + Vec2::new(hx, 0.0), q);
    // Unterkante und Ecke unten-links
    let p = Vec2::new(-half.x + rx, half.y);
    builder.linear_to(p);
    let q = Vec2::new(-half.x, half.y - ry);
    builder.cubic_to(p - Vec2::new(hx, 0.0), q + Vec2::new(0.0, hy), q);
    // Linke Kante und Ecke oben-links zurück zum Start
    let p = Vec2::new(-half.x, -half.y + ry);
    builder.linear_to(p);
    builder.cubic_to(p - Vec2::new(0.0, hy), start - Vec2::new(hx, 0.0), start);
    builder.close();
}

/// 4-Punkt-Kappa-Ellipse ab dem rechten Scheitelpunkt.
pub(crate) fn emit_ellipse(builder: &mut PathBuilder, radii: Vec2) {
    let hx = KAPPA * radii.x;
    let hy = KAPPA * radii.y;

    let east = Vec2::new(radii.x, 0.0);
    let south = Vec2::new(0.0, radii.y);
    let west = Vec2::new(-radii.x, 0.0);
    let north = Vec2::new(0.0, -radii.y);

    builder.linear_to(east);
    builder.cubic_to(
        east + Vec2::new(0.0, hy),
        south + Vec2::new(hx, 0.0),
        south,
    );
    builder.cubic_to(
        south - Vec2::new(hx, 0.0),
        west + Vec2::new(0.0, hy),
        west,
    );
    builder.cubic_to(
        west - Vec2::new(0.0, hy),
        north - Vec2::new(hx, 0.0),
        north,
    );
    builder.cubic_to(
        north + Vec2::new(hx, 0.0),
        east - Vec2::new(0.0, hy),
        east,
    );
    builder.close();
}

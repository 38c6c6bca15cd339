//! Parser für das SVG-`transform`-Attribut.
//!
//! Alle Funktionen einer Transformliste werden von links nach rechts
//! zu einer einzigen Matrix komponiert; das rechteste Glied wirkt
//! damit zuerst auf den Punkt. Die Matrizen arbeiten im SVG-Raum
//! (y nach unten), der y-Flip passiert erst beim Finalisieren.

use std::sync::OnceLock;

use glam::{Mat4, Vec3, Vec4};
use regex::Regex;

use super::path_data::parse_float_array;

/// Muster `name(argumente)`, einmal kompiliert und wiederverwendet.
fn function_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"([a-zA-Z]+)\s*\(([^)]*)\)").ok())
        .as_ref()
}

/// Parsed eine Transformliste wie `translate(10,5) rotate(45)` in eine
/// Matrix. Unbekannte Funktionen und falsche Argumentzahlen werden mit
/// Warnung übersprungen.
pub(super) fn parse_transform(value: &str) -> Mat4 {
    let Some(pattern) = function_pattern() else {
        return Mat4::IDENTITY;
    };
    let mut result = Mat4::IDENTITY;
    for caps in pattern.captures_iter(value) {
        let name = &caps[1];
        let args = parse_float_array(&caps[2]);
        match transform_matrix(name, &args) {
            Some(local) => result *= local,
            None => log::warn!(
                "Transform '{}' mit {} Argument(en) übersprungen",
                name,
                args.len()
            ),
        }
    }
    result
}

fn transform_matrix(name: &str, args: &[f32]) -> Option<Mat4> {
    match name {
        "translate" => {
            let tx = *args.first()?;
            let ty = args.get(1).copied().unwrap_or(0.0);
            Some(Mat4::from_translation(Vec3::new(tx, ty, 0.0)))
        }
        "rotate" => {
            let rotation = Mat4::from_rotation_z(args.first()?.to_radians());
            match args {
                [_] => Some(rotation),
                // Drehzentrum: erst hin-, dann zurückverschieben
                [_, cx, cy] => {
                    let center = Vec3::new(*cx, *cy, 0.0);
                    Some(
                        Mat4::from_translation(center)
                            * rotation
                            * Mat4::from_translation(-center),
                    )
                }
                _ => None,
            }
        }
        "scale" => {
            let sx = *args.first()?;
            let sy = args.get(1).copied().unwrap_or(sx);
            Some(Mat4::from_scale(Vec3::new(sx, sy, 1.0)))
        }
        "skewX" => {
            let mut m = Mat4::IDENTITY;
            m.y_axis.x = args.first()?.to_radians().tan();
            Some(m)
        }
        "skewY" => {
            let mut m = Mat4::IDENTITY;
            m.x_axis.y = args.first()?.to_radians().tan();
            Some(m)
        }
        "matrix" => {
            if let [a, b, c, d, e, f] = args {
                Some(Mat4::from_cols(
                    Vec4::new(*a, *b, 0.0, 0.0),
                    Vec4::new(*c, *d, 0.0, 0.0),
                    Vec4::new(0.0, 0.0, 1.0, 0.0),
                    Vec4::new(*e, *f, 0.0, 1.0),
                ))
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn apply(value: &str, point: Vec3) -> Vec3 {
        parse_transform(value).transform_point3(point)
    }

    #[test]
    fn translate_defaults_the_second_argument_to_zero() {
        let p = apply("translate(10)", Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(p, Vec3::new(11.0, 1.0, 0.0));
        let p = apply("translate(10, 5)", Vec3::ZERO);
        assert_eq!(p, Vec3::new(10.0, 5.0, 0.0));
    }

    #[test]
    fn rotate_works_in_degrees() {
        let p = apply("rotate(90)", Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotate_with_center_pivots_around_it() {
        let p = apply("rotate(90, 5, 5)", Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn scale_single_argument_is_uniform() {
        let p = apply("scale(2)", Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(p, Vec3::new(6.0, 8.0, 0.0));
        let p = apply("scale(2, 3)", Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(p, Vec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn skew_x_shears_along_y() {
        let p = apply("skewX(45)", Vec3::new(0.0, 10.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn matrix_takes_column_major_coefficients() {
        let p = apply("matrix(1,0,0,1,7,8)", Vec3::ZERO);
        assert_eq!(p, Vec3::new(7.0, 8.0, 0.0));
        let p = apply("matrix(0,1,-1,0,0,0)", Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn list_applies_right_to_left_on_points() {
        // scale wirkt zuerst, dann die Verschiebung
        let p = apply("translate(10,0) scale(2)", Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p, Vec3::new(12.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_functions_are_skipped() {
        let p = apply("frobnicate(3) translate(5,0)", Vec3::ZERO);
        assert_eq!(p, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn wrong_arity_is_skipped() {
        let p = apply("rotate(45, 10)", Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn empty_value_is_identity() {
        assert_eq!(parse_transform(""), Mat4::IDENTITY);
    }
}

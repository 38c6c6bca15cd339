//! Farb-Modifier: blendet Key-Farben über die laufende Sample-Farbe.

use super::Key;
use crate::core::{Color, SplineSample};

/// Blend-Funktion eines Farb-Keys gegen die laufende Farbe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorBlendMode {
    /// Lineare Überblendung zur Key-Farbe
    #[default]
    Lerp,
    /// Gewichtete Addition der Key-Farbe
    Add,
    /// Gewichtete Subtraktion der Key-Farbe
    Subtract,
    /// Überblendung zum komponentenweisen Produkt
    Multiply,
}

/// Fenster-Key mit Zielfarbe und Blend-Modus.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorKey {
    pub key: Key,
    pub color: Color,
    pub blend_mode: ColorBlendMode,
}

impl ColorKey {
    pub fn new(feather_start: f64, feather_end: f64, color: Color) -> Self {
        Self {
            key: Key::new(feather_start, feather_end),
            color,
            blend_mode: ColorBlendMode::default(),
        }
    }
}

/// Verändert die Sample-Farbe über gefensterte Keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorModifier {
    pub keys: Vec<ColorKey>,
    /// Globaler Gewichtsfaktor über alle Keys
    pub blend: f32,
    /// Keys werten den host-geclippten Prozent aus
    pub use_clipped_percent: bool,
}

impl ColorModifier {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            blend: 1.0,
            use_clipped_percent: false,
        }
    }

    /// Wendet alle Keys in Listenreihenfolge an; spätere Keys
    /// überlagern frühere.
    pub fn apply(&self, sample: &mut SplineSample, percent: f64) {
        for entry in &self.keys {
            let weight = entry.key.evaluate(percent) * self.blend;
            if weight == 0.0 {
                continue;
            }
            sample.color = match entry.blend_mode {
                ColorBlendMode::Lerp => sample.color.lerp(entry.color, weight),
                ColorBlendMode::Add => sample.color + entry.color * weight,
                ColorBlendMode::Subtract => sample.color - entry.color * weight,
                ColorBlendMode::Multiply => {
                    sample.color.lerp(sample.color * entry.color, weight)
                }
            };
        }
    }
}

impl Default for ColorModifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Curve;

    fn plateau_key(color: Color) -> ColorKey {
        let mut key = ColorKey::new(0.0, 1.0, color);
        key.key.interpolation = Curve::linear(0.0, 1.0);
        key
    }

    fn sample_at(percent: f64) -> SplineSample {
        SplineSample {
            percent,
            ..SplineSample::default()
        }
    }

    #[test]
    fn lerp_at_full_weight_reaches_the_key_color() {
        let mut modifier = ColorModifier::new();
        modifier.keys.push(plateau_key(Color::new(1.0, 0.0, 0.5, 1.0)));

        let mut sample = sample_at(0.5);
        sample.color = Color::new(0.25, 0.5, 0.75, 1.0);
        let percent = sample.percent;
        modifier.apply(&mut sample, percent);
        assert_eq!(sample.color, Color::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn zero_weight_leaves_the_color_untouched() {
        let mut modifier = ColorModifier::new();
        modifier.keys.push(ColorKey::new(0.2, 0.4, Color::BLACK));

        // Außerhalb des Fensters
        let mut sample = sample_at(0.9);
        let percent = sample.percent;
        modifier.apply(&mut sample, percent);
        assert_eq!(sample.color, Color::WHITE);

        // Modifier-Blend auf null
        modifier.blend = 0.0;
        let mut sample = sample_at(0.3);
        let percent = sample.percent;
        modifier.apply(&mut sample, percent);
        assert_eq!(sample.color, Color::WHITE);
    }

    #[test]
    fn add_and_subtract_are_weighted() {
        let mut modifier = ColorModifier::new();
        let mut key = plateau_key(Color::new(0.25, 0.25, 0.25, 0.0));
        key.blend_mode = ColorBlendMode::Add;
        modifier.keys.push(key);

        let mut sample = sample_at(0.5);
        sample.color = Color::new(0.5, 0.5, 0.5, 1.0);
        let percent = sample.percent;
        modifier.apply(&mut sample, percent);
        assert_eq!(sample.color, Color::new(0.75, 0.75, 0.75, 1.0));

        modifier.keys[0].blend_mode = ColorBlendMode::Subtract;
        let mut sample = sample_at(0.5);
        sample.color = Color::new(0.5, 0.5, 0.5, 1.0);
        let percent = sample.percent;
        modifier.apply(&mut sample, percent);
        assert_eq!(sample.color, Color::new(0.25, 0.25, 0.25, 1.0));
    }

    #[test]
    fn multiply_blends_towards_the_product() {
        let mut modifier = ColorModifier::new();
        let mut key = plateau_key(Color::new(0.25, 0.25, 0.25, 1.0));
        key.blend_mode = ColorBlendMode::Multiply;
        modifier.keys.push(key);

        let mut sample = sample_at(0.5);
        sample.color = Color::new(0.5, 0.5, 0.5, 1.0);
        let percent = sample.percent;
        modifier.apply(&mut sample, percent);
        assert_eq!(sample.color, Color::new(0.125, 0.125, 0.125, 1.0));
    }

    #[test]
    fn later_keys_layer_over_earlier_ones() {
        let mut modifier = ColorModifier::new();
        modifier.keys.push(plateau_key(Color::rgb(1.0, 0.0, 0.0)));
        modifier.keys.push(plateau_key(Color::rgb(0.0, 1.0, 0.0)));

        let mut sample = sample_at(0.5);
        let percent = sample.percent;
        modifier.apply(&mut sample, percent);
        assert_eq!(sample.color, Color::rgb(0.0, 1.0, 0.0));
    }
}

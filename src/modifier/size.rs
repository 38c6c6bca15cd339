//! Größen-Modifier: verändert die skalare Querschnittsgröße der Samples.

use super::{Key, ValueBlendMode};
use crate::core::SplineSample;

/// Fenster-Key mit Größenbeitrag bzw. Zielfaktor.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeKey {
    pub key: Key,
    /// Additiver Beitrag bzw. multiplikativer Zielfaktor
    pub size: f32,
}

impl SizeKey {
    pub fn new(feather_start: f64, feather_end: f64, size: f32) -> Self {
        Self {
            key: Key::new(feather_start, feather_end),
            size,
        }
    }
}

/// Verändert die Sample-Größe additiv oder multiplikativ.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeModifier {
    pub keys: Vec<SizeKey>,
    pub blend: f32,
    pub use_clipped_percent: bool,
    pub mode: ValueBlendMode,
}

impl SizeModifier {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            blend: 1.0,
            use_clipped_percent: false,
            mode: ValueBlendMode::default(),
        }
    }

    pub fn apply(&self, sample: &mut SplineSample, percent: f64) {
        for entry in &self.keys {
            let weight = entry.key.evaluate(percent) * self.blend;
            if weight == 0.0 {
                continue;
            }
            match self.mode {
                ValueBlendMode::Add => sample.size += entry.size * weight,
                // Überblendung vom Neutralfaktor 1 zum Zielfaktor
                ValueBlendMode::Multiply => {
                    sample.size *= 1.0 + (entry.size - 1.0) * weight;
                }
            }
        }
    }
}

impl Default for SizeModifier {
    fn default() -> Self {
        Self::new()
    }
}

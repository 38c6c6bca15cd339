//! Offset-Modifier: verschiebt Samples in ihrer Rechts/Hoch-Ebene.

use glam::Vec2;

use super::Key;
use crate::core::SplineSample;

/// Fenster-Key mit 2D-Verschiebung (x entlang Rechts, y entlang Hoch).
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetKey {
    pub key: Key,
    pub offset: Vec2,
}

impl OffsetKey {
    pub fn new(feather_start: f64, feather_end: f64, offset: Vec2) -> Self {
        Self {
            key: Key::new(feather_start, feather_end),
            offset,
        }
    }
}

/// Summiert die gewichteten Key-Offsets und verschiebt die Position
/// einmalig in der Rechts/Hoch-Ebene des Samples.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetModifier {
    pub keys: Vec<OffsetKey>,
    pub blend: f32,
    pub use_clipped_percent: bool,
}

impl OffsetModifier {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            blend: 1.0,
            use_clipped_percent: false,
        }
    }

    pub fn apply(&self, sample: &mut SplineSample, percent: f64) {
        let mut total = Vec2::ZERO;
        for entry in &self.keys {
            let weight = entry.key.evaluate(percent) * self.blend;
            total += entry.offset * weight;
        }
        if total == Vec2::ZERO {
            return;
        }
        let right = sample.right();
        sample.position += right * total.x + sample.up * total.y;
    }
}

impl Default for OffsetModifier {
    fn default() -> Self {
        Self::new()
    }
}

//! Mesh-Scale-Modifier: 2D-Skalierung für die Mesh-Extrusion.
//!
//! Mutiert keine Samples; der Extruder fragt die Skalierung pro
//! Prozent ab und wendet sie auf seinen Querschnitt an.

use glam::Vec2;

use super::{Key, ValueBlendMode};

/// Fenster-Key mit 2D-Skalierungsbeitrag bzw. Zielfaktor.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshScaleKey {
    pub key: Key,
    pub scale: Vec2,
}

impl MeshScaleKey {
    pub fn new(feather_start: f64, feather_end: f64, scale: Vec2) -> Self {
        Self {
            key: Key::new(feather_start, feather_end),
            scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshScaleModifier {
    pub keys: Vec<MeshScaleKey>,
    pub blend: f32,
    pub use_clipped_percent: bool,
    pub mode: ValueBlendMode,
}

impl MeshScaleModifier {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            blend: 1.0,
            use_clipped_percent: false,
            mode: ValueBlendMode::default(),
        }
    }

    /// Liefert die modifizierte Querschnitts-Skalierung für `percent`.
    pub fn apply(&self, base: Vec2, percent: f64) -> Vec2 {
        let mut result = base;
        for entry in &self.keys {
            let weight = entry.key.evaluate(percent) * self.blend;
            if weight == 0.0 {
                continue;
            }
            match self.mode {
                ValueBlendMode::Add => result += entry.scale * weight,
                ValueBlendMode::Multiply => {
                    result *= Vec2::ONE + (entry.scale - Vec2::ONE) * weight;
                }
            }
        }
        result
    }
}

impl Default for MeshScaleModifier {
    fn default() -> Self {
        Self::new()
    }
}

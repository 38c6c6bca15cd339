//! Rotations-Modifier: Euler-Offsets und Look-Targets über Quaternionen.

use glam::{EulerRot, Quat, Vec3};

use super::Key;
use crate::core::{look_rotation, SplineSample};

/// Fenster-Key mit Euler-Offset oder Blickziel.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationKey {
    pub key: Key,
    /// Euler-Offset in Grad (XYZ-Reihenfolge)
    pub rotation: Vec3,
    /// Statt des Offsets zum Zielpunkt blicken
    pub use_look_target: bool,
    /// Zielpunkt im Weltraum für Look-Keys
    pub target: Vec3,
}

impl RotationKey {
    pub fn new(feather_start: f64, feather_end: f64, rotation: Vec3) -> Self {
        Self {
            key: Key::new(feather_start, feather_end),
            rotation,
            use_look_target: false,
            target: Vec3::ZERO,
        }
    }

    pub fn look_at(feather_start: f64, feather_end: f64, target: Vec3) -> Self {
        Self {
            key: Key::new(feather_start, feather_end),
            rotation: Vec3::ZERO,
            use_look_target: true,
            target,
        }
    }
}

/// Dreht Vorwärts- und Hochvektor der Samples.
///
/// Look-Keys slerpen die Gesamtausrichtung Richtung Zielpunkt,
/// Offset-Keys akkumulieren gewichtete Euler-Drehungen; beide Anteile
/// werden als `look * offset` einmalig aufs Sample angewendet.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationModifier {
    pub keys: Vec<RotationKey>,
    pub blend: f32,
    pub use_clipped_percent: bool,
}

impl RotationModifier {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            blend: 1.0,
            use_clipped_percent: false,
        }
    }

    pub fn apply(&self, sample: &mut SplineSample, percent: f64) {
        if self.keys.is_empty() {
            return;
        }
        let original = sample.rotation();
        // Hochvektor im lokalen Frame, damit Offsets ihn mitdrehen
        let local_up = original.inverse() * sample.up;

        let mut look = original;
        let mut offset = Quat::IDENTITY;
        for entry in &self.keys {
            let weight = entry.key.evaluate(percent) * self.blend;
            if weight == 0.0 {
                continue;
            }
            if entry.use_look_target {
                let to_target = entry.target - sample.position;
                if to_target.length_squared() > 1e-12 {
                    let aim = look_rotation(to_target, sample.up);
                    look = look.slerp(aim, weight);
                }
            } else {
                let euler = Quat::from_euler(
                    EulerRot::XYZ,
                    entry.rotation.x.to_radians(),
                    entry.rotation.y.to_radians(),
                    entry.rotation.z.to_radians(),
                );
                offset = offset.slerp(offset * euler, weight);
            }
        }

        let rotation = look * offset;
        sample.forward = rotation * Vec3::Z;
        sample.up = rotation * local_up;
    }
}

impl Default for RotationModifier {
    fn default() -> Self {
        Self::new()
    }
}

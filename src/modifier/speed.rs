//! Follower-Speed-Modifier: skaliert die Geschwindigkeit entlang der Spline.
//!
//! Wie der Mesh-Scale-Modifier wertbasiert: der Follower fragt pro
//! Prozent die modifizierte Geschwindigkeit ab.

use super::{Key, ValueBlendMode};

/// Fenster-Key mit Geschwindigkeitsbeitrag bzw. Zielfaktor.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowerSpeedKey {
    pub key: Key,
    pub speed: f32,
}

impl FollowerSpeedKey {
    pub fn new(feather_start: f64, feather_end: f64, speed: f32) -> Self {
        Self {
            key: Key::new(feather_start, feather_end),
            speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowerSpeedModifier {
    pub keys: Vec<FollowerSpeedKey>,
    pub blend: f32,
    pub use_clipped_percent: bool,
    pub mode: ValueBlendMode,
}

impl FollowerSpeedModifier {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            blend: 1.0,
            use_clipped_percent: false,
            mode: ValueBlendMode::default(),
        }
    }

    /// Liefert die modifizierte Geschwindigkeit für `percent`.
    pub fn apply(&self, base_speed: f32, percent: f64) -> f32 {
        let mut result = base_speed;
        for entry in &self.keys {
            let weight = entry.key.evaluate(percent) * self.blend;
            if weight == 0.0 {
                continue;
            }
            match self.mode {
                ValueBlendMode::Add => result += entry.speed * weight,
                ValueBlendMode::Multiply => {
                    result *= 1.0 + (entry.speed - 1.0) * weight;
                }
            }
        }
        result
    }
}

impl Default for FollowerSpeedModifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Curve;
    use approx::assert_relative_eq;

    fn plateau_key(speed: f32) -> FollowerSpeedKey {
        let mut key = FollowerSpeedKey::new(0.0, 1.0, speed);
        key.key.interpolation = Curve::linear(0.0, 1.0);
        key
    }

    #[test]
    fn add_mode_raises_the_speed() {
        let mut modifier = FollowerSpeedModifier::new();
        modifier.keys.push(plateau_key(2.0));

        assert_relative_eq!(modifier.apply(1.0, 0.5), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn multiply_mode_scales_the_speed() {
        let mut modifier = FollowerSpeedModifier::new();
        modifier.mode = ValueBlendMode::Multiply;
        modifier.keys.push(plateau_key(3.0));

        assert_relative_eq!(modifier.apply(2.0, 0.5), 6.0, epsilon = 1e-6);
    }

    #[test]
    fn outside_the_window_speed_is_unchanged() {
        let mut modifier = FollowerSpeedModifier::new();
        modifier.keys.push(FollowerSpeedKey::new(0.2, 0.4, 5.0));

        assert_eq!(modifier.apply(2.5, 0.9), 2.5);
    }
}

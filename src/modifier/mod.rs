//! Sample-Modifier: gefensterte Keys verändern ausgewertete Spline-Samples.
//!
//! Jede Modifier-Art besitzt eine homogene Liste artspezifischer Keys.
//! Die Sample-mutierenden Arten (Farbe, Größe, Rotation, Offset) werden
//! über das geschlossene [`SampleModifier`]-Enum per Match angewendet;
//! MeshScale und FollowerSpeed liefern reine Werte und werden von ihren
//! Konsumenten (Mesh-Extrusion, Follower) direkt gehalten.

pub mod color;
pub mod key;
pub mod mesh_scale;
pub mod offset;
pub mod rotation;
pub mod size;
pub mod speed;

pub use color::{ColorBlendMode, ColorKey, ColorModifier};
pub use key::Key;
pub use mesh_scale::{MeshScaleKey, MeshScaleModifier};
pub use offset::{OffsetKey, OffsetModifier};
pub use rotation::{RotationKey, RotationModifier};
pub use size::{SizeKey, SizeModifier};
pub use speed::{FollowerSpeedKey, FollowerSpeedModifier};

use crate::core::SplineSample;
use crate::shared::bezier::inverse_lerp;

/// Wirkungsweise wertbasierter Modifier (Größe, MeshScale, Speed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueBlendMode {
    /// Gewichteter Beitrag wird addiert
    #[default]
    Add,
    /// Gewichtete Überblendung zum Zielfaktor
    Multiply,
}

/// Geschlossene Menge der Sample-mutierenden Modifier-Arten.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleModifier {
    Color(ColorModifier),
    Size(SizeModifier),
    Rotation(RotationModifier),
    Offset(OffsetModifier),
}

impl SampleModifier {
    /// Wendet den Modifier auf das Sample an. `percent` ist der
    /// auszuwertende Prozent (roh oder bereits geclippt, siehe
    /// [`ModifierStack::apply`]).
    pub fn apply(&self, sample: &mut SplineSample, percent: f64) {
        match self {
            SampleModifier::Color(m) => m.apply(sample, percent),
            SampleModifier::Size(m) => m.apply(sample, percent),
            SampleModifier::Rotation(m) => m.apply(sample, percent),
            SampleModifier::Offset(m) => m.apply(sample, percent),
        }
    }

    pub fn use_clipped_percent(&self) -> bool {
        match self {
            SampleModifier::Color(m) => m.use_clipped_percent,
            SampleModifier::Size(m) => m.use_clipped_percent,
            SampleModifier::Rotation(m) => m.use_clipped_percent,
            SampleModifier::Offset(m) => m.use_clipped_percent,
        }
    }
}

/// Bildet einen globalen Prozent in den Clip-Bereich `[from, to]` ab.
///
/// Analog zur Fenster-Abbildung der Keys: läuft der Bereich über die
/// 0/1-Naht (`from > to`), wird gewickelt; außerhalb liegende Werte
/// liefern 0.
pub fn clip_percent(percent: f64, from: f64, to: f64) -> f64 {
    if from > to {
        let length = (1.0 - from) + to;
        if percent > from {
            inverse_lerp(from, from + length, percent)
        } else if percent < to {
            inverse_lerp(-(1.0 - from), to, percent)
        } else {
            0.0
        }
    } else {
        inverse_lerp(from, to, percent)
    }
}

/// Geordneter Stack von Sample-Modifiern mit Host-Clip-Bereich.
///
/// Modifier mit gesetztem `use_clipped_percent` werten den in den
/// Clip-Bereich abgebildeten Prozent aus, alle anderen den rohen
/// Sample-Prozent.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierStack {
    pub modifiers: Vec<SampleModifier>,
    /// Beginn des Host-Clip-Bereichs
    pub clip_from: f64,
    /// Ende des Host-Clip-Bereichs
    pub clip_to: f64,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self {
            modifiers: Vec::new(),
            clip_from: 0.0,
            clip_to: 1.0,
        }
    }

    /// Wendet alle Modifier in Listenreihenfolge auf das Sample an.
    pub fn apply(&self, sample: &mut SplineSample) {
        let clipped = clip_percent(sample.percent, self.clip_from, self.clip_to);
        for modifier in &self.modifiers {
            let percent = if modifier.use_clipped_percent() {
                clipped
            } else {
                sample.percent
            };
            modifier.apply(sample, percent);
        }
    }
}

impl Default for ModifierStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Curve};
    use approx::assert_relative_eq;

    #[test]
    fn clip_percent_is_identity_for_full_range() {
        assert_relative_eq!(clip_percent(0.3, 0.0, 1.0), 0.3);
        assert_relative_eq!(clip_percent(0.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(clip_percent(1.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn clip_percent_remaps_into_subrange() {
        assert_relative_eq!(clip_percent(0.75, 0.5, 1.0), 0.5);
        assert_relative_eq!(clip_percent(0.5, 0.5, 1.0), 0.0);
        assert_relative_eq!(clip_percent(0.25, 0.5, 1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn clip_percent_wraps_across_the_seam() {
        assert_relative_eq!(clip_percent(0.9, 0.8, 0.2), 0.25, epsilon = 1e-12);
        assert_relative_eq!(clip_percent(0.1, 0.8, 0.2), 0.75, epsilon = 1e-12);
        assert_relative_eq!(clip_percent(0.5, 0.8, 0.2), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn stack_applies_modifiers_in_list_order() {
        let mut first = ColorModifier::new();
        let mut key = ColorKey::new(0.0, 1.0, Color::rgb(1.0, 0.0, 0.0));
        key.key.interpolation = Curve::linear(0.0, 1.0);
        first.keys.push(key.clone());

        let mut second = ColorModifier::new();
        key.color = Color::rgb(0.0, 0.0, 1.0);
        second.keys.push(key);

        let mut stack = ModifierStack::new();
        stack.modifiers.push(SampleModifier::Color(first));
        stack.modifiers.push(SampleModifier::Color(second));

        let mut sample = SplineSample {
            percent: 0.5,
            ..SplineSample::default()
        };
        stack.apply(&mut sample);
        // Der spätere Modifier überlagert den früheren vollständig
        assert_eq!(sample.color, Color::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn clipped_modifier_sees_the_remapped_percent() {
        // Key deckt nur das obere lokale Viertel ab; im Clip-Bereich
        // [0.5, 1.0] liegt der globale Prozent 0.9 bei lokal 0.8.
        let mut modifier = SizeModifier::new();
        let mut size_key = SizeKey::new(0.75, 1.0, 2.0);
        size_key.key.interpolation = Curve::linear(0.0, 1.0);
        size_key.key.set_center_start(0.0);
        size_key.key.set_center_end(1.0);
        modifier.keys.push(size_key);
        modifier.use_clipped_percent = true;

        let mut stack = ModifierStack::new();
        stack.clip_from = 0.5;
        stack.clip_to = 1.0;
        stack.modifiers.push(SampleModifier::Size(modifier));

        let mut inside = SplineSample {
            percent: 0.9,
            ..SplineSample::default()
        };
        stack.apply(&mut inside);
        assert_relative_eq!(inside.size, 3.0, epsilon = 1e-5);

        let mut outside = SplineSample {
            percent: 0.6,
            ..SplineSample::default()
        };
        stack.apply(&mut outside);
        assert_eq!(outside.size, 1.0, "lokal 0.2 liegt vor dem Key-Fenster");
    }

    #[test]
    fn empty_stack_leaves_the_sample_untouched() {
        let stack = ModifierStack::new();
        let mut sample = SplineSample::default();
        let before = sample;
        stack.apply(&mut sample);
        assert_eq!(sample, before);
    }
}

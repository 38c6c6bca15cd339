//! Feather-Key: gefenstertes Gewichtsprofil auf dem zirkulären Spline-Prozent.

use crate::core::Curve;
use crate::shared::bezier::{inverse_lerp, lerp};
use crate::shared::options::{DEFAULT_CENTER_END, DEFAULT_CENTER_START};

/// Gewichtsfenster auf dem zirkulären Prozentbereich [0,1).
///
/// `feather_start`/`feather_end` begrenzen das aktive Fenster; liegt
/// `feather_start` hinter `feather_end`, wickelt sich das Fenster über
/// die 0/1-Naht. `center_start`/`center_end` markieren das Plateau im
/// lokalen Fensterraum (0..1). Alle Setter clampen, die Auswertung hat
/// keine Fehlerpfade.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    feather_start: f64,
    feather_end: f64,
    center_start: f64,
    center_end: f64,
    /// Interpolationsprofil des An-/Abstiegs (erwartet 0 -> 1)
    pub interpolation: Curve,
    /// Gewichtsfaktor dieses Keys
    pub blend: f32,
}

impl Key {
    /// Key über dem globalen Fenster `[feather_start, feather_end]`
    /// mit Standard-Plateau und weichem Anstiegsprofil.
    pub fn new(feather_start: f64, feather_end: f64) -> Self {
        Self {
            feather_start: feather_start.clamp(0.0, 1.0),
            feather_end: feather_end.clamp(0.0, 1.0),
            center_start: DEFAULT_CENTER_START,
            center_end: DEFAULT_CENTER_END,
            interpolation: Curve::default(),
            blend: 1.0,
        }
    }

    pub fn feather_start(&self) -> f64 {
        self.feather_start
    }

    pub fn feather_end(&self) -> f64 {
        self.feather_end
    }

    pub fn center_start(&self) -> f64 {
        self.center_start
    }

    pub fn center_end(&self) -> f64 {
        self.center_end
    }

    pub fn set_feather_start(&mut self, value: f64) {
        self.feather_start = value.clamp(0.0, 1.0);
    }

    pub fn set_feather_end(&mut self, value: f64) {
        self.feather_end = value.clamp(0.0, 1.0);
    }

    /// Setzt den Plateau-Beginn; `center_end` wird bei Bedarf
    /// nachgezogen, damit `center_start <= center_end` gilt.
    pub fn set_center_start(&mut self, value: f64) {
        self.center_start = value.clamp(0.0, 1.0);
        if self.center_end < self.center_start {
            self.center_end = self.center_start;
        }
    }

    /// Setzt das Plateau-Ende; `center_start` wird bei Bedarf
    /// nachgezogen, damit `center_start <= center_end` gilt.
    pub fn set_center_end(&mut self, value: f64) {
        self.center_end = value.clamp(0.0, 1.0);
        if self.center_start > self.center_end {
            self.center_start = self.center_end;
        }
    }

    /// Liegt `t` im aktiven Fenster (inklusive Ränder)?
    pub fn contains(&self, t: f64) -> bool {
        if self.feather_start <= self.feather_end {
            t >= self.feather_start && t <= self.feather_end
        } else {
            t >= self.feather_start || t <= self.feather_end
        }
    }

    /// Bildet den globalen Prozent `t` in den lokalen Fensterraum ab.
    ///
    /// Im gewickelten Fall läuft das Fenster von `feather_start` über
    /// die Naht bis `feather_end`; Werte außerhalb liefern 0.
    pub fn global_to_local_percent(&self, t: f64) -> f64 {
        if self.feather_start > self.feather_end {
            let length = (1.0 - self.feather_start) + self.feather_end;
            if t > self.feather_start {
                inverse_lerp(self.feather_start, self.feather_start + length, t)
            } else if t < self.feather_end {
                inverse_lerp(-(1.0 - self.feather_start), self.feather_end, t)
            } else {
                0.0
            }
        } else {
            inverse_lerp(self.feather_start, self.feather_end, t)
        }
    }

    /// Umkehrung von [`Key::global_to_local_percent`]; Ergebnisse werden
    /// in [0,1) zurückgewickelt.
    pub fn local_to_global_percent(&self, local: f64) -> f64 {
        if self.feather_start > self.feather_end {
            let length = (1.0 - self.feather_start) + self.feather_end;
            let global = self.feather_start + local * length;
            if global > 1.0 {
                global - 1.0
            } else {
                global
            }
        } else {
            lerp(self.feather_start, self.feather_end, local)
        }
    }

    /// Gewicht des Keys am globalen Prozent `t`.
    ///
    /// Außerhalb des Fensters exakt 0. Innerhalb: Anstieg bis
    /// `center_start`, Plateau bei `interpolation(1.0)`, Abstieg ab
    /// `center_end`, skaliert mit `blend`.
    pub fn evaluate(&self, t: f64) -> f32 {
        if !self.contains(t) {
            return 0.0;
        }
        let local = self.global_to_local_percent(t);
        let curve_pos = if self.center_start > 0.0 && local < self.center_start {
            local / self.center_start
        } else if local > self.center_end {
            1.0 - inverse_lerp(self.center_end, 1.0, local)
        } else {
            1.0
        };
        self.interpolation.evaluate(curve_pos as f32) * self.blend
    }

    /// Globale Position der Plateau-Mitte.
    pub fn position(&self) -> f64 {
        self.local_to_global_percent(lerp(self.center_start, self.center_end, 0.5))
    }

    /// Verschiebt den gesamten Key, sodass die Plateau-Mitte auf
    /// `value` liegt; beide Feather-Grenzen wandern um dasselbe Delta
    /// und werden in [0,1) gewickelt.
    pub fn set_position(&mut self, value: f64) {
        let delta = value - self.position();
        self.feather_start = (self.feather_start + delta).rem_euclid(1.0);
        self.feather_end = (self.feather_end + delta).rem_euclid(1.0);
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::new(0.0, 1.0)
    }
}

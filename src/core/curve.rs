//! 1D-Keyframe-Kurve für Interpolationsprofile.
//!
//! Ersetzt die Animationskurven der Host-Engine durch einen minimalen
//! eigenständigen Typ: sortierte Keyframes mit Hermite-Tangenten,
//! außerhalb des Keyframe-Bereichs wird auf den Randwert geclampt.

/// Einzelner Keyframe einer [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveKeyframe {
    /// Zeitpunkt auf der x-Achse (typisch 0.0..1.0)
    pub time: f32,
    /// Wert an diesem Zeitpunkt
    pub value: f32,
    /// Eingehende Tangente (Steigung dv/dt)
    pub in_tangent: f32,
    /// Ausgehende Tangente (Steigung dv/dt)
    pub out_tangent: f32,
}

impl CurveKeyframe {
    pub const fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Kubische Hermite-Kurve über sortierten Keyframes.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Keyframes, aufsteigend nach `time` sortiert
    keys: Vec<CurveKeyframe>,
}

impl Curve {
    /// Erstellt eine Kurve und sortiert die Keyframes nach Zeit.
    pub fn new(mut keys: Vec<CurveKeyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Linearer Anstieg von `v0` (t=0) nach `v1` (t=1).
    pub fn linear(v0: f32, v1: f32) -> Self {
        let slope = v1 - v0;
        Self::new(vec![
            CurveKeyframe::new(0.0, v0, slope, slope),
            CurveKeyframe::new(1.0, v1, slope, slope),
        ])
    }

    /// Weicher Anstieg von `v0` nach `v1` mit Null-Tangenten an beiden Enden.
    pub fn ease_in_out(v0: f32, v1: f32) -> Self {
        Self::new(vec![
            CurveKeyframe::new(0.0, v0, 0.0, 0.0),
            CurveKeyframe::new(1.0, v1, 0.0, 0.0),
        ])
    }

    /// Konstante Kurve mit genau einem Keyframe.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![CurveKeyframe::new(0.0, value, 0.0, 0.0)])
    }

    pub fn keyframes(&self) -> &[CurveKeyframe] {
        &self.keys
    }

    /// Wertet die Kurve bei `t` aus.
    ///
    /// Zwischen zwei Keyframes gilt die Hermite-Basis
    /// H(s) = h00·v0 + h10·dt·m0 + h01·v1 + h11·dt·m1
    /// mit s als normalisierter Segmentposition. Auswertung exakt am
    /// Keyframe liefert dessen Wert ohne Rundungsfehler.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // Erster Keyframe mit time > t; das Segment davor enthält t.
        let idx = self.keys.partition_point(|k| k.time <= t);
        let k0 = self.keys[idx - 1];
        let k1 = self.keys[idx];
        let dt = k1.time - k0.time;
        if dt <= f32::EPSILON {
            return k1.value;
        }

        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;
        h00 * k0.value + h10 * dt * k0.out_tangent + h01 * k1.value + h11 * dt * k1.in_tangent
    }
}

impl Default for Curve {
    /// Default-Profil der Modifier-Keys: weicher Anstieg 0 -> 1.
    fn default() -> Self {
        Curve::ease_in_out(0.0, 1.0)
    }
}

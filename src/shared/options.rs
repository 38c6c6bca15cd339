//! Zentrale Konfiguration für Import, Export und Modifier-Defaults.
//!
//! Die `const`-Werte bleiben als Fallback/Default erhalten; die
//! Options-Structs werden vom Host-Tool gehalten und serialisiert.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::Color;

// ── Control-Points ──────────────────────────────────────────────────

/// Standard-Größe neuer Control-Points.
pub const DEFAULT_POINT_SIZE: f32 = 1.0;
/// Standard-Farbe neuer Control-Points (RGBA: Weiß).
pub const DEFAULT_POINT_COLOR: Color = Color::WHITE;
/// Standard-Normale importierter 2D-Formen: -Z, zeigt zum Betrachter.
pub const DEFAULT_NORMAL: Vec3 = Vec3::new(0.0, 0.0, -1.0);

// ── Feather-Keys ────────────────────────────────────────────────────

/// Lokaler Plateau-Beginn neuer Keys.
pub const DEFAULT_CENTER_START: f64 = 0.25;
/// Lokales Plateau-Ende neuer Keys.
pub const DEFAULT_CENTER_END: f64 = 0.75;

// ── SVG-Import ──────────────────────────────────────────────────────

/// Bogen-Unterteilung: Viertel-Grenzen näher als dieser Abstand
/// (in Voll-Ellipsen-Anteilen) am Segmentende werden verschmolzen.
pub const ARC_SEGMENT_EPSILON: f64 = 1e-4;

// ── SVG-Export ──────────────────────────────────────────────────────

/// Nachkommastellen für Koordinaten im SVG-Output.
pub const EXPORT_FLOAT_PRECISION: usize = 3;

// ── Achsen-Projektion ───────────────────────────────────────────────

/// Projektionsachse beim SVG-Export: welche Weltachse verworfen wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Seitenansicht: (z, -y)
    X,
    /// Draufsicht: (x, z)
    Y,
    /// Frontansicht: (x, -y) - Umkehrung des Imports
    #[default]
    Z,
}

// ── Laufzeit-Optionen (serialisierbar) ──────────────────────────────

/// Optionen für den SVG-Import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SvgImportOptions {
    /// Einheitlicher Skalierungsfaktor auf alle importierten Koordinaten
    pub scale: f32,
    /// Größe neuer Control-Points
    pub default_size: f32,
    /// Farbe neuer Control-Points
    pub default_color: Color,
}

impl Default for SvgImportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            default_size: DEFAULT_POINT_SIZE,
            default_color: DEFAULT_POINT_COLOR,
        }
    }
}

/// Optionen für den SVG-Export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SvgExportOptions {
    /// Projektionsachse (3D -> 2D)
    pub axis: Axis,
    /// Nachkommastellen der ausgegebenen Koordinaten
    pub precision: usize,
}

impl Default for SvgExportOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Z,
            precision: EXPORT_FLOAT_PRECISION,
        }
    }
}

//! Core-Domänentypen: Samples, Farben, Kurven, Control-Points und Pfade.

pub mod color;
pub mod curve;
pub mod path;
pub mod sample;

pub use color::Color;
pub use curve::{Curve, CurveKeyframe};
pub use path::{ControlPoint, PathType, PointKind, SplinePath};
pub use sample::{look_rotation, SplineSample};

//! Geteilte Mathematik und Konfiguration für Import, Export und Modifier.

pub mod arc;
pub mod bezier;
pub mod options;

pub use arc::{arc_segment_fractions, arc_to_cubic_segments, endpoint_to_center, CenterArc};
pub use bezier::{cubic_bezier_point, cubic_bezier_tangent, quadratic_to_cubic, KAPPA};
pub use options::{Axis, SvgExportOptions, SvgImportOptions};
pub use options::{DEFAULT_NORMAL, DEFAULT_POINT_COLOR, DEFAULT_POINT_SIZE};

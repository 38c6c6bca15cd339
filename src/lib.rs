//! splinekit Library.
//! Sample-Modifier-Pipeline und SVG-Pfad-Konverter, exportiert als Library
//! für Tests und Wiederverwendung in Spline-Authoring-Tools.

pub mod core;
pub mod csv;
pub mod modifier;
pub mod primitives;
pub mod shared;
pub mod svg;

pub use core::{
    Color, ControlPoint, Curve, CurveKeyframe, PathType, PointKind, SplinePath, SplineSample,
};
pub use modifier::{
    ColorBlendMode, ColorModifier, FollowerSpeedModifier, Key, MeshScaleModifier, ModifierStack,
    OffsetModifier, RotationModifier, SampleModifier, SizeModifier, ValueBlendMode,
};
pub use shared::{Axis, SvgExportOptions, SvgImportOptions};
pub use svg::{load_svg_document, parse_svg_document, write_svg_document, SvgDocument};

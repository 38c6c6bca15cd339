//! SVG Import/Export für Spline-Pfade.
//!
//! Der Import liest `path`-Elemente und Grundformen (`rect`, `circle`,
//! `ellipse`, `polygon`, `polyline`, `line`) samt verschachtelter
//! Transformationen und liefert sie als nach Ursprungsform gruppierte
//! Spline-Pfade. Der Export projiziert 3D-Pfade zurück auf eine
//! wählbare Ebene.

pub mod builder;
pub mod document;
pub mod parser;
pub mod writer;

pub use document::SvgDocument;
pub use parser::{load_svg_document, parse_svg_document, parse_svg_document_with};
pub use writer::{save_svg_document, write_svg_document};

//! Dokumentmodell: geparste Splines nach Form-Herkunft gruppiert.

use crate::core::SplinePath;

/// Ergebnis eines SVG-Imports.
///
/// Die Sammlungen sind nach Element-Herkunft getrennt, damit Aufrufer
/// z.B. nur Rechtecke oder nur freie Pfade weiterverarbeiten können.
/// Polylines landen als offene Pfade in `polygons`, Kreise in
/// `ellipses`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgDocument {
    pub paths: Vec<SplinePath>,
    pub polygons: Vec<SplinePath>,
    pub rectangles: Vec<SplinePath>,
    pub ellipses: Vec<SplinePath>,
    pub lines: Vec<SplinePath>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alle Splines in fester Reihenfolge: Pfade, Polygone, Rechtecke,
    /// Ellipsen, Linien.
    pub fn all(&self) -> impl Iterator<Item = &SplinePath> {
        self.paths
            .iter()
            .chain(self.polygons.iter())
            .chain(self.rectangles.iter())
            .chain(self.ellipses.iter())
            .chain(self.lines.iter())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
            + self.polygons.len()
            + self.rectangles.len()
            + self.ellipses.len()
            + self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PathType;

    #[test]
    fn all_preserves_the_collection_order() {
        let mut document = SvgDocument::new();
        document.paths.push(SplinePath::new("a", PathType::Linear));
        document.rectangles.push(SplinePath::new("c", PathType::Linear));
        document.polygons.push(SplinePath::new("b", PathType::Linear));
        document.lines.push(SplinePath::new("e", PathType::Linear));
        document.ellipses.push(SplinePath::new("d", PathType::Linear));

        let names: Vec<&str> = document.all().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(document.len(), 5);
        assert!(!document.is_empty());
    }
}

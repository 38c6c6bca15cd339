//! CSV Import/Export für Control-Point-Listen.
//!
//! Zeilenformat: eine Kopfzeile mit Spaltennamen, danach ein Punkt pro
//! Zeile. Position ist Pflicht, alle weiteren Spalten sind über
//! [`CsvOptions`] abschaltbar und beim Einlesen optional.

use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Color, ControlPoint, PathType, PointKind, SplinePath};
use crate::shared::options::EXPORT_FLOAT_PRECISION;

/// Spaltenauswahl für den CSV-Export.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CsvOptions {
    pub tangents: bool,
    pub normal: bool,
    pub size: bool,
    pub color: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            tangents: true,
            normal: true,
            size: true,
            color: true,
        }
    }
}

/// Schreibt die Punkte eines Pfads als CSV-String.
pub fn write_csv(path: &SplinePath, options: &CsvOptions) -> String {
    let mut output = String::new();

    let mut header: Vec<&str> = vec!["px", "py", "pz"];
    if options.tangents {
        header.extend(["tix", "tiy", "tiz", "tox", "toy", "toz"]);
    }
    if options.normal {
        header.extend(["nx", "ny", "nz"]);
    }
    if options.size {
        header.push("size");
    }
    if options.color {
        header.extend(["r", "g", "b", "a"]);
    }
    output.push_str(&header.join(","));
    output.push('\n');

    for point in &path.points {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        push_vec3(&mut row, point.position);
        if options.tangents {
            push_vec3(&mut row, point.tangent_in);
            push_vec3(&mut row, point.tangent_out);
        }
        if options.normal {
            push_vec3(&mut row, point.normal);
        }
        if options.size {
            row.push(format_float(point.size));
        }
        if options.color {
            row.push(format_float(point.color.r));
            row.push(format_float(point.color.g));
            row.push(format_float(point.color.b));
            row.push(format_float(point.color.a));
        }
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

/// Liest einen Pfad aus einem CSV-String.
///
/// Die Kopfzeile bestimmt die Spaltenzuordnung; `px,py,pz` sind
/// Pflicht. Fehlerhafte Zeilen werden mit Warnung übersprungen, ein
/// Dokument ohne gültige Punkte ist ein Fehler.
pub fn parse_csv(content: &str) -> Result<SplinePath> {
    let mut lines = content.lines();
    let header_line = lines.next().context("CSV ist leer")?;
    let columns: Vec<&str> = header_line.split(',').map(str::trim).collect();

    let index_of = |name: &str| columns.iter().position(|c| *c == name);
    let px = index_of("px").context("Spalte 'px' fehlt in der Kopfzeile")?;
    let py = index_of("py").context("Spalte 'py' fehlt in der Kopfzeile")?;
    let pz = index_of("pz").context("Spalte 'pz' fehlt in der Kopfzeile")?;
    let tangent_in = [index_of("tix"), index_of("tiy"), index_of("tiz")];
    let tangent_out = [index_of("tox"), index_of("toy"), index_of("toz")];
    let normal = [index_of("nx"), index_of("ny"), index_of("nz")];
    let size = index_of("size");
    let color = [index_of("r"), index_of("g"), index_of("b"), index_of("a")];

    let has_tangents = tangent_in.iter().chain(&tangent_out).all(Option::is_some);
    let path_type = if has_tangents {
        PathType::Bezier
    } else {
        PathType::Linear
    };
    let mut path = SplinePath::new("csv", path_type);

    for (number, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<Option<f32>> = line
            .split(',')
            .map(|cell| cell.trim().parse::<f32>().ok())
            .collect();
        if values.len() != columns.len() {
            log::warn!(
                "CSV-Zeile {} übersprungen: {} statt {} Spalten",
                number + 2,
                values.len(),
                columns.len()
            );
            continue;
        }
        let cell = |index: Option<usize>| index.and_then(|i| values[i]);
        let Some(position) = read_vec3(&values, [Some(px), Some(py), Some(pz)]) else {
            log::warn!("CSV-Zeile {} übersprungen: ungültige Position", number + 2);
            continue;
        };

        let mut point = ControlPoint::linear(position);
        if let Some(tangent) = read_vec3(&values, tangent_in) {
            point.tangent_in = tangent;
        }
        if let Some(tangent) = read_vec3(&values, tangent_out) {
            point.tangent_out = tangent;
        }
        if point.tangent_in != point.position || point.tangent_out != point.position {
            point.kind = PointKind::Broken;
        }
        if let Some(normal) = read_vec3(&values, normal) {
            point.normal = normal;
        }
        if let Some(size) = cell(size) {
            point.size = size;
        }
        if let [Some(r), Some(g), Some(b), Some(a)] = color.map(cell) {
            point.color = Color::new(r, g, b, a);
        }
        path.points.push(point);
    }

    if path.points.is_empty() {
        bail!("CSV enthaelt keine gueltigen Punkte");
    }
    Ok(path)
}

/// Lädt einen Pfad aus einer CSV-Datei; der Name wird aus dem
/// Dateinamen übernommen.
pub fn load_csv(path: impl AsRef<Path>) -> Result<SplinePath> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Konnte CSV-Datei nicht lesen: {}", path.display()))?;
    let mut spline = parse_csv(&content)?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        spline.name = stem.to_string();
    }
    Ok(spline)
}

/// Speichert die Punkte eines Pfads als CSV-Datei.
pub fn save_csv(
    path: impl AsRef<Path>,
    spline: &SplinePath,
    options: &CsvOptions,
) -> Result<()> {
    let path = path.as_ref();
    let content = write_csv(spline, options);
    std::fs::write(path, content)
        .with_context(|| format!("Konnte CSV-Datei nicht schreiben: {}", path.display()))?;
    log::info!("CSV gespeichert nach: {}", path.display());
    Ok(())
}

fn push_vec3(row: &mut Vec<String>, vector: Vec3) {
    row.push(format_float(vector.x));
    row.push(format_float(vector.y));
    row.push(format_float(vector.z));
}

fn read_vec3(values: &[Option<f32>], indices: [Option<usize>; 3]) -> Option<Vec3> {
    let [x, y, z] = indices.map(|index| index.and_then(|i| values[i]));
    Some(Vec3::new(x?, y?, z?))
}

fn format_float(value: f32) -> String {
    format!("{:.prec$}", value, prec = EXPORT_FLOAT_PRECISION)
}

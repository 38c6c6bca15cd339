//! Parser für SVG-Dokumente.
//!
//! Liest Pfade und Grundformen aus einem SVG-String und wandelt sie in
//! Spline-Pfade um. Gruppen-Transformationen werden über einen
//! Matrix-Stack vorkomponiert, jede Form erhält beim Finalisieren genau
//! eine Gesamtmatrix. Fehlerhafte Einzelformen werden mit Warnung
//! übersprungen, fehlerhaftes XML bricht den Import ab.

mod path_data;
mod transform;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec2, Vec3};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::primitives::{emit_ellipse, emit_rect, emit_rounded_rect};
use crate::shared::SvgImportOptions;
use crate::svg::builder::PathBuilder;
use crate::svg::document::SvgDocument;

use path_data::{parse_float_array, parse_path_data};
use transform::parse_transform;

/// Parsed ein SVG-Dokument mit Standardoptionen.
pub fn parse_svg_document(content: &str) -> Result<SvgDocument> {
    parse_svg_document_with(content, &SvgImportOptions::default())
}

/// Parsed ein SVG-Dokument aus einem String.
pub fn parse_svg_document_with(content: &str, options: &SvgImportOptions) -> Result<SvgDocument> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut document = SvgDocument::new();
    // Matrix-Stack: oberstes Element ist die aktuell gültige Gesamtmatrix
    let mut transforms: Vec<Mat4> = vec![Mat4::IDENTITY];
    let mut counters: HashMap<String, usize> = HashMap::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let matrix = read_element(
                    e,
                    &reader,
                    &transforms,
                    options,
                    &mut counters,
                    &mut document,
                )?;
                // Für jedes Start-Event pushen, damit End symmetrisch poppt
                transforms.push(matrix);
            }
            Ok(Event::Empty(ref e)) => {
                read_element(
                    e,
                    &reader,
                    &transforms,
                    options,
                    &mut counters,
                    &mut document,
                )?;
            }
            Ok(Event::End(_)) => {
                if transforms.len() > 1 {
                    transforms.pop();
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des SVG"),
            _ => {}
        }

        buffer.clear();
    }

    Ok(document)
}

/// Lädt ein SVG-Dokument aus einer Datei.
pub fn load_svg_document(path: impl AsRef<Path>) -> Result<SvgDocument> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Konnte SVG-Datei nicht lesen: {}", path.display()))?;
    parse_svg_document(&content)
}

/// Verarbeitet ein einzelnes Element und liefert die für seine Kinder
/// gültige Gesamtmatrix zurück.
fn read_element(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    transforms: &[Mat4],
    options: &SvgImportOptions,
    counters: &mut HashMap<String, usize>,
    document: &mut SvgDocument,
) -> Result<Mat4> {
    let name = e.name();
    let local = name.local_name();
    let tag = reader.decoder().decode(local.as_ref())?;
    let attributes = collect_attributes(e, reader)?;

    let top = transforms.last().copied().unwrap_or(Mat4::IDENTITY);
    let matrix = match attributes.get("transform") {
        Some(value) => top * parse_transform(value),
        None => top,
    };

    if let Err(err) = read_shape(&tag, &attributes, matrix, options, counters, document) {
        log::warn!("Form <{}> übersprungen: {:#}", tag, err);
    }

    Ok(matrix)
}

fn collect_attributes(e: &BytesStart, reader: &Reader<&[u8]>) -> Result<HashMap<String, String>> {
    let mut attributes = HashMap::new();
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

/// Liest eine einzelne Form und hängt sie an die passende Sammlung an.
/// Unbekannte Tags (svg, g, defs, ...) tragen höchstens Transformationen
/// bei und werden hier ignoriert.
fn read_shape(
    tag: &str,
    attributes: &HashMap<String, String>,
    matrix: Mat4,
    options: &SvgImportOptions,
    counters: &mut HashMap<String, usize>,
    document: &mut SvgDocument,
) -> Result<()> {
    match tag {
        "path" => {
            let name = shape_name(attributes, tag, counters);
            let d = attributes.get("d").context("Attribut 'd' fehlt")?;
            for builder in parse_path_data(d, &name) {
                if let Some(path) = builder.finish(&matrix, options) {
                    document.paths.push(path);
                }
            }
        }
        "polygon" | "polyline" => {
            let name = shape_name(attributes, tag, counters);
            let points = attributes
                .get("points")
                .context("Attribut 'points' fehlt")?;
            let values = parse_float_array(points);
            if values.len() % 2 != 0 {
                bail!("Ungerade Anzahl an Koordinaten: {}", values.len());
            }
            if values.len() < 4 {
                bail!("Zu wenige Koordinaten: {}", values.len());
            }
            let mut builder = PathBuilder::new(name);
            for pair in values.chunks_exact(2) {
                builder.linear_to(Vec2::new(pair[0], pair[1]));
            }
            if tag == "polygon" {
                builder.close();
            }
            if let Some(path) = builder.finish(&matrix, options) {
                document.polygons.push(path);
            }
        }
        "rect" => {
            let name = shape_name(attributes, tag, counters);
            let width = float_attribute(attributes, "width").context("Attribut 'width' fehlt")?;
            let height =
                float_attribute(attributes, "height").context("Attribut 'height' fehlt")?;
            if width <= 0.0 || height <= 0.0 {
                bail!("Breite und Hoehe muessen positiv sein");
            }
            let x = float_attribute(attributes, "x").unwrap_or(0.0);
            let y = float_attribute(attributes, "y").unwrap_or(0.0);
            let size = Vec2::new(width, height);
            // Die Emitter arbeiten um den Ursprung, Lage steckt in der Matrix
            let center = Vec2::new(x, y) + size * 0.5;
            let matrix = matrix * Mat4::from_translation(center.extend(0.0));
            let radius = corner_radius(
                float_attribute(attributes, "rx"),
                float_attribute(attributes, "ry"),
            );
            let mut builder = PathBuilder::new(name);
            if radius.x > 0.0 && radius.y > 0.0 {
                emit_rounded_rect(&mut builder, size, radius);
            } else {
                emit_rect(&mut builder, size);
            }
            if let Some(path) = builder.finish(&matrix, options) {
                document.rectangles.push(path);
            }
        }
        "circle" => {
            let name = shape_name(attributes, tag, counters);
            let r = float_attribute(attributes, "r").context("Attribut 'r' fehlt")?;
            if r <= 0.0 {
                bail!("Radius muss positiv sein");
            }
            let cx = float_attribute(attributes, "cx").unwrap_or(0.0);
            let cy = float_attribute(attributes, "cy").unwrap_or(0.0);
            let matrix = matrix * Mat4::from_translation(Vec3::new(cx, cy, 0.0));
            let mut builder = PathBuilder::new(name);
            emit_ellipse(&mut builder, Vec2::splat(r));
            if let Some(path) = builder.finish(&matrix, options) {
                document.ellipses.push(path);
            }
        }
        "ellipse" => {
            let name = shape_name(attributes, tag, counters);
            let rx = float_attribute(attributes, "rx").context("Attribut 'rx' fehlt")?;
            let ry = float_attribute(attributes, "ry").context("Attribut 'ry' fehlt")?;
            if rx <= 0.0 || ry <= 0.0 {
                bail!("Radien muessen positiv sein");
            }
            let cx = float_attribute(attributes, "cx").unwrap_or(0.0);
            let cy = float_attribute(attributes, "cy").unwrap_or(0.0);
            let matrix = matrix * Mat4::from_translation(Vec3::new(cx, cy, 0.0));
            let mut builder = PathBuilder::new(name);
            emit_ellipse(&mut builder, Vec2::new(rx, ry));
            if let Some(path) = builder.finish(&matrix, options) {
                document.ellipses.push(path);
            }
        }
        "line" => {
            let name = shape_name(attributes, tag, counters);
            let x1 = float_attribute(attributes, "x1").unwrap_or(0.0);
            let y1 = float_attribute(attributes, "y1").unwrap_or(0.0);
            let x2 = float_attribute(attributes, "x2").unwrap_or(0.0);
            let y2 = float_attribute(attributes, "y2").unwrap_or(0.0);
            let mut builder = PathBuilder::new(name);
            builder.linear_to(Vec2::new(x1, y1));
            builder.linear_to(Vec2::new(x2, y2));
            if let Some(path) = builder.finish(&matrix, options) {
                document.lines.push(path);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Name aus dem `id`-Attribut, sonst Tag plus laufende Nummer pro Tag.
fn shape_name(
    attributes: &HashMap<String, String>,
    tag: &str,
    counters: &mut HashMap<String, usize>,
) -> String {
    if let Some(id) = attributes.get("id") {
        if !id.is_empty() {
            return id.clone();
        }
    }
    let counter = counters.entry(tag.to_string()).or_insert(0);
    *counter += 1;
    format!("{}_{}", tag, counter)
}

/// Erster Zahlenwert eines Attributs; Einheiten-Suffixe wie `px` werden
/// vom Tokenizer verworfen.
fn float_attribute(attributes: &HashMap<String, String>, key: &str) -> Option<f32> {
    attributes
        .get(key)
        .and_then(|value| parse_float_array(value).first().copied())
}

/// Eckenradius eines `rect`: fehlt eine Komponente, erbt sie die andere.
fn corner_radius(rx: Option<f32>, ry: Option<f32>) -> Vec2 {
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (None, None) => (0.0, 0.0),
    };
    Vec2::new(rx.max(0.0), ry.max(0.0))
}

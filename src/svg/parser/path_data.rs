//! Tokenizer und Kommando-Zustandsmaschine für das SVG-`d`-Attribut.

use glam::Vec2;

use crate::shared::arc::{arc_to_cubic_segments, endpoint_to_center};
use crate::shared::bezier::quadratic_to_cubic;
use crate::svg::builder::PathBuilder;

const COMMAND_LETTERS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// Zerlegt einen SVG-Zahlenstring in Floats.
///
/// Kommas und Whitespace trennen. Zusätzlich beginnt ein `-` eine neue
/// Zahl und ein zweiter `.` im selben Akkumulator schließt die
/// laufende Zahl und startet mit `0.` neu; `1.5.25-3` ergibt also
/// `[1.5, 0.25, -3.0]`. Exponenten (`e`/`E`, optional mit Vorzeichen)
/// setzen die laufende Zahl fort. Fremdzeichen beenden die laufende
/// Zahl und werden übersprungen.
pub(super) fn parse_float_array(text: &str) -> Vec<f32> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut seen_dot = false;

    for ch in text.chars() {
        match ch {
            '0'..='9' => current.push(ch),
            '.' => {
                if seen_dot {
                    flush_number(&mut current, &mut values);
                    current.push_str("0.");
                } else {
                    current.push(ch);
                }
                seen_dot = true;
            }
            '-' | '+' => {
                if current.ends_with('e') || current.ends_with('E') {
                    current.push(ch);
                } else {
                    flush_number(&mut current, &mut values);
                    seen_dot = false;
                    if ch == '-' {
                        current.push('-');
                    }
                }
            }
            'e' | 'E' => {
                if !current.is_empty() && !current.contains(['e', 'E']) {
                    current.push(ch);
                } else {
                    flush_number(&mut current, &mut values);
                    seen_dot = false;
                }
            }
            _ => {
                flush_number(&mut current, &mut values);
                seen_dot = false;
            }
        }
    }
    flush_number(&mut current, &mut values);
    values
}

fn flush_number(buffer: &mut String, out: &mut Vec<f32>) {
    if !buffer.is_empty() {
        if let Ok(value) = buffer.parse::<f32>() {
            out.push(value);
        } else {
            log::debug!("Zahlenfragment '{}' verworfen", buffer);
        }
    }
    buffer.clear();
}

/// Parsed ein komplettes `d`-Attribut in fertige (noch nicht
/// finalisierte) Builder, einen pro Subpfad. Folge-Subpfade erhalten
/// den Basisnamen mit laufender Nummer.
pub(super) fn parse_path_data(d: &str, name: &str) -> Vec<PathBuilder> {
    let mut machine = PathMachine::new(name);
    let mut command: Option<char> = None;
    let mut arg_start = 0usize;

    for (index, ch) in d.char_indices() {
        if COMMAND_LETTERS.contains(ch) {
            if let Some(cmd) = command {
                machine.run(cmd, &parse_float_array(&d[arg_start..index]));
            }
            command = Some(ch);
            arg_start = index + ch.len_utf8();
        }
    }
    if let Some(cmd) = command {
        machine.run(cmd, &parse_float_array(&d[arg_start..]));
    }
    machine.into_builders()
}

/// Familie des letzten Kommandos, für die S/T-Spiegelung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastCommand {
    Cubic,
    Quadratic,
    Other,
}

struct PathMachine {
    base_name: String,
    finished: Vec<PathBuilder>,
    builder: PathBuilder,
    pen: Vec2,
    subpath_start: Vec2,
    last_cubic_control: Vec2,
    last_quad_control: Vec2,
    last_command: LastCommand,
}

impl PathMachine {
    fn new(name: &str) -> Self {
        Self {
            base_name: name.to_string(),
            finished: Vec::new(),
            builder: PathBuilder::new(name),
            pen: Vec2::ZERO,
            subpath_start: Vec2::ZERO,
            last_cubic_control: Vec2::ZERO,
            last_quad_control: Vec2::ZERO,
            last_command: LastCommand::Other,
        }
    }

    fn run(&mut self, cmd: char, args: &[f32]) {
        let arity = command_arity(cmd);
        if arity > 0 && args.len() % arity != 0 {
            log::debug!(
                "Kommando '{}': {} überzählige Werte verworfen",
                cmd,
                args.len() % arity
            );
        }
        let relative = cmd.is_ascii_lowercase();
        match cmd.to_ascii_uppercase() {
            'M' => self.run_move(args, relative),
            'L' => {
                for chunk in args.chunks_exact(2) {
                    self.line_to(self.resolve(chunk[0], chunk[1], relative));
                }
            }
            'H' => {
                for chunk in args.chunks_exact(1) {
                    let target = if relative {
                        self.pen + Vec2::new(chunk[0], 0.0)
                    } else {
                        Vec2::new(chunk[0], self.pen.y)
                    };
                    self.line_to(target);
                }
            }
            'V' => {
                for chunk in args.chunks_exact(1) {
                    let target = if relative {
                        self.pen + Vec2::new(0.0, chunk[0])
                    } else {
                        Vec2::new(self.pen.x, chunk[0])
                    };
                    self.line_to(target);
                }
            }
            'C' => {
                for chunk in args.chunks_exact(6) {
                    let c1 = self.resolve(chunk[0], chunk[1], relative);
                    let c2 = self.resolve(chunk[2], chunk[3], relative);
                    let end = self.resolve(chunk[4], chunk[5], relative);
                    self.cubic_to(c1, c2, end);
                }
            }
            'S' => {
                for chunk in args.chunks_exact(4) {
                    let c1 = self.reflected_cubic_control();
                    let c2 = self.resolve(chunk[0], chunk[1], relative);
                    let end = self.resolve(chunk[2], chunk[3], relative);
                    self.cubic_to(c1, c2, end);
                }
            }
            'Q' => {
                for chunk in args.chunks_exact(4) {
                    let control = self.resolve(chunk[0], chunk[1], relative);
                    let end = self.resolve(chunk[2], chunk[3], relative);
                    self.quadratic_to(control, end);
                }
            }
            'T' => {
                for chunk in args.chunks_exact(2) {
                    let control = self.reflected_quad_control();
                    let end = self.resolve(chunk[0], chunk[1], relative);
                    self.quadratic_to(control, end);
                }
            }
            'A' => {
                for chunk in args.chunks_exact(7) {
                    let radii = Vec2::new(chunk[0], chunk[1]);
                    let large_arc = chunk[3] != 0.0;
                    let sweep = chunk[4] != 0.0;
                    let end = self.resolve(chunk[5], chunk[6], relative);
                    self.arc_to(radii, chunk[2], large_arc, sweep, end);
                }
            }
            'Z' => {
                if !args.is_empty() {
                    log::debug!("Werte nach 'Z' verworfen");
                }
                self.builder.close();
                self.pen = self.subpath_start;
                self.last_command = LastCommand::Other;
            }
            _ => {}
        }
    }

    fn run_move(&mut self, args: &[f32], relative: bool) {
        let mut chunks = args.chunks_exact(2);
        if let Some(first) = chunks.next() {
            self.flush_subpath();
            let target = self.resolve(first[0], first[1], relative);
            self.pen = target;
            self.subpath_start = target;
            self.builder.linear_to(target);
            self.last_command = LastCommand::Other;
        }
        // Weitere Paare nach M sind implizite Linetos
        for chunk in chunks {
            self.line_to(self.resolve(chunk[0], chunk[1], relative));
        }
    }

    fn line_to(&mut self, target: Vec2) {
        self.prepare_draw();
        self.builder.linear_to(target);
        self.pen = target;
        self.last_command = LastCommand::Other;
    }

    fn cubic_to(&mut self, c1: Vec2, c2: Vec2, end: Vec2) {
        self.prepare_draw();
        self.builder.cubic_to(c1, c2, end);
        self.pen = end;
        self.last_cubic_control = c2;
        self.last_command = LastCommand::Cubic;
    }

    fn quadratic_to(&mut self, control: Vec2, end: Vec2) {
        let (c1, c2) = quadratic_to_cubic(self.pen, control, end);
        self.prepare_draw();
        self.builder.cubic_to(c1, c2, end);
        self.pen = end;
        self.last_quad_control = control;
        self.last_command = LastCommand::Quadratic;
    }

    fn arc_to(&mut self, radii: Vec2, rotation_deg: f32, large_arc: bool, sweep: bool, end: Vec2) {
        self.prepare_draw();
        match endpoint_to_center(self.pen, end, radii, rotation_deg, large_arc, sweep) {
            Some(arc) => {
                let mut segments = arc_to_cubic_segments(&arc);
                if let Some(last) = segments.last_mut() {
                    // Letztes Segment endet exakt auf dem Kommando-Endpunkt
                    last.2 = end;
                }
                for (c1, c2, p1) in segments {
                    self.builder.cubic_to(c1, c2, p1);
                }
            }
            // Entarteter Bogen wird zur Geraden
            None => self.builder.linear_to(end),
        }
        self.pen = end;
        self.last_command = LastCommand::Other;
    }

    /// Spiegelt das letzte kubische Kontrollhandle an der Stiftposition;
    /// ohne kompatibles Vorkommando fällt es auf den Stift zurück.
    fn reflected_cubic_control(&self) -> Vec2 {
        if self.last_command == LastCommand::Cubic {
            self.pen * 2.0 - self.last_cubic_control
        } else {
            self.pen
        }
    }

    fn reflected_quad_control(&self) -> Vec2 {
        if self.last_command == LastCommand::Quadratic {
            self.pen * 2.0 - self.last_quad_control
        } else {
            self.pen
        }
    }

    fn resolve(&self, x: f32, y: f32, relative: bool) -> Vec2 {
        if relative {
            self.pen + Vec2::new(x, y)
        } else {
            Vec2::new(x, y)
        }
    }

    /// Nach einem `Z` beginnen weitere Zeichenkommandos einen neuen
    /// Subpfad am bisherigen Subpfad-Anfang.
    fn prepare_draw(&mut self) {
        if self.builder.is_closed() {
            self.flush_subpath();
        }
        if self.builder.is_empty() {
            self.builder.linear_to(self.pen);
        }
    }

    fn flush_subpath(&mut self) {
        if self.builder.is_empty() {
            return;
        }
        let next_name = format!("{}_{}", self.base_name, self.finished.len() + 2);
        let done = std::mem::replace(&mut self.builder, PathBuilder::new(next_name));
        self.finished.push(done);
    }

    fn into_builders(mut self) -> Vec<PathBuilder> {
        self.flush_subpath();
        self.finished
    }
}

fn command_arity(cmd: char) -> usize {
    match cmd.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        _ => 0,
    }
}

// Read-only terminal preview of the automaton grid.
//
// Each cell's state scales to a 0–255 gray level and prints as a two-space
// truecolor background swatch, one line per row — the darker the swatch,
// the closer the cell is to dead. `glyph_frame` is the plain-text
// fallback for terminals (and tests) without color support.
//
// Strictly a consumer of the engine's row snapshots; nothing here can
// mutate the grid, and correctness of the automaton never depends on it.

use cellsong_automata::engine::Automaton;
use std::fmt::Write as _;

/// Density ramp for the plain-text frame, dead to full.
const GLYPHS: [char; 9] = ['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Truecolor frame: one swatch per cell, one line per row.
pub fn ansi_frame(engine: &Automaton) -> String {
    let mut out = String::new();
    for y in 0..engine.height() {
        let Ok(row) = engine.row(y) else { continue };
        for v in row {
            let level = (v.clamp(0.0, 1.0) * 255.0) as u8;
            let _ = write!(out, "\x1b[48;2;{level};{level};{level}m  \x1b[0m");
        }
        out.push('\n');
    }
    out
}

/// Plain-glyph frame: a density character per cell, one line per row.
pub fn glyph_frame(engine: &Automaton) -> String {
    let mut out = String::new();
    for y in 0..engine.height() {
        let Ok(row) = engine.row(y) else { continue };
        for v in row {
            out.push(glyph(v));
        }
        out.push('\n');
    }
    out
}

/// Glyph for a single state value.
fn glyph(state: f32) -> char {
    if state <= 0.0 {
        return ' ';
    }
    let idx = (state.clamp(0.0, 1.0) * (GLYPHS.len() - 1) as f32).round() as usize;
    GLYPHS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellsong_automata::rule::RuleConfig;

    fn engine(width: usize, height: usize, states: &[f32]) -> Automaton {
        Automaton::from_states(width, height, RuleConfig::generations(), states).unwrap()
    }

    #[test]
    fn frames_have_one_line_per_row() {
        let engine = engine(3, 2, &[0.0, 0.5, 1.0, 1.0, 0.5, 0.0]);
        assert_eq!(ansi_frame(&engine).lines().count(), 2);
        assert_eq!(glyph_frame(&engine).lines().count(), 2);
    }

    #[test]
    fn glyph_frame_shows_density() {
        let engine = engine(3, 1, &[0.0, 0.5, 1.0]);
        let frame = glyph_frame(&engine);
        assert_eq!(frame, " =@\n");
    }

    #[test]
    fn ansi_frame_encodes_gray_levels() {
        let engine = engine(2, 1, &[0.0, 1.0]);
        let frame = ansi_frame(&engine);
        assert!(frame.contains("48;2;0;0;0"));
        assert!(frame.contains("48;2;255;255;255"));
    }

    #[test]
    fn rendering_does_not_disturb_the_engine() {
        let engine = engine(4, 2, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
        let before = engine.row(0).unwrap();
        let _ = ansi_frame(&engine);
        let _ = glyph_frame(&engine);
        assert_eq!(engine.row(0).unwrap(), before);
    }
}

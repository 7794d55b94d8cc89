//! Keyboard visual renderer for layout export.
//!
//! Generates Unicode keyboard diagrams using box-drawing characters. Keys
//! are placed at their physical positions (column stagger, thumb clusters and
//! split halves included) and show the tap label with the hold label below.

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::keycode::{parse, resolve, KeyDescriptor};
use crate::models::{KeyGeometry, KeyboardGeometry, LayoutDocument};

/// Characters per keyboard unit (horizontal).
const CHARS_PER_UNIT: f32 = 9.0;

/// Lines per keyboard unit (vertical).
const LINES_PER_UNIT: f32 = 4.0;

/// Renders a single layer as a Unicode keyboard diagram.
///
/// # Arguments
///
/// * `doc` - The layout document containing layer data
/// * `layer_idx` - Index of the layer to render
/// * `geometry` - Keyboard geometry for physical positioning
/// * `layer_name` - Name shown in the header line
///
/// # Returns
///
/// A String containing the diagram suitable for markdown code blocks.
///
/// # Example
///
/// ```text
/// Layer 0: Base
/// ┌───────┐┌───────┐┌───────┐
/// │   Q   ││   W   ││   E   │
/// │       ││       ││       │
/// └───────┘└───────┘└───────┘
/// ```
pub fn render_layer_diagram(
    doc: &LayoutDocument,
    layer_idx: usize,
    geometry: &KeyboardGeometry,
    layer_name: &str,
) -> Result<String> {
    doc.layer(layer_idx).context(format!(
        "Layer index {} out of bounds (document has {} layers)",
        layer_idx,
        doc.layer_count()
    ))?;

    let mut output = String::new();
    let _ = writeln!(output, "Layer {}: {}", layer_idx, layer_name);

    let boxes = build_key_boxes(doc, layer_idx, geometry);
    output.push_str(&render_boxes(&boxes));

    Ok(output)
}

/// A key ready to be drawn, in character coordinates.
#[derive(Debug, Clone)]
struct KeyBox {
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    label: String,
    hold: Option<String>,
}

fn to_chars(units: f32) -> usize {
    (units * CHARS_PER_UNIT).round().max(0.0) as usize
}

fn to_lines(units: f32) -> usize {
    (units * LINES_PER_UNIT).round().max(0.0) as usize
}

fn key_box(key: &KeyGeometry, descriptor: KeyDescriptor) -> KeyBox {
    KeyBox {
        row: to_lines(key.visual_y),
        col: to_chars(key.visual_x),
        width: to_chars(key.width).max(5),
        height: to_lines(key.height).max(4),
        label: descriptor.label,
        hold: descriptor.hold,
    }
}

/// Resolves every visible key of the layer to a box.
///
/// Positions missing from the document and unprogrammed positions are skipped.
fn build_key_boxes(
    doc: &LayoutDocument,
    layer_idx: usize,
    geometry: &KeyboardGeometry,
) -> Vec<KeyBox> {
    geometry
        .keys
        .iter()
        .filter_map(|key| {
            let raw = doc.keycode_at(layer_idx, key.row(), key.col())?;
            let descriptor = resolve(&parse(raw), key.position_flags());
            descriptor.visible.then(|| key_box(key, descriptor))
        })
        .collect()
}

/// Renders key boxes into a text block.
fn render_boxes(boxes: &[KeyBox]) -> String {
    let grid_width = boxes.iter().map(|b| b.col + b.width).max().unwrap_or(0);
    let grid_height = boxes.iter().map(|b| b.row + b.height).max().unwrap_or(0);

    let mut buffer = vec![vec![' '; grid_width]; grid_height];

    for key in boxes {
        render_key_box(&mut buffer, key);
    }

    let mut output = String::new();
    for row in &buffer {
        let line: String = row.iter().collect();
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Renders a single key box with Unicode box-drawing characters.
fn render_key_box(buffer: &mut [Vec<char>], key: &KeyBox) {
    let max_row = buffer.len();
    let Some(max_col) = buffer.first().map(Vec::len) else {
        return;
    };

    if key.row >= max_row || key.col >= max_col {
        return;
    }

    let width = key.width.min(max_col - key.col);
    let height = key.height.min(max_row - key.row);

    if width < 4 || height < 3 {
        return; // Too small to render
    }

    let (row, col) = (key.row, key.col);
    let right = col + width - 1;
    let bottom = row + height - 1;

    // Top and bottom borders
    buffer[row][col] = '┌';
    buffer[row][right] = '┐';
    buffer[bottom][col] = '└';
    buffer[bottom][right] = '┘';
    for c in col + 1..right {
        buffer[row][c] = '─';
        buffer[bottom][c] = '─';
    }

    // Side borders, clearing anything an overlapping neighbour left behind
    for r in row + 1..bottom {
        buffer[r][col] = '│';
        buffer[r][right] = '│';
        for c in col + 1..right {
            buffer[r][c] = ' ';
        }
    }

    let content_width = width - 2;
    let content_col = col + 1;

    write_centered_text(buffer, row + 1, content_col, content_width, &key.label);

    if let Some(hold) = &key.hold {
        if row + 2 < bottom {
            write_centered_text(buffer, row + 2, content_col, content_width, hold);
        }
    }
}

/// Writes text centered in a row, truncating when it does not fit.
fn write_centered_text(
    buffer: &mut [Vec<char>],
    row: usize,
    start_col: usize,
    width: usize,
    text: &str,
) {
    let Some(line) = buffer.get_mut(row) else {
        return;
    };

    let text_len = text.chars().count();
    let text_start = start_col + width.saturating_sub(text_len) / 2;

    for (i, ch) in text.chars().take(width).enumerate() {
        if let Some(cell) = line.get_mut(text_start + i) {
            *cell = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{physical_layouts, RawKeycode};

    fn grid_doc(rows: &[&[&str]]) -> LayoutDocument {
        LayoutDocument::new(vec![rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|t| {
                        if *t == "-1" {
                            RawKeycode::unprogrammed()
                        } else {
                            RawKeycode::token(*t)
                        }
                    })
                    .collect()
            })
            .collect()])
    }

    fn small_geometry() -> KeyboardGeometry {
        let mut geom = KeyboardGeometry::new("test", "Test", 1);
        geom.add_key(KeyGeometry::new((0, 0), 0.0, 0.0));
        geom.add_key(KeyGeometry::new((0, 1), 1.0, 0.0));
        geom.add_key(KeyGeometry::new((0, 2), 2.0, 0.0));
        geom
    }

    #[test]
    fn test_render_header_and_labels() {
        let doc = grid_doc(&[&["KC_Q", "KC_W", "KC_E"]]);
        let diagram = render_layer_diagram(&doc, 0, &small_geometry(), "Base").unwrap();

        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "Layer 0: Base");
        assert!(lines[1].starts_with('┌'));
        assert!(lines[2].contains("Q"));
        assert!(lines[2].contains("W"));
        assert!(lines[2].contains("E"));
        assert!(lines[4].starts_with('└'));
    }

    #[test]
    fn test_render_hold_below_tap() {
        let doc = grid_doc(&[&["LT1(KC_SPACE)", "LCTL_T(KC_A)", "KC_E"]]);
        let diagram = render_layer_diagram(&doc, 0, &small_geometry(), "Base").unwrap();

        let lines: Vec<&str> = diagram.lines().collect();
        assert!(lines[2].contains("Spc"));
        assert!(lines[3].contains("L1"));
        assert!(lines[3].contains("Ctl"));
    }

    #[test]
    fn test_render_skips_unprogrammed_and_missing() {
        let doc = grid_doc(&[&["-1", "KC_W"]]);
        let diagram = render_layer_diagram(&doc, 0, &small_geometry(), "Base").unwrap();

        let lines: Vec<&str> = diagram.lines().collect();
        // First box is skipped entirely, third has no document cell
        assert_eq!(lines[1].chars().filter(|c| *c == '┌').count(), 1);
        assert!(lines[1].starts_with(' '));
    }

    #[test]
    fn test_render_truncates_long_labels() {
        let doc = grid_doc(&[&["M12345678", "KC_W", "KC_E"]]);
        let diagram = render_layer_diagram(&doc, 0, &small_geometry(), "Base").unwrap();

        let line = diagram.lines().nth(2).unwrap();
        assert!(line.starts_with("│M123456│"));
    }

    #[test]
    fn test_render_layer_out_of_bounds() {
        let doc = grid_doc(&[&["KC_A"]]);
        let err = render_layer_diagram(&doc, 3, &small_geometry(), "Base").unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_render_transparent_glyph() {
        let doc = grid_doc(&[&["KC_TRNS", "_______", "KC_E"]]);
        let diagram = render_layer_diagram(&doc, 0, &small_geometry(), "Base").unwrap();
        assert_eq!(diagram.matches('▽').count(), 2);
    }

    #[test]
    fn test_render_full_corne_layer() {
        let rows: Vec<Vec<&str>> = (0..8).map(|_| vec!["KC_A"; 6]).collect();
        let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
        let doc = grid_doc(&rows);
        let geometry = physical_layouts::corne();

        let diagram = render_layer_diagram(&doc, 0, &geometry, "Base").unwrap();
        assert_eq!(diagram.matches('┌').count(), geometry.key_count());
    }
}

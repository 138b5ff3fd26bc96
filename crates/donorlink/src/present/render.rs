//! Text renderings of a presentation for terminal output.

use std::fmt::Write;

use comfy_table::{Cell, Table};

use super::{MarkerBoard, Presentation};
use crate::error::Result;

/// Cards as indented text blocks, followed by the map summary.
#[must_use]
pub fn plain(shown: &Presentation, board: &MarkerBoard) -> String {
    let mut out = String::new();

    if let Some(notice) = &shown.notice {
        let _ = writeln!(out, "{notice}");
    }
    for card in &shown.cards {
        for line in card.lines() {
            let _ = writeln!(out, "{line}");
        }
        out.push('\n');
    }
    out.push_str(&map_summary(board));
    out
}

/// Cards as a table, followed by the map summary.
#[must_use]
pub fn table(shown: &Presentation, board: &MarkerBoard) -> String {
    if let Some(notice) = &shown.notice {
        return format!("{notice}\n{}", map_summary(board));
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Type", "Name", "Blood", "Location", "Hospital", "Contact", "Organs", "ID",
    ]);
    for card in &shown.cards {
        table.add_row(vec![
            Cell::new(card.kind),
            Cell::new(&card.heading),
            Cell::new(card.blood_type),
            Cell::new(&card.location),
            Cell::new(&card.hospital),
            Cell::new(&card.contact),
            Cell::new(card.organs.join(", ")),
            Cell::new(card.id.as_ref().map_or("-", |id| id.as_str())),
        ]);
    }
    format!("{table}\n{}", map_summary(board))
}

/// Cards, notice and map state as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json(shown: &Presentation, board: &MarkerBoard) -> Result<String> {
    let value = serde_json::json!({
        "cards": shown.cards,
        "notice": shown.notice,
        "map": board,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// One line per marker, then the fitted region.
#[must_use]
pub fn map_summary(board: &MarkerBoard) -> String {
    let mut out = format!("Map: {} marker(s)\n", board.markers().len());
    for marker in board.markers() {
        let title = marker.popup.lines().next().unwrap_or_default();
        let _ = writeln!(out, "  @ {:.4}, {:.4}  {title}", marker.at.lat, marker.at.lng);
    }
    if let Some(b) = board.viewport() {
        let _ = writeln!(
            out,
            "  View: {:.4}..{:.4} lat, {:.4}..{:.4} lng",
            b.south, b.north, b.west, b.east
        );
    } else {
        let c = board.center();
        let _ = writeln!(
            out,
            "  View: centred on {:.4}, {:.4} at zoom {}",
            c.lat,
            c.lng,
            board.zoom()
        );
    }
    out
}

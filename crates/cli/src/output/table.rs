//! Table formatting utilities

use anyhow::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, *};

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Headers plus rows. An empty row set renders `empty` instead of a
    /// header-only table.
    pub fn simple(headers: Vec<&str>, rows: Vec<Vec<String>>, empty: &str) -> Result<String> {
        if rows.is_empty() {
            return Ok(empty.to_string());
        }

        let mut table = Self::new();
        table.set_header(headers);
        for row in rows {
            table.add_row(row);
        }
        Ok(table.to_string())
    }

    /// Two-column key/value table
    pub fn key_value(items: Vec<(&str, String)>) -> Result<String> {
        let mut table = Self::new();
        for (key, value) in items {
            table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
        }
        Ok(table.to_string())
    }
}

//! Table rendering for command output

use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table,
};

/// Shown in place of blank cells
pub const EMPTY_CELL: &str = "-";

pub struct TableFormatter;

impl TableFormatter {
    fn table() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// One row per item under a bold header row.
    pub fn rows<R>(headers: &[&str], rows: impl IntoIterator<Item = R>) -> String
    where
        R: IntoIterator<Item = String>,
    {
        let mut table = Self::table();
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
        for row in rows {
            table.add_row(row.into_iter().map(|cell| Cell::new(or_empty(cell))));
        }
        table.to_string()
    }

    /// A single record as labelled fields, labels in bold.
    pub fn record<'a>(fields: impl IntoIterator<Item = (&'a str, String)>) -> String {
        let mut table = Self::table();
        for (label, value) in fields {
            table.add_row(vec![
                Cell::new(label).add_attribute(Attribute::Bold),
                Cell::new(or_empty(value)),
            ]);
        }
        table.to_string()
    }
}

fn or_empty(value: String) -> String {
    if value.trim().is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_order() {
        let table = TableFormatter::rows(
            &["Name", "Role"],
            vec![
                vec!["Jane Smith".to_string(), "local_admin".to_string()],
                vec!["Mike Johnson".to_string(), "manager".to_string()],
            ],
        );

        let jane = table.find("Jane Smith").unwrap();
        let mike = table.find("Mike Johnson").unwrap();
        assert!(jane < mike);
        assert!(table.contains("Role"));
    }

    #[test]
    fn test_blank_fields_render_as_dash() {
        let table = TableFormatter::record(vec![
            ("Email", "sarah@company.com".to_string()),
            ("Team Lead", "  ".to_string()),
        ]);

        assert!(table.contains("sarah@company.com"));
        assert!(table.contains(EMPTY_CELL));
    }
}

//! Table formatting for CLI list commands

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render rows with the shared table style
///
/// Returns the empty-set message instead of a headerless table when there
/// is nothing to show.
pub fn render<T: Tabled>(rows: &[T], empty_message: &str) -> String {
    if rows.is_empty() {
        return empty_message.to_string();
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format a dimension in mm, trimming a trailing ".0"
pub fn fmt_mm(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        name: &'static str,
        qty: u32,
    }

    #[test]
    fn test_empty_rows_use_message() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render(&rows, "nothing here"), "nothing here");
    }

    #[test]
    fn test_render_includes_headers_and_values() {
        let rows = vec![Row {
            name: "Side",
            qty: 2,
        }];
        let out = render(&rows, "empty");
        assert!(out.contains("name"));
        assert!(out.contains("Side"));
    }

    #[test]
    fn test_fmt_mm() {
        assert_eq!(fmt_mm(550.0), "550");
        assert_eq!(fmt_mm(763.5), "763.5");
    }
}

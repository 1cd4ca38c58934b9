// src/table.rs
use serde_json::Value;

use crate::data_types::{Display, Row, TableData};

pub const NO_DATA: &str = "No data.";

/// Builds the display grid for a result set.
///
/// Columns come from the first row only. Every row is laid out in that
/// column order, so keys a later row lacks become empty cells and keys only
/// a later row has are not shown.
pub fn render_table(rows: &[Row]) -> Display {
    let Some(first) = rows.first() else {
        return Display::text(NO_DATA);
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let rows = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|column| row.get(column).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Display::Grid(TableData { headers, rows })
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_rows_render_no_data() {
        assert_eq!(render_table(&[]), Display::text("No data."));
    }

    #[test]
    fn test_headers_follow_first_row_key_order() {
        let data = rows(json!([
            {"zeta": 1, "alpha": "a", "mid": true},
            {"mid": false, "zeta": 2, "alpha": "b"}
        ]));

        let Display::Grid(table) = render_table(&data) else {
            panic!("expected a grid");
        };
        assert_eq!(table.headers, vec!["zeta", "alpha", "mid"]);
        assert_eq!(table.rows[1], vec!["2", "b", "false"]);
    }

    #[test]
    fn test_null_and_missing_cells_are_blank() {
        let data = rows(json!([
            {"id": 1, "name": null},
            {"id": 2}
        ]));

        let Display::Grid(table) = render_table(&data) else {
            panic!("expected a grid");
        };
        assert_eq!(table.rows, vec![vec!["1", ""], vec!["2", ""]]);
    }

    #[test]
    fn test_extra_keys_in_later_rows_are_ignored() {
        let data = rows(json!([
            {"id": 1},
            {"id": 2, "surprise": "x"}
        ]));

        let Display::Grid(table) = render_table(&data) else {
            panic!("expected a grid");
        };
        assert_eq!(table.headers, vec!["id"]);
        assert_eq!(table.rows[1], vec!["2"]);
    }

    #[test]
    fn test_nested_values_render_as_json() {
        let data = rows(json!([{"tags": ["a", "b"], "price": 9.5}]));

        let Display::Grid(table) = render_table(&data) else {
            panic!("expected a grid");
        };
        assert_eq!(table.rows[0], vec![r#"["a","b"]"#, "9.5"]);
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let data = rows(json!([{"a": 1}]));
        assert_eq!(render_table(&data), render_table(&data));
    }
}

// src/data_types.rs
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One record of a table result, keyed by column name in server order.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Content of a single view region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Empty,
    Busy(String),
    Text(String),
    Grid(TableData),
}

impl Display {
    pub fn text(message: impl Into<String>) -> Self {
        Display::Text(message.into())
    }

    /// Text shown for this region, if it is not a grid.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Display::Busy(label) | Display::Text(label) => Some(label),
            Display::Empty | Display::Grid(_) => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Display::Busy(_))
    }
}

/// Reads a field on its own: a value of the wrong type becomes `None`
/// instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Body of `POST /upload_csv/{table}`, on success or failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
    pub rows_inserted: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub validation_warnings: Option<Vec<Value>>,
    pub detail: Option<Value>,
}

/// Body of `GET /data/{table}` and `GET /data/{table}/query`.
///
/// `data` stays untyped here; whether it holds rows is decided when it is
/// shown.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataResponse {
    pub data: Option<Value>,
    pub detail: Option<Value>,
}

/// Body of `GET /tables`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TablesResponse {
    #[serde(deserialize_with = "lenient")]
    pub tables: Option<Vec<String>>,
    pub detail: Option<Value>,
}

/// Body of `GET /logs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogsResponse {
    #[serde(deserialize_with = "lenient")]
    pub log: Option<String>,
    pub detail: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mistyped_field_keeps_its_siblings() {
        let body: UploadResponse = serde_json::from_value(json!({
            "message": 42,
            "detail": "Duplicate table",
            "validation_warnings": "not a list"
        }))
        .unwrap();

        assert_eq!(body.message, None);
        assert_eq!(body.validation_warnings, None);
        assert_eq!(body.detail, Some(json!("Duplicate table")));
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let body: LogsResponse = serde_json::from_value(json!({"log": null})).unwrap();
        assert_eq!(body.log, None);

        let body: TablesResponse = serde_json::from_value(json!({"tables": null})).unwrap();
        assert_eq!(body.tables, None);
    }
}

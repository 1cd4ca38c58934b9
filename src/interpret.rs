// src/interpret.rs
//! Turns a finished call into what a view should show.
//!
//! Every function here is pure: the same status and body always produce the
//! same result. Success and failure are decided by the HTTP status alone,
//! never by which fields the body happens to carry.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiError, Outcome};
use crate::data_types::{
    DataResponse, Display, LogsResponse, Row, TablesResponse, UploadResponse,
};
use crate::table::{render_table, NO_DATA};

pub const UPLOAD_SUCCEEDED: &str = "Upload successful.";
pub const UPLOAD_FAILED: &str = "Upload failed.";
pub const UPLOAD_INVALID_RESPONSE: &str = "Upload failed: Invalid server response.";
pub const INVALID_RESPONSE: &str = "Failed to parse server response.";
pub const TABLE_EMPTY: &str = "No data found in this table.";
pub const FETCH_FAILED: &str = "Failed to fetch data.";
pub const QUERY_FAILED: &str = "No data found.";
pub const TABLES_FAILED: &str = "Failed to load tables.";
pub const NO_LOGS: &str = "No logs found.";
pub const LOGS_FAILED: &str = "Failed to load logs.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// 2xx: composed confirmation text.
    Accepted(String),
    /// Non-2xx: the server's `detail` or the generic failure text.
    Rejected(String),
    /// The body was not JSON.
    Malformed,
    /// The call never completed.
    Unreachable(String),
}

impl UploadOutcome {
    pub fn message(&self) -> &str {
        match self {
            UploadOutcome::Accepted(text)
            | UploadOutcome::Rejected(text)
            | UploadOutcome::Unreachable(text) => text,
            UploadOutcome::Malformed => UPLOAD_INVALID_RESPONSE,
        }
    }
}

/// Which of the two row-returning endpoints a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataView {
    Fetch,
    Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableListing {
    Listed(Vec<String>),
    Failed(String),
}

pub fn upload(outcome: &Outcome) -> UploadOutcome {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return UploadOutcome::Unreachable(network_error(err)),
    };
    let Some(body) = parse::<UploadResponse>(&response.body) else {
        return UploadOutcome::Malformed;
    };

    if !response.is_ok() {
        let text = detail_text(body.detail.as_ref()).unwrap_or_else(|| UPLOAD_FAILED.to_string());
        return UploadOutcome::Rejected(text);
    }

    let mut message = body
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UPLOAD_SUCCEEDED.to_string());
    if let Some(rows) = body.rows_inserted.as_ref() {
        message.push_str(&format!(" Rows inserted: {}.", value_text(rows)));
    }
    if let Some(warnings) = body.validation_warnings.filter(|w| !w.is_empty()) {
        let warnings: Vec<String> = warnings.iter().map(value_text).collect();
        message.push_str("\nWarnings:\n");
        message.push_str(&warnings.join("\n"));
    }
    UploadOutcome::Accepted(message)
}

pub fn data(view: DataView, outcome: &Outcome) -> Display {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return Display::Text(network_error(err)),
    };
    let Some(body) = parse::<DataResponse>(&response.body) else {
        return Display::text(INVALID_RESPONSE);
    };

    if !response.is_ok() {
        let fallback = match view {
            DataView::Fetch => FETCH_FAILED,
            DataView::Query => QUERY_FAILED,
        };
        return Display::Text(
            detail_text(body.detail.as_ref()).unwrap_or_else(|| fallback.to_string()),
        );
    }

    let empty = match view {
        DataView::Fetch => TABLE_EMPTY,
        DataView::Query => NO_DATA,
    };
    match body.data {
        None => Display::text(empty),
        Some(Value::Array(items)) if items.is_empty() => Display::text(empty),
        Some(Value::Array(items)) => match records(items) {
            Some(rows) => render_table(&rows),
            None => Display::text(INVALID_RESPONSE),
        },
        Some(_) => Display::text(INVALID_RESPONSE),
    }
}

/// `None` when any item is not a JSON object.
fn records(items: Vec<Value>) -> Option<Vec<Row>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect()
}

pub fn tables(outcome: &Outcome) -> TableListing {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return TableListing::Failed(network_error(err)),
    };
    let Some(body) = parse::<TablesResponse>(&response.body) else {
        return TableListing::Failed(INVALID_RESPONSE.to_string());
    };

    if !response.is_ok() {
        return TableListing::Failed(
            detail_text(body.detail.as_ref()).unwrap_or_else(|| TABLES_FAILED.to_string()),
        );
    }
    TableListing::Listed(body.tables.unwrap_or_default())
}

pub fn logs(outcome: &Outcome) -> Display {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return Display::Text(network_error(err)),
    };
    let Some(body) = parse::<LogsResponse>(&response.body) else {
        return Display::text(INVALID_RESPONSE);
    };

    if !response.is_ok() {
        return Display::Text(
            detail_text(body.detail.as_ref()).unwrap_or_else(|| LOGS_FAILED.to_string()),
        );
    }
    match body.log.filter(|log| !log.is_empty()) {
        Some(log) => Display::Text(log),
        None => Display::text(NO_LOGS),
    }
}

pub fn network_error(err: &ApiError) -> String {
    format!("Network or server error: {}", err)
}

/// `None` only when the body is not JSON at all. A JSON value that is not
/// an object reads as a record with every field absent; inside an object each
/// field is read on its own.
fn parse<T: DeserializeOwned + Default>(body: &[u8]) -> Option<T> {
    let value: Value = serde_json::from_slice(body).ok()?;
    if !value.is_object() {
        return Some(T::default());
    }
    Some(serde_json::from_value(value).unwrap_or_default())
}

/// Scalars as a person would write them: `5.0` reads as `5`.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) if number.is_f64() => number
            .as_f64()
            .map(|float| float.to_string())
            .unwrap_or_else(|| number.to_string()),
        other => other.to_string(),
    }
}

fn detail_text(detail: Option<&Value>) -> Option<String> {
    match detail? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

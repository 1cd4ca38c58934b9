// src/api/request.rs
use std::path::{Path, PathBuf};

use thiserror::Error;
use urlencoding::encode;

/// A required input field was left blank. No request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissingInput {
    #[error("Please provide a table name and select a CSV file.")]
    UploadInputs,

    #[error("Please enter a table name.")]
    TableName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully formed call against the table server, relative to its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub target: String,
    pub upload: Option<PathBuf>,
}

impl ApiRequest {
    fn get(target: String) -> Self {
        Self {
            method: Method::Get,
            target,
            upload: None,
        }
    }
}

/// `POST /upload_csv/{table}` with `file` as a multipart part.
pub fn upload_csv(table: &str, file: Option<&Path>) -> Result<ApiRequest, MissingInput> {
    let table = table.trim();
    match file {
        Some(path) if !table.is_empty() => Ok(ApiRequest {
            method: Method::Post,
            target: format!("/upload_csv/{}", encode(table)),
            upload: Some(path.to_path_buf()),
        }),
        _ => Err(MissingInput::UploadInputs),
    }
}

pub fn list_tables() -> ApiRequest {
    ApiRequest::get("/tables".to_string())
}

/// `GET /data/{table}`.
pub fn fetch_data(table: &str) -> Result<ApiRequest, MissingInput> {
    let table = table.trim();
    if table.is_empty() {
        return Err(MissingInput::TableName);
    }
    Ok(ApiRequest::get(format!("/data/{}", encode(table))))
}

/// `GET /data/{table}/query?…`. Each parameter is appended with a trailing
/// `&` only when its field is non-empty. A blank table name yields `None`,
/// which callers treat as "do nothing" rather than as an error.
pub fn query_data(table: &str, filters: &str, limit: &str, offset: &str) -> Option<ApiRequest> {
    let table = table.trim();
    if table.is_empty() {
        return None;
    }

    let mut target = format!("/data/{}/query?", encode(table));
    for (key, value) in [("filters", filters.trim()), ("limit", limit), ("offset", offset)] {
        if !value.is_empty() {
            target.push_str(&format!("{}={}&", key, encode(value)));
        }
    }

    Some(ApiRequest::get(target))
}

pub fn fetch_logs() -> ApiRequest {
    ApiRequest::get("/logs".to_string())
}

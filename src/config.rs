// src/config.rs

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Origin of the table server. Set `TABLE_CLIENT_API_BASE` at build time to
/// point the client elsewhere.
pub const API_BASE: &str = match option_env!("TABLE_CLIENT_API_BASE") {
    Some(base) => base,
    None => "http://127.0.0.1:8000",
};

pub const WINDOW_SIZE: (u32, u32) = (1024, 768);

/// Multipart field the server reads the CSV file from.
pub const UPLOAD_FIELD: &str = "file";

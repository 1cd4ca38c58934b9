// src/lib.rs
pub mod api;
pub mod config;
pub mod data_types;
pub mod interpret;
pub mod orchestrator;
pub mod table;

pub use api::{ApiClient, ApiError, Outcome, RawResponse};
pub use data_types::{Display, Row, TableData};
pub use orchestrator::{Fields, Flow, Orchestrator, Region, Task, TaskId};

//! Wire side of the client: request construction and execution.

mod client;
pub mod request;

pub use client::{ApiClient, ApiError, RawResponse};
pub use request::{ApiRequest, Method, MissingInput};

use std::sync::Arc;

/// What a finished task hands back to the orchestrator.
pub type Outcome = Result<RawResponse, Arc<ApiError>>;

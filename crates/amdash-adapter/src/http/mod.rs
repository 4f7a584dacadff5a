/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod api;
pub mod client;
pub mod error;
pub mod progress;
pub mod tracks;
pub mod users;

pub use api::LearningApi;
pub use error::{AmdashError, Result};

pub use client::{AmdashClient, ClientConfig, DEFAULT_BASE_URL};

/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public mentorship API adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{OtpAuthManager, validate_email};

// Re-export commonly used types from http
pub use http::{AmdashClient, AmdashError, ClientConfig, DEFAULT_BASE_URL, LearningApi, Result};

// Re-export all types
pub use types::*;

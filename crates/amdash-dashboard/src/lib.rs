/*
[INPUT]:  Public API exports for amdash-dashboard crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod leaderboard;
pub mod progress;
pub mod review;
pub mod session;
pub mod status;
pub mod submission;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use dashboard::{MenteeDashboard, MentorDashboard};
pub use error::{ActionError, ClientStateError};
pub use fetch::LatestOnly;
pub use progress::{MissingPredecessor, TaskBoard, TaskFilter, TaskState, UnlockRules};
pub use review::{ReviewAction, ReviewPanel};
pub use session::{Session, SessionStore, TrackRef};
pub use status::TaskStatus;

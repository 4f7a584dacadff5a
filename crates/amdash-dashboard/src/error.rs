/*
[INPUT]:  Session state and user actions that cannot proceed
[OUTPUT]: Client-state and action errors with recovery hints
[POS]:    Error handling layer - dashboard-side failures
[UPDATE]: When adding new preconditions or recovery views
*/

use amdash_adapter::Role;
use thiserror::Error;

use crate::review::ReviewAction;
use crate::status::TaskStatus;

/// Missing or inconsistent client state. Each variant points at the command
/// that fixes it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientStateError {
    #[error("not logged in")]
    NotLoggedIn,

    #[error("no track selected")]
    NoTrackSelected,

    #[error("this action requires the {required} role")]
    WrongRole { required: Role },

    #[error("no mentee selected")]
    NoMenteeSelected,
}

impl ClientStateError {
    /// Command that recovers from the error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ClientStateError::NotLoggedIn | ClientStateError::WrongRole { .. } => {
                "amdash login --email <EMAIL> --role <ROLE>"
            }
            ClientStateError::NoTrackSelected => "amdash tracks && amdash select-track <ID>",
            ClientStateError::NoMenteeSelected => "amdash mentees && amdash select-mentee <NAME>",
        }
    }
}

/// A submit or review request rejected before reaching the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("task {number} does not exist in this track")]
    UnknownTask { number: i64 },

    #[error("you must complete the previous task before submitting task {number}")]
    TaskLocked { number: i64 },

    #[error("task {number} is already {status}")]
    AlreadySubmitted { number: i64, status: TaskStatus },

    #[error("a reference link to your work is required")]
    EmptyReference,

    #[error("mentor feedback is required before reviewing")]
    EmptyFeedback,

    #[error("no submission found for task {number}")]
    NoSubmission { number: i64 },

    #[error("cannot {action} a task that is {status}")]
    ActionUnavailable {
        action: ReviewAction,
        status: TaskStatus,
    },
}

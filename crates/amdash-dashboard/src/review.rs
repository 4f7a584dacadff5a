/*
[INPUT]:  Current normalized task status, mentor action and feedback
[OUTPUT]: Allowed actions and the approve-task wire status
[POS]:    Domain layer - mentor review state machine
[UPDATE]: When review actions or their transitions change
*/

use std::fmt;

use amdash_adapter::ReviewStatus;
use clap::ValueEnum;

use crate::error::ActionError;
use crate::status::TaskStatus;

/// Mentor actions on a submission.
///
/// `Submitted -> Reviewed` via approve or reject, `Submitted -> Paused` via
/// pause, `Paused -> In Progress` via unpause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReviewAction {
    Approve,
    Reject,
    Pause,
    Unpause,
}

impl ReviewAction {
    pub fn wire_status(&self) -> ReviewStatus {
        match self {
            ReviewAction::Approve => ReviewStatus::Approved,
            ReviewAction::Reject => ReviewStatus::Rejected,
            ReviewAction::Pause => ReviewStatus::Paused,
            ReviewAction::Unpause => ReviewStatus::InProgress,
        }
    }

    /// Normalized status the task should show once the backend applied it
    pub fn resulting_status(&self) -> TaskStatus {
        match self {
            ReviewAction::Approve | ReviewAction::Reject => TaskStatus::Reviewed,
            ReviewAction::Pause => TaskStatus::Paused,
            ReviewAction::Unpause => TaskStatus::InProgress,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "Task approved successfully!",
            ReviewAction::Reject => "Task rejected successfully!",
            ReviewAction::Pause => "Task paused successfully!",
            ReviewAction::Unpause => "Task unpaused successfully!",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
            ReviewAction::Pause => "pause",
            ReviewAction::Unpause => "unpause",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// What the review panel offers for a given status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPanel {
    AwaitingReview,
    Paused,
    Reviewed,
    WaitingForSubmission,
    Unknown,
}

impl ReviewPanel {
    pub fn for_status(status: &TaskStatus) -> Self {
        match status {
            TaskStatus::Submitted => ReviewPanel::AwaitingReview,
            TaskStatus::Paused => ReviewPanel::Paused,
            TaskStatus::Reviewed => ReviewPanel::Reviewed,
            TaskStatus::NotStarted | TaskStatus::InProgress => ReviewPanel::WaitingForSubmission,
            TaskStatus::Other(_) => ReviewPanel::Unknown,
        }
    }

    pub fn actions(&self) -> &'static [ReviewAction] {
        match self {
            ReviewPanel::AwaitingReview => {
                &[ReviewAction::Approve, ReviewAction::Reject, ReviewAction::Pause]
            }
            ReviewPanel::Paused => &[ReviewAction::Unpause],
            ReviewPanel::Reviewed | ReviewPanel::WaitingForSubmission | ReviewPanel::Unknown => &[],
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ReviewPanel::AwaitingReview => "Awaiting review",
            ReviewPanel::Paused => "Paused by mentor",
            ReviewPanel::Reviewed => "This task has been reviewed",
            ReviewPanel::WaitingForSubmission => "Waiting for mentee submission",
            ReviewPanel::Unknown => "Unrecognized status",
        }
    }
}

/// Check a review request and return the trimmed feedback to send.
pub fn validate_review(
    action: ReviewAction,
    status: &TaskStatus,
    feedback: &str,
) -> Result<String, ActionError> {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(ActionError::EmptyFeedback);
    }
    if !ReviewPanel::for_status(status).actions().contains(&action) {
        return Err(ActionError::ActionUnavailable {
            action,
            status: status.clone(),
        });
    }
    Ok(feedback.to_string())
}

/*
[INPUT]:  Free-form submission status strings from the backend
[OUTPUT]: TaskStatus display vocabulary
[POS]:    Domain layer - status normalization
[UPDATE]: When the backend introduces a new status spelling
*/

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized status of one task for one mentee.
///
/// Approved and rejected submissions both display as `Reviewed`; the
/// distinction survives only in the raw backend status and mentor feedback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
    Reviewed,
    Paused,
    /// Unrecognized backend value, kept verbatim
    Other(String),
}

impl TaskStatus {
    /// Normalize a possibly missing raw status; absent means `Not Started`.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) => Self::parse(raw),
            None => TaskStatus::NotStarted,
        }
    }

    /// Case-insensitive on the backend spellings, exact on the display names.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return TaskStatus::NotStarted;
        }
        match raw.to_lowercase().as_str() {
            "submitted" => return TaskStatus::Submitted,
            "approved" | "rejected" => return TaskStatus::Reviewed,
            "paused" => return TaskStatus::Paused,
            "in progress" => return TaskStatus::InProgress,
            "not started" => return TaskStatus::NotStarted,
            _ => {}
        }
        match raw {
            "Reviewed" => TaskStatus::Reviewed,
            other => TaskStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Submitted => "Submitted",
            TaskStatus::Reviewed => "Reviewed",
            TaskStatus::Paused => "Paused",
            TaskStatus::Other(raw) => raw,
        }
    }

    /// Submitted or Reviewed: counts as done and unlocks a deadline successor.
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Submitted | TaskStatus::Reviewed)
    }

    /// Still waiting on the mentee.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            TaskStatus::NotStarted | TaskStatus::InProgress | TaskStatus::Paused
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(TaskStatus::normalize(raw.as_deref()))
    }
}

/// String form of [`TaskStatus::parse`]: known spellings map to the display
/// vocabulary, anything else passes through unchanged.
pub fn normalize_status(raw: &str) -> String {
    TaskStatus::parse(raw).as_str().to_string()
}

/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub title: String,
}

/// A unit of work inside a track.
///
/// `task_no` is the zero-based position inside the track. A `deadline` of
/// `None` means the next task unlocks without waiting for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub track_id: i64,
    pub task_no: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_points_or_zero"
    )]
    pub points: i64,
    #[serde(default)]
    pub deadline: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub task_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_no: Option<i64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub mentor_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_text: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
}

impl Submission {
    /// Feedback text, if the mentor left anything other than whitespace.
    pub fn feedback(&self) -> Option<&str> {
        self.mentor_feedback
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// The work the mentee handed in: explicit text first, then the link.
    pub fn work(&self) -> Option<&str> {
        self.submission_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(self.reference_link.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub mentee_name: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_points_or_zero"
    )]
    pub total_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentee {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub role: Role,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Points arrive as integers, floats or numeric strings depending on the
    /// endpoint; null and blank become zero.
    pub fn deserialize_points_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(0),
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.round() as i64))
                .ok_or_else(|| serde::de::Error::custom("points out of range")),
            Value::String(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(0);
                }
                raw.parse::<i64>()
                    .or_else(|_| raw.parse::<f64>().map(|f| f.round() as i64))
                    .map_err(serde::de::Error::custom)
            }
            _ => Err(serde::de::Error::custom("invalid points value")),
        }
    }
}

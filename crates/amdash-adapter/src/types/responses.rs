/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::{LeaderboardEntry, Mentee};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenteesResponse {
    #[serde(default)]
    pub mentees: Vec<Mentee>,
}

/// Free-form acknowledgement returned by write and OTP endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acknowledgement(pub Value);

impl Acknowledgement {
    /// Human readable message, looking at `message` then `detail`.
    pub fn message(&self) -> Option<&str> {
        match &self.0 {
            Value::String(text) => Some(text.as_str()),
            Value::Object(map) => map
                .get("message")
                .or_else(|| map.get("detail"))
                .and_then(Value::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn acknowledgement_message_lookup() {
        assert_eq!(
            Acknowledgement(json!({"message": "OTP sent"})).message(),
            Some("OTP sent")
        );
        assert_eq!(
            Acknowledgement(json!({"detail": "Task submitted"})).message(),
            Some("Task submitted")
        );
        assert_eq!(Acknowledgement(json!("ok")).message(), Some("ok"));
        assert_eq!(Acknowledgement(json!(42)).message(), None);
    }
}

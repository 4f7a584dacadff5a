/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::ReviewStatus;

/// Body of `POST /progress/submit-task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitTaskRequest {
    pub track_id: i64,
    pub task_no: i64,
    pub reference_link: String,
    /// Serialized as `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    pub mentee_email: String,
}

/// Body of `PATCH /progress/approve-task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveTaskRequest {
    pub submission_id: i64,
    pub mentor_email: String,
    pub status: ReviewStatus,
    pub mentor_feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submit_request_formats_start_date() {
        let req = SubmitTaskRequest {
            track_id: 2,
            task_no: 3,
            reference_link: "https://example.com".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            mentee_email: "a@b.c".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "track_id": 2,
                "task_no": 3,
                "reference_link": "https://example.com",
                "start_date": "2025-03-09",
                "mentee_email": "a@b.c"
            })
        );
    }
}

/*
[INPUT]:  Mentee email, track id, submission and review payloads
[OUTPUT]: Submission lists and write acknowledgements
[POS]:    HTTP layer - progress endpoints (submit, review, list)
[UPDATE]: When adding new progress endpoints or changing payloads
*/

use reqwest::Method;
use tracing::{info, instrument};

use crate::http::error::or_empty;
use crate::http::{AmdashClient, Result};
use crate::types::{Acknowledgement, ApproveTaskRequest, Submission, SubmitTaskRequest};

impl AmdashClient {
    /// Submissions of one mentee inside one track. None recorded yields an empty list.
    ///
    /// GET /submissions/?email={email}&track_id={track_id}
    #[instrument(skip(self))]
    pub async fn submissions(&self, email: &str, track_id: i64) -> Result<Vec<Submission>> {
        let mut url = self.endpoint_url(&["submissions", ""])?;
        url.query_pairs_mut()
            .append_pair("email", email)
            .append_pair("track_id", &track_id.to_string());
        or_empty(self.send_json(self.request(Method::GET, url)).await)
    }

    /// Record a mentee's work for a task
    ///
    /// POST /progress/submit-task
    #[instrument(skip(self, req), fields(track_id = req.track_id, task_no = req.task_no))]
    pub async fn submit_task(&self, req: &SubmitTaskRequest) -> Result<Acknowledgement> {
        let url = self.endpoint_url(&["progress", "submit-task"])?;
        let ack = self
            .send_json(self.request(Method::POST, url).json(req))
            .await?;
        info!("task submitted");
        Ok(ack)
    }

    /// Approve, reject, pause or unpause a submission
    ///
    /// PATCH /progress/approve-task
    #[instrument(skip(self, req), fields(submission_id = req.submission_id, status = req.status.as_str()))]
    pub async fn approve_task(&self, req: &ApproveTaskRequest) -> Result<Acknowledgement> {
        let url = self.endpoint_url(&["progress", "approve-task"])?;
        let ack = self
            .send_json(self.request(Method::PATCH, url).json(req))
            .await?;
        info!("submission reviewed");
        Ok(ack)
    }
}

/*
[INPUT]:  Read/write operations the dashboard needs from the backend
[OUTPUT]: LearningApi trait and its HTTP implementation
[POS]:    HTTP layer - seam between dashboard logic and transport
[UPDATE]: When the dashboard starts using a new endpoint
*/

use async_trait::async_trait;

use crate::http::{AmdashClient, Result};
use crate::types::{
    Acknowledgement, ApproveTaskRequest, LeaderboardEntry, Mentee, Submission, SubmitTaskRequest,
    Task, Track, User,
};

/// Backend operations used by dashboards, submissions and reviews.
///
/// Implemented by [`AmdashClient`]; tests substitute an in-memory backend.
#[async_trait]
pub trait LearningApi: Send + Sync {
    async fn tracks(&self) -> Result<Vec<Track>>;

    async fn tasks(&self, track_id: i64) -> Result<Vec<Task>>;

    async fn leaderboard(&self, track_id: i64) -> Result<Vec<LeaderboardEntry>>;

    async fn submissions(&self, email: &str, track_id: i64) -> Result<Vec<Submission>>;

    async fn submit_task(&self, req: &SubmitTaskRequest) -> Result<Acknowledgement>;

    async fn approve_task(&self, req: &ApproveTaskRequest) -> Result<Acknowledgement>;

    async fn user_by_email(&self, email: &str) -> Result<User>;

    async fn mentor_mentees(&self, mentor_email: &str) -> Result<Vec<Mentee>>;
}

#[async_trait]
impl LearningApi for AmdashClient {
    async fn tracks(&self) -> Result<Vec<Track>> {
        AmdashClient::tracks(self).await
    }

    async fn tasks(&self, track_id: i64) -> Result<Vec<Task>> {
        AmdashClient::tasks(self, track_id).await
    }

    async fn leaderboard(&self, track_id: i64) -> Result<Vec<LeaderboardEntry>> {
        AmdashClient::leaderboard(self, track_id).await
    }

    async fn submissions(&self, email: &str, track_id: i64) -> Result<Vec<Submission>> {
        AmdashClient::submissions(self, email, track_id).await
    }

    async fn submit_task(&self, req: &SubmitTaskRequest) -> Result<Acknowledgement> {
        AmdashClient::submit_task(self, req).await
    }

    async fn approve_task(&self, req: &ApproveTaskRequest) -> Result<Acknowledgement> {
        AmdashClient::approve_task(self, req).await
    }

    async fn user_by_email(&self, email: &str) -> Result<User> {
        AmdashClient::user_by_email(self, email).await
    }

    async fn mentor_mentees(&self, mentor_email: &str) -> Result<Vec<Mentee>> {
        AmdashClient::mentor_mentees(self, mentor_email).await
    }
}

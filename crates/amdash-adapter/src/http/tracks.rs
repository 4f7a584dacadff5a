/*
[INPUT]:  Track identifiers
[OUTPUT]: Tracks, task lists and leaderboards
[POS]:    HTTP layer - curriculum endpoints (no auth required)
[UPDATE]: When adding new track endpoints or changing response format
*/

use reqwest::Method;
use tracing::instrument;

use crate::http::error::or_empty;
use crate::http::{AmdashClient, Result};
use crate::types::{LeaderboardEntry, LeaderboardResponse, Task, Track};

impl AmdashClient {
    /// List all tracks
    ///
    /// GET /tracks/
    #[instrument(skip(self))]
    pub async fn tracks(&self) -> Result<Vec<Track>> {
        let url = self.endpoint_url(&["tracks", ""])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// Tasks of a track, ascending by `task_no`. A missing track yields no tasks.
    ///
    /// GET /tracks/{track_id}/tasks
    #[instrument(skip(self))]
    pub async fn tasks(&self, track_id: i64) -> Result<Vec<Task>> {
        let track = track_id.to_string();
        let url = self.endpoint_url(&["tracks", &track, "tasks"])?;
        let mut tasks: Vec<Task> = or_empty(self.send_json(self.request(Method::GET, url)).await)?;
        tasks.sort_by_key(|task| task.task_no);
        Ok(tasks)
    }

    /// Ranked leaderboard for a track, best first. A missing track or an empty
    /// body yields an empty board.
    ///
    /// GET /leaderboard/{track_id}
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, track_id: i64) -> Result<Vec<LeaderboardEntry>> {
        let track = track_id.to_string();
        let url = self.endpoint_url(&["leaderboard", &track])?;
        let response: Option<LeaderboardResponse> =
            or_empty(self.send_json(self.request(Method::GET, url)).await)?;
        Ok(response.map(|board| board.leaderboard).unwrap_or_default())
    }
}

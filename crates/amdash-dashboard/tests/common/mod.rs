/*
[INPUT]:  Test fixtures for tracks, tasks, mentees and submissions
[OUTPUT]: In-memory LearningApi backend and session helpers
[POS]:    Test infrastructure - shared across dashboard test modules
[UPDATE]: When LearningApi gains methods or fixtures change
*/

//! Common test utilities for amdash-dashboard tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use amdash_adapter::{
    Acknowledgement, AmdashError, ApproveTaskRequest, LeaderboardEntry, LearningApi, Mentee,
    Result, Role, Submission, SubmitTaskRequest, Task, Track, User,
};
use amdash_dashboard::{Session, SessionStore, TrackRef};
use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

pub const MENTEE_EMAIL: &str = "asha@example.com";
pub const MENTOR_EMAIL: &str = "mentor@example.com";

#[derive(Debug, Default)]
struct State {
    tracks: Vec<Track>,
    tasks: HashMap<i64, Vec<Task>>,
    leaderboards: HashMap<i64, Vec<LeaderboardEntry>>,
    submissions: Vec<(String, i64, Submission)>,
    mentees: HashMap<String, Vec<Mentee>>,
    submitted: Vec<SubmitTaskRequest>,
    reviewed: Vec<ApproveTaskRequest>,
    failing_leaderboards: bool,
    next_id: i64,
}

/// Backend double that keeps submissions in memory
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

pub fn task(id: i64, task_no: i64, title: &str, deadline: Option<i64>) -> Task {
    Task {
        id,
        track_id: 1,
        task_no,
        title: title.to_string(),
        description: format!("{title} description"),
        points: 10,
        deadline,
    }
}

pub fn entry(name: &str, points: i64) -> LeaderboardEntry {
    LeaderboardEntry {
        mentee_name: name.to_string(),
        total_points: points,
    }
}

pub fn mentee(name: &str, email: &str) -> Mentee {
    Mentee {
        name: name.to_string(),
        email: email.to_string(),
    }
}

impl FakeApi {
    /// Track 1 "AI" with tasks deadline / no deadline / deadline, track 2 "Web"
    /// with a single task. Asha and Ravi are the mentor's mentees.
    pub fn seeded() -> Self {
        let api = Self::default();
        {
            let mut state = api.state.lock().unwrap();
            state.next_id = 1000;
            state.tracks = vec![
                Track {
                    id: 1,
                    title: "AI".to_string(),
                },
                Track {
                    id: 2,
                    title: "Web".to_string(),
                },
            ];
            state.tasks.insert(
                1,
                vec![
                    task(100, 0, "Setup", Some(5)),
                    task(101, 1, "Hello world", None),
                    task(102, 2, "Project", Some(3)),
                ],
            );
            state.tasks.insert(2, vec![task(200, 0, "HTML", Some(2))]);
            state
                .leaderboards
                .insert(1, vec![entry("Ravi", 50), entry("Asha", 30)]);
            state.leaderboards.insert(2, vec![entry("Asha", 25)]);
            state.mentees.insert(
                MENTOR_EMAIL.to_string(),
                vec![
                    mentee("Asha", MENTEE_EMAIL),
                    mentee("Ravi", "ravi@example.com"),
                ],
            );
        }
        api
    }

    pub fn add_submission(&self, email: &str, track_id: i64, task_id: i64, status: &str) {
        self.add_submission_with_feedback(email, track_id, task_id, status, None);
    }

    pub fn add_submission_with_feedback(
        &self,
        email: &str,
        track_id: i64,
        task_id: i64,
        status: &str,
        feedback: Option<&str>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let submission = Submission {
            id: state.next_id,
            task_id,
            task_no: None,
            status: status.to_string(),
            mentor_feedback: feedback.map(str::to_string),
            reference_link: Some("https://github.com/asha/work".to_string()),
            submission_text: None,
            submitted_at: None,
            approved_at: None,
        };
        state
            .submissions
            .push((email.to_string(), track_id, submission));
    }

    pub fn fail_leaderboards(&self) {
        self.state.lock().unwrap().failing_leaderboards = true;
    }

    pub fn submitted(&self) -> Vec<SubmitTaskRequest> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn reviewed(&self) -> Vec<ApproveTaskRequest> {
        self.state.lock().unwrap().reviewed.clone()
    }
}

#[async_trait]
impl LearningApi for FakeApi {
    async fn tracks(&self) -> Result<Vec<Track>> {
        Ok(self.state.lock().unwrap().tracks.clone())
    }

    async fn tasks(&self, track_id: i64) -> Result<Vec<Task>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tasks
            .get(&track_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn leaderboard(&self, track_id: i64) -> Result<Vec<LeaderboardEntry>> {
        let state = self.state.lock().unwrap();
        if state.failing_leaderboards {
            return Err(AmdashError::Api {
                code: 500,
                message: "leaderboard offline".to_string(),
            });
        }
        Ok(state
            .leaderboards
            .get(&track_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn submissions(&self, email: &str, track_id: i64) -> Result<Vec<Submission>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .submissions
            .iter()
            .filter(|(owner, track, _)| owner == email && *track == track_id)
            .map(|(_, _, submission)| submission.clone())
            .collect())
    }

    async fn submit_task(&self, req: &SubmitTaskRequest) -> Result<Acknowledgement> {
        let task_id = {
            let mut state = self.state.lock().unwrap();
            state.submitted.push(req.clone());
            state
                .tasks
                .get(&req.track_id)
                .and_then(|tasks| tasks.iter().find(|task| task.task_no == req.task_no))
                .map(|task| task.id)
                .ok_or_else(|| AmdashError::NotFound {
                    message: "task not found".to_string(),
                })?
        };
        self.add_submission(&req.mentee_email, req.track_id, task_id, "submitted");
        Ok(Acknowledgement(json!({"message": "Task submitted"})))
    }

    async fn approve_task(&self, req: &ApproveTaskRequest) -> Result<Acknowledgement> {
        let mut state = self.state.lock().unwrap();
        state.reviewed.push(req.clone());
        let submission = state
            .submissions
            .iter_mut()
            .map(|(_, _, submission)| submission)
            .find(|submission| submission.id == req.submission_id)
            .ok_or_else(|| AmdashError::NotFound {
                message: "submission not found".to_string(),
            })?;
        submission.status = req.status.as_str().to_string();
        submission.mentor_feedback = Some(req.mentor_feedback.clone());
        Ok(Acknowledgement(json!({"message": "Task status updated"})))
    }

    async fn user_by_email(&self, email: &str) -> Result<User> {
        Err(AmdashError::NotFound {
            message: format!("user {email} not found"),
        })
    }

    async fn mentor_mentees(&self, mentor_email: &str) -> Result<Vec<Mentee>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .mentees
            .get(mentor_email)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn user(name: &str, email: &str, role: Role) -> User {
    User {
        id: Some(1),
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}

/// Asha signed in as a mentee with track 1 selected
pub fn mentee_session() -> Session {
    let mut session = Session::default();
    session.sign_in(&user("Asha", MENTEE_EMAIL, Role::Mentee));
    session.set_track_for(
        Role::Mentee,
        TrackRef {
            id: 1,
            name: "AI".to_string(),
        },
    );
    session
}

pub fn mentor_user() -> User {
    user("Mentor", MENTOR_EMAIL, Role::Mentor)
}

pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("amdash-dashboard-test-{}", Uuid::new_v4()))
}

/// Session store with the mentor signed in and nothing selected
pub async fn mentor_store() -> (SessionStore, PathBuf) {
    let dir = temp_data_dir();
    let store = SessionStore::open(&dir).await.expect("open store");
    store
        .update(|session| session.sign_in(&mentor_user()))
        .await
        .expect("sign in");
    (store, dir)
}

/*
[INPUT]:  LearningApi backend, session context, missing-predecessor policy
[OUTPUT]: Mentee and mentor dashboard views built from derived task state
[POS]:    Application layer - dashboard assembly
[UPDATE]: When dashboard sections or track/mentee resolution change
*/

use amdash_adapter::{LeaderboardEntry, LearningApi, Mentee, Role, Submission, Task, Track};
use anyhow::{Context, Result, bail};
use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::error::ClientStateError;
use crate::leaderboard::{Standing, standing_of};
use crate::progress::{MissingPredecessor, TaskBoard, UnlockRules, build_status_map};
use crate::session::{Session, SessionStore, TrackRef};

/// Mentor feedback left on one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackItem {
    pub task_no: i64,
    pub title: String,
    pub feedback: String,
}

/// Submissions with non-empty feedback, joined to their task titles.
pub fn feedback_items(tasks: &[Task], submissions: &[Submission]) -> Vec<FeedbackItem> {
    let mut items: Vec<FeedbackItem> = submissions
        .iter()
        .filter_map(|submission| {
            let feedback = submission.feedback()?;
            let task = tasks.iter().find(|task| task.id == submission.task_id)?;
            Some(FeedbackItem {
                task_no: task.task_no,
                title: task.title.clone(),
                feedback: feedback.to_string(),
            })
        })
        .collect();
    items.sort_by_key(|item| item.task_no);
    items
}

#[derive(Debug, Clone)]
pub struct MenteeDashboard {
    pub name: String,
    pub track: TrackRef,
    pub standing: Standing,
    pub board: TaskBoard,
    pub feedback: Vec<FeedbackItem>,
}

impl MenteeDashboard {
    #[instrument(skip(api, session))]
    pub async fn load(
        api: &dyn LearningApi,
        session: &Session,
        policy: MissingPredecessor,
    ) -> Result<Self> {
        let login = session.require_role(Role::Mentee)?;
        let track = session.require_track(Role::Mentee)?.clone();

        let (tasks, submissions, leaderboard) = tokio::join!(
            api.tasks(track.id),
            api.submissions(login.email, track.id),
            api.leaderboard(track.id),
        );
        let tasks = tasks.with_context(|| format!("tasks for track {}", track.id))?;
        let submissions = submissions.unwrap_or_else(|err| {
            warn!(error = %err, track_id = track.id, "submissions unavailable");
            Vec::new()
        });
        let leaderboard = leaderboard.unwrap_or_else(|err| {
            warn!(error = %err, track_id = track.id, "leaderboard unavailable");
            Vec::new()
        });

        let statuses = build_status_map(&tasks, &submissions);
        let rules = UnlockRules::new(Role::Mentee, policy);
        let board = TaskBoard::derive(&tasks, &statuses, &rules);

        Ok(Self {
            name: login.name.to_string(),
            standing: standing_of(&leaderboard, login.name),
            feedback: feedback_items(&tasks, &submissions),
            track,
            board,
        })
    }

    pub fn total_tasks(&self) -> usize {
        self.board.states().len()
    }
}

/// One mentee row of the mentor overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenteeProgress {
    pub mentee: Mentee,
    /// Tasks Submitted or Reviewed
    pub completed: usize,
}

#[derive(Debug, Clone)]
pub struct SelectedMentee {
    pub mentee: Mentee,
    pub standing: Standing,
    pub board: TaskBoard,
    pub submissions: Vec<Submission>,
    pub feedback: Vec<FeedbackItem>,
}

impl SelectedMentee {
    pub fn submitted_count(&self) -> usize {
        self.board.completed_count()
    }
}

#[derive(Debug, Clone)]
pub struct MentorDashboard {
    pub track: TrackRef,
    pub total_tasks: usize,
    pub mentees: Vec<MenteeProgress>,
    pub selected: Option<SelectedMentee>,
}

/// Saved track if the backend still lists it, else the first track.
pub fn resolve_track(saved: Option<&TrackRef>, tracks: &[Track]) -> Option<TrackRef> {
    saved
        .and_then(|saved| tracks.iter().find(|track| track.id == saved.id))
        .or_else(|| tracks.first())
        .map(TrackRef::from)
}

/// Saved mentee if still assigned, else the first mentee.
pub fn resolve_mentee<'a>(saved: Option<&str>, mentees: &'a [Mentee]) -> Option<&'a Mentee> {
    saved
        .and_then(|name| mentees.iter().find(|mentee| mentee.name == name))
        .or_else(|| mentees.first())
}

impl MentorDashboard {
    #[instrument(skip(api, store))]
    pub async fn load(
        api: &dyn LearningApi,
        store: &SessionStore,
        policy: MissingPredecessor,
    ) -> Result<Self> {
        let session = store.snapshot().await;
        let login = session.require_role(Role::Mentor)?;

        let (tracks, mentees) = tokio::join!(api.tracks(), api.mentor_mentees(login.email));
        let tracks = tracks.context("list tracks")?;
        let mentees = mentees.context("list mentees")?;

        let Some(track) = resolve_track(session.track_for(Role::Mentor), &tracks) else {
            bail!("the backend lists no tracks");
        };
        let selected_name = resolve_mentee(session.navigation.selected_mentee.as_deref(), &mentees)
            .map(|mentee| mentee.name.clone());

        if session.track_for(Role::Mentor) != Some(&track)
            || session.navigation.selected_mentee != selected_name
        {
            let (track, selected_name) = (track.clone(), selected_name.clone());
            store
                .update(move |session| {
                    session.set_track_for(Role::Mentor, track);
                    session.navigation.selected_mentee = selected_name;
                })
                .await?;
        }

        let (tasks, leaderboard) = tokio::join!(api.tasks(track.id), api.leaderboard(track.id));
        let tasks = tasks.with_context(|| format!("tasks for track {}", track.id))?;
        let leaderboard = leaderboard.unwrap_or_else(|err| {
            warn!(error = %err, track_id = track.id, "leaderboard unavailable");
            Vec::new()
        });

        let track_id = track.id;
        let per_mentee = join_all(mentees.iter().map(|mentee| async move {
            let submissions = api
                .submissions(&mentee.email, track_id)
                .await
                .unwrap_or_else(|err| {
                    warn!(error = %err, mentee = %mentee.name, "submissions unavailable");
                    Vec::new()
                });
            (mentee, submissions)
        }))
        .await;

        let rules = UnlockRules::new(Role::Mentor, policy);
        let mut rows = Vec::with_capacity(per_mentee.len());
        let mut selected = None;
        for (mentee, submissions) in per_mentee {
            let statuses = build_status_map(&tasks, &submissions);
            let board = TaskBoard::derive(&tasks, &statuses, &rules);
            rows.push(MenteeProgress {
                mentee: mentee.clone(),
                completed: board.completed_count(),
            });
            if selected_name.as_deref() == Some(mentee.name.as_str()) {
                selected = Some(select(mentee, &leaderboard, &tasks, board, submissions));
            }
        }

        info!(
            track_id = track.id,
            mentees = rows.len(),
            "mentor dashboard loaded"
        );
        Ok(Self {
            track,
            total_tasks: tasks.len(),
            mentees: rows,
            selected,
        })
    }

    pub fn require_selected(&self) -> Result<&SelectedMentee, ClientStateError> {
        self.selected.as_ref().ok_or(ClientStateError::NoMenteeSelected)
    }
}

fn select(
    mentee: &Mentee,
    leaderboard: &[LeaderboardEntry],
    tasks: &[Task],
    board: TaskBoard,
    submissions: Vec<Submission>,
) -> SelectedMentee {
    SelectedMentee {
        mentee: mentee.clone(),
        standing: standing_of(leaderboard, &mentee.name),
        feedback: feedback_items(tasks, &submissions),
        board,
        submissions,
    }
}

/*
[INPUT]:  Session, task number as displayed, reference link or review action
[OUTPUT]: Validated submit/approve requests and the refetched task status
[POS]:    Application layer - mentee submissions and mentor reviews
[UPDATE]: When submission preconditions or review wiring change
*/

use amdash_adapter::{ApproveTaskRequest, LearningApi, Role, SubmitTaskRequest};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::error::{ActionError, ClientStateError};
use crate::progress::{MissingPredecessor, TaskBoard, UnlockRules, build_status_map, status_of};
use crate::review::{ReviewAction, validate_review};
use crate::session::Session;
use crate::status::TaskStatus;

/// Result of a submit or review round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// 1-based number as shown in task lists
    pub number: i64,
    pub title: String,
    pub status: TaskStatus,
    pub message: Option<String>,
}

/// Displayed task numbers are `task_no + 1`
pub fn task_no_from_display(number: i64) -> Result<i64, ActionError> {
    number
        .checked_sub(1)
        .ok_or(ActionError::UnknownTask { number })
}

/// Submit work for the task shown as `number`, then refetch its status.
#[instrument(skip(api, session, reference_link))]
pub async fn submit_work(
    api: &dyn LearningApi,
    session: &Session,
    policy: MissingPredecessor,
    number: i64,
    reference_link: &str,
    start_date: NaiveDate,
) -> Result<Outcome> {
    let login = session.require_role(Role::Mentee)?;
    let track = session.require_track(Role::Mentee)?;

    let reference_link = reference_link.trim();
    if reference_link.is_empty() {
        return Err(ActionError::EmptyReference.into());
    }

    let (tasks, submissions) = tokio::join!(
        api.tasks(track.id),
        api.submissions(login.email, track.id)
    );
    let tasks = tasks.with_context(|| format!("tasks for track {}", track.id))?;
    let submissions = submissions.context("load submissions")?;
    let board = TaskBoard::derive(
        &tasks,
        &build_status_map(&tasks, &submissions),
        &UnlockRules::new(Role::Mentee, policy),
    );

    let task_no = task_no_from_display(number)?;
    let state = board
        .get(task_no)
        .ok_or(ActionError::UnknownTask { number })?;
    if !state.unlocked {
        return Err(ActionError::TaskLocked { number }.into());
    }
    if state.status.is_complete() {
        return Err(ActionError::AlreadySubmitted {
            number,
            status: state.status.clone(),
        }
        .into());
    }

    let request = SubmitTaskRequest {
        track_id: track.id,
        task_no,
        reference_link: reference_link.to_string(),
        start_date,
        mentee_email: login.email.to_string(),
    };
    let ack = api.submit_task(&request).await.context("submit task")?;
    info!(track_id = track.id, task_no, "task submitted");

    let refreshed = api
        .submissions(login.email, track.id)
        .await
        .context("refetch submissions")?;
    let status = status_of(&build_status_map(&tasks, &refreshed), task_no);

    Ok(Outcome {
        number,
        title: state.task.title.clone(),
        status,
        message: ack.message().map(str::to_string),
    })
}

/// Review the selected mentee's submission for the task shown as `number`.
#[instrument(skip(api, session, feedback))]
pub async fn review_submission(
    api: &dyn LearningApi,
    session: &Session,
    number: i64,
    action: ReviewAction,
    feedback: &str,
) -> Result<Outcome> {
    let login = session.require_role(Role::Mentor)?;
    let track = session.require_track(Role::Mentor)?;
    let mentee_name = session
        .navigation
        .selected_mentee
        .as_deref()
        .ok_or(ClientStateError::NoMenteeSelected)?;

    let mentees = api
        .mentor_mentees(login.email)
        .await
        .context("list mentees")?;
    let mentee = mentees
        .iter()
        .find(|mentee| mentee.name == mentee_name)
        .ok_or(ClientStateError::NoMenteeSelected)?;

    let (tasks, submissions) = tokio::join!(
        api.tasks(track.id),
        api.submissions(&mentee.email, track.id)
    );
    let tasks = tasks.with_context(|| format!("tasks for track {}", track.id))?;
    let submissions = submissions.context("load submissions")?;

    let task_no = task_no_from_display(number)?;
    let task = tasks
        .iter()
        .find(|task| task.task_no == task_no)
        .ok_or(ActionError::UnknownTask { number })?;
    let submission = submissions
        .iter()
        .find(|submission| submission.task_id == task.id)
        .ok_or(ActionError::NoSubmission { number })?;

    let status = TaskStatus::parse(&submission.status);
    let feedback = validate_review(action, &status, feedback)?;

    let request = ApproveTaskRequest {
        submission_id: submission.id,
        mentor_email: login.email.to_string(),
        status: action.wire_status(),
        mentor_feedback: feedback,
    };
    let ack = api.approve_task(&request).await.context("review task")?;
    info!(
        track_id = track.id,
        task_no,
        mentee = %mentee.name,
        status = action.wire_status().as_str(),
        "submission reviewed"
    );

    let refreshed = api
        .submissions(&mentee.email, track.id)
        .await
        .context("refetch submissions")?;
    let status = status_of(&build_status_map(&tasks, &refreshed), task_no);

    Ok(Outcome {
        number,
        title: task.title.clone(),
        status,
        message: ack.message().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_numbers_are_one_based() {
        assert_eq!(task_no_from_display(1), Ok(0));
        assert_eq!(task_no_from_display(4), Ok(3));
    }

    #[test]
    fn lowest_display_number_is_unknown_task() {
        assert_eq!(
            task_no_from_display(i64::MIN),
            Err(ActionError::UnknownTask { number: i64::MIN })
        );
    }
}

/*
[INPUT]:  Tasks of a track and one user's submissions in that track
[OUTPUT]: Per-task status, unlock state and the derived task lists
[POS]:    Domain layer - task state derivation (pure)
[UPDATE]: When unlock rules or dashboard list semantics change
*/

use std::collections::BTreeMap;

use amdash_adapter::{Role, Submission, Task};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::status::TaskStatus;

/// Marker prepended to the status of a task the mentee cannot open yet
pub const LOCK_MARKER: &str = "🔒";

/// Normalized status per `task_no`, for one user in one track.
pub type StatusMap = BTreeMap<i64, TaskStatus>;

/// What to do when task `n - 1` is absent from the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPredecessor {
    #[default]
    Locked,
    Unlocked,
}

/// Who is looking at the tasks, plus the gap policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockRules {
    pub viewer: Role,
    pub missing_predecessor: MissingPredecessor,
}

impl UnlockRules {
    pub fn new(viewer: Role, missing_predecessor: MissingPredecessor) -> Self {
        Self {
            viewer,
            missing_predecessor,
        }
    }

    pub fn mentee() -> Self {
        Self::new(Role::Mentee, MissingPredecessor::default())
    }

    pub fn mentor() -> Self {
        Self::new(Role::Mentor, MissingPredecessor::default())
    }
}

/// Status of `task_no`, `Not Started` when nothing was recorded.
pub fn status_of(statuses: &StatusMap, task_no: i64) -> TaskStatus {
    statuses.get(&task_no).cloned().unwrap_or_default()
}

/// Whether `task` is open to the viewer.
///
/// Only the immediate predecessor matters: task `n` is open when task `n - 1`
/// has no deadline, or when its status is Submitted or Reviewed. Task 0 is
/// always open, and mentors see everything.
pub fn is_unlocked(tasks: &[Task], statuses: &StatusMap, task: &Task, rules: &UnlockRules) -> bool {
    match rules.viewer {
        Role::Mentor => return true,
        Role::Mentee => {}
    }
    if task.task_no <= 0 {
        return true;
    }

    let previous_no = task.task_no - 1;
    let Some(previous) = tasks.iter().find(|candidate| candidate.task_no == previous_no) else {
        return match rules.missing_predecessor {
            MissingPredecessor::Locked => false,
            MissingPredecessor::Unlocked => true,
        };
    };

    if previous.deadline.is_none() {
        return true;
    }
    status_of(statuses, previous_no).is_complete()
}

/// Map submissions onto task numbers. Submissions are matched by `task_id`;
/// tasks without one are `Not Started`. The first task wins a shared `task_no`.
pub fn build_status_map(tasks: &[Task], submissions: &[Submission]) -> StatusMap {
    let mut map = StatusMap::new();
    for task in tasks {
        map.entry(task.task_no).or_insert_with(|| {
            submissions
                .iter()
                .find(|submission| submission.task_id == task.id)
                .map(|submission| TaskStatus::parse(&submission.status))
                .unwrap_or_default()
        });
    }
    map
}

/// Derived view of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskState {
    pub task: Task,
    pub status: TaskStatus,
    pub unlocked: bool,
}

impl TaskState {
    /// 1-based number shown to users
    pub fn display_no(&self) -> i64 {
        self.task.task_no + 1
    }

    /// Status text with the lock marker on locked tasks
    pub fn display_status(&self) -> String {
        if self.unlocked {
            self.status.to_string()
        } else {
            format!("{LOCK_MARKER} {}", self.status)
        }
    }

    /// Deadline hint for the task list, e.g. `(5 days)`
    pub fn deadline_label(&self) -> String {
        match self.task.deadline {
            None => "⚡ (No deadline)".to_string(),
            Some(1) => "(1 day)".to_string(),
            Some(days) => format!("({days} days)"),
        }
    }
}

/// Task list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TaskFilter {
    #[default]
    All,
    Submitted,
    Reviewed,
}

impl TaskFilter {
    pub fn matches(&self, state: &TaskState) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Submitted => state.status == TaskStatus::Submitted,
            TaskFilter::Reviewed => state.status == TaskStatus::Reviewed,
        }
    }
}

/// All task states of a track for one user, in `task_no` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    states: Vec<TaskState>,
}

impl TaskBoard {
    pub fn derive(tasks: &[Task], statuses: &StatusMap, rules: &UnlockRules) -> Self {
        let mut ordered: Vec<&Task> = tasks.iter().collect();
        ordered.sort_by_key(|task| task.task_no);

        let states = ordered
            .into_iter()
            .map(|task| TaskState {
                task: task.clone(),
                status: status_of(statuses, task.task_no),
                unlocked: is_unlocked(tasks, statuses, task, rules),
            })
            .collect();
        Self { states }
    }

    pub fn states(&self) -> &[TaskState] {
        &self.states
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, task_no: i64) -> Option<&TaskState> {
        self.states.iter().find(|state| state.task.task_no == task_no)
    }

    /// First open task that still needs a submission
    pub fn current_task(&self) -> Option<&TaskState> {
        self.states
            .iter()
            .find(|state| state.unlocked && !state.status.is_complete())
    }

    /// Locked tasks plus open ones still waiting on the mentee
    pub fn upcoming(&self) -> impl Iterator<Item = &TaskState> {
        self.states
            .iter()
            .filter(|state| !state.unlocked || state.status.is_pending())
    }

    pub fn reviewed(&self) -> impl Iterator<Item = &TaskState> {
        self.states
            .iter()
            .filter(|state| state.unlocked && state.status == TaskStatus::Reviewed)
    }

    /// Earliest submission still waiting for a mentor
    pub fn awaiting_review(&self) -> Option<&TaskState> {
        self.states
            .iter()
            .find(|state| state.status == TaskStatus::Submitted)
    }

    pub fn filtered(&self, filter: TaskFilter) -> impl Iterator<Item = &TaskState> {
        self.states.iter().filter(move |state| filter.matches(state))
    }

    pub fn completed_count(&self) -> usize {
        self.states
            .iter()
            .filter(|state| state.status.is_complete())
            .count()
    }
}

/*
[INPUT]:  Dashboard views, task states, leaderboard rows
[OUTPUT]: Styled terminal output
[POS]:    CLI layer - presentation
[UPDATE]: When dashboard sections or table columns change
*/

use console::{Term, style};

use amdash_adapter::{Track, User};
use amdash_dashboard::dashboard::{FeedbackItem, MenteeDashboard, MentorDashboard};
use amdash_dashboard::leaderboard::{OverallEntry, RankedEntry, Standing};
use amdash_dashboard::submission::Outcome;
use amdash_dashboard::{ReviewPanel, TaskState, TrackRef};

fn heading(text: &str) {
    println!();
    println!("{}", style(text).bold().cyan());
}

fn empty(text: &str) {
    println!("  {}", style(text).dim());
}

pub fn profile(user: &User, track: Option<&TrackRef>) {
    heading("Profile");
    println!("  Name:  {}", style(&user.name).bold());
    println!("  Email: {}", user.email);
    println!("  Role:  {}", user.role);
    match track {
        Some(track) => println!("  Track: {} (#{})", track.name, track.id),
        None => println!("  Track: {}", style("none selected").dim()),
    }
}

pub fn tracks(tracks: &[Track], current: Option<i64>) {
    heading("Tracks");
    if tracks.is_empty() {
        empty("No tracks available");
        return;
    }
    for track in tracks {
        let marker = if current == Some(track.id) { "*" } else { " " };
        println!("{marker} {:>4}  {}", track.id, track.title);
    }
}

fn standing(standing: &Standing) {
    let rank = if standing.is_ranked() {
        format!("#{}", standing.rank)
    } else {
        "unranked".to_string()
    };
    println!(
        "  Rank: {}   Points: {}",
        style(rank).bold(),
        style(standing.points).bold()
    );
}

fn status_text(state: &TaskState, show_lock: bool) -> String {
    if show_lock {
        state.display_status()
    } else {
        state.status.to_string()
    }
}

fn task_row(state: &TaskState, show_lock: bool) {
    println!(
        "  {:>3}  {:<40} {}",
        state.display_no(),
        state.task.title,
        status_text(state, show_lock)
    );
}

pub fn task_table<'a>(title: &str, states: impl Iterator<Item = &'a TaskState>, show_lock: bool) {
    heading(title);
    let mut any = false;
    for state in states {
        any = true;
        println!(
            "  {:>3}  {:<40} {:<22} {}",
            state.display_no(),
            state.task.title,
            status_text(state, show_lock),
            style(state.deadline_label()).dim()
        );
    }
    if !any {
        empty("No tasks");
    }
}

fn feedback(items: &[FeedbackItem]) {
    heading("Feedback");
    if items.is_empty() {
        empty("No feedback yet");
        return;
    }
    for item in items {
        println!(
            "  {:>3}  {}",
            item.task_no + 1,
            style(&item.title).bold()
        );
        println!("       {}", item.feedback);
    }
}

pub fn mentee_dashboard(view: &MenteeDashboard) {
    println!(
        "{} {}",
        style(format!("Hi, {}", view.name)).bold(),
        style(format!("({})", view.track.name)).dim()
    );
    standing(&view.standing);
    println!(
        "  Completed: {}/{}",
        view.board.completed_count(),
        view.total_tasks()
    );

    heading("Current task");
    match view.board.current_task() {
        Some(state) => {
            println!(
                "  {:>3}  {}",
                state.display_no(),
                style(&state.task.title).bold()
            );
            if !state.task.description.trim().is_empty() {
                println!("       {}", state.task.description.trim());
            }
            println!(
                "       {} points {}",
                state.task.points,
                style(state.deadline_label()).dim()
            );
        }
        None => empty("All caught up"),
    }

    heading("Upcoming");
    let mut upcoming = view.board.upcoming().peekable();
    if upcoming.peek().is_none() {
        empty("Nothing upcoming");
    }
    for state in upcoming {
        task_row(state, true);
    }

    heading("Reviewed");
    let mut reviewed = view.board.reviewed().peekable();
    if reviewed.peek().is_none() {
        empty("Nothing reviewed yet");
    }
    for state in reviewed {
        task_row(state, true);
    }

    feedback(&view.feedback);
}

pub fn mentee_list(view: &MentorDashboard) {
    heading(&format!("Mentees ({})", view.track.name));
    if view.mentees.is_empty() {
        empty("No mentees assigned");
        return;
    }
    let selected = view.selected.as_ref().map(|s| s.mentee.name.as_str());
    for row in &view.mentees {
        let marker = if selected == Some(row.mentee.name.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<24} {:<32} {}/{}",
            row.mentee.name, row.mentee.email, row.completed, view.total_tasks
        );
    }
}

pub fn mentor_dashboard(view: &MentorDashboard) {
    mentee_list(view);

    let Some(selected) = &view.selected else {
        return;
    };
    heading(&format!("Mentee: {}", selected.mentee.name));
    standing(&selected.standing);
    println!(
        "  Submitted: {}/{}",
        selected.submitted_count(),
        view.total_tasks
    );

    heading("Awaiting review");
    match selected.board.awaiting_review() {
        Some(state) => {
            let panel = ReviewPanel::for_status(&state.status);
            println!(
                "  {:>3}  {}  {}",
                state.display_no(),
                style(&state.task.title).bold(),
                style(panel.describe()).yellow()
            );
            let work = selected
                .submissions
                .iter()
                .find(|submission| submission.task_id == state.task.id)
                .and_then(|submission| submission.work());
            if let Some(work) = work {
                println!("       {work}");
            }
            let actions: Vec<_> = panel.actions().iter().map(|a| a.verb()).collect();
            println!(
                "       {}",
                style(format!(
                    "amdash review {} --action <{}>",
                    state.display_no(),
                    actions.join("|")
                ))
                .dim()
            );
        }
        None => empty("Nothing to review"),
    }

    heading("Upcoming");
    let mut upcoming = selected.board.upcoming().peekable();
    if upcoming.peek().is_none() {
        empty("Nothing upcoming");
    }
    for state in upcoming {
        task_row(state, false);
    }

    heading("Reviewed");
    let mut reviewed = selected.board.reviewed().peekable();
    if reviewed.peek().is_none() {
        empty("Nothing reviewed yet");
    }
    for state in reviewed {
        task_row(state, false);
    }

    feedback(&selected.feedback);
}

pub fn outcome(success: &str, outcome: &Outcome) {
    println!("{}", style(success).green().bold());
    println!(
        "  Task {} ({}) is now {}",
        outcome.number,
        outcome.title,
        style(&outcome.status).bold()
    );
    if let Some(message) = &outcome.message {
        println!("  {}", style(message).dim());
    }
}

pub fn track_leaderboard(title: &str, rows: &[RankedEntry]) {
    heading(&format!("Leaderboard: {title}"));
    if rows.is_empty() {
        empty("No entries yet");
        return;
    }
    for row in rows {
        println!("  {:>3}  {:<28} {:>6}", row.position, row.name, row.points);
    }
}

pub fn overall_leaderboard(rows: &[OverallEntry]) {
    heading("Leaderboard: overall");
    if rows.is_empty() {
        empty("No entries yet");
        return;
    }
    for row in rows {
        let plural = if row.participated_tracks == 1 { "" } else { "s" };
        println!(
            "  {:>3}  {:<28} {:>6}  {}",
            row.position,
            row.name,
            row.points,
            style(format!("{} track{plural}", row.participated_tracks)).dim()
        );
    }
}

pub fn clear_screen() {
    let _ = Term::stdout().clear_screen();
}

pub fn watch_footer() {
    println!();
    println!("{}", style("Refreshing automatically; press Ctrl-C to stop").dim());
}

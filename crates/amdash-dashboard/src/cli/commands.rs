/*
[INPUT]:  App context and subcommand arguments
[OUTPUT]: Session updates, backend calls and rendered output
[POS]:    CLI layer - command handlers
[UPDATE]: When a command gains options or changes its flow
*/

use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use amdash_adapter::{AmdashClient, OtpAuthManager, Role, validate_email};
use amdash_dashboard::dashboard::{MenteeDashboard, MentorDashboard};
use amdash_dashboard::leaderboard::{OverallEntry, RankedEntry, fetch_overall, rank_track};
use amdash_dashboard::submission::{review_submission, submit_work};
use amdash_dashboard::{ClientStateError, LatestOnly, ReviewAction, TaskFilter, TrackRef};

use super::App;
use super::render;

pub async fn login(app: &App, email: &str, role: Role, otp: Option<String>) -> Result<()> {
    let email = validate_email(email)?.to_string();
    let auth = OtpAuthManager::new(app.client.clone());

    let otp = match otp {
        Some(otp) => otp,
        None => {
            auth.send_otp(&email).await.context("send otp")?;
            println!("{}", style(format!("A one-time password was sent to {email}")).dim());
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("OTP")
                .interact_text()?
        }
    };

    let user = auth.login(&email, &otp, role).await?;
    app.store.update(|session| session.sign_in(&user)).await?;
    info!(role = %user.role, "signed in");

    println!(
        "{} {} ({})",
        style("Welcome,").green().bold(),
        style(&user.name).bold(),
        user.role
    );
    let session = app.store.snapshot().await;
    if session.track_for(user.role).is_none() {
        println!(
            "{}",
            style("Next: amdash tracks && amdash select-track <ID>").dim()
        );
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.store.clear().await?;
    println!("{}", style("Signed out.").green());
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let session = app.store.snapshot().await;
    let login = session.require_login()?;

    let profile = match app.client.user_by_email(login.email).await {
        Ok(user) => {
            let cached = user.clone();
            app.store
                .update(move |session| session.navigation.cached_profile = Some(cached))
                .await?;
            user
        }
        Err(err) => {
            warn!(error = %err, "profile refresh failed; showing cached profile");
            session
                .navigation
                .cached_profile
                .clone()
                .ok_or_else(|| anyhow!(err))?
        }
    };

    render::profile(&profile, session.track_for(profile.role));
    Ok(())
}

pub async fn tracks(app: &App) -> Result<()> {
    let session = app.store.snapshot().await;
    let current = session
        .identity
        .role
        .and_then(|role| session.track_for(role))
        .map(|track| track.id);

    let tracks = app.client.tracks().await.context("list tracks")?;
    render::tracks(&tracks, current);
    Ok(())
}

pub async fn select_track(app: &App, id: i64) -> Result<()> {
    let session = app.store.snapshot().await;
    let role = session.require_login()?.role;

    let tracks = app.client.tracks().await.context("list tracks")?;
    let track = tracks
        .iter()
        .find(|track| track.id == id)
        .map(TrackRef::from)
        .ok_or_else(|| anyhow!("no track with id {id}; run `amdash tracks`"))?;

    let name = track.name.clone();
    app.store
        .update(move |session| session.set_track_for(role, track))
        .await?;
    println!("{} {}", style("Selected track").green(), style(name).bold());
    Ok(())
}

pub async fn dashboard(app: &App) -> Result<()> {
    let session = app.store.snapshot().await;
    let policy = app.config.missing_predecessor;
    match session.require_login()?.role {
        Role::Mentee => {
            let view = MenteeDashboard::load(&app.client, &session, policy).await?;
            render::mentee_dashboard(&view);
        }
        Role::Mentor => {
            let view = MentorDashboard::load(&app.client, &app.store, policy).await?;
            render::mentor_dashboard(&view);
        }
    }
    Ok(())
}

pub async fn tasks(app: &App, filter: TaskFilter) -> Result<()> {
    let session = app.store.snapshot().await;
    let policy = app.config.missing_predecessor;
    match session.require_login()?.role {
        Role::Mentee => {
            let view = MenteeDashboard::load(&app.client, &session, policy).await?;
            render::task_table(&view.track.name, view.board.filtered(filter), true);
        }
        Role::Mentor => {
            let view = MentorDashboard::load(&app.client, &app.store, policy).await?;
            let selected = view.require_selected()?;
            let heading = format!("{} / {}", view.track.name, selected.mentee.name);
            render::task_table(&heading, selected.board.filtered(filter), false);
        }
    }
    Ok(())
}

pub async fn submit(app: &App, number: i64, link: Option<String>) -> Result<()> {
    let session = app.store.snapshot().await;
    session.require_role(Role::Mentee)?;

    let link = match link {
        Some(link) => link,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Link to your work")
            .interact_text()?,
    };

    let today = Local::now().date_naive();
    let outcome = submit_work(
        &app.client,
        &session,
        app.config.missing_predecessor,
        number,
        &link,
        today,
    )
    .await?;
    render::outcome("Task submitted successfully!", &outcome);
    Ok(())
}

pub async fn mentees(app: &App) -> Result<()> {
    let view =
        MentorDashboard::load(&app.client, &app.store, app.config.missing_predecessor).await?;
    render::mentee_list(&view);
    Ok(())
}

pub async fn select_mentee(app: &App, name: &str) -> Result<()> {
    let session = app.store.snapshot().await;
    let login = session.require_role(Role::Mentor)?;

    let mentees = app
        .client
        .mentor_mentees(login.email)
        .await
        .context("list mentees")?;
    let Some(mentee) = mentees.iter().find(|mentee| mentee.name == name) else {
        bail!("{name} is not one of your mentees; run `amdash mentees`");
    };

    let chosen = mentee.name.clone();
    app.store
        .update(move |session| session.navigation.selected_mentee = Some(chosen))
        .await?;
    println!(
        "{} {}",
        style("Selected mentee").green(),
        style(&mentee.name).bold()
    );
    Ok(())
}

pub async fn review(
    app: &App,
    number: i64,
    action: ReviewAction,
    feedback: Option<String>,
) -> Result<()> {
    let session = app.store.snapshot().await;
    session.require_role(Role::Mentor)?;
    if session.navigation.selected_mentee.is_none() {
        return Err(ClientStateError::NoMenteeSelected.into());
    }

    let feedback = match feedback {
        Some(feedback) => feedback,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Feedback for the mentee")
            .interact_text()?,
    };

    let outcome = review_submission(&app.client, &session, number, action, &feedback).await?;
    render::outcome(action.success_message(), &outcome);
    Ok(())
}

enum Board {
    Track(String, Vec<RankedEntry>),
    Overall(Vec<OverallEntry>),
}

async fn load_board(client: &AmdashClient, track: Option<i64>) -> Result<Board> {
    let tracks = client.tracks().await.context("list tracks")?;
    match track {
        Some(id) => {
            let track = tracks
                .iter()
                .find(|track| track.id == id)
                .ok_or_else(|| anyhow!("no track with id {id}; run `amdash tracks`"))?;
            let entries = client.leaderboard(id).await?;
            Ok(Board::Track(track.title.clone(), rank_track(&entries)))
        }
        None => Ok(Board::Overall(fetch_overall(client, &tracks).await?)),
    }
}

fn render_board(board: &Board) {
    match board {
        Board::Track(title, rows) => render::track_leaderboard(title, rows),
        Board::Overall(rows) => render::overall_leaderboard(rows),
    }
}

pub async fn leaderboard(app: &App, track: Option<i64>, watch: bool) -> Result<()> {
    if !watch {
        let board = load_board(&app.client, track).await?;
        render_board(&board);
        return Ok(());
    }

    let latest = Arc::new(LatestOnly::<Arc<Board>>::new());
    let mut ticker = interval(app.config.leaderboard_refresh());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(
        refresh_secs = app.config.leaderboard_refresh_secs,
        "watching leaderboard"
    );

    loop {
        tokio::select! {
            _ = app.shutdown.cancelled() => {
                latest.cancel();
                break;
            }
            _ = ticker.tick() => {
                let client = app.client.clone();
                let latest = Arc::clone(&latest);
                tokio::spawn(async move {
                    let fetched = latest
                        .fetch_latest(async { load_board(&client, track).await.map(Arc::new) })
                        .await;
                    match fetched {
                        Ok(Some(board)) => {
                            render::clear_screen();
                            render_board(&board);
                            render::watch_footer();
                        }
                        Ok(None) => debug!("leaderboard refresh superseded"),
                        Err(err) => warn!(error = %err, "leaderboard refresh failed"),
                    }
                });
            }
        }
    }
    Ok(())
}

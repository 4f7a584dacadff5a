/*
[INPUT]:  Parsed subcommand, loaded configuration, session store
[OUTPUT]: Command dispatch over a shared application context
[POS]:    CLI layer - command surface
[UPDATE]: When adding or renaming subcommands
*/

mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;

use amdash_adapter::{AmdashClient, Role};
use amdash_dashboard::{DashboardConfig, ReviewAction, SessionStore, TaskFilter};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with an email one-time password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, value_enum)]
        role: RoleArg,
        /// Code from the email; prompted for (and sent) when omitted
        #[arg(long)]
        otp: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    #[command(alias = "profile")]
    Whoami,
    /// List tracks
    Tracks,
    /// Pick the track the dashboard works on
    SelectTrack { id: i64 },
    /// Role-specific overview
    Dashboard,
    /// Task list with status and lock state
    Tasks {
        #[arg(long, value_enum, default_value = "all")]
        filter: TaskFilter,
    },
    /// Submit work for a task (number as shown in `tasks`)
    Submit {
        number: i64,
        #[arg(long)]
        link: Option<String>,
    },
    /// List assigned mentees
    Mentees,
    /// Pick the mentee to review
    SelectMentee { name: String },
    /// Review the selected mentee's submission
    Review {
        number: i64,
        #[arg(long, value_enum)]
        action: ReviewAction,
        #[arg(long)]
        feedback: Option<String>,
    },
    /// Per-track or overall ranking
    Leaderboard {
        #[arg(long)]
        track: Option<i64>,
        /// Refresh until interrupted
        #[arg(long)]
        watch: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Mentor,
    Mentee,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Mentor => Role::Mentor,
            RoleArg::Mentee => Role::Mentee,
        }
    }
}

/// Everything a command needs
pub struct App {
    pub config: DashboardConfig,
    pub client: AmdashClient,
    pub store: SessionStore,
    pub shutdown: CancellationToken,
}

impl App {
    pub async fn new(config: DashboardConfig, shutdown: CancellationToken) -> Result<Self> {
        let client = AmdashClient::with_config_and_base_url(config.client_config(), &config.api_url)
            .context("create api client")?;
        let store = SessionStore::open(&config.data_dir)
            .await
            .context("open session store")?;
        Ok(Self {
            config,
            client,
            store,
            shutdown,
        })
    }
}

pub async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { email, role, otp } => {
            commands::login(app, &email, role.into(), otp).await
        }
        Command::Logout => commands::logout(app).await,
        Command::Whoami => commands::whoami(app).await,
        Command::Tracks => commands::tracks(app).await,
        Command::SelectTrack { id } => commands::select_track(app, id).await,
        Command::Dashboard => commands::dashboard(app).await,
        Command::Tasks { filter } => commands::tasks(app, filter).await,
        Command::Submit { number, link } => commands::submit(app, number, link).await,
        Command::Mentees => commands::mentees(app).await,
        Command::SelectMentee { name } => commands::select_mentee(app, &name).await,
        Command::Review {
            number,
            action,
            feedback,
        } => commands::review(app, number, action, feedback).await,
        Command::Leaderboard { track, watch } => commands::leaderboard(app, track, watch).await,
    }
}

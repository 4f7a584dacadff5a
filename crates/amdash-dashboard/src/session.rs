/*
[INPUT]:  Login results, track/mentee selections, persisted session file
[OUTPUT]: Session context with explicit lifecycle (load, update, clear)
[POS]:    State layer - client session persistence
[UPDATE]: When adding session keys or changing consistency rules
*/

use anyhow::{Context, Result};
use amdash_adapter::{Role, User};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::ClientStateError;

const SESSION_FILE: &str = "session.json";

/// Track reference kept in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub id: i64,
    pub name: String,
}

impl From<&amdash_adapter::Track> for TrackRef {
    fn from(track: &amdash_adapter::Track) -> Self {
        Self {
            id: track.id,
            name: track.title.clone(),
        }
    }
}

/// Who is logged in. Survives restarts until logout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub logged_in: bool,
}

/// Where the user is in the dashboard. Cleared on logout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Navigation {
    pub current_track: Option<TrackRef>,
    pub mentor_current_track: Option<TrackRef>,
    pub selected_mentee: Option<String>,
    pub cached_profile: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub identity: Identity,
    pub navigation: Navigation,
}

/// Borrowed view of a logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedIn<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub role: Role,
}

impl Session {
    /// Fix half-written login state. Returns true when something changed.
    ///
    /// A logged-in flag without a role drops the identity and navigation; a
    /// role without the flag is treated as logged in.
    pub fn repair(&mut self) -> bool {
        match (self.identity.logged_in, self.identity.role) {
            (true, None) => {
                self.identity = Identity::default();
                self.navigation.cached_profile = None;
                self.navigation.current_track = None;
                true
            }
            (false, Some(_)) => {
                self.identity.logged_in = true;
                true
            }
            _ => false,
        }
    }

    pub fn sign_in(&mut self, user: &User) {
        self.identity = Identity {
            email: Some(user.email.clone()),
            name: Some(user.name.clone()),
            role: Some(user.role),
            logged_in: true,
        };
        self.navigation.cached_profile = Some(user.clone());
    }

    pub fn sign_out(&mut self) {
        *self = Session::default();
    }

    pub fn require_login(&self) -> Result<LoggedIn<'_>, ClientStateError> {
        let identity = &self.identity;
        match (identity.logged_in, identity.role, identity.email.as_deref()) {
            (true, Some(role), Some(email)) => Ok(LoggedIn {
                email,
                name: identity.name.as_deref().unwrap_or_default(),
                role,
            }),
            _ => Err(ClientStateError::NotLoggedIn),
        }
    }

    pub fn require_role(&self, required: Role) -> Result<LoggedIn<'_>, ClientStateError> {
        let login = self.require_login()?;
        if login.role == required {
            Ok(login)
        } else {
            Err(ClientStateError::WrongRole { required })
        }
    }

    /// Mentees and mentors keep separate track selections
    pub fn track_for(&self, role: Role) -> Option<&TrackRef> {
        match role {
            Role::Mentee => self.navigation.current_track.as_ref(),
            Role::Mentor => self.navigation.mentor_current_track.as_ref(),
        }
    }

    pub fn require_track(&self, role: Role) -> Result<&TrackRef, ClientStateError> {
        self.track_for(role).ok_or(ClientStateError::NoTrackSelected)
    }

    pub fn set_track_for(&mut self, role: Role, track: TrackRef) {
        match role {
            Role::Mentee => self.navigation.current_track = Some(track),
            Role::Mentor => self.navigation.mentor_current_track = Some(track),
        }
    }
}

/// File-backed session store
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: Mutex<Session>,
}

impl SessionStore {
    /// Open (or create) the store under `data_dir`, repairing stale state.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("create data dir {}", data_dir.display()))?;
        let path = data_dir.join(SESSION_FILE);

        let mut session = Self::load(&path).await?;
        let store_needs_save = session.repair();
        if store_needs_save {
            warn!(path = %path.display(), "repaired inconsistent session state");
        }

        let store = Self {
            path,
            session: Mutex::new(session),
        };
        if store_needs_save {
            let session = store.session.lock().await;
            store.save(&session).await?;
        }
        Ok(store)
    }

    async fn load(path: &Path) -> Result<Session> {
        if !path.exists() {
            return Ok(Session::default());
        }
        let content = fs::read_to_string(path).await?;
        match serde_json::from_str(&content) {
            Ok(session) => Ok(session),
            Err(err) => {
                warn!(error = %err, path = %path.display(), "unreadable session file; starting fresh");
                Ok(Session::default())
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// Mutate and persist the session
    pub async fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R> {
        let mut session = self.session.lock().await;
        let result = f(&mut session);
        self.save(&session).await?;
        debug!(path = %self.path.display(), "session saved");
        Ok(result)
    }

    /// Logout: forget identity and navigation
    pub async fn clear(&self) -> Result<()> {
        self.update(Session::sign_out).await?;
        info!("session cleared");
        Ok(())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;

        // Atomic write: write to temp file then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

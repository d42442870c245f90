// Session store - in-memory auth state plus durable token persistence
//
// The session holds the bearer token and the current user profile. Only
// the token survives restarts: it lives in a single file under the data
// directory (one account, no multi-token support). The profile is
// re-fetched on every restore.

use crate::activity::DEFAULT_WEIGHT_KG;
use crate::api::models::{AuthResponse, Profile};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Durable storage for the single opaque auth token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted token, if any. Unreadable or empty files count
    /// as "no token".
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Persist the token, creating parent directories as needed
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create token directory")?;
        }
        fs::write(&self.path, token).context("Failed to write token file")?;
        Ok(())
    }

    /// Remove the persisted token. Missing files are fine.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove token file: {}", e);
            }
        }
    }
}

/// The single active session. Mutated only by the TUI event loop.
#[derive(Debug)]
pub struct SessionStore {
    tokens: TokenStore,
    pub token: Option<String>,
    pub user: Option<Profile>,
}

impl SessionStore {
    /// Create a session, restoring any persisted token from disk.
    /// The caller still has to validate it with a profile fetch.
    pub fn new(tokens: TokenStore) -> Self {
        let token = tokens.load();
        Self {
            tokens,
            token,
            user: None,
        }
    }

    /// Establish the session after a successful login or register:
    /// set token + user in memory and persist the token.
    pub fn establish(&mut self, auth: AuthResponse) {
        if let Err(e) = self.tokens.save(&auth.token) {
            // The session still works for this run; it just won't restore
            tracing::warn!("Could not persist auth token: {}", e);
        }
        self.token = Some(auth.token);
        self.user = Some(auth.user);
    }

    /// Replace the profile after a restore or a profile re-fetch
    pub fn set_user(&mut self, user: Profile) {
        self.user = Some(user);
    }

    /// Clear the session unconditionally: in-memory state and the
    /// persisted token. Used by logout and by restore/auth failures.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.token = None;
        self.user = None;
    }

    /// Body weight for the activity calorie computation; defaults when no
    /// profile has been loaded.
    pub fn weight_kg(&self) -> f64 {
        self.user
            .as_ref()
            .map(|u| u.weight)
            .unwrap_or(DEFAULT_WEIGHT_KG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_token_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nutrack-test-{}-{}", std::process::id(), tag))
    }

    fn profile() -> Profile {
        Profile {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            age: 29,
            weight: 62.0,
            height: 168.0,
            daily_calories: 1900.0,
            activity_level: "moderate".into(),
            goal_weight: None,
            profile_photo: None,
        }
    }

    #[test]
    fn establish_persists_token_and_new_session_restores_it() {
        let path = temp_token_path("establish");
        let store = TokenStore::new(path.clone());
        store.clear();

        let mut session = SessionStore::new(store.clone());
        assert!(session.token.is_none());

        session.establish(AuthResponse {
            token: "tok-7".into(),
            user: profile(),
        });
        assert_eq!(session.token.as_deref(), Some("tok-7"));
        assert!(session.user.is_some());

        let restored = SessionStore::new(TokenStore::new(path.clone()));
        assert_eq!(restored.token.as_deref(), Some("tok-7"));
        // Profile never survives a restart
        assert!(restored.user.is_none());

        TokenStore::new(path).clear();
    }

    #[test]
    fn clear_wipes_memory_and_disk() {
        let path = temp_token_path("clear");
        let store = TokenStore::new(path.clone());
        store.save("expired-abc").unwrap();

        let mut session = SessionStore::new(store);
        assert_eq!(session.token.as_deref(), Some("expired-abc"));

        session.clear();
        assert!(session.token.is_none());
        assert!(session.user.is_none());
        assert!(TokenStore::new(path).load().is_none());
    }

    #[test]
    fn weight_falls_back_to_default_without_profile() {
        let path = temp_token_path("weight");
        let mut session = SessionStore::new(TokenStore::new(path.clone()));
        assert_eq!(session.weight_kg(), DEFAULT_WEIGHT_KG);
        session.set_user(profile());
        assert_eq!(session.weight_kg(), 62.0);
        TokenStore::new(path).clear();
    }
}

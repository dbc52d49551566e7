//! Signed-in user state shared by the whole application.
//!
//! [`UserState`] is a plain value with one method per lifecycle transition so
//! it can be tested without a reactive runtime. [`UserStore`] wraps it in a
//! signal, persists the session to `localStorage` and runs the async actions.

use crate::api::ApiClient;
use crate::error::Result;
use crate::storage;
use crate::toast::Toasts;
use crate::types::{Credentials, Profile, ProfileUpdate, Registration, Role, TokenPair};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl From<&Profile> for CurrentUser {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.user_pkid,
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role,
        }
    }
}

/// What survives a page reload. Never holds `loading` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub current_user: Option<CurrentUser>,
    pub profile: Option<Profile>,
    pub error: Option<String>,
    pub loading: bool,
}

impl UserState {
    /// Pending sign in or registration.
    pub fn begin_request(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Pending profile fetch or update; a previous error stays visible.
    pub fn begin_profile_request(&mut self) {
        self.loading = true;
    }

    pub fn sign_in_fulfilled(&mut self, tokens: TokenPair, profile: Profile) {
        self.loading = false;
        self.access_token = Some(tokens.access);
        self.refresh_token = Some(tokens.refresh);
        self.current_user = Some(CurrentUser::from(&profile));
        self.profile = Some(profile);
    }

    pub fn register_fulfilled(&mut self) {
        self.loading = false;
    }

    pub fn profile_fulfilled(&mut self, profile: Profile) {
        self.loading = false;
        self.current_user = Some(CurrentUser::from(&profile));
        self.profile = Some(profile);
    }

    pub fn rejected(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user.as_ref().map(|u| u.role)
    }

    pub fn session(&self) -> Option<PersistedSession> {
        Some(PersistedSession {
            access_token: self.access_token.clone()?,
            refresh_token: self.refresh_token.clone().unwrap_or_default(),
            profile: self.profile.clone()?,
        })
    }

    pub fn restore(&mut self, session: PersistedSession) {
        self.access_token = Some(session.access_token);
        self.refresh_token = Some(session.refresh_token).filter(|t| !t.is_empty());
        self.current_user = Some(CurrentUser::from(&session.profile));
        self.profile = Some(session.profile);
    }
}

/// Exchange credentials for tokens, then load the profile with the new token.
pub async fn authenticate(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<(TokenPair, Profile)> {
    let tokens = client.obtain_token(credentials).await?;
    let profile = client
        .clone()
        .with_token(Some(tokens.access.clone()))
        .my_profile()
        .await?;
    Ok((tokens, profile))
}

#[derive(Debug, Clone, Copy)]
pub struct UserStore {
    state: RwSignal<UserState>,
    restored: RwSignal<bool>,
    toasts: Toasts,
}

impl UserStore {
    pub fn provide(toasts: Toasts) -> Self {
        let store = Self {
            state: RwSignal::new(UserState::default()),
            restored: RwSignal::new(false),
            toasts,
        };
        provide_context(store);
        store
    }

    pub fn state(&self) -> ReadSignal<UserState> {
        self.state.read_only()
    }

    /// False until the persisted session has been looked up in the browser.
    pub fn restored(&self) -> bool {
        self.restored.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(UserState::is_authenticated)
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.with(|s| s.profile.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.state.with(UserState::role)
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn toasts(&self) -> Toasts {
        self.toasts
    }

    /// Client carrying the current access token, if any.
    pub fn client(&self) -> ApiClient {
        let token = self.state.with_untracked(|s| s.access_token.clone());
        ApiClient::new(crate::config::api_base_url()).with_token(token)
    }

    pub fn restore_session(&self) {
        if let Some(session) = storage::load::<PersistedSession>(storage::SESSION_KEY) {
            debug!("Restoring session for {}", session.profile.email);
            self.state.update(|s| s.restore(session));
        }
        self.restored.set(true);
    }

    fn persist(&self) {
        if let Some(session) = self.state.with_untracked(UserState::session) {
            storage::save(storage::SESSION_KEY, &session);
        }
    }

    pub async fn sign_in(self, credentials: Credentials) -> bool {
        self.state.update(UserState::begin_request);
        let client = ApiClient::new(crate::config::api_base_url());

        match authenticate(&client, &credentials).await {
            Ok((tokens, profile)) => {
                info!("Signed in as {}", profile.email);
                self.state.update(|s| s.sign_in_fulfilled(tokens, profile));
                self.persist();
                self.toasts.success("Login successful!");
                true
            }
            Err(e) => {
                let message = e.to_string();
                self.toasts.error(message.clone());
                self.state.update(|s| s.rejected(message));
                false
            }
        }
    }

    pub async fn register(self, registration: Registration) -> bool {
        self.state.update(UserState::begin_request);
        let client = ApiClient::new(crate::config::api_base_url());

        match client.register(&registration).await {
            Ok(()) => {
                self.state.update(UserState::register_fulfilled);
                self.toasts
                    .success("Registration successful! Please sign in.");
                true
            }
            Err(e) => {
                let message = e.to_string();
                self.toasts.error(message.clone());
                self.state.update(|s| s.rejected(message));
                false
            }
        }
    }

    pub async fn fetch_profile(self) -> bool {
        self.state.update(UserState::begin_profile_request);

        match self.client().my_profile().await {
            Ok(profile) => {
                self.state.update(|s| s.profile_fulfilled(profile));
                self.persist();
                true
            }
            Err(e) => {
                self.toasts.error("Could not load profile.");
                self.state.update(|s| s.rejected(e.to_string()));
                false
            }
        }
    }

    pub async fn update_profile(self, update: ProfileUpdate) -> bool {
        self.state.update(UserState::begin_profile_request);

        match self.client().update_profile(update).await {
            Ok(()) => {
                self.toasts.success("Profile updated successfully!");
                self.fetch_profile().await
            }
            Err(e) => {
                let message = e.to_string();
                self.toasts.error(message.clone());
                self.state.update(|s| s.rejected(message));
                false
            }
        }
    }

    pub fn sign_out(&self) {
        self.state.update(UserState::sign_out);
        storage::remove(storage::SESSION_KEY);
        self.toasts.success("You have been signed out.");
    }

    pub fn clear_error(&self) {
        self.state.update(UserState::clear_error);
    }
}

pub fn use_user_store() -> UserStore {
    expect_context::<UserStore>()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn profile(role: Role) -> Profile {
        Profile {
            user_pkid: 7,
            first_name: "Sara".to_string(),
            last_name: "Ahmadi".to_string(),
            full_name: "Sara Ahmadi".to_string(),
            email: "sara@youride.af".to_string(),
            role,
            ..Profile::default()
        }
    }

    fn tokens() -> TokenPair {
        TokenPair {
            access: "access-token".to_string(),
            refresh: "refresh-token".to_string(),
        }
    }

    #[test]
    fn test_begin_request_clears_error() {
        let mut state = UserState {
            error: Some("old".to_string()),
            ..UserState::default()
        };
        state.begin_request();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_profile_request_keeps_error() {
        let mut state = UserState {
            error: Some("old".to_string()),
            ..UserState::default()
        };
        state.begin_profile_request();
        assert!(state.loading);
        assert_eq!(state.error.as_deref(), Some("old"));
    }

    #[test]
    fn test_sign_in_derives_current_user() {
        let mut state = UserState::default();
        state.begin_request();
        state.sign_in_fulfilled(tokens(), profile(Role::Driver));

        assert!(!state.loading);
        assert!(state.is_authenticated());
        assert_eq!(state.refresh_token.as_deref(), Some("refresh-token"));
        let user = state.current_user.clone().unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.full_name, "Sara Ahmadi");
        assert_eq!(state.role(), Some(Role::Driver));
    }

    #[test]
    fn test_profile_fulfilled_rederives_role() {
        let mut state = UserState::default();
        state.sign_in_fulfilled(tokens(), profile(Role::Passenger));
        state.profile_fulfilled(profile(Role::Driver));
        assert_eq!(state.role(), Some(Role::Driver));
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_rejected_records_message() {
        let mut state = UserState::default();
        state.begin_request();
        state.rejected("No active account found with the given credentials".to_string());
        assert!(!state.loading);
        assert!(!state.is_authenticated());
        assert_eq!(
            state.error.as_deref(),
            Some("No active account found with the given credentials")
        );
    }

    #[test]
    fn test_sign_out_resets_everything() {
        let mut state = UserState::default();
        state.sign_in_fulfilled(tokens(), profile(Role::Admin));
        state.rejected("boom".to_string());
        state.sign_out();
        assert_eq!(state, UserState::default());
    }

    #[test]
    fn test_clear_error() {
        let mut state = UserState::default();
        state.rejected("boom".to_string());
        state.clear_error();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_session_requires_token_and_profile() {
        let mut state = UserState::default();
        assert!(state.session().is_none());
        state.sign_in_fulfilled(tokens(), profile(Role::Admin));
        let session = state.session().unwrap();
        assert_eq!(session.access_token, "access-token");
    }

    #[test]
    fn test_restore_rebuilds_state_without_loading_flags() {
        let mut signed_in = UserState::default();
        signed_in.sign_in_fulfilled(tokens(), profile(Role::Passenger));
        let session = signed_in.session().unwrap();

        let mut restored = UserState::default();
        restored.restore(session);
        assert_eq!(restored, signed_in);
    }

    #[test]
    fn test_persisted_session_json_shape() {
        let mut state = UserState::default();
        state.sign_in_fulfilled(tokens(), profile(Role::Passenger));
        let session = state.session().unwrap();
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["access_token"], "access-token");
        assert_eq!(json["profile"]["user_pkid"], 7);
        assert!(json.get("loading").is_none());
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::dto::{NewUser, ProfileUpdate};
use crate::auth::repo::{Session, USERS_KEY};
use crate::auth::repo_types::{Usage, User};
use crate::error::AuthError;
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Read the full user collection.
pub fn list_users(state: &AppState) -> Result<Vec<User>, AuthError> {
    Ok(User::load_all(state.kv.as_ref())?)
}

/// Create a user record. Fails with `DuplicateEmail` when the email is
/// already taken (exact, case-sensitive match).
pub fn register(state: &AppState, new: NewUser) -> Result<User, AuthError> {
    let kv = state.kv.as_ref();
    let mut users = User::load_all(kv)?;

    if users.iter().any(|u| u.email == new.email) {
        warn!(email = %new.email, "email already registered");
        return Err(AuthError::DuplicateEmail);
    }

    let user = User {
        id: Uuid::new_v4(),
        full_name: new.full_name,
        email: new.email,
        password: new.password,
        profile_completed: false,
        job_type: String::new(),
        bio: String::new(),
        usage: Usage::default(),
        applications: Vec::new(),
        created_at: OffsetDateTime::now_utc(),
    };

    users.push(user.clone());
    User::save_all(kv, &users)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Authenticate against the user collection. A match persists the
/// record as the session; no match leaves any existing session as-is.
pub fn login(state: &AppState, email: &str, password: &str) -> Result<User, AuthError> {
    let kv = state.kv.as_ref();
    let users = User::load_all(kv)?;

    let Some(user) = users
        .into_iter()
        .find(|u| u.email == email && u.password == password)
    else {
        warn!(email = %email, "login with invalid credentials");
        return Err(AuthError::InvalidCredentials);
    };

    Session::replace(kv, &user)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(user)
}

/// Read the active session record, if any.
pub fn current_user(state: &AppState) -> Result<Option<User>, AuthError> {
    Ok(Session::current(state.kv.as_ref())?)
}

/// Merge `update` into the session record and the matching entry of the
/// user collection. The session is written first; a collection entry
/// whose id no longer exists is logged and left stale rather than
/// failing the call.
pub fn update_profile(state: &AppState, update: ProfileUpdate) -> Result<User, AuthError> {
    let kv = state.kv.as_ref();
    let mut user = Session::current(kv)?.ok_or(AuthError::MissingSession)?;

    update.apply(&mut user);
    Session::replace(kv, &user)?;

    let mut users = User::load_all(kv)?;
    match users.iter_mut().find(|u| u.id == user.id) {
        Some(entry) => {
            *entry = user.clone();
            User::save_all(kv, &users)?;
        }
        None => {
            warn!(user_id = %user.id, key = USERS_KEY, "session user missing from collection, entry left stale");
        }
    }

    info!(user_id = %user.id, "profile updated");
    Ok(user)
}

/// Destroy the session record. Navigation is the caller's concern.
pub fn logout(state: &AppState) -> Result<(), AuthError> {
    Session::clear(state.kv.as_ref())?;
    info!("user logged out");
    Ok(())
}

/// Guard for pages behind login: the session record, or `MissingSession`.
pub fn require_auth(state: &AppState) -> Result<User, AuthError> {
    current_user(state)?.ok_or(AuthError::MissingSession)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_jane(state: &AppState) -> User {
        register(
            state,
            NewUser {
                full_name: "Jane Doe".into(),
                email: "jane@x.com".into(),
                password: "secret".into(),
            },
        )
        .expect("register should succeed")
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let state = AppState::fake();
        register_jane(&state);

        let err = register(
            &state,
            NewUser {
                full_name: "Other Jane".into(),
                email: "jane@x.com".into(),
                password: "other".into(),
            },
        )
        .expect_err("duplicate email must fail");

        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(list_users(&state).expect("list").len(), 1);
    }

    #[test]
    fn register_initializes_flow_defaults() {
        let state = AppState::fake();
        let user = register_jane(&state);

        assert!(!user.profile_completed);
        assert_eq!(user.usage, Usage::default());
        assert!(user.applications.is_empty());
        assert!(current_user(&state).expect("current").is_none());
    }

    #[test]
    fn login_returns_the_registered_record() {
        let state = AppState::fake();
        let registered = register_jane(&state);

        let logged_in = login(&state, "jane@x.com", "secret").expect("login should succeed");
        assert_eq!(logged_in.id, registered.id);

        let session = current_user(&state).expect("current").expect("some");
        assert_eq!(session.id, registered.id);
    }

    #[test]
    fn login_with_wrong_password_creates_no_session() {
        let state = AppState::fake();
        register_jane(&state);

        let err = login(&state, "jane@x.com", "wrong").expect_err("wrong password must fail");
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(current_user(&state).expect("current").is_none());
    }

    #[test]
    fn login_email_match_is_case_sensitive() {
        let state = AppState::fake();
        register_jane(&state);

        let err = login(&state, "Jane@x.com", "secret").expect_err("case mismatch must fail");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn failed_login_keeps_the_previous_session() {
        let state = AppState::fake();
        let registered = register_jane(&state);
        login(&state, "jane@x.com", "secret").expect("login");

        login(&state, "jane@x.com", "wrong").expect_err("wrong password must fail");
        let session = current_user(&state).expect("current").expect("still signed in");
        assert_eq!(session.id, registered.id);
    }

    #[test]
    fn update_profile_without_session_fails_and_changes_nothing() {
        let state = AppState::fake();
        register_jane(&state);

        let err = update_profile(
            &state,
            ProfileUpdate {
                bio: Some("x".into()),
                ..Default::default()
            },
        )
        .expect_err("no session must fail");

        assert!(matches!(err, AuthError::MissingSession));
        let users = list_users(&state).expect("list");
        assert_eq!(users[0].bio, "");
    }

    #[test]
    fn update_profile_merges_into_session_and_collection() {
        let state = AppState::fake();
        let registered = register_jane(&state);
        login(&state, "jane@x.com", "secret").expect("login");

        let updated = update_profile(
            &state,
            ProfileUpdate {
                bio: Some("x".into()),
                ..Default::default()
            },
        )
        .expect("update should succeed");

        // Merge, not replace: the one field changes, the rest survive.
        assert_eq!(updated.bio, "x");
        assert_eq!(updated.id, registered.id);
        assert_eq!(updated.full_name, "Jane Doe");
        assert_eq!(updated.email, "jane@x.com");
        assert_eq!(updated.password, "secret");
        assert!(!updated.profile_completed);

        let session = current_user(&state).expect("current").expect("some");
        assert_eq!(session.bio, "x");

        let users = list_users(&state).expect("list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].bio, "x");
        assert_eq!(users[0].id, registered.id);
    }

    #[test]
    fn update_profile_with_collection_miss_updates_session_only() {
        let state = AppState::fake();
        register_jane(&state);
        login(&state, "jane@x.com", "secret").expect("login");

        // Drop the collection out from under the session.
        state.kv.remove(USERS_KEY).expect("remove");

        let updated = update_profile(
            &state,
            ProfileUpdate {
                bio: Some("x".into()),
                ..Default::default()
            },
        )
        .expect("drift is accepted, not an error");
        assert_eq!(updated.bio, "x");

        let session = current_user(&state).expect("current").expect("some");
        assert_eq!(session.bio, "x");
        assert!(list_users(&state).expect("list").is_empty());
    }

    #[test]
    fn logout_destroys_the_session() {
        let state = AppState::fake();
        register_jane(&state);
        login(&state, "jane@x.com", "secret").expect("login");

        logout(&state).expect("logout");
        assert!(current_user(&state).expect("current").is_none());
        assert!(matches!(
            require_auth(&state),
            Err(AuthError::MissingSession)
        ));
    }

    #[test]
    fn require_auth_returns_the_session_user() {
        let state = AppState::fake();
        let registered = register_jane(&state);
        login(&state, "jane@x.com", "secret").expect("login");

        let user = require_auth(&state).expect("signed in");
        assert_eq!(user.id, registered.id);
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("jane@x.com"));
        assert!(!is_valid_email("jane"));
        assert!(!is_valid_email("jane@x"));
        assert!(!is_valid_email("jane doe@x.com"));
    }
}

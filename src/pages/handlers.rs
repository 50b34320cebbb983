use tracing::warn;

use crate::auth::dto::{NewUser, ProfileUpdate};
use crate::auth::repo_types::User;
use crate::auth::services::{self, is_valid_email};
use crate::error::AuthError;
use crate::pages::dto::{
    CallToAction, DashboardView, LandingView, LoginForm, ProfileForm, SaveAction, SignupForm,
};
use crate::pages::{Page, PageAction, PageView};
use crate::state::AppState;

/// Map an expected failure to a user-facing alert; let persistence
/// failures escape as fatal.
fn alert_or_bail(err: AuthError) -> anyhow::Result<PageAction> {
    match err {
        AuthError::Store(e) => Err(e),
        recoverable => Ok(PageAction::Alert(recoverable.to_string())),
    }
}

/// Auth gate for pages behind login. `None` means redirect to login.
fn signed_in(state: &AppState) -> anyhow::Result<Option<User>> {
    match services::require_auth(state) {
        Ok(user) => Ok(Some(user)),
        Err(AuthError::MissingSession) => Ok(None),
        Err(err) => Err(anyhow::Error::new(err)),
    }
}

fn validate_signup(form: &SignupForm) -> Result<(), AuthError> {
    if form.full_name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.password.is_empty()
    {
        warn!("signup with missing required fields");
        return Err(AuthError::Validation("All fields are required.".into()));
    }
    if !is_valid_email(&form.email) {
        warn!(email = %form.email, "invalid email");
        return Err(AuthError::Validation(
            "Please enter a valid email address.".into(),
        ));
    }
    if form.password != form.confirm_password {
        warn!("password confirmation mismatch");
        return Err(AuthError::Validation("Passwords do not match!".into()));
    }
    Ok(())
}

/// Sign-up form submission: register, auto-login, and send the new user
/// to profile setup.
pub fn signup_submit(state: &AppState, form: SignupForm) -> anyhow::Result<PageAction> {
    if let Err(err) = validate_signup(&form) {
        return alert_or_bail(err);
    }

    let new = NewUser {
        full_name: form.full_name,
        email: form.email.clone(),
        password: form.password.clone(),
    };
    if let Err(err) = services::register(state, new) {
        return alert_or_bail(err);
    }
    if let Err(err) = services::login(state, &form.email, &form.password) {
        return alert_or_bail(err);
    }

    Ok(PageAction::Redirect(Page::Profile))
}

/// Login form submission. First-time users land on profile setup,
/// returning users on the dashboard.
pub fn login_submit(state: &AppState, form: LoginForm) -> anyhow::Result<PageAction> {
    match services::login(state, &form.email, &form.password) {
        Ok(user) if user.profile_completed => Ok(PageAction::Redirect(Page::Dashboard)),
        Ok(_) => Ok(PageAction::Redirect(Page::Profile)),
        Err(err) => alert_or_bail(err),
    }
}

/// Profile page load: prefill the form from the session record.
pub fn profile_view(state: &AppState) -> anyhow::Result<PageView<ProfileForm>> {
    let Some(user) = signed_in(state)? else {
        return Ok(PageView::Redirect(Page::Login));
    };
    Ok(PageView::Ready(ProfileForm {
        full_name: user.full_name,
        email: user.email,
        job_type: user.job_type,
        bio: user.bio,
    }))
}

/// Profile save: merge the form into the record with the flow flag set,
/// then move on to whichever destination the pressed button names.
pub fn profile_save(
    state: &AppState,
    form: ProfileForm,
    action: SaveAction,
) -> anyhow::Result<PageAction> {
    if signed_in(state)?.is_none() {
        return Ok(PageAction::Redirect(Page::Login));
    }
    if form.full_name.trim().is_empty() {
        return alert_or_bail(AuthError::Validation("Full Name is required.".into()));
    }

    let update = ProfileUpdate {
        full_name: Some(form.full_name),
        job_type: Some(form.job_type),
        bio: Some(form.bio),
        profile_completed: Some(true),
    };
    match services::update_profile(state, update) {
        Ok(_) => Ok(PageAction::Redirect(action.destination())),
        Err(err) => alert_or_bail(err),
    }
}

/// Label text for the resume file input once a file is chosen.
pub fn resume_file_label(file_name: &str) -> String {
    format!("Selected: {file_name}")
}

/// Dashboard page load: personalized greeting data and the usage bar.
pub fn dashboard_view(state: &AppState) -> anyhow::Result<PageView<DashboardView>> {
    let Some(user) = signed_in(state)? else {
        return Ok(PageView::Redirect(Page::Login));
    };
    Ok(PageView::Ready(DashboardView::for_user(
        &user,
        state.config.daily_limit,
    )))
}

/// Landing page load: point the CTAs at the app when already signed in.
pub fn landing_view(state: &AppState) -> anyhow::Result<LandingView> {
    Ok(match signed_in(state)? {
        Some(_) => LandingView {
            primary: CallToAction {
                label: "Go to Dashboard",
                target: Page::Dashboard,
            },
            secondary: CallToAction {
                label: "My Profile",
                target: Page::Profile,
            },
        },
        None => LandingView {
            primary: CallToAction {
                label: "Sign Up",
                target: Page::Signup,
            },
            secondary: CallToAction {
                label: "Log In",
                target: Page::Login,
            },
        },
    })
}

/// Sidebar logout click: drop the session and go back to login.
pub fn logout_click(state: &AppState) -> anyhow::Result<PageAction> {
    match services::logout(state) {
        Ok(()) => Ok(PageAction::Redirect(Page::Login)),
        Err(err) => alert_or_bail(err),
    }
}

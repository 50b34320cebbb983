use crate::auth::repo_types::User;
use crate::pages::Page;

/// Sign-up form fields.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login form fields.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Profile setup form. Prefilled from the session record on page load;
/// the email field is display-only and ignored on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub job_type: String,
    pub bio: String,
}

/// Which save button was pressed on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    /// "Save & Continue", on to the dashboard.
    Continue,
    /// "Save & Start Application", straight into a new application.
    StartApplication,
}

impl SaveAction {
    pub fn destination(self) -> Page {
        match self {
            SaveAction::Continue => Page::Dashboard,
            SaveAction::StartApplication => Page::NewApplication,
        }
    }
}

/// Daily quota bar on the dashboard. Rendered only when at least one
/// application was sent today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageBar {
    /// Bar width; may exceed 100 when usage passes the quota.
    pub percent: u32,
    /// e.g. "3 of 5 applications used".
    pub label: String,
}

/// Personalized dashboard data derived from the session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub first_name: String,
    /// Up to two uppercase letters for the avatar.
    pub initials: String,
    pub daily_usage: Option<UsageBar>,
}

impl DashboardView {
    pub(crate) fn for_user(user: &User, daily_limit: u32) -> Self {
        let first_name = user
            .full_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        let initials: String = user
            .full_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();

        let daily_usage = (user.usage.daily > 0).then(|| UsageBar {
            percent: user.usage.daily * 100 / daily_limit.max(1),
            label: format!("{} of {} applications used", user.usage.daily, daily_limit),
        });

        Self {
            first_name,
            initials,
            daily_usage,
        }
    }
}

/// One call-to-action control on the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: Page,
}

/// Landing-page controls, rewritten when a session already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingView {
    /// Hero and nav CTA buttons.
    pub primary: CallToAction,
    /// Secondary nav link (login / profile).
    pub secondary: CallToAction,
}

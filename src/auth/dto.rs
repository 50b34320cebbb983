use serde::Deserialize;

/// Input for creating an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile data merged into the active session record.
///
/// Fields left `None` are retained; fields set are overwritten (shallow
/// merge). The record id, email, and password are not expressible here,
/// so a profile update can never change them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub job_type: Option<String>,
    pub bio: Option<String>,
    pub profile_completed: Option<bool>,
}

impl ProfileUpdate {
    pub(crate) fn apply(&self, user: &mut crate::auth::repo_types::User) {
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(job_type) = &self.job_type {
            user.job_type = job_type.clone();
        }
        if let Some(bio) = &self.bio {
            user.bio = bio.clone();
        }
        if let Some(profile_completed) = self.profile_completed {
            user.profile_completed = profile_completed;
        }
    }
}

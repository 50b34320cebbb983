use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Usage counters for the dashboard quota bars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub daily: u32,   // applications sent today
    pub weekly: u32,  // applications sent this week
    pub monthly: u32, // applications sent this month
}

/// User record as persisted under the `users` key.
///
/// The session record is a verbatim copy of one of these. The password
/// is stored in the clear because this crate simulates a backend; it
/// must not be used as a template for real credential handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid, // assigned at registration, never changes
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub profile_completed: bool, // false until profile setup is saved
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default)]
    pub applications: Vec<serde_json::Value>, // opaque application entries
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

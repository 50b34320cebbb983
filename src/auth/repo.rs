use tracing::warn;

use crate::auth::repo_types::User;
use crate::storage::KvBackend;

/// Store key holding the JSON array of all user records.
pub const USERS_KEY: &str = "users";
/// Store key holding the JSON object of the active session record.
pub const SESSION_KEY: &str = "session";

impl User {
    /// Load the full user collection. An absent or undeserializable
    /// value reads as an empty collection; only medium failures error.
    pub fn load_all(kv: &dyn KvBackend) -> anyhow::Result<Vec<User>> {
        let Some(raw) = kv.get(USERS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(error = %e, "user collection unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Persist the full user collection.
    pub fn save_all(kv: &dyn KvBackend, users: &[User]) -> anyhow::Result<()> {
        kv.set(USERS_KEY, &serde_json::to_string(users)?)
    }

    /// Find a user by email. Matching is exact and case-sensitive.
    pub fn find_by_email(kv: &dyn KvBackend, email: &str) -> anyhow::Result<Option<User>> {
        Ok(User::load_all(kv)?.into_iter().find(|u| u.email == email))
    }
}

/// Accessors for the single active session record.
pub struct Session;

impl Session {
    /// Read the session record. An undeserializable value reads as
    /// signed out; only medium failures error.
    pub fn current(kv: &dyn KvBackend) -> anyhow::Result<Option<User>> {
        let Some(raw) = kv.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "session record unreadable, treating as signed out");
                Ok(None)
            }
        }
    }

    /// Persist `user` as the active session record.
    pub fn replace(kv: &dyn KvBackend, user: &User) -> anyhow::Result<()> {
        kv.set(SESSION_KEY, &serde_json::to_string(user)?)
    }

    /// Delete the session record.
    pub fn clear(kv: &dyn KvBackend) -> anyhow::Result<()> {
        kv.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            password: "secret".into(),
            profile_completed: false,
            job_type: String::new(),
            bio: String::new(),
            usage: Default::default(),
            applications: Vec::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn absent_collection_reads_as_empty() {
        let kv = MemoryStore::new();
        assert!(User::load_all(&kv).expect("load").is_empty());
    }

    #[test]
    fn unreadable_collection_reads_as_empty() {
        let kv = MemoryStore::new();
        kv.set(USERS_KEY, "not json").expect("set");
        assert!(User::load_all(&kv).expect("load").is_empty());
    }

    #[test]
    fn collection_roundtrips_through_the_store() {
        let kv = MemoryStore::new();
        let user = sample_user();
        User::save_all(&kv, std::slice::from_ref(&user)).expect("save");

        let loaded = User::load_all(&kv).expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, user.id);
        assert_eq!(loaded[0].email, user.email);
    }

    #[test]
    fn find_by_email_is_case_sensitive() {
        let kv = MemoryStore::new();
        User::save_all(&kv, &[sample_user()]).expect("save");

        assert!(User::find_by_email(&kv, "jane@x.com")
            .expect("find")
            .is_some());
        assert!(User::find_by_email(&kv, "Jane@x.com")
            .expect("find")
            .is_none());
    }

    #[test]
    fn unreadable_session_reads_as_signed_out() {
        let kv = MemoryStore::new();
        kv.set(SESSION_KEY, "{broken").expect("set");
        assert!(Session::current(&kv).expect("current").is_none());
    }

    #[test]
    fn session_replace_and_clear() {
        let kv = MemoryStore::new();
        let user = sample_user();

        Session::replace(&kv, &user).expect("replace");
        let current = Session::current(&kv).expect("current").expect("some");
        assert_eq!(current.id, user.id);

        Session::clear(&kv).expect("clear");
        assert!(Session::current(&kv).expect("current").is_none());
    }
}

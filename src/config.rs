use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path of the JSON key-value store file backing the record store.
    pub store_path: PathBuf,
    /// Daily application quota shown on the dashboard usage bar.
    pub daily_limit: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let store_path = std::env::var("CLICKAPPLY_STORE_PATH")
            .unwrap_or_else(|_| "clickapply_store.json".into())
            .into();
        let daily_limit = std::env::var("CLICKAPPLY_DAILY_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        Ok(Self {
            store_path,
            daily_limit,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: "clickapply_store.json".into(),
            daily_limit: 5,
        }
    }
}

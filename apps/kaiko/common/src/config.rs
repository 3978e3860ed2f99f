use config::{Config, ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

/// How to count unread messages for a participant who never opened the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadPolicy {
    /// Report zero without querying, matching what clients have always seen.
    #[default]
    Zero,
    /// Every message in the chat counts as unread.
    All,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub run_migrations: bool,
    pub sql_logging: bool,
    pub chat_detail_concurrency: usize,
    pub recent_sessions_limit: u64,
    pub unread_policy: UnreadPolicy,
}

impl ServiceConfig {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables from .env file
        dotenv().ok();

        let mut s = Self::with_defaults()?;

        // Add in settings from the environment (with a prefix of APP)
        // Eg.. `APP_DATABASE_URL=postgres://... would set the `database_url` key
        s.merge(Environment::with_prefix("APP"))?;

        // Deserialize the configuration into the ServiceConfig struct
        s.try_into()
    }

    fn with_defaults() -> Result<Config, ConfigError> {
        let mut s = Config::new();
        s.set_default("host", "0.0.0.0")?;
        s.set_default("port", 8080_i64)?;
        s.set_default("run_migrations", true)?;
        s.set_default("sql_logging", false)?;
        s.set_default("chat_detail_concurrency", 8_i64)?;
        s.set_default("recent_sessions_limit", 10_i64)?;
        s.set_default("unread_policy", "zero")?;
        Ok(s)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

use baklay_core::Argon2Config;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub password: Argon2Config,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    #[serde(default)]
    pub refund_capacity_on_guide_cancel: bool,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            refund_capacity_on_guide_cancel: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

fn default_max_connections() -> u32 { 5 }
fn default_true() -> bool { true }
fn default_min_password_length() -> usize { 6 }

impl Config {
    /// `base` is a config file path without extension. `database_url`
    /// overrides whatever the files and environment say.
    pub fn load_from(base: &str, database_url: Option<String>) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(base))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `BAKLAY__DATABASE__URL=sqlite://other.db`
            .add_source(config::Environment::with_prefix("BAKLAY").separator("__"))
            .set_override_option("database.url", database_url)?
            .build()?;

        s.try_deserialize()
    }
}

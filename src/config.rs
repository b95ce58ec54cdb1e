//! Runtime settings.
//!
//! Read, in increasing priority, from built-in defaults, an optional
//! `trivia.toml` in the working directory and `TRIVIA_*` environment
//! variables (a `.env` file is loaded first). For example `TRIVIA_DB_PATH`,
//! `TRIVIA_PORT` or `TRIVIA_CORS_PREFIX`.

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite database file, created when missing.
    pub db_path: String,
    pub host: String,
    pub port: u16,
    /// Requests under this path get `Access-Control-Allow-Origin`.
    pub cors_prefix: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::defaults()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("db_path", "trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("cors_prefix", "/api/")
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.db_path, "trivia.db");
        assert_eq!(settings.cors_prefix, "/api/");
        assert_eq!(settings.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_win_over_defaults() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .set_override("port", 9000_i64)
            .unwrap()
            .set_override("db_path", "/tmp/quiz.db")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.db_path, "/tmp/quiz.db");
        assert_eq!(settings.host, "0.0.0.0");
    }
}

//! Environment-driven configuration.
//!
//! All values have defaults suitable for local use; override via environment
//! variables (or a `.env` file, loaded by `main`).

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Location of the persisted override blob (default: `overrides.json`).
    pub overrides_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default          |
    /// |------------------|------------------|
    /// | `HOST`           | `0.0.0.0`        |
    /// | `PORT`           | `8080`           |
    /// | `OVERRIDES_PATH` | `overrides.json` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let overrides_path = std::env::var("OVERRIDES_PATH")
            .unwrap_or_else(|_| "overrides.json".into())
            .into();

        Self {
            host,
            port,
            overrides_path,
        }
    }
}

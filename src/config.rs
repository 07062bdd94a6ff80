// src/config.rs
//
// Runtime configuration, read from the environment.
//
// Every value has a default except the lookup API key. Without a key the
// app still works: every lookup returns the fallback record.

use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use log::{info, warn};

pub const DEFAULT_LOOKUP_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_LOOKUP_MODEL.to_string(),
            endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    /// Explicit database file; `None` means the per-user data directory
    pub database_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load from process environment
    pub fn load() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load from any key/value source
    pub fn from_source<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = get("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!("GEMINI_API_KEY not set, movie lookups will use fallback records");
        }

        let lookup = LookupConfig {
            api_key,
            model: try_load(&get, "MOVIENIGHT_LOOKUP_MODEL", DEFAULT_LOOKUP_MODEL.to_string()),
            endpoint: try_load(
                &get,
                "MOVIENIGHT_LOOKUP_ENDPOINT",
                DEFAULT_LOOKUP_ENDPOINT.to_string(),
            ),
            timeout: Duration::from_secs(try_load(
                &get,
                "MOVIENIGHT_LOOKUP_TIMEOUT_SECS",
                DEFAULT_LOOKUP_TIMEOUT_SECS,
            )),
        };

        Self {
            lookup,
            database_path: get("MOVIENIGHT_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn try_load<F, T>(get: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = get(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

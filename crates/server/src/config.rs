use std::{collections::HashMap, fs, path::PathBuf};

use tracing::warn;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub films_path: PathBuf,
    pub cache_max_age_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            films_path: PathBuf::from("films.json"),
            cache_max_age_seconds: 300,
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    let env: HashMap<String, String> = std::env::vars().collect();
    resolve_settings(file.as_deref(), &env)
}

pub fn resolve_settings(file: Option<&str>, env: &HashMap<String, String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
                    settings.server_bind = v.to_string();
                }
                if let Some(v) = file_cfg.get("films_path").and_then(toml::Value::as_str) {
                    settings.films_path = PathBuf::from(v);
                }
                if let Some(v) = file_cfg
                    .get("cache_max_age_seconds")
                    .and_then(toml::Value::as_integer)
                    .and_then(|v| u64::try_from(v).ok())
                {
                    settings.cache_max_age_seconds = v;
                }
            }
            Err(error) => warn!(%error, "ignoring malformed {SETTINGS_FILE}"),
        }
    }

    if let Some(v) = env.get("APP__BIND_ADDR") {
        settings.server_bind = v.clone();
    }

    if let Some(v) = env.get("APP__FILMS_PATH") {
        settings.films_path = PathBuf::from(v);
    }

    if let Some(v) = env.get("APP__CACHE_MAX_AGE_SECONDS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.cache_max_age_seconds = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__CACHE_MAX_AGE_SECONDS"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

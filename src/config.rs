use std::env;
use tracing::warn;

pub const DEFAULT_WEBHOOK_BASE: &str = "http://localhost:5678";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub moods_url: String,
    pub submit_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!("ignoring invalid PORT {value:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let base = lookup("MOOD_WEBHOOK_BASE")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_WEBHOOK_BASE.to_string());

        let moods_url = lookup("MOODS_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| format!("{base}/webhook/moods"));
        let submit_url = lookup("MOOD_SUBMIT_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| format!("{base}/webhook/mood/submit"));

        Self {
            port,
            moods_url,
            submit_url,
        }
    }
}

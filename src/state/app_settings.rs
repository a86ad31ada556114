use football_api::client::{ApiConfig, DEFAULT_BASE_URL};
use log::LevelFilter;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "ROXYSCORE_API_URL";
pub const ENV_API_KEY: &str = "ROXYSCORE_API_KEY";
pub const ENV_LOG: &str = "ROXYSCORE_LOG";
pub const ENV_DATA_DIR: &str = "ROXYSCORE_DATA_DIR";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub api_url: String,
    pub api_key: Option<String>,
    pub data_dir: PathBuf,
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        Self {
            full_screen: false,
            log_level: var(ENV_LOG)
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Warn),
            api_url: var(ENV_API_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            api_key: var(ENV_API_KEY),
            data_dir: var(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| default_data_dir(&var)),
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            ..ApiConfig::default()
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_data_dir(var: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(data_home) = var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join("roxyscore");
    }
    if let Some(home) = var("HOME") {
        return PathBuf::from(home).join(".local").join("share").join("roxyscore");
    }
    PathBuf::from(".roxyscore")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.log_level, LevelFilter::Warn);
        assert_eq!(s.api_url, DEFAULT_BASE_URL);
        assert!(s.api_key.is_none());
        assert_eq!(s.data_dir, PathBuf::from(".roxyscore"));
    }

    #[test]
    fn environment_overrides() {
        let s = settings(&[
            (ENV_LOG, "debug"),
            (ENV_API_KEY, " secret "),
            (ENV_API_URL, "http://localhost:9000"),
            ("HOME", "/home/fan"),
        ]);
        assert_eq!(s.log_level, LevelFilter::Debug);
        assert_eq!(s.api_key.as_deref(), Some("secret"));
        assert_eq!(s.api_config().base_url, "http://localhost:9000");
        assert_eq!(s.data_dir, PathBuf::from("/home/fan/.local/share/roxyscore"));
    }

    #[test]
    fn xdg_data_home_wins_over_home() {
        let s = settings(&[("XDG_DATA_HOME", "/data"), ("HOME", "/home/fan")]);
        assert_eq!(s.data_dir, PathBuf::from("/data/roxyscore"));

        let explicit = settings(&[(ENV_DATA_DIR, "/tmp/rs"), ("XDG_DATA_HOME", "/data")]);
        assert_eq!(explicit.data_dir, PathBuf::from("/tmp/rs"));
    }

    #[test]
    fn unknown_log_level_falls_back_to_warn() {
        assert_eq!(settings(&[(ENV_LOG, "loud")]).log_level, LevelFilter::Warn);
    }
}

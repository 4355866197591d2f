use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the task board API.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing
    /// or malformed.
    pub fn load() -> Self {
        Self::load_from(config_path()).unwrap_or_default()
    }

    fn load_from(path: Option<PathBuf>) -> Option<Self> {
        let path = path?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("ignoring malformed config at {}: {}", path.display(), err);
                None
            }
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taskboard-tui").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_localhost() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn parses_api_url() {
        let config: Config = toml::from_str(r#"api_url = "http://10.0.0.2:8080/api""#).unwrap();
        assert_eq!(config.api_url, "http://10.0.0.2:8080/api");
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use rota_api::{ClientConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use tracing::warn;

const BASE_URL_ENV: &str = "ROTA_BASE_URL";

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rota").join("config.toml"))
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_config_from(&path)
}

/// Reads a config file. A missing file yields defaults; a malformed one is
/// reported and also yields defaults.
pub fn load_config_from(path: &Path) -> Config {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Config::default();
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
        Config::default()
    })
}

/// Resolves client settings: CLI flags, then environment, then config file,
/// then built-in defaults.
pub fn resolve_client_config(cli_base_url: Option<String>, cli_timeout: Option<u64>) -> ClientConfig {
    let env_base_url = std::env::var(BASE_URL_ENV).ok();
    merge(cli_base_url, cli_timeout, env_base_url, load_config())
}

fn merge(
    cli_base_url: Option<String>,
    cli_timeout: Option<u64>,
    env_base_url: Option<String>,
    file: Config,
) -> ClientConfig {
    let base_url = [cli_base_url, env_base_url, file.base_url]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let config = ClientConfig::new(base_url);
    match cli_timeout.or(file.timeout_secs) {
        Some(secs) if secs > 0 => config.with_timeout(Duration::from_secs(secs)),
        _ => config,
    }
}

#[cfg(feature = "tui")]
pub fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rota")
        .join("rota.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config_from(&dir.path().join("nope.toml")), Config::default());
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://rota.example.com/api\"\ntimeout_secs = 10").unwrap();

        let config = load_config_from(file.path());
        assert_eq!(config.base_url.as_deref(), Some("https://rota.example.com/api"));
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn malformed_file_is_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [").unwrap();
        assert_eq!(load_config_from(file.path()), Config::default());
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = Config {
            base_url: Some("http://file".to_string()),
            timeout_secs: Some(5),
        };

        let config = merge(
            Some("http://cli".to_string()),
            None,
            Some("http://env".to_string()),
            Config {
                base_url: file.base_url.clone(),
                timeout_secs: file.timeout_secs,
            },
        );
        assert_eq!(config.base_url, "http://cli");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));

        let config = merge(None, Some(30), Some("http://env".to_string()), file);
        assert_eq!(config.base_url, "http://env");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn falls_back_to_default_url() {
        let config = merge(None, None, Some(String::new()), Config::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
    }
}

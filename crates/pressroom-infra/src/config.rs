//! Configuration loader for Pressroom.
//!
//! Reads `config.toml` from the data directory (`~/.pressroom/` unless
//! `PRESSROOM_DATA_DIR` is set) and deserializes it into
//! [`ConferenceConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::{Path, PathBuf};

use pressroom_types::config::ConferenceConfig;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PRESSROOM_DATA_DIR";

/// Resolve the data directory.
///
/// Priority: `$PRESSROOM_DATA_DIR`, then `~/.pressroom`, then `./.pressroom`.
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_with(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from), dirs::home_dir())
}

fn resolve_data_dir_with(override_dir: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    match home {
        Some(home) => home.join(".pressroom"),
        None => PathBuf::from(".pressroom"),
    }
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ConferenceConfig::default()`].
/// - Unreadable or unparsable file: a warning, then the default.
pub async fn load_conference_config(data_dir: &Path) -> ConferenceConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ConferenceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ConferenceConfig::default();
        }
    };

    match toml::from_str::<ConferenceConfig>(&content) {
        Ok(config) => {
            tracing::debug!(path = %config_path.display(), model = %config.model, "loaded config");
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", config_path.display());
            ConferenceConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_conference_config(tmp.path()).await;
        assert_eq!(config, ConferenceConfig::default());
    }

    #[tokio::test]
    async fn load_config_partial_toml_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
model = "gemini-2.5-flash"
quit_keyword = "/leave"
"#,
        )
        .await
        .unwrap();

        let config = load_conference_config(tmp.path()).await;
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.quit_keyword, "/leave");
        assert_eq!(config.sentinel, "[END OF PRESS CONFERENCE]");
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "model = [not valid")
            .await
            .unwrap();

        let config = load_conference_config(tmp.path()).await;
        assert_eq!(config, ConferenceConfig::default());
    }

    #[test]
    fn data_dir_override_wins() {
        let dir = resolve_data_dir_with(Some(PathBuf::from("/tmp/pr")), Some(PathBuf::from("/home/u")));
        assert_eq!(dir, PathBuf::from("/tmp/pr"));
    }

    #[test]
    fn data_dir_falls_back_to_home_then_cwd() {
        let dir = resolve_data_dir_with(Some(PathBuf::new()), Some(PathBuf::from("/home/u")));
        assert_eq!(dir, PathBuf::from("/home/u/.pressroom"));
        assert_eq!(resolve_data_dir_with(None, None), PathBuf::from(".pressroom"));
    }
}

use crate::errors::{ConfabError, ConfabResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub log_level: String,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            log_level: "info".to_string(),
            log_dir: ".".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ConfabResult<()> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| ConfabError::config_error(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&config_str)
            .map_err(|e| ConfabError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        let config = Config::default();

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ConfabError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ConfabError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| ConfabError::config_error(format!("Failed to write config file: {}", e)))?;

        config
    };

    apply_env_override(&mut config);

    validate_config(&config)?;

    *CONFIG.write().unwrap() = config;

    Ok(())
}

// Env var wins over the file value, file contents are left untouched
fn apply_env_override(config: &mut Config) {
    if let Ok(url) = env::var("CONFAB_BACKEND_URL") {
        config.backend_url = url;
    }
}

fn get_config_path() -> ConfabResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ConfabError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("confab").join("config.json"))
}

fn validate_config(config: &Config) -> ConfabResult<()> {
    if config.backend_url.is_empty() {
        return Err(ConfabError::config_error("backend_url is required"));
    }

    if !config.backend_url.starts_with("http://") && !config.backend_url.starts_with("https://") {
        return Err(ConfabError::config_error(
            "backend_url must start with http:// or https://",
        ));
    }

    if config.log_level.is_empty() {
        return Err(ConfabError::config_error("log_level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_backend_url() {
        let mut config = Config::default();
        config.backend_url = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_non_http_url() {
        let mut config = Config::default();
        config.backend_url = "ftp://chat.example.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_env_var_overrides_file_value() {
        let mut config = Config::default();
        env::set_var("CONFAB_BACKEND_URL", "http://10.0.0.7:9000");
        apply_env_override(&mut config);
        env::remove_var("CONFAB_BACKEND_URL");

        assert_eq!(config.backend_url, "http://10.0.0.7:9000");
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::default();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.backend_url, config.backend_url);
        assert_eq!(loaded.log_level, config.log_level);
    }
}

use crate::utils::error::{Result, StudioError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub dismiss_after_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StudioError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HAIR_STUDIO_API})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| StudioError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api.base_url {
            validate_url("api.base_url", url)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }
        if let Some(path) = &self.storage.path {
            validate_path("storage.path", path)?;
        }
        if let Some(delay) = self.notifications.dismiss_after_seconds {
            validate_positive_number("notifications.dismiss_after_seconds", delay, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "https://salon.example.com/api"
timeout_seconds = 10

[storage]
path = "/tmp/hair-studio"

[notifications]
dismiss_after_seconds = 8
"#,
        )
        .unwrap();

        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://salon.example.com/api")
        );
        assert_eq!(config.api.timeout_seconds, Some(10));
        assert_eq!(config.storage.path.as_deref(), Some("/tmp/hair-studio"));
        assert_eq!(config.notifications.dismiss_after_seconds, Some(8));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.api.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("HAIR_STUDIO_TEST_BASE", "http://10.0.0.5:8000/api");
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "${HAIR_STUDIO_TEST_BASE}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://10.0.0.5:8000/api")
        );
    }

    #[test]
    fn test_unset_variable_is_kept_and_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "${HAIR_STUDIO_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let config = TomlConfig::from_toml_str(
            r#"
[notifications]
dismiss_after_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        assert!(TomlConfig::from_toml_str("[api]\nbase_url = 5").is_err());
    }
}

use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub delivery: DeliverySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliverySection {
    pub webhook_url: Option<String>,
    pub systeme_api_url: Option<String>,
    pub systeme_action_url: Option<String>,
    pub local_delay_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeadError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| LeadError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 替換 `${VAR}`；未設定的變數視為空字串，也就是「未配置」
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static VAR: OnceLock<Regex> = OnceLock::new();
        let re = VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::debug!("Environment variable {} is not set", var_name);
                String::new()
            })
        })
        .to_string()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let delivery = &self.delivery;
        let urls = [
            ("delivery.webhook_url", &delivery.webhook_url),
            ("delivery.systeme_api_url", &delivery.systeme_api_url),
            ("delivery.systeme_action_url", &delivery.systeme_action_url),
        ];
        for (field, value) in urls {
            if let Some(url) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                validate_url(field, url)?;
            }
        }

        if let Some(timeout) = delivery.timeout_seconds {
            validate_range("delivery.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(delay) = delivery.local_delay_ms {
            validate_range("delivery.local_delay_ms", delay, 0, 10_000)?;
        }
        Ok(())
    }
}

pub mod lambda;
pub mod toml_config;

use crate::core::delivery::{DEFAULT_LOCAL_DELAY, DEFAULT_TIMEOUT};
use crate::core::DeliveryConfig;
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Resolved delivery endpoints and timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySettings {
    pub webhook_url: Option<String>,
    pub systeme_api_url: Option<String>,
    pub systeme_action_url: Option<String>,
    pub timeout: Duration,
    pub local_delay: Duration,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            systeme_api_url: None,
            systeme_action_url: None,
            timeout: DEFAULT_TIMEOUT,
            local_delay: DEFAULT_LOCAL_DELAY,
        }
    }
}

impl DeliverySettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let delivery = &config.delivery;
        Self {
            webhook_url: delivery.webhook_url.clone(),
            systeme_api_url: delivery.systeme_api_url.clone(),
            systeme_action_url: delivery.systeme_action_url.clone(),
            timeout: delivery
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            local_delay: delivery
                .local_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_LOCAL_DELAY),
        }
    }
}

impl DeliveryConfig for DeliverySettings {
    fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    fn systeme_api_url(&self) -> Option<&str> {
        self.systeme_api_url.as_deref()
    }

    fn systeme_action_url(&self) -> Option<&str> {
        self.systeme_action_url.as_deref()
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lifepath-leads")]
#[command(about = "Compute a life path number and deliver the lead")]
pub struct CliConfig {
    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long)]
    pub day: Option<i64>,

    #[arg(long)]
    pub month: Option<i64>,

    #[arg(long)]
    pub year: Option<i64>,

    #[arg(long, help = "POST the lead as JSON to this webhook")]
    pub webhook_url: Option<String>,

    #[arg(long, help = "POST the lead as JSON to this contact API")]
    pub systeme_api: Option<String>,

    #[arg(long, help = "POST the lead as form fields to this Systeme.io form action")]
    pub systeme_action: Option<String>,

    #[arg(long, help = "TOML file with a [delivery] table")]
    pub config: Option<String>,

    #[arg(long, help = "Print the personalized reading")]
    pub reading: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn lead_form(&self) -> crate::core::LeadForm {
        crate::core::LeadForm {
            first_name: self.first_name.clone(),
            email: self.email.clone(),
            day: self.day,
            month: self.month,
            year: self.year,
        }
    }

    /// File settings first, then command line flags on top.
    pub fn delivery_settings(&self) -> crate::utils::error::Result<DeliverySettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::debug!("Loading delivery config from {}", path);
                DeliverySettings::from_toml(&TomlConfig::from_file(path)?)
            }
            None => DeliverySettings::default(),
        };

        if self.webhook_url.is_some() {
            settings.webhook_url = self.webhook_url.clone();
        }
        if self.systeme_api.is_some() {
            settings.systeme_api_url = self.systeme_api.clone();
        }
        if self.systeme_action.is_some() {
            settings.systeme_action_url = self.systeme_action.clone();
        }
        Ok(settings)
    }
}

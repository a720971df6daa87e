use crate::proxy::contact::{SystemeRegion, SYSTEME_API_BASE};
use crate::proxy::tts::{DEFAULT_VOICE_ID, ELEVENLABS_API_BASE};
use crate::proxy::{ContactProxy, Proxy, TtsProxy};
use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    Contact,
    Tts,
}

impl FromStr for ProxyKind {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contact" | "systeme-create-contact" => Ok(ProxyKind::Contact),
            "tts" => Ok(ProxyKind::Tts),
            other => Err(LeadError::InvalidConfigValueError {
                field: "PROXY_HANDLER".to_string(),
                value: other.to_string(),
                reason: "Expected 'contact' or 'tts'".to_string(),
            }),
        }
    }
}

/// Environment of a Lambda deployment. API keys stay optional here: a
/// missing key is answered with a 500 at request time, not a cold-start crash.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub handler: ProxyKind,
    pub systeme_api_key: Option<String>,
    pub systeme_region: SystemeRegion,
    pub systeme_base_url: String,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: String,
    pub elevenlabs_voice_id: String,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let handler = lookup("PROXY_HANDLER").ok_or_else(|| LeadError::MissingConfigError {
            field: "PROXY_HANDLER".to_string(),
        })?;

        let systeme_region =
            SystemeRegion::from_setting(&lookup("SYSTEME_IO_REGION").unwrap_or_default());

        Ok(Self {
            handler: handler.parse()?,
            systeme_api_key: lookup("SYSTEME_IO_API_KEY"),
            systeme_region,
            systeme_base_url: lookup("SYSTEME_IO_BASE_URL")
                .unwrap_or_else(|| systeme_region.base_url().to_string()),
            elevenlabs_api_key: lookup("ELEVENLABS_API_KEY"),
            elevenlabs_base_url: lookup("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|| ELEVENLABS_API_BASE.to_string()),
            elevenlabs_voice_id: lookup("ELEVENLABS_VOICE_ID")
                .unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
        })
    }

    pub fn build_proxy(&self) -> Proxy {
        match self.handler {
            ProxyKind::Contact => Proxy::Contact(ContactProxy::new(
                self.systeme_api_key.clone(),
                &self.systeme_base_url,
            )),
            ProxyKind::Tts => Proxy::Tts(TtsProxy::new(
                self.elevenlabs_api_key.clone(),
                &self.elevenlabs_base_url,
                &self.elevenlabs_voice_id,
            )),
        }
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        match self.handler {
            ProxyKind::Contact => {
                validate_url("SYSTEME_IO_BASE_URL", &self.systeme_base_url)?;
                if self.systeme_api_key.is_none() {
                    tracing::warn!("⚠️ SYSTEME_IO_API_KEY is not set, requests will fail with 500");
                }
            }
            ProxyKind::Tts => {
                validate_url("ELEVENLABS_BASE_URL", &self.elevenlabs_base_url)?;
                validate_non_empty_string("ELEVENLABS_VOICE_ID", &self.elevenlabs_voice_id)?;
                if self.elevenlabs_api_key.is_none() {
                    tracing::warn!("⚠️ ELEVENLABS_API_KEY is not set, requests will fail with 500");
                }
            }
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

use crate::domain::model::{DeliveryChannel, DeliveryReport, LeadPayload};
use crate::domain::ports::{DeliveryConfig, LeadDelivery};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_LOCAL_DELAY: Duration = Duration::from_millis(250);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 回應內容只保留前 500 字元
const RESPONSE_EXCERPT_CHARS: usize = 500;

/// Where a submission goes. Chosen once from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStrategy {
    Webhook(Url),
    CrmApi(Url),
    CrmFormAction(Url),
    LocalOnly,
}

fn configured(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl DeliveryStrategy {
    /// Webhook wins over the CRM API, which wins over the CRM form action.
    pub fn select<C: DeliveryConfig + ?Sized>(config: &C) -> Result<Self> {
        let strategy = if let Some(url) = configured(config.webhook_url()) {
            DeliveryStrategy::Webhook(validate_url("webhook_url", url)?)
        } else if let Some(url) = configured(config.systeme_api_url()) {
            DeliveryStrategy::CrmApi(validate_url("systeme_api_url", url)?)
        } else if let Some(url) = configured(config.systeme_action_url()) {
            DeliveryStrategy::CrmFormAction(validate_url("systeme_action_url", url)?)
        } else {
            DeliveryStrategy::LocalOnly
        };

        tracing::info!("🔍 Delivery strategy: {}", strategy.channel());
        Ok(strategy)
    }

    pub fn channel(&self) -> DeliveryChannel {
        match self {
            DeliveryStrategy::Webhook(_) => DeliveryChannel::Webhook,
            DeliveryStrategy::CrmApi(_) => DeliveryChannel::CrmApi,
            DeliveryStrategy::CrmFormAction(_) => DeliveryChannel::CrmFormAction,
            DeliveryStrategy::LocalOnly => DeliveryChannel::LocalOnly,
        }
    }
}

/// Form fields expected by the Systeme.io form action.
pub fn crm_form_fields(payload: &LeadPayload) -> Vec<(&'static str, String)> {
    vec![
        ("email", payload.email.clone()),
        ("first_name", payload.first_name.clone()),
        ("custom_fields[date_de_naissance]", payload.birth_date.clone()),
        (
            "custom_fields[life_path_number]",
            payload.life_path_number.to_string(),
        ),
    ]
}

pub struct HttpLeadDelivery {
    client: Client,
    strategy: DeliveryStrategy,
    local_delay: Duration,
}

impl HttpLeadDelivery {
    pub fn new(strategy: DeliveryStrategy) -> Result<Self> {
        Self::with_timeouts(strategy, DEFAULT_TIMEOUT, DEFAULT_LOCAL_DELAY)
    }

    pub fn with_timeouts(
        strategy: DeliveryStrategy,
        timeout: Duration,
        local_delay: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            strategy,
            local_delay,
        })
    }

    async fn report(&self, response: reqwest::Response) -> Result<DeliveryReport> {
        let status = response.status();
        tracing::info!("📡 {} responded {}", self.strategy.channel(), status);
        if !status.is_success() {
            tracing::warn!("⚠️ {} returned non-success status {}", self.strategy.channel(), status);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::debug!("📡 Response body: {}", excerpt(&text, 200));

        Ok(DeliveryReport {
            channel: self.strategy.channel(),
            status: Some(status.as_u16()),
            response: Some(excerpt(&text, RESPONSE_EXCERPT_CHARS)),
        })
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[async_trait]
impl LeadDelivery for HttpLeadDelivery {
    fn channel(&self) -> DeliveryChannel {
        self.strategy.channel()
    }

    async fn deliver(&self, payload: &LeadPayload) -> Result<DeliveryReport> {
        match &self.strategy {
            DeliveryStrategy::Webhook(url) | DeliveryStrategy::CrmApi(url) => {
                tracing::info!("📡 Posting lead to {}", url);
                let response = self.client.post(url.clone()).json(payload).send().await?;
                self.report(response).await
            }
            DeliveryStrategy::CrmFormAction(url) => {
                tracing::info!("📋 Posting form fields to {}", url);
                let form = crm_form_fields(payload)
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                let response = self.client.post(url.clone()).multipart(form).send().await?;
                self.report(response).await
            }
            DeliveryStrategy::LocalOnly => {
                tracing::info!("💻 No endpoint configured, showing result locally");
                tokio::time::sleep(self.local_delay).await;
                Ok(DeliveryReport {
                    channel: DeliveryChannel::LocalOnly,
                    status: None,
                    response: None,
                })
            }
        }
    }
}

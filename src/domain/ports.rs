use crate::domain::model::{DeliveryChannel, DeliveryReport, LeadPayload};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Which outbound endpoints are configured. Blank values mean "not configured".
pub trait DeliveryConfig: Send + Sync {
    fn webhook_url(&self) -> Option<&str>;
    fn systeme_api_url(&self) -> Option<&str>;
    fn systeme_action_url(&self) -> Option<&str>;
}

#[async_trait]
pub trait LeadDelivery: Send + Sync {
    fn channel(&self) -> DeliveryChannel;
    async fn deliver(&self, payload: &LeadPayload) -> Result<DeliveryReport>;
}

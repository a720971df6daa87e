use crate::core::submission::{build_payload, validate_form};
use crate::domain::model::{DeliveryChannel, LeadForm, SubmissionOutcome};
use crate::domain::ports::LeadDelivery;
use crate::utils::error::Result;

pub struct LeadEngine<D: LeadDelivery> {
    delivery: D,
}

fn success_message(channel: DeliveryChannel, first_name: &str, number: u32) -> String {
    match channel {
        DeliveryChannel::Webhook => {
            format!("Merci {}! Votre nombre de chemin de vie: {}.", first_name, number)
        }
        DeliveryChannel::CrmApi => format!(
            "Merci {}! Contact envoyé via API Systeme.io. Chemin de vie: {}.",
            first_name, number
        ),
        DeliveryChannel::CrmFormAction => format!(
            "Merci {}! Contact envoyé à Systeme.io. Nombre de chemin de vie: {}.",
            first_name, number
        ),
        DeliveryChannel::LocalOnly => format!(
            "Merci {}! Voici votre nombre de chemin de vie: {}.",
            first_name, number
        ),
    }
}

fn failure_message(channel: DeliveryChannel, first_name: &str) -> String {
    let what = match channel {
        DeliveryChannel::Webhook => "Envoi webhook non abouti",
        DeliveryChannel::CrmApi => "API Systeme.io non aboutie",
        DeliveryChannel::CrmFormAction | DeliveryChannel::LocalOnly => {
            "Envoi Systeme.io non abouti"
        }
    };
    format!("Merci {}! ({})", first_name, what)
}

impl<D: LeadDelivery> LeadEngine<D> {
    pub fn new(delivery: D) -> Self {
        Self { delivery }
    }

    /// Validates the form, computes the life path number and delivers the lead.
    ///
    /// Only form errors are returned as `Err`; a failed delivery still yields
    /// an outcome, with a softened message and `error` set.
    pub async fn submit(&self, form: &LeadForm) -> Result<SubmissionOutcome> {
        tracing::info!("🚀 Form submitted");

        let lead = validate_form(form)?;
        tracing::info!("✅ Validation OK");

        let payload = build_payload(&lead);
        let number = payload.life_path_number.value();
        let channel = self.delivery.channel();

        let outcome = match self.delivery.deliver(&payload).await {
            Ok(report) => SubmissionOutcome {
                message: success_message(report.channel, &form.first_name, number),
                payload,
                response: report.response,
                error: None,
            },
            Err(e) => {
                tracing::error!("❌ Delivery via {} failed: {}", channel, e);
                SubmissionOutcome {
                    message: failure_message(channel, &form.first_name),
                    payload,
                    response: None,
                    error: Some(e.to_string()),
                }
            }
        };

        tracing::info!("🏁 Submission via {} finished", channel);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DeliveryReport, LeadPayload};
    use crate::utils::error::{FormError, LeadError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingDelivery {
        channel: DeliveryChannel,
        fail: bool,
        seen: Mutex<Vec<LeadPayload>>,
    }

    impl RecordingDelivery {
        fn new(channel: DeliveryChannel, fail: bool) -> Self {
            Self {
                channel,
                fail,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LeadDelivery for RecordingDelivery {
        fn channel(&self) -> DeliveryChannel {
            self.channel
        }

        async fn deliver(&self, payload: &LeadPayload) -> Result<DeliveryReport> {
            self.seen.lock().unwrap().push(payload.clone());
            if self.fail {
                return Err(LeadError::UpstreamError {
                    status: 502,
                    message: "bad gateway".to_string(),
                });
            }
            Ok(DeliveryReport {
                channel: self.channel,
                status: Some(200),
                response: Some("Accepted".to_string()),
            })
        }
    }

    fn form() -> LeadForm {
        LeadForm {
            first_name: "Marie".to_string(),
            email: "marie@example.fr".to_string(),
            day: Some(15),
            month: Some(8),
            year: Some(1990),
        }
    }

    #[tokio::test]
    async fn test_webhook_success_message() {
        let engine = LeadEngine::new(RecordingDelivery::new(DeliveryChannel::Webhook, false));
        let outcome = engine.submit(&form()).await.unwrap();

        assert_eq!(outcome.message, "Merci Marie! Votre nombre de chemin de vie: 6.");
        assert_eq!(outcome.response.as_deref(), Some("Accepted"));
        assert!(outcome.error.is_none());
        assert_eq!(outcome.payload.birth_date, "1990-08-15");
    }

    #[tokio::test]
    async fn test_delivery_failure_is_softened() {
        let engine = LeadEngine::new(RecordingDelivery::new(DeliveryChannel::CrmApi, true));
        let outcome = engine.submit(&form()).await.unwrap();

        assert_eq!(outcome.message, "Merci Marie! (API Systeme.io non aboutie)");
        assert!(outcome.error.unwrap().contains("bad gateway"));
        assert_eq!(outcome.payload.life_path_number.value(), 6);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_delivery() {
        let delivery = RecordingDelivery::new(DeliveryChannel::Webhook, false);
        let engine = LeadEngine::new(delivery);
        let mut bad = form();
        bad.day = Some(31);
        bad.month = Some(4);

        let err = engine.submit(&bad).await.unwrap_err();
        assert!(matches!(err, LeadError::Form(FormError::InvalidDate)));
        assert!(engine.delivery.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_messages_per_channel() {
        assert_eq!(
            success_message(DeliveryChannel::CrmFormAction, "Luc", 11),
            "Merci Luc! Contact envoyé à Systeme.io. Nombre de chemin de vie: 11."
        );
        assert_eq!(
            success_message(DeliveryChannel::LocalOnly, "Luc", 22),
            "Merci Luc! Voici votre nombre de chemin de vie: 22."
        );
        assert_eq!(
            failure_message(DeliveryChannel::Webhook, "Luc"),
            "Merci Luc! (Envoi webhook non abouti)"
        );
    }
}

pub mod delivery;
pub mod engine;
pub mod numerology;
pub mod reading;
pub mod submission;

pub use crate::domain::model::{
    BirthDate, DeliveryChannel, DeliveryReport, LeadForm, LeadPayload, LifePathNumber,
    SubmissionOutcome,
};
pub use crate::domain::ports::{DeliveryConfig, LeadDelivery};
pub use crate::utils::error::Result;

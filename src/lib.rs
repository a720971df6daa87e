pub mod config;
pub mod core;
pub mod domain;
pub mod proxy;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::lambda::LambdaConfig;
pub use config::{toml_config::TomlConfig, DeliverySettings};
pub use core::{
    delivery::{DeliveryStrategy, HttpLeadDelivery},
    engine::LeadEngine,
    numerology::{compute_life_path_number, is_valid_date},
};
pub use proxy::{ContactProxy, HttpEvent, HttpResponse, Proxy, TtsProxy};
pub use utils::error::{FormError, LeadError, Result};

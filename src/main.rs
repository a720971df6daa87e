use clap::Parser;
use lifepath_leads::core::reading::{personalized_text, text_segments};
use lifepath_leads::utils::error::ErrorSeverity;
use lifepath_leads::utils::logger;
use lifepath_leads::{CliConfig, DeliveryStrategy, HttpLeadDelivery, LeadEngine, LeadError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lifepath-leads");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let outcome = match run(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                "❌ Submission failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    println!("✅ {}", outcome.message);
    if let Some(response) = &outcome.response {
        println!("📡 {}", response);
    }
    if let Some(error) = &outcome.error {
        println!("⚠️ {}", error);
    }

    if config.reading {
        println!();
        println!("🔮 Votre lecture personnalisée");
        for segment in text_segments(&personalized_text(&outcome.payload)) {
            println!("  {}", segment);
        }
    }

    Ok(())
}

async fn run(
    config: &CliConfig,
) -> Result<lifepath_leads::core::SubmissionOutcome, LeadError> {
    let settings = config.delivery_settings()?;
    let strategy = DeliveryStrategy::select(&settings)?;
    let delivery = HttpLeadDelivery::with_timeouts(strategy, settings.timeout, settings.local_delay)?;

    LeadEngine::new(delivery).submit(&config.lead_form()).await
}

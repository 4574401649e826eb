use ghana_rentals::agent::service::RentalAgent;
use ghana_rentals::agent::RunStatus;
use ghana_rentals::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;

    let query: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = if query.trim().is_empty() {
        "2 bedroom apartment in Osu".to_string()
    } else {
        query
    };

    let agent = RentalAgent::new(cfg);
    let outcome = agent.answer(&query).await;

    println!("\n==============================");
    match outcome.status {
        RunStatus::Success => {
            println!("{}", outcome.report.unwrap_or_default());
            for (namespace, handle) in &outcome.stored_objects {
                println!("stored {namespace}: {handle}");
            }
        }
        RunStatus::Error => {
            println!("{}", outcome.error_message.unwrap_or_default());
        }
    }
    println!("==============================\n");

    Ok(())
}

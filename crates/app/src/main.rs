use clap::{Parser, Subcommand};
use engine::{CostEstimate, FinancialModel, Money, Rates};
use uuid::Uuid;
use worker::fs::{JsonDirectorySource, LocalStore};
use worker::{CostEstimateSource, ReportJob};

use crate::error::{AppError, Result};
use crate::settings::Settings;

mod error;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "smeta", about = "Cost estimate reports")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the xlsx report of an estimate and print where it was stored.
    Generate { id: Uuid },
    /// Print the grand total of an estimate.
    Total { id: Uuid },
    /// Print every derived figure of an estimate as JSON.
    Model { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "smeta={level},worker={level},report={level},engine={level}",
            level = settings.app.level
        ))
        .init();
    tracing::debug!(source = %settings.source.dir.display(), "settings loaded");

    let source = JsonDirectorySource::new(&settings.source.dir);
    match cli.command {
        Command::Generate { id } => {
            let store = LocalStore::new(&settings.storage.root, &settings.storage.base_url);
            let job = ReportJob::new(source, store)
                .rates(settings.rates)
                .policy(settings.retry_policy())
                .category(&settings.storage.category);
            match job.generate_report(id).await? {
                Some(locator) => println!("{locator}"),
                None => return Err(AppError::NotFound(id)),
            }
        }
        Command::Total { id } => {
            let estimate = source.load(id).await?.ok_or(AppError::NotFound(id))?;
            println!("{}", grand_total(&estimate, &settings.rates)?);
        }
        Command::Model { id } => {
            let estimate = source.load(id).await?.ok_or(AppError::NotFound(id))?;
            engine::validate(&estimate)?;
            let model = FinancialModel::build(&estimate, &settings.rates);
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
    }

    Ok(())
}

/// Grand total of an estimate, rejecting malformed input first.
fn grand_total(estimate: &CostEstimate, rates: &Rates) -> Result<Money> {
    engine::validate(estimate)?;
    Ok(engine::compute_grand_total(estimate, rates))
}

#[cfg(test)]
mod tests {
    use engine::{FinancingSource, RawMaterial};

    use super::*;

    fn estimate(price: Money) -> CostEstimate {
        let mut estimate = CostEstimate::new("Asalarichilik", 1);
        estimate.raw_materials.push(RawMaterial {
            name: "Shakar".to_string(),
            unit: "kg".to_string(),
            quantity: 10,
            price,
            financing_source: FinancingSource::Organization,
        });
        estimate
    }

    #[test]
    fn total_of_a_valid_estimate() {
        let total = grand_total(&estimate(Money::from_major(12_000)), &Rates::default()).unwrap();
        assert_eq!(total, Money::from_major(120_000));
    }

    #[test]
    fn total_rejects_negative_prices() {
        let result = grand_total(&estimate(Money::new(-1)), &Rates::default());
        assert!(matches!(result, Err(AppError::Engine(_))));
    }
}

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;
use machine_learning::{Dataset, LinearRegression, Score, dataset::DEFAULT_TARGET};
use model::FEATURES;
use rand::{SeedableRng, rngs::StdRng};

/// Fits the housing price model and writes it next to an example request payload.
#[derive(Parser)]
#[command(name = "train")]
struct Cli {
    /// Dataset file, comma or whitespace separated, with a header row
    #[arg(long, default_value = "housing.csv")]
    data: PathBuf,

    /// Name of the target column
    #[arg(long, default_value = DEFAULT_TARGET)]
    target: String,

    /// Where to write the fitted model
    #[arg(long, default_value = "ml-model.json")]
    model_out: PathBuf,

    /// Where to write the example request payload
    #[arg(long, default_value = "example.json")]
    example_out: PathBuf,

    /// Seed used to pick the example row
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dataset = Dataset::from_path(&cli.data, &cli.target)
        .with_context(|| format!("failed to load dataset {}", cli.data.display()))?;
    info!("column order: {FEATURES:?}");
    info!("loaded {} samples from {}", dataset.len(), cli.data.display());

    let example = dataset.sample(&mut StdRng::seed_from_u64(cli.seed));
    let payload = serde_json::to_vec_pretty(&example.to_json_object())?;
    fs::write(&cli.example_out, payload)
        .with_context(|| format!("failed to write {}", cli.example_out.display()))?;
    info!("wrote example payload to {}", cli.example_out.display());

    let model = LinearRegression::new().fit(&dataset)?;
    let Score { mse, r2 } = Score::evaluate(&model, &dataset);
    info!(mse = mse, r2 = r2; "fitted linear model");

    model
        .save(&cli.model_out)
        .with_context(|| format!("failed to write {}", cli.model_out.display()))?;
    info!("wrote model to {}", cli.model_out.display());

    Ok(())
}

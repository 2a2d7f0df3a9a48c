//! Sleep model inspection commands.

use std::path::PathBuf;

use clap::Subcommand;

use betterrest_core::error::Result;
use betterrest_core::{ArtifactModel, Config, LinearSleepModel};

#[derive(Subcommand)]
pub enum ModelAction {
    /// Show the feature contract and coefficients
    Show {
        /// Artifact to inspect instead of the configured one
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Verify that the model artifact loads
    Check {
        /// Artifact to check instead of the configured one
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Write the bundled model as an artifact
    Export {
        /// Destination path
        path: PathBuf,
    },
}

pub fn run(action: ModelAction) -> Result<()> {
    match action {
        ModelAction::Show { model } => {
            let (source, model) = resolve(model)?;
            println!("Model: {} ({})", model.name, source);
            println!("\nFeature contract:");
            println!("  wake             {}", model.contract.wake_unit.as_str());
            println!("  estimated_sleep  {}", model.contract.sleep_unit.as_str());
            println!("  coffee           cups");
            println!("  output           {}", model.contract.output_unit.as_str());
            println!("\nCoefficients:");
            println!("  intercept        {}", model.coefficients.intercept);
            println!("  wake             {}", model.coefficients.wake);
            println!("  estimated_sleep  {}", model.coefficients.estimated_sleep);
            println!("  coffee           {}", model.coefficients.coffee);
        }
        ModelAction::Check { model } => {
            let (source, model) = resolve(model)?;
            println!("ok: {} ({})", model.name, source);
        }
        ModelAction::Export { path } => {
            LinearSleepModel::bundled().save(&path)?;
            println!("Bundled model written to {}", path.display());
        }
    }
    Ok(())
}

/// Load the explicit or configured artifact, or fall back to the bundled model.
fn resolve(explicit: Option<PathBuf>) -> Result<(String, LinearSleepModel)> {
    let config = Config::load_or_default();
    match explicit.or(config.model.artifact) {
        Some(path) => {
            let model = ArtifactModel::new(&path).load()?;
            Ok((path.display().to_string(), model))
        }
        None => Ok(("bundled".to_string(), LinearSleepModel::bundled())),
    }
}

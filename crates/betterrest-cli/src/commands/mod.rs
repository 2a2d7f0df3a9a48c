pub mod config;
pub mod estimate;
pub mod model;

use std::path::PathBuf;

use betterrest_core::{ArtifactModel, Config, LinearSleepModel, SleepModel};

/// The model to estimate with: an explicit artifact, the configured one, or
/// the bundled model.
pub fn select_model(explicit: Option<PathBuf>, config: &Config) -> Box<dyn SleepModel> {
    match explicit.or_else(|| config.model.artifact.clone()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using model artifact");
            Box::new(ArtifactModel::new(path))
        }
        None => Box::new(LinearSleepModel::bundled()),
    }
}

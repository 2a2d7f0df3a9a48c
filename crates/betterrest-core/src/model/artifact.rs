use std::path::{Path, PathBuf};

use super::{LinearSleepModel, SleepFeatures, SleepModel};
use crate::error::ModelError;

/// A model that is read from its artifact file on every prediction.
///
/// Loading is part of inference: a missing or corrupt artifact surfaces as a
/// [`ModelError`] from `predict`, the same way a failed evaluation does.
#[derive(Debug, Clone)]
pub struct ArtifactModel {
    path: PathBuf,
}

impl ArtifactModel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the artifact without predicting anything.
    pub fn load(&self) -> Result<LinearSleepModel, ModelError> {
        LinearSleepModel::load(&self.path)
    }
}

impl SleepModel for ArtifactModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        let model = self.load()?;
        tracing::debug!(path = %self.path.display(), model = %model.name, "loaded sleep model");
        model.predict(features)
    }
}

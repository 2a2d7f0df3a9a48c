//! Sleep model boundary.
//!
//! The estimator only knows the [`SleepModel`] capability: three numeric
//! features in, one predicted sleep duration (seconds) out. Backends are a
//! fitted linear regression ([`LinearSleepModel`]), a model read from an
//! artifact file on every call ([`ArtifactModel`]), or any closure wrapped
//! with [`from_fn`].

mod artifact;
mod linear;

pub use artifact::ArtifactModel;
pub use linear::{Coefficients, FeatureContract, LinearSleepModel, TimeUnit};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Model input features, in the order and units the model is fed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepFeatures {
    /// Wake time as seconds since midnight
    pub wake: f64,
    /// Desired sleep in hours
    pub estimated_sleep: f64,
    /// Daily coffee cups
    pub coffee: f64,
}

impl SleepFeatures {
    pub fn new(wake: f64, estimated_sleep: f64, coffee: f64) -> Self {
        Self {
            wake,
            estimated_sleep,
            coffee,
        }
    }
}

/// A pre-trained regression model predicting actual sleep needed.
pub trait SleepModel: Send + Sync {
    /// Predicted actual sleep, in seconds.
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError>;
}

/// Model backed by a closure. Built with [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnModel<F>(F);

/// Wrap a closure as a [`SleepModel`].
pub fn from_fn<F>(f: F) -> FnModel<F>
where
    F: Fn(&SleepFeatures) -> Result<f64, ModelError> + Send + Sync,
{
    FnModel(f)
}

impl<F> SleepModel for FnModel<F>
where
    F: Fn(&SleepFeatures) -> Result<f64, ModelError> + Send + Sync,
{
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        (self.0)(features)
    }
}

impl<M: SleepModel + ?Sized> SleepModel for Box<M> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        (**self).predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_model_predicts() {
        let stub = from_fn(|f| Ok(f.estimated_sleep * 3600.0));
        let features = SleepFeatures::new(28_800.0, 7.5, 2.0);
        assert_eq!(stub.predict(&features).unwrap(), 27_000.0);
    }

    #[test]
    fn boxed_model_delegates() {
        let model: Box<dyn SleepModel> = Box::new(LinearSleepModel::bundled());
        let features = SleepFeatures::new(28_800.0, 8.0, 1.0);
        assert_eq!(
            model.predict(&features).unwrap(),
            LinearSleepModel::bundled().predict(&features).unwrap()
        );
    }
}

//! Fitted linear sleep model and its TOML artifact format.
//!
//! An artifact records the coefficients together with the units each
//! feature was trained on, so a model fitted on fractional hours can be
//! used without changing what the estimator feeds it:
//!
//! ```toml
//! name = "bundled"
//!
//! [contract]
//! wake_unit = "seconds"
//! sleep_unit = "hours"
//! output_unit = "seconds"
//!
//! [coefficients]
//! intercept = 900.0
//! wake = -0.004
//! estimated_sleep = 3600.0
//! coffee = 360.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{SleepFeatures, SleepModel};
use crate::error::ModelError;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Unit a time-valued feature or output is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Hours,
}

impl TimeUnit {
    /// Convert a value in this unit to seconds.
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value,
            TimeUnit::Hours => value * SECONDS_PER_HOUR,
        }
    }

    /// Convert seconds to this unit.
    pub fn from_seconds(self, seconds: f64) -> f64 {
        match self {
            TimeUnit::Seconds => seconds,
            TimeUnit::Hours => seconds / SECONDS_PER_HOUR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Hours => "hours",
        }
    }
}

/// Units the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureContract {
    #[serde(default = "default_seconds")]
    pub wake_unit: TimeUnit,
    #[serde(default = "default_hours")]
    pub sleep_unit: TimeUnit,
    #[serde(default = "default_seconds")]
    pub output_unit: TimeUnit,
}

fn default_seconds() -> TimeUnit {
    TimeUnit::Seconds
}
fn default_hours() -> TimeUnit {
    TimeUnit::Hours
}

impl Default for FeatureContract {
    fn default() -> Self {
        Self {
            wake_unit: default_seconds(),
            sleep_unit: default_hours(),
            output_unit: default_seconds(),
        }
    }
}

/// Regression weights, applied in the contract's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub intercept: f64,
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

impl Coefficients {
    fn validate(&self) -> Result<(), ModelError> {
        let named = [
            ("intercept", self.intercept),
            ("wake", self.wake),
            ("estimated_sleep", self.estimated_sleep),
            ("coffee", self.coffee),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteCoefficient(name));
            }
        }
        Ok(())
    }
}

/// Linear regression over (wake, estimated_sleep, coffee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSleepModel {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub contract: FeatureContract,
    pub coefficients: Coefficients,
}

fn default_name() -> String {
    "unnamed".into()
}

impl LinearSleepModel {
    pub fn new(contract: FeatureContract, coefficients: Coefficients) -> Result<Self, ModelError> {
        coefficients.validate()?;
        Ok(Self {
            name: default_name(),
            contract,
            coefficients,
        })
    }

    /// The built-in model: about 15 minutes to fall asleep, 6 extra minutes
    /// per cup of coffee, slightly less slack for late risers.
    pub fn bundled() -> Self {
        Self {
            name: "bundled".into(),
            contract: FeatureContract::default(),
            coefficients: Coefficients {
                intercept: 900.0,
                wake: -0.004,
                estimated_sleep: 3600.0,
                coffee: 360.0,
            },
        }
    }

    /// Parse an artifact from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ModelError> {
        let model: LinearSleepModel = toml::from_str(content)?;
        model.coefficients.validate()?;
        Ok(model)
    }

    /// Load an artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ModelError::ArtifactUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ModelError> {
        toml::to_string_pretty(self).map_err(|e| ModelError::ArtifactMalformed(e.to_string()))
    }

    /// Write the artifact to disk.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ModelError::ArtifactUnwritable {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SleepModel for LinearSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        let c = &self.coefficients;
        let wake = self.contract.wake_unit.from_seconds(features.wake);
        let sleep = self
            .contract
            .sleep_unit
            .from_seconds(features.estimated_sleep * SECONDS_PER_HOUR);

        let raw = c.intercept
            + c.wake * wake
            + c.estimated_sleep * sleep
            + c.coffee * features.coffee;
        Ok(self.contract.output_unit.to_seconds(raw))
    }
}

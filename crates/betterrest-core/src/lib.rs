//! # BetterRest Core Library
//!
//! This library provides the core logic of the BetterRest bedtime calculator.
//! Given a wake-up time, a desired amount of sleep and a daily coffee intake,
//! a pre-trained regression model predicts how much sleep is actually needed;
//! the ideal bedtime is the wake-up time minus that prediction.
//!
//! ## Architecture
//!
//! - **Model**: the [`SleepModel`] capability and its backends (a fitted
//!   linear regression, an artifact loaded from disk, closures for stubs)
//! - **Estimator**: [`BedtimeEstimator`], which always yields a time and
//!   shows the current time when the model is unavailable
//! - **Form**: [`SleepForm`], the input ranges and defaults of the screen
//! - **Storage**: TOML-based preferences
//!
//! ## Key Components
//!
//! - [`BedtimeEstimator`]: Wake time minus predicted sleep
//! - [`LinearSleepModel`]: Bundled model and artifact format
//! - [`Config`]: Application configuration management

pub mod error;
pub mod estimator;
pub mod form;
pub mod model;
pub mod storage;

pub use error::{ConfigError, CoreError, ModelError};
pub use estimator::{BedtimeEstimator, Estimate, EstimateSource, SleepRequest};
pub use form::SleepForm;
pub use model::{from_fn, ArtifactModel, LinearSleepModel, SleepFeatures, SleepModel};
pub use storage::Config;

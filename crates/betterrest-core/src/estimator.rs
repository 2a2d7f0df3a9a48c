//! Bedtime estimation.
//!
//! The bedtime is the wake-up moment minus the sleep duration predicted by a
//! [`SleepModel`]. [`BedtimeEstimator::estimate`] never fails: when the model
//! cannot be loaded or its prediction is unusable, the current local time is
//! returned instead. Always showing a time is the intended behavior for the
//! end user; callers that need the failure use [`BedtimeEstimator::try_estimate`].

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{SleepFeatures, SleepModel};

/// The three inputs of an estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepRequest {
    /// Wake-up moment; only its hour and minute are fed to the model
    pub wake_up: NaiveDateTime,
    /// Desired sleep in hours
    pub sleep_hours: f64,
    /// Daily coffee cups
    pub coffee_cups: u32,
}

impl SleepRequest {
    pub fn new(wake_up: NaiveDateTime, sleep_hours: f64, coffee_cups: u32) -> Self {
        Self {
            wake_up,
            sleep_hours,
            coffee_cups,
        }
    }

    /// Wake time as whole minutes since midnight, in seconds.
    pub fn wake_seconds(&self) -> u32 {
        self.wake_up.hour() * 3600 + self.wake_up.minute() * 60
    }

    pub fn features(&self) -> SleepFeatures {
        SleepFeatures::new(
            f64::from(self.wake_seconds()),
            self.sleep_hours,
            f64::from(self.coffee_cups),
        )
    }
}

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    Model,
    Fallback,
}

/// An estimate together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub bedtime: NaiveDateTime,
    pub source: EstimateSource,
    /// Predicted sleep in seconds, when the model produced one
    pub predicted_sleep_secs: Option<f64>,
}

/// Turns sleep requests into bedtimes using a sleep model.
#[derive(Debug, Clone)]
pub struct BedtimeEstimator<M> {
    model: M,
}

impl<M: SleepModel> BedtimeEstimator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Predicted sleep duration in seconds, validated.
    pub fn predict_sleep(&self, request: &SleepRequest) -> Result<f64, ModelError> {
        let features = request.features();
        let secs = self.model.predict(&features)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(ModelError::InvalidPrediction(secs));
        }
        tracing::debug!(
            wake = features.wake,
            estimated_sleep = features.estimated_sleep,
            coffee = features.coffee,
            predicted_secs = secs,
            "sleep model prediction"
        );
        Ok(secs)
    }

    /// Bedtime for `request`, or the model failure.
    pub fn try_estimate(&self, request: &SleepRequest) -> Result<NaiveDateTime, ModelError> {
        let secs = self.predict_sleep(request)?;
        bedtime_from(request.wake_up, secs)
    }

    /// Bedtime for `request`; the current local time if the model fails.
    pub fn estimate(&self, request: &SleepRequest) -> NaiveDateTime {
        self.estimate_or_else(request, || Local::now().naive_local())
    }

    /// Bedtime for `request`; `fallback()` if the model fails.
    ///
    /// `fallback` is only called on failure, at the moment of failure.
    pub fn estimate_or_else<F>(&self, request: &SleepRequest, fallback: F) -> NaiveDateTime
    where
        F: FnOnce() -> NaiveDateTime,
    {
        match self.try_estimate(request) {
            Ok(bedtime) => bedtime,
            Err(e) => {
                tracing::warn!(error = %e, "bedtime estimation failed, showing current time");
                fallback()
            }
        }
    }

    /// Like [`estimate`](Self::estimate), but reports whether the model or the
    /// fallback produced the value.
    pub fn estimate_detailed(&self, request: &SleepRequest) -> Estimate {
        let attempt = self
            .predict_sleep(request)
            .and_then(|secs| bedtime_from(request.wake_up, secs).map(|bedtime| (bedtime, secs)));

        match attempt {
            Ok((bedtime, secs)) => Estimate {
                bedtime,
                source: EstimateSource::Model,
                predicted_sleep_secs: Some(secs),
            },
            Err(e) => {
                tracing::warn!(error = %e, "bedtime estimation failed, showing current time");
                Estimate {
                    bedtime: Local::now().naive_local(),
                    source: EstimateSource::Fallback,
                    predicted_sleep_secs: None,
                }
            }
        }
    }
}

fn bedtime_from(wake_up: NaiveDateTime, secs: f64) -> Result<NaiveDateTime, ModelError> {
    let millis = (secs * 1000.0).round();
    Duration::try_milliseconds(millis as i64)
        .and_then(|sleep| wake_up.checked_sub_signed(sleep))
        .ok_or(ModelError::InvalidPrediction(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{from_fn, LinearSleepModel};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn wake_seconds_drops_seconds() {
        let wake = NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(7, 45, 59)
            .unwrap();
        let request = SleepRequest::new(wake, 8.0, 1);
        assert_eq!(request.wake_seconds(), 7 * 3600 + 45 * 60);
    }

    #[test]
    fn features_are_in_model_order() {
        let request = SleepRequest::new(at(8, 0), 7.5, 3);
        assert_eq!(request.features(), SleepFeatures::new(28_800.0, 7.5, 3.0));
    }

    #[test]
    fn stub_model_subtracts_requested_hours() {
        let estimator = BedtimeEstimator::new(from_fn(|f| Ok(f.estimated_sleep * 3600.0)));
        let request = SleepRequest::new(at(8, 0), 8.0, 0);
        assert_eq!(estimator.try_estimate(&request).unwrap(), at(0, 0));

        let request = SleepRequest::new(at(6, 30), 9.5, 4);
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();
        assert_eq!(estimator.estimate(&request), expected);
    }

    #[test]
    fn bundled_model_puts_bedtime_before_wake() {
        let estimator = BedtimeEstimator::new(LinearSleepModel::bundled());
        let request = SleepRequest::new(at(8, 0), 8.0, 0);
        let bedtime = estimator.try_estimate(&request).unwrap();
        assert!(bedtime < at(8, 0));
        assert!(at(8, 0) - bedtime < Duration::hours(24));
    }

    #[test]
    fn failing_model_falls_back() {
        let estimator =
            BedtimeEstimator::new(from_fn(|_| Err(ModelError::Inference("offline".into()))));
        let request = SleepRequest::new(at(8, 0), 8.0, 1);
        assert_eq!(estimator.estimate_or_else(&request, || at(13, 37)), at(13, 37));
    }

    #[test]
    fn fallback_not_called_on_success() {
        let estimator = BedtimeEstimator::new(from_fn(|_| Ok(3600.0)));
        let request = SleepRequest::new(at(8, 0), 8.0, 1);
        let bedtime = estimator.estimate_or_else(&request, || panic!("fallback called"));
        assert_eq!(bedtime, at(7, 0));
    }

    #[test]
    fn negative_and_nan_predictions_are_rejected() {
        let request = SleepRequest::new(at(8, 0), 8.0, 1);

        let negative = BedtimeEstimator::new(from_fn(|_| Ok(-1.0)));
        assert!(matches!(
            negative.try_estimate(&request),
            Err(ModelError::InvalidPrediction(_))
        ));

        let nan = BedtimeEstimator::new(from_fn(|_| Ok(f64::NAN)));
        assert!(nan.try_estimate(&request).is_err());

        let huge = BedtimeEstimator::new(from_fn(|_| Ok(1e300)));
        assert!(huge.try_estimate(&request).is_err());
    }

    #[test]
    fn detailed_estimate_reports_source() {
        let request = SleepRequest::new(at(8, 0), 8.0, 0);

        let ok = BedtimeEstimator::new(from_fn(|f| Ok(f.estimated_sleep * 3600.0)));
        let estimate = ok.estimate_detailed(&request);
        assert_eq!(estimate.source, EstimateSource::Model);
        assert_eq!(estimate.bedtime, at(0, 0));
        assert_eq!(estimate.predicted_sleep_secs, Some(28_800.0));

        let failing = BedtimeEstimator::new(from_fn(|_| Err(ModelError::Inference("x".into()))));
        let estimate = failing.estimate_detailed(&request);
        assert_eq!(estimate.source, EstimateSource::Fallback);
        assert_eq!(estimate.predicted_sleep_secs, None);
    }
}

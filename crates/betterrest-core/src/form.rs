//! Headless sleep form.
//!
//! Holds the three current inputs and enforces their ranges the way the
//! on-screen controls do: a stepper for sleep hours, a picker for coffee
//! cups and a time picker for the wake-up time. Every read of
//! [`SleepForm::bedtime`] recomputes the estimate from the current values.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::estimator::{BedtimeEstimator, SleepRequest};
use crate::model::SleepModel;

pub const MIN_SLEEP_HOURS: f64 = 4.0;
pub const MAX_SLEEP_HOURS: f64 = 12.0;
pub const SLEEP_STEP_HOURS: f64 = 0.5;
pub const DEFAULT_SLEEP_HOURS: f64 = 8.0;

pub const MIN_COFFEE_CUPS: u32 = 1;
pub const MAX_COFFEE_CUPS: u32 = 20;
pub const DEFAULT_COFFEE_CUPS: u32 = 1;

pub const WAKE_HEADLINE: &str = "When do you want to wake up?";
pub const SLEEP_HEADLINE: &str = "Desired amount of sleep";
pub const COFFEE_HEADLINE: &str = "Daily coffee intake";
pub const BEDTIME_HEADLINE: &str = "Your ideal bedtime is...";

/// Default wake-up time, 08:00.
pub fn default_wake_time() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Clamp to the stepper range and snap to the nearest half hour.
pub fn clamp_sleep_hours(hours: f64) -> f64 {
    let snapped = (hours / SLEEP_STEP_HOURS).round() * SLEEP_STEP_HOURS;
    snapped.clamp(MIN_SLEEP_HOURS, MAX_SLEEP_HOURS)
}

pub fn clamp_coffee_cups(cups: u32) -> u32 {
    cups.clamp(MIN_COFFEE_CUPS, MAX_COFFEE_CUPS)
}

/// Current values of the sleep form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepForm {
    wake_up: NaiveDateTime,
    sleep_hours: f64,
    coffee_cups: u32,
}

impl Default for SleepForm {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl SleepForm {
    /// A form with default values, wake-up anchored on `day`.
    pub fn new(day: NaiveDate) -> Self {
        Self {
            wake_up: day.and_time(default_wake_time()),
            sleep_hours: DEFAULT_SLEEP_HOURS,
            coffee_cups: DEFAULT_COFFEE_CUPS,
        }
    }

    /// A form on `day` with the given values, clamped.
    pub fn with_values(
        day: NaiveDate,
        wake: NaiveTime,
        sleep_hours: f64,
        coffee_cups: u32,
    ) -> Self {
        let mut form = Self::new(day);
        form.set_wake_time(wake);
        form.set_sleep_hours(sleep_hours);
        form.set_coffee_cups(coffee_cups);
        form
    }

    pub fn wake_up(&self) -> NaiveDateTime {
        self.wake_up
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    pub fn coffee_cups(&self) -> u32 {
        self.coffee_cups
    }

    /// Set the wake-up time of day; the picker only has hour and minute.
    pub fn set_wake_time(&mut self, time: NaiveTime) {
        let time = time.with_second(0).unwrap_or(time).with_nanosecond(0).unwrap_or(time);
        self.wake_up = self.wake_up.date().and_time(time);
    }

    /// Set sleep hours; NaN is ignored.
    pub fn set_sleep_hours(&mut self, hours: f64) {
        if hours.is_nan() {
            return;
        }
        self.sleep_hours = clamp_sleep_hours(hours);
    }

    pub fn increment_sleep(&mut self) {
        self.set_sleep_hours(self.sleep_hours + SLEEP_STEP_HOURS);
    }

    pub fn decrement_sleep(&mut self) {
        self.set_sleep_hours(self.sleep_hours - SLEEP_STEP_HOURS);
    }

    pub fn set_coffee_cups(&mut self, cups: u32) {
        self.coffee_cups = clamp_coffee_cups(cups);
    }

    pub fn request(&self) -> SleepRequest {
        SleepRequest::new(self.wake_up, self.sleep_hours, self.coffee_cups)
    }

    /// Recompute the bedtime from the current values.
    pub fn bedtime<M: SleepModel>(&self, estimator: &BedtimeEstimator<M>) -> NaiveDateTime {
        estimator.estimate(&self.request())
    }

    /// "8 hours", "8.5 hours"
    pub fn sleep_label(&self) -> String {
        if self.sleep_hours.fract() == 0.0 {
            format!("{:.0} hours", self.sleep_hours)
        } else {
            format!("{} hours", self.sleep_hours)
        }
    }

    /// "1 cup", "3 cups"
    pub fn coffee_label(&self) -> String {
        if self.coffee_cups == 1 {
            "1 cup".to_string()
        } else {
            format!("{} cups", self.coffee_cups)
        }
    }
}

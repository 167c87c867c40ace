//! Busy-hour traffic model

use std::fmt;

use crate::error::{DimensioningError, Result};
use crate::validation::{fields, require_positive, require_ratio};

/// Seconds in the traffic measurement period
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Offered traffic intensity
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Erlangs(pub f64);

impl Erlangs {
    /// No offered load
    pub const ZERO: Erlangs = Erlangs(0.0);

    /// Raw intensity value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Erlangs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} E", self.0)
    }
}

/// Offered traffic from the subscriber population.
///
/// `concurrent_ratio` is the busy-hour fraction of subscribers placing a
/// call and `avg_duration_s / 3600` the fraction of the hour each call
/// holds a circuit, so the product is the mean number of calls in progress.
pub fn compute_traffic(subscribers: u64, concurrent_ratio: f64, avg_duration_s: f64) -> Result<Erlangs> {
    if subscribers == 0 {
        return Err(DimensioningError::invalid_input(
            fields::SUBSCRIBERS,
            "must be positive, got 0",
        ));
    }
    require_ratio(fields::CONCURRENT_RATIO, concurrent_ratio)?;
    require_positive(fields::AVG_DURATION, avg_duration_s)?;

    let traffic = offered_load(subscribers, concurrent_ratio, avg_duration_s)?;
    tracing::debug!(
        "Traffic: {} subscribers x {} x {}s = {}",
        subscribers,
        concurrent_ratio,
        avg_duration_s,
        traffic
    );
    Ok(traffic)
}

/// Traffic product for already-checked factors; rejects an overflowing product
pub(crate) fn offered_load(subscribers: u64, concurrent_ratio: f64, avg_duration_s: f64) -> Result<Erlangs> {
    let load = concurrent_calls(subscribers, concurrent_ratio) * avg_duration_s / SECONDS_PER_HOUR;
    if !load.is_finite() {
        return Err(DimensioningError::invalid_input(
            fields::AVG_DURATION,
            format!("offered traffic overflows with {} s calls", avg_duration_s),
        ));
    }
    Ok(Erlangs(load))
}

/// Busy-hour call attempts, `subscribers × concurrent_ratio`
pub fn concurrent_calls(subscribers: u64, concurrent_ratio: f64) -> f64 {
    subscribers as f64 * concurrent_ratio
}

//! Circuit sizing with the Erlang loss formula
//!
//! Blocking probability is evaluated with the recurrence
//!
//! ```text
//! B(0, A) = 1
//! B(N, A) = A·B(N−1, A) / (N + A·B(N−1, A))
//! ```
//!
//! which stays within `[0, 1]` at every step. The textbook ratio of
//! `A^N / N!` sums overflows `f64` for a few hundred circuits and is never
//! used here.

use std::num::NonZeroU32;

use crate::config::{DEFAULT_MAX_CIRCUITS, DEFAULT_TRUNK_UNIT, SizingConfig};
use crate::error::{DimensioningError, Result};
use crate::traffic::Erlangs;
use crate::validation::{fields, require_non_negative, require_open_unit};

/// One step of the recurrence, from `B(n−1, A)` to `B(n, A)`
#[inline]
fn next_blocking(n: u32, a: f64, previous: f64) -> f64 {
    let ab = a * previous;
    ab / (f64::from(n) + ab)
}

/// Erlang B blocking probability for `circuits` servers offered `traffic`.
///
/// With no offered load nothing is ever blocked, so the result is `0` for
/// every circuit count.
pub fn blocking(circuits: u32, traffic: Erlangs) -> f64 {
    let a = traffic.value();
    if a <= 0.0 {
        return 0.0;
    }
    (1..=circuits).fold(1.0, |b, n| next_blocking(n, a, b))
}

/// Minimal circuit count and the blocking it achieves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingOutcome {
    /// Smallest N with `blocking(N) <= target`
    pub required_circuits: u32,
    /// `blocking(required_circuits)`
    pub achieved_gos: f64,
}

/// Round `required` up to a whole number of trunk groups, in circuits
pub fn recommend_trunks(required: u32, unit: NonZeroU32) -> u32 {
    trunk_groups(required, unit).saturating_mul(unit.get())
}

/// Number of trunk groups needed to carry `required` circuits
pub fn trunk_groups(required: u32, unit: NonZeroU32) -> u32 {
    required.div_ceil(unit.get())
}

/// Inverts the Erlang loss formula under a circuit ceiling
#[derive(Debug, Clone)]
pub struct CircuitSizer {
    max_circuits: u32,
    trunk_unit: NonZeroU32,
}

impl CircuitSizer {
    /// Create a sizer from configuration.
    ///
    /// Fails with [`DimensioningError::InvalidConfig`] when `max_circuits`
    /// or `trunk_unit_size` is zero.
    pub fn new(config: &SizingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_circuits: config.max_circuits,
            trunk_unit: config.trunk_unit()?,
        })
    }

    /// Highest circuit count the search will try
    pub fn max_circuits(&self) -> u32 {
        self.max_circuits
    }

    /// Circuits per trunk group
    pub fn trunk_unit(&self) -> NonZeroU32 {
        self.trunk_unit
    }

    /// Find the smallest circuit count whose blocking meets `target_gos`.
    ///
    /// Walks N = 0, 1, 2, … carrying the recurrence forward, so the search
    /// costs one multiply-divide per circuit. Fails with
    /// [`DimensioningError::SizingUnreachable`] when `max_circuits` is
    /// passed first.
    pub fn size_circuits(&self, traffic: Erlangs, target_gos: f64) -> Result<SizingOutcome> {
        let a = require_non_negative(fields::TRAFFIC, traffic.value())?;
        require_open_unit(fields::TARGET_GOS, target_gos)?;

        if a == 0.0 {
            return Ok(SizingOutcome {
                required_circuits: 0,
                achieved_gos: 0.0,
            });
        }

        let mut b = 1.0;
        let mut n = 0u32;
        while b > target_gos {
            if n >= self.max_circuits {
                tracing::warn!(
                    "Target GOS {} not reached for {} within {} circuits (B = {:e})",
                    target_gos,
                    traffic,
                    self.max_circuits,
                    b
                );
                return Err(DimensioningError::SizingUnreachable {
                    traffic: a,
                    target_gos,
                    ceiling: self.max_circuits,
                });
            }
            n += 1;
            b = next_blocking(n, a, b);
        }

        tracing::debug!("Sized {} to {} circuits, B = {:e}", traffic, n, b);
        Ok(SizingOutcome {
            required_circuits: n,
            achieved_gos: b,
        })
    }

    /// Round a circuit count up to whole trunk groups
    pub fn recommend_trunks(&self, required: u32) -> u32 {
        recommend_trunks(required, self.trunk_unit)
    }
}

impl Default for CircuitSizer {
    fn default() -> Self {
        Self {
            max_circuits: DEFAULT_MAX_CIRCUITS,
            trunk_unit: DEFAULT_TRUNK_UNIT,
        }
    }
}

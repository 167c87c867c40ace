//! Voice quality estimation with a simplified E-model (ITU-T G.107)
//!
//! ```text
//! R = R0 − Id − Ie,eff
//! ```
//!
//! `Id` comes from the effective one-way delay and `Ie,eff` from the codec's
//! base impairment degraded by random packet loss. The advantage factor is
//! taken as zero. R is mapped to MOS with the G.107 Annex B cubic.

use crate::codec::CodecProfile;
use crate::config::EModelConfig;
use crate::error::Result;
use crate::validation::{fields, require_non_negative, require_probability_below_one};

/// Delay beyond which echo-free talker impairment grows faster (ms)
pub const DELAY_KNEE_MS: f64 = 177.3;
/// Impairment per ms of delay above the threshold
const DELAY_SLOPE: f64 = 0.024;
/// Additional impairment per ms of delay above the knee
const DELAY_KNEE_SLOPE: f64 = 0.11;
/// Ceiling of the loss-driven equipment impairment
const IE_CEILING: f64 = 95.0;

/// Lowest MOS value reported
pub const MOS_MIN: f64 = 1.0;
/// Highest MOS value reported
pub const MOS_MAX: f64 = 4.5;

/// Quality level categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityLevel {
    /// Bad quality (R < 60)
    Bad,
    /// Poor quality (R 60-70)
    Poor,
    /// Fair quality (R 70-80)
    Fair,
    /// Good quality (R 80-90)
    Good,
    /// Excellent quality (R >= 90)
    Excellent,
}

impl QualityLevel {
    /// Create a quality level from R-factor
    pub fn from_r_factor(r: f64) -> Self {
        if r >= 90.0 {
            Self::Excellent
        } else if r >= 80.0 {
            Self::Good
        } else if r >= 70.0 {
            Self::Fair
        } else if r >= 60.0 {
            Self::Poor
        } else {
            Self::Bad
        }
    }

    /// Get a description of the quality level
    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent quality, very satisfied",
            Self::Good => "Good quality, satisfied",
            Self::Fair => "Fair quality, some users dissatisfied",
            Self::Poor => "Poor quality, many users dissatisfied",
            Self::Bad => "Bad quality, nearly all users dissatisfied",
        }
    }

    /// Label expected by the presentation collaborator
    pub fn wire_label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellente",
            Self::Good => "Bonne",
            Self::Fair => "Acceptable",
            Self::Poor => "Médiocre",
            Self::Bad => "Mauvaise",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Bad => "Bad",
        };
        f.write_str(name)
    }
}

/// Estimated call quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QosResult {
    /// Transmission rating, within [0, 100]
    pub r_factor: f64,
    /// Mean Opinion Score, within [1.0, 4.5]
    pub mos: f64,
    /// Category from the R-factor thresholds
    pub level: QualityLevel,
}

/// Convert an R-factor to MOS.
///
/// Inputs are clamped to [0, 100] first. The cubic dips slightly below 1 for
/// R under about 6.5; clamping the output to [1.0, 4.5] keeps the mapping
/// non-decreasing over the whole range.
pub fn r_factor_to_mos(r: f64) -> f64 {
    let r = if r.is_nan() { 0.0 } else { r.clamp(0.0, 100.0) };
    let mos = 1.0 + 0.035 * r + r * (r - 60.0) * (100.0 - r) * 7.0e-6;
    mos.clamp(MOS_MIN, MOS_MAX)
}

/// Quality estimator using E-model (ITU-T G.107)
#[derive(Debug, Clone)]
pub struct QualityEstimator {
    config: EModelConfig,
}

impl QualityEstimator {
    /// Create an estimator with the given constants
    pub fn new(config: EModelConfig) -> Self {
        Self { config }
    }

    /// Estimate quality from network impairments and codec
    pub fn estimate(
        &self,
        latency_ms: f64,
        jitter_ms: f64,
        loss_ratio: f64,
        codec: &CodecProfile,
    ) -> Result<QosResult> {
        require_non_negative(fields::LATENCY, latency_ms)?;
        require_non_negative(fields::JITTER, jitter_ms)?;
        require_probability_below_one(fields::LOSS_RATIO, loss_ratio)?;

        let effective_delay = latency_ms + self.config.jitter_weight * jitter_ms;
        let id = self.delay_impairment(effective_delay);
        let ie_eff = effective_equipment_impairment(codec.ie, codec.bpl, loss_ratio);

        let r_factor = (self.config.r0 - id - ie_eff).clamp(0.0, 100.0);
        let mos = r_factor_to_mos(r_factor);
        let level = QualityLevel::from_r_factor(r_factor);

        tracing::debug!(
            "E-model for {}: delay {}ms (Id {:.2}), loss {} (Ie,eff {:.2}) -> R {:.1}, MOS {:.2}",
            codec.id,
            effective_delay,
            id,
            loss_ratio,
            ie_eff,
            r_factor,
            mos
        );

        Ok(QosResult {
            r_factor,
            mos,
            level,
        })
    }

    /// Calculate delay impairment factor.
    ///
    /// Zero up to the threshold, linear above it, and steeper again past
    /// the 177.3 ms knee. Continuous everywhere.
    pub fn delay_impairment(&self, effective_delay_ms: f64) -> f64 {
        let threshold = self.config.delay_threshold_ms;
        if effective_delay_ms <= threshold {
            return 0.0;
        }
        let over_knee = (effective_delay_ms - DELAY_KNEE_MS).max(0.0);
        DELAY_SLOPE * (effective_delay_ms - threshold) + DELAY_KNEE_SLOPE * over_knee
    }
}

impl Default for QualityEstimator {
    fn default() -> Self {
        Self::new(EModelConfig::default())
    }
}

/// Equipment impairment under random packet loss.
///
/// `bpl` is expressed in percent as in G.113, so the loss ratio is scaled
/// to a percentage before use.
pub fn effective_equipment_impairment(ie: f64, bpl: f64, loss_ratio: f64) -> f64 {
    let ppl = loss_ratio * 100.0;
    if ppl <= 0.0 {
        return ie;
    }
    ie + (IE_CEILING - ie) * ppl / (ppl + bpl)
}

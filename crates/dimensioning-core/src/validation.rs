//! Input validation utilities
//!
//! Field names reported in errors are the wire names, so a caller can map an
//! error straight back to the form field that produced it.

use crate::error::{DimensioningError, Result};

/// Wire names of validated fields
pub mod fields {
    pub const SUBSCRIBERS: &str = "nombre_abonnes";
    pub const CONCURRENT_RATIO: &str = "moyenne_appels_simultanes_pourcentage";
    pub const AVG_DURATION: &str = "duree_moyenne_appels_secondes";
    pub const CODEC: &str = "codec";
    pub const AVAILABLE_BANDWIDTH: &str = "bande_passante_disponible_mbps";
    pub const TARGET_GOS: &str = "gos_cible";
    pub const TRAFFIC: &str = "trafic_erlangs";
    pub const LATENCY: &str = "latence_ms";
    pub const JITTER: &str = "jitter_ms";
    pub const LOSS_RATIO: &str = "perte_paquets_pourcentage";
}

/// Reject NaN and infinities
pub fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(DimensioningError::invalid_input(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Ok(value)
}

/// Require `value > 0`
pub fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(DimensioningError::invalid_input(
            field,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(value)
}

/// Require `value >= 0`
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(DimensioningError::invalid_input(
            field,
            format!("cannot be negative, got {}", value),
        ));
    }
    Ok(value)
}

/// Require a strictly positive integer count
pub fn require_positive_count(field: &'static str, value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(DimensioningError::invalid_input(
            field,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(value as u64)
}

/// Require `0 < value <= 1`
pub fn require_ratio(field: &'static str, value: f64) -> Result<f64> {
    require_positive(field, value)?;
    if value > 1.0 {
        return Err(DimensioningError::invalid_input(
            field,
            format!("must not exceed 1, got {}", value),
        ));
    }
    Ok(value)
}

/// Require `0 < value < 1`
pub fn require_open_unit(field: &'static str, value: f64) -> Result<f64> {
    require_positive(field, value)?;
    if value >= 1.0 {
        return Err(DimensioningError::invalid_input(
            field,
            format!("must be below 1, got {}", value),
        ));
    }
    Ok(value)
}

/// Require `0 <= value < 1`
pub fn require_probability_below_one(field: &'static str, value: f64) -> Result<f64> {
    require_non_negative(field, value)?;
    if value >= 1.0 {
        return Err(DimensioningError::invalid_input(
            field,
            format!("must be below 1, got {}", value),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_bounds() {
        assert!(require_ratio("r", 1.0).is_ok());
        assert!(require_ratio("r", 0.15).is_ok());
        assert!(require_ratio("r", 0.0).is_err());
        assert!(require_ratio("r", 1.5).is_err());
        assert!(require_ratio("r", f64::NAN).is_err());
    }

    #[test]
    fn test_open_unit_excludes_both_ends() {
        assert!(require_open_unit("g", 0.01).is_ok());
        assert!(require_open_unit("g", 0.0).is_err());
        assert!(require_open_unit("g", 1.0).is_err());
    }

    #[test]
    fn test_probability_below_one_accepts_zero() {
        assert!(require_probability_below_one("p", 0.0).is_ok());
        assert!(require_probability_below_one("p", 0.999).is_ok());
        assert!(require_probability_below_one("p", 1.0).is_err());
        assert!(require_probability_below_one("p", -0.1).is_err());
    }

    #[test]
    fn test_count_rejects_zero_and_negative() {
        assert_eq!(require_positive_count("n", 5).unwrap(), 5);
        assert!(require_positive_count("n", 0).is_err());
        assert!(require_positive_count("n", -3).is_err());
    }

    #[test]
    fn test_error_carries_field() {
        let err = require_positive(fields::AVAILABLE_BANDWIDTH, -1.0).unwrap_err();
        assert_eq!(err.field(), Some("bande_passante_disponible_mbps"));
    }

    #[test]
    fn test_infinity_is_rejected() {
        assert!(require_non_negative("x", f64::INFINITY).is_err());
    }
}

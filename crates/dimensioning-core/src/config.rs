//! Engine configuration
//!
//! Packetization overhead, sizing limits and E-model constants are
//! conventional engineering assumptions. They live here as named defaults
//! that can be overridden from a TOML file, and are frozen once the engine
//! is built.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{DimensioningError, Result};

/// Packetization interval used for every codec profile (ms)
pub const DEFAULT_PACKET_INTERVAL_MS: f64 = 20.0;
/// IPv4 header without options (bytes)
pub const IPV4_HEADER_BYTES: u32 = 20;
/// UDP header (bytes)
pub const UDP_HEADER_BYTES: u32 = 8;
/// RTP fixed header without CSRCs (bytes)
pub const RTP_HEADER_BYTES: u32 = 12;
/// IP + UDP + RTP overhead carried by every voice packet (bytes)
pub const DEFAULT_HEADER_BYTES: u32 = IPV4_HEADER_BYTES + UDP_HEADER_BYTES + RTP_HEADER_BYTES;

/// Upper bound on the circuit search
pub const DEFAULT_MAX_CIRCUITS: u32 = 100_000;
/// Voice channels per E1 trunk group
pub const DEFAULT_TRUNK_UNIT_SIZE: u32 = 30;
/// `DEFAULT_TRUNK_UNIT_SIZE` as a non-zero count
pub const DEFAULT_TRUNK_UNIT: NonZeroU32 = match NonZeroU32::new(DEFAULT_TRUNK_UNIT_SIZE) {
    Some(unit) => unit,
    None => panic!("DEFAULT_TRUNK_UNIT_SIZE must be non-zero"),
};

/// E-model transmission rating with no impairment and no advantage factor
pub const DEFAULT_R0: f64 = 93.2;
/// One-way delay below which no delay impairment applies (ms)
pub const DEFAULT_DELAY_THRESHOLD_MS: f64 = 160.0;
/// Weight of jitter when folding it into the effective delay
pub const DEFAULT_JITTER_WEIGHT: f64 = 2.0;

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Voice packet framing used to derive per-call bandwidth
    pub packetization: PacketizationConfig,
    /// Circuit search limits and trunk rounding
    pub sizing: SizingConfig,
    /// Transmission rating constants
    pub emodel: EModelConfig,
}

/// Voice packet framing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketizationConfig {
    /// Audio carried per packet (ms)
    pub packet_interval_ms: f64,
    /// Protocol overhead per packet (bytes)
    pub header_bytes: u32,
}

impl Default for PacketizationConfig {
    fn default() -> Self {
        Self {
            packet_interval_ms: DEFAULT_PACKET_INTERVAL_MS,
            header_bytes: DEFAULT_HEADER_BYTES,
        }
    }
}

/// Circuit sizing limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Highest circuit count tried before giving up
    pub max_circuits: u32,
    /// Circuits per trunk group
    pub trunk_unit_size: u32,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            max_circuits: DEFAULT_MAX_CIRCUITS,
            trunk_unit_size: DEFAULT_TRUNK_UNIT_SIZE,
        }
    }
}

impl SizingConfig {
    /// Trunk unit as a non-zero count
    pub fn trunk_unit(&self) -> Result<NonZeroU32> {
        NonZeroU32::new(self.trunk_unit_size).ok_or_else(|| {
            DimensioningError::invalid_config("trunk_unit_size must be at least 1")
        })
    }

    /// Reject an empty search range or an empty trunk group
    pub fn validate(&self) -> Result<()> {
        if self.max_circuits == 0 {
            return Err(DimensioningError::invalid_config(
                "max_circuits must be at least 1",
            ));
        }
        self.trunk_unit()?;
        Ok(())
    }
}

/// E-model constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EModelConfig {
    /// Basic signal-to-noise rating
    pub r0: f64,
    /// Delay impairment onset (ms)
    pub delay_threshold_ms: f64,
    /// Multiplier applied to jitter in the effective delay
    pub jitter_weight: f64,
}

impl Default for EModelConfig {
    fn default() -> Self {
        Self {
            r0: DEFAULT_R0,
            delay_threshold_ms: DEFAULT_DELAY_THRESHOLD_MS,
            jitter_weight: DEFAULT_JITTER_WEIGHT,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML; missing sections take defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| DimensioningError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        let p = &self.packetization;
        if !p.packet_interval_ms.is_finite() || p.packet_interval_ms <= 0.0 {
            return Err(DimensioningError::invalid_config(format!(
                "packet_interval_ms must be positive, got {}",
                p.packet_interval_ms
            )));
        }

        self.sizing.validate()?;

        let e = &self.emodel;
        if !e.r0.is_finite() || !(0.0..=100.0).contains(&e.r0) {
            return Err(DimensioningError::invalid_config(format!(
                "r0 must lie in [0, 100], got {}",
                e.r0
            )));
        }
        if !e.delay_threshold_ms.is_finite() || e.delay_threshold_ms < 0.0 {
            return Err(DimensioningError::invalid_config(format!(
                "delay_threshold_ms must be non-negative, got {}",
                e.delay_threshold_ms
            )));
        }
        if !e.jitter_weight.is_finite() || e.jitter_weight < 0.0 {
            return Err(DimensioningError::invalid_config(format!(
                "jitter_weight must be non-negative, got {}",
                e.jitter_weight
            )));
        }

        Ok(())
    }
}

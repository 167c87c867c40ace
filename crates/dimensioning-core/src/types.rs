//! Request and result values
//!
//! Requests can only be built through validating constructors, so a request
//! that exists is a request the engine can evaluate. Results are plain
//! values computed once per call.

use crate::codec::CodecId;
use crate::error::{DimensioningError, Result};
use crate::traffic::{Erlangs, offered_load};
use crate::validation::{
    fields, require_non_negative, require_open_unit, require_positive, require_probability_below_one,
    require_ratio,
};

/// Validated sizing request
#[derive(Debug, Clone, PartialEq)]
pub struct DimensioningRequest {
    subscribers: u64,
    concurrent_ratio: f64,
    avg_call_duration_s: f64,
    codec: CodecId,
    available_bandwidth_mbps: f64,
    target_gos: f64,
}

impl DimensioningRequest {
    /// Validate every field and build the request
    pub fn new(
        subscribers: u64,
        concurrent_ratio: f64,
        avg_call_duration_s: f64,
        codec: CodecId,
        available_bandwidth_mbps: f64,
        target_gos: f64,
    ) -> Result<Self> {
        if subscribers == 0 {
            return Err(DimensioningError::invalid_input(
                fields::SUBSCRIBERS,
                "must be positive, got 0",
            ));
        }
        require_ratio(fields::CONCURRENT_RATIO, concurrent_ratio)?;
        require_positive(fields::AVG_DURATION, avg_call_duration_s)?;
        require_positive(fields::AVAILABLE_BANDWIDTH, available_bandwidth_mbps)?;
        require_open_unit(fields::TARGET_GOS, target_gos)?;
        offered_load(subscribers, concurrent_ratio, avg_call_duration_s)?;

        Ok(Self {
            subscribers,
            concurrent_ratio,
            avg_call_duration_s,
            codec,
            available_bandwidth_mbps,
            target_gos,
        })
    }

    pub fn subscribers(&self) -> u64 {
        self.subscribers
    }

    pub fn concurrent_ratio(&self) -> f64 {
        self.concurrent_ratio
    }

    pub fn avg_call_duration_s(&self) -> f64 {
        self.avg_call_duration_s
    }

    pub fn codec(&self) -> CodecId {
        self.codec
    }

    pub fn available_bandwidth_mbps(&self) -> f64 {
        self.available_bandwidth_mbps
    }

    pub fn target_gos(&self) -> f64 {
        self.target_gos
    }
}

/// Intermediate figures behind a sizing result
#[derive(Debug, Clone, PartialEq)]
pub struct DimensioningBreakdown {
    /// Busy-hour call attempts, `subscribers × concurrent_ratio`
    pub concurrent_calls: f64,
    /// Codec voice payload bitrate (kbps)
    pub codec_bitrate_kbps: f64,
    /// Codec bandwidth per call with headers (kbps)
    pub per_call_bandwidth_kbps: f64,
    /// Available link capacity from the request (Mbps)
    pub available_bandwidth_mbps: f64,
    /// Available minus consumed bandwidth; negative when oversubscribed (Mbps)
    pub headroom_mbps: f64,
    /// Whole trunk groups behind `recommended_trunks`
    pub trunk_groups: u32,
}

/// Complete sizing result
#[derive(Debug, Clone, PartialEq)]
pub struct DimensioningResult {
    /// Offered load
    pub traffic: Erlangs,
    /// Minimal circuit count meeting the target GOS
    pub required_circuits: u32,
    /// `required_circuits` rounded up to whole trunk groups
    pub recommended_trunks: u32,
    /// Blocking probability at `required_circuits`
    pub achieved_gos: f64,
    /// Bandwidth of `required_circuits` simultaneous calls (Mbps)
    pub consumed_bandwidth_mbps: f64,
    /// `consumed_bandwidth_mbps <= available_bandwidth_mbps`
    pub capacity_sufficient: bool,
    /// Supporting figures
    pub details: DimensioningBreakdown,
}

/// Validated quality request
#[derive(Debug, Clone, PartialEq)]
pub struct QosRequest {
    latency_ms: f64,
    jitter_ms: f64,
    loss_ratio: f64,
    codec: CodecId,
}

impl QosRequest {
    /// Validate every field and build the request
    pub fn new(latency_ms: f64, jitter_ms: f64, loss_ratio: f64, codec: CodecId) -> Result<Self> {
        require_non_negative(fields::LATENCY, latency_ms)?;
        require_non_negative(fields::JITTER, jitter_ms)?;
        require_probability_below_one(fields::LOSS_RATIO, loss_ratio)?;

        Ok(Self {
            latency_ms,
            jitter_ms,
            loss_ratio,
            codec,
        })
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    pub fn jitter_ms(&self) -> f64 {
        self.jitter_ms
    }

    pub fn loss_ratio(&self) -> f64 {
        self.loss_ratio
    }

    pub fn codec(&self) -> CodecId {
        self.codec
    }
}

/// One catalog entry as listed to callers
#[derive(Debug, Clone, PartialEq)]
pub struct CodecListing {
    /// Codec identity
    pub codec: CodecId,
    /// Voice payload bitrate (kbps)
    pub bitrate_kbps: f64,
    /// Bandwidth per call with headers (kbps)
    pub per_call_bandwidth_kbps: f64,
    /// Summary such as `G.711 - 64 kbps`
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req = DimensioningRequest::new(10_000, 0.15, 180.0, CodecId::G711, 100.0, 0.01).unwrap();
        assert_eq!(req.subscribers(), 10_000);
        assert_eq!(req.codec(), CodecId::G711);
    }

    #[test]
    fn test_each_field_is_checked() {
        let cases = [
            (DimensioningRequest::new(0, 0.15, 180.0, CodecId::G711, 100.0, 0.01), fields::SUBSCRIBERS),
            (DimensioningRequest::new(10, 1.5, 180.0, CodecId::G711, 100.0, 0.01), fields::CONCURRENT_RATIO),
            (DimensioningRequest::new(10, 0.1, 0.0, CodecId::G711, 100.0, 0.01), fields::AVG_DURATION),
            (DimensioningRequest::new(10, 0.1, 180.0, CodecId::G711, 0.0, 0.01), fields::AVAILABLE_BANDWIDTH),
            (DimensioningRequest::new(10, 0.1, 180.0, CodecId::G711, 100.0, 1.0), fields::TARGET_GOS),
        ];
        for (result, field) in cases {
            match result {
                Err(DimensioningError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidInput for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_overflowing_traffic_is_rejected_up_front() {
        // Every factor is finite but the product is not
        let err = DimensioningRequest::new(10_000, 1.0, 1e306, CodecId::G711, 100.0, 0.01).unwrap_err();
        assert_eq!(err.field(), Some(fields::AVG_DURATION));
        assert!(err.is_input_error());

        assert!(DimensioningRequest::new(10_000, 1.0, 1e300, CodecId::G711, 100.0, 0.01).is_ok());
    }

    #[test]
    fn test_qos_request_bounds() {
        assert!(QosRequest::new(0.0, 0.0, 0.0, CodecId::Opus).is_ok());
        assert!(QosRequest::new(100.0, 20.0, 0.999, CodecId::Opus).is_ok());
        assert!(QosRequest::new(100.0, 20.0, 1.0, CodecId::Opus).is_err());
        assert!(QosRequest::new(f64::NAN, 20.0, 0.0, CodecId::Opus).is_err());
    }
}

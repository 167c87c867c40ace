//! Dimensioning service
//!
//! The only entry point used by the HTTP service and the CLI. A sizing
//! request runs traffic model → circuit sizer → bandwidth estimator; a
//! quality request goes straight to the E-model estimator. The service is
//! cheap to clone and holds nothing mutable, so one instance can serve any
//! number of threads.

use std::sync::Arc;

use crate::bandwidth;
use crate::codec::{CodecCatalog, CodecProfile};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::quality::{QosResult, QualityEstimator};
use crate::sizing::{CircuitSizer, trunk_groups};
use crate::traffic::{compute_traffic, concurrent_calls};
use crate::types::{
    CodecListing, DimensioningBreakdown, DimensioningRequest, DimensioningResult, QosRequest,
};

/// Sizing and quality engine
#[derive(Debug, Clone)]
pub struct DimensioningService {
    catalog: Arc<CodecCatalog>,
    sizer: CircuitSizer,
    estimator: QualityEstimator,
}

impl DimensioningService {
    /// Build the engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog: Arc::new(CodecCatalog::new(&config.packetization)),
            sizer: CircuitSizer::new(&config.sizing)?,
            estimator: QualityEstimator::new(config.emodel),
        })
    }

    /// Circuit sizer in use
    pub fn sizer(&self) -> &CircuitSizer {
        &self.sizer
    }

    /// Size circuits and bandwidth for a subscriber population
    pub fn dimension(&self, request: &DimensioningRequest) -> Result<DimensioningResult> {
        let codec = self.catalog.lookup(request.codec());

        let traffic = compute_traffic(
            request.subscribers(),
            request.concurrent_ratio(),
            request.avg_call_duration_s(),
        )?;
        let sizing = self.sizer.size_circuits(traffic, request.target_gos())?;
        let required = sizing.required_circuits;
        let estimate = bandwidth::estimate(required, codec, request.available_bandwidth_mbps());

        tracing::info!(
            "Dimensioned {} subscribers on {}: {} -> {} circuits, {:.2} Mbps (sufficient: {})",
            request.subscribers(),
            codec.id,
            traffic,
            required,
            estimate.consumed_mbps,
            estimate.capacity_sufficient
        );

        Ok(DimensioningResult {
            traffic,
            required_circuits: required,
            recommended_trunks: self.sizer.recommend_trunks(required),
            achieved_gos: sizing.achieved_gos,
            consumed_bandwidth_mbps: estimate.consumed_mbps,
            capacity_sufficient: estimate.capacity_sufficient,
            details: DimensioningBreakdown {
                concurrent_calls: concurrent_calls(
                    request.subscribers(),
                    request.concurrent_ratio(),
                ),
                codec_bitrate_kbps: codec.bitrate_kbps,
                per_call_bandwidth_kbps: codec.per_call_bandwidth_kbps,
                available_bandwidth_mbps: estimate.available_mbps,
                headroom_mbps: estimate.headroom_mbps(),
                trunk_groups: trunk_groups(required, self.sizer.trunk_unit()),
            },
        })
    }

    /// Estimate perceived call quality
    pub fn estimate_quality(&self, request: &QosRequest) -> Result<QosResult> {
        let codec = self.catalog.lookup(request.codec());
        self.estimator.estimate(
            request.latency_ms(),
            request.jitter_ms(),
            request.loss_ratio(),
            codec,
        )
    }

    /// List every codec with its bandwidth footprint
    pub fn codecs(&self) -> Vec<CodecListing> {
        self.catalog.profiles().map(listing).collect()
    }
}

impl Default for DimensioningService {
    fn default() -> Self {
        Self {
            catalog: Arc::new(CodecCatalog::default()),
            sizer: CircuitSizer::default(),
            estimator: QualityEstimator::default(),
        }
    }
}

fn listing(profile: &CodecProfile) -> CodecListing {
    CodecListing {
        codec: profile.id,
        bitrate_kbps: profile.bitrate_kbps,
        per_call_bandwidth_kbps: profile.per_call_bandwidth_kbps,
        description: profile.description(),
    }
}

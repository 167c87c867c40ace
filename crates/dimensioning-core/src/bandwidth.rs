//! Bandwidth consumed by the provisioned circuits

use crate::codec::CodecProfile;

/// Kilobits per megabit
const KBPS_PER_MBPS: f64 = 1000.0;

/// Consumed bandwidth and capacity verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthEstimate {
    /// Bandwidth used by all circuits at full occupancy (Mbps)
    pub consumed_mbps: f64,
    /// Link capacity the estimate was checked against (Mbps)
    pub available_mbps: f64,
    /// `consumed_mbps <= available_mbps`
    pub capacity_sufficient: bool,
}

impl BandwidthEstimate {
    /// Spare capacity; negative when the link is oversubscribed
    pub fn headroom_mbps(&self) -> f64 {
        self.available_mbps - self.consumed_mbps
    }
}

/// Bandwidth needed to carry `circuits` simultaneous calls of `codec`.
///
/// The comparison is exact: a link that matches the demand to the last bit
/// is sufficient, one that falls short by any amount is not.
pub fn estimate(circuits: u32, codec: &CodecProfile, available_mbps: f64) -> BandwidthEstimate {
    let consumed_mbps = f64::from(circuits) * codec.per_call_bandwidth_kbps / KBPS_PER_MBPS;
    let capacity_sufficient = consumed_mbps <= available_mbps;

    tracing::debug!(
        "{} circuits of {} consume {:.3} Mbps of {} Mbps available",
        circuits,
        codec.id,
        consumed_mbps,
        available_mbps
    );

    BandwidthEstimate {
        consumed_mbps,
        available_mbps,
        capacity_sufficient,
    }
}

//! Voice codec catalog
//!
//! The set of codecs is closed: every [`CodecId`] has exactly one
//! [`CodecProfile`] in a [`CodecCatalog`], so lookups by id cannot fail.
//! Only parsing an identifier from text can produce
//! [`DimensioningError::CodecNotFound`].

use std::fmt;
use std::str::FromStr;

use crate::config::PacketizationConfig;
use crate::error::{DimensioningError, Result};

/// G.711 base equipment impairment
pub const G711_IE: f64 = 0.0;
/// G.711 packet-loss robustness with packet loss concealment (%)
pub const G711_BPL: f64 = 25.1;
/// G.729(A) base equipment impairment
pub const G729_IE: f64 = 11.0;
/// G.729(A) packet-loss robustness (%)
pub const G729_BPL: f64 = 19.0;
/// G.722 base equipment impairment on the narrowband scale
pub const G722_IE: f64 = 0.0;
/// G.722 packet-loss robustness with packet loss concealment (%)
pub const G722_BPL: f64 = 25.1;
/// Opus at 32 kbps base equipment impairment
pub const OPUS_IE: f64 = 5.0;
/// Opus packet-loss robustness (%)
pub const OPUS_BPL: f64 = 20.0;

/// Known voice codecs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodecId {
    /// G.711 narrowband PCM, 64 kbps
    G711,
    /// G.729 CS-ACELP, 8 kbps
    G729,
    /// G.722 wideband SB-ADPCM, 64 kbps
    G722,
    /// Opus, profiled at 32 kbps
    Opus,
}

impl CodecId {
    /// Every codec, in catalog order
    pub const ALL: [CodecId; 4] = [Self::G711, Self::G729, Self::G722, Self::Opus];

    /// Canonical name used on the wire
    pub fn name(self) -> &'static str {
        match self {
            Self::G711 => "G.711",
            Self::G729 => "G.729",
            Self::G722 => "G.722",
            Self::Opus => "Opus",
        }
    }

    /// Voice payload bitrate (kbps)
    pub fn bitrate_kbps(self) -> f64 {
        match self {
            Self::G711 | Self::G722 => 64.0,
            Self::G729 => 8.0,
            Self::Opus => 32.0,
        }
    }

    /// E-model `(Ie, Bpl)` pair
    pub fn emodel_constants(self) -> (f64, f64) {
        match self {
            Self::G711 => (G711_IE, G711_BPL),
            Self::G729 => (G729_IE, G729_BPL),
            Self::G722 => (G722_IE, G722_BPL),
            Self::Opus => (OPUS_IE, OPUS_BPL),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::G711 => 0,
            Self::G729 => 1,
            Self::G722 => 2,
            Self::Opus => 3,
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CodecId {
    type Err = DimensioningError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "G.711" | "G711" | "PCMU" | "PCMA" => Ok(Self::G711),
            "G.729" | "G729" | "G.729A" | "G729A" => Ok(Self::G729),
            "G.722" | "G722" => Ok(Self::G722),
            "OPUS" => Ok(Self::Opus),
            _ => Err(DimensioningError::codec_not_found(s)),
        }
    }
}

/// Bandwidth and impairment figures for one codec
#[derive(Debug, Clone, PartialEq)]
pub struct CodecProfile {
    /// Codec identity
    pub id: CodecId,
    /// Voice payload bitrate (kbps)
    pub bitrate_kbps: f64,
    /// Payload carried by each packet (bytes)
    pub payload_bytes: f64,
    /// On-the-wire bandwidth per call including headers (kbps)
    pub per_call_bandwidth_kbps: f64,
    /// Base equipment impairment factor
    pub ie: f64,
    /// Packet-loss robustness factor (percent units)
    pub bpl: f64,
}

impl CodecProfile {
    /// Build the profile for `id` under the given packet framing
    pub fn new(id: CodecId, packetization: &PacketizationConfig) -> Self {
        let interval_ms = packetization.packet_interval_ms;
        let bitrate_kbps = id.bitrate_kbps();
        // kbit/s × ms = bits
        let payload_bytes = bitrate_kbps * interval_ms / 8.0;
        let packet_bits = (payload_bytes + f64::from(packetization.header_bytes)) * 8.0;
        let per_call_bandwidth_kbps = packet_bits / interval_ms;
        let (ie, bpl) = id.emodel_constants();

        Self {
            id,
            bitrate_kbps,
            payload_bytes,
            per_call_bandwidth_kbps,
            ie,
            bpl,
        }
    }

    /// Human-readable summary, e.g. `G.711 - 64 kbps`
    pub fn description(&self) -> String {
        format!("{} - {} kbps", self.id, self.bitrate_kbps)
    }
}

/// Immutable lookup of every known codec
#[derive(Debug, Clone)]
pub struct CodecCatalog {
    profiles: [CodecProfile; 4],
}

impl CodecCatalog {
    /// Build the catalog under the given packet framing
    pub fn new(packetization: &PacketizationConfig) -> Self {
        let profiles = CodecId::ALL.map(|id| CodecProfile::new(id, packetization));
        tracing::debug!(
            "Codec catalog built: {}",
            profiles
                .iter()
                .map(|p| format!("{}={}kbps", p.id, p.per_call_bandwidth_kbps))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Self { profiles }
    }

    /// Profile for a known codec
    pub fn lookup(&self, id: CodecId) -> &CodecProfile {
        &self.profiles[id.index()]
    }

    /// Profile for a codec given by name
    pub fn lookup_name(&self, name: &str) -> Result<&CodecProfile> {
        let id: CodecId = name.parse()?;
        Ok(self.lookup(id))
    }

    /// All profiles, in [`CodecId::ALL`] order
    pub fn profiles(&self) -> impl Iterator<Item = &CodecProfile> {
        self.profiles.iter()
    }
}

impl Default for CodecCatalog {
    fn default() -> Self {
        Self::new(&PacketizationConfig::default())
    }
}

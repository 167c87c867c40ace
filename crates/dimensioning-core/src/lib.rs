//! # NGN Dimensioning Core
//!
//! Capacity planning for voice-over-IP trunks: from a subscriber population
//! and a target grade of service to a circuit count, a trunk recommendation
//! and a bandwidth bill, plus E-model call quality scoring.
//!
//! ## Features
//!
//! - **Traffic model**: busy-hour offered load in Erlangs
//! - **Circuit sizing**: Erlang B through its stable recurrence, with
//!   rounding to whole trunk groups (E1 by default)
//! - **Bandwidth**: per-call IP/UDP/RTP footprint for G.711, G.729, G.722
//!   and Opus
//! - **Quality**: simplified ITU-T G.107 E-model, R-factor to MOS
//!
//! ## Usage
//!
//! ```rust
//! use ngn_dimensioning_core::{CodecId, DimensioningRequest, DimensioningService};
//!
//! let service = DimensioningService::default();
//! let request = DimensioningRequest::new(10_000, 0.15, 180.0, CodecId::G711, 100.0, 0.01)?;
//! let result = service.dimension(&request)?;
//!
//! assert_eq!(result.required_circuits, 91);
//! assert_eq!(result.recommended_trunks, 120);
//! assert!(result.capacity_sufficient);
//! # Ok::<(), ngn_dimensioning_core::DimensioningError>(())
//! ```
//!
//! Every computation is a pure function of its inputs and the
//! [`EngineConfig`] the service was built with.

pub mod bandwidth;
pub mod codec;
pub mod config;
pub mod error;
pub mod quality;
pub mod service;
pub mod sizing;
pub mod traffic;
pub mod types;
pub mod validation;
pub mod wire;

// Re-export commonly used types
pub use bandwidth::BandwidthEstimate;
pub use codec::{CodecCatalog, CodecId, CodecProfile};
pub use config::EngineConfig;
pub use error::{DimensioningError, Result};
pub use quality::{QosResult, QualityEstimator, QualityLevel, r_factor_to_mos};
pub use service::DimensioningService;
pub use sizing::{CircuitSizer, SizingOutcome, blocking};
pub use traffic::{Erlangs, compute_traffic};
pub use types::{
    CodecListing, DimensioningBreakdown, DimensioningRequest, DimensioningResult, QosRequest,
};

/// Version information for the dimensioning library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

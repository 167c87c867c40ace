//! JSON wire contract
//!
//! Field names follow the form used by the web front end and are kept
//! verbatim. Numbers are rounded here and only here; every decision (such as
//! the capacity verdict) has already been made on unrounded values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codec::CodecId;
use crate::error::DimensioningError;
use crate::quality::{QosResult, QualityLevel};
use crate::types::{CodecListing, DimensioningRequest, DimensioningResult, QosRequest};
use crate::validation::{fields, require_positive_count};

/// Round to a fixed number of decimals for display
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sizing request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensioningRequestDto {
    #[serde(rename = "nombre_abonnes")]
    pub subscribers: i64,
    #[serde(rename = "moyenne_appels_simultanes_pourcentage")]
    pub concurrent_ratio: f64,
    #[serde(rename = "duree_moyenne_appels_secondes")]
    pub avg_call_duration_s: f64,
    pub codec: String,
    #[serde(rename = "bande_passante_disponible_mbps")]
    pub available_bandwidth_mbps: f64,
    #[serde(rename = "gos_cible")]
    pub target_gos: f64,
}

impl TryFrom<&DimensioningRequestDto> for DimensioningRequest {
    type Error = DimensioningError;

    fn try_from(dto: &DimensioningRequestDto) -> Result<Self, Self::Error> {
        let codec: CodecId = dto.codec.parse()?;
        let subscribers = require_positive_count(fields::SUBSCRIBERS, dto.subscribers)?;
        DimensioningRequest::new(
            subscribers,
            dto.concurrent_ratio,
            dto.avg_call_duration_s,
            codec,
            dto.available_bandwidth_mbps,
            dto.target_gos,
        )
    }
}

/// Codec figures inside a sizing response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecInfoDto {
    #[serde(rename = "debit_vocal_kbps")]
    pub bitrate_kbps: f64,
    #[serde(rename = "bande_passante_par_appel_kbps")]
    pub per_call_bandwidth_kbps: f64,
}

/// Supporting figures of a sizing response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetailsDto {
    pub codec_info: CodecInfoDto,
    #[serde(rename = "nombre_appels_simultanes")]
    pub concurrent_calls: f64,
    #[serde(rename = "bande_passante_disponible_mbps")]
    pub available_bandwidth_mbps: f64,
}

/// Sizing response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensioningResponseDto {
    #[serde(rename = "trafic_erlangs")]
    pub traffic_erlangs: f64,
    #[serde(rename = "nombre_circuits_necessaires")]
    pub required_circuits: u32,
    #[serde(rename = "nombre_trunks_a_prevoir")]
    pub recommended_trunks: u32,
    #[serde(rename = "gos_estime")]
    pub achieved_gos: f64,
    #[serde(rename = "bande_passante_consommee_mbps")]
    pub consumed_bandwidth_mbps: f64,
    #[serde(rename = "capacite_suffisante")]
    pub capacity_sufficient: bool,
    #[serde(rename = "details_calculs")]
    pub details: CalculationDetailsDto,
}

impl From<&DimensioningResult> for DimensioningResponseDto {
    fn from(result: &DimensioningResult) -> Self {
        Self {
            traffic_erlangs: round_to(result.traffic.value(), 2),
            required_circuits: result.required_circuits,
            recommended_trunks: result.recommended_trunks,
            achieved_gos: round_to(result.achieved_gos, 6),
            consumed_bandwidth_mbps: round_to(result.consumed_bandwidth_mbps, 2),
            capacity_sufficient: result.capacity_sufficient,
            details: CalculationDetailsDto {
                codec_info: CodecInfoDto {
                    bitrate_kbps: result.details.codec_bitrate_kbps,
                    per_call_bandwidth_kbps: round_to(result.details.per_call_bandwidth_kbps, 2),
                },
                concurrent_calls: round_to(result.details.concurrent_calls, 0),
                available_bandwidth_mbps: result.details.available_bandwidth_mbps,
            },
        }
    }
}

/// Quality request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QosRequestDto {
    #[serde(rename = "latence_ms")]
    pub latency_ms: f64,
    pub jitter_ms: f64,
    /// Loss as a ratio in [0, 1), whatever the field name says
    #[serde(rename = "perte_paquets_pourcentage")]
    pub loss_ratio: f64,
    pub codec: String,
}

impl TryFrom<&QosRequestDto> for QosRequest {
    type Error = DimensioningError;

    fn try_from(dto: &QosRequestDto) -> Result<Self, Self::Error> {
        let codec: CodecId = dto.codec.parse()?;
        QosRequest::new(dto.latency_ms, dto.jitter_ms, dto.loss_ratio, codec)
    }
}

/// Quality response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QosResponseDto {
    #[serde(rename = "mos_estime")]
    pub mos: f64,
    pub r_factor: f64,
    #[serde(rename = "qualite_vocale")]
    pub quality: String,
}

/// R-factor at one decimal and the level that value falls in.
///
/// The level is read off the rounded R so a reader never sees `90.0`
/// next to anything but the top category.
pub fn reported_quality(result: &QosResult) -> (f64, QualityLevel) {
    let r_factor = round_to(result.r_factor, 1);
    (r_factor, QualityLevel::from_r_factor(r_factor))
}

impl From<&QosResult> for QosResponseDto {
    fn from(result: &QosResult) -> Self {
        let (r_factor, level) = reported_quality(result);
        Self {
            mos: round_to(result.mos, 2),
            r_factor,
            quality: level.wire_label().to_string(),
        }
    }
}

/// One entry of the codec listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecEntryDto {
    #[serde(rename = "debit_vocal_kbps")]
    pub bitrate_kbps: f64,
    #[serde(rename = "bande_passante_totale_kbps")]
    pub total_bandwidth_kbps: f64,
    pub description: String,
}

/// Codec listing keyed by wire name
pub type CodecCatalogDto = BTreeMap<String, CodecEntryDto>;

/// Build the listing body from catalog entries
pub fn codec_catalog_dto(listings: &[CodecListing]) -> CodecCatalogDto {
    listings
        .iter()
        .map(|listing| {
            (
                listing.codec.name().to_string(),
                CodecEntryDto {
                    bitrate_kbps: listing.bitrate_kbps,
                    total_bandwidth_kbps: round_to(listing.per_call_bandwidth_kbps, 2),
                    description: listing.description.clone(),
                },
            )
        })
        .collect()
}

/// Error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::service::DimensioningService;
    use serde_json::json;

    fn scenario_a_dto() -> DimensioningRequestDto {
        serde_json::from_value(json!({
            "nombre_abonnes": 10000,
            "moyenne_appels_simultanes_pourcentage": 0.15,
            "duree_moyenne_appels_secondes": 180,
            "codec": "G.711",
            "bande_passante_disponible_mbps": 100,
            "gos_cible": 0.01
        }))
        .unwrap()
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(7.2849, 2), 7.28);
        assert_eq!(round_to(0.00873812, 6), 0.008738);
        assert_eq!(round_to(1499.6, 0), 1500.0);
    }

    #[test]
    fn test_request_field_names() {
        let dto = scenario_a_dto();
        assert_eq!(dto.subscribers, 10_000);
        assert_eq!(dto.avg_call_duration_s, 180.0);
        assert_eq!(dto.codec, "G.711");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result: Result<DimensioningRequestDto, _> = serde_json::from_value(json!({
            "nombre_abonnes": 10000,
            "codec": "G.711"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_codec_checked_before_numbers() {
        let mut dto = scenario_a_dto();
        dto.codec = "iLBC".to_string();
        dto.subscribers = -5;
        let err = DimensioningRequest::try_from(&dto).unwrap_err();
        assert_eq!(err, DimensioningError::codec_not_found("iLBC"));
    }

    #[test]
    fn test_negative_subscribers_rejected() {
        let mut dto = scenario_a_dto();
        dto.subscribers = -5;
        let err = DimensioningRequest::try_from(&dto).unwrap_err();
        assert_eq!(err.field(), Some(fields::SUBSCRIBERS));
    }

    #[test]
    fn test_response_wire_shape() {
        let service = DimensioningService::default();
        let request = DimensioningRequest::try_from(&scenario_a_dto()).unwrap();
        let result = service.dimension(&request).unwrap();
        let value = serde_json::to_value(DimensioningResponseDto::from(&result)).unwrap();

        assert_eq!(value["trafic_erlangs"], json!(75.0));
        assert_eq!(value["nombre_circuits_necessaires"], json!(91));
        assert_eq!(value["nombre_trunks_a_prevoir"], json!(120));
        assert_eq!(value["bande_passante_consommee_mbps"], json!(7.28));
        assert_eq!(value["capacite_suffisante"], json!(true));
        assert!(value["gos_estime"].as_f64().unwrap() <= 0.01);

        let details = &value["details_calculs"];
        assert_eq!(details["codec_info"]["debit_vocal_kbps"], json!(64.0));
        assert_eq!(details["codec_info"]["bande_passante_par_appel_kbps"], json!(80.0));
        assert_eq!(details["nombre_appels_simultanes"], json!(1500.0));
        assert_eq!(details["bande_passante_disponible_mbps"], json!(100.0));
    }

    #[test]
    fn test_qos_wire_shape() {
        let dto: QosRequestDto = serde_json::from_value(json!({
            "latence_ms": 100,
            "jitter_ms": 20,
            "perte_paquets_pourcentage": 0.01,
            "codec": "G.711"
        }))
        .unwrap();
        let request = QosRequest::try_from(&dto).unwrap();
        let result = DimensioningService::default().estimate_quality(&request).unwrap();
        let value = serde_json::to_value(QosResponseDto::from(&result)).unwrap();

        assert_eq!(value["qualite_vocale"], json!("Bonne"));
        assert_eq!(value["r_factor"], json!(89.6));
        assert_eq!(value["mos_estime"], json!(4.33));
    }

    #[test]
    fn test_label_follows_reported_r_factor() {
        // Raw R lands at 89.9998, just under the top threshold
        let request = QosRequest::new(0.0, 0.0, 0.00875, CodecId::G711).unwrap();
        let result = DimensioningService::default().estimate_quality(&request).unwrap();
        assert!(result.r_factor < 90.0);

        let dto = QosResponseDto::from(&result);
        assert_eq!(dto.r_factor, 90.0);
        assert_eq!(dto.quality, "Excellente");
        assert_eq!(
            dto.quality,
            QualityLevel::from_r_factor(dto.r_factor).wire_label()
        );
    }

    #[test]
    fn test_bandwidth_rounded_to_two_decimals() {
        let mut config = EngineConfig::default();
        config.packetization.packet_interval_ms = 30.0;
        let service = DimensioningService::new(config).unwrap();

        let listing = codec_catalog_dto(&service.codecs());
        assert_eq!(listing["G.711"].total_bandwidth_kbps, 74.67);

        let request = DimensioningRequest::try_from(&scenario_a_dto()).unwrap();
        let result = service.dimension(&request).unwrap();
        let value = serde_json::to_value(DimensioningResponseDto::from(&result)).unwrap();
        assert_eq!(
            value["details_calculs"]["codec_info"]["bande_passante_par_appel_kbps"],
            json!(74.67)
        );
    }

    #[test]
    fn test_overflowing_duration_rejected_before_sizing() {
        let mut dto = scenario_a_dto();
        dto.concurrent_ratio = 1.0;
        dto.avg_call_duration_s = 1e306;
        let err = DimensioningRequest::try_from(&dto).unwrap_err();
        assert_eq!(err.field(), Some(fields::AVG_DURATION));
    }

    #[test]
    fn test_codec_listing_shape() {
        let listing = codec_catalog_dto(&DimensioningService::default().codecs());
        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(listing.len(), 4);
        assert_eq!(value["G.729"]["debit_vocal_kbps"], json!(8.0));
        assert_eq!(value["G.729"]["bande_passante_totale_kbps"], json!(24.0));
        assert_eq!(value["Opus"]["description"], json!("Opus - 32 kbps"));
    }

    #[test]
    fn test_error_body() {
        let value = serde_json::to_value(ErrorBody::new("Codec not found: iLBC")).unwrap();
        assert_eq!(value, json!({ "error": "Codec not found: iLBC" }));
    }
}

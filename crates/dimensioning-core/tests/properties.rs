//! Property tests for the sizing and quality models

use ngn_dimensioning_core::{
    CircuitSizer, CodecId, CodecProfile, DimensioningRequest, DimensioningService, Erlangs,
    QosRequest, QualityLevel, bandwidth, blocking, r_factor_to_mos,
};
use ngn_dimensioning_core::config::PacketizationConfig;
use proptest::prelude::*;

fn codec() -> impl Strategy<Value = CodecId> {
    prop::sample::select(CodecId::ALL.to_vec())
}

proptest! {
    #[test]
    fn blocking_decreases_with_circuits(a in 0.5f64..500.0, n in 0u32..200) {
        let here = blocking(n, Erlangs(a));
        let next = blocking(n + 1, Erlangs(a));
        // Past underflow both ends are zero and nothing can be compared
        prop_assume!(next > f64::MIN_POSITIVE);
        prop_assert!(next < here);
    }

    #[test]
    fn blocking_increases_with_traffic(n in 1u32..300, a in 0.1f64..400.0, delta in 0.01f64..50.0) {
        let low = blocking(n, Erlangs(a));
        prop_assume!(low > f64::MIN_POSITIVE);
        prop_assert!(blocking(n, Erlangs(a + delta)) > low);
    }

    #[test]
    fn sized_circuit_count_is_minimal(a in 0.0f64..400.0, gos in 0.0001f64..0.5) {
        let outcome = CircuitSizer::default().size_circuits(Erlangs(a), gos).unwrap();
        let n = outcome.required_circuits;
        prop_assert!(outcome.achieved_gos <= gos);
        if n > 0 {
            prop_assert!(blocking(n - 1, Erlangs(a)) > gos);
        }
    }

    #[test]
    fn mos_is_monotone_and_bounded(r in -50.0f64..150.0, step in 0.0f64..20.0) {
        let low = r_factor_to_mos(r);
        let high = r_factor_to_mos(r + step);
        prop_assert!((1.0..=4.5).contains(&low));
        prop_assert!(high >= low);
    }

    #[test]
    fn quality_stays_in_range(
        latency in 0.0f64..1000.0,
        jitter in 0.0f64..300.0,
        loss in 0.0f64..0.999,
        id in codec(),
    ) {
        let service = DimensioningService::default();
        let result = service
            .estimate_quality(&QosRequest::new(latency, jitter, loss, id).unwrap())
            .unwrap();
        prop_assert!((0.0..=100.0).contains(&result.r_factor));
        prop_assert!((1.0..=4.5).contains(&result.mos));
        prop_assert_eq!(result.level, QualityLevel::from_r_factor(result.r_factor));
    }

    #[test]
    fn capacity_flag_matches_comparison(
        circuits in 0u32..5000,
        available in 0.001f64..1000.0,
        id in codec(),
    ) {
        let profile = CodecProfile::new(id, &PacketizationConfig::default());
        let estimate = bandwidth::estimate(circuits, &profile, available);
        prop_assert_eq!(
            estimate.capacity_sufficient,
            estimate.consumed_mbps <= estimate.available_mbps
        );
    }

    #[test]
    fn dimensioning_is_deterministic(
        subscribers in 1u64..50_000,
        ratio in 0.01f64..1.0,
        duration in 1.0f64..900.0,
        available in 0.1f64..1000.0,
        gos in 0.001f64..0.2,
        id in codec(),
    ) {
        let service = DimensioningService::default();
        let request =
            DimensioningRequest::new(subscribers, ratio, duration, id, available, gos).unwrap();
        let first = service.dimension(&request).unwrap();
        let second = service.dimension(&request).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.capacity_sufficient,
            first.consumed_bandwidth_mbps <= available
        );
        prop_assert!(first.recommended_trunks >= first.required_circuits);
    }
}

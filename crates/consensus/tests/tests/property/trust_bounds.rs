//! Property tests: trust scores never leave [0, 1].

use maple_consensus_trust::{OutcomeKind, TrustConfig, TrustRegistry};
use maple_consensus_types::AgentId;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_outcome() -> impl Strategy<Value = OutcomeKind> {
    prop_oneof![Just(OutcomeKind::Success), Just(OutcomeKind::Failure)]
}

/// Magnitudes including the hostile ones: negative, huge, NaN, infinite.
fn arb_magnitude() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0f64..2.0,
        -10.0f64..0.0,
        100.0f64..1e9,
        Just(f64::NAN),
        Just(f64::INFINITY),
    ]
}

fn arb_config() -> impl Strategy<Value = TrustConfig> {
    (0.0f64..=1.0, 0.01f64..=1.0, 0.0f64..=0.5).prop_map(|(baseline, learning_rate, decay_step)| {
        TrustConfig {
            baseline,
            learning_rate,
            decay_step,
            ..TrustConfig::default()
        }
    })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Any sequence of outcomes keeps the score inside [0, 1].
    #[test]
    fn score_stays_in_unit_interval(
        config in arb_config(),
        steps in prop::collection::vec((arb_outcome(), arb_magnitude()), 1..60),
    ) {
        let registry = TrustRegistry::new(config).unwrap();
        let agent = AgentId::new("agent");
        for (kind, magnitude) in steps {
            let update = registry.record_outcome(&agent, kind, magnitude);
            prop_assert!((0.0..=1.0).contains(&update.after), "after = {}", update.after);
            prop_assert!((0.0..=1.0).contains(&registry.get_trust(&agent).value()));
        }
    }

    /// Success never lowers trust and failure never raises it.
    #[test]
    fn outcomes_move_in_the_right_direction(
        kind in arb_outcome(),
        magnitude in arb_magnitude(),
        warmup in prop::collection::vec(arb_outcome(), 0..10),
    ) {
        let registry = TrustRegistry::default();
        let agent = AgentId::new("agent");
        for k in warmup {
            registry.record_outcome(&agent, k, 1.0);
        }
        let update = registry.record_outcome(&agent, kind, magnitude);
        match kind {
            OutcomeKind::Success => prop_assert!(update.after >= update.before),
            OutcomeKind::Failure => prop_assert!(update.after <= update.before),
        }
    }

    /// Decay pulls idle agents toward the baseline without overshooting.
    #[test]
    fn decay_never_overshoots_baseline(
        config in arb_config(),
        steps in prop::collection::vec(arb_outcome(), 1..20),
        passes in 1usize..40,
    ) {
        let baseline = config.baseline;
        let registry = TrustRegistry::new(config).unwrap();
        let agent = AgentId::new("agent");
        for kind in steps {
            registry.record_outcome(&agent, kind, 1.0);
        }
        // First pass only clears the touched flag.
        registry.decay_idle();
        let start = registry.get_trust(&agent).value();
        let above = start >= baseline;

        for _ in 0..passes {
            let before = (registry.get_trust(&agent).value() - baseline).abs();
            registry.decay_idle();
            let score = registry.get_trust(&agent).value();
            let after = (score - baseline).abs();
            prop_assert!(after <= before + 1e-12);
            if above {
                prop_assert!(score >= baseline - 1e-12);
            } else {
                prop_assert!(score <= baseline + 1e-12);
            }
        }
    }
}

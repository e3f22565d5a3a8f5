//! Transition validator consistency with the retarget dispatcher.
//!
//! Whatever the dispatcher produces at a boundary must sit inside the
//! validator's envelope, and every off-boundary block must carry its
//! parent's target forward unchanged.

use sable_consensus::{
    is_permitted_transition, next_required_bits, ChainParams, HeaderInfo, Network,
};

const BITS: u32 = 0x1c0f_ffff;
const START_TIME: u64 = 1_600_000_000;

fn legacy_params() -> ChainParams {
    ChainParams {
        fork_height: u64::MAX,
        fork2_height: u64::MAX,
        ..Network::Mainnet.params()
    }
}

fn steady_chain(len: u64, spacing: u64, bits: u32) -> Vec<HeaderInfo> {
    (0..len)
        .map(|height| HeaderInfo {
            height,
            time: START_TIME + height * spacing,
            bits,
        })
        .collect()
}

#[test]
fn boundary_outputs_always_pass_the_validator() {
    let params = legacy_params();
    // Sweep block rates from far below to far above the clamp window; the
    // dispatcher's boundary output must always be a permitted transition.
    for spacing in [30u64, 150, 300, 600, 1200, 2400, 60_000] {
        let chain = steady_chain(4032, spacing, BITS);
        let tip = chain[4031];
        let bits = next_required_bits(&chain, tip, tip.time + spacing, &params).unwrap();
        assert!(
            is_permitted_transition(&params, 4032, BITS, bits),
            "spacing {spacing} produced a transition outside the envelope"
        );
    }
}

#[test]
fn off_boundary_outputs_are_identity_transitions() {
    let params = legacy_params();
    let chain = steady_chain(4031, 600, BITS);
    let tip = chain[4030];
    let bits = next_required_bits(&chain, tip, tip.time + 600, &params).unwrap();
    assert_eq!(bits, BITS);
    assert!(is_permitted_transition(&params, 4031, BITS, bits));
    assert!(!is_permitted_transition(&params, 4031, BITS, BITS - 1));
}

#[test]
fn sequentially_built_chain_validates_end_to_end() {
    let params = legacy_params();
    // Grow a chain by always mining at the required target, at a block
    // rate 25% faster than intended, across two retarget boundaries.
    let spacing = 450u64;
    let mut chain = vec![HeaderInfo {
        height: 0,
        time: START_TIME,
        bits: BITS,
    }];
    for height in 1..=4200u64 {
        let tip = chain[(height - 1) as usize];
        let time = tip.time + spacing;
        let bits = next_required_bits(&chain, tip, time, &params).unwrap();
        chain.push(HeaderInfo { height, time, bits });
    }

    // The target moved at both boundaries...
    assert_ne!(chain[2016].bits, chain[2015].bits);
    assert_ne!(chain[4032].bits, chain[4031].bits);
    // ...and every link in the chain satisfies the transition rules.
    for pair in chain.windows(2) {
        assert!(
            is_permitted_transition(&params, pair[1].height, pair[0].bits, pair[1].bits),
            "transition at height {} rejected",
            pair[1].height
        );
    }
}

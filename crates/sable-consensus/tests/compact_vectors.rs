//! Compact-bits codec vectors shared across implementations.

use num_bigint::BigUint;
use num_traits::Num;
use sable_consensus::{decode_compact, encode_compact};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct CompactVector {
    name: String,
    bits: String,
    /// Lowercase hex without leading zeros; absent when the decode overflows.
    target_hex: Option<String>,
    negative: bool,
    overflow: bool,
    reencoded: Option<String>,
}

fn vectors_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("vectors")
        .join("compact_bits.json")
}

fn parse_bits(s: &str) -> u32 {
    u32::from_str_radix(s.trim_start_matches("0x"), 16).expect("hex u32")
}

#[test]
fn compact_bits_vectors() {
    let data = fs::read_to_string(vectors_path()).expect("vector file");
    let vectors: Vec<CompactVector> = serde_json::from_str(&data).expect("parse json");

    for v in vectors {
        let decoded = decode_compact(parse_bits(&v.bits));
        assert_eq!(decoded.negative, v.negative, "negative flag for {}", v.name);
        assert_eq!(decoded.overflow, v.overflow, "overflow flag for {}", v.name);

        if let Some(hex) = &v.target_hex {
            let expected = BigUint::from_str_radix(hex, 16).expect("target hex");
            assert_eq!(decoded.target, expected, "target mismatch for {}", v.name);
        }

        if let Some(reencoded) = &v.reencoded {
            assert_eq!(
                encode_compact(&decoded.target),
                parse_bits(reencoded),
                "re-encoding mismatch for {}",
                v.name
            );
        }
    }
}

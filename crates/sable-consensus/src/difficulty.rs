// Consensus-critical. Changes require spec update + tests.
//! Compact difficulty target encoding.
//!
//! Block headers carry the 256-bit target as a 32-bit "compact" value:
//! `bits = (exponent << 24) | mantissa` with a 3-byte mantissa, interpreted
//! as `target = mantissa * 256^(exponent - 3)`. Bit 23 of the mantissa is a
//! sign bit inherited from the original encoding.
//!
//! The format is a lossy floating point: many targets share one compact
//! form, and encoding truncates low bits (floor). Consensus code must
//! therefore re-decode an encoded value before comparing magnitudes —
//! comparing raw bit patterns, or an un-rounded integer against a decoded
//! one, rejects valid blocks.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Result of decoding a compact target.
///
/// Decoding never fails; malformed encodings surface as flags so callers
/// can reject the block rather than abort.
#[derive(Clone, Debug)]
pub struct DecodedTarget {
    /// The decoded magnitude. Meaningful only when `overflow` is false.
    pub target: BigUint,
    /// Sign bit was set on a nonzero mantissa.
    pub negative: bool,
    /// The magnitude would not fit in 256 bits.
    pub overflow: bool,
}

/// Decode a compact `bits` value into an exact target.
pub fn decode_compact(bits: u32) -> DecodedTarget {
    let exponent = (bits >> 24) as u32;
    let mantissa = bits & 0x007f_ffff;

    let target = if exponent <= 3 {
        BigUint::from(mantissa >> (8 * (3 - exponent)))
    } else {
        BigUint::from(mantissa) << (8 * (exponent - 3))
    };

    let negative = mantissa != 0 && (bits & 0x0080_0000) != 0;
    let overflow = mantissa != 0
        && (exponent > 34
            || (mantissa > 0xff && exponent > 33)
            || (mantissa > 0xffff && exponent > 32));

    DecodedTarget {
        target,
        negative,
        overflow,
    }
}

/// Encode a target into its compact form.
///
/// Picks the minimal byte-aligned exponent whose 3-byte mantissa holds the
/// top of the value, truncating lower bits. If the mantissa's high bit
/// would collide with the sign bit, the mantissa is shifted down one byte
/// and the exponent bumped. The zero target encodes as `0`.
pub fn encode_compact(target: &BigUint) -> u32 {
    let mut size = (target.bits() + 7) / 8;

    let mut compact = if size <= 3 {
        let low = target.to_u32().unwrap_or(0);
        low << (8 * (3 - size as u32))
    } else {
        let shifted = target >> (8 * (size - 3));
        shifted.to_u32().unwrap_or(0)
    };

    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }

    (compact & 0x007f_ffff) | ((size as u32) << 24)
}

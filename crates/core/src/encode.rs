//! Byte and hex codecs for scalar-field elements and session ids.
//!
//! All on-chain blobs are 32-byte big-endian field elements; session ids
//! are u32 values embedded in the low four bytes. Parsing is strict: a
//! 32-byte value at or above the modulus is not a field element and is
//! rejected rather than reduced.

use ark_bn254::Fr;
use ark_ff::{BigInt, BigInteger, PrimeField};

use crate::CoreError;

/// Canonical 32-byte big-endian encoding.
pub fn fr_to_be32(f: &Fr) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&f.into_bigint().to_bytes_be());
    out
}

/// Strict inverse of [`fr_to_be32`].
pub fn fr_from_be32(bytes: &[u8; 32]) -> Result<Fr, CoreError> {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let mut v = 0u64;
        for j in 0..8 {
            v = (v << 8) | bytes[(3 - i) * 8 + j] as u64;
        }
        *limb = v;
    }
    Fr::from_bigint(BigInt::new(limbs)).ok_or(CoreError::NonCanonicalFieldElement)
}

/// `0x`-prefixed lowercase hex of the canonical encoding.
pub fn fr_to_hex(f: &Fr) -> String {
    format!("0x{}", hex::encode(fr_to_be32(f)))
}

/// Parses hex with or without a `0x` prefix, left-padding short strings.
pub fn fr_from_hex(s: &str) -> Result<Fr, CoreError> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if digits.is_empty() || digits.len() > 64 {
        return Err(CoreError::InvalidHex(s.to_string()));
    }
    let mut padded = String::with_capacity(64);
    for _ in digits.len()..64 {
        padded.push('0');
    }
    padded.push_str(digits);

    let raw = hex::decode(&padded).map_err(|_| CoreError::InvalidHex(s.to_string()))?;
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&raw);
    fr_from_be32(&bytes)
}

/// Session ids enter the field (and the circuit) as plain small integers.
pub fn session_id_to_fr(session_id: u32) -> Fr {
    Fr::from(session_id)
}

/// The 32-byte big-endian form the contract compares public inputs against.
pub fn session_id_be32(session_id: u32) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[28..32].copy_from_slice(&session_id.to_be_bytes());
    out
}

/// Low 128 bits of a field element, the circuit comparator's view of a
/// deck weight.
pub fn low_128(f: &Fr) -> u128 {
    let limbs = f.into_bigint().0;
    (limbs[0] as u128) | ((limbs[1] as u128) << 64)
}

/// The remaining high bits, `(w - low_128(w)) / 2^128`, always below 2^126.
pub fn high_bits(f: &Fr) -> Fr {
    let limbs = f.into_bigint().0;
    Fr::from_bigint(BigInt::new([limbs[2], limbs[3], 0, 0]))
        .expect("a 126-bit value is canonical")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::Field;
    use ark_std::UniformRand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn be32_round_trip() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..32 {
            let f = Fr::rand(&mut rng);
            assert_eq!(fr_from_be32(&fr_to_be32(&f)).unwrap(), f);
        }
    }

    #[test]
    fn be32_rejects_modulus() {
        let modulus_bytes: [u8; 32] = [
            0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81,
            0x58, 0x5d, 0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93,
            0xf0, 0x00, 0x00, 0x01,
        ];
        assert_eq!(
            fr_from_be32(&modulus_bytes),
            Err(CoreError::NonCanonicalFieldElement)
        );
    }

    #[test]
    fn hex_round_trip_and_padding() {
        let f = Fr::from(0xdeadbeefu64);
        assert_eq!(fr_from_hex(&fr_to_hex(&f)).unwrap(), f);
        assert_eq!(fr_from_hex("0xdeadbeef").unwrap(), f);
        assert_eq!(fr_from_hex("deadbeef").unwrap(), f);
        assert!(fr_from_hex("").is_err());
        assert!(fr_from_hex("zz").is_err());
    }

    #[test]
    fn weight_split_recombines() {
        let mut rng = StdRng::seed_from_u64(32);
        let shift = Fr::from(2u64).pow([128]);
        for _ in 0..32 {
            let w = Fr::rand(&mut rng);
            let recombined = Fr::from(low_128(&w)) + high_bits(&w) * shift;
            assert_eq!(recombined, w);
        }
    }

    #[test]
    fn session_id_layout() {
        let bytes = session_id_be32(0x01020304);
        assert_eq!(&bytes[..28], &[0u8; 28]);
        assert_eq!(&bytes[28..], &[1, 2, 3, 4]);
        assert_eq!(fr_from_be32(&bytes).unwrap(), session_id_to_fr(0x01020304));
    }
}

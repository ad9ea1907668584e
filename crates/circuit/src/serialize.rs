//! Wire encodings for the on-chain verifier, plus JSON artifacts.
//!
//! G1 points are 64 bytes `be(x) || be(y)`. G2 points are 128 bytes
//! `be(x.c1) || be(x.c0) || be(y.c1) || be(y.c0)`: the limb order is
//! swapped relative to standard snarkjs output to match the verifier's
//! BN254 G2 encoding, and a missed swap fails every pairing — keep the
//! pinning test next to any change here. All-zero coordinates stand for
//! the point at infinity. Public inputs travel as six 32-byte big-endian
//! blobs in the alphabetical field order
//! `seed1, seed2, seed_commit1, seed_commit2, session_id, winner`.

use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{BigInt, BigInteger, PrimeField};
use ark_groth16::{Proof, VerifyingKey};
use serde::{Deserialize, Serialize};

use blackspot_core::encode::{fr_from_be32, fr_to_be32, session_id_be32};

use crate::witness::PublicValues;
use crate::CircuitError;

fn fq_to_be32(f: &Fq) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&f.into_bigint().to_bytes_be());
    out
}

fn fq_from_be32(bytes: &[u8; 32]) -> Result<Fq, CircuitError> {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let mut v = 0u64;
        for j in 0..8 {
            v = (v << 8) | bytes[(3 - i) * 8 + j] as u64;
        }
        *limb = v;
    }
    Fq::from_bigint(BigInt::new(limbs)).ok_or(CircuitError::InvalidPoint)
}

/// 64-byte G1 encoding; infinity is all zeroes.
pub fn encode_g1(p: &G1Affine) -> [u8; 64] {
    let mut out = [0u8; 64];
    if p.is_zero() {
        return out;
    }
    out[..32].copy_from_slice(&fq_to_be32(&p.x));
    out[32..].copy_from_slice(&fq_to_be32(&p.y));
    out
}

pub fn decode_g1(bytes: &[u8; 64]) -> Result<G1Affine, CircuitError> {
    if bytes == &[0u8; 64] {
        return Ok(G1Affine::zero());
    }
    let mut xb = [0u8; 32];
    let mut yb = [0u8; 32];
    xb.copy_from_slice(&bytes[..32]);
    yb.copy_from_slice(&bytes[32..]);
    let p = G1Affine::new_unchecked(fq_from_be32(&xb)?, fq_from_be32(&yb)?);
    if !p.is_on_curve() || !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CircuitError::InvalidPoint);
    }
    Ok(p)
}

/// 128-byte G2 encoding with the `(c1, c0)` limb swap.
pub fn encode_g2(p: &G2Affine) -> [u8; 128] {
    let mut out = [0u8; 128];
    if p.is_zero() {
        return out;
    }
    out[..32].copy_from_slice(&fq_to_be32(&p.x.c1));
    out[32..64].copy_from_slice(&fq_to_be32(&p.x.c0));
    out[64..96].copy_from_slice(&fq_to_be32(&p.y.c1));
    out[96..].copy_from_slice(&fq_to_be32(&p.y.c0));
    out
}

pub fn decode_g2(bytes: &[u8; 128]) -> Result<G2Affine, CircuitError> {
    if bytes == &[0u8; 128] {
        return Ok(G2Affine::zero());
    }
    let mut chunk = [[0u8; 32]; 4];
    for (i, c) in chunk.iter_mut().enumerate() {
        c.copy_from_slice(&bytes[i * 32..(i + 1) * 32]);
    }
    let x = Fq2::new(fq_from_be32(&chunk[1])?, fq_from_be32(&chunk[0])?);
    let y = Fq2::new(fq_from_be32(&chunk[3])?, fq_from_be32(&chunk[2])?);
    let p = G2Affine::new_unchecked(x, y);
    if !p.is_on_curve() || !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CircuitError::InvalidPoint);
    }
    Ok(p)
}

/// A proof in the verifier's byte layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireProof {
    pub pi_a: [u8; 64],
    pub pi_b: [u8; 128],
    pub pi_c: [u8; 64],
}

impl WireProof {
    pub fn encode(proof: &Proof<Bn254>) -> WireProof {
        WireProof {
            pi_a: encode_g1(&proof.a),
            pi_b: encode_g2(&proof.b),
            pi_c: encode_g1(&proof.c),
        }
    }

    pub fn decode(&self) -> Result<Proof<Bn254>, CircuitError> {
        Ok(Proof {
            a: decode_g1(&self.pi_a)?,
            b: decode_g2(&self.pi_b)?,
            c: decode_g1(&self.pi_c)?,
        })
    }
}

/// The six public-input blobs in wire order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WirePublicInputs {
    pub seed1: [u8; 32],
    pub seed2: [u8; 32],
    pub seed_commit1: [u8; 32],
    pub seed_commit2: [u8; 32],
    pub session_id: [u8; 32],
    pub winner: [u8; 32],
}

impl WirePublicInputs {
    pub fn encode(public: &PublicValues) -> WirePublicInputs {
        let mut winner = [0u8; 32];
        winner[31] = public.winner;
        WirePublicInputs {
            seed1: fr_to_be32(&public.seed1),
            seed2: fr_to_be32(&public.seed2),
            seed_commit1: fr_to_be32(&public.seed_commit1),
            seed_commit2: fr_to_be32(&public.seed_commit2),
            session_id: session_id_be32(public.session_id),
            winner,
        }
    }

    /// Concatenation in wire (alphabetical) order.
    pub fn to_bytes(&self) -> [u8; 192] {
        let mut out = [0u8; 192];
        for (i, field) in [
            &self.seed1,
            &self.seed2,
            &self.seed_commit1,
            &self.seed_commit2,
            &self.session_id,
            &self.winner,
        ]
        .into_iter()
        .enumerate()
        {
            out[i * 32..(i + 1) * 32].copy_from_slice(field);
        }
        out
    }

    /// Scalars in the circuit's allocation order. The winner blob is the
    /// one field with a fixed honest range, so an externally supplied
    /// payload is gated here before anything downstream trusts it.
    pub fn to_field_elements(&self) -> Result<[Fr; 6], CircuitError> {
        if self.winner[..31] != [0u8; 31] || !matches!(self.winner[31], 1 | 2) {
            let mut low = [0u8; 8];
            low.copy_from_slice(&self.winner[24..]);
            return Err(CircuitError::InvalidWinner(u64::from_be_bytes(low)));
        }
        Ok([
            fr_from_be32(&self.seed_commit1)?,
            fr_from_be32(&self.seed_commit2)?,
            fr_from_be32(&self.seed1)?,
            fr_from_be32(&self.seed2)?,
            fr_from_be32(&self.session_id)?,
            fr_from_be32(&self.winner)?,
        ])
    }
}

/// The verifying key in the contract's storage layout; `ic` holds
/// `n_public + 1 = 7` entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireVerifyingKey {
    pub alpha_g1: [u8; 64],
    pub beta_g2: [u8; 128],
    pub gamma_g2: [u8; 128],
    pub delta_g2: [u8; 128],
    pub ic: Vec<[u8; 64]>,
}

impl WireVerifyingKey {
    pub fn encode(vk: &VerifyingKey<Bn254>) -> WireVerifyingKey {
        WireVerifyingKey {
            alpha_g1: encode_g1(&vk.alpha_g1),
            beta_g2: encode_g2(&vk.beta_g2),
            gamma_g2: encode_g2(&vk.gamma_g2),
            delta_g2: encode_g2(&vk.delta_g2),
            ic: vk.gamma_abc_g1.iter().map(encode_g1).collect(),
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn from_hex<const N: usize>(s: &str) -> Result<[u8; N], CircuitError> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let raw = hex::decode(digits).map_err(|_| CircuitError::InvalidHex(s.to_string()))?;
    if raw.len() != N {
        return Err(CircuitError::InvalidHex(s.to_string()));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&raw);
    Ok(out)
}

/// The `proof.json` artifact written by the CLI and consumed by the
/// settlement transaction tooling.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofJson {
    pub pi_a: String,
    pub pi_b: String,
    pub pi_c: String,
    pub public_inputs: PublicInputsJson,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicInputsJson {
    pub seed1: String,
    pub seed2: String,
    pub seed_commit1: String,
    pub seed_commit2: String,
    pub session_id: String,
    pub winner: String,
}

impl ProofJson {
    pub fn from_parts(proof: &Proof<Bn254>, public: &PublicValues) -> ProofJson {
        let wire = WireProof::encode(proof);
        let inputs = WirePublicInputs::encode(public);
        ProofJson {
            pi_a: to_hex(&wire.pi_a),
            pi_b: to_hex(&wire.pi_b),
            pi_c: to_hex(&wire.pi_c),
            public_inputs: PublicInputsJson {
                seed1: to_hex(&inputs.seed1),
                seed2: to_hex(&inputs.seed2),
                seed_commit1: to_hex(&inputs.seed_commit1),
                seed_commit2: to_hex(&inputs.seed_commit2),
                session_id: to_hex(&inputs.session_id),
                winner: to_hex(&inputs.winner),
            },
        }
    }

    pub fn to_parts(&self) -> Result<(Proof<Bn254>, [Fr; 6]), CircuitError> {
        let wire = WireProof {
            pi_a: from_hex(&self.pi_a)?,
            pi_b: from_hex(&self.pi_b)?,
            pi_c: from_hex(&self.pi_c)?,
        };
        let inputs = WirePublicInputs {
            seed1: from_hex(&self.public_inputs.seed1)?,
            seed2: from_hex(&self.public_inputs.seed2)?,
            seed_commit1: from_hex(&self.public_inputs.seed_commit1)?,
            seed_commit2: from_hex(&self.public_inputs.seed_commit2)?,
            session_id: from_hex(&self.public_inputs.session_id)?,
            winner: from_hex(&self.public_inputs.winner)?,
        };
        Ok((wire.decode()?, inputs.to_field_elements()?))
    }
}

/// The verifying key as deploy-time JSON for `set_vk`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyingKeyJson {
    pub alpha_g1: String,
    pub beta_g2: String,
    pub gamma_g2: String,
    pub delta_g2: String,
    pub ic: Vec<String>,
}

impl VerifyingKeyJson {
    pub fn encode(vk: &VerifyingKey<Bn254>) -> VerifyingKeyJson {
        let wire = WireVerifyingKey::encode(vk);
        VerifyingKeyJson {
            alpha_g1: to_hex(&wire.alpha_g1),
            beta_g2: to_hex(&wire.beta_g2),
            gamma_g2: to_hex(&wire.gamma_g2),
            delta_g2: to_hex(&wire.delta_g2),
            ic: wire.ic.iter().map(|p| to_hex(p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn g1_round_trip() {
        let g = G1Affine::generator();
        let enc = encode_g1(&g);
        assert_eq!(decode_g1(&enc).unwrap(), g);

        let inf = G1Affine::zero();
        assert_eq!(encode_g1(&inf), [0u8; 64]);
        assert_eq!(decode_g1(&[0u8; 64]).unwrap(), inf);
    }

    #[test]
    fn g2_round_trip_and_swap() {
        let g = G2Affine::generator();
        let enc = encode_g2(&g);
        assert_eq!(decode_g2(&enc).unwrap(), g);

        // The swap pin: c1 limbs come first in each coordinate.
        assert_eq!(&enc[..32], &fq_to_be32(&g.x.c1));
        assert_eq!(&enc[32..64], &fq_to_be32(&g.x.c0));
        assert_eq!(&enc[64..96], &fq_to_be32(&g.y.c1));
        assert_eq!(&enc[96..], &fq_to_be32(&g.y.c0));
    }

    #[test]
    fn tampered_points_do_not_decode() {
        let mut enc = encode_g1(&G1Affine::generator());
        enc[40] ^= 0x01;
        assert!(decode_g1(&enc).is_err());

        let mut enc2 = encode_g2(&G2Affine::generator());
        enc2[100] ^= 0x01;
        assert!(decode_g2(&enc2).is_err());
    }

    #[test]
    fn public_inputs_wire_order_is_alphabetical() {
        let public = PublicValues {
            seed1: Fr::from(1u64),
            seed2: Fr::from(2u64),
            seed_commit1: Fr::from(3u64),
            seed_commit2: Fr::from(4u64),
            session_id: 7,
            winner: 1,
        };
        let wire = WirePublicInputs::encode(&public);
        let bytes = wire.to_bytes();
        assert_eq!(bytes[31], 1); // seed1
        assert_eq!(bytes[63], 2); // seed2
        assert_eq!(bytes[95], 3); // seed_commit1
        assert_eq!(bytes[127], 4); // seed_commit2
        assert_eq!(bytes[159], 7); // session_id
        assert_eq!(bytes[191], 1); // winner

        let scalars = wire.to_field_elements().unwrap();
        assert_eq!(scalars[0], public.seed_commit1);
        assert_eq!(scalars[2], public.seed1);
        assert_eq!(scalars[5], Fr::from(1u64));
    }

    #[test]
    fn out_of_range_winner_is_rejected() {
        let public = PublicValues {
            seed1: Fr::from(1u64),
            seed2: Fr::from(2u64),
            seed_commit1: Fr::from(3u64),
            seed_commit2: Fr::from(4u64),
            session_id: 7,
            winner: 1,
        };
        let mut wire = WirePublicInputs::encode(&public);

        wire.winner[31] = 3;
        match wire.to_field_elements() {
            Err(CircuitError::InvalidWinner(3)) => {}
            other => panic!("expected InvalidWinner(3), got {other:?}"),
        }

        // Zero (the unsettled sentinel) and wide values are equally invalid.
        wire.winner[31] = 0;
        assert!(wire.to_field_elements().is_err());
        wire.winner = [0xff; 32];
        assert!(wire.to_field_elements().is_err());
    }
}

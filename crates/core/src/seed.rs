//! Seed sampling and commitments.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use rand::{CryptoRng, RngCore};

use crate::hash::poseidon1;

/// Samples a uniformly random seed strictly below the scalar modulus.
///
/// 31 random bytes top out at 2^248, comfortably below r ~ 2^254, so no
/// modular reduction happens and the distribution carries no bias.
pub fn generate_seed<R: RngCore + CryptoRng>(rng: &mut R) -> Fr {
    let mut bytes = [0u8; 31];
    rng.fill_bytes(&mut bytes);
    Fr::from_be_bytes_mod_order(&bytes)
}

/// The on-chain commitment to a seed: `Poseidon1(seed)`.
pub fn commitment(seed: &Fr) -> Fr {
    poseidon1(seed)
}

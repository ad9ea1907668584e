//! Poseidon instances used by the protocol, all on the canonical circomlib
//! parameter set for the x^5 S-box over the BN254 scalar field.

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher};

/// Arity-1 Poseidon: seed commitments.
pub fn poseidon1(a: &Fr) -> Fr {
    Poseidon::<Fr>::new_circom(1)
        .expect("static circomlib parameters for arity 1")
        .hash(&[*a])
        .expect("arity-1 input length")
}

/// Arity-2 Poseidon: per-card deck weights and the tiebreak coin.
pub fn poseidon2(a: &Fr, b: &Fr) -> Fr {
    Poseidon::<Fr>::new_circom(2)
        .expect("static circomlib parameters for arity 2")
        .hash(&[*a, *b])
        .expect("arity-2 input length")
}

/// Arity-3 Poseidon: the combined seed.
pub fn poseidon3(a: &Fr, b: &Fr, c: &Fr) -> Fr {
    Poseidon::<Fr>::new_circom(3)
        .expect("static circomlib parameters for arity 3")
        .hash(&[*a, *b, *c])
        .expect("arity-3 input length")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::fr_to_be32;
    use blackspot_field::Fp;

    fn fp(f: &Fr) -> Fp {
        Fp::from_be_bytes(&fr_to_be32(f)).unwrap()
    }

    // The prover-side hashes and the contract-side no_std implementation
    // must produce identical digests; a mismatch bricks every session.
    #[test]
    fn agrees_with_contract_field_crate() {
        let a = Fr::from(97u64);
        let b = Fr::from(11u64);
        let c = Fr::from(250_000u64);

        assert_eq!(
            blackspot_field::poseidon1(fp(&a)).to_be_bytes(),
            fr_to_be32(&poseidon1(&a))
        );
        assert_eq!(
            blackspot_field::poseidon2(fp(&a), fp(&b)).to_be_bytes(),
            fr_to_be32(&poseidon2(&a, &b))
        );
        assert_eq!(
            blackspot_field::poseidon3(fp(&a), fp(&b), fp(&c)).to_be_bytes(),
            fr_to_be32(&poseidon3(&a, &b, &c))
        );
    }
}

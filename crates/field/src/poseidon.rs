//! Poseidon over the BN254 scalar field, x^5 S-box, canonical circomlib
//! parameters for arities 1, 2 and 3 (state widths 2, 3, 4).
//!
//! The sponge is single-shot: the state starts as `[0, input...]`, runs
//! `full + partial` rounds of add-round-key / S-box / MDS mix, and the
//! digest is the first state element. Round constants and matrices come
//! from the build-script tables in Montgomery form.

use crate::constants::{
    T2_ARK, T2_FULL_ROUNDS, T2_MDS, T2_PARTIAL_ROUNDS, T3_ARK, T3_FULL_ROUNDS, T3_MDS,
    T3_PARTIAL_ROUNDS, T4_ARK, T4_FULL_ROUNDS, T4_MDS, T4_PARTIAL_ROUNDS,
};
use crate::Fp;

struct Params {
    width: usize,
    full_rounds: usize,
    partial_rounds: usize,
    ark: &'static [[u64; 4]],
    mds: &'static [[u64; 4]],
}

static WIDTH_2: Params = Params {
    width: 2,
    full_rounds: T2_FULL_ROUNDS,
    partial_rounds: T2_PARTIAL_ROUNDS,
    ark: &T2_ARK,
    mds: &T2_MDS,
};

static WIDTH_3: Params = Params {
    width: 3,
    full_rounds: T3_FULL_ROUNDS,
    partial_rounds: T3_PARTIAL_ROUNDS,
    ark: &T3_ARK,
    mds: &T3_MDS,
};

static WIDTH_4: Params = Params {
    width: 4,
    full_rounds: T4_FULL_ROUNDS,
    partial_rounds: T4_PARTIAL_ROUNDS,
    ark: &T4_ARK,
    mds: &T4_MDS,
};

#[inline]
fn from_mont_limbs(l: &[u64; 4]) -> Fp {
    // The generated tables are already reduced Montgomery limbs.
    Fp::from_mont(*l)
}

#[inline]
fn sbox(x: Fp) -> Fp {
    let x2 = x.square();
    let x4 = x2.square();
    x4.mul(&x)
}

fn permute(params: &Params, state: &mut [Fp; 4]) {
    let width = params.width;
    let half = params.full_rounds / 2;
    let total = params.full_rounds + params.partial_rounds;

    for round in 0..total {
        for i in 0..width {
            state[i] = state[i].add(&from_mont_limbs(&params.ark[round * width + i]));
        }

        if round < half || round >= half + params.partial_rounds {
            for s in state.iter_mut().take(width) {
                *s = sbox(*s);
            }
        } else {
            state[0] = sbox(state[0]);
        }

        let mut mixed = [Fp::ZERO; 4];
        for (i, m) in mixed.iter_mut().enumerate().take(width) {
            let mut acc = Fp::ZERO;
            for j in 0..width {
                acc = acc.add(&from_mont_limbs(&params.mds[i * width + j]).mul(&state[j]));
            }
            *m = acc;
        }
        *state = mixed;
    }
}

fn hash(params: &Params, inputs: &[Fp]) -> Fp {
    debug_assert_eq!(inputs.len() + 1, params.width);
    let mut state = [Fp::ZERO; 4];
    for (i, input) in inputs.iter().enumerate() {
        state[i + 1] = *input;
    }
    permute(params, &mut state);
    state[0]
}

/// Arity-1 Poseidon; the seed-commitment hash.
pub fn poseidon1(a: Fp) -> Fp {
    hash(&WIDTH_2, &[a])
}

/// Arity-2 Poseidon; deck weights and the coin flip.
pub fn poseidon2(a: Fp, b: Fp) -> Fp {
    hash(&WIDTH_3, &[a, b])
}

/// Arity-3 Poseidon; the combined-seed hash.
pub fn poseidon3(a: Fp, b: Fp, c: Fp) -> Fp {
    hash(&WIDTH_4, &[a, b, c])
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use ark_ff::{BigInteger, PrimeField};
    use ark_std::str::FromStr;
    use light_poseidon::{Poseidon, PoseidonHasher};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn fr_bytes(f: &ark_bn254::Fr) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&f.into_bigint().to_bytes_be());
        out
    }

    #[test]
    fn matches_light_poseidon_arity_1() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut reference = Poseidon::<ark_bn254::Fr>::new_circom(1).unwrap();
        for _ in 0..32 {
            let a: u64 = rng.gen();
            let expected = reference.hash(&[ark_bn254::Fr::from(a)]).unwrap();
            assert_eq!(poseidon1(Fp::from_u64(a)).to_be_bytes(), fr_bytes(&expected));
        }
    }

    #[test]
    fn matches_light_poseidon_arity_2() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut reference = Poseidon::<ark_bn254::Fr>::new_circom(2).unwrap();
        for _ in 0..32 {
            let (a, b): (u64, u64) = (rng.gen(), rng.gen());
            let expected = reference
                .hash(&[ark_bn254::Fr::from(a), ark_bn254::Fr::from(b)])
                .unwrap();
            assert_eq!(
                poseidon2(Fp::from_u64(a), Fp::from_u64(b)).to_be_bytes(),
                fr_bytes(&expected)
            );
        }
    }

    #[test]
    fn matches_light_poseidon_arity_3() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut reference = Poseidon::<ark_bn254::Fr>::new_circom(3).unwrap();
        for _ in 0..32 {
            let (a, b, c): (u64, u64, u64) = (rng.gen(), rng.gen(), rng.gen());
            let expected = reference
                .hash(&[
                    ark_bn254::Fr::from(a),
                    ark_bn254::Fr::from(b),
                    ark_bn254::Fr::from(c),
                ])
                .unwrap();
            assert_eq!(
                poseidon3(Fp::from_u64(a), Fp::from_u64(b), Fp::from_u64(c)).to_be_bytes(),
                fr_bytes(&expected)
            );
        }
    }

    #[test]
    fn circomlib_reference_digest() {
        // poseidon([1, 2]) from the circomlib test vectors.
        let expected = ark_bn254::Fr::from_str(
            "7853200120776062878684798364095072458815029376092732009249414926327459813530",
        )
        .unwrap();
        assert_eq!(
            poseidon2(Fp::from_u64(1), Fp::from_u64(2)).to_be_bytes(),
            fr_bytes(&expected)
        );
    }
}

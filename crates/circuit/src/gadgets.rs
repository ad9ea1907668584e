//! Reusable constraint gadgets: the circomlib Poseidon permutation over
//! `FpVar` and little-endian bit decompositions for range checks.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};
use light_poseidon::parameters::bn254_x5::get_poseidon_parameters;

/// Poseidon parameters for one state width, shared between the gadget and
/// the native hashes through `light-poseidon`'s canonical tables.
#[derive(Clone)]
pub struct PoseidonSpec {
    pub width: usize,
    pub full_rounds: usize,
    pub partial_rounds: usize,
    pub ark: Vec<Fr>,
    pub mds: Vec<Vec<Fr>>,
}

impl PoseidonSpec {
    /// Canonical circomlib parameters for a given input arity.
    pub fn circom(arity: usize) -> PoseidonSpec {
        let params = get_poseidon_parameters::<Fr>((arity + 1) as u8)
            .expect("canonical bn254 x5 parameters");
        PoseidonSpec {
            width: params.width,
            full_rounds: params.full_rounds,
            partial_rounds: params.partial_rounds,
            ark: params.ark,
            mds: params.mds,
        }
    }
}

/// The three instances the settlement circuit needs.
#[derive(Clone)]
pub struct PoseidonSuite {
    /// Arity 1: commitment openings.
    pub t2: PoseidonSpec,
    /// Arity 2: deck weights and the coin flip.
    pub t3: PoseidonSpec,
    /// Arity 3: the combined seed.
    pub t4: PoseidonSpec,
}

impl PoseidonSuite {
    pub fn circom() -> PoseidonSuite {
        PoseidonSuite {
            t2: PoseidonSpec::circom(1),
            t3: PoseidonSpec::circom(2),
            t4: PoseidonSpec::circom(3),
        }
    }
}

fn pow5(x: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let x2 = x.square()?;
    let x4 = x2.square()?;
    Ok(&x4 * x)
}

/// One-shot Poseidon sponge: state `[0, inputs...]`, digest `state[0]`.
/// Mirrors the native permutation round for round; round constants and the
/// MDS matrix enter as circuit constants.
pub fn poseidon_gadget(
    spec: &PoseidonSpec,
    inputs: &[FpVar<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    assert_eq!(inputs.len() + 1, spec.width, "input arity mismatch");

    let width = spec.width;
    let mut state: Vec<FpVar<Fr>> = Vec::with_capacity(width);
    state.push(FpVar::zero());
    state.extend_from_slice(inputs);

    let half = spec.full_rounds / 2;
    let total = spec.full_rounds + spec.partial_rounds;
    for round in 0..total {
        for (i, s) in state.iter_mut().enumerate() {
            *s += FpVar::constant(spec.ark[round * width + i]);
        }

        if round < half || round >= half + spec.partial_rounds {
            for s in state.iter_mut() {
                *s = pow5(s)?;
            }
        } else {
            state[0] = pow5(&state[0])?;
        }

        let mut mixed = Vec::with_capacity(width);
        for row in spec.mds.iter() {
            let mut acc = FpVar::<Fr>::zero();
            for (j, coeff) in row.iter().enumerate() {
                acc += FpVar::constant(*coeff) * &state[j];
            }
            mixed.push(acc);
        }
        state = mixed;
    }

    Ok(state[0].clone())
}

/// Allocates `n` boolean witnesses for the little-endian bits of `value`
/// and enforces that they recompose to `var`. This is the circuit's only
/// range-check primitive: passing it pins `var` below `2^n`.
pub fn enforce_bits(
    cs: ConstraintSystemRef<Fr>,
    var: &FpVar<Fr>,
    value: Option<Fr>,
    n: usize,
) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
    let mut bits = Vec::with_capacity(n);
    for i in 0..n {
        bits.push(Boolean::new_witness(cs.clone(), || {
            value
                .map(|v| v.into_bigint().get_bit(i))
                .ok_or(SynthesisError::AssignmentMissing)
        })?);
    }
    recompose(&bits).enforce_equal(var)?;
    Ok(bits)
}

/// Linear combination `sum(bits[i] * 2^i)`.
pub fn recompose(bits: &[Boolean<Fr>]) -> FpVar<Fr> {
    let mut acc = FpVar::<Fr>::zero();
    let mut coeff = Fr::from(1u64);
    for bit in bits {
        acc += FpVar::from(bit.clone()) * FpVar::constant(coeff);
        coeff = coeff + coeff;
    }
    acc
}

/// Boolean as a field variable.
pub fn bool_to_fp(bit: &Boolean<Fr>) -> FpVar<Fr> {
    FpVar::from(bit.clone())
}

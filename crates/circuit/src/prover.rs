//! Groth16 setup, proving and verification.
//!
//! Proving randomness is derived from the combined seed, so two honest
//! provers with the same statement emit byte-identical proofs. The seeds
//! are already public by the time anyone can prove, so deterministic
//! blinding gives up nothing here.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore, SeedableRng};

use blackspot_core::encode::fr_to_be32;

use crate::circuit::SettlementCircuit;
use crate::witness::{build_circuit, PublicValues};
use crate::CircuitError;

/// Circuit-specific key generation (phase-2 of the ceremony; phase-1
/// randomness comes from the caller's rng).
pub fn setup<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(ProvingKey<Bn254>, VerifyingKey<Bn254>), CircuitError> {
    let keys = Groth16::<Bn254>::setup(SettlementCircuit::blank(), rng)?;
    tracing::info!("settlement circuit keys generated");
    Ok(keys)
}

/// Proves the settlement statement for `(seed1, seed2, session_id)`.
pub fn prove(
    pk: &ProvingKey<Bn254>,
    seed1: &Fr,
    seed2: &Fr,
    session_id: u32,
) -> Result<(Proof<Bn254>, PublicValues), CircuitError> {
    let (circuit, public, sim) = build_circuit(seed1, seed2, session_id)?;
    let mut rng = StdRng::from_seed(fr_to_be32(&sim.derivation.combined_seed));
    let proof = Groth16::<Bn254>::prove(pk, circuit, &mut rng)?;
    tracing::info!(session_id, winner = public.winner, "settlement proof generated");
    Ok((proof, public))
}

/// Checks a proof against the six public inputs.
pub fn verify(
    vk: &VerifyingKey<Bn254>,
    public: &PublicValues,
    proof: &Proof<Bn254>,
) -> Result<bool, CircuitError> {
    Ok(Groth16::<Bn254>::verify(
        vk,
        &public.to_field_elements(),
        proof,
    )?)
}

/// `verify` for already-decoded raw scalars (the CLI path).
pub fn verify_scalars(
    vk: &VerifyingKey<Bn254>,
    public_inputs: &[Fr; 6],
    proof: &Proof<Bn254>,
) -> Result<bool, CircuitError> {
    Ok(Groth16::<Bn254>::verify(vk, public_inputs, proof)?)
}

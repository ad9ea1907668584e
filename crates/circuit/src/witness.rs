//! Witness generation: from two seeds and a session id to a fully
//! assigned settlement circuit.

use ark_bn254::Fr;

use blackspot_core::encode::session_id_to_fr;
use blackspot_core::seed::commitment;
use blackspot_core::sim::{simulate, Simulation};

use crate::circuit::SettlementCircuit;
use crate::gadgets::PoseidonSuite;
use crate::CircuitError;

/// The six public values of a settlement statement, in native form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicValues {
    pub seed1: Fr,
    pub seed2: Fr,
    pub seed_commit1: Fr,
    pub seed_commit2: Fr,
    pub session_id: u32,
    pub winner: u8,
}

impl PublicValues {
    /// Scalars in the circuit's allocation order:
    /// `commit1, commit2, seed1, seed2, session_id, winner`.
    pub fn to_field_elements(&self) -> [Fr; 6] {
        [
            self.seed_commit1,
            self.seed_commit2,
            self.seed1,
            self.seed2,
            session_id_to_fr(self.session_id),
            Fr::from(self.winner as u64),
        ]
    }
}

/// Simulates the session and assembles the assigned circuit.
///
/// Fails with [`blackspot_core::CoreError::WeightCollision`] instead of
/// producing a witness whose sort order the circuit cannot attest to.
pub fn build_circuit(
    seed1: &Fr,
    seed2: &Fr,
    session_id: u32,
) -> Result<(SettlementCircuit, PublicValues, Simulation), CircuitError> {
    let sim = simulate(seed1, seed2, session_id)?;
    let public = PublicValues {
        seed1: *seed1,
        seed2: *seed2,
        seed_commit1: commitment(seed1),
        seed_commit2: commitment(seed2),
        session_id,
        winner: sim.winner,
    };
    let circuit = SettlementCircuit {
        suite: PoseidonSuite::circom(),
        commit1: Some(public.seed_commit1),
        commit2: Some(public.seed_commit2),
        seed1: Some(*seed1),
        seed2: Some(*seed2),
        session_id: Some(session_id_to_fr(session_id)),
        winner: Some(Fr::from(sim.winner as u64)),
        deck: Some(sim.derivation.deck),
        trunc: Some(sim.derivation.trunc),
        high: Some(sim.derivation.high),
    };
    Ok((circuit, public, sim))
}

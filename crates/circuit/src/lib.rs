//! The Black Spot settlement circuit and its Groth16 toolchain.
//!
//! The circuit is the enforcement copy of `blackspot-core`'s simulator: a
//! rank-1 constraint system proving that the declared winner is the unique
//! consequence of two committed seeds and a session id. Modules:
//!
//! - [`gadgets`]: in-circuit Poseidon (same circomlib parameters as the
//!   native hashes) and bit-decomposition helpers.
//! - [`circuit`]: the [`circuit::SettlementCircuit`] constraint synthesizer.
//! - [`witness`]: builds fully-assigned circuits from seeds.
//! - [`prover`]: Groth16 setup / prove / verify with a statement-derived
//!   RNG, so identical inputs give byte-identical proofs.
//! - [`serialize`]: the verifier's wire encoding (64/128-byte points, G2
//!   limb swap, alphabetical public-input order) and JSON artifacts.

pub mod circuit;
pub mod gadgets;
pub mod prover;
pub mod serialize;
pub mod witness;

use ark_relations::r1cs::SynthesisError;
use ark_serialize::SerializationError;
use blackspot_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("constraint synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("point or key serialization failed: {0}")]
    Serialization(#[from] SerializationError),

    #[error("encoded point is not on the curve or not in the subgroup")]
    InvalidPoint,

    #[error("invalid hex artifact field: {0}")]
    InvalidHex(String),

    #[error("winner public input must be 1 or 2, got {0}")]
    InvalidWinner(u64),
}

//! Core protocol logic for Black Spot: seed generation, Poseidon
//! commitments, deterministic deck derivation and the game simulator.
//!
//! Everything here is a pure function of its inputs. The simulator is the
//! ground truth for the board UI and the witness generator; the circuit in
//! `blackspot-circuit` is the enforcement copy of the same rules, and the
//! on-chain contract holds the third implementation of the hashes. The
//! three must agree bit-for-bit.

pub mod cards;
pub mod deck;
pub mod encode;
pub mod hash;
pub mod seed;
pub mod sim;

pub use ark_bn254::Fr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Two truncated deck weights tied. The circuit's comparator cannot
    /// distinguish the honest order from its swap, so the deck is refused
    /// instead of silently picking one (probability ~2^-119 per session).
    #[error("truncated deck weights collided; refusing to order the deck")]
    WeightCollision,

    #[error("value is not a canonical scalar-field element")]
    NonCanonicalFieldElement,

    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),
}

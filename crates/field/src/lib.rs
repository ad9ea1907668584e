//! BN254 scalar-field arithmetic and circomlib-parameterized Poseidon.
//!
//! This crate is `no_std` with no runtime dependencies so the on-chain
//! contract can link it into wasm and recompute seed commitments during
//! reveal. The prover-side crates carry their own implementations of the
//! same primitives; the test suites pin all of them to identical digests,
//! because any divergence makes sessions either unprovable or
//! unfinalizable.
//!
//! Constant tables (Montgomery field constants, Poseidon round constants
//! and MDS matrices for arities 1–3) are generated by `build.rs` from the
//! canonical circomlib parameter set.

#![no_std]
#![deny(unsafe_code)]

mod fp;
mod poseidon;

pub(crate) mod constants {
    include!(concat!(env!("OUT_DIR"), "/constants.rs"));
}

pub use fp::Fp;
pub use poseidon::{poseidon1, poseidon2, poseidon3};

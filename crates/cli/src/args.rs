use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blackspot", author, version, about = "Black Spot proving tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the Groth16 keys and the contract-ready verification key.
    Keygen {
        /// Directory for proving.key, verifying.key and verifying_key.json
        #[arg(long, default_value = "keys")]
        out_dir: PathBuf,
    },
    /// Sample a fresh seed (or hash a given one) and print its commitment.
    Commit {
        /// Hex seed to commit to instead of sampling a new one
        #[arg(long)]
        seed: Option<String>,
    },
    /// Run the deterministic simulator and print the outcome as JSON.
    Simulate {
        #[arg(long)]
        seed1: String,
        #[arg(long)]
        seed2: String,
        #[arg(long)]
        session_id: u32,
    },
    /// Produce a settlement proof for a revealed session.
    Prove {
        #[arg(long, default_value = "keys/proving.key")]
        pk: PathBuf,
        #[arg(long)]
        seed1: String,
        #[arg(long)]
        seed2: String,
        #[arg(long)]
        session_id: u32,
        /// Path for the proof artifact
        #[arg(long, default_value = "proof.json")]
        out: PathBuf,
    },
    /// Verify a settlement proof artifact.
    Verify {
        #[arg(long, default_value = "keys/verifying.key")]
        vk: PathBuf,
        #[arg(long)]
        proof: PathBuf,
    },
}

//! Subcommand implementations.

use std::fs;
use std::path::Path;

use ark_bn254::Bn254;
use ark_groth16::{ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::rngs::OsRng;

use blackspot_circuit::prover;
use blackspot_circuit::serialize::{ProofJson, VerifyingKeyJson};
use blackspot_core::encode::{fr_from_hex, fr_to_hex};
use blackspot_core::seed::{commitment, generate_seed};
use blackspot_core::sim::simulate;

use crate::error::{CliError, Result};

pub fn keygen(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|e| CliError::io(out_dir, e))?;

    let mut rng = OsRng;
    let (pk, vk) = prover::setup(&mut rng)?;

    write_key(&out_dir.join("proving.key"), &pk)?;
    write_key(&out_dir.join("verifying.key"), &vk)?;

    let vk_json = out_dir.join("verifying_key.json");
    let text = serde_json::to_string_pretty(&VerifyingKeyJson::encode(&vk))?;
    fs::write(&vk_json, text).map_err(|e| CliError::io(&vk_json, e))?;

    tracing::info!(dir = %out_dir.display(), "keys written");
    println!("keys written to {}", out_dir.display());
    Ok(())
}

pub fn commit(seed_hex: Option<&str>) -> Result<()> {
    let seed = match seed_hex {
        Some(hex) => fr_from_hex(hex)?,
        None => generate_seed(&mut OsRng),
    };
    println!("seed:       {}", fr_to_hex(&seed));
    println!("commitment: {}", fr_to_hex(&commitment(&seed)));
    Ok(())
}

pub fn run_simulation(seed1: &str, seed2: &str, session_id: u32) -> Result<()> {
    let sim = simulate(&fr_from_hex(seed1)?, &fr_from_hex(seed2)?, session_id)?;
    println!("{}", serde_json::to_string_pretty(&sim)?);
    Ok(())
}

pub fn prove(pk_path: &Path, seed1: &str, seed2: &str, session_id: u32, out: &Path) -> Result<()> {
    let pk: ProvingKey<Bn254> = read_key(pk_path)?;
    let (proof, public) = prover::prove(&pk, &fr_from_hex(seed1)?, &fr_from_hex(seed2)?, session_id)?;

    let artifact = ProofJson::from_parts(&proof, &public);
    let text = serde_json::to_string_pretty(&artifact)?;
    fs::write(out, text).map_err(|e| CliError::io(out, e))?;

    tracing::info!(session_id, winner = public.winner, path = %out.display(), "proof written");
    println!("winner {} proven; artifact at {}", public.winner, out.display());
    Ok(())
}

pub fn verify(vk_path: &Path, proof_path: &Path) -> Result<()> {
    let vk: VerifyingKey<Bn254> = read_key(vk_path)?;
    let text = fs::read_to_string(proof_path).map_err(|e| CliError::io(proof_path, e))?;
    let artifact: ProofJson = serde_json::from_str(&text)?;

    let (proof, public_inputs) = artifact.to_parts()?;
    if !prover::verify_scalars(&vk, &public_inputs, &proof)? {
        return Err(CliError::ProofRejected);
    }
    println!("proof verified");
    Ok(())
}

fn write_key<K: CanonicalSerialize>(path: &Path, key: &K) -> Result<()> {
    let mut bytes = Vec::new();
    key.serialize_compressed(&mut bytes)?;
    fs::write(path, bytes).map_err(|e| CliError::io(path, e))?;
    Ok(())
}

fn read_key<K: CanonicalDeserialize>(path: &Path) -> Result<K> {
    let bytes = fs::read(path).map_err(|e| CliError::io(path, e))?;
    Ok(K::deserialize_compressed(bytes.as_slice())?)
}

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod error;

use args::{Cli, Commands};

fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::Keygen { out_dir } => commands::keygen(&out_dir),
        Commands::Commit { seed } => commands::commit(seed.as_deref()),
        Commands::Simulate {
            seed1,
            seed2,
            session_id,
        } => commands::run_simulation(&seed1, &seed2, session_id),
        Commands::Prove {
            pk,
            seed1,
            seed2,
            session_id,
            out,
        } => commands::prove(&pk, &seed1, &seed2, session_id, &out),
        Commands::Verify { vk, proof } => commands::verify(&vk, &proof),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

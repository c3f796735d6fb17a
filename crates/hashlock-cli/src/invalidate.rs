//! # Invalidate Subcommand
//!
//! Removes a still-pending commitment (the timeout path, driven by hand).

use std::path::PathBuf;

use clap::Args;

use crate::ledger::open_ledger;

/// Arguments for `hashlock invalidate`.
#[derive(Args, Debug)]
pub struct InvalidateArgs {
    /// Path of the ledger document.
    #[arg(long)]
    pub ledger: PathBuf,

    /// Proposal id to invalidate.
    #[arg(long)]
    pub id: String,
}

/// Run the invalidate operation.
pub fn run(args: InvalidateArgs) -> anyhow::Result<()> {
    let machine = open_ledger(&args.ledger);
    machine.invalidate(&args.id)?;
    println!("invalidated {}", args.id);
    Ok(())
}

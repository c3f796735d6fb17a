//! # Confirm Subcommand
//!
//! Applies a disclosed pre-image to a pending commitment.

use std::path::PathBuf;

use clap::Args;

use crate::ledger::open_ledger;

/// Arguments for `hashlock confirm`.
#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Path of the ledger document.
    #[arg(long)]
    pub ledger: PathBuf,

    /// Proposal id to confirm.
    #[arg(long)]
    pub id: String,

    /// The disclosed secret.
    #[arg(long)]
    pub pre_image: String,
}

/// Run the confirm operation.
pub fn run(args: ConfirmArgs) -> anyhow::Result<()> {
    let machine = open_ledger(&args.ledger);
    machine.confirm(&args.id, &args.pre_image)?;
    println!("confirmed {}", args.id);
    Ok(())
}

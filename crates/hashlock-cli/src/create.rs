//! # Create Subcommand
//!
//! Records a new pending commitment on the ledger.

use std::path::PathBuf;

use clap::Args;
use hashlock_core::Proposal;

use crate::ledger::open_ledger;

/// Arguments for `hashlock create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Path of the ledger document.
    #[arg(long)]
    pub ledger: PathBuf,

    /// Full proposal payload as JSON. Mutually exclusive with
    /// --id/--handler.
    #[arg(long, conflicts_with_all = ["id", "handler"])]
    pub proposal: Option<String>,

    /// Proposal id; generated when omitted.
    #[arg(long)]
    pub id: Option<String>,

    /// Handler organization for event routing. Required unless --proposal
    /// is given.
    #[arg(long, required_unless_present = "proposal")]
    pub handler: Option<String>,

    /// Hex-encoded commitment digest.
    #[arg(long)]
    pub hash: String,

    /// Hash algorithm token (SHA256, SHA384, SHA512).
    #[arg(long)]
    pub algorithm: String,
}

/// Run the create operation; prints the acknowledged proposal id.
pub fn run(args: CreateArgs) -> anyhow::Result<()> {
    let payload = match args.proposal {
        Some(json) => json,
        None => {
            let proposal = Proposal {
                proposal_id: args
                    .id
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                handler: args.handler.unwrap_or_default(),
            };
            serde_json::to_string(&proposal)?
        }
    };

    let machine = open_ledger(&args.ledger);
    let proposal_id = machine.create(&payload, &args.hash, &args.algorithm)?;
    println!("{proposal_id}");
    Ok(())
}

//! # Show Subcommand
//!
//! Prints the stored entry for a proposal.

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use crate::ledger::open_ledger;

/// Arguments for `hashlock show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path of the ledger document.
    #[arg(long)]
    pub ledger: PathBuf,

    /// Proposal id to display.
    #[arg(long)]
    pub id: String,
}

/// Print the entry as pretty JSON, or fail if there is none.
pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let machine = open_ledger(&args.ledger);
    match machine.proposal(&args.id)? {
        Some(entry) => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
            Ok(())
        }
        None => bail!("no such proposal {:?}", args.id),
    }
}

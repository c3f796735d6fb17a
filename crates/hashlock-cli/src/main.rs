//! # hashlock CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Hashlock Stack CLI — hash-timelock commitment ledger toolchain.
///
/// Records, confirms, and invalidates hash-timelock commitments against a
/// file-backed ledger, printing emitted events for relaying agents.
#[derive(Parser, Debug)]
#[command(name = "hashlock", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Record a new pending commitment.
    Create(hashlock_cli::create::CreateArgs),
    /// Apply a disclosed pre-image to a pending commitment.
    Confirm(hashlock_cli::confirm::ConfirmArgs),
    /// Remove a still-pending commitment.
    Invalidate(hashlock_cli::invalidate::InvalidateArgs),
    /// Print the stored entry for a proposal.
    Show(hashlock_cli::show::ShowArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => hashlock_cli::create::run(args),
        Commands::Confirm(args) => hashlock_cli::confirm::run(args),
        Commands::Invalidate(args) => hashlock_cli::invalidate::run(args),
        Commands::Show(args) => hashlock_cli::show::run(args),
    }
}

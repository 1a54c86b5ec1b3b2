//! BAC CLI - Inspection tool for Nethercore BAC action data
//!
//! # Commands
//!
//! - `bac info` - Summarize a file's entries and records
//! - `bac validate` - Check record flags against the documented masks
//! - `bac verify` - Round-trip a file and confirm the output is stable
//! - `bac layers` - Preview editor lane assignment for one entry
//!
//! # Usage
//!
//! ```bash
//! # Per-entry record summary
//! bac info fighter_00.bac
//!
//! # Full model as JSON (for diffing or scripting)
//! bac info fighter_00.bac --json
//!
//! # Flag check; exits nonzero on the first undocumented bit
//! bac validate fighter_00.bac
//!
//! # Codec self-check over a real file
//! bac verify fighter_00.bac
//!
//! # Lane table for entry 12
//! bac layers fighter_00.bac 12
//! ```

mod info;
mod layers;
mod validate;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// BAC CLI - Inspection tool for Nethercore BAC action data
#[derive(Parser)]
#[command(name = "bac")]
#[command(about = "Inspection tool for Nethercore BAC action data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a file's entries and records
    Info(info::InfoArgs),

    /// Check record flags against the documented masks
    Validate(validate::ValidateArgs),

    /// Round-trip a file and confirm the output is stable
    Verify(verify::VerifyArgs),

    /// Preview editor lane assignment for one entry
    Layers(layers::LayersArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info(args) => info::execute(args),
        Commands::Validate(args) => validate::execute(args),
        Commands::Verify(args) => verify::execute(args),
        Commands::Layers(args) => layers::execute(args),
    }
}

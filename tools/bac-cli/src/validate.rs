//! Validate command - check record flags against the documented masks
//!
//! Prints the first violation and exits nonzero, or "clean".

use anyhow::{Context, Result};
use clap::Args;
use nether_bac::BacFile;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Args)]
pub struct ValidateArgs {
    /// BAC file to check
    pub file: PathBuf,
}

/// Execute the validate command
pub fn execute(args: ValidateArgs) -> Result<()> {
    let file = BacFile::load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    match file.validate() {
        Some(violation) => anyhow::bail!("{}: {}", args.file.display(), violation),
        None => {
            println!("{}: clean", args.file.display());
            Ok(())
        }
    }
}

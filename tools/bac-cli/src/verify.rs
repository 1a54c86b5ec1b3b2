//! Verify command - round-trip a file through the codec
//!
//! Parses the input, writes it back, and parses the output again. The
//! second write must byte-equal the first: whatever normalization the
//! writer applies (dropping dummy rows, upgrading mixed throw tables,
//! padding index gaps) has to reach a fixed point after one pass. The
//! input itself may legitimately differ from the canonical bytes.

use anyhow::{Context, Result};
use clap::Args;
use nether_bac::BacFile;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Args)]
pub struct VerifyArgs {
    /// BAC file to round-trip
    pub file: PathBuf,
}

/// Execute the verify command
pub fn execute(args: VerifyArgs) -> Result<()> {
    let input = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let parsed = BacFile::from_bytes(&input).context("First parse failed")?;
    let canonical = parsed.to_bytes().context("First write failed")?;
    let reparsed = BacFile::from_bytes(&canonical).context("Reparse of own output failed")?;
    let rewritten = reparsed.to_bytes().context("Second write failed")?;

    println!("=== Verify ===");
    println!("  File: {}", args.file.display());
    println!("  Input: {} bytes", input.len());
    println!("  Canonical: {} bytes", canonical.len());
    println!(
        "  Entries: {} ({} records)",
        parsed.entries.len(),
        parsed.record_count()
    );

    if rewritten != canonical {
        anyhow::bail!("Canonical output is not stable across a round trip");
    }
    if canonical == input {
        println!("  Round trip: byte-identical");
    } else {
        println!("  Round trip: stable (input was not in canonical form)");
    }

    Ok(())
}

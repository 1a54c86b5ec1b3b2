//! Layers command - preview editor lane assignment for one entry
//!
//! Runs the lane assignor on a copy of the entry and prints the result;
//! the file itself is never touched.

use anyhow::{Context, Result};
use clap::Args;
use nether_bac::{assign_layers, BacFile};
use std::path::PathBuf;

/// Arguments for the layers command
#[derive(Args)]
pub struct LayersArgs {
    /// BAC file to read
    pub file: PathBuf,

    /// Entry index to lay out
    pub entry: i32,
}

/// Execute the layers command
pub fn execute(args: LayersArgs) -> Result<()> {
    let file = BacFile::load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut entry = file
        .entry(args.entry)
        .with_context(|| format!("No entry {} in {}", args.entry, args.file.display()))?
        .clone();
    assign_layers(&mut entry);

    println!("=== Layers for entry {} ===", entry.index);
    for (kind, records) in entry.present_lists() {
        let lanes = records
            .iter()
            .map(|r| r.head().layer)
            .max()
            .map_or(0, |highest| highest + 1);
        println!("  {} ({} lanes)", kind.name(), lanes);
        for record in records {
            let head = record.head();
            println!(
                "    lane {}: [{}..{}] flags 0x{:08X}",
                head.layer,
                head.start_time,
                head.end_time(),
                head.flags
            );
        }
    }

    Ok(())
}

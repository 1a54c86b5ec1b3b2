//! Info command - summarize a BAC file's entries and records
//!
//! The default output is a per-entry table of record kinds, counts, and
//! time extents. `--json` dumps the whole model through serde instead,
//! which is handy for diffing two files or feeding a script.

use anyhow::{Context, Result};
use clap::Args;
use nether_bac::{timeline_end, BacFile, ENTRY_FLAG_EMPTY};
use std::path::PathBuf;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// BAC file to summarize
    pub file: PathBuf,

    /// Dump the whole model as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let file = BacFile::load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    }

    println!("=== BAC Info ===");
    println!("  File: {}", args.file.display());
    println!("  Entries: {}", file.entries.len());
    println!("  Records: {}", file.record_count());
    println!("  Global ints: {:?}", file.global_ints);
    println!("  Global floats: {:?}", file.global_floats);
    println!("  Global tail: {:?}", file.global_tail);

    let mut padding = 0usize;
    for entry in &file.entries {
        if entry.flags & ENTRY_FLAG_EMPTY != 0 && entry.is_empty() {
            padding += 1;
            continue;
        }
        println!();
        println!(
            "  Entry {}: {} records, {} frames",
            entry.index,
            entry.record_count(),
            timeline_end(entry.records())
        );
        if entry.flags != 0 {
            println!("    Flags: 0x{:08X}", entry.flags);
        }
        for (kind, records) in entry.present_lists() {
            let first = records
                .iter()
                .map(|r| r.head().start_time)
                .min()
                .unwrap_or(0);
            println!(
                "    {:<13} x{:<3} [{}..{}]",
                kind.name(),
                records.len(),
                first,
                timeline_end(records)
            );
        }
        for kind in entry.dummy_kinds() {
            println!("    {:<13} (declared, no records)", kind.name());
        }
    }
    if padding > 0 {
        println!();
        println!("  ({} padding entries omitted)", padding);
    }

    Ok(())
}

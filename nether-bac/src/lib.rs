//! Nether-BAC: BAC (Behavior/Action Container) codec for Nethercore
//!
//! This crate reads and writes the BAC binary format used by Nethercore's
//! fighting titles to describe character actions: for each action entry,
//! which effects fire on which frames - animations, hitboxes, movement,
//! sounds, camera work - as typed records on a shared timeline. It is the
//! format layer for authoring tools; nothing here simulates gameplay.
//!
//! # Key Features
//!
//! - **Closed catalog**: All 32 record kinds are modeled as one sum type,
//!   so a match over [`Record`] covers the whole format
//! - **Tolerant reader**: Legacy quirks (truncated movement tables, the
//!   two throw record revisions, declared-but-empty kinds) parse without
//!   errors
//! - **Canonical writer**: Equal models serialize to identical bytes,
//!   independent of entry insertion order
//! - **Timeline lanes**: The editor lane assignment used by timeline
//!   views ships with the codec, since its results feed back into record
//!   metadata
//!
//! # BAC Format Overview
//!
//! A BAC file contains:
//! - An 8-byte signature (magic + format generation)
//! - A 96-byte header with global character parameters
//! - An entry header table; each entry groups records for one action
//! - Per-entry sub-kind rows naming which record kinds are present
//! - Fixed-layout record tables, one per (entry, kind) pair
//!
//! See the `parser` module docs for exact byte layouts.
//!
//! # Usage
//!
//! ```ignore
//! use nether_bac::{BacFile, RecordKind, assign_layers, timeline_end};
//!
//! let mut file = BacFile::load(std::path::Path::new("ryu.bac")).unwrap();
//! println!("entries: {}", file.entries.len());
//!
//! for entry in &file.entries {
//!     let hitboxes = entry.records_of(RecordKind::Hitbox);
//!     println!(
//!         "entry {}: {} hitboxes, timeline ends at {}",
//!         entry.index,
//!         hitboxes.len(),
//!         timeline_end(entry.records()),
//!     );
//! }
//!
//! if let Some(report) = file.validate() {
//!     eprintln!("warning: {report}");
//! }
//!
//! // Lanes for a timeline view
//! if let Some(entry) = file.entry_mut(0) {
//!     assign_layers(entry);
//! }
//!
//! file.save(std::path::Path::new("ryu.bac")).unwrap();
//! ```

mod entry;
mod error;
mod file;
mod parser;
pub mod record;
mod timeline;
mod validate;
mod wire;

pub use entry::BacEntry;
pub use error::BacError;
pub use file::BacFile;
pub use parser::{parse_bac, write_bac};
pub use record::{Record, RecordHead, RecordKind, RecordSize};
pub use timeline::{assign_layers, reassign_record, spans_collide, timeline_end};

// =============================================================================
// Constants
// =============================================================================

/// BAC container magic
pub const BAC_MAGIC: &[u8; 4] = b"NCBC";

/// Format generation this codec reads and writes
pub const BAC_GENERATION: u16 = 0x0200;

/// Old generation still seen in the wild; rejected outright
pub const BAC_LEGACY_GENERATION: u16 = 0x0100;

/// Signature block size (magic + generation + reserved pad)
pub const SIGNATURE_SIZE: usize = 8;

/// Fixed header size; stored offsets count from the header start
pub const HEADER_SIZE: usize = 96;

/// Entry header stride in the entry table
pub const ENTRY_HEADER_SIZE: usize = 16;

/// Sub-kind row stride
pub const SUB_KIND_ROW_SIZE: usize = 16;

/// Entry flag bit marking writer-generated gap padding
pub const ENTRY_FLAG_EMPTY: u32 = 0x8000_0000;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(BAC_MAGIC, b"NCBC");
        assert_eq!(BAC_GENERATION, 0x0200);
        assert!(BAC_LEGACY_GENERATION < BAC_GENERATION);
        assert_eq!(SIGNATURE_SIZE + HEADER_SIZE, 104);
    }

    #[test]
    fn test_record_kind_count() {
        assert_eq!(RecordKind::COUNT, 32);
        assert_eq!(RecordKind::ALL.len(), RecordKind::COUNT);
    }
}

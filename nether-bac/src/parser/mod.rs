//! BAC binary parser and writer
//!
//! This module owns the byte-level view of a BAC container. It consists of:
//!
//! - `read` - Structural scan of the offset tables plus record dispatch
//! - `write` - Canonical three-pass serialization with offset back-patching
//! - `tests` - Byte-level fixtures for both directions
//!
//! # Container layout
//!
//! All integers are little-endian. Every stored offset is relative to the
//! end of the 8-byte signature, so absolute position = offset + 8.
//!
//! ```text
//! Signature (8 bytes):
//! 0x00: magic      4B  - "NCBC"
//! 0x04: generation u16 - 0x0200 (older 0x0100 files are rejected)
//! 0x06: reserved   u16
//!
//! Header (96 bytes):
//! 0x00: entry_count   i32
//! 0x04: reserved      i32
//! 0x08: entry_table   i32 - Offset of the entry header table (always 96)
//! 0x0C: reserved      i32 x2
//! 0x14: global_ints   i32 x3
//! 0x20: global_floats f32 x12
//! 0x50: global_tail   i32 x4
//!
//! Entry header (16 bytes each):
//! 0x00: flags      u32 - Bit 31 marks a gap-padding empty entry
//! 0x04: row_count  i16 - Sub-kind rows for this entry
//! 0x06: reserved   i16
//! 0x08: row_table  i32 - Offset of the entry's sub-kind rows
//! 0x0C: reserved   i32
//!
//! Sub-kind row (16 bytes each):
//! 0x00: kind     i16 - Record kind id, 0..=31
//! 0x02: count    i16 - Records in the table
//! 0x04: reserved i32
//! 0x08: offset   i32 - Record table offset; 0 marks a dummy row
//! 0x0C: reserved i32
//! ```
//!
//! # Canonical form
//!
//! The writer always produces the same bytes for equal models: entries
//! ascending by index with gaps padded by flagged empty entries, rows
//! ascending by kind id, record tables in row order, no padding between
//! sections. Two things parse back differently from how they went in:
//! dummy rows are not written out, and mixed-revision throw tables are
//! upgraded whole to the extended layout.

mod read;
mod write;


// Re-export public API
pub use read::parse_bac;
pub use write::write_bac;

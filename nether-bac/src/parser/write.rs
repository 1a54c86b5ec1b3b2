//! BAC file writing: canonical three-pass serialization
//!
//! Sections whose offsets are not known yet are written with placeholder
//! zeros and patched once the payload lands:
//!
//! 1. Entry headers, row-table offsets reserved
//! 2. Sub-kind rows (patching pass 1), record-table offsets reserved
//! 3. Record tables (patching pass 2)
//!
//! The caller's model is cloned before any normalization, so writing never
//! mutates what the editor holds.

use crate::entry::BacEntry;
use crate::error::BacError;
use crate::file::BacFile;
use crate::record::{Record, RecordKind};
use crate::wire::Writer;
use crate::{BAC_GENERATION, BAC_MAGIC, ENTRY_FLAG_EMPTY, HEADER_SIZE, SIGNATURE_SIZE};

/// Serialize a BAC container into its canonical byte form.
pub fn write_bac(file: &BacFile) -> Result<Vec<u8>, BacError> {
    // Colliding indices and record lists too long for a row's 16-bit count
    // are rejected before a single byte is emitted.
    let mut indices: Vec<i32> = file.entries.iter().map(|entry| entry.index).collect();
    indices.sort_unstable();
    if let Some(pair) = indices.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(BacError::DuplicateIndex(pair[0]));
    }
    for entry in &file.entries {
        for (kind, records) in entry.present_lists() {
            if records.len() > i16::MAX as usize {
                return Err(BacError::OversizedTable {
                    kind: kind.id(),
                    count: records.len(),
                });
            }
        }
    }

    let mut sorted = file.entries.clone();
    sorted.sort_by_key(|entry| entry.index);
    let dense = fill_gaps(sorted);

    let mut w = Writer::with_capacity(SIGNATURE_SIZE + HEADER_SIZE + dense.len() * 64);
    w.write_bytes(BAC_MAGIC);
    w.write_u16(BAC_GENERATION);
    w.write_u16(0);

    w.write_i32(dense.len() as i32);
    w.write_i32(0);
    // The entry header table always sits right after the 96-byte header.
    w.write_i32(HEADER_SIZE as i32);
    w.write_i32(0);
    w.write_i32(0);
    for v in file.global_ints {
        w.write_i32(v);
    }
    for v in file.global_floats {
        w.write_f32(v);
    }
    for v in file.global_tail {
        w.write_i32(v);
    }
    debug_assert_eq!(w.len(), SIGNATURE_SIZE + HEADER_SIZE);

    // Pass 1: entry headers. Row counts cover present kinds only; dummy
    // rows do not survive a rewrite.
    let mut entry_slots = Vec::with_capacity(dense.len());
    for entry in &dense {
        w.write_u32(entry.flags);
        w.write_i16(entry.present_lists().count() as i16);
        w.write_i16(0);
        entry_slots.push(w.reserve_i32());
        w.write_i32(0);
    }

    // Pass 2: sub-kind rows, ascending kind id per entry.
    let mut table_slots: Vec<(usize, RecordKind, &[Record])> = Vec::new();
    for (entry, slot) in dense.iter().zip(&entry_slots) {
        if entry.is_empty() {
            continue;
        }
        w.patch_i32(*slot, rel(w.len()));
        for (kind, records) in entry.present_lists() {
            w.write_i16(kind.id());
            w.write_i16(records.len() as i16);
            w.write_i32(0);
            table_slots.push((w.reserve_i32(), kind, records));
            w.write_i32(0);
        }
    }

    // Pass 3: record tables, in row order.
    for (slot, kind, records) in table_slots {
        w.patch_i32(slot, rel(w.len()));
        if kind == RecordKind::ThrowHandler {
            write_throw_table(records, &mut w);
        } else {
            for record in records {
                record.write(&mut w);
            }
        }
    }

    Ok(w.into_bytes())
}

/// Stored offsets are relative to the end of the signature.
fn rel(pos: usize) -> i32 {
    (pos - SIGNATURE_SIZE) as i32
}

/// Dense 0..=max entry run from sorted unique-index entries. Missing
/// indices become empty entries flagged [`ENTRY_FLAG_EMPTY`].
fn fill_gaps(sorted: Vec<BacEntry>) -> Vec<BacEntry> {
    let mut dense = Vec::with_capacity(sorted.len());
    for entry in sorted {
        while (dense.len() as i32) < entry.index {
            let mut pad = BacEntry::new(dense.len() as i32);
            pad.flags = ENTRY_FLAG_EMPTY;
            dense.push(pad);
        }
        dense.push(entry);
    }
    dense
}

/// The two throw revisions cannot share a table, and the parser infers the
/// revision from the table stride. A list that mixes both is written whole
/// in the extended layout, absent extensions padded with zeros.
fn write_throw_table(records: &[Record], w: &mut Writer) {
    let force_full = records
        .iter()
        .any(|record| matches!(record, Record::ThrowHandler(t) if t.extension.is_some()));
    for record in records {
        match record {
            Record::ThrowHandler(throw) if force_full => throw.write_full(w),
            _ => record.write(w),
        }
    }
}

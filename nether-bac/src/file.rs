//! BAC file model and load/save facade
//!
//! [`BacFile`] is the in-memory tree an editor works against: global header
//! parameters plus indexed entries. Byte-level concerns stay in the parser;
//! this type adds the entry bookkeeping (lookup, insertion, index reuse)
//! and the file-system convenience wrappers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::BacEntry;
use crate::error::BacError;
use crate::parser::{parse_bac, write_bac};
use crate::record::RecordKind;

/// A whole BAC container: header globals and every entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacFile {
    /// Header words at 0x14..0x20, meaning defined per title
    pub global_ints: [i32; 3],
    /// Header floats at 0x20..0x50 (walk speeds, scale factors, ...)
    pub global_floats: [f32; 12],
    /// Header words at 0x50..0x60
    pub global_tail: [i32; 4],
    /// Entries in file order; indices are unique but may have gaps
    pub entries: Vec<BacEntry>,
}

impl BacFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a BAC container from a byte buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BacError> {
        parse_bac(data)
    }

    /// Serialize to the canonical byte form.
    ///
    /// Equal models produce identical bytes; see the parser module notes on
    /// what normalization happens on the way out.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BacError> {
        write_bac(self)
    }

    /// Read and parse a BAC file from disk.
    pub fn load(path: &Path) -> Result<Self, BacError> {
        let data = std::fs::read(path)?;
        let file = Self::from_bytes(&data)?;
        log::debug!(
            "loaded BAC {}: {} entries, {} records",
            path.display(),
            file.entries.len(),
            file.record_count()
        );
        Ok(file)
    }

    /// Serialize and write to disk.
    pub fn save(&self, path: &Path) -> Result<(), BacError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        log::debug!("saved BAC {}: {} bytes", path.display(), bytes.len());
        Ok(())
    }

    /// Entry with the given index, if any.
    pub fn entry(&self, index: i32) -> Option<&BacEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Mutable entry with the given index, if any.
    pub fn entry_mut(&mut self, index: i32) -> Option<&mut BacEntry> {
        self.entries.iter_mut().find(|e| e.index == index)
    }

    /// Smallest non-negative index not taken by any entry.
    pub fn free_id(&self) -> i32 {
        let mut used: Vec<i32> = self.entries.iter().map(|e| e.index).collect();
        used.sort_unstable();
        let mut id = 0;
        for index in used {
            if index == id {
                id += 1;
            } else if index > id {
                break;
            }
        }
        id
    }

    /// Insert an entry at the given index, or at [`BacFile::free_id`] when
    /// none is given. An existing entry under that index is replaced
    /// wholesale, never merged. Returns the index used.
    pub fn insert_entry(&mut self, mut entry: BacEntry, index: Option<i32>) -> i32 {
        let index = index.unwrap_or_else(|| self.free_id());
        entry.index = index;
        match self.entry_mut(index) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        index
    }

    /// Insert a fresh entry seeded with one zeroed record of `kind`, so the
    /// new slot is visible in editors immediately. Returns the index used.
    pub fn insert_new(&mut self, kind: RecordKind, index: Option<i32>) -> i32 {
        let mut entry = BacEntry::new(0);
        entry.push_record(kind.default_record());
        self.insert_entry(entry, index)
    }

    /// Remove and return the entry with the given index.
    pub fn remove_entry(&mut self, index: i32) -> Option<BacEntry> {
        let position = self.entries.iter().position(|e| e.index == index)?;
        Some(self.entries.remove(position))
    }

    /// Total record count across all entries.
    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|e| e.record_count()).sum()
    }

    /// First undocumented-bit violation anywhere in the file, as
    /// `Kind.field = value` text. `None` means every checked field is clean.
    /// Diagnostic only; saving never runs this.
    pub fn validate(&self) -> Option<String> {
        crate::validate::first_violation(self)
    }
}

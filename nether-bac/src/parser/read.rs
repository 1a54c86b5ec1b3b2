//! BAC file reading: structural scan, then record dispatch
//!
//! Parsing runs in two phases. The structural scan walks the signature,
//! header, entry headers, and sub-kind rows without touching a single
//! record, collecting every record table offset on the way. Dispatch then
//! reads each table through the catalog, handing the throw-size inference
//! the global sorted offset list it needs.

use crate::entry::BacEntry;
use crate::error::BacError;
use crate::file::BacFile;
use crate::record::RecordKind;
use crate::wire::Reader;
use crate::{BAC_GENERATION, BAC_MAGIC, ENTRY_HEADER_SIZE, SIGNATURE_SIZE};

/// Sub-kind row after the structural scan. `offset` is absolute, with 0
/// standing for a dummy row.
struct RawRow {
    kind: RecordKind,
    count: usize,
    offset: usize,
}

struct RawEntry {
    flags: u32,
    rows: Vec<RawRow>,
}

/// Parse a BAC container from a byte buffer.
pub fn parse_bac(data: &[u8]) -> Result<BacFile, BacError> {
    if data.len() < BAC_MAGIC.len() || &data[..BAC_MAGIC.len()] != BAC_MAGIC {
        return Err(BacError::InvalidSignature);
    }
    let mut r = Reader::new(data, BAC_MAGIC.len());
    let generation = r.read_u16()?;
    if generation != BAC_GENERATION {
        return Err(BacError::UnsupportedGeneration(generation));
    }
    r.skip(2)?;

    let entry_count = r.read_i32()?;
    r.skip(4)?;
    let entry_table = r.read_i32()?;
    r.skip(8)?;
    let mut global_ints = [0i32; 3];
    for v in &mut global_ints {
        *v = r.read_i32()?;
    }
    let mut global_floats = [0f32; 12];
    for v in &mut global_floats {
        *v = r.read_f32()?;
    }
    let mut global_tail = [0i32; 4];
    for v in &mut global_tail {
        *v = r.read_i32()?;
    }

    let entry_count = usize::try_from(entry_count).unwrap_or(0);
    let entry_table = resolve_offset(entry_table, data.len())?;
    let raw_entries = scan_entries(data, entry_count, entry_table)?;

    // Global ascending offset list over every real record table. The gap to
    // the next offset is what disambiguates the two throw revisions.
    let mut table_offsets: Vec<usize> = raw_entries
        .iter()
        .flat_map(|entry| entry.rows.iter())
        .filter(|row| row.offset != 0)
        .map(|row| row.offset)
        .collect();
    table_offsets.sort_unstable();

    let mut entries = Vec::with_capacity(raw_entries.len());
    for (i, raw) in raw_entries.into_iter().enumerate() {
        let mut entry = BacEntry::new(i as i32);
        entry.flags = raw.flags;
        for row in raw.rows {
            if row.offset == 0 {
                entry.set_dummy(row.kind);
                continue;
            }
            let next_table = next_table_offset(&table_offsets, row.offset, data.len());
            let records = row.kind.read_table(data, row.offset, row.count, next_table)?;
            if records.is_empty() {
                // Storage was pointed at but zero records declared; treat it
                // like the offset-zero marker form.
                entry.set_dummy(row.kind);
            } else {
                entry.set_records(row.kind, records);
            }
        }
        entries.push(entry);
    }

    Ok(BacFile {
        global_ints,
        global_floats,
        global_tail,
        entries,
    })
}

/// Walk the entry header table and every sub-kind row table. No record
/// bytes are read here.
fn scan_entries(
    data: &[u8],
    count: usize,
    table_offset: usize,
) -> Result<Vec<RawEntry>, BacError> {
    let table_len = count
        .checked_mul(ENTRY_HEADER_SIZE)
        .ok_or(BacError::UnexpectedEof(data.len()))?;
    if table_offset
        .checked_add(table_len)
        .is_none_or(|end| end > data.len())
    {
        return Err(BacError::UnexpectedEof(data.len()));
    }

    let mut header = Reader::new(data, table_offset);
    let mut heads = Vec::with_capacity(count);
    for _ in 0..count {
        let flags = header.read_u32()?;
        let row_count = header.read_i16()?;
        header.skip(2)?;
        let row_table = header.read_i32()?;
        header.skip(4)?;
        heads.push((flags, row_count, row_table));
    }

    let mut raw_entries = Vec::with_capacity(count);
    for (flags, row_count, row_table) in heads {
        let row_count = usize::try_from(row_count).unwrap_or(0);
        let mut rows = Vec::with_capacity(row_count);
        if row_count > 0 {
            let mut rr = Reader::new(data, resolve_offset(row_table, data.len())?);
            for _ in 0..row_count {
                let kind_id = rr.read_i16()?;
                let kind = RecordKind::from_id(kind_id).ok_or(BacError::UnknownKind(kind_id))?;
                let record_count = rr.read_i16()?;
                rr.skip(4)?;
                let offset = rr.read_i32()?;
                rr.skip(4)?;
                let offset = if offset == 0 {
                    0
                } else {
                    resolve_offset(offset, data.len())?
                };
                rows.push(RawRow {
                    kind,
                    count: usize::try_from(record_count).unwrap_or(0),
                    offset,
                });
            }
        }
        raw_entries.push(RawEntry { flags, rows });
    }
    Ok(raw_entries)
}

/// Turn a stored signature-relative offset into an absolute one. Negative
/// offsets cannot point into the buffer, so they fail like a short read.
fn resolve_offset(offset: i32, data_len: usize) -> Result<usize, BacError> {
    match usize::try_from(offset) {
        Ok(rel) => Ok(SIGNATURE_SIZE + rel),
        Err(_) => Err(BacError::UnexpectedEof(data_len)),
    }
}

/// First table offset strictly after `offset`, or the buffer end for the
/// last table in the file.
fn next_table_offset(table_offsets: &[usize], offset: usize, data_len: usize) -> usize {
    let i = table_offsets.partition_point(|&o| o <= offset);
    table_offsets.get(i).copied().unwrap_or(data_len)
}

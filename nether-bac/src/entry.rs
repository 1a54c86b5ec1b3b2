//! BAC entry: one action's worth of record tables
//!
//! An entry groups records by kind. Each of the 32 catalog kinds occupies
//! one slot that is either absent, a dummy marker, or a non-empty record
//! list; a slot never holds a marker and records at once. Dummy markers
//! come from files whose sub-kind rows carry a zero table offset: the kind
//! was declared but no records were ever stored under it. They are kept in
//! the model so inspection tools can see them, but the writer does not
//! carry them back out.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum KindSlot {
    Absent,
    Dummy,
    Records(Vec<Record>),
}

/// One action: an indexed bundle of per-kind record tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacEntry {
    /// Entry index, unique within a file
    pub index: i32,
    /// Entry header flags; [`crate::ENTRY_FLAG_EMPTY`] marks gap padding
    pub flags: u32,
    kinds: [KindSlot; RecordKind::COUNT],
}

impl BacEntry {
    pub fn new(index: i32) -> Self {
        Self {
            index,
            flags: 0,
            kinds: std::array::from_fn(|_| KindSlot::Absent),
        }
    }

    fn slot(&self, kind: RecordKind) -> &KindSlot {
        &self.kinds[kind.index()]
    }

    fn slot_mut(&mut self, kind: RecordKind) -> &mut KindSlot {
        &mut self.kinds[kind.index()]
    }

    /// Records of one kind; empty when the slot is absent or a dummy.
    pub fn records_of(&self, kind: RecordKind) -> &[Record] {
        match self.slot(kind) {
            KindSlot::Records(records) => records,
            _ => &[],
        }
    }

    /// Mutable record list of one kind, if any records are present.
    pub fn records_of_mut(&mut self, kind: RecordKind) -> Option<&mut Vec<Record>> {
        match self.slot_mut(kind) {
            KindSlot::Records(records) => Some(records),
            _ => None,
        }
    }

    /// Replace the record list for a kind. An empty list clears the slot.
    /// Any dummy marker under the kind is overwritten.
    pub fn set_records(&mut self, kind: RecordKind, records: Vec<Record>) {
        debug_assert!(
            records.iter().all(|record| record.kind() == kind),
            "record list mixes kinds"
        );
        *self.slot_mut(kind) = if records.is_empty() {
            KindSlot::Absent
        } else {
            KindSlot::Records(records)
        };
    }

    /// Append a record to its own kind's list, replacing any dummy marker.
    pub fn push_record(&mut self, record: Record) {
        let slot = self.slot_mut(record.kind());
        match slot {
            KindSlot::Records(records) => records.push(record),
            _ => *slot = KindSlot::Records(vec![record]),
        }
    }

    /// Mark a kind as declared-but-record-free, dropping any records.
    pub fn set_dummy(&mut self, kind: RecordKind) {
        *self.slot_mut(kind) = KindSlot::Dummy;
    }

    /// Remove a kind's records or dummy marker entirely.
    pub fn clear_kind(&mut self, kind: RecordKind) {
        *self.slot_mut(kind) = KindSlot::Absent;
    }

    /// Whether the kind holds a dummy marker.
    pub fn is_dummy(&self, kind: RecordKind) -> bool {
        matches!(self.slot(kind), KindSlot::Dummy)
    }

    /// Kinds holding dummy markers, ascending.
    pub fn dummy_kinds(&self) -> impl Iterator<Item = RecordKind> + '_ {
        RecordKind::ALL
            .iter()
            .zip(&self.kinds)
            .filter_map(|(&kind, slot)| matches!(slot, KindSlot::Dummy).then_some(kind))
    }

    /// Kinds with at least one record, ascending.
    pub fn present_kinds(&self) -> impl Iterator<Item = RecordKind> + '_ {
        self.present_lists().map(|(kind, _)| kind)
    }

    /// Non-empty record lists with their kinds, ascending kind order.
    pub fn present_lists(&self) -> impl Iterator<Item = (RecordKind, &[Record])> + '_ {
        RecordKind::ALL
            .iter()
            .zip(&self.kinds)
            .filter_map(|(&kind, slot)| match slot {
                KindSlot::Records(records) if !records.is_empty() => {
                    Some((kind, records.as_slice()))
                }
                _ => None,
            })
    }

    /// Every record in the entry, ascending kind order then list order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.present_lists().flat_map(|(_, records)| records)
    }

    /// Mutable view of every record in the entry.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> + '_ {
        self.kinds
            .iter_mut()
            .filter_map(|slot| match slot {
                KindSlot::Records(records) => Some(records),
                _ => None,
            })
            .flatten()
    }

    /// Total record count across all kinds.
    pub fn record_count(&self) -> usize {
        self.present_lists().map(|(_, records)| records.len()).sum()
    }

    /// True when the entry holds no records. Dummy markers do not count as
    /// content, so a dummy-only entry is still empty.
    pub fn is_empty(&self) -> bool {
        self.present_lists().next().is_none()
    }
}

impl Default for BacEntry {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Hitbox, SoundCue};

    #[test]
    fn test_push_record_replaces_dummy() {
        let mut entry = BacEntry::new(0);
        entry.set_dummy(RecordKind::Hitbox);
        assert!(entry.is_dummy(RecordKind::Hitbox));
        assert!(entry.is_empty());

        entry.push_record(Record::Hitbox(Hitbox::default()));
        assert!(!entry.is_dummy(RecordKind::Hitbox));
        assert_eq!(entry.records_of(RecordKind::Hitbox).len(), 1);
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_set_dummy_drops_records() {
        let mut entry = BacEntry::new(0);
        entry.push_record(Record::SoundCue(SoundCue::default()));
        entry.set_dummy(RecordKind::SoundCue);
        assert!(entry.is_dummy(RecordKind::SoundCue));
        assert!(entry.records_of(RecordKind::SoundCue).is_empty());
    }

    #[test]
    fn test_iteration_order_is_ascending_kind() {
        let mut entry = BacEntry::new(3);
        entry.push_record(Record::SoundCue(SoundCue::default()));
        entry.push_record(Record::Hitbox(Hitbox::default()));
        entry.push_record(Record::Hitbox(Hitbox::default()));
        entry.set_dummy(RecordKind::Rumble);

        let kinds: Vec<RecordKind> = entry.present_kinds().collect();
        assert_eq!(kinds, vec![RecordKind::Hitbox, RecordKind::SoundCue]);
        assert_eq!(entry.record_count(), 3);
        assert_eq!(
            entry.dummy_kinds().collect::<Vec<_>>(),
            vec![RecordKind::Rumble]
        );

        let record_kinds: Vec<RecordKind> = entry.records().map(|r| r.kind()).collect();
        assert_eq!(
            record_kinds,
            vec![
                RecordKind::Hitbox,
                RecordKind::Hitbox,
                RecordKind::SoundCue
            ]
        );
    }

    #[test]
    fn test_empty_list_clears_slot() {
        let mut entry = BacEntry::new(0);
        entry.set_records(RecordKind::Hitbox, vec![Record::Hitbox(Hitbox::default())]);
        assert!(!entry.is_empty());
        entry.set_records(RecordKind::Hitbox, Vec::new());
        assert!(entry.is_empty());
        assert!(!entry.is_dummy(RecordKind::Hitbox));
    }
}

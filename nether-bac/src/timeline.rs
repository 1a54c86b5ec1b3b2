//! Editor timeline lanes
//!
//! Timeline views draw each record of a kind group as a bar on a horizontal
//! lane. Records whose spans would overlap visually get different lanes;
//! records that coexist fine share one. Assignment is greedy in list order
//! and runs in tiered passes so related records cluster: a later tier
//! starts below every lane the previous tier used (when that tier placed
//! anything at all).
//!
//! For animation records the tiers are blend slots: full-body first, then
//! face, then everything else. For every other kind they are the head flag
//! values: the unflagged group first, then `flags == 1`, then `flags == 2`.
//!
//! Lanes are an editor aid only. They are computed on demand, never stored
//! in the file, and a record's lane is -1 until assigned.

use crate::entry::BacEntry;
use crate::record::{Animation, Record, RecordKind};

/// Lane-sharing test between a placed span `a` and a candidate starting at
/// `b_start`.
///
/// Half-open: a span ending exactly at `b_start` does not collide. Only
/// the candidate's start is consulted, so a candidate that began before
/// `a` and merely overlaps it may still share the lane. Both callers pass
/// the already-placed record as `a`.
pub fn spans_collide(a_start: i32, a_duration: i32, b_start: i32) -> bool {
    let a_end = a_start.saturating_add(a_duration);
    if b_start >= a_start && b_start < a_end {
        return true;
    }
    a_start < b_start && a_end > b_start
}

/// Recompute lanes for every record group in the entry.
///
/// Each kind gets its own lane space starting at 0; layers are only
/// comparable between records of the same kind.
pub fn assign_layers(entry: &mut BacEntry) {
    for kind in RecordKind::ALL {
        if let Some(records) = entry.records_of_mut(kind) {
            assign_group(records, kind);
        }
    }
}

/// Re-place a single record after an edit, leaving the rest of its group
/// alone. Tier floors are ignored: the record lands on the lowest free
/// lane. Out-of-range indices are a no-op.
pub fn reassign_record(entry: &mut BacEntry, kind: RecordKind, index: usize) {
    let Some(records) = entry.records_of_mut(kind) else {
        return;
    };
    if index >= records.len() {
        return;
    }
    let lane = free_lane(records, index, 0);
    records[index].head_mut().layer = lane;
}

/// Last active frame over a set of records: the maximum `end_time`, or 0
/// when there are no records.
pub fn timeline_end<'a, I>(records: I) -> i32
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|record| record.head().end_time())
        .max()
        .unwrap_or(0)
}

fn assign_group(records: &mut [Record], kind: RecordKind) {
    for record in records.iter_mut() {
        record.head_mut().layer = -1;
    }
    if kind == RecordKind::Animation {
        let base = run_pass(records, 0, |record| {
            matches!(record, Record::Animation(a) if a.slot == Animation::SLOT_FULL_BODY)
        });
        let base = run_pass(records, base, |record| {
            matches!(record, Record::Animation(a) if a.slot == Animation::SLOT_FACE)
        });
        run_pass(records, base, |record| {
            !matches!(
                record,
                Record::Animation(a)
                    if a.slot == Animation::SLOT_FULL_BODY || a.slot == Animation::SLOT_FACE
            )
        });
    } else {
        let base = run_pass(records, 0, |record| {
            let flags = record.head().flags;
            flags != 1 && flags != 2
        });
        let base = run_pass(records, base, |record| record.head().flags == 1);
        run_pass(records, base, |record| record.head().flags == 2);
    }
}

/// Place every selected record on the lowest free lane at or above `base`,
/// in list order. Returns the next tier's base: one past the highest lane
/// used, or `base` unchanged when the pass placed nothing.
fn run_pass<F>(records: &mut [Record], base: i32, select: F) -> i32
where
    F: Fn(&Record) -> bool,
{
    let mut highest: Option<i32> = None;
    for i in 0..records.len() {
        if !select(&records[i]) {
            continue;
        }
        let lane = free_lane(records, i, base);
        records[i].head_mut().layer = lane;
        highest = Some(highest.map_or(lane, |h| h.max(lane)));
    }
    match highest {
        Some(h) => h + 1,
        None => base,
    }
}

/// Lowest lane at or above `floor` where `records[candidate]` collides with
/// no already-placed record. Unplaced records (layer -1) never block.
fn free_lane(records: &[Record], candidate: usize, floor: i32) -> i32 {
    let start = records[candidate].head().start_time;
    let mut lane = floor;
    loop {
        let taken = records.iter().enumerate().any(|(j, other)| {
            j != candidate
                && other.head().layer == lane
                && spans_collide(other.head().start_time, other.head().duration, start)
        });
        if !taken {
            return lane;
        }
        lane += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Gravity, Hitbox, RecordHead};

    fn hitbox(start_time: i32, duration: i32) -> Record {
        Record::Hitbox(Hitbox {
            head: RecordHead {
                start_time,
                duration,
                ..RecordHead::default()
            },
            ..Hitbox::default()
        })
    }

    fn gravity(start_time: i32, duration: i32, flags: u32) -> Record {
        Record::Gravity(Gravity {
            head: RecordHead {
                start_time,
                duration,
                flags,
                ..RecordHead::default()
            },
            ..Gravity::default()
        })
    }

    fn animation(start_time: i32, duration: i32, slot: u16) -> Record {
        Record::Animation(Animation {
            head: RecordHead {
                start_time,
                duration,
                ..RecordHead::default()
            },
            slot,
            ..Animation::default()
        })
    }

    fn layers(entry: &BacEntry, kind: RecordKind) -> Vec<i32> {
        entry
            .records_of(kind)
            .iter()
            .map(|record| record.head().layer)
            .collect()
    }

    #[test]
    fn test_spans_collide_boundaries() {
        // Placed span covers frames 10..15.
        assert!(spans_collide(10, 5, 10));
        assert!(spans_collide(10, 5, 12));
        assert!(spans_collide(10, 5, 14));
        // Half-open: starting exactly at the end is fine.
        assert!(!spans_collide(10, 5, 15));
        assert!(!spans_collide(10, 5, 20));
    }

    #[test]
    fn test_spans_collide_is_asymmetric() {
        // Candidate starting before the placed span shares the lane even
        // though the intervals overlap...
        assert!(!spans_collide(10, 5, 8));
        // ...while the same two spans with roles swapped collide.
        assert!(spans_collide(8, 5, 10));
    }

    #[test]
    fn test_zero_duration_span_blocks_nothing() {
        assert!(!spans_collide(10, 0, 10));
    }

    #[test]
    fn test_assign_layers_stacks_overlaps() {
        let mut entry = BacEntry::new(0);
        entry.push_record(hitbox(0, 10));
        entry.push_record(hitbox(5, 5));
        entry.push_record(hitbox(10, 5));
        assign_layers(&mut entry);
        // Third record starts exactly where the first ends, so it reuses
        // lane 0; the second overlaps and spills to lane 1.
        assert_eq!(layers(&entry, RecordKind::Hitbox), vec![0, 1, 0]);
    }

    #[test]
    fn test_flag_tiers_get_separate_floors() {
        let mut entry = BacEntry::new(0);
        entry.push_record(gravity(0, 5, 0));
        entry.push_record(gravity(20, 5, 1));
        entry.push_record(gravity(40, 5, 2));
        assign_layers(&mut entry);
        // No spans overlap, yet each tier starts below the previous one.
        assert_eq!(layers(&entry, RecordKind::Gravity), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_tier_does_not_advance_base() {
        let mut entry = BacEntry::new(0);
        entry.push_record(gravity(0, 5, 2));
        assign_layers(&mut entry);
        // Tiers for unflagged and flags==1 records place nothing, so the
        // flags==2 tier still starts at lane 0.
        assert_eq!(layers(&entry, RecordKind::Gravity), vec![0]);
    }

    #[test]
    fn test_animation_slots_are_tiers() {
        let mut entry = BacEntry::new(0);
        entry.push_record(animation(0, 10, Animation::SLOT_UPPER_BODY));
        entry.push_record(animation(0, 10, Animation::SLOT_FULL_BODY));
        entry.push_record(animation(0, 10, Animation::SLOT_FACE));
        assign_layers(&mut entry);
        // Full-body first, then face, then the rest, regardless of list
        // order.
        assert_eq!(layers(&entry, RecordKind::Animation), vec![2, 0, 1]);
    }

    #[test]
    fn test_kinds_have_independent_lane_spaces() {
        let mut entry = BacEntry::new(0);
        entry.push_record(hitbox(0, 10));
        entry.push_record(gravity(0, 10, 0));
        assign_layers(&mut entry);
        assert_eq!(layers(&entry, RecordKind::Hitbox), vec![0]);
        assert_eq!(layers(&entry, RecordKind::Gravity), vec![0]);
    }

    #[test]
    fn test_reassign_single_record() {
        let mut entry = BacEntry::new(0);
        entry.push_record(hitbox(0, 10));
        entry.push_record(hitbox(0, 10));
        assign_layers(&mut entry);
        assert_eq!(layers(&entry, RecordKind::Hitbox), vec![0, 1]);

        // Move the second record past the first; it drops back to lane 0.
        let records = entry.records_of_mut(RecordKind::Hitbox).unwrap();
        records[1].head_mut().start_time = 50;
        reassign_record(&mut entry, RecordKind::Hitbox, 1);
        assert_eq!(layers(&entry, RecordKind::Hitbox), vec![0, 0]);

        // Out-of-range index changes nothing.
        reassign_record(&mut entry, RecordKind::Hitbox, 9);
        assert_eq!(layers(&entry, RecordKind::Hitbox), vec![0, 0]);
    }

    #[test]
    fn test_reassign_ignores_tier_floors() {
        let mut entry = BacEntry::new(0);
        entry.push_record(gravity(0, 5, 0));
        entry.push_record(gravity(20, 5, 2));
        assign_layers(&mut entry);
        // Full assignment keeps the flagged record below the unflagged
        // tier even though the spans never overlap.
        assert_eq!(layers(&entry, RecordKind::Gravity), vec![0, 1]);

        // Single-record reassignment knows no tier floor: lowest free lane
        // wins.
        reassign_record(&mut entry, RecordKind::Gravity, 1);
        assert_eq!(layers(&entry, RecordKind::Gravity), vec![0, 0]);
    }

    #[test]
    fn test_timeline_end() {
        let mut entry = BacEntry::new(0);
        assert_eq!(timeline_end(entry.records()), 0);
        entry.push_record(hitbox(0, 30));
        entry.push_record(hitbox(20, 5));
        assert_eq!(timeline_end(entry.records()), 30);
    }

    #[test]
    fn test_extreme_duration_saturates() {
        // A span reaching past i32::MAX clamps there instead of wrapping.
        let mut entry = BacEntry::new(0);
        entry.push_record(hitbox(1, i32::MAX));
        entry.push_record(hitbox(10, i32::MAX));
        assign_layers(&mut entry);
        assert_eq!(layers(&entry, RecordKind::Hitbox), vec![0, 1]);
        assert_eq!(timeline_end(entry.records()), i32::MAX);
    }
}

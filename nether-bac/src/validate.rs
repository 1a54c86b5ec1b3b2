//! Undocumented-bit validation
//!
//! Flag words in the format carry a handful of documented bits each; the
//! rest have been observed as garbage left behind by old authoring tools.
//! This pass walks every record in file order and reports the first flag
//! field with a set bit outside its documented mask. It is purely
//! diagnostic: nothing here blocks loading or saving, and undocumented
//! bits still round-trip untouched.

use crate::file::BacFile;
use crate::record::{Record, RecordHead, RecordKind};

/// Documented-mask rule for one kind-specific flag field.
struct FlagRule {
    kind: RecordKind,
    field: &'static str,
    mask: u32,
    value: fn(&Record) -> u32,
}

/// Kind-specific flag fields and their documented masks. The common head
/// flags are checked for every record before these apply.
static FLAG_RULES: &[FlagRule] = &[
    FlagRule {
        kind: RecordKind::Animation,
        field: "slot",
        mask: 0x0003,
        value: |r| match r {
            Record::Animation(x) => u32::from(x.slot),
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Transition,
        field: "condition",
        mask: 0x0007,
        value: |r| match r {
            Record::Transition(x) => x.condition,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Cancel,
        field: "window",
        mask: 0x0003,
        value: |r| match r {
            Record::Cancel(x) => x.window,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Hitbox,
        field: "hit_level",
        mask: 0x0007,
        value: |r| match r {
            Record::Hitbox(x) => x.hit_level,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Hurtbox,
        field: "guard_flags",
        mask: 0x0007,
        value: |r| match r {
            Record::Hurtbox(x) => x.guard_flags,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Invincibility,
        field: "body_parts",
        mask: 0x001F,
        value: |r| match r {
            Record::Invincibility(x) => x.body_parts,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Invincibility,
        field: "invuln_kind",
        mask: 0x0003,
        value: |r| match r {
            Record::Invincibility(x) => x.invuln_kind,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::SuperArmor,
        field: "armor_flags",
        mask: 0x0003,
        value: |r| match r {
            Record::SuperArmor(x) => x.armor_flags,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Counter,
        field: "counter_kind",
        mask: 0x0003,
        value: |r| match r {
            Record::Counter(x) => x.counter_kind,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Status,
        field: "status_bits",
        mask: 0x000F,
        value: |r| match r {
            Record::Status(x) => x.status_bits,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::MeterGain,
        field: "target",
        mask: 0x0001,
        value: |r| match r {
            Record::MeterGain(x) => x.target,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Visibility,
        field: "visible",
        mask: 0x0001,
        value: |r| match r {
            Record::Visibility(x) => x.visible,
            _ => 0,
        },
    },
    FlagRule {
        kind: RecordKind::Rumble,
        field: "motor",
        mask: 0x0001,
        value: |r| match r {
            Record::Rumble(x) => x.motor,
            _ => 0,
        },
    },
];

/// First flag field holding undocumented bits, scanning entries in file
/// order, kinds ascending, records in list order.
pub(crate) fn first_violation(file: &BacFile) -> Option<String> {
    for entry in &file.entries {
        for (kind, records) in entry.present_lists() {
            for record in records {
                let flags = record.head().flags;
                if flags & !RecordHead::FLAG_MASK != 0 {
                    return Some(violation(kind, "flags", flags, RecordHead::FLAG_MASK));
                }
                for rule in FLAG_RULES.iter().filter(|rule| rule.kind == kind) {
                    let value = (rule.value)(record);
                    if value & !rule.mask != 0 {
                        return Some(violation(kind, rule.field, value, rule.mask));
                    }
                }
            }
        }
    }
    None
}

fn violation(kind: RecordKind, field: &str, value: u32, mask: u32) -> String {
    format!(
        "{}.{} = 0x{:08X} (undocumented bits 0x{:08X})",
        kind.name(),
        field,
        value,
        value & !mask
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::BacEntry;
    use crate::record::{Animation, Hitbox, Invincibility, SoundCue};

    fn file_with(records: Vec<Record>) -> BacFile {
        let mut entry = BacEntry::new(0);
        for record in records {
            entry.push_record(record);
        }
        let mut file = BacFile::new();
        file.insert_entry(entry, Some(0));
        file
    }

    #[test]
    fn test_clean_file_passes() {
        let file = file_with(vec![
            RecordKind::Animation.default_record(),
            RecordKind::Hitbox.default_record(),
            RecordKind::ThrowHandler.default_record(),
        ]);
        assert_eq!(first_violation(&file), None);
    }

    #[test]
    fn test_documented_bits_pass() {
        let invuln = Invincibility {
            body_parts: 0x1F,
            invuln_kind: 0x3,
            ..Invincibility::default()
        };
        let anim = Animation {
            head: RecordHead {
                flags: 0x3,
                ..RecordHead::default()
            },
            slot: Animation::SLOT_ADDITIVE,
            ..Animation::default()
        };
        let file = file_with(vec![
            Record::Invincibility(invuln),
            Record::Animation(anim),
        ]);
        assert_eq!(first_violation(&file), None);
    }

    #[test]
    fn test_head_flag_violation() {
        let cue = SoundCue {
            head: RecordHead {
                flags: 0x10,
                ..RecordHead::default()
            },
            ..SoundCue::default()
        };
        let file = file_with(vec![Record::SoundCue(cue)]);
        let report = first_violation(&file).unwrap();
        assert_eq!(
            report,
            "SoundCue.flags = 0x00000010 (undocumented bits 0x00000010)"
        );
    }

    #[test]
    fn test_kind_rule_violation() {
        let anim = Animation {
            slot: 7,
            ..Animation::default()
        };
        let file = file_with(vec![Record::Animation(anim)]);
        let report = first_violation(&file).unwrap();
        assert_eq!(
            report,
            "Animation.slot = 0x00000007 (undocumented bits 0x00000004)"
        );
    }

    #[test]
    fn test_mask_boundary() {
        let invuln = Invincibility {
            body_parts: 0x20,
            ..Invincibility::default()
        };
        let file = file_with(vec![Record::Invincibility(invuln)]);
        let report = first_violation(&file).unwrap();
        assert!(report.starts_with("Invincibility.body_parts"));
    }

    #[test]
    fn test_first_violation_wins() {
        // Entry 0 carries a hit_level violation, entry 1 a head flag one;
        // the earlier entry is reported.
        let hitbox = Hitbox {
            hit_level: 0x8,
            ..Hitbox::default()
        };
        let cue = SoundCue {
            head: RecordHead {
                flags: 0xFF,
                ..RecordHead::default()
            },
            ..SoundCue::default()
        };

        let mut file = BacFile::new();
        let mut first = BacEntry::new(0);
        first.push_record(Record::Hitbox(hitbox));
        file.insert_entry(first, Some(0));
        let mut second = BacEntry::new(1);
        second.push_record(Record::SoundCue(cue));
        file.insert_entry(second, Some(1));

        let report = first_violation(&file).unwrap();
        assert!(report.starts_with("Hitbox.hit_level"), "{report}");
    }
}

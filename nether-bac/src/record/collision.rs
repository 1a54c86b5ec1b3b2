//! Collision and defense record kinds: attack/vulnerable/push volumes,
//! invincibility, armor, counters, guard behavior, and knockback.
//!
//! Box volumes are spheres or extruded boxes in character-local space,
//! x right, y up, z forward, units in world meters.

use serde::{Deserialize, Serialize};

use crate::error::BacError;
use crate::wire::{Reader, Writer};

use super::RecordHead;

/// Strike collision volume (kind 3, 44 bytes).
///
/// # Layout
/// ```text
/// 0x00: head      16B
/// 0x10: x         f32 - Sphere center, character-local
/// 0x14: y         f32
/// 0x18: z         f32
/// 0x1C: radius    f32
/// 0x20: damage    i32 - Health removed on hit
/// 0x24: stun      i32 - Hitstun frames inflicted
/// 0x28: hit_level u32 - High/mid/low flags (documented mask 0x0007)
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hitbox {
    pub head: RecordHead,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    /// Health removed on hit
    pub damage: i32,
    /// Hitstun frames inflicted
    pub stun: i32,
    /// High/mid/low flags
    pub hit_level: u32,
}

impl Hitbox {
    pub const SIZE: usize = 44;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            x: r.read_f32()?,
            y: r.read_f32()?,
            z: r.read_f32()?,
            radius: r.read_f32()?,
            damage: r.read_i32()?,
            stun: r.read_i32()?,
            hit_level: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
        w.write_f32(self.radius);
        w.write_i32(self.damage);
        w.write_i32(self.stun);
        w.write_u32(self.hit_level);
    }
}

/// Vulnerable collision volume (kind 4, 40 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hurtbox {
    pub head: RecordHead,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    /// Hits absorbed before the volume breaks, 0 = fragile
    pub armor_hits: i32,
    /// Which guard states protect this volume (documented mask 0x0007)
    pub guard_flags: u32,
}

impl Hurtbox {
    pub const SIZE: usize = 40;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            x: r.read_f32()?,
            y: r.read_f32()?,
            z: r.read_f32()?,
            radius: r.read_f32()?,
            armor_hits: r.read_i32()?,
            guard_flags: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
        w.write_f32(self.radius);
        w.write_i32(self.armor_hits);
        w.write_u32(self.guard_flags);
    }
}

/// Body push volume keeping characters apart (kind 5, 36 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pushbox {
    pub head: RecordHead,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
}

impl Pushbox {
    pub const SIZE: usize = 36;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            x: r.read_f32()?,
            y: r.read_f32()?,
            z: r.read_f32()?,
            width: r.read_f32()?,
            height: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
        w.write_f32(self.width);
        w.write_f32(self.height);
    }
}

/// Invincibility grant (kind 6, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Invincibility {
    pub head: RecordHead,
    /// Protected body part flags (documented mask 0x001F)
    pub body_parts: u32,
    /// What the grant protects against (documented mask 0x0003)
    pub invuln_kind: u32,
}

impl Invincibility {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            body_parts: r.read_u32()?,
            invuln_kind: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_u32(self.body_parts);
        w.write_u32(self.invuln_kind);
    }
}

/// Hit absorption without flinching (kind 7, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuperArmor {
    pub head: RecordHead,
    /// Hits absorbed before the armor breaks
    pub absorb_hits: i32,
    /// Armor behavior flags (documented mask 0x0003)
    pub armor_flags: u32,
}

impl SuperArmor {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            absorb_hits: r.read_i32()?,
            armor_flags: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.absorb_hits);
        w.write_u32(self.armor_flags);
    }
}

/// Counter-hit trap (kind 8, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Counter {
    pub head: RecordHead,
    /// What triggers the counter (documented mask 0x0003)
    pub counter_kind: u32,
    /// Entry to branch to when the counter fires
    pub response_entry: i32,
}

impl Counter {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            counter_kind: r.read_u32()?,
            response_entry: r.read_i32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_u32(self.counter_kind);
        w.write_i32(self.response_entry);
    }
}

/// Guard behavior while blocking (kind 11, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Guard {
    pub head: RecordHead,
    /// Damage taken through a successful block
    pub chip_damage: i32,
    /// Pushback distance applied to the blocker
    pub pushback: f32,
}

impl Guard {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            chip_damage: r.read_i32()?,
            pushback: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.chip_damage);
        w.write_f32(self.pushback);
    }
}

/// Knockback applied to the opponent on hit (kind 26, 32 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Knockback {
    pub head: RecordHead,
    pub force_x: f32,
    pub force_y: f32,
    pub force_z: f32,
    /// Hitstop frames both characters freeze for
    pub hitstop: i32,
}

impl Knockback {
    pub const SIZE: usize = 32;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            force_x: r.read_f32()?,
            force_y: r.read_f32()?,
            force_z: r.read_f32()?,
            hitstop: r.read_i32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_f32(self.force_x);
        w.write_f32(self.force_y);
        w.write_f32(self.force_z);
        w.write_i32(self.hitstop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_roundtrip() {
        let hitbox = Hitbox {
            head: RecordHead {
                start_time: 6,
                duration: 4,
                flags: 0,
                reserved: 0xDEAD_BEEF,
                layer: -1,
            },
            x: 0.3,
            y: 1.2,
            z: 0.8,
            radius: 0.25,
            damage: 90,
            stun: 14,
            hit_level: 0x2,
        };
        let mut w = Writer::with_capacity(Hitbox::SIZE);
        hitbox.write(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), Hitbox::SIZE);

        let back = Hitbox::read(&mut Reader::new(&bytes, 0)).unwrap();
        assert_eq!(back, hitbox);
        // The undocumented head word survives the trip untouched.
        assert_eq!(back.head.reserved, 0xDEAD_BEEF);
    }

    #[test]
    fn test_truncated_hitbox_fails() {
        let mut w = Writer::with_capacity(Hitbox::SIZE);
        Hitbox::default().write(&mut w);
        let mut bytes = w.into_bytes();
        bytes.truncate(Hitbox::SIZE - 2);
        assert!(Hitbox::read(&mut Reader::new(&bytes, 0)).is_err());
    }
}

//! Motion and interaction record kinds: character movement, gravity,
//! projectiles, throws, target locking, and input windows.

use serde::{Deserialize, Serialize};

use crate::error::BacError;
use crate::wire::{Reader, Writer};

use super::{RecordHead, decode_angle, encode_angle};

/// Velocity and acceleration applied while active (kind 9, 40 bytes).
///
/// # Layout
/// ```text
/// 0x00: head    16B
/// 0x10: vel_x   f32 - Initial velocity, character-local, per frame
/// 0x14: vel_y   f32
/// 0x18: vel_z   f32
/// 0x1C: accel_x f32 - Per-frame velocity delta
/// 0x20: accel_y f32
/// 0x24: accel_z f32
/// ```
///
/// Old authoring exports truncated the last movement table mid-record. The
/// head is still required, but any missing payload field reads as zero so
/// those files keep loading.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub head: RecordHead,
    pub vel_x: f32,
    pub vel_y: f32,
    pub vel_z: f32,
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,
}

impl Movement {
    pub const SIZE: usize = 40;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        let head = RecordHead::read(r)?;
        if r.remaining() < Self::SIZE - RecordHead::SIZE {
            log::warn!(
                "movement record truncated at offset {}; missing fields read as zero",
                r.pos()
            );
        }
        Ok(Self {
            head,
            vel_x: r.read_f32_or_zero(),
            vel_y: r.read_f32_or_zero(),
            vel_z: r.read_f32_or_zero(),
            accel_x: r.read_f32_or_zero(),
            accel_y: r.read_f32_or_zero(),
            accel_z: r.read_f32_or_zero(),
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_f32(self.vel_x);
        w.write_f32(self.vel_y);
        w.write_f32(self.vel_z);
        w.write_f32(self.accel_x);
        w.write_f32(self.accel_y);
        w.write_f32(self.accel_z);
    }
}

/// Gravity override (kind 10, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Gravity {
    pub head: RecordHead,
    /// Multiplier on the character's base gravity, 1.0 = unchanged
    pub scale: f32,
    /// Falling speed cap, 0.0 = no cap
    pub terminal_velocity: f32,
}

impl Gravity {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            scale: r.read_f32()?,
            terminal_velocity: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_f32(self.scale);
        w.write_f32(self.terminal_velocity);
    }
}

/// Projectile launch (kind 16, 32 bytes).
///
/// `angle` is degrees in the model and radians on disk, converted on the
/// way through like every angle field in the format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Projectile {
    pub head: RecordHead,
    /// Projectile archetype id
    pub projectile_id: i32,
    /// Spawn position, character-local
    pub x: f32,
    pub y: f32,
    /// Launch elevation in degrees
    pub angle: f32,
}

impl Projectile {
    pub const SIZE: usize = 32;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            projectile_id: r.read_i32()?,
            x: r.read_f32()?,
            y: r.read_f32()?,
            angle: decode_angle(r.read_f32()?),
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.projectile_id);
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(encode_angle(self.angle));
    }
}

/// Fields only present in the 32-byte throw revision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThrowExtension {
    /// Grab reach in meters
    pub range: f32,
    /// Frames the victim may mash out, 0 = inescapable
    pub escape_window: i32,
    /// Animation entry forced onto the victim
    pub opponent_anim: i32,
}

/// Throw connect handler (kind 17, 20 or 32 bytes).
///
/// The only kind with two on-disk lengths: the original 20-byte layout and
/// a later one that appends [`ThrowExtension`]. Nothing in the record marks
/// the revision; the parser infers it from the table's byte span. A table
/// that mixes both revisions in memory is written whole in the extended
/// layout (absent extensions become zeros) so the output stays parseable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThrowHandler {
    pub head: RecordHead,
    /// Throw archetype id
    pub throw_id: i32,
    /// Present only for the extended revision
    pub extension: Option<ThrowExtension>,
}

impl ThrowHandler {
    /// Original revision length.
    pub const SIZE_LEGACY: usize = 20;
    /// Extended revision length.
    pub const SIZE_FULL: usize = 32;

    pub(crate) fn read(r: &mut Reader<'_>, extended: bool) -> Result<Self, BacError> {
        let head = RecordHead::read(r)?;
        let throw_id = r.read_i32()?;
        let extension = if extended {
            Some(ThrowExtension {
                range: r.read_f32()?,
                escape_window: r.read_i32()?,
                opponent_anim: r.read_i32()?,
            })
        } else {
            None
        };
        Ok(Self {
            head,
            throw_id,
            extension,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.throw_id);
        if let Some(ext) = &self.extension {
            w.write_f32(ext.range);
            w.write_i32(ext.escape_window);
            w.write_i32(ext.opponent_anim);
        }
    }

    /// Write in the extended layout even when the extension is absent.
    pub(crate) fn write_full(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.throw_id);
        let ext = self.extension.unwrap_or_default();
        w.write_f32(ext.range);
        w.write_i32(ext.escape_window);
        w.write_i32(ext.opponent_anim);
    }
}

/// Soft-lock onto the opponent (kind 18, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetLock {
    pub head: RecordHead,
    /// Bone the lock steers, -1 = whole body
    pub bone: i32,
    /// Steering strength, 0.0..=1.0
    pub strength: f32,
}

impl TargetLock {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            bone: r.read_i32()?,
            strength: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.bone);
        w.write_f32(self.strength);
    }
}

/// Input buffer window for follow-ups (kind 24, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputWindow {
    pub head: RecordHead,
    /// Command list id accepted during the window
    pub command_id: i32,
    /// Frames an early input stays buffered
    pub buffer_frames: i32,
}

impl InputWindow {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            command_id: r.read_i32()?,
            buffer_frames: r.read_i32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.command_id);
        w.write_i32(self.buffer_frames);
    }
}

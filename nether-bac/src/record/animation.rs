//! Animation-control record kinds: clip playback, entry transitions, cancel
//! windows, and playback speed.

use serde::{Deserialize, Serialize};

use crate::error::BacError;
use crate::wire::{Reader, Writer};

use super::RecordHead;

/// Skeletal animation playback (kind 0, 28 bytes).
///
/// # Layout
/// ```text
/// 0x00: head        16B
/// 0x10: anim_id     u16 - Clip id in the character's animation bank
/// 0x12: slot        u16 - Blend slot, see the SLOT_* constants
/// 0x14: first_frame i32 - First clip frame to sample
/// 0x18: last_frame  i32 - Last clip frame to sample
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Animation {
    pub head: RecordHead,
    /// Clip id in the character's animation bank
    pub anim_id: u16,
    /// Blend slot; values above [`Animation::SLOT_ADDITIVE`] are undocumented
    pub slot: u16,
    /// First clip frame to sample
    pub first_frame: i32,
    /// Last clip frame to sample
    pub last_frame: i32,
}

impl Animation {
    pub const SIZE: usize = 28;

    /// Whole-skeleton playback
    pub const SLOT_FULL_BODY: u16 = 0;
    /// Facial bones only
    pub const SLOT_FACE: u16 = 1;
    /// Torso and arms overlay
    pub const SLOT_UPPER_BODY: u16 = 2;
    /// Additive blend on top of the base pose
    pub const SLOT_ADDITIVE: u16 = 3;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            anim_id: r.read_u16()?,
            slot: r.read_u16()?,
            first_frame: r.read_i32()?,
            last_frame: r.read_i32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_u16(self.anim_id);
        w.write_u16(self.slot);
        w.write_i32(self.first_frame);
        w.write_i32(self.last_frame);
    }
}

/// Branch to another entry when a condition holds (kind 1, 24 bytes).
///
/// # Layout
/// ```text
/// 0x00: head         16B
/// 0x10: target_entry i32 - Entry index to branch to
/// 0x14: condition    u32 - Branch condition flags (documented mask 0x0007)
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transition {
    pub head: RecordHead,
    /// Entry index to branch to
    pub target_entry: i32,
    /// Branch condition flags
    pub condition: u32,
}

impl Transition {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            target_entry: r.read_i32()?,
            condition: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.target_entry);
        w.write_u32(self.condition);
    }
}

/// Cancel window into a move list (kind 2, 24 bytes).
///
/// # Layout
/// ```text
/// 0x00: head        16B
/// 0x10: cancel_list i32 - Id of the move list that becomes available
/// 0x14: window      u32 - Window condition flags (documented mask 0x0003)
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cancel {
    pub head: RecordHead,
    /// Id of the move list that becomes available
    pub cancel_list: i32,
    /// Window condition flags
    pub window: u32,
}

impl Cancel {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            cancel_list: r.read_i32()?,
            window: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.cancel_list);
        w.write_u32(self.window);
    }
}

/// How a [`Speed`] record changes playback, decided by bit 0 of the on-disk
/// mode word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpeedModifier {
    /// Scale playback by a factor (1.0 = unchanged)
    Multiplier(f32),
    /// Advance a fixed number of frames per tick
    FrameStep(u32),
}

impl Default for SpeedModifier {
    fn default() -> Self {
        SpeedModifier::FrameStep(0)
    }
}

/// Playback speed change (kind 20, 24 bytes).
///
/// The value word is a raw frame step or an f32 multiplier depending on the
/// mode word, so the two interpretations are modeled as [`SpeedModifier`]
/// rather than a raw pair. Mode bits other than bit 0 carry no meaning and
/// are not preserved.
///
/// # Layout
/// ```text
/// 0x00: head  16B
/// 0x10: mode  u32 - Bit 0 set: value is an f32 multiplier; clear: a u32 step
/// 0x14: value u32/f32
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Speed {
    pub head: RecordHead,
    pub modifier: SpeedModifier,
}

impl Speed {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        let head = RecordHead::read(r)?;
        let mode = r.read_u32()?;
        let modifier = if mode & 1 != 0 {
            SpeedModifier::Multiplier(r.read_f32()?)
        } else {
            SpeedModifier::FrameStep(r.read_u32()?)
        };
        Ok(Self { head, modifier })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        match self.modifier {
            SpeedModifier::Multiplier(factor) => {
                w.write_u32(1);
                w.write_f32(factor);
            }
            SpeedModifier::FrameStep(frames) => {
                w.write_u32(0);
                w.write_u32(frames);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_modifier_representations() {
        let mut w = Writer::with_capacity(Speed::SIZE * 2);
        Speed {
            head: RecordHead::default(),
            modifier: SpeedModifier::Multiplier(1.5),
        }
        .write(&mut w);
        Speed {
            head: RecordHead::default(),
            modifier: SpeedModifier::FrameStep(3),
        }
        .write(&mut w);

        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), Speed::SIZE * 2);
        // Mode words at offset 16 of each record.
        assert_eq!(bytes[16], 1);
        assert_eq!(bytes[Speed::SIZE + 16], 0);

        let mut r = Reader::new(&bytes, 0);
        let multiplier = Speed::read(&mut r).unwrap();
        let step = Speed::read(&mut r).unwrap();
        assert_eq!(multiplier.modifier, SpeedModifier::Multiplier(1.5));
        assert_eq!(step.modifier, SpeedModifier::FrameStep(3));
    }

    #[test]
    fn test_speed_stray_mode_bits_still_select_multiplier() {
        let mut w = Writer::with_capacity(Speed::SIZE);
        RecordHead::default().write(&mut w);
        w.write_u32(0x0000_0101); // bit 0 set plus junk
        w.write_f32(2.0);
        let bytes = w.into_bytes();

        let speed = Speed::read(&mut Reader::new(&bytes, 0)).unwrap();
        assert_eq!(speed.modifier, SpeedModifier::Multiplier(2.0));
    }

    #[test]
    fn test_animation_roundtrip() {
        let anim = Animation {
            head: RecordHead {
                start_time: 4,
                duration: 20,
                flags: 1,
                reserved: 0,
                layer: -1,
            },
            anim_id: 212,
            slot: Animation::SLOT_UPPER_BODY,
            first_frame: 0,
            last_frame: 30,
        };
        let mut w = Writer::with_capacity(Animation::SIZE);
        anim.write(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), Animation::SIZE);
        let back = Animation::read(&mut Reader::new(&bytes, 0)).unwrap();
        assert_eq!(back, anim);
    }
}

//! Presentation record kinds: effects, audio cues, camera work, and other
//! cosmetic feedback. None of these influence gameplay state.
//!
//! Colors are packed 0xAARRGGBB. Angle fields are degrees in the model and
//! radians on disk.

use serde::{Deserialize, Serialize};

use crate::error::BacError;
use crate::wire::{Reader, Writer};

use super::{RecordHead, decode_angle, encode_angle};

/// Particle effect spawn (kind 12, 48 bytes).
///
/// # Layout
/// ```text
/// 0x00: head      16B
/// 0x10: effect_id i32 - Effect bank id
/// 0x14: bone      i32 - Attachment bone, -1 = character origin
/// 0x18: x         f32 - Offset from the attachment point
/// 0x1C: y         f32
/// 0x20: z         f32
/// 0x24: rot_x     f32 - Spawn rotation in degrees
/// 0x28: rot_y     f32
/// 0x2C: rot_z     f32
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectSpawn {
    pub head: RecordHead,
    pub effect_id: i32,
    /// Attachment bone, -1 = character origin
    pub bone: i32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Spawn rotation in degrees
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
}

impl EffectSpawn {
    pub const SIZE: usize = 48;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            effect_id: r.read_i32()?,
            bone: r.read_i32()?,
            x: r.read_f32()?,
            y: r.read_f32()?,
            z: r.read_f32()?,
            rot_x: decode_angle(r.read_f32()?),
            rot_y: decode_angle(r.read_f32()?),
            rot_z: decode_angle(r.read_f32()?),
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.effect_id);
        w.write_i32(self.bone);
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
        w.write_f32(encode_angle(self.rot_x));
        w.write_f32(encode_angle(self.rot_y));
        w.write_f32(encode_angle(self.rot_z));
    }
}

/// Motion trail attached to a bone (kind 13, 32 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trail {
    pub head: RecordHead,
    pub effect_id: i32,
    pub bone: i32,
    /// Ribbon width in meters
    pub width: f32,
    /// Packed 0xAARRGGBB tint
    pub color: u32,
}

impl Trail {
    pub const SIZE: usize = 32;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            effect_id: r.read_i32()?,
            bone: r.read_i32()?,
            width: r.read_f32()?,
            color: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.effect_id);
        w.write_i32(self.bone);
        w.write_f32(self.width);
        w.write_u32(self.color);
    }
}

/// Sound effect cue (kind 14, 28 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SoundCue {
    pub head: RecordHead,
    pub sound_id: i32,
    /// Linear gain, 1.0 = authored level
    pub volume: f32,
    /// Playback rate multiplier, 1.0 = unchanged
    pub pitch: f32,
}

impl SoundCue {
    pub const SIZE: usize = 28;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            sound_id: r.read_i32()?,
            volume: r.read_f32()?,
            pitch: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.sound_id);
        w.write_f32(self.volume);
        w.write_f32(self.pitch);
    }
}

/// Character voice cue (kind 15, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VoiceCue {
    pub head: RecordHead,
    pub voice_id: i32,
    /// Higher priority interrupts a playing line
    pub priority: u32,
}

impl VoiceCue {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            voice_id: r.read_i32()?,
            priority: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.voice_id);
        w.write_u32(self.priority);
    }
}

/// Cinematic camera override (kind 21, 36 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraControl {
    pub head: RecordHead,
    /// Camera preset id, -1 = free parameters below
    pub camera_id: i32,
    /// Orbit angles in degrees
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    /// Distance from the focus point in meters
    pub distance: f32,
}

impl CameraControl {
    pub const SIZE: usize = 36;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            camera_id: r.read_i32()?,
            pitch: decode_angle(r.read_f32()?),
            yaw: decode_angle(r.read_f32()?),
            roll: decode_angle(r.read_f32()?),
            distance: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.camera_id);
        w.write_f32(encode_angle(self.pitch));
        w.write_f32(encode_angle(self.yaw));
        w.write_f32(encode_angle(self.roll));
        w.write_f32(self.distance);
    }
}

/// Screen shake (kind 22, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shake {
    pub head: RecordHead,
    /// Displacement in meters at full strength
    pub amplitude: f32,
    /// Oscillations per second
    pub frequency: f32,
}

impl Shake {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            amplitude: r.read_f32()?,
            frequency: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_f32(self.amplitude);
        w.write_f32(self.frequency);
    }
}

/// Screen flash (kind 23, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flash {
    pub head: RecordHead,
    /// Packed 0xAARRGGBB color
    pub color: u32,
    /// Blend weight, 0.0..=1.0
    pub intensity: f32,
}

impl Flash {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            color: r.read_u32()?,
            intensity: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_u32(self.color);
        w.write_f32(self.intensity);
    }
}

/// Per-bone model scaling (kind 27, 32 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelScale {
    pub head: RecordHead,
    /// Scaled bone, -1 = whole model
    pub bone: i32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
}

impl ModelScale {
    pub const SIZE: usize = 32;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            bone: r.read_i32()?,
            scale_x: r.read_f32()?,
            scale_y: r.read_f32()?,
            scale_z: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.bone);
        w.write_f32(self.scale_x);
        w.write_f32(self.scale_y);
        w.write_f32(self.scale_z);
    }
}

/// Model part visibility toggle (kind 28, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Visibility {
    pub head: RecordHead,
    /// Affected part flags
    pub part_mask: u32,
    /// 1 = show, 0 = hide (documented mask 0x0001)
    pub visible: u32,
}

impl Visibility {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            part_mask: r.read_u32()?,
            visible: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_u32(self.part_mask);
        w.write_u32(self.visible);
    }
}

/// Afterimage ghosting (kind 29, 32 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Afterimage {
    pub head: RecordHead,
    /// Ghost copies kept alive
    pub count: i32,
    /// Frames between ghost snapshots
    pub interval: i32,
    /// Packed 0xAARRGGBB tint
    pub color: u32,
    /// Per-ghost opacity falloff, 0.0..=1.0
    pub fade: f32,
}

impl Afterimage {
    pub const SIZE: usize = 32;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            count: r.read_i32()?,
            interval: r.read_i32()?,
            color: r.read_u32()?,
            fade: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.count);
        w.write_i32(self.interval);
        w.write_u32(self.color);
        w.write_f32(self.fade);
    }
}

/// Controller rumble (kind 30, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rumble {
    pub head: RecordHead,
    /// 0 = low-frequency motor, 1 = high (documented mask 0x0001)
    pub motor: u32,
    /// Motor strength, 0.0..=1.0
    pub strength: f32,
}

impl Rumble {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            motor: r.read_u32()?,
            strength: r.read_f32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_u32(self.motor);
        w.write_f32(self.strength);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_spawn_rotation_converts_both_ways() {
        let effect = EffectSpawn {
            head: RecordHead::default(),
            effect_id: 31,
            bone: 7,
            x: 0.1,
            y: 0.2,
            z: 0.3,
            rot_x: 180.0,
            rot_y: -45.0,
            rot_z: 0.0,
        };
        let mut w = Writer::with_capacity(EffectSpawn::SIZE);
        effect.write(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), EffectSpawn::SIZE);

        let rot_x_disk = f32::from_le_bytes([bytes[36], bytes[37], bytes[38], bytes[39]]);
        assert!((rot_x_disk - std::f32::consts::PI).abs() < 1e-6);

        let back = EffectSpawn::read(&mut Reader::new(&bytes, 0)).unwrap();
        assert!((back.rot_x - 180.0).abs() < 1e-4);
        assert!((back.rot_y + 45.0).abs() < 1e-4);
        assert_eq!(back.rot_z, 0.0);
    }

    #[test]
    fn test_camera_control_roundtrip_exact_fields() {
        let camera = CameraControl {
            head: RecordHead::default(),
            camera_id: -1,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            distance: 3.5,
        };
        let mut w = Writer::with_capacity(CameraControl::SIZE);
        camera.write(&mut w);
        let bytes = w.into_bytes();
        let back = CameraControl::read(&mut Reader::new(&bytes, 0)).unwrap();
        assert_eq!(back, camera);
    }
}

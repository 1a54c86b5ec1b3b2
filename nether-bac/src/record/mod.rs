//! BAC record catalog
//!
//! Every timed effect in a BAC entry is a record. A record starts with the
//! common 16-byte head (when it fires, for how long, condition flags) and
//! continues with a fixed per-kind payload. The catalog is closed: exactly
//! 32 kinds, numbered 0..=31, each with a known byte length.
//!
//! # Common head layout (16 bytes)
//! ```text
//! 0x00: start_time i32  - First active frame on the entry timeline
//! 0x04: duration i32    - Active frame count (end = start_time + duration)
//! 0x08: flags u32       - Condition flags (documented mask 0x0003)
//! 0x0C: reserved u32    - Round-tripped verbatim
//! ```
//!
//! The editor-facing `layer` lane index lives only in memory; it is never
//! written to disk and is excluded from serde output.
//!
//! Kind 17 (throw handler) is the one irregular entry: two on-disk revisions
//! exist (20 and 32 bytes) and a table's revision is inferred from its byte
//! span, so [`RecordKind::record_size`] reports a dual size for it.

use serde::{Deserialize, Serialize};

use crate::error::BacError;
use crate::wire::{Reader, Writer};

mod animation;
mod collision;
mod motion;
mod presentation;
mod state;

pub use animation::{Animation, Cancel, Speed, SpeedModifier, Transition};
pub use collision::{Counter, Guard, Hitbox, Hurtbox, Invincibility, Knockback, Pushbox, SuperArmor};
pub use motion::{Gravity, InputWindow, Movement, Projectile, TargetLock, ThrowExtension, ThrowHandler};
pub use presentation::{
    Afterimage, CameraControl, EffectSpawn, Flash, ModelScale, Rumble, Shake, SoundCue, Trail,
    Visibility, VoiceCue,
};
pub use state::{MeterGain, ScriptTrigger, Status};

fn unassigned_layer() -> i32 {
    -1
}

/// Angle fields are degrees in the model and radians on disk. The unit
/// conversion runs through f64: the f32 deg-to-rad and rad-to-deg constants
/// are not exact inverses, and a stored angle word must survive a
/// parse/write cycle bit-for-bit.
pub(crate) fn decode_angle(radians: f32) -> f32 {
    f64::from(radians).to_degrees() as f32
}

pub(crate) fn encode_angle(degrees: f32) -> f32 {
    f64::from(degrees).to_radians() as f32
}

/// Common 16-byte head shared by every record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordHead {
    /// First frame on the entry timeline where the record is active
    pub start_time: i32,
    /// Number of frames the record stays active
    pub duration: i32,
    /// Condition flags; only [`RecordHead::FLAG_MASK`] bits are documented
    pub flags: u32,
    /// Undocumented tail word, round-tripped verbatim
    pub reserved: u32,
    /// Editor lane index, -1 = unassigned. In-memory only, never persisted.
    #[serde(skip, default = "unassigned_layer")]
    pub layer: i32,
}

impl RecordHead {
    pub const SIZE: usize = 16;

    /// Bits of `flags` with an assigned meaning. Set bits outside this mask
    /// are what the validation pass reports.
    pub const FLAG_MASK: u32 = 0x0003;

    /// First frame past the active span (`start_time + duration`,
    /// saturating at `i32::MAX`).
    pub fn end_time(&self) -> i32 {
        self.start_time.saturating_add(self.duration)
    }

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            start_time: r.read_i32()?,
            duration: r.read_i32()?,
            flags: r.read_u32()?,
            reserved: r.read_u32()?,
            layer: -1,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        w.write_i32(self.start_time);
        w.write_i32(self.duration);
        w.write_u32(self.flags);
        w.write_u32(self.reserved);
    }
}

impl Default for RecordHead {
    fn default() -> Self {
        Self {
            start_time: 0,
            duration: 0,
            flags: 0,
            reserved: 0,
            layer: -1,
        }
    }
}

/// On-disk byte length contract for one record of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSize {
    /// Every record of the kind occupies exactly this many bytes.
    Fixed(usize),
    /// Two historical revisions exist; the table span decides which one.
    Dual { legacy: usize, full: usize },
}

/// The closed set of record kinds a BAC file can carry.
///
/// Discriminants are the on-disk kind ids from the sub-kind rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum RecordKind {
    /// Skeletal animation playback
    Animation = 0,
    /// Branch to another entry when a condition holds
    Transition = 1,
    /// Cancel window into a move list
    Cancel = 2,
    /// Strike collision volume
    Hitbox = 3,
    /// Vulnerable collision volume
    Hurtbox = 4,
    /// Body push volume
    Pushbox = 5,
    /// Invincibility grant
    Invincibility = 6,
    /// Hit absorption without flinching
    SuperArmor = 7,
    /// Counter-hit trap
    Counter = 8,
    /// Velocity and acceleration applied to the character
    Movement = 9,
    /// Gravity override
    Gravity = 10,
    /// Guard behavior while blocking
    Guard = 11,
    /// Particle effect spawn
    EffectSpawn = 12,
    /// Motion trail attached to a bone
    Trail = 13,
    /// Sound effect cue
    SoundCue = 14,
    /// Character voice cue
    VoiceCue = 15,
    /// Projectile launch
    Projectile = 16,
    /// Throw connect handler
    ThrowHandler = 17,
    /// Soft-lock onto the opponent
    TargetLock = 18,
    /// Status condition applied to self
    Status = 19,
    /// Playback speed change
    Speed = 20,
    /// Cinematic camera override
    CameraControl = 21,
    /// Screen shake
    Shake = 22,
    /// Screen flash
    Flash = 23,
    /// Input buffer window for follow-ups
    InputWindow = 24,
    /// Meter gauge change
    MeterGain = 25,
    /// Knockback applied to the opponent
    Knockback = 26,
    /// Per-bone model scaling
    ModelScale = 27,
    /// Model part visibility toggle
    Visibility = 28,
    /// Afterimage ghosting
    Afterimage = 29,
    /// Controller rumble
    Rumble = 30,
    /// Script hook trigger
    ScriptTrigger = 31,
}

impl RecordKind {
    /// Number of kinds in the catalog.
    pub const COUNT: usize = 32;

    /// Every kind in ascending id order.
    pub const ALL: [RecordKind; RecordKind::COUNT] = [
        RecordKind::Animation,
        RecordKind::Transition,
        RecordKind::Cancel,
        RecordKind::Hitbox,
        RecordKind::Hurtbox,
        RecordKind::Pushbox,
        RecordKind::Invincibility,
        RecordKind::SuperArmor,
        RecordKind::Counter,
        RecordKind::Movement,
        RecordKind::Gravity,
        RecordKind::Guard,
        RecordKind::EffectSpawn,
        RecordKind::Trail,
        RecordKind::SoundCue,
        RecordKind::VoiceCue,
        RecordKind::Projectile,
        RecordKind::ThrowHandler,
        RecordKind::TargetLock,
        RecordKind::Status,
        RecordKind::Speed,
        RecordKind::CameraControl,
        RecordKind::Shake,
        RecordKind::Flash,
        RecordKind::InputWindow,
        RecordKind::MeterGain,
        RecordKind::Knockback,
        RecordKind::ModelScale,
        RecordKind::Visibility,
        RecordKind::Afterimage,
        RecordKind::Rumble,
        RecordKind::ScriptTrigger,
    ];

    /// Look up a kind by its on-disk id.
    pub fn from_id(id: i16) -> Option<RecordKind> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// On-disk kind id.
    pub fn id(self) -> i16 {
        self as i16
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Display name, matching the record type name.
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Animation => "Animation",
            RecordKind::Transition => "Transition",
            RecordKind::Cancel => "Cancel",
            RecordKind::Hitbox => "Hitbox",
            RecordKind::Hurtbox => "Hurtbox",
            RecordKind::Pushbox => "Pushbox",
            RecordKind::Invincibility => "Invincibility",
            RecordKind::SuperArmor => "SuperArmor",
            RecordKind::Counter => "Counter",
            RecordKind::Movement => "Movement",
            RecordKind::Gravity => "Gravity",
            RecordKind::Guard => "Guard",
            RecordKind::EffectSpawn => "EffectSpawn",
            RecordKind::Trail => "Trail",
            RecordKind::SoundCue => "SoundCue",
            RecordKind::VoiceCue => "VoiceCue",
            RecordKind::Projectile => "Projectile",
            RecordKind::ThrowHandler => "ThrowHandler",
            RecordKind::TargetLock => "TargetLock",
            RecordKind::Status => "Status",
            RecordKind::Speed => "Speed",
            RecordKind::CameraControl => "CameraControl",
            RecordKind::Shake => "Shake",
            RecordKind::Flash => "Flash",
            RecordKind::InputWindow => "InputWindow",
            RecordKind::MeterGain => "MeterGain",
            RecordKind::Knockback => "Knockback",
            RecordKind::ModelScale => "ModelScale",
            RecordKind::Visibility => "Visibility",
            RecordKind::Afterimage => "Afterimage",
            RecordKind::Rumble => "Rumble",
            RecordKind::ScriptTrigger => "ScriptTrigger",
        }
    }

    /// On-disk record length for this kind, head included.
    pub fn record_size(self) -> RecordSize {
        match self {
            RecordKind::Animation => RecordSize::Fixed(Animation::SIZE),
            RecordKind::Transition => RecordSize::Fixed(Transition::SIZE),
            RecordKind::Cancel => RecordSize::Fixed(Cancel::SIZE),
            RecordKind::Hitbox => RecordSize::Fixed(Hitbox::SIZE),
            RecordKind::Hurtbox => RecordSize::Fixed(Hurtbox::SIZE),
            RecordKind::Pushbox => RecordSize::Fixed(Pushbox::SIZE),
            RecordKind::Invincibility => RecordSize::Fixed(Invincibility::SIZE),
            RecordKind::SuperArmor => RecordSize::Fixed(SuperArmor::SIZE),
            RecordKind::Counter => RecordSize::Fixed(Counter::SIZE),
            RecordKind::Movement => RecordSize::Fixed(Movement::SIZE),
            RecordKind::Gravity => RecordSize::Fixed(Gravity::SIZE),
            RecordKind::Guard => RecordSize::Fixed(Guard::SIZE),
            RecordKind::EffectSpawn => RecordSize::Fixed(EffectSpawn::SIZE),
            RecordKind::Trail => RecordSize::Fixed(Trail::SIZE),
            RecordKind::SoundCue => RecordSize::Fixed(SoundCue::SIZE),
            RecordKind::VoiceCue => RecordSize::Fixed(VoiceCue::SIZE),
            RecordKind::Projectile => RecordSize::Fixed(Projectile::SIZE),
            RecordKind::ThrowHandler => RecordSize::Dual {
                legacy: ThrowHandler::SIZE_LEGACY,
                full: ThrowHandler::SIZE_FULL,
            },
            RecordKind::TargetLock => RecordSize::Fixed(TargetLock::SIZE),
            RecordKind::Status => RecordSize::Fixed(Status::SIZE),
            RecordKind::Speed => RecordSize::Fixed(Speed::SIZE),
            RecordKind::CameraControl => RecordSize::Fixed(CameraControl::SIZE),
            RecordKind::Shake => RecordSize::Fixed(Shake::SIZE),
            RecordKind::Flash => RecordSize::Fixed(Flash::SIZE),
            RecordKind::InputWindow => RecordSize::Fixed(InputWindow::SIZE),
            RecordKind::MeterGain => RecordSize::Fixed(MeterGain::SIZE),
            RecordKind::Knockback => RecordSize::Fixed(Knockback::SIZE),
            RecordKind::ModelScale => RecordSize::Fixed(ModelScale::SIZE),
            RecordKind::Visibility => RecordSize::Fixed(Visibility::SIZE),
            RecordKind::Afterimage => RecordSize::Fixed(Afterimage::SIZE),
            RecordKind::Rumble => RecordSize::Fixed(Rumble::SIZE),
            RecordKind::ScriptTrigger => RecordSize::Fixed(ScriptTrigger::SIZE),
        }
    }

    /// A record of this kind with every field zeroed and an unassigned layer.
    pub fn default_record(self) -> Record {
        match self {
            RecordKind::Animation => Record::Animation(Animation::default()),
            RecordKind::Transition => Record::Transition(Transition::default()),
            RecordKind::Cancel => Record::Cancel(Cancel::default()),
            RecordKind::Hitbox => Record::Hitbox(Hitbox::default()),
            RecordKind::Hurtbox => Record::Hurtbox(Hurtbox::default()),
            RecordKind::Pushbox => Record::Pushbox(Pushbox::default()),
            RecordKind::Invincibility => Record::Invincibility(Invincibility::default()),
            RecordKind::SuperArmor => Record::SuperArmor(SuperArmor::default()),
            RecordKind::Counter => Record::Counter(Counter::default()),
            RecordKind::Movement => Record::Movement(Movement::default()),
            RecordKind::Gravity => Record::Gravity(Gravity::default()),
            RecordKind::Guard => Record::Guard(Guard::default()),
            RecordKind::EffectSpawn => Record::EffectSpawn(EffectSpawn::default()),
            RecordKind::Trail => Record::Trail(Trail::default()),
            RecordKind::SoundCue => Record::SoundCue(SoundCue::default()),
            RecordKind::VoiceCue => Record::VoiceCue(VoiceCue::default()),
            RecordKind::Projectile => Record::Projectile(Projectile::default()),
            RecordKind::ThrowHandler => Record::ThrowHandler(ThrowHandler::default()),
            RecordKind::TargetLock => Record::TargetLock(TargetLock::default()),
            RecordKind::Status => Record::Status(Status::default()),
            RecordKind::Speed => Record::Speed(Speed::default()),
            RecordKind::CameraControl => Record::CameraControl(CameraControl::default()),
            RecordKind::Shake => Record::Shake(Shake::default()),
            RecordKind::Flash => Record::Flash(Flash::default()),
            RecordKind::InputWindow => Record::InputWindow(InputWindow::default()),
            RecordKind::MeterGain => Record::MeterGain(MeterGain::default()),
            RecordKind::Knockback => Record::Knockback(Knockback::default()),
            RecordKind::ModelScale => Record::ModelScale(ModelScale::default()),
            RecordKind::Visibility => Record::Visibility(Visibility::default()),
            RecordKind::Afterimage => Record::Afterimage(Afterimage::default()),
            RecordKind::Rumble => Record::Rumble(Rumble::default()),
            RecordKind::ScriptTrigger => Record::ScriptTrigger(ScriptTrigger::default()),
        }
    }

    /// Read a whole record table of this kind.
    ///
    /// `offset` and `count` come from the sub-kind row; `next_table` is the
    /// absolute offset of the next record table in the file (or the buffer
    /// length for the last one) and feeds the throw revision inference.
    pub(crate) fn read_table(
        self,
        data: &[u8],
        offset: usize,
        count: usize,
        next_table: usize,
    ) -> Result<Vec<Record>, BacError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let throw_extended = match self.record_size() {
            RecordSize::Fixed(_) => false,
            RecordSize::Dual { legacy, full } => {
                let stride = next_table.saturating_sub(offset) / count;
                if stride == legacy {
                    false
                } else if stride == full {
                    true
                } else {
                    return Err(BacError::AmbiguousThrowSize {
                        stride,
                        offset,
                        count,
                    });
                }
            }
        };
        let mut r = Reader::new(data, offset);
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(match self {
                RecordKind::Animation => Record::Animation(Animation::read(&mut r)?),
                RecordKind::Transition => Record::Transition(Transition::read(&mut r)?),
                RecordKind::Cancel => Record::Cancel(Cancel::read(&mut r)?),
                RecordKind::Hitbox => Record::Hitbox(Hitbox::read(&mut r)?),
                RecordKind::Hurtbox => Record::Hurtbox(Hurtbox::read(&mut r)?),
                RecordKind::Pushbox => Record::Pushbox(Pushbox::read(&mut r)?),
                RecordKind::Invincibility => Record::Invincibility(Invincibility::read(&mut r)?),
                RecordKind::SuperArmor => Record::SuperArmor(SuperArmor::read(&mut r)?),
                RecordKind::Counter => Record::Counter(Counter::read(&mut r)?),
                RecordKind::Movement => Record::Movement(Movement::read(&mut r)?),
                RecordKind::Gravity => Record::Gravity(Gravity::read(&mut r)?),
                RecordKind::Guard => Record::Guard(Guard::read(&mut r)?),
                RecordKind::EffectSpawn => Record::EffectSpawn(EffectSpawn::read(&mut r)?),
                RecordKind::Trail => Record::Trail(Trail::read(&mut r)?),
                RecordKind::SoundCue => Record::SoundCue(SoundCue::read(&mut r)?),
                RecordKind::VoiceCue => Record::VoiceCue(VoiceCue::read(&mut r)?),
                RecordKind::Projectile => Record::Projectile(Projectile::read(&mut r)?),
                RecordKind::ThrowHandler => {
                    Record::ThrowHandler(ThrowHandler::read(&mut r, throw_extended)?)
                }
                RecordKind::TargetLock => Record::TargetLock(TargetLock::read(&mut r)?),
                RecordKind::Status => Record::Status(Status::read(&mut r)?),
                RecordKind::Speed => Record::Speed(Speed::read(&mut r)?),
                RecordKind::CameraControl => Record::CameraControl(CameraControl::read(&mut r)?),
                RecordKind::Shake => Record::Shake(Shake::read(&mut r)?),
                RecordKind::Flash => Record::Flash(Flash::read(&mut r)?),
                RecordKind::InputWindow => Record::InputWindow(InputWindow::read(&mut r)?),
                RecordKind::MeterGain => Record::MeterGain(MeterGain::read(&mut r)?),
                RecordKind::Knockback => Record::Knockback(Knockback::read(&mut r)?),
                RecordKind::ModelScale => Record::ModelScale(ModelScale::read(&mut r)?),
                RecordKind::Visibility => Record::Visibility(Visibility::read(&mut r)?),
                RecordKind::Afterimage => Record::Afterimage(Afterimage::read(&mut r)?),
                RecordKind::Rumble => Record::Rumble(Rumble::read(&mut r)?),
                RecordKind::ScriptTrigger => Record::ScriptTrigger(ScriptTrigger::read(&mut r)?),
            });
        }
        Ok(records)
    }
}

/// One timed effect, as a closed sum over the 32 catalog kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Animation(Animation),
    Transition(Transition),
    Cancel(Cancel),
    Hitbox(Hitbox),
    Hurtbox(Hurtbox),
    Pushbox(Pushbox),
    Invincibility(Invincibility),
    SuperArmor(SuperArmor),
    Counter(Counter),
    Movement(Movement),
    Gravity(Gravity),
    Guard(Guard),
    EffectSpawn(EffectSpawn),
    Trail(Trail),
    SoundCue(SoundCue),
    VoiceCue(VoiceCue),
    Projectile(Projectile),
    ThrowHandler(ThrowHandler),
    TargetLock(TargetLock),
    Status(Status),
    Speed(Speed),
    CameraControl(CameraControl),
    Shake(Shake),
    Flash(Flash),
    InputWindow(InputWindow),
    MeterGain(MeterGain),
    Knockback(Knockback),
    ModelScale(ModelScale),
    Visibility(Visibility),
    Afterimage(Afterimage),
    Rumble(Rumble),
    ScriptTrigger(ScriptTrigger),
}

impl Record {
    /// Catalog kind of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Animation(_) => RecordKind::Animation,
            Record::Transition(_) => RecordKind::Transition,
            Record::Cancel(_) => RecordKind::Cancel,
            Record::Hitbox(_) => RecordKind::Hitbox,
            Record::Hurtbox(_) => RecordKind::Hurtbox,
            Record::Pushbox(_) => RecordKind::Pushbox,
            Record::Invincibility(_) => RecordKind::Invincibility,
            Record::SuperArmor(_) => RecordKind::SuperArmor,
            Record::Counter(_) => RecordKind::Counter,
            Record::Movement(_) => RecordKind::Movement,
            Record::Gravity(_) => RecordKind::Gravity,
            Record::Guard(_) => RecordKind::Guard,
            Record::EffectSpawn(_) => RecordKind::EffectSpawn,
            Record::Trail(_) => RecordKind::Trail,
            Record::SoundCue(_) => RecordKind::SoundCue,
            Record::VoiceCue(_) => RecordKind::VoiceCue,
            Record::Projectile(_) => RecordKind::Projectile,
            Record::ThrowHandler(_) => RecordKind::ThrowHandler,
            Record::TargetLock(_) => RecordKind::TargetLock,
            Record::Status(_) => RecordKind::Status,
            Record::Speed(_) => RecordKind::Speed,
            Record::CameraControl(_) => RecordKind::CameraControl,
            Record::Shake(_) => RecordKind::Shake,
            Record::Flash(_) => RecordKind::Flash,
            Record::InputWindow(_) => RecordKind::InputWindow,
            Record::MeterGain(_) => RecordKind::MeterGain,
            Record::Knockback(_) => RecordKind::Knockback,
            Record::ModelScale(_) => RecordKind::ModelScale,
            Record::Visibility(_) => RecordKind::Visibility,
            Record::Afterimage(_) => RecordKind::Afterimage,
            Record::Rumble(_) => RecordKind::Rumble,
            Record::ScriptTrigger(_) => RecordKind::ScriptTrigger,
        }
    }

    /// Common head, regardless of kind.
    pub fn head(&self) -> &RecordHead {
        match self {
            Record::Animation(x) => &x.head,
            Record::Transition(x) => &x.head,
            Record::Cancel(x) => &x.head,
            Record::Hitbox(x) => &x.head,
            Record::Hurtbox(x) => &x.head,
            Record::Pushbox(x) => &x.head,
            Record::Invincibility(x) => &x.head,
            Record::SuperArmor(x) => &x.head,
            Record::Counter(x) => &x.head,
            Record::Movement(x) => &x.head,
            Record::Gravity(x) => &x.head,
            Record::Guard(x) => &x.head,
            Record::EffectSpawn(x) => &x.head,
            Record::Trail(x) => &x.head,
            Record::SoundCue(x) => &x.head,
            Record::VoiceCue(x) => &x.head,
            Record::Projectile(x) => &x.head,
            Record::ThrowHandler(x) => &x.head,
            Record::TargetLock(x) => &x.head,
            Record::Status(x) => &x.head,
            Record::Speed(x) => &x.head,
            Record::CameraControl(x) => &x.head,
            Record::Shake(x) => &x.head,
            Record::Flash(x) => &x.head,
            Record::InputWindow(x) => &x.head,
            Record::MeterGain(x) => &x.head,
            Record::Knockback(x) => &x.head,
            Record::ModelScale(x) => &x.head,
            Record::Visibility(x) => &x.head,
            Record::Afterimage(x) => &x.head,
            Record::Rumble(x) => &x.head,
            Record::ScriptTrigger(x) => &x.head,
        }
    }

    /// Mutable common head, regardless of kind.
    pub fn head_mut(&mut self) -> &mut RecordHead {
        match self {
            Record::Animation(x) => &mut x.head,
            Record::Transition(x) => &mut x.head,
            Record::Cancel(x) => &mut x.head,
            Record::Hitbox(x) => &mut x.head,
            Record::Hurtbox(x) => &mut x.head,
            Record::Pushbox(x) => &mut x.head,
            Record::Invincibility(x) => &mut x.head,
            Record::SuperArmor(x) => &mut x.head,
            Record::Counter(x) => &mut x.head,
            Record::Movement(x) => &mut x.head,
            Record::Gravity(x) => &mut x.head,
            Record::Guard(x) => &mut x.head,
            Record::EffectSpawn(x) => &mut x.head,
            Record::Trail(x) => &mut x.head,
            Record::SoundCue(x) => &mut x.head,
            Record::VoiceCue(x) => &mut x.head,
            Record::Projectile(x) => &mut x.head,
            Record::ThrowHandler(x) => &mut x.head,
            Record::TargetLock(x) => &mut x.head,
            Record::Status(x) => &mut x.head,
            Record::Speed(x) => &mut x.head,
            Record::CameraControl(x) => &mut x.head,
            Record::Shake(x) => &mut x.head,
            Record::Flash(x) => &mut x.head,
            Record::InputWindow(x) => &mut x.head,
            Record::MeterGain(x) => &mut x.head,
            Record::Knockback(x) => &mut x.head,
            Record::ModelScale(x) => &mut x.head,
            Record::Visibility(x) => &mut x.head,
            Record::Afterimage(x) => &mut x.head,
            Record::Rumble(x) => &mut x.head,
            Record::ScriptTrigger(x) => &mut x.head,
        }
    }

    /// Serialize this record at the writer's current position.
    pub(crate) fn write(&self, w: &mut Writer) {
        match self {
            Record::Animation(x) => x.write(w),
            Record::Transition(x) => x.write(w),
            Record::Cancel(x) => x.write(w),
            Record::Hitbox(x) => x.write(w),
            Record::Hurtbox(x) => x.write(w),
            Record::Pushbox(x) => x.write(w),
            Record::Invincibility(x) => x.write(w),
            Record::SuperArmor(x) => x.write(w),
            Record::Counter(x) => x.write(w),
            Record::Movement(x) => x.write(w),
            Record::Gravity(x) => x.write(w),
            Record::Guard(x) => x.write(w),
            Record::EffectSpawn(x) => x.write(w),
            Record::Trail(x) => x.write(w),
            Record::SoundCue(x) => x.write(w),
            Record::VoiceCue(x) => x.write(w),
            Record::Projectile(x) => x.write(w),
            Record::ThrowHandler(x) => x.write(w),
            Record::TargetLock(x) => x.write(w),
            Record::Status(x) => x.write(w),
            Record::Speed(x) => x.write(w),
            Record::CameraControl(x) => x.write(w),
            Record::Shake(x) => x.write(w),
            Record::Flash(x) => x.write(w),
            Record::InputWindow(x) => x.write(w),
            Record::MeterGain(x) => x.write(w),
            Record::Knockback(x) => x.write(w),
            Record::ModelScale(x) => x.write(w),
            Record::Visibility(x) => x.write(w),
            Record::Afterimage(x) => x.write(w),
            Record::Rumble(x) => x.write(w),
            Record::ScriptTrigger(x) => x.write(w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_match_catalog_positions() {
        for (i, kind) in RecordKind::ALL.iter().enumerate() {
            assert_eq!(kind.id(), i as i16);
            assert_eq!(RecordKind::from_id(i as i16), Some(*kind));
        }
        assert_eq!(RecordKind::from_id(-1), None);
        assert_eq!(RecordKind::from_id(32), None);
        assert_eq!(RecordKind::from_id(77), None);
    }

    #[test]
    fn test_default_record_agrees_on_kind() {
        for kind in RecordKind::ALL {
            let record = kind.default_record();
            assert_eq!(record.kind(), kind);
            assert_eq!(record.head().layer, -1);
        }
    }

    #[test]
    fn test_record_sizes_include_head() {
        for kind in RecordKind::ALL {
            match kind.record_size() {
                RecordSize::Fixed(size) => {
                    assert!(size >= RecordHead::SIZE, "{:?} smaller than head", kind);
                    assert_eq!(size % 4, 0, "{:?} not word aligned", kind);
                }
                RecordSize::Dual { legacy, full } => {
                    assert_eq!(kind, RecordKind::ThrowHandler);
                    assert!(legacy < full);
                }
            }
        }
    }

    #[test]
    fn test_written_size_matches_declared_size() {
        for kind in RecordKind::ALL {
            let record = kind.default_record();
            let mut w = Writer::with_capacity(64);
            record.write(&mut w);
            let expected = match kind.record_size() {
                RecordSize::Fixed(size) => size,
                // Defaults carry no extension, so the legacy length applies.
                RecordSize::Dual { legacy, .. } => legacy,
            };
            assert_eq!(w.len(), expected, "{:?}", kind);
        }
    }

    #[test]
    fn test_layer_not_serialized() {
        let mut record = RecordKind::Hitbox.default_record();
        record.head_mut().layer = 5;
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("layer"));
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.head().layer, -1);
    }

    #[test]
    fn test_end_time_saturates() {
        let head = RecordHead {
            start_time: 1,
            duration: i32::MAX,
            ..RecordHead::default()
        };
        assert_eq!(head.end_time(), i32::MAX);
    }
}

//! Gameplay state record kinds: status conditions, meter changes, and
//! script hooks.

use serde::{Deserialize, Serialize};

use crate::error::BacError;
use crate::wire::{Reader, Writer};

use super::RecordHead;

/// Status condition applied to self (kind 19, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Status {
    pub head: RecordHead,
    /// Condition flags (documented mask 0x000F)
    pub status_bits: u32,
    /// Condition-specific magnitude
    pub value: i32,
}

impl Status {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            status_bits: r.read_u32()?,
            value: r.read_i32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_u32(self.status_bits);
        w.write_i32(self.value);
    }
}

/// Meter gauge change (kind 25, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeterGain {
    pub head: RecordHead,
    /// Meter points added (negative drains)
    pub amount: i32,
    /// 0 = self, 1 = opponent (documented mask 0x0001)
    pub target: u32,
}

impl MeterGain {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            amount: r.read_i32()?,
            target: r.read_u32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.amount);
        w.write_u32(self.target);
    }
}

/// Script hook trigger (kind 31, 24 bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptTrigger {
    pub head: RecordHead,
    /// Character script function id
    pub script_id: i32,
    /// Opaque argument passed through to the script
    pub param: i32,
}

impl ScriptTrigger {
    pub const SIZE: usize = 24;

    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, BacError> {
        Ok(Self {
            head: RecordHead::read(r)?,
            script_id: r.read_i32()?,
            param: r.read_i32()?,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        self.head.write(w);
        w.write_i32(self.script_id);
        w.write_i32(self.param);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        let status = Status {
            head: RecordHead {
                start_time: 0,
                duration: 60,
                flags: 2,
                reserved: 0,
                layer: -1,
            },
            status_bits: 0x8,
            value: -25,
        };
        let mut w = Writer::with_capacity(Status::SIZE);
        status.write(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), Status::SIZE);
        let back = Status::read(&mut Reader::new(&bytes, 0)).unwrap();
        assert_eq!(back, status);
    }
}

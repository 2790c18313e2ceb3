use std::fmt;
use std::str::FromStr;

use evdevil::event::{EventType, InputEvent};
use serde::Deserialize;

use crate::error::{Error, Result};

pub const INPUT_EVENT_SIZE_32: usize = 16;
pub const INPUT_EVENT_SIZE_64: usize = 24;

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;

/// Binary layout of `struct input_event` on the source platform.
///
/// Both layouts end in the same 8 bytes (type, code, value); they differ only in the
/// width of the leading `timeval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordLayout {
    /// 32-bit userspace: 4-byte `tv_sec` + 4-byte `tv_usec`.
    #[serde(alias = "32", alias = "16")]
    Compat32,
    /// 64-bit userspace: 8-byte `tv_sec` + 8-byte `tv_usec`.
    #[default]
    #[serde(alias = "64", alias = "24")]
    Native64,
}

impl RecordLayout {
    pub fn native() -> Self {
        if cfg!(target_pointer_width = "64") {
            RecordLayout::Native64
        } else {
            RecordLayout::Compat32
        }
    }

    pub fn from_size(size: usize) -> Option<Self> {
        match size {
            INPUT_EVENT_SIZE_32 => Some(RecordLayout::Compat32),
            INPUT_EVENT_SIZE_64 => Some(RecordLayout::Native64),
            _ => None,
        }
    }

    pub const fn size(self) -> usize {
        match self {
            RecordLayout::Compat32 => INPUT_EVENT_SIZE_32,
            RecordLayout::Native64 => INPUT_EVENT_SIZE_64,
        }
    }

    const fn timestamp_size(self) -> usize {
        self.size() - 8
    }
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLayout::Compat32 => write!(f, "compat32"),
            RecordLayout::Native64 => write!(f, "native64"),
        }
    }
}

impl FromStr for RecordLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compat32" | "32" | "16" => Ok(RecordLayout::Compat32),
            "native64" | "64" | "24" => Ok(RecordLayout::Native64),
            _ => Err(format!(
                "Invalid record layout '{}'. Valid values: compat32 (16 bytes), native64 (24 bytes)",
                s
            )),
        }
    }
}

/// Press/release classification of a key event value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Release,
    Press,
}

impl KeyState {
    /// `0` is release, `1` is press. Autorepeat (`2`) and anything else is neither.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(KeyState::Release),
            1 => Some(KeyState::Press),
            _ => None,
        }
    }
}

/// One decoded `input_event`, timestamp dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub ty: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(ty: u16, code: u16, value: i32) -> Self {
        Self { ty, code, value }
    }

    pub fn key(code: u16, value: i32) -> Self {
        Self::new(EV_KEY, code, value)
    }

    /// Only key events drive button state; everything else decodes but is skipped.
    pub fn is_actionable(&self) -> bool {
        self.ty == EV_KEY
    }

    pub fn key_state(&self) -> Option<KeyState> {
        if !self.is_actionable() {
            return None;
        }
        KeyState::from_value(self.value)
    }
}

impl From<InputEvent> for RawEvent {
    fn from(ev: InputEvent) -> Self {
        Self::new(ev.event_type().raw(), ev.raw_code(), ev.raw_value())
    }
}

impl From<RawEvent> for InputEvent {
    fn from(ev: RawEvent) -> Self {
        InputEvent::new(EventType::from_raw(ev.ty), ev.code, ev.value)
    }
}

/// Decode exactly one little-endian input_event record.
pub fn decode(buf: &[u8], layout: RecordLayout) -> Result<RawEvent> {
    if buf.len() != layout.size() {
        return Err(Error::MalformedRecord {
            expected: layout.size(),
            actual: buf.len(),
        });
    }

    let off = layout.timestamp_size();
    let ty = u16::from_le_bytes([buf[off], buf[off + 1]]);
    let code = u16::from_le_bytes([buf[off + 2], buf[off + 3]]);
    let value = i32::from_le_bytes([buf[off + 4], buf[off + 5], buf[off + 6], buf[off + 7]]);

    Ok(RawEvent::new(ty, code, value))
}

/// Encode a record in the given layout with a zero timestamp.
pub fn encode(ev: RawEvent, layout: RecordLayout) -> Vec<u8> {
    let mut buf = vec![0u8; layout.timestamp_size()];
    buf.extend_from_slice(&ev.ty.to_le_bytes());
    buf.extend_from_slice(&ev.code.to_le_bytes());
    buf.extend_from_slice(&ev.value.to_le_bytes());
    buf
}

//! Static raw-code to [`Button`] tables.
//!
//! The host's high-level key API drops or misattributes D-pad, L/ZL and capture on the
//! left Joy-Con, so the evdev table is keyed by the kernel `BTN_*` codes instead. Both
//! tables produce the same normalized vocabulary.

use std::collections::HashMap;

use crate::button::Button;
use crate::error::{Error, Result};
use crate::input::codes::*;
use crate::input::source::SourceKind;

/// Raw codes are only meaningful in the code space of one [`SourceKind`], so every
/// table remembers which one it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMapping {
    source: SourceKind,
    table: HashMap<u16, Button>,
}

const JOYCON_LEFT_EVDEV: [(u16, Button); 11] = [
    (BTN_TL, Button::L),
    (BTN_TL2, Button::ZL),
    (BTN_Z, Button::CAPTURE),
    (BTN_DPAD_UP, Button::DPAD_UP),
    (BTN_DPAD_DOWN, Button::DPAD_DOWN),
    (BTN_DPAD_LEFT, Button::DPAD_LEFT),
    (BTN_DPAD_RIGHT, Button::DPAD_RIGHT),
    (BTN_THUMBL, Button::LEFT_STICK),
    // hid-nintendo reports the left rail as the right-hand shoulder codes.
    (BTN_TR, Button::SL),
    (BTN_TR2, Button::SR),
    // Minus shares the ZL slot.
    (BTN_SELECT, Button::ZL),
];

const JOYCON_LEFT_KEYCODES: [(u16, Button); 11] = [
    (KEYCODE_BUTTON_L1, Button::L),
    (KEYCODE_BUTTON_L2, Button::ZL),
    (KEYCODE_BUTTON_Z, Button::CAPTURE),
    (KEYCODE_DPAD_UP, Button::DPAD_UP),
    (KEYCODE_DPAD_DOWN, Button::DPAD_DOWN),
    (KEYCODE_DPAD_LEFT, Button::DPAD_LEFT),
    (KEYCODE_DPAD_RIGHT, Button::DPAD_RIGHT),
    (KEYCODE_BUTTON_THUMBL, Button::LEFT_STICK),
    (KEYCODE_BUTTON_R1, Button::SL),
    (KEYCODE_BUTTON_R2, Button::SR),
    (KEYCODE_BUTTON_SELECT, Button::ZL),
];

impl ButtonMapping {
    /// Build a table from `(raw, normalized)` pairs. Raw codes must be unique.
    pub fn from_pairs<I>(source: SourceKind, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, Button)>,
    {
        let mut table = HashMap::new();
        for (raw, button) in pairs {
            if table.insert(raw, button).is_some() {
                return Err(Error::DuplicateMapping(raw));
            }
        }
        Ok(Self { source, table })
    }

    /// Kernel `BTN_*` codes as reported by hid-nintendo.
    pub fn joycon_left_evdev() -> Self {
        Self {
            source: SourceKind::RawByteStream,
            table: JOYCON_LEFT_EVDEV.into_iter().collect(),
        }
    }

    /// Key codes as reported by the host's key-event API.
    pub fn joycon_left_keycodes() -> Self {
        Self {
            source: SourceKind::HighLevelApi,
            table: JOYCON_LEFT_KEYCODES.into_iter().collect(),
        }
    }

    pub fn for_source(kind: SourceKind) -> Self {
        match kind {
            SourceKind::RawByteStream => Self::joycon_left_evdev(),
            SourceKind::HighLevelApi => Self::joycon_left_keycodes(),
        }
    }

    /// Copy of this table with `overrides` added, replacing existing raw codes.
    pub fn with_overrides<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (u16, Button)>,
    {
        let mut table = self.table.clone();
        table.extend(overrides);
        Self {
            source: self.source,
            table,
        }
    }

    /// The source kind whose code space this table is keyed by.
    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn lookup(&self, raw: u16) -> Option<Button> {
        self.table.get(&raw).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Entries sorted by raw code.
    pub fn entries(&self) -> Vec<(u16, Button)> {
        let mut entries: Vec<_> = self.table.iter().map(|(&raw, &b)| (raw, b)).collect();
        entries.sort_unstable();
        entries
    }
}

impl Default for ButtonMapping {
    fn default() -> Self {
        Self::joycon_left_evdev()
    }
}

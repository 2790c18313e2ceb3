//! Normalized, vendor-neutral button codes.
//!
//! The numbering follows the engine-side joypad indices hosts already expect, so a
//! [`Button`] can be forwarded as a plain integer without another lookup.

use std::fmt;

/// Opaque identifier for one physical controller.
pub type DeviceId = i32;

/// A normalized button code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Button(u16);

impl Button {
    pub const L: Button = Button(4);
    pub const ZL: Button = Button(6);
    pub const LEFT_STICK: Button = Button(10);
    pub const DPAD_UP: Button = Button(11);
    pub const DPAD_DOWN: Button = Button(12);
    pub const DPAD_LEFT: Button = Button(13);
    pub const DPAD_RIGHT: Button = Button(14);
    pub const CAPTURE: Button = Button(16);
    /// Rail buttons, past the engine range like `CAPTURE`.
    pub const SL: Button = Button(17);
    pub const SR: Button = Button(18);

    const NAMES: [(Button, &'static str); 10] = [
        (Button::L, "L"),
        (Button::ZL, "ZL"),
        (Button::LEFT_STICK, "LEFT_STICK"),
        (Button::DPAD_UP, "DPAD_UP"),
        (Button::DPAD_DOWN, "DPAD_DOWN"),
        (Button::DPAD_LEFT, "DPAD_LEFT"),
        (Button::DPAD_RIGHT, "DPAD_RIGHT"),
        (Button::CAPTURE, "CAPTURE"),
        (Button::SL, "SL"),
        (Button::SR, "SR"),
    ];

    pub const fn from_code(code: u16) -> Self {
        Button(code)
    }

    pub const fn code(self) -> u16 {
        self.0
    }

    /// Symbolic name for the built-in vocabulary, `None` for custom codes.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(button, _)| *button == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "BUTTON_{}", self.0),
        }
    }
}

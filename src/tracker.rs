//! Per-device pressed-button state.
//!
//! The reader thread is the only writer; snapshots may be taken from any thread. The
//! whole table sits behind one mutex, so a snapshot never sees a half-applied event.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::button::{Button, DeviceId};
use crate::input::{ButtonMapping, KeyState};

/// A real state change for one (device, button) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTransition {
    Pressed { device: DeviceId, button: Button },
    Released { device: DeviceId, button: Button },
}

impl ButtonTransition {
    pub fn device(&self) -> DeviceId {
        match *self {
            ButtonTransition::Pressed { device, .. } | ButtonTransition::Released { device, .. } => {
                device
            }
        }
    }

    pub fn button(&self) -> Button {
        match *self {
            ButtonTransition::Pressed { button, .. } | ButtonTransition::Released { button, .. } => {
                button
            }
        }
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self, ButtonTransition::Pressed { .. })
    }
}

pub struct ButtonTracker {
    mapping: ButtonMapping,
    devices: Mutex<HashMap<DeviceId, BTreeSet<Button>>>,
}

impl ButtonTracker {
    pub fn new(mapping: ButtonMapping) -> Self {
        Self {
            mapping,
            devices: Mutex::new(HashMap::new()),
        }
    }

    pub fn mapping(&self) -> &ButtonMapping {
        &self.mapping
    }

    // Every mutation is a single insert/remove, so a poisoned table is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<DeviceId, BTreeSet<Button>>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one key event. Returns a transition only when the pressed set changed.
    ///
    /// Unmapped codes and values other than press/release leave state untouched.
    pub fn apply(&self, device: DeviceId, raw_code: u16, value: i32) -> Option<ButtonTransition> {
        let button = self.mapping.lookup(raw_code)?;
        let state = KeyState::from_value(value)?;

        let mut devices = self.lock();
        match state {
            KeyState::Press => {
                if devices.entry(device).or_default().insert(button) {
                    Some(ButtonTransition::Pressed { device, button })
                } else {
                    None
                }
            }
            KeyState::Release => {
                let removed = devices
                    .get_mut(&device)
                    .is_some_and(|pressed| pressed.remove(&button));
                removed.then_some(ButtonTransition::Released { device, button })
            }
        }
    }

    /// Buttons currently held on `device`, ascending. Unknown devices are empty.
    pub fn snapshot(&self, device: DeviceId) -> Vec<Button> {
        self.lock()
            .get(&device)
            .map(|pressed| pressed.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_pressed(&self, device: DeviceId, button: Button) -> bool {
        self.lock()
            .get(&device)
            .is_some_and(|pressed| pressed.contains(&button))
    }

    /// Every device that has ever had a mapped press, including ones now idle.
    pub fn known_devices(&self) -> Vec<DeviceId> {
        let mut ids: Vec<DeviceId> = self.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ButtonTracker {
    fn default() -> Self {
        Self::new(ButtonMapping::default())
    }
}

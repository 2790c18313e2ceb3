//! Where transitions go once the tracker has computed them.
//!
//! The reader thread calls the sink synchronously, once per real state change. A sink
//! that needs to hop threads (an engine main loop, a UI) does that itself;
//! [`ChannelSink`] is the usual way.

use std::sync::mpsc::Sender;

use crate::button::{Button, DeviceId};
use crate::tracker::ButtonTransition;

pub trait TransitionSink: Send {
    fn on_transition(&mut self, device: DeviceId, button: Button, pressed: bool);
}

impl<F> TransitionSink for F
where
    F: FnMut(DeviceId, Button, bool) + Send,
{
    fn on_transition(&mut self, device: DeviceId, button: Button, pressed: bool) {
        self(device, button, pressed)
    }
}

/// Forwards transitions over an mpsc channel.
pub struct ChannelSink(pub Sender<ButtonTransition>);

impl TransitionSink for ChannelSink {
    fn on_transition(&mut self, device: DeviceId, button: Button, pressed: bool) {
        let transition = if pressed {
            ButtonTransition::Pressed { device, button }
        } else {
            ButtonTransition::Released { device, button }
        };
        if self.0.send(transition).is_err() {
            log::debug!("Transition receiver gone, dropping {:?}", transition);
        }
    }
}

/// Logs every transition at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TransitionSink for LogSink {
    fn on_transition(&mut self, device: DeviceId, button: Button, pressed: bool) {
        log::info!(
            "device {}: {} (code {}) {}",
            device,
            button,
            button.code(),
            if pressed { "pressed" } else { "released" }
        );
    }
}

/// Forward a transition to `sink`.
pub fn deliver(sink: &mut dyn TransitionSink, transition: ButtonTransition) {
    sink.on_transition(transition.device(), transition.button(), transition.is_pressed());
}

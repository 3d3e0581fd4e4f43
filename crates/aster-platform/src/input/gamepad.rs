use gilrs::{EventType, Gilrs};

use super::types::InputEvent;

/// Gamepad event source.
///
/// The windowing layer carries no gamepad traffic, so connection changes
/// come from polling a gilrs context. Only connect/disconnect are surfaced
/// here, since they participate in gesture gating; button and axis state is the
/// engine's own business to poll.
pub struct GamepadWatcher {
    /// `None` when the host has no usable gamepad backend.
    gilrs: Option<Gilrs>,
}

impl GamepadWatcher {
    /// Creates a watcher.
    ///
    /// If gilrs fails to initialize, the watcher stays empty and the
    /// keyboard remains the only gesture source. A warning is emitted once.
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                None
            }
        };

        Self { gilrs }
    }

    /// Drains pending host gamepad events into `sink`.
    pub fn poll(&mut self, mut sink: impl FnMut(InputEvent)) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };

        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::Connected => sink(InputEvent::GamepadConnected(event.id.into())),
                EventType::Disconnected => sink(InputEvent::GamepadDisconnected(event.id.into())),
                _ => {}
            }
        }
    }
}

impl Default for GamepadWatcher {
    fn default() -> Self {
        Self::new()
    }
}

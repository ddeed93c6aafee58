//! Adapter from callback-registration decoders to the event vocabulary.
//!
//! Replay libraries typically expose a register-then-run API whose callbacks
//! are keyed by volatile in-engine entity handles, reached through a
//! controller indirection. The bridge resolves each handle to a stable
//! [`PlayerId`] once, when the decoder announces it, and forwards plain
//! events; callbacks for handles it has never been told about are dropped.

use std::collections::HashMap;

use tracing::debug;

use strafe_core::{ButtonMask, PlayerId, Tick};

use crate::backend::EventSink;
use crate::event::DemoEvent;

/// Volatile in-engine entity handle, only meaningful during one decode pass.
pub type EntityHandle = u64;

/// Translates native decoder callbacks into [`DemoEvent`]s.
pub struct CallbackBridge<'a> {
    sink: &'a mut dyn EventSink,
    handles: HashMap<EntityHandle, PlayerId>,
}

impl<'a> CallbackBridge<'a> {
    /// Create a bridge that forwards into `sink`.
    pub fn new(sink: &'a mut dyn EventSink) -> Self {
        Self {
            sink,
            handles: HashMap::new(),
        }
    }

    /// Register the stable identity behind `handle` and announce the
    /// participant. Invalid ids (0) are ignored; their callbacks stay
    /// unresolved and are dropped.
    pub fn player_known(&mut self, handle: EntityHandle, id: u64, name: &str) {
        let player = PlayerId::from_raw(id);
        if !player.is_valid() {
            debug!(handle, "ignoring participant without a stable id");
            return;
        }
        self.handles.insert(handle, player);
        self.sink.accept(&DemoEvent::PlayerSeen {
            player,
            name: name.to_owned(),
        });
    }

    /// Forget a handle (entity deleted, controller swapped).
    pub fn forget(&mut self, handle: EntityHandle) {
        self.handles.remove(&handle);
    }

    /// Native button-mask-changed callback.
    pub fn buttons_changed(&mut self, handle: EntityHandle, mask: u64, tick: i32) {
        let Some(&player) = self.handles.get(&handle) else {
            debug!(handle, tick, "dropping button change for unknown handle");
            return;
        };
        self.sink.accept(&DemoEvent::ButtonsChanged {
            player,
            buttons: ButtonMask::new(mask),
            tick: Tick::from_raw(tick),
        });
    }

    /// Native per-frame sample callback.
    pub fn player_frame(&mut self, handle: EntityHandle, grounded: bool, view_yaw: f32, tick: i32) {
        let Some(&player) = self.handles.get(&handle) else {
            return;
        };
        self.sink.accept(&DemoEvent::PlayerTick {
            player,
            grounded,
            view_yaw,
            tick: Tick::from_raw(tick),
        });
    }

    /// Native end-of-match announcement.
    pub fn match_end(&mut self, tick: i32) {
        self.sink.accept(&DemoEvent::MatchEnd {
            tick: Tick::from_raw(tick),
        });
    }

    /// Stream exhausted.
    pub fn stream_end(&mut self, tick: i32) {
        self.sink.accept(&DemoEvent::StreamEnd {
            tick: Tick::from_raw(tick),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(events: &mut Vec<DemoEvent>) -> impl FnMut(&DemoEvent) + '_ {
        |event| events.push(event.clone())
    }

    #[test]
    fn test_resolves_handles_once_registered() {
        let mut events = Vec::new();
        let mut sink = collect(&mut events);
        let mut bridge = CallbackBridge::new(&mut sink);

        bridge.player_known(11, 100, "alice");
        bridge.buttons_changed(11, 0x8, 5);

        drop(bridge);
        drop(sink);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1],
            DemoEvent::ButtonsChanged { player, .. } if player == PlayerId::from_raw(100)
        ));
    }

    #[test]
    fn test_drops_unknown_handles() {
        let mut events = Vec::new();
        let mut sink = collect(&mut events);
        let mut bridge = CallbackBridge::new(&mut sink);

        bridge.buttons_changed(99, 0x8, 5);
        bridge.player_frame(99, false, 10.0, 5);

        drop(bridge);
        drop(sink);
        assert!(events.is_empty());
    }

    #[test]
    fn test_drops_invalid_ids() {
        let mut events = Vec::new();
        let mut sink = collect(&mut events);
        let mut bridge = CallbackBridge::new(&mut sink);

        bridge.player_known(11, 0, "bot");
        bridge.buttons_changed(11, 0x8, 5);

        drop(bridge);
        drop(sink);
        assert!(events.is_empty());
    }

    #[test]
    fn test_forget_unbinds_handle() {
        let mut events = Vec::new();
        let mut sink = collect(&mut events);
        let mut bridge = CallbackBridge::new(&mut sink);

        bridge.player_known(11, 100, "alice");
        bridge.forget(11);
        bridge.buttons_changed(11, 0x8, 5);

        drop(bridge);
        drop(sink);
        assert_eq!(events.len(), 1); // only the PlayerSeen
    }

    #[test]
    fn test_rebinding_takes_latest_identity() {
        let mut events = Vec::new();
        let mut sink = collect(&mut events);
        let mut bridge = CallbackBridge::new(&mut sink);

        bridge.player_known(11, 100, "alice");
        bridge.player_known(11, 200, "bob");
        bridge.buttons_changed(11, 0x8, 5);

        drop(bridge);
        drop(sink);
        assert!(matches!(
            events[2],
            DemoEvent::ButtonsChanged { player, .. } if player == PlayerId::from_raw(200)
        ));
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use eframe::egui;
use parking_lot::Mutex;

/// Document-level escape-key dispatch.
///
/// Widgets that dismiss on escape subscribe once at mount and hold the
/// returned [`KeySubscription`] in their instance state; dropping the
/// subscription (teardown) deregisters exactly once. The handle is stable for
/// the widget's whole lifetime, so registration and removal can never drift
/// apart the way per-frame closures would.
#[derive(Debug, Default)]
pub struct KeyRoster {
    inner: Arc<Mutex<RosterInner>>,
}

#[derive(Debug, Default)]
struct RosterInner {
    next: u64,
    pending: HashMap<u64, bool>,
}

impl KeyRoster {
    /// Register a listener. Every subscriber sees every subsequent broadcast.
    pub fn subscribe(&self) -> KeySubscription {
        let mut inner = self.inner.lock();
        let id = inner.next;
        inner.next += 1;
        inner.pending.insert(id, false);
        log::trace!("escape listener {id} subscribed");
        KeySubscription {
            id,
            roster: Arc::downgrade(&self.inner),
        }
    }

    /// Mark the key press for every currently subscribed listener.
    pub fn broadcast(&self) {
        let mut inner = self.inner.lock();
        for pending in inner.pending.values_mut() {
            *pending = true;
        }
    }

    /// Run once per frame: pick up an escape press from egui's input state.
    pub fn observe(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.broadcast();
        }
    }

    pub fn listeners(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

#[derive(Debug)]
pub struct KeySubscription {
    id: u64,
    roster: Weak<Mutex<RosterInner>>,
}

impl KeySubscription {
    /// Consume the pending press for this listener, if any.
    pub fn take(&self) -> bool {
        let Some(inner) = self.roster.upgrade() else {
            return false;
        };
        let mut inner = inner.lock();
        match inner.pending.get_mut(&self.id) {
            Some(pending) => std::mem::replace(pending, false),
            None => false,
        }
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.roster.upgrade() {
            inner.lock().pending.remove(&self.id);
            log::trace!("escape listener {} dropped", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_reaches_every_subscriber_once() {
        let roster = KeyRoster::default();
        let a = roster.subscribe();
        let b = roster.subscribe();
        roster.broadcast();
        assert!(a.take());
        assert!(b.take());
        assert!(!a.take());
        assert!(!b.take());
    }

    #[test]
    fn dropping_a_subscription_deregisters_it() {
        let roster = KeyRoster::default();
        let a = roster.subscribe();
        let b = roster.subscribe();
        assert_eq!(roster.listeners(), 2);
        drop(a);
        assert_eq!(roster.listeners(), 1);
        roster.broadcast();
        assert!(b.take());
    }

    #[test]
    fn presses_before_subscription_are_not_delivered() {
        let roster = KeyRoster::default();
        roster.broadcast();
        let late = roster.subscribe();
        assert!(!late.take());
    }

    #[test]
    fn observe_picks_up_escape_from_egui_input() {
        let roster = KeyRoster::default();
        let sub = roster.subscribe();

        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.events.push(egui::Event::Key {
            key: egui::Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        });
        let _ = ctx.run(input, |ctx| {
            roster.observe(ctx);
        });

        assert!(sub.take());

        // A quiet frame delivers nothing.
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            roster.observe(ctx);
        });
        assert!(!sub.take());
    }
}

use std::sync::Arc;

use eframe::egui;
use parking_lot::RwLock;

use crate::keys::{KeyRoster, KeySubscription};
use crate::themes::Class;
use crate::WidgetContext;

/// Minimum close delay for hover-driven widgets, in seconds. Moving the
/// pointer from trigger to content must fit inside this window.
pub const HOVER_CLOSE_MIN_DELAY: f64 = 0.2;

/// A timed transition scheduled by the debounce discipline. At most one is
/// pending per instance; every new hover/focus event replaces it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pending {
    pub at: f64,
    pub open: bool,
}

/// The open/closed state machine shared by every disclosure widget.
///
/// Two states: closed (initial) and open. All mutation goes through the
/// handlers below; children never receive the raw setter. Timestamps are
/// seconds, as reported by `egui::InputState::time`.
#[derive(Debug, Default)]
pub struct DisclosureCore {
    open: bool,
    hover: bool,
    focus: bool,
    pending: Option<Pending>,
}

impl DisclosureCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sync from an externally owned flag (the toast's controlled mode).
    /// Cancels any pending transition so a stale timer cannot undo the
    /// caller's decision.
    pub fn set_open(&mut self, open: bool) {
        if self.open != open {
            self.open = open;
            self.pending = None;
        }
    }

    pub fn open_now(&mut self) {
        self.open = true;
        self.pending = None;
    }

    pub fn close_now(&mut self) {
        self.open = false;
        self.pending = None;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close_now();
        } else {
            self.open_now();
        }
    }

    /// Escape / overlay dismissal. Returns whether anything changed; a closed
    /// widget ignores it.
    pub fn dismiss(&mut self) -> bool {
        if self.open {
            self.close_now();
            true
        } else {
            false
        }
    }

    /// Pointer entered or left the trigger/content pair. Only an actual edge
    /// restarts the debounce timer; repeating the same state is a no-op.
    pub fn set_hover(&mut self, hover: bool, delay: f64, now: f64) {
        if self.hover != hover {
            self.hover = hover;
            self.reschedule(delay, now);
        }
    }

    /// Keyboard focus gained or lost, same discipline as [`set_hover`](Self::set_hover).
    pub fn set_focus(&mut self, focus: bool, delay: f64, now: f64) {
        if self.focus != focus {
            self.focus = focus;
            self.reschedule(delay, now);
        }
    }

    fn reschedule(&mut self, delay: f64, now: f64) {
        let target = self.hover || self.focus;
        let wait = if target {
            delay
        } else {
            delay.max(HOVER_CLOSE_MIN_DELAY)
        };
        self.pending = Some(Pending {
            at: now + wait,
            open: target,
        });
    }

    /// Fire a due pending transition. Returns whether the open state changed.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.pending {
            Some(Pending { at, open }) if at <= now => {
                self.pending = None;
                let changed = self.open != open;
                self.open = open;
                changed
            }
            _ => false,
        }
    }

    /// When the next repaint is worth asking for, if a transition is pending.
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.map(|p| p.at)
    }
}

/// Per-instance retained state for a disclosure widget: the shared core plus
/// the escape subscription for variants that dismiss on escape. Dropping this
/// (unmount) releases both the listener and any pending transition.
pub(crate) struct DisclosureInstance {
    pub core: Arc<RwLock<DisclosureCore>>,
    pub esc: Option<KeySubscription>,
}

impl DisclosureInstance {
    pub fn new(keys: Option<&KeyRoster>) -> Self {
        Self {
            core: Arc::new(RwLock::new(DisclosureCore::new())),
            esc: keys.map(KeyRoster::subscribe),
        }
    }

    /// Apply a pending escape press, closing the core if it was open.
    pub fn consume_escape(&self) -> bool {
        match &self.esc {
            Some(esc) if esc.take() => self.core.write().dismiss(),
            _ => false,
        }
    }
}

/// The scope value a disclosure parent shares with its role components while
/// rendering children. Exposes the mutation handlers, never the raw state.
#[derive(Clone)]
pub struct DisclosureLink {
    core: Arc<RwLock<DisclosureCore>>,
}

impl DisclosureLink {
    pub(crate) fn new(core: Arc<RwLock<DisclosureCore>>) -> Self {
        Self { core }
    }

    pub fn is_open(&self) -> bool {
        self.core.read().is_open()
    }

    pub fn request_open(&self) {
        self.core.write().open_now();
    }

    pub fn request_close(&self) {
        self.core.write().close_now();
    }
}

/// An explicit dismiss affordance for use inside disclosure content closures.
/// Must run under a disclosure widget; anywhere else is a usage error and
/// panics.
pub fn close_button(ctx: &mut WidgetContext<'_>, text: &str, class: &Class) -> egui::Response {
    let link: Arc<DisclosureLink> = ctx.host.scopes.expect("close button");
    let response = crate::widgets::role_button(ctx.ui, text, class);
    if response.clicked() {
        log::debug!("close button dismissed its disclosure widget");
        link.request_close();
    }
    response
}

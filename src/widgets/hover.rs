use eframe::egui::{self, pos2};

use crate::disclosure::{DisclosureInstance, DisclosureLink};
use crate::node::{canonical, Node, NodeBody, Role};
use crate::themes::SurfaceStyle;
use crate::widgets::{schedule_repaint, surface_frame};
use crate::WidgetContext;

const ROLES: &[Role] = &[Role::Trigger, Role::Content];

/// A hover card. Pointer presence (or keyboard focus) over the trigger opens
/// it after `delay`; leaving closes it after the same delay, but never faster
/// than the shared minimum close window, so the pointer can travel from
/// trigger to content without the card collapsing. The revealed content
/// itself counts as presence.
#[must_use = "call .show(ctx) to draw the widget"]
pub struct Hover<'a> {
    id_salt: egui::Id,
    delay: f64,
    children: Vec<Node<'a>>,
}

#[derive(Debug)]
pub struct HoverResponse {
    pub open: bool,
    pub trigger_rect: Option<egui::Rect>,
}

impl<'a> Hover<'a> {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id_salt: egui::Id::new(id_salt),
            delay: 0.0,
            children: Vec::new(),
        }
    }

    /// Debounce delay in seconds before opening (and, when above the minimum
    /// close window, before closing).
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn child(mut self, node: Node<'a>) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node<'a>>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn show(self, ctx: &mut WidgetContext<'_>) -> HoverResponse {
        let host = ctx.host;
        let id = ctx.ui.make_persistent_id(self.id_salt);
        // Hover cards have no escape channel; pointer withdrawal is the only
        // dismissal.
        let instance = host
            .store
            .get_or_insert_with(id, || DisclosureInstance::new(None));
        let core = instance.read().core.clone();
        let now = ctx.ui.input(|i| i.time);

        let mut trigger = None;
        let mut content = None;
        for node in canonical(self.children, ROLES) {
            match node.role() {
                Some(Role::Trigger) => trigger = Some(node),
                Some(Role::Content) => content = Some(node),
                _ => {}
            }
        }

        let _scope = host.scopes.enter(DisclosureLink::new(core.clone()));
        let ectx = ctx.ui.ctx().clone();
        let surface = SurfaceStyle::from(ctx.ui.style().as_ref());

        let mut hovered = false;
        let mut focused = false;
        let mut trigger_rect = None;
        if let Some(node) = trigger {
            let Node { body, .. } = node;
            let inner = ctx
                .ui
                .scope(|ui| match body {
                    NodeBody::Text(text) => {
                        ui.label(text);
                    }
                    NodeBody::Render(render) => {
                        let mut child = WidgetContext::new(ui, host);
                        render(&mut child);
                    }
                    _ => {}
                })
                .response;
            // Click sense makes the trigger focusable, so keyboard focus can
            // open the card as well as the pointer.
            let response = ctx
                .ui
                .interact(inner.rect, id.with("trigger"), egui::Sense::click());
            hovered |= response.hovered();
            focused |= response.has_focus();
            trigger_rect = Some(response.rect);
        }

        if core.read().is_open() {
            if let Some(node) = content {
                let Node { class, body, .. } = node;
                let anchor = trigger_rect
                    .map(|rect| pos2(rect.left(), rect.bottom() + 4.0))
                    .unwrap_or_else(|| ectx.content_rect().center());
                let area = egui::Area::new(id.with("content"))
                    .order(egui::Order::Foreground)
                    .fixed_pos(anchor)
                    .movable(false)
                    .show(&ectx, |ui| {
                        surface_frame(&surface, &class).show(ui, |ui| match body {
                            NodeBody::Render(render) => {
                                let mut child = WidgetContext::new(ui, host);
                                render(&mut child);
                            }
                            NodeBody::Text(text) => {
                                ui.label(text);
                            }
                            _ => {}
                        });
                    });
                // Re-entrant: resting on the card holds it open.
                hovered |= area.response.contains_pointer();
            }
        }

        let mut core = core.write();
        core.set_hover(hovered, self.delay, now);
        core.set_focus(focused, self.delay, now);
        if core.poll(now) {
            log::debug!("hover card {id:?} is now {}", if core.is_open() { "open" } else { "closed" });
        }
        schedule_repaint(&ectx, core.next_deadline(), now);

        HoverResponse {
            open: core.is_open(),
            trigger_rect,
        }
    }
}

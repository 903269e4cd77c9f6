use eframe::egui::{self, pos2, Color32};

use crate::disclosure::{DisclosureInstance, DisclosureLink};
use crate::node::{canonical, Node, NodeBody, Role};
use crate::themes::SurfaceStyle;
use crate::widgets::{backdrop, role_button, surface_frame};
use crate::WidgetContext;

const ROLES: &[Role] = &[Role::Trigger, Role::Content, Role::Overlay];

/// A click-to-toggle disclosure menu. The trigger toggles, escape closes, and
/// an optional transparent backdrop closes on any outside activation. Content
/// is revealed below the trigger only while open.
#[must_use = "call .show(ctx) to draw the widget"]
pub struct Dropdown<'a> {
    id_salt: egui::Id,
    children: Vec<Node<'a>>,
}

#[derive(Debug)]
pub struct DropdownResponse {
    pub open: bool,
    pub toggled: bool,
    pub trigger_rect: Option<egui::Rect>,
}

impl<'a> Dropdown<'a> {
    pub fn new(id_salt: impl std::hash::Hash) -> Self {
        Self {
            id_salt: egui::Id::new(id_salt),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, node: Node<'a>) -> Self {
        self.children.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node<'a>>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn show(self, ctx: &mut WidgetContext<'_>) -> DropdownResponse {
        let host = ctx.host;
        let id = ctx.ui.make_persistent_id(self.id_salt);
        let instance = host
            .store
            .get_or_insert_with(id, || DisclosureInstance::new(Some(&host.keys)));
        let core = instance.read().core.clone();
        let open_before = core.read().is_open();
        if instance.read().consume_escape() {
            log::debug!("dropdown {id:?} dismissed by escape");
        }

        let mut trigger = None;
        let mut content = None;
        let mut overlay = None;
        for node in canonical(self.children, ROLES) {
            match node.role() {
                Some(Role::Trigger) => trigger = Some(node),
                Some(Role::Content) => content = Some(node),
                Some(Role::Overlay) => overlay = Some(node),
                _ => {}
            }
        }

        let _scope = host.scopes.enter(DisclosureLink::new(core.clone()));
        let ectx = ctx.ui.ctx().clone();
        let surface = SurfaceStyle::from(ctx.ui.style().as_ref());

        let mut trigger_rect = None;
        if let Some(node) = trigger {
            let Node { class, body, .. } = node;
            let response = match body {
                NodeBody::Text(label) => role_button(ctx.ui, &label, &class),
                NodeBody::Render(render) => {
                    let inner = ctx
                        .ui
                        .scope(|ui| {
                            let mut child = WidgetContext::new(ui, host);
                            render(&mut child);
                        })
                        .response;
                    ctx.ui
                        .interact(inner.rect, id.with("trigger"), egui::Sense::click())
                }
                _ => role_button(ctx.ui, "", &class),
            };
            if response.clicked() {
                core.write().toggle();
                log::debug!("dropdown {id:?} toggled by trigger");
            }
            trigger_rect = Some(response.rect);
        }

        if core.read().is_open() {
            if let Some(node) = &overlay {
                // Transparent by default: the dropdown's backdrop only exists
                // to catch outside activation.
                let fill = node.class.fill.unwrap_or(Color32::TRANSPARENT);
                if backdrop(&ectx, id.with("overlay"), fill) {
                    core.write().dismiss();
                    log::debug!("dropdown {id:?} dismissed by outside activation");
                }
            }
            if let Some(node) = content {
                let Node { class, body, .. } = node;
                let anchor = trigger_rect
                    .map(|rect| pos2(rect.left(), rect.bottom() + 4.0))
                    .unwrap_or_else(|| ectx.content_rect().center());
                egui::Area::new(id.with("content"))
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
            }
        }

        let open = core.read().is_open();
        DropdownResponse {
            open,
            toggled: open != open_before,
            trigger_rect,
        }
    }
}

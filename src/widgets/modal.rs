use eframe::egui::{self, Align2};

use crate::disclosure::{DisclosureInstance, DisclosureLink};
use crate::node::{canonical, Node, NodeBody, Role};
use crate::themes::{OverlayStyle, SurfaceStyle};
use crate::widgets::{backdrop, role_button, surface_frame};
use crate::WidgetContext;

const ROLES: &[Role] = &[Role::Trigger, Role::Content, Role::Close, Role::Overlay];

/// A blocking dialog. Unlike [`Dropdown`](crate::Dropdown) the trigger only
/// opens; closing goes through the dimmed backdrop, the escape key, or an
/// explicit close child. Content is centered over the viewport.
#[must_use = "call .show(ctx) to draw the widget"]
pub struct Modal<'a> {
    id_salt: egui::Id,
    children: Vec<Node<'a>>,
}

#[derive(Debug)]
pub struct ModalResponse {
    pub open: bool,
    pub toggled: bool,
}

impl<'a> Modal<'a> {
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

    pub fn show(self, ctx: &mut WidgetContext<'_>) -> ModalResponse {
        let host = ctx.host;
        let id = ctx.ui.make_persistent_id(self.id_salt);
        let instance = host
            .store
            .get_or_insert_with(id, || DisclosureInstance::new(Some(&host.keys)));
        let core = instance.read().core.clone();
        let open_before = core.read().is_open();
        if instance.read().consume_escape() {
            log::debug!("modal {id:?} dismissed by escape");
        }

        let mut trigger = None;
        let mut content = None;
        let mut closes = Vec::new();
        let mut overlay = None;
        for node in canonical(self.children, ROLES) {
            match node.role() {
                Some(Role::Trigger) => trigger = Some(node),
                Some(Role::Content) => content = Some(node),
                Some(Role::Close) => closes.push(node),
                Some(Role::Overlay) => overlay = Some(node),
                _ => {}
            }
        }

        let _scope = host.scopes.enter(DisclosureLink::new(core.clone()));
        let ectx = ctx.ui.ctx().clone();
        let surface = SurfaceStyle::from(ctx.ui.style().as_ref());
        let dim = OverlayStyle::from(ctx.ui.style().as_ref());

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
            // The trigger only opens. An open modal keeps its trigger inert
            // behind the backdrop.
            if response.clicked() && !core.read().is_open() {
                core.write().open_now();
                log::debug!("modal {id:?} opened by trigger");
            }
        }

        if core.read().is_open() {
            if let Some(node) = &overlay {
                let fill = node.class.fill.unwrap_or(dim.fill);
                if backdrop(&ectx, id.with("overlay"), fill) {
                    core.write().dismiss();
                    log::debug!("modal {id:?} dismissed by backdrop activation");
                }
            }
            if let Some(node) = content {
                let Node { class, body, .. } = node;
                egui::Area::new(id.with("content"))
                    .order(egui::Order::Foreground)
                    .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
                    .movable(false)
                    .show(&ectx, |ui| {
                        surface_frame(&surface, &class).show(ui, |ui| {
                            match body {
                                NodeBody::Render(render) => {
                                    let mut child = WidgetContext::new(ui, host);
                                    render(&mut child);
                                }
                                NodeBody::Text(text) => {
                                    ui.label(text);
                                }
                                _ => {}
                            }
                            for close in std::mem::take(&mut closes) {
                                let Node { class, body, .. } = close;
                                let label = match body {
                                    NodeBody::Text(label) => label,
                                    _ => "Close".to_owned(),
                                };
                                if role_button(ui, &label, &class).clicked() {
                                    core.write().dismiss();
                                    log::debug!("modal {id:?} dismissed by close child");
                                }
                            }
                        });
                    });
            }
        }

        let open = core.read().is_open();
        ModalResponse {
            open,
            toggled: open != open_before,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WidgetHost;
    use std::cell::RefCell;

    fn run_frame(
        ctx: &egui::Context,
        host: &WidgetHost,
        time: f64,
        events: Vec<egui::Event>,
        out: &RefCell<Option<(ModalResponse, egui::Rect)>>,
    ) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            time: Some(time),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ectx| {
            host.begin_frame(ectx);
            egui::CentralPanel::default().show(ectx, |ui| {
                let before = ui.next_widget_position();
                let mut wctx = WidgetContext::new(ui, host);
                let response = Modal::new("dialog")
                    .child(Node::trigger("open dialog"))
                    .child(Node::content(|ctx| {
                        ctx.ui.label("dialog body");
                    }))
                    .child(Node::close("dismiss"))
                    .child(Node::overlay())
                    .show(&mut wctx);
                let trigger_rect =
                    egui::Rect::from_min_size(before, egui::vec2(80.0, 24.0));
                *out.borrow_mut() = Some((response, trigger_rect));
            });
        });
    }

    fn click(pos: egui::Pos2) -> Vec<Vec<egui::Event>> {
        vec![
            vec![egui::Event::PointerMoved(pos)],
            vec![egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            }],
            vec![egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::NONE,
            }],
        ]
    }

    #[test]
    fn trigger_opens_and_escape_closes() {
        let ctx = egui::Context::default();
        let host = WidgetHost::new();
        let out = RefCell::new(None);

        run_frame(&ctx, &host, 0.0, vec![], &out);
        let (first, trigger_rect) = out.borrow_mut().take().unwrap();
        assert!(!first.open);

        let mut time = 0.0;
        for events in click(trigger_rect.center()) {
            time += 0.1;
            run_frame(&ctx, &host, time, events, &out);
        }
        let (opened, _) = out.borrow_mut().take().unwrap();
        assert!(opened.open);

        // A second click on the trigger's position lands on the backdrop,
        // which dismisses. Escape covers the other channel.
        time += 0.1;
        run_frame(
            &ctx,
            &host,
            time,
            vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            &out,
        );
        let (closed, _) = out.borrow_mut().take().unwrap();
        assert!(!closed.open);
        assert!(closed.toggled);
    }
}

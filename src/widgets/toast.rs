use eframe::egui::{self, Align2};

use crate::disclosure::{DisclosureInstance, DisclosureLink};
use crate::node::{canonical, Node, NodeBody, Role};
use crate::themes::SurfaceStyle;
use crate::widgets::{role_button, schedule_repaint, surface_frame};
use crate::WidgetContext;

const ROLES: &[Role] = &[Role::Content, Role::Close];

/// Default time a toast stays up, in seconds.
pub const TOAST_AUTO_DISMISS: f64 = 5.0;

/// The toast's auto-dismiss countdown. Hovering cancels it outright; it is
/// re-armed from scratch when the pointer leaves, so a toast never expires
/// while being read.
#[derive(Debug, Default)]
pub(crate) struct AutoDismiss {
    deadline: Option<f64>,
}

impl AutoDismiss {
    /// Start the countdown unless one is already running.
    pub fn arm(&mut self, now: f64, duration: f64) {
        if self.deadline.is_none() {
            self.deadline = Some(now + duration);
        }
    }

    pub fn suspend(&mut self) {
        self.deadline = None;
    }

    pub fn due(&self, now: f64) -> bool {
        matches!(self.deadline, Some(deadline) if deadline <= now)
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }
}

/// A transient notification pinned to the viewport's bottom-right corner.
///
/// The open flag is owned by the caller; the toast only ever closes it (auto
/// timeout, escape, close child) and reports the change back through the
/// borrowed flag. Opening is always the caller's move.
#[must_use = "call .show(ctx) to draw the widget"]
pub struct Toast<'a> {
    id_salt: egui::Id,
    open: &'a mut bool,
    duration: f64,
    children: Vec<Node<'a>>,
}

#[derive(Debug)]
pub struct ToastResponse {
    pub open: bool,
    pub dismissed: bool,
}

impl<'a> Toast<'a> {
    pub fn new(id_salt: impl std::hash::Hash, open: &'a mut bool) -> Self {
        Self {
            id_salt: egui::Id::new(id_salt),
            open,
            duration: TOAST_AUTO_DISMISS,
            children: Vec::new(),
        }
    }

    /// Auto-dismiss timeout in seconds.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration.max(0.0);
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

    pub fn show(self, ctx: &mut WidgetContext<'_>) -> ToastResponse {
        let host = ctx.host;
        let id = ctx.ui.make_persistent_id(self.id_salt);
        let instance = host
            .store
            .get_or_insert_with(id, || DisclosureInstance::new(Some(&host.keys)));
        let timer = host
            .store
            .get_or_insert_with(id.with("timer"), AutoDismiss::default);
        let core = instance.read().core.clone();
        let now = ctx.ui.input(|i| i.time);

        // The borrowed flag is authoritative at frame start.
        core.write().set_open(*self.open);
        if instance.read().consume_escape() {
            log::debug!("toast {id:?} dismissed by escape");
        }

        let mut content = None;
        let mut closes = Vec::new();
        for node in canonical(self.children, ROLES) {
            match node.role() {
                Some(Role::Content) => content = Some(node),
                Some(Role::Close) => closes.push(node),
                _ => {}
            }
        }

        let _scope = host.scopes.enter(DisclosureLink::new(core.clone()));
        let ectx = ctx.ui.ctx().clone();
        let surface = SurfaceStyle::from(ctx.ui.style().as_ref());

        if core.read().is_open() {
            let area = egui::Area::new(id.with("card"))
                .order(egui::Order::Foreground)
                .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
                .movable(false)
                .show(&ectx, |ui| {
                    let class = content
                        .as_ref()
                        .map(|node| node.class.clone())
                        .unwrap_or_default();
                    surface_frame(&surface, &class).show(ui, |ui| {
                        if let Some(node) = content.take() {
                            match node.body {
                                NodeBody::Render(render) => {
                                    let mut child = WidgetContext::new(ui, host);
                                    render(&mut child);
                                }
                                NodeBody::Text(text) => {
                                    ui.label(text);
                                }
                                _ => {}
                            }
                        }
                        for close in std::mem::take(&mut closes) {
                            let Node { class, body, .. } = close;
                            let label = match body {
                                NodeBody::Text(label) => label,
                                _ => "Close".to_owned(),
                            };
                            if role_button(ui, &label, &class).clicked() {
                                core.write().dismiss();
                                log::debug!("toast {id:?} dismissed by close child");
                            }
                        }
                    });
                });

            let mut timer = timer.write();
            if area.response.contains_pointer() {
                // Reading time: stop the countdown entirely.
                timer.suspend();
            } else {
                timer.arm(now, self.duration);
            }
            if timer.due(now) && core.write().dismiss() {
                timer.suspend();
                log::debug!("toast {id:?} expired");
            }
            schedule_repaint(&ectx, timer.deadline(), now);
        } else {
            timer.write().suspend();
        }

        let open = core.read().is_open();
        let dismissed = *self.open && !open;
        *self.open = open;
        ToastResponse { open, dismissed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WidgetHost;
    use std::cell::RefCell;

    #[test]
    fn arm_keeps_the_earliest_deadline() {
        let mut timer = AutoDismiss::default();
        timer.arm(0.0, 5.0);
        timer.arm(3.0, 5.0);
        assert_eq!(timer.deadline(), Some(5.0));
    }

    #[test]
    fn suspend_then_arm_restarts_from_scratch() {
        let mut timer = AutoDismiss::default();
        timer.arm(0.0, 5.0);
        timer.suspend();
        assert!(!timer.due(100.0));
        timer.arm(7.0, 5.0);
        assert_eq!(timer.deadline(), Some(12.0));
    }

    fn run_frame(
        ctx: &egui::Context,
        host: &WidgetHost,
        time: f64,
        events: Vec<egui::Event>,
        open: &mut bool,
        out: &RefCell<Option<ToastResponse>>,
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
                let mut wctx = WidgetContext::new(ui, host);
                let response = Toast::new("notice", open)
                    .child(Node::content(|ctx| {
                        ctx.ui.label("saved");
                    }))
                    .child(Node::close("x"))
                    .show(&mut wctx);
                *out.borrow_mut() = Some(response);
            });
        });
    }

    #[test]
    fn expires_after_the_timeout_and_reports_back() {
        let ctx = egui::Context::default();
        let host = WidgetHost::new();
        let out = RefCell::new(None);
        let mut open = true;

        run_frame(&ctx, &host, 0.0, vec![], &mut open, &out);
        assert!(out.borrow_mut().take().unwrap().open);
        assert!(open);

        run_frame(&ctx, &host, 4.9, vec![], &mut open, &out);
        assert!(open);

        run_frame(&ctx, &host, 5.1, vec![], &mut open, &out);
        let expired = out.borrow_mut().take().unwrap();
        assert!(!expired.open);
        assert!(expired.dismissed);
        assert!(!open);
    }

    #[test]
    fn hover_cancels_and_rearms_the_countdown() {
        let ctx = egui::Context::default();
        let host = WidgetHost::new();
        let out = RefCell::new(None);
        let mut open = true;

        run_frame(&ctx, &host, 0.0, vec![], &mut open, &out);

        // Park the pointer on the card just before expiry.
        run_frame(
            &ctx,
            &host,
            4.9,
            vec![egui::Event::PointerMoved(egui::pos2(760.0, 560.0))],
            &mut open,
            &out,
        );
        run_frame(&ctx, &host, 6.0, vec![], &mut open, &out);
        assert!(open);

        // Leaving re-arms a full fresh countdown.
        run_frame(
            &ctx,
            &host,
            7.0,
            vec![egui::Event::PointerMoved(egui::pos2(10.0, 10.0))],
            &mut open,
            &out,
        );
        run_frame(&ctx, &host, 11.9, vec![], &mut open, &out);
        assert!(open);
        run_frame(&ctx, &host, 12.1, vec![], &mut open, &out);
        assert!(!open);
    }

    #[test]
    fn escape_dismisses_an_open_toast() {
        let ctx = egui::Context::default();
        let host = WidgetHost::new();
        let out = RefCell::new(None);
        let mut open = true;

        run_frame(&ctx, &host, 0.0, vec![], &mut open, &out);
        run_frame(
            &ctx,
            &host,
            0.1,
            vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            &mut open,
            &out,
        );
        assert!(!open);
    }
}

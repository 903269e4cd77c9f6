use std::sync::Arc;

use eframe::egui::{self, Align2, Sense, TextStyle};

use crate::node::{canonical, Node, Role};
use crate::themes::ProgressStyle;
use crate::WidgetContext;

const ROLES: &[Role] = &[Role::Fill, Role::Value];

/// The value a progress bar shares with its fill and value markers while
/// rendering them.
pub struct ProgressScope {
    pub value: f32,
}

/// How wide the filled portion is for a track of `track_width`. The value is
/// a percentage and is deliberately not clamped: out-of-range input renders
/// out of range, matching what the caller asked for.
pub(crate) fn fill_width(track_width: f32, value: f32) -> f32 {
    track_width * value / 100.0
}

pub(crate) fn percent_text(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}%", value as i64)
    } else {
        format!("{value}%")
    }
}

/// A horizontal progress bar. The fill and the textual readout are declared
/// as role children, so callers can show either, both, or a bare track.
#[must_use = "call .show(ctx) to draw the widget"]
pub struct Progress<'a> {
    value: f32,
    class: crate::themes::Class,
    children: Vec<Node<'a>>,
}

impl<'a> Progress<'a> {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            class: crate::themes::Class::default(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: crate::themes::Class) -> Self {
        self.class = class;
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

    pub fn show(self, ctx: &mut WidgetContext<'_>) -> egui::Response {
        let style = ProgressStyle::from(ctx.ui.style().as_ref());
        let width = self
            .class
            .width
            .unwrap_or_else(|| ctx.ui.available_width().min(384.0));
        let height = style.height;

        let (rect, response) = ctx
            .ui
            .allocate_exact_size(egui::vec2(width, height), Sense::hover());

        let _scope = ctx.host.scopes.enter(ProgressScope { value: self.value });

        if ctx.ui.is_rect_visible(rect) {
            let radius = self.class.corner_radius.unwrap_or(rect.height() / 2.0);
            ctx.ui
                .painter()
                .rect_filled(rect, radius, self.class.fill.unwrap_or(style.track));

            for node in canonical(self.children, ROLES) {
                let scope: Arc<ProgressScope> = ctx.host.scopes.expect("progress marker");
                match node.role() {
                    Some(Role::Fill) => {
                        let filled = fill_width(rect.width(), scope.value);
                        if filled > 0.0 {
                            let fill_rect = egui::Rect::from_min_size(
                                rect.min,
                                egui::vec2(filled, rect.height()),
                            );
                            ctx.ui.painter().rect_filled(
                                fill_rect,
                                radius,
                                node.class.fill.unwrap_or(style.fill),
                            );
                        }
                    }
                    Some(Role::Value) => {
                        ctx.ui.painter().text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            percent_text(scope.value),
                            TextStyle::Small.resolve(ctx.ui.style()),
                            node.class.text.unwrap_or(style.text),
                        );
                    }
                    _ => {}
                }
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_proportional() {
        assert_eq!(fill_width(200.0, 0.0), 0.0);
        assert_eq!(fill_width(200.0, 33.0), 66.0);
        assert_eq!(fill_width(200.0, 100.0), 200.0);
    }

    #[test]
    fn fill_is_not_clamped() {
        assert_eq!(fill_width(100.0, 120.0), 120.0);
        assert_eq!(fill_width(100.0, -10.0), -10.0);
    }

    #[test]
    fn percent_text_drops_trailing_zeroes() {
        assert_eq!(percent_text(33.0), "33%");
        assert_eq!(percent_text(120.0), "120%");
        assert_eq!(percent_text(33.5), "33.5%");
    }
}

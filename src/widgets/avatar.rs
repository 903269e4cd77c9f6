use eframe::egui::{self, Align2, Sense, TextStyle, Vec2};

use crate::node::{canonical, Node, NodeBody, Role};
use crate::themes::AvatarStyle;
use crate::WidgetContext;

const ROLES: &[Role] = &[Role::Image, Role::Fallback];

/// A fixed-size round portrait. Declares an image and/or fallback initials;
/// the first recognized child wins, with the image preferred when both are
/// present.
#[must_use = "call .show(ctx) to draw the widget"]
pub struct Avatar<'a> {
    class: crate::themes::Class,
    children: Vec<Node<'a>>,
}

impl<'a> Avatar<'a> {
    pub fn new() -> Self {
        Self {
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
        let style = AvatarStyle::from(ctx.ui.style().as_ref());
        let size = self.class.width.unwrap_or(style.size);
        let host = ctx.host;

        let chosen = canonical(self.children, ROLES).into_iter().next();
        match chosen {
            Some(Node {
                body: NodeBody::Image { src, alt },
                class,
                ..
            }) => ctx.ui.add(
                egui::Image::from_uri(src)
                    .fit_to_exact_size(Vec2::splat(size))
                    .corner_radius(class.corner_radius.unwrap_or(size / 2.0))
                    .alt_text(alt),
            ),
            Some(Node { body, class, .. }) => {
                let (rect, response) = ctx
                    .ui
                    .allocate_exact_size(Vec2::splat(size), Sense::hover());
                if ctx.ui.is_rect_visible(rect) {
                    ctx.ui.painter().circle_filled(
                        rect.center(),
                        size / 2.0,
                        class.fill.unwrap_or(style.fill),
                    );
                    match body {
                        NodeBody::Text(initials) => {
                            ctx.ui.painter().text(
                                rect.center(),
                                Align2::CENTER_CENTER,
                                initials,
                                TextStyle::Body.resolve(ctx.ui.style()),
                                class.text.unwrap_or(style.text),
                            );
                        }
                        NodeBody::Render(render) => {
                            ctx.ui.scope_builder(
                                egui::UiBuilder::new().max_rect(rect).layout(
                                    egui::Layout::centered_and_justified(
                                        egui::Direction::TopDown,
                                    ),
                                ),
                                |ui| {
                                    let mut child = WidgetContext::new(ui, host);
                                    render(&mut child);
                                },
                            );
                        }
                        _ => {}
                    }
                }
                response
            }
            // No recognized child: an empty circle placeholder.
            None => {
                let (rect, response) = ctx
                    .ui
                    .allocate_exact_size(Vec2::splat(size), Sense::hover());
                if ctx.ui.is_rect_visible(rect) {
                    ctx.ui.painter().circle_filled(
                        rect.center(),
                        size / 2.0,
                        self.class.fill.unwrap_or(style.fill),
                    );
                }
                response
            }
        }
    }
}

impl Default for Avatar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_wins_over_fallback() {
        let nodes = vec![Node::fallback("AD"), Node::image("https://x/y.png", "y")];
        let chosen = canonical(nodes, ROLES).into_iter().next().unwrap();
        assert_eq!(chosen.role(), Some(Role::Image));
    }

    #[test]
    fn fallback_is_used_when_no_image_is_declared() {
        let nodes = vec![Node::text("noise"), Node::fallback("AD")];
        let chosen = canonical(nodes, ROLES).into_iter().next().unwrap();
        assert_eq!(chosen.role(), Some(Role::Fallback));
    }
}

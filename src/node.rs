use crate::themes::Class;
use crate::WidgetContext;

/// The structural purpose of a child within its parent widget. Roles are
/// compared as plain variants, so the filter stays robust across module
/// boundaries (no identity tricks).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Trigger,
    Content,
    Overlay,
    Close,
    Image,
    Fallback,
    Fill,
    Value,
}

pub type NodeRender<'a> = Box<dyn FnOnce(&mut WidgetContext<'_>) + 'a>;

pub(crate) enum NodeBody<'a> {
    Empty,
    Text(String),
    Render(NodeRender<'a>),
    Image { src: String, alt: String },
}

impl std::fmt::Debug for NodeBody<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeBody::Empty => write!(f, "Empty"),
            NodeBody::Text(text) => f.debug_tuple("Text").field(text).finish(),
            NodeBody::Render(_) => write!(f, "Render"),
            NodeBody::Image { src, .. } => f.debug_tuple("Image").field(src).finish(),
        }
    }
}

/// A declared child of a catalog widget: an optional role, an optional style
/// class merged over the parent's base styling, and a body. Children without
/// a role recognized by the parent are silently dropped.
#[derive(Debug)]
pub struct Node<'a> {
    pub(crate) role: Option<Role>,
    pub(crate) class: Class,
    pub(crate) body: NodeBody<'a>,
}

impl<'a> Node<'a> {
    fn with_role(role: Role, body: NodeBody<'a>) -> Self {
        Self {
            role: Some(role),
            class: Class::default(),
            body,
        }
    }

    /// A trigger with a plain text label.
    pub fn trigger(label: impl Into<String>) -> Self {
        Self::with_role(Role::Trigger, NodeBody::Text(label.into()))
    }

    /// A trigger rendering arbitrary content.
    pub fn trigger_show(body: impl FnOnce(&mut WidgetContext<'_>) + 'a) -> Self {
        Self::with_role(Role::Trigger, NodeBody::Render(Box::new(body)))
    }

    /// Content revealed only while the parent is open.
    pub fn content(body: impl FnOnce(&mut WidgetContext<'_>) + 'a) -> Self {
        Self::with_role(Role::Content, NodeBody::Render(Box::new(body)))
    }

    /// A full-viewport backdrop; activating it dismisses the parent.
    pub fn overlay() -> Self {
        Self::with_role(Role::Overlay, NodeBody::Empty)
    }

    /// An explicit dismiss button, rendered inside the open content.
    pub fn close(label: impl Into<String>) -> Self {
        Self::with_role(Role::Close, NodeBody::Text(label.into()))
    }

    /// An avatar image: source URL plus alt text.
    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self::with_role(
            Role::Image,
            NodeBody::Image {
                src: src.into(),
                alt: alt.into(),
            },
        )
    }

    /// Avatar fallback initials.
    pub fn fallback(text: impl Into<String>) -> Self {
        Self::with_role(Role::Fallback, NodeBody::Text(text.into()))
    }

    /// Avatar fallback rendering arbitrary content.
    pub fn fallback_show(body: impl FnOnce(&mut WidgetContext<'_>) + 'a) -> Self {
        Self::with_role(Role::Fallback, NodeBody::Render(Box::new(body)))
    }

    /// The progress bar's fill marker.
    pub fn fill() -> Self {
        Self::with_role(Role::Fill, NodeBody::Empty)
    }

    /// The progress bar's textual value marker.
    pub fn value() -> Self {
        Self::with_role(Role::Value, NodeBody::Empty)
    }

    /// Plain text without a role. No widget recognizes it.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            class: Class::default(),
            body: NodeBody::Text(text.into()),
        }
    }

    /// Arbitrary roleless content. No widget recognizes it.
    pub fn custom(body: impl FnOnce(&mut WidgetContext<'_>) + 'a) -> Self {
        Self {
            role: None,
            class: Class::default(),
            body: NodeBody::Render(Box::new(body)),
        }
    }

    /// Attach a style class; its fields win over the widget's base styling.
    pub fn class(mut self, class: Class) -> Self {
        self.class = class;
        self
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
}

/// Keep only children whose role the parent accepts and reorder them to the
/// accepted set's canonical layering. Declaration order is preserved within a
/// role, so the result is always a subsequence of the declared children.
pub(crate) fn canonical<'a>(nodes: Vec<Node<'a>>, accepted: &[Role]) -> Vec<Node<'a>> {
    let rank = |node: &Node<'a>| {
        node.role
            .and_then(|role| accepted.iter().position(|&r| r == role))
    };
    let mut kept: Vec<(usize, Node<'a>)> = nodes
        .into_iter()
        .filter_map(|node| rank(&node).map(|rank| (rank, node)))
        .collect();
    kept.sort_by_key(|(rank, _)| *rank);
    kept.into_iter().map(|(_, node)| node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DROPDOWN: &[Role] = &[Role::Trigger, Role::Content, Role::Overlay];

    #[test]
    fn unrecognized_children_are_dropped() {
        let nodes = vec![
            Node::custom(|_| {}),
            Node::trigger("open"),
            Node::text("plain text"),
            Node::content(|_| {}),
        ];
        let kept = canonical(nodes, DROPDOWN);
        let roles: Vec<_> = kept.iter().map(|n| n.role()).collect();
        assert_eq!(roles, vec![Some(Role::Trigger), Some(Role::Content)]);
    }

    #[test]
    fn children_are_reordered_to_canonical_layering() {
        let nodes = vec![Node::overlay(), Node::content(|_| {}), Node::trigger("t")];
        let kept = canonical(nodes, DROPDOWN);
        let roles: Vec<_> = kept.iter().map(|n| n.role()).collect();
        assert_eq!(
            roles,
            vec![Some(Role::Trigger), Some(Role::Content), Some(Role::Overlay)]
        );
    }

    #[test]
    fn roles_outside_the_accepted_set_are_dropped() {
        let nodes = vec![Node::close("x"), Node::trigger("t")];
        let kept = canonical(nodes, DROPDOWN);
        let roles: Vec<_> = kept.iter().map(|n| n.role()).collect();
        assert_eq!(roles, vec![Some(Role::Trigger)]);
    }

    #[test]
    fn declaration_order_is_kept_within_a_role() {
        let first = Node::content(|_| {});
        let second = Node::content(|_| {});
        let marker = first.class(Class::new().width(1.0));
        let kept = canonical(vec![marker, second], &[Role::Content]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].class.width, Some(1.0));
        assert_eq!(kept[1].class.width, None);
    }
}

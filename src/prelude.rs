pub use crate::disclosure::close_button;
pub use crate::node::{Node, Role};
pub use crate::themes::Class;
pub use crate::widgets::{Avatar, Badge, BadgeTone, Dropdown, Hover, Modal, Progress, Slider, Toast};
pub use crate::{Gallery, WidgetContext, WidgetHost};

pub mod avatar;
pub mod badge;
pub mod dropdown;
pub mod hover;
pub mod modal;
pub mod progress;
pub mod slider;
pub mod toast;

pub use avatar::Avatar;
pub use badge::{Badge, BadgeTone};
pub use dropdown::{Dropdown, DropdownResponse};
pub use hover::{Hover, HoverResponse};
pub use modal::{Modal, ModalResponse};
pub use progress::{Progress, ProgressScope};
pub use slider::{Slider, SliderResponse};
pub use toast::{Toast, ToastResponse, TOAST_AUTO_DISMISS};

use eframe::egui::{self, Color32, Stroke};

use crate::themes::{Class, SurfaceStyle};

/// A button styled through a [`Class`]: class fields override the theme's
/// button visuals. Shared by triggers and close buttons.
pub(crate) fn role_button(ui: &mut egui::Ui, text: &str, class: &Class) -> egui::Response {
    ui.scope(|ui| {
        let visuals = ui.visuals_mut();
        if let Some(fill) = class.fill {
            visuals.widgets.inactive.bg_fill = fill;
            visuals.widgets.inactive.weak_bg_fill = fill;
            visuals.widgets.hovered.bg_fill = fill;
            visuals.widgets.hovered.weak_bg_fill = fill;
            visuals.widgets.active.bg_fill = fill;
            visuals.widgets.active.weak_bg_fill = fill;
        }
        if let Some(text_color) = class.text {
            visuals.override_text_color = Some(text_color);
        }
        if let Some(outline) = class.outline {
            let stroke = Stroke::new(1.0, outline);
            visuals.widgets.inactive.bg_stroke = stroke;
            visuals.widgets.hovered.bg_stroke = stroke;
            visuals.widgets.active.bg_stroke = stroke;
        }
        if let Some(corner_radius) = class.corner_radius {
            let corner_radius: egui::CornerRadius = corner_radius.into();
            visuals.widgets.inactive.corner_radius = corner_radius;
            visuals.widgets.hovered.corner_radius = corner_radius;
            visuals.widgets.active.corner_radius = corner_radius;
        }
        ui.add(egui::Button::new(text))
    })
    .inner
}

/// The frame around revealed disclosure content, with class overrides applied.
pub(crate) fn surface_frame(style: &SurfaceStyle, class: &Class) -> egui::Frame {
    let padding = class.padding.unwrap_or(style.padding);
    egui::Frame::new()
        .fill(class.fill.unwrap_or(style.fill))
        .stroke(Stroke::new(1.0, class.outline.unwrap_or(style.outline)))
        .corner_radius(class.corner_radius.unwrap_or(style.corner_radius))
        .inner_margin(egui::Margin::symmetric(
            padding.x.round() as i8,
            padding.y.round() as i8,
        ))
}

/// A full-viewport backdrop behind an open disclosure widget. Returns whether
/// it was activated this frame.
pub(crate) fn backdrop(ectx: &egui::Context, id: egui::Id, fill: Color32) -> bool {
    let screen = ectx.content_rect();
    let response = egui::Area::new(id)
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .movable(false)
        .show(ectx, |ui| {
            let (rect, response) = ui.allocate_exact_size(screen.size(), egui::Sense::click());
            if ui.is_rect_visible(rect) && fill != Color32::TRANSPARENT {
                ui.painter().rect_filled(rect, 0.0, fill);
            }
            response
        })
        .inner;
    response.clicked()
}

/// Ask for a repaint when the next timed transition is due.
pub(crate) fn schedule_repaint(ectx: &egui::Context, deadline: Option<f64>, now: f64) {
    if let Some(deadline) = deadline {
        let wait = (deadline - now).max(0.0);
        ectx.request_repaint_after(std::time::Duration::from_secs_f64(wait));
    }
}

use eframe::egui::{self, Color32, Sense, Stroke, TextStyle, TextWrapMode, Vec2, Widget, WidgetText};

use crate::themes::{self, Class};

/// Semantic tone of a [`Badge`]. Unrecognized call sites just take the
/// default neutral tone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BadgeTone {
    Error,
    Info,
    Warning,
    Success,
    #[default]
    Neutral,
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// (fill, text, outline) for a tone: a 40% wash of the tone color, full-
/// strength text, and a 30% border.
pub(crate) fn tone_colors(tone: BadgeTone) -> (Color32, Color32, Color32) {
    let (base, edge) = match tone {
        BadgeTone::Error => (themes::RED_500, themes::RED_600),
        BadgeTone::Info => (themes::BLUE_500, themes::BLUE_600),
        BadgeTone::Warning => (themes::YELLOW_500, themes::YELLOW_600),
        BadgeTone::Success => (themes::GREEN_500, themes::GREEN_600),
        BadgeTone::Neutral => (themes::GRAY_500, Color32::WHITE),
    };
    let text = match tone {
        BadgeTone::Neutral => with_alpha(Color32::WHITE, 0xcc),
        _ => base,
    };
    (with_alpha(base, 0x66), text, with_alpha(edge, 0x4d))
}

/// A small tinted pill of text.
#[must_use = "you should put this widget in a ui with `ui.add(widget)`"]
pub struct Badge {
    text: WidgetText,
    tone: BadgeTone,
    class: Class,
}

impl Badge {
    pub fn new(text: impl Into<WidgetText>) -> Self {
        Self {
            text: text.into(),
            tone: BadgeTone::default(),
            class: Class::default(),
        }
    }

    pub fn tone(mut self, tone: BadgeTone) -> Self {
        self.tone = tone;
        self
    }

    pub fn class(mut self, class: Class) -> Self {
        self.class = class;
        self
    }
}

impl Widget for Badge {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let (fill, text_color, outline) = tone_colors(self.tone);
        let fill = self.class.fill.unwrap_or(fill);
        let text_color = self.class.text.unwrap_or(text_color);
        let outline = self.class.outline.unwrap_or(outline);
        let padding = self.class.padding.unwrap_or(Vec2::new(10.0, 4.0));

        let galley = self.text.into_galley(
            ui,
            Some(TextWrapMode::Extend),
            f32::INFINITY,
            TextStyle::Small,
        );
        let size = galley.size() + padding * 2.0;
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        if ui.is_rect_visible(rect) {
            let radius = self.class.corner_radius.unwrap_or(rect.height() / 2.0);
            let painter = ui.painter();
            painter.rect_filled(rect, radius, fill);
            painter.rect_stroke(
                rect,
                radius,
                Stroke::new(1.0, outline),
                egui::StrokeKind::Inside,
            );
            let text_pos = rect.center() - galley.size() / 2.0;
            painter.galley(text_pos, galley, text_color);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tone_is_neutral() {
        assert_eq!(BadgeTone::default(), BadgeTone::Neutral);
    }

    #[test]
    fn tones_wash_their_base_color() {
        let (fill, text, outline) = tone_colors(BadgeTone::Error);
        assert_eq!(fill, with_alpha(themes::RED_500, 0x66));
        assert_eq!(text, themes::RED_500);
        assert_eq!(outline, with_alpha(themes::RED_600, 0x4d));
    }

    #[test]
    fn neutral_tone_uses_soft_white_text() {
        let (_, text, _) = tone_colors(BadgeTone::Neutral);
        assert_eq!(text, with_alpha(Color32::WHITE, 0xcc));
    }
}

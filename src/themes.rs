use egui::{Color32, Stroke, Style, Vec2, Visuals};

// Palette tokens shared by the widget base styles. These mirror the catalog's
// reference design rather than egui's defaults.
pub const BLUE_100: Color32 = Color32::from_rgb(0xdb, 0xea, 0xfe);
pub const BLUE_200: Color32 = Color32::from_rgb(0xbf, 0xdb, 0xfe);
pub const BLUE_500: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const BLUE_600: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
pub const BLUE_950: Color32 = Color32::from_rgb(0x17, 0x25, 0x54);
pub const RED_500: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
pub const RED_600: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
pub const YELLOW_500: Color32 = Color32::from_rgb(0xea, 0xb3, 0x08);
pub const YELLOW_600: Color32 = Color32::from_rgb(0xca, 0x8a, 0x04);
pub const GREEN_500: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
pub const GREEN_600: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
pub const GRAY_500: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);

/// Simple sRGB interpolation for quick palette derivation.
pub fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let r = (a.r() as f32 * (1.0 - t) + b.r() as f32 * t).round() as u8;
    let g = (a.g() as f32 * (1.0 - t) + b.g() as f32 * t).round() as u8;
    let bch = (a.b() as f32 * (1.0 - t) + b.b() as f32 * t).round() as u8;
    Color32::from_rgb(r, g, bch)
}

/// A per-component style override, merged over the widget's base style.
/// Set fields win over the base; unset fields fall through. Merging two
/// classes keeps the later one's fields on conflict.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Class {
    pub fill: Option<Color32>,
    pub text: Option<Color32>,
    pub outline: Option<Color32>,
    pub corner_radius: Option<f32>,
    pub padding: Option<Vec2>,
    pub width: Option<f32>,
}

impl Class {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, fill: Color32) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn text(mut self, text: Color32) -> Self {
        self.text = Some(text);
        self
    }

    pub fn outline(mut self, outline: Color32) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn corner_radius(mut self, corner_radius: f32) -> Self {
        self.corner_radius = Some(corner_radius);
        self
    }

    pub fn padding(mut self, padding: Vec2) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Layer `later` over `self`; the later class wins where both set a field.
    pub fn merge(self, later: Class) -> Class {
        Class {
            fill: later.fill.or(self.fill),
            text: later.text.or(self.text),
            outline: later.outline.or(self.outline),
            corner_radius: later.corner_radius.or(self.corner_radius),
            padding: later.padding.or(self.padding),
            width: later.width.or(self.width),
        }
    }
}

/// Base style for content surfaces: dropdown menus, modal cards, hover cards
/// and toast cards.
#[derive(Clone, Debug)]
pub struct SurfaceStyle {
    pub fill: Color32,
    pub text: Color32,
    pub outline: Color32,
    pub corner_radius: f32,
    pub padding: Vec2,
}

impl From<&Style> for SurfaceStyle {
    fn from(style: &Style) -> Self {
        let dark_mode = style.visuals.dark_mode;
        Self {
            fill: if dark_mode {
                blend(style.visuals.window_fill, Color32::WHITE, 0.06)
            } else {
                Color32::WHITE
            },
            text: if dark_mode {
                Color32::from_gray(0xe8)
            } else {
                Color32::from_gray(0x14)
            },
            outline: blend(style.visuals.window_fill, Color32::from_gray(0x80), 0.35),
            corner_radius: 4.0,
            padding: Vec2::new(16.0, 12.0),
        }
    }
}

/// Base style for the full-viewport backdrop behind modal-like widgets.
#[derive(Clone, Debug)]
pub struct OverlayStyle {
    pub fill: Color32,
}

impl From<&Style> for OverlayStyle {
    fn from(_style: &Style) -> Self {
        Self {
            fill: Color32::from_black_alpha(0x80),
        }
    }
}

/// Base style for the avatar's fixed-size round frame.
#[derive(Clone, Debug)]
pub struct AvatarStyle {
    pub size: f32,
    pub fill: Color32,
    pub text: Color32,
}

impl From<&Style> for AvatarStyle {
    fn from(_style: &Style) -> Self {
        Self {
            size: 48.0,
            fill: BLUE_500,
            text: Color32::WHITE,
        }
    }
}

/// Base style for the progress bar's track and fill.
#[derive(Clone, Debug)]
pub struct ProgressStyle {
    pub track: Color32,
    pub fill: Color32,
    pub text: Color32,
    pub height: f32,
}

impl From<&Style> for ProgressStyle {
    fn from(style: &Style) -> Self {
        Self {
            track: BLUE_950,
            fill: BLUE_500,
            text: style.visuals.strong_text_color(),
            height: 16.0,
        }
    }
}

/// Base style for the slider's rail and knob.
#[derive(Clone, Debug)]
pub struct SliderStyle {
    pub rail_bg: Color32,
    pub rail_fill: Color32,
    pub knob: Color32,
    pub knob_radius: f32,
    pub width: f32,
}

impl From<&Style> for SliderStyle {
    fn from(style: &Style) -> Self {
        Self {
            rail_bg: blend(style.visuals.window_fill, Color32::from_gray(0x80), 0.4),
            rail_fill: BLUE_500,
            knob: if style.visuals.dark_mode {
                Color32::from_gray(0xe8)
            } else {
                Color32::WHITE
            },
            knob_radius: 8.0,
            width: 200.0,
        }
    }
}

/// Gallery style presets. These only tune spacing and visuals; widget colors
/// come from the semantic styles above.
pub fn gallery_light() -> Style {
    let mut style = Style::default();
    style.visuals = gallery_visuals(Visuals::light());
    gallery_spacing(&mut style);
    style
}

pub fn gallery_dark() -> Style {
    let mut style = Style::default();
    style.visuals = gallery_visuals(Visuals::dark());
    gallery_spacing(&mut style);
    style
}

fn gallery_visuals(mut visuals: Visuals) -> Visuals {
    visuals.selection.bg_fill = blend(BLUE_500, visuals.window_fill, 0.5);
    visuals.selection.stroke = Stroke::new(1.5, BLUE_500);
    visuals.hyperlink_color = BLUE_600;
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow {
        offset: [2, 2],
        blur: 8,
        spread: 0,
        color: Color32::from_black_alpha(0x30),
    };
    visuals
}

fn gallery_spacing(style: &mut Style) {
    style.spacing.item_spacing = egui::vec2(10.0, 10.0);
    style.spacing.button_padding = egui::vec2(20.0, 8.0);
    style.spacing.interact_size = egui::vec2(34.0, 26.0);
    style.animation_time = 0.12;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_fields_win_over_defaults() {
        let class = Class::new().fill(RED_500).width(120.0);
        assert_eq!(class.fill, Some(RED_500));
        assert_eq!(class.text, None);
        assert_eq!(class.width, Some(120.0));
    }

    #[test]
    fn later_class_wins_on_conflict() {
        let base = Class::new().fill(RED_500).text(Color32::WHITE);
        let caller = Class::new().fill(BLUE_500);
        let merged = base.merge(caller);
        assert_eq!(merged.fill, Some(BLUE_500));
        assert_eq!(merged.text, Some(Color32::WHITE));
    }

    #[test]
    fn blend_endpoints_are_exact() {
        assert_eq!(blend(RED_500, BLUE_500, 0.0), RED_500);
        assert_eq!(blend(RED_500, BLUE_500, 1.0), BLUE_500);
    }
}

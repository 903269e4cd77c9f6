use std::ops::RangeInclusive;

use eframe::egui::{self, Sense, Stroke, TextEdit};

use crate::themes::{Class, SliderStyle};
use crate::WidgetContext;

/// Parse a typed-in slider value. Rejects anything that is not a finite
/// number; the caller keeps the previous value on rejection.
pub(crate) fn parse_value(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn format_value(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

struct EditBuffer {
    text: String,
}

#[derive(Debug)]
pub struct SliderResponse {
    pub changed: bool,
    pub value: f32,
    pub readout_rect: Option<egui::Rect>,
}

/// A horizontal value slider with an optional editable numeric readout.
/// Dragging snaps to whole numbers; the readout accepts any finite number
/// within the range and reverts on nonsense input.
#[must_use = "call .show(ctx) to draw the widget"]
pub struct Slider<'a> {
    id_salt: egui::Id,
    value: &'a mut f32,
    range: RangeInclusive<f32>,
    class: Class,
    show_value: bool,
    on_change: Option<Box<dyn FnMut(f32) + 'a>>,
}

impl<'a> Slider<'a> {
    pub fn new(id_salt: impl std::hash::Hash, value: &'a mut f32) -> Self {
        Self {
            id_salt: egui::Id::new(id_salt),
            value,
            range: 0.0..=100.0,
            class: Class::default(),
            show_value: true,
            on_change: None,
        }
    }

    pub fn range(mut self, range: RangeInclusive<f32>) -> Self {
        self.range = range;
        self
    }

    pub fn class(mut self, class: Class) -> Self {
        self.class = class;
        self
    }

    pub fn show_value(mut self, show_value: bool) -> Self {
        self.show_value = show_value;
        self
    }

    pub fn on_change(mut self, on_change: impl FnMut(f32) + 'a) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn show(self, ctx: &mut WidgetContext<'_>) -> SliderResponse {
        let Slider {
            id_salt,
            value,
            range,
            class,
            show_value,
            mut on_change,
        } = self;
        let host = ctx.host;
        let id = ctx.ui.make_persistent_id(id_salt);
        let style = SliderStyle::from(ctx.ui.style().as_ref());
        let width = class.width.unwrap_or(style.width);
        let (start, end) = (*range.start(), *range.end());
        let span = end - start;

        let mut new_value = None;
        let mut readout_rect = None;
        ctx.ui.horizontal(|ui| {
            let height = ui.spacing().interact_size.y.max(style.knob_radius * 2.0);
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(width, height), Sense::click_and_drag());

            if response.dragged() || response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let t = ((pos.x - rect.left()) / rect.width()).clamp(0.0, 1.0);
                    let picked = (start + t * span).round();
                    if picked != *value {
                        new_value = Some(picked);
                    }
                }
            }

            if ui.is_rect_visible(rect) {
                let shown = new_value.unwrap_or(*value);
                let t = if span == 0.0 {
                    0.0
                } else {
                    ((shown - start) / span).clamp(0.0, 1.0)
                };
                let rail = egui::Rect::from_center_size(
                    rect.center(),
                    egui::vec2(rect.width(), 6.0),
                );
                let painter = ui.painter();
                painter.rect_filled(rail, 3.0, class.outline.unwrap_or(style.rail_bg));
                let knob_x = rail.left() + t * rail.width();
                if t > 0.0 {
                    let filled = egui::Rect::from_min_max(
                        rail.min,
                        egui::pos2(knob_x, rail.bottom()),
                    );
                    painter.rect_filled(filled, 3.0, class.fill.unwrap_or(style.rail_fill));
                }
                let knob_center = egui::pos2(knob_x, rail.center().y);
                painter.circle_filled(knob_center, style.knob_radius, style.knob);
                painter.circle_stroke(
                    knob_center,
                    style.knob_radius,
                    Stroke::new(1.0, class.fill.unwrap_or(style.rail_fill)),
                );
            }

            if show_value {
                let buffer = host.store.get_or_insert_with(id.with("edit"), || EditBuffer {
                    text: String::new(),
                });
                let mut buffer = buffer.write();
                let editing = ui.memory(|m| m.has_focus(id.with("readout")));
                if !editing {
                    buffer.text = format_value(new_value.unwrap_or(*value));
                }
                let edit = ui.add(
                    TextEdit::singleline(&mut buffer.text)
                        .id(id.with("readout"))
                        .desired_width(48.0),
                );
                readout_rect = Some(edit.rect);
                if edit.lost_focus() {
                    match parse_value(&buffer.text) {
                        Some(typed) => {
                            let typed = typed.clamp(start.min(end), start.max(end));
                            if typed != *value {
                                new_value = Some(typed);
                            }
                        }
                        None => {
                            log::debug!("slider {id:?} rejected input {:?}", buffer.text);
                            buffer.text = format_value(*value);
                        }
                    }
                }
            }
        });

        let changed = new_value.is_some();
        if let Some(picked) = new_value {
            *value = picked;
            if let Some(on_change) = on_change.as_mut() {
                on_change(picked);
            }
        }
        SliderResponse {
            changed,
            value: *value,
            readout_rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!(parse_value("42"), Some(42.0));
        assert_eq!(parse_value("  7.5 "), Some(7.5));
        assert_eq!(parse_value("-3"), Some(-3.0));
    }

    #[test]
    fn rejects_nonsense_input() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("12abc"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn formats_whole_numbers_without_decimals() {
        assert_eq!(format_value(33.0), "33");
        assert_eq!(format_value(33.5), "33.5");
    }

    use crate::{WidgetContext, WidgetHost};
    use std::cell::RefCell;

    fn run_frame(
        ctx: &egui::Context,
        host: &WidgetHost,
        time: f64,
        events: Vec<egui::Event>,
        value: &RefCell<f32>,
        picked: &RefCell<Option<f32>>,
        out: &RefCell<Option<SliderResponse>>,
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
                let mut current = value.borrow_mut();
                let response = Slider::new("volume", &mut current)
                    .on_change(|v| *picked.borrow_mut() = Some(v))
                    .show(&mut wctx);
                *out.borrow_mut() = Some(response);
            });
        });
    }

    fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn committed_readout_text_reaches_the_caller_as_a_number() {
        let ctx = egui::Context::default();
        let host = WidgetHost::new();
        let value = RefCell::new(33.0_f32);
        let picked = RefCell::new(None);
        let out = RefCell::new(None);

        run_frame(&ctx, &host, 0.0, vec![], &value, &picked, &out);
        let center = out
            .borrow_mut()
            .take()
            .unwrap()
            .readout_rect
            .unwrap()
            .center();

        // Click the readout to focus it.
        run_frame(
            &ctx,
            &host,
            0.1,
            vec![egui::Event::PointerMoved(center)],
            &value,
            &picked,
            &out,
        );
        run_frame(
            &ctx,
            &host,
            0.2,
            vec![egui::Event::PointerButton {
                pos: center,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            }],
            &value,
            &picked,
            &out,
        );
        run_frame(
            &ctx,
            &host,
            0.3,
            vec![egui::Event::PointerButton {
                pos: center,
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::NONE,
            }],
            &value,
            &picked,
            &out,
        );

        // Replace the text with "57" and commit with enter.
        run_frame(
            &ctx,
            &host,
            0.4,
            vec![key(egui::Key::A, egui::Modifiers::COMMAND)],
            &value,
            &picked,
            &out,
        );
        run_frame(
            &ctx,
            &host,
            0.5,
            vec![egui::Event::Text("57".to_owned())],
            &value,
            &picked,
            &out,
        );
        run_frame(
            &ctx,
            &host,
            0.6,
            vec![key(egui::Key::Enter, egui::Modifiers::NONE)],
            &value,
            &picked,
            &out,
        );

        let committed = out.borrow_mut().take().unwrap();
        assert!(committed.changed);
        assert_eq!(committed.value, 57.0);
        assert_eq!(*value.borrow(), 57.0);
        assert_eq!(*picked.borrow(), Some(57.0));
    }
}

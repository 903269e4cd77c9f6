//! foldout — a small catalog of composable disclosure and display widgets
//! for egui.
//!
//! The catalog has two kinds of widgets. Disclosure widgets ([`Dropdown`],
//! [`Modal`], [`Hover`], [`Toast`]) own a boolean open/closed state and reveal
//! designated content only while open, wiring their own dismissal channels
//! (escape key, backdrop activation, hover debounce, auto-timeout). Pure
//! render widgets ([`Avatar`], [`Badge`], [`Progress`], [`Slider`]) map typed
//! inputs straight to painted output.
//!
//! Widgets declare their children as role-tagged [`Node`]s; unrecognized
//! children are silently dropped and the rest are reordered to a canonical
//! layering. Per-instance state lives in a [`StateStore`] owned by the
//! [`WidgetHost`], never in globals, so sibling instances cannot interfere.

pub mod disclosure;
pub mod keys;
pub mod node;
pub mod prelude;
pub mod scope;
pub mod state;
pub mod themes;
pub mod widgets;

use eframe::egui;

pub use crate::disclosure::{close_button, DisclosureCore, DisclosureLink};
pub use crate::keys::{KeyRoster, KeySubscription};
pub use crate::node::{Node, Role};
pub use crate::scope::ScopeStack;
pub use crate::state::StateStore;
pub use crate::themes::Class;
pub use crate::widgets::{Avatar, Badge, Dropdown, Hover, Modal, Progress, Slider, Toast};

/// Everything the catalog's widgets need besides a `Ui`: retained instance
/// state, the escape-key roster and the parent-to-child scope channel.
#[derive(Default)]
pub struct WidgetHost {
    pub store: state::StateStore,
    pub keys: keys::KeyRoster,
    pub scopes: scope::ScopeStack,
}

impl WidgetHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run once per frame, before any widget draws.
    pub fn begin_frame(&self, ctx: &egui::Context) {
        self.keys.observe(ctx);
    }
}

/// A `Ui` paired with its [`WidgetHost`], handed to every catalog widget and
/// to child render closures.
pub struct WidgetContext<'a> {
    pub ui: &'a mut egui::Ui,
    pub host: &'a WidgetHost,
}

impl<'a> WidgetContext<'a> {
    pub fn new(ui: &'a mut egui::Ui, host: &'a WidgetHost) -> Self {
        Self { ui, host }
    }
}

type SectionFn = Box<dyn FnMut(&mut WidgetContext<'_>)>;

/// The demo page: named sections rendered down a scrolling central panel.
pub struct Gallery {
    host: WidgetHost,
    sections: Vec<(String, SectionFn)>,
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            host: WidgetHost::new(),
            sections: Vec::new(),
        }
    }

    pub fn section(
        &mut self,
        title: impl Into<String>,
        draw: impl FnMut(&mut WidgetContext<'_>) + 'static,
    ) {
        self.sections.push((title.into(), Box::new(draw)));
    }

    pub fn run(self, name: &str) -> eframe::Result {
        let mut native_options = eframe::NativeOptions::default();
        native_options.persist_window = true;

        eframe::run_native(
            name,
            native_options,
            Box::new(|cc| {
                let ctx = cc.egui_ctx.clone();
                ctrlc::set_handler(move || ctx.send_viewport_cmd(egui::ViewportCommand::Close))
                    .expect("failed to set exit signal handler");

                egui_extras::install_image_loaders(&cc.egui_ctx);

                cc.egui_ctx
                    .set_style_of(egui::Theme::Light, themes::gallery_light());
                cc.egui_ctx
                    .set_style_of(egui::Theme::Dark, themes::gallery_dark());
                let theme = match dark_light::detect() {
                    Ok(dark_light::Mode::Light) => egui::ThemePreference::Light,
                    Ok(dark_light::Mode::Dark) => egui::ThemePreference::Dark,
                    Ok(dark_light::Mode::Unspecified) | Err(_) => egui::ThemePreference::Dark,
                };
                cc.egui_ctx.set_theme(theme);

                Ok(Box::new(self))
            }),
        )
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for Gallery {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.host.begin_frame(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink(false)
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(740.0);
                        for (title, draw) in &mut self.sections {
                            ui.push_id(title.as_str(), |ui| {
                                ui.heading(title.as_str());
                                let mut ctx = WidgetContext::new(ui, &self.host);
                                draw(&mut ctx);
                                ui.separator();
                            });
                        }
                    });
                });
        });
    }
}

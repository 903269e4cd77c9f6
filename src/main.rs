use std::sync::Arc;

use foldout::prelude::*;
use parking_lot::RwLock;

const PORTRAIT: &str =
    "https://d2qp0siotla746.cloudfront.net/img/use-cases/profile-picture/template_0.jpg";

fn main() -> eframe::Result {
    env_logger::init();

    let mut gallery = Gallery::new();
    let progress_value = Arc::new(RwLock::new(33.0_f32));
    let toast_open = Arc::new(RwLock::new(false));

    gallery.section("Avatar", |ctx| {
        ctx.ui.label("With an image, and with fallback initials:");
        Avatar::new()
            .child(Node::image(PORTRAIT, "profile picture"))
            .child(Node::fallback("AD"))
            .show(ctx);
        Avatar::new().child(Node::fallback("AD")).show(ctx);
    });

    gallery.section("Modal", |ctx| {
        Modal::new("demo-modal")
            .child(Node::trigger("Open modal"))
            .child(Node::overlay())
            .child(Node::content(|ctx| {
                ctx.ui.heading("A modal dialog");
                ctx.ui
                    .label("Close it with escape, the backdrop, or the button below.");
                close_button(ctx, "Got it", &Class::default());
            }))
            .show(ctx);
    });

    {
        let toast_open = toast_open.clone();
        gallery.section("Toast", move |ctx| {
            if ctx.ui.button("Show toast").clicked() {
                *toast_open.write() = true;
            }
            let mut open = toast_open.write();
            Toast::new("demo-toast", &mut open)
                .child(Node::content(|ctx| {
                    ctx.ui.label("Your changes have been saved.");
                }))
                .child(Node::close("Dismiss"))
                .show(ctx);
        });
    }

    gallery.section("Dropdown", |ctx| {
        Dropdown::new("demo-dropdown")
            .child(Node::trigger("Dropdown"))
            .child(Node::overlay())
            .child(Node::content(|ctx| {
                for item in ["Hello", "World", "From", "Dropdown", "Menu"] {
                    if ctx.ui.button(item).clicked() {
                        log::info!("picked {item}");
                    }
                }
            }))
            .show(ctx);
    });

    gallery.section("Badge", |ctx| {
        ctx.ui.horizontal(|ui| {
            ui.add(Badge::new("error").tone(BadgeTone::Error));
            ui.add(Badge::new("info").tone(BadgeTone::Info));
            ui.add(Badge::new("warning").tone(BadgeTone::Warning));
            ui.add(Badge::new("success").tone(BadgeTone::Success));
            ui.add(Badge::new("default"));
        });
    });

    gallery.section("Hover card", |ctx| {
        Hover::new("demo-hover")
            .child(Node::trigger("Hover over me"))
            .child(Node::content(|ctx| {
                ctx.ui
                    .label("A hover card. It stays up while the pointer rests on it.");
            }))
            .show(ctx);
    });

    {
        let progress_value = progress_value.clone();
        gallery.section("Progress", move |ctx| {
            Progress::new(*progress_value.read())
                .child(Node::fill())
                .child(Node::value())
                .show(ctx);
        });
    }

    {
        let progress_value = progress_value.clone();
        gallery.section("Slider", move |ctx| {
            let mut value = progress_value.write();
            Slider::new("demo-slider", &mut value)
                .on_change(|picked| log::info!("slider moved to {picked}"))
                .show(ctx);
        });
    }

    gallery.run("foldout gallery")
}

//! HUD Stack Demo
//!
//! Drives a `HudManager` through a short scripted session and renders each
//! frame to the terminal.
//!
//! Features demonstrated:
//! - Loading spinner that blocks background taps
//! - Alert stacked on top with its own background color
//! - Timed toasts dismissed by the frame clock
//! - Defaults loaded from TOML
//!
//! Run with: RUST_LOG=debug cargo run -p halo_hud --example stack_demo

use std::time::Duration;

use halo_hud::{
    BackgroundLayer, Color, ContentLayer, FrameScheduler, HudDefaults, HudEvent, HudManager,
    HudOptions, PresentationHost, Result, ToastPosition, ToastStyle,
};
use tracing_subscriber::EnvFilter;

const DEFAULTS: &str = r#"
interactive_hide = false
background_color = { r = 0.0, g = 0.0, b = 0.0, a = 0.4 }

[animation]
duration_ms = 150
easing = { type = "ease_out" }
"#;

const FRAME: Duration = Duration::from_millis(250);

/// Prints one line per layer
struct ConsoleHost {
    frame: usize,
}

impl PresentationHost<String> for ConsoleHost {
    fn background(&mut self, layer: BackgroundLayer) {
        if layer.visible {
            let [r, g, b, a] = layer.color.to_array();
            println!(
                "[frame {:>2}] background rgba({r:.1}, {g:.1}, {b:.1}, {a:.1}) tap-to-dismiss={}",
                self.frame, layer.interactive_hide
            );
        } else {
            println!("[frame {:>2}] (nothing presented)", self.frame);
        }
    }

    fn content(&mut self, layer: ContentLayer<'_, String>) {
        println!(
            "           z={} {:?} {} ({})",
            layer.z_index, layer.alignment, layer.content, layer.id
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let scheduler = FrameScheduler::new();
    let hud = HudManager::with_scheduler(HudDefaults::from_toml_str(DEFAULTS)?, scheduler.clone());

    hud.subscribe(|event| match event {
        HudEvent::Presented { animation } => {
            tracing::info!(duration_ms = animation.duration_ms, "background fading in")
        }
        HudEvent::Dismissed { animation } => {
            tracing::info!(duration_ms = animation.duration_ms, "background fading out")
        }
        _ => {}
    });

    let mut host = ConsoleHost { frame: 0 };
    let render = |hud: &HudManager<String>, host: &mut ConsoleHost| {
        hud.present(host);
        host.frame += 1;
        scheduler.advance(FRAME);
    };

    let spinner = hud.toast(ToastPosition::Center, ToastStyle::Loading, || {
        "Loading…".to_string()
    });
    render(&hud, &mut host);

    // Taps are swallowed while only the spinner is up
    if !hud.handle_background_tap() {
        println!("           tap ignored");
    }

    hud.show(
        HudOptions::with_id("alert")
            .background_color(Color::from_hex(0x1E1E2E).with_alpha(0.8))
            .interactive_hide(true),
        || "Connection restored".to_string(),
    );
    render(&hud, &mut host);

    hud.hide("alert");
    hud.hide(&spinner);
    hud.toast(
        ToastPosition::Bottom,
        ToastStyle::Timed(Duration::from_millis(600)),
        || "Saved".to_string(),
    );
    hud.toast(
        ToastPosition::Top,
        ToastStyle::Timed(Duration::from_millis(1000)),
        || "3 new messages".to_string(),
    );

    while hud.is_presented() {
        render(&hud, &mut host);
    }
    render(&hud, &mut host);

    Ok(())
}

//! Teamspace desktop app entry point.

use eframe::egui;
use teamspace::app::{views, AppState};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Teamspace",
        options,
        Box::new(|_cc| Ok(Box::new(TeamspaceApp::default()))),
    )
}

/// Main application wrapper
struct TeamspaceApp {
    state: AppState,
}

impl Default for TeamspaceApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for TeamspaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_results();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main(ctx, &mut self.state);

        // Jobs and the realtime session finish between frames.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

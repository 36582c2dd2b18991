use eframe::egui;

use crate::app::state::AppState;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let AppState {
        sign_in, services, ..
    } = state;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            let top_space = (ui.available_height() - 260.0).max(0.0) / 2.0;
            ui.add_space(top_space);

            ui.label(egui::RichText::new("Teamspace").size(32.0).strong());
            ui.add_space(20.0);

            if let Some(error) = &sign_in.error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
                ui.add_space(10.0);
            }

            ui.label("Email");
            ui.add_sized(
                [280.0, 28.0],
                egui::TextEdit::singleline(&mut sign_in.email),
            );
            ui.add_space(8.0);

            ui.label("Password");
            ui.add_sized(
                [280.0, 28.0],
                egui::TextEdit::singleline(&mut sign_in.password).password(true),
            );
            ui.add_space(16.0);

            if ui
                .add_sized([120.0, 32.0], egui::Button::new("Sign in"))
                .clicked()
            {
                sign_in.submit(services);
            }

            if sign_in.loading {
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.add_space((ui.available_width() - 80.0) / 2.0);
                    ui.spinner();
                    ui.label("Signing in...");
                });
            }
        });
    });
}

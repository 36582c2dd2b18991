use eframe::egui;

use crate::app::state::AppState;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let mut close = false;
    {
        let AppState { editor, .. } = state;
        let Some(editor) = editor else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label("No document open.");
            });
            return;
        };
        let session = &mut editor.session;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Back").clicked() {
                    close = true;
                }
                ui.heading(session.title.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(session.state.label());
                });
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut session.buffer)
                        .desired_width(f32::INFINITY)
                        .desired_rows(24),
                );
            });
        });
    }
    if close {
        state.close_editor();
    }
}

//! egui Views
//!
//! Rendering only: each view reads and mutates its state struct and calls
//! the state handlers on user actions. Anything testable lives in
//! `app::state`, not here.

pub mod auth_view;
pub mod calendar_view;
pub mod documents_view;
pub mod editor_view;
pub mod profile_view;

use crate::app::state::{AppState, AppView};
use crate::app::NoticeLevel;
use eframe::egui;

/// Top bar: app title, team picker, navigation, sign-out. Also renders the
/// feedback notices underneath.
pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Teamspace").strong());
            if !state.session.is_authenticated() {
                return;
            }
            ui.separator();

            let current_team = state
                .workspace
                .as_ref()
                .and_then(|workspace| {
                    state
                        .participants
                        .iter()
                        .find(|p| p.team_id == Some(workspace.team_id))
                })
                .map(|p| p.team_label().to_string())
                .unwrap_or_else(|| "Pick a team".to_string());
            let mut picked = None;
            egui::ComboBox::from_id_salt("team_picker")
                .selected_text(current_team)
                .show_ui(ui, |ui| {
                    for participant in &state.participants {
                        if ui
                            .selectable_label(false, participant.team_label())
                            .clicked()
                        {
                            picked = Some(participant.team_participants_id);
                        }
                    }
                });
            if let Some(team_participants_id) = picked {
                state.select_team(team_participants_id);
            }

            ui.separator();
            for (view, label) in [
                (AppView::Calendar, "Calendar"),
                (AppView::Documents, "Documents"),
                (AppView::Profile, "Profile"),
            ] {
                if ui.selectable_label(state.view == view, label).clicked() {
                    state.view = view;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Sign out").clicked() {
                    state.sign_out();
                }
                if let Some(user) = state.session.user() {
                    ui.label(&user.name);
                }
            });
        });
    });
    render_notices(ctx, state);
}

fn render_notices(ctx: &egui::Context, state: &mut AppState) {
    if state.feedback.is_empty() {
        return;
    }
    egui::TopBottomPanel::top("notices").show(ctx, |ui| {
        let mut dismiss = None;
        for (index, notice) in state.feedback.notices().enumerate() {
            ui.horizontal(|ui| {
                let color = match notice.level {
                    NoticeLevel::Error => egui::Color32::LIGHT_RED,
                    NoticeLevel::Info => egui::Color32::LIGHT_GREEN,
                };
                ui.colored_label(color, &notice.message);
                if ui.small_button("x").clicked() {
                    dismiss = Some(index);
                }
            });
        }
        if let Some(index) = dismiss {
            state.feedback.dismiss(index);
        }
    });
}

/// Route to the active view
pub fn render_main(ctx: &egui::Context, state: &mut AppState) {
    match state.view {
        AppView::SignIn => auth_view::render(ctx, state),
        AppView::Calendar => calendar_view::render(ctx, state),
        AppView::Documents => documents_view::render(ctx, state),
        AppView::Editor => editor_view::render(ctx, state),
        AppView::Profile => profile_view::render(ctx, state),
    }
}

use eframe::egui;

use crate::app::jobs::Services;
use crate::app::state::profile::{TeamProfileState, UserProfileState};
use crate::app::state::AppState;
use crate::app::Feedback;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let AppState {
        profile,
        services,
        feedback,
        ..
    } = state;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.columns(2, |columns| {
            render_user_profile(&mut columns[0], &mut profile.user, services);
            render_team_profile(&mut columns[1], &mut profile.team, services, feedback);
        });
    });
}

fn render_user_profile(ui: &mut egui::Ui, profile: &mut UserProfileState, services: &Services) {
    ui.heading("My profile");
    ui.separator();

    if let Some(error) = &profile.error {
        ui.colored_label(egui::Color32::LIGHT_RED, error);
    }
    match &profile.user {
        Some(user) => {
            egui::Grid::new("user_profile").num_columns(2).show(ui, |ui| {
                ui.label("Name");
                ui.label(&user.name);
                ui.end_row();
                ui.label("Email");
                ui.label(&user.email);
                ui.end_row();
            });
        }
        None => {
            ui.label("Loading profile...");
        }
    }

    if !profile.teams.is_empty() {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("My teams").strong());
        for team in &profile.teams {
            ui.label(&team.team_name);
        }
    }

    ui.add_space(16.0);
    ui.heading("Change password");
    ui.separator();

    ui.label("Current password");
    ui.add(egui::TextEdit::singleline(&mut profile.current_password).password(true));
    ui.label("New password (8+ characters)");
    ui.add(egui::TextEdit::singleline(&mut profile.new_password).password(true));
    ui.label("Confirm new password");
    ui.add(egui::TextEdit::singleline(&mut profile.confirm_password).password(true));

    if let Some(error) = &profile.password_error {
        ui.colored_label(egui::Color32::LIGHT_RED, error);
    }
    if profile.password_changed {
        ui.colored_label(egui::Color32::LIGHT_GREEN, "Password changed.");
    }
    if ui.button("Change").clicked() {
        profile.submit_password_change(services);
    }
}

fn render_team_profile(
    ui: &mut egui::Ui,
    profile: &mut TeamProfileState,
    services: &Services,
    feedback: &mut Feedback,
) {
    ui.heading("My team profile");
    ui.separator();

    let options: Vec<(i64, String)> = profile
        .participants
        .iter()
        .map(|p| (p.team_participants_id, p.team_label().to_string()))
        .collect();
    let selected_label = profile
        .selected
        .as_ref()
        .map(|p| p.team_label().to_string())
        .unwrap_or_else(|| "Pick a team".to_string());
    let mut picked = None;
    egui::ComboBox::from_label("Team")
        .selected_text(selected_label)
        .show_ui(ui, |ui| {
            for (id, label) in &options {
                if ui.selectable_label(false, label).clicked() {
                    picked = Some(*id);
                }
            }
        });
    if let Some(team_participants_id) = picked {
        profile.select(team_participants_id);
        profile.refresh_selected(services);
    }

    let Some(selected) = profile.selected.clone() else {
        return;
    };

    ui.add_space(8.0);
    if let Some(url) = &selected.participants_profile_url {
        ui.label(format!("Avatar: {}", url));
    }
    ui.label("Nickname");
    ui.text_edit_singleline(&mut profile.nickname);

    ui.label("Avatar image path");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut profile.avatar_path);
        if ui.button("Load").clicked() {
            profile.load_avatar(feedback);
        }
    });
    if let Some(avatar) = &profile.avatar {
        ui.label(format!("Ready to upload: {}", avatar.file_name));
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button("Update profile").clicked() {
            profile.submit_update(services, feedback);
        }
        if ui.button("Leave team").clicked() {
            profile.request_leave(services, feedback);
        }
    });
    if selected.is_leader() {
        ui.label(
            egui::RichText::new("You lead this team; hand leadership over before leaving.")
                .weak(),
        );
    }
}

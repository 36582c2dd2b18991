use chrono::{Datelike, NaiveDate};
use eframe::egui;

use crate::app::jobs::Services;
use crate::app::state::calendar::{add_months, format_event_time, CalendarState, DisplayEvent};
use crate::app::state::categories::CategoryPanel;
use crate::app::state::{AppState, TeamWorkspace};
use crate::app::Feedback;
use crate::shared::models::{Category, CategoryType};

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let AppState {
        workspace,
        services,
        feedback,
        ..
    } = state;
    let Some(workspace) = workspace else {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Pick a team in the top bar to see its calendar.");
        });
        return;
    };
    let TeamWorkspace {
        categories,
        calendar,
        ..
    } = workspace;

    render_category_panel(ctx, categories, services);
    render_calendar(ctx, calendar, &categories.categories, services, feedback);
}

fn render_category_panel(ctx: &egui::Context, panel: &mut CategoryPanel, services: &Services) {
    egui::SidePanel::left("categories")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Categories");
                if ui.button("Add").clicked() {
                    panel.open_create_form();
                }
            });
            ui.separator();

            let mut edit = None;
            let mut delete = None;
            for category in &panel.categories {
                ui.horizontal(|ui| {
                    ui.label(&category.category_name);
                    if ui.small_button("x").clicked() {
                        delete = Some(category.category_id);
                    }
                    if ui.small_button("edit").clicked() {
                        edit = Some(category.clone());
                    }
                });
            }
            if let Some(category) = edit {
                panel.open_edit_form(&category);
            }
            if let Some(category_id) = delete {
                panel.open_delete_dialog(category_id);
            }
        });

    render_category_form(ctx, panel, services);
    render_category_delete_dialog(ctx, panel, services);
}

fn render_category_form(ctx: &egui::Context, panel: &mut CategoryPanel, services: &Services) {
    let focus_name = panel.focus_name_input;
    let mut submit = false;
    let mut close = false;
    {
        let Some(form) = panel.form.as_mut() else {
            return;
        };
        let editing = form.editing_category_id.is_some();
        let title = if editing { "Edit category" } else { "Add category" };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ComboBox::from_label("Type")
                    .selected_text(match form.category_type {
                        CategoryType::Schedule => "Schedule",
                        CategoryType::Documents => "Documents",
                    })
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut form.category_type,
                            CategoryType::Schedule,
                            "Schedule",
                        );
                        ui.selectable_value(
                            &mut form.category_type,
                            CategoryType::Documents,
                            "Documents",
                        );
                    });

                ui.label("Name");
                let response = ui.text_edit_singleline(&mut form.category_name);
                if focus_name {
                    response.request_focus();
                }

                ui.label("Color");
                ui.text_edit_singleline(&mut form.color);

                ui.horizontal(|ui| {
                    if ui.button(if editing { "Save" } else { "Register" }).clicked() {
                        submit = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
    }
    if focus_name {
        panel.focus_name_input = false;
    }
    if submit {
        panel.submit_form(services);
    }
    if close {
        panel.close_form();
    }
}

fn render_category_delete_dialog(
    ctx: &egui::Context,
    panel: &mut CategoryPanel,
    services: &Services,
) {
    let options: Vec<(i64, String)> = panel
        .categories
        .iter()
        .map(|c| (c.category_id, c.category_name.clone()))
        .collect();
    let mut submit = false;
    let mut close = false;
    {
        let Some(dialog) = panel.delete_dialog.as_mut() else {
            return;
        };
        egui::Window::new("Delete category")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Move its events to another category?");
                ui.radio_value(&mut dialog.is_moved, true, "Yes");
                ui.radio_value(&mut dialog.is_moved, false, "No (delete them too)");

                if dialog.is_moved {
                    let selected_label = options
                        .iter()
                        .find(|(id, _)| Some(*id) == dialog.new_category_id)
                        .map(|(_, name)| name.clone())
                        .unwrap_or_else(|| "Pick a category".to_string());
                    egui::ComboBox::from_label("Target")
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for (id, name) in &options {
                                if *id == dialog.category_id {
                                    continue;
                                }
                                ui.selectable_value(&mut dialog.new_category_id, Some(*id), name);
                            }
                        });
                }

                ui.horizontal(|ui| {
                    if ui.button("Confirm").clicked() {
                        submit = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
    }
    if submit {
        panel.submit_delete(services);
    }
    if close {
        panel.close_delete_dialog();
    }
}

fn render_calendar(
    ctx: &egui::Context,
    calendar: &mut CalendarState,
    category_options: &[Category],
    services: &Services,
    feedback: &mut Feedback,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("<").clicked() {
                calendar.visible_month = add_months(calendar.visible_month, -1);
            }
            ui.heading(calendar.visible_month.format("%B %Y").to_string());
            if ui.button(">").clicked() {
                calendar.visible_month = add_months(calendar.visible_month, 1);
            }
            if ui.button("Today").clicked() {
                let today = chrono::Local::now().date_naive();
                calendar.visible_month = today.with_day(1).unwrap_or(today);
            }
            if ui.button("Refresh").clicked() {
                calendar.refresh(services);
            }
        });
        ui.separator();

        let mut clicked_event: Option<DisplayEvent> = None;
        let mut clicked_date: Option<NaiveDate> = None;
        let cells = month_cells(calendar.visible_month);
        egui::Grid::new("calendar_grid")
            .num_columns(7)
            .min_col_width(110.0)
            .show(ui, |ui| {
                for weekday in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
                    ui.label(egui::RichText::new(weekday).strong());
                }
                ui.end_row();
                for week in cells.chunks(7) {
                    for cell in week {
                        match cell {
                            Some(date) => {
                                ui.vertical(|ui| {
                                    if ui.button(date.day().to_string()).clicked() {
                                        clicked_date = Some(*date);
                                    }
                                    for event in calendar.events_on(*date) {
                                        if ui.small_button(&event.title).clicked() {
                                            clicked_event = Some(event.clone());
                                        }
                                    }
                                });
                            }
                            None => {
                                ui.label("");
                            }
                        }
                    }
                    ui.end_row();
                }
            });
        if let Some(event) = clicked_event {
            calendar.select_event(&event);
        }
        if let Some(date) = clicked_date {
            calendar.select_date(date);
        }
    });

    render_event_detail(ctx, calendar);
    render_delete_confirmation(ctx, calendar, services);
    render_event_form(ctx, calendar, category_options, services, feedback);
}

/// Grid cells for one month: leading blanks to align the first weekday,
/// then every day, then trailing blanks to a full week.
fn month_cells(month_start: NaiveDate) -> Vec<Option<NaiveDate>> {
    let offset = month_start.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; offset];
    let mut day = Some(month_start);
    while let Some(date) = day {
        if date.month() != month_start.month() {
            break;
        }
        cells.push(Some(date));
        day = date.succ_opt();
    }
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}

fn render_event_detail(ctx: &egui::Context, calendar: &mut CalendarState) {
    let mut edit = false;
    let mut delete = false;
    let mut close = false;
    {
        let Some(selected) = &calendar.selected else {
            return;
        };
        egui::Window::new(selected.title.as_str())
            .id(egui::Id::new("event_detail"))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("When      {}", format_event_time(selected.start)));
                ui.label(format!("What      {}", selected.content));
                ui.label(format!("Where     {}", selected.place));
                ui.label(format!("Category  {}", selected.category_name));
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Edit").clicked() {
                        edit = true;
                    }
                    if ui.button("Delete").clicked() {
                        delete = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
    }
    if edit {
        calendar.edit_selected();
    }
    if delete {
        calendar.request_delete();
    }
    if close {
        calendar.clear_selection();
    }
}

fn render_delete_confirmation(
    ctx: &egui::Context,
    calendar: &mut CalendarState,
    services: &Services,
) {
    if calendar.pending_delete.is_none() {
        return;
    }
    let mut confirm = false;
    let mut cancel = false;
    egui::Window::new("Delete event")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Delete this event?");
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    confirm = true;
                }
                if ui.button("No").clicked() {
                    cancel = true;
                }
            });
        });
    if confirm {
        calendar.confirm_delete(services);
    }
    if cancel {
        calendar.cancel_delete();
    }
}

fn render_event_form(
    ctx: &egui::Context,
    calendar: &mut CalendarState,
    category_options: &[Category],
    services: &Services,
    feedback: &mut Feedback,
) {
    let mut submit = false;
    let mut close = false;
    {
        let Some(form) = calendar.form.as_mut() else {
            return;
        };
        let editing = form.editing_schedule_id.is_some();
        let title = if editing { "Edit event" } else { "New event" };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Title");
                ui.text_edit_singleline(&mut form.title);
                ui.label("Content");
                ui.text_edit_multiline(&mut form.content);
                ui.label("Place");
                ui.text_edit_singleline(&mut form.place);
                ui.label("Start (2024-01-08T10:00)");
                ui.text_edit_singleline(&mut form.start_text);
                ui.label("End");
                ui.text_edit_singleline(&mut form.end_text);

                let selected_label = category_options
                    .iter()
                    .find(|c| Some(c.category_id) == form.category_id)
                    .map(|c| c.category_name.clone())
                    .unwrap_or_else(|| "Pick a category".to_string());
                egui::ComboBox::from_label("Category")
                    .selected_text(selected_label)
                    .show_ui(ui, |ui| {
                        for category in category_options {
                            ui.selectable_value(
                                &mut form.category_id,
                                Some(category.category_id),
                                &category.category_name,
                            );
                        }
                    });

                ui.label("Color");
                ui.text_edit_singleline(&mut form.color);

                ui.horizontal(|ui| {
                    if ui.button(if editing { "Save" } else { "Register" }).clicked() {
                        submit = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
    }
    if submit {
        calendar.submit_form(services, feedback);
    }
    if close {
        calendar.close_form();
    }
}

use eframe::egui;

use crate::app::jobs::Services;
use crate::app::state::documents::DocumentListState;
use crate::app::state::AppState;
use crate::app::Feedback;
use crate::shared::models::Document;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let mut open: Option<Document> = None;
    {
        let AppState {
            workspace,
            services,
            feedback,
            ..
        } = state;
        let Some(workspace) = workspace else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label("Pick a team in the top bar to see its documents.");
            });
            return;
        };
        let documents = &mut workspace.documents;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search");
                let mut term = documents.search_term.clone();
                if ui
                    .add_sized([240.0, 24.0], egui::TextEdit::singleline(&mut term))
                    .changed()
                {
                    documents.set_search_term(term);
                }
                if ui.button("New document").clicked() {
                    documents.open_create_form();
                }
                if ui.button("Refresh").clicked() {
                    documents.refresh(services);
                }
            });
            ui.separator();

            let visible: Vec<Document> = documents.visible().into_iter().cloned().collect();
            if visible.is_empty() {
                ui.label("No documents.");
            }
            for document in &visible {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(&document.title).strong());
                            ui.label(document.preview());
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Open").clicked() {
                                    open = Some(document.clone());
                                }
                                ui.vertical(|ui| {
                                    if let Some(created) = document.created_dt {
                                        ui.label(format!("Created {}", created.format("%Y-%m-%d")));
                                    }
                                    if let Some(updated) = document.updated_dt {
                                        ui.label(format!("Updated {}", updated.format("%Y-%m-%d")));
                                    }
                                });
                            },
                        );
                    });
                });
            }

            let pages = documents.page_count();
            if pages > 1 {
                ui.separator();
                ui.horizontal(|ui| {
                    for page in 0..pages {
                        if ui
                            .selectable_label(documents.page == page, (page + 1).to_string())
                            .clicked()
                        {
                            documents.set_page(page);
                        }
                    }
                });
            }
        });

        render_create_form(ctx, documents, services, feedback);
    }
    if let Some(document) = open {
        state.open_editor(&document);
    }
}

fn render_create_form(
    ctx: &egui::Context,
    documents: &mut DocumentListState,
    services: &Services,
    feedback: &mut Feedback,
) {
    let mut submit = false;
    let mut close = false;
    {
        let Some(form) = documents.create_form.as_mut() else {
            return;
        };
        egui::Window::new("New document")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Title");
                ui.text_edit_singleline(&mut form.title);
                ui.label("Content");
                ui.text_edit_multiline(&mut form.content);
                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        submit = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
    }
    if submit {
        documents.submit_create(services, feedback);
    }
    if close {
        documents.close_create_form();
    }
}

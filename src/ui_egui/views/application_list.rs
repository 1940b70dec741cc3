use egui::{Rounding, Sense, Stroke, Vec2};

use super::palette::{status_color, with_alpha};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::event::JobEvent;
use crate::ui_egui::theme::AppTheme;

/// Action returned from the application list
pub enum ApplicationListAction {
    /// No action
    None,
    /// Open the new-application dialog
    Create,
    /// Open an existing application for editing
    Edit(String),
    /// Ask for delete confirmation
    Delete(String),
}

/// Search and filter state owned by the app shell so it survives frames.
#[derive(Default)]
pub struct ApplicationListState {
    pub query: String,
    pub status_filter: Option<ApplicationStatus>,
}

pub struct ApplicationListView;

impl ApplicationListView {
    pub fn show(
        ui: &mut egui::Ui,
        state: &mut ApplicationListState,
        applications: &[Application],
        events: &[JobEvent],
        theme: &AppTheme,
    ) -> ApplicationListAction {
        let mut action = ApplicationListAction::None;

        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.add(
                egui::TextEdit::singleline(&mut state.query)
                    .desired_width(220.0)
                    .hint_text("company or position"),
            );

            egui::ComboBox::from_id_source("status_filter")
                .selected_text(
                    state
                        .status_filter
                        .map(|s| s.label())
                        .unwrap_or("All statuses"),
                )
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut state.status_filter, None, "All statuses");
                    for status in ApplicationStatus::all() {
                        ui.selectable_value(&mut state.status_filter, Some(status), status.label());
                    }
                });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("+ New application").clicked() {
                    action = ApplicationListAction::Create;
                }
            });
        });

        ui.add_space(6.0);
        ui.separator();
        ui.add_space(6.0);

        let visible: Vec<&Application> = applications
            .iter()
            .filter(|app| Self::matches(app, state))
            .collect();

        if visible.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(30.0);
                ui.label(
                    egui::RichText::new(if applications.is_empty() {
                        "No applications yet. Add your first one."
                    } else {
                        "No applications match the current filter."
                    })
                    .color(theme.text_secondary),
                );
            });
            return action;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for app in visible {
                let event_count = events
                    .iter()
                    .filter(|event| event.application_id == app.id)
                    .count();
                if let Some(card_action) = Self::render_card(ui, app, event_count, theme) {
                    action = card_action;
                }
                ui.add_space(6.0);
            }
        });

        action
    }

    fn matches(app: &Application, state: &ApplicationListState) -> bool {
        if let Some(status) = state.status_filter {
            if app.status != status {
                return false;
            }
        }
        let query = state.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        app.company.to_lowercase().contains(&query) || app.position.to_lowercase().contains(&query)
    }

    fn render_card(
        ui: &mut egui::Ui,
        app: &Application,
        event_count: usize,
        theme: &AppTheme,
    ) -> Option<ApplicationListAction> {
        let mut action = None;
        let accent = status_color(app.status);

        egui::Frame::none()
            .fill(theme.panel_background)
            .rounding(Rounding::same(6.0))
            .stroke(Stroke::new(1.0, theme.day_border))
            .inner_margin(egui::Margin::symmetric(10.0, 8.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    // Status accent strip on the left edge
                    let (strip, _) = ui.allocate_exact_size(Vec2::new(4.0, 40.0), Sense::hover());
                    ui.painter().rect_filled(strip, Rounding::same(2.0), accent);

                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(&app.company)
                                    .strong()
                                    .size(15.0)
                                    .color(theme.text_primary),
                            );
                            if !app.position.is_empty() {
                                ui.label(
                                    egui::RichText::new(&app.position)
                                        .color(theme.text_secondary),
                                );
                            }
                            Self::status_badge(ui, app.status);
                        });

                        let mut detail = format!("Applied {}", app.apply_date.format("%Y-%m-%d"));
                        if !app.industry.trim().is_empty() {
                            detail.push_str(&format!(" · {}", app.industry.trim()));
                        }
                        detail.push_str(&format!(" · {}", app.company_type.label()));
                        if event_count > 0 {
                            detail.push_str(&format!(
                                " · {} event{}",
                                event_count,
                                if event_count == 1 { "" } else { "s" }
                            ));
                        }
                        ui.label(
                            egui::RichText::new(detail)
                                .size(12.0)
                                .color(theme.text_secondary),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Delete").clicked() {
                            action = Some(ApplicationListAction::Delete(app.id.clone()));
                        }
                        if ui.button("Edit").clicked() {
                            action = Some(ApplicationListAction::Edit(app.id.clone()));
                        }
                    });
                });
            });

        action
    }

    fn status_badge(ui: &mut egui::Ui, status: ApplicationStatus) {
        let color = status_color(status);
        egui::Frame::none()
            .fill(with_alpha(color, 40))
            .rounding(Rounding::same(8.0))
            .inner_margin(egui::Margin::symmetric(6.0, 2.0))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(status.label())
                        .size(11.0)
                        .color(color)
                        .strong(),
                );
            });
    }
}

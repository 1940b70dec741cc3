// Application editor dialog
// Form state and rendering for creating or editing one application
// together with its events.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};
use egui_extras::DatePickerButton;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use uuid::Uuid;

use crate::models::application::{Application, ApplicationStatus, CompanyType};
use crate::models::event::{EventCategory, JobEvent};
use crate::models::settings::Settings;
use crate::services::classify::{Classification, CompanyClassifier};
use crate::ui_egui::theme::AppTheme;

const TIME_FORMAT: &str = "%H:%M";

/// Result of one dialog frame.
pub enum ApplicationDialogAction {
    /// Dialog stays open
    None,
    /// Persist the application and its full event list
    Save(Application, Vec<JobEvent>),
    /// Close without saving
    Cancel,
}

/// Editable copy of one event. Times stay as text until save; dates are
/// bound to date picker widgets.
pub struct EventDraft {
    pub id: Option<String>,
    pub title: String,
    pub category: EventCategory,
    pub start_date: NaiveDate,
    pub start_time: String,
    pub has_end: bool,
    pub end_date: NaiveDate,
    pub end_time: String,
    pub completed: bool,
}

impl EventDraft {
    /// Fresh draft for `category`, anchored at `start_day`. Range-like
    /// categories pre-fill an end `span_days` days out, point-like ones
    /// start without an end.
    pub fn blank(category: EventCategory, start_day: NaiveDate, span_days: i64) -> Self {
        let has_end = !category.is_point_like();
        Self {
            id: None,
            title: String::new(),
            category,
            start_date: start_day,
            start_time: "09:00".to_string(),
            has_end,
            end_date: start_day + Duration::days(span_days.max(1) - 1),
            end_time: "18:00".to_string(),
            completed: false,
        }
    }

    pub fn from_event(event: &JobEvent) -> Self {
        let end = event.end.unwrap_or_else(|| event.start + Duration::days(1));
        Self {
            id: Some(event.id.clone()),
            title: event.title.clone(),
            category: event.category,
            start_date: event.start.date_naive(),
            start_time: event.start.format(TIME_FORMAT).to_string(),
            has_end: event.end.is_some(),
            end_date: end.date_naive(),
            end_time: end.format(TIME_FORMAT).to_string(),
            completed: event.completed,
        }
    }

    /// Build the event this draft describes. Existing drafts keep their
    /// identifier so the save replaces rather than duplicates.
    pub fn to_event(&self, application_id: &str) -> Result<JobEvent, String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        let start = combine(self.start_date, parse_time(&self.start_time)?)?;
        let end = if self.has_end {
            let end = combine(self.end_date, parse_time(&self.end_time)?)?;
            if end < start {
                return Err("Event end must not be before its start".to_string());
            }
            Some(end)
        } else {
            None
        };

        Ok(JobEvent {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            application_id: application_id.to_string(),
            title: self.title.trim().to_string(),
            category: self.category,
            start,
            end,
            completed: self.completed,
            created_at: None,
            updated_at: None,
        })
    }
}

fn parse_time(time: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map_err(|_| format!("Invalid time '{}', expected HH:MM", time.trim()))
}

fn combine(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Local>, String> {
    match Local.from_local_datetime(&date.and_time(time)) {
        chrono::LocalResult::Single(datetime) => Ok(datetime),
        // DST gap or fold: take the earlier interpretation
        chrono::LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        chrono::LocalResult::None => Err(format!("Local time {} {} does not exist", date, time)),
    }
}

/// Dialog state, alive while the window is open.
pub struct ApplicationDialogState {
    /// Some when editing an existing application
    pub editing_id: Option<String>,
    pub company: String,
    pub position: String,
    pub apply_date: NaiveDate,
    pub industry: String,
    pub company_type: CompanyType,
    pub status: ApplicationStatus,
    pub note: String,
    pub events: Vec<EventDraft>,
    pub error: Option<String>,
    /// Some while a background classification is running
    pub classify_rx: Option<Receiver<Classification>>,
}

impl ApplicationDialogState {
    pub fn new_blank(today: NaiveDate) -> Self {
        Self {
            editing_id: None,
            company: String::new(),
            position: String::new(),
            apply_date: today,
            industry: String::new(),
            company_type: CompanyType::Other,
            status: ApplicationStatus::Applied,
            note: String::new(),
            events: Vec::new(),
            error: None,
            classify_rx: None,
        }
    }

    pub fn from_application(app: &Application, events: &[JobEvent]) -> Self {
        Self {
            editing_id: Some(app.id.clone()),
            company: app.company.clone(),
            position: app.position.clone(),
            apply_date: app.apply_date.date_naive(),
            industry: app.industry.clone(),
            company_type: app.company_type,
            status: app.status,
            note: app.note.clone(),
            events: events.iter().map(EventDraft::from_event).collect(),
            error: None,
            classify_rx: None,
        }
    }

    fn build(&self) -> Result<(Application, Vec<JobEvent>), String> {
        if self.company.trim().is_empty() {
            return Err("Company name cannot be empty".to_string());
        }

        let apply_date = combine(self.apply_date, NaiveTime::from_hms_opt(9, 0, 0).unwrap())?;
        let id = self
            .editing_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let app = Application {
            id: id.clone(),
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            apply_date,
            industry: self.industry.trim().to_string(),
            company_type: self.company_type,
            status: self.status,
            note: self.note.clone(),
        };
        app.validate()?;

        let events = self
            .events
            .iter()
            .map(|draft| draft.to_event(&id))
            .collect::<Result<Vec<_>, String>>()?;

        Ok((app, events))
    }
}

/// Poll for a finished background classification.
///
/// Called once per frame while the dialog is open, before rendering.
fn poll_classification(ctx: &egui::Context, state: &mut ApplicationDialogState) {
    if let Some(rx) = &state.classify_rx {
        match rx.try_recv() {
            Ok(result) => {
                state.classify_rx = None;
                state.industry = result.industry;
                state.company_type = result.company_type;
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(std::time::Duration::from_millis(200));
            }
            Err(TryRecvError::Disconnected) => {
                state.classify_rx = None;
            }
        }
    }
}

/// Render the dialog window. Returns what the caller should do with the
/// edited data.
pub fn render_application_dialog(
    ctx: &egui::Context,
    state: &mut ApplicationDialogState,
    classifier: &CompanyClassifier,
    settings: &Settings,
    theme: &AppTheme,
) -> ApplicationDialogAction {
    poll_classification(ctx, state);

    let mut action = ApplicationDialogAction::None;
    let mut open = true;

    let title = if state.editing_id.is_some() {
        "Edit application"
    } else {
        "New application"
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(480.0)
        .show(ctx, |ui| {
            render_application_fields(ui, state, classifier);
            ui.add_space(8.0);
            ui.separator();
            render_event_editor(ui, state, settings, theme);
            ui.add_space(8.0);

            if let Some(error) = &state.error {
                ui.colored_label(egui::Color32::from_rgb(0xFF, 0x3B, 0x30), error);
                ui.add_space(4.0);
            }

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    match state.build() {
                        Ok((app, events)) => {
                            action = ApplicationDialogAction::Save(app, events);
                        }
                        Err(message) => state.error = Some(message),
                    }
                }
                if ui.button("Cancel").clicked() {
                    action = ApplicationDialogAction::Cancel;
                }
            });
        });

    if !open {
        action = ApplicationDialogAction::Cancel;
    }

    action
}

fn render_application_fields(
    ui: &mut egui::Ui,
    state: &mut ApplicationDialogState,
    classifier: &CompanyClassifier,
) {
    egui::Grid::new("application_fields")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Company");
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut state.company).desired_width(200.0));
                let classifying = state.classify_rx.is_some();
                let label = if classifying {
                    "Classifying..."
                } else {
                    "Auto-classify"
                };
                let classify = ui
                    .add_enabled(
                        classifier.has_api_key()
                            && !state.company.trim().is_empty()
                            && !classifying,
                        egui::Button::new(label),
                    )
                    .on_hover_text("Fill industry and company type from the company name");
                if classify.clicked() {
                    // The lookup runs on a worker thread; the dialog
                    // polls the channel each frame.
                    let classifier = classifier.clone();
                    let company = state.company.clone();
                    let (tx, rx) = mpsc::channel();
                    state.classify_rx = Some(rx);
                    thread::spawn(move || {
                        let _ = tx.send(classifier.classify(&company));
                    });
                }
            });
            ui.end_row();

            ui.label("Position");
            ui.add(egui::TextEdit::singleline(&mut state.position).desired_width(200.0));
            ui.end_row();

            ui.label("Applied on");
            ui.add(DatePickerButton::new(&mut state.apply_date).id_source("apply_date"));
            ui.end_row();

            ui.label("Industry");
            ui.add(egui::TextEdit::singleline(&mut state.industry).desired_width(200.0));
            ui.end_row();

            ui.label("Company type");
            egui::ComboBox::from_id_source("company_type")
                .selected_text(state.company_type.label())
                .show_ui(ui, |ui| {
                    for company_type in CompanyType::all() {
                        ui.selectable_value(
                            &mut state.company_type,
                            company_type,
                            company_type.label(),
                        );
                    }
                });
            ui.end_row();

            ui.label("Status");
            egui::ComboBox::from_id_source("application_status")
                .selected_text(state.status.label())
                .show_ui(ui, |ui| {
                    for status in ApplicationStatus::all() {
                        ui.selectable_value(&mut state.status, status, status.label());
                    }
                });
            ui.end_row();

            ui.label("Note");
            ui.add(
                egui::TextEdit::multiline(&mut state.note)
                    .desired_width(320.0)
                    .desired_rows(2),
            );
            ui.end_row();
        });
}

fn render_event_editor(
    ui: &mut egui::Ui,
    state: &mut ApplicationDialogState,
    settings: &Settings,
    theme: &AppTheme,
) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Events").strong());
        let today = Local::now().date_naive();
        if ui.button("+ Interview").clicked() {
            state.events.push(EventDraft::blank(
                EventCategory::Interview,
                today,
                settings.default_span_days,
            ));
        }
        if ui.button("+ Test window").clicked() {
            state.events.push(EventDraft::blank(
                EventCategory::TestOrRange,
                today,
                settings.default_span_days,
            ));
        }
        if ui.button("+ Other").clicked() {
            state.events.push(EventDraft::blank(
                EventCategory::Other,
                today,
                settings.default_span_days,
            ));
        }
    });

    if state.events.is_empty() {
        ui.label(egui::RichText::new("No events yet.").color(theme.text_secondary));
        return;
    }

    let mut remove_index = None;
    for (index, draft) in state.events.iter_mut().enumerate() {
        ui.push_id(index, |ui| {
            egui::Frame::none()
                .fill(theme.panel_background)
                .rounding(egui::Rounding::same(4.0))
                .stroke(egui::Stroke::new(1.0, theme.day_border))
                .inner_margin(egui::Margin::same(6.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        egui::ComboBox::from_id_source("event_category")
                            .selected_text(draft.category.label())
                            .width(120.0)
                            .show_ui(ui, |ui| {
                                for category in EventCategory::all() {
                                    ui.selectable_value(
                                        &mut draft.category,
                                        category,
                                        category.label(),
                                    );
                                }
                            });
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.title)
                                .desired_width(180.0)
                                .hint_text("title"),
                        );
                        ui.checkbox(&mut draft.completed, "done");
                        if ui.button("✕").clicked() {
                            remove_index = Some(index);
                        }
                    });
                    ui.horizontal(|ui| {
                        ui.label("Start");
                        ui.add(
                            DatePickerButton::new(&mut draft.start_date)
                                .id_source(&format!("event_start_{}", index)),
                        );
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.start_time).desired_width(50.0),
                        );
                        ui.checkbox(&mut draft.has_end, "has end");
                        if draft.has_end {
                            ui.label("End");
                            ui.add(
                                DatePickerButton::new(&mut draft.end_date)
                                    .id_source(&format!("event_end_{}", index)),
                            );
                            ui.add(
                                egui::TextEdit::singleline(&mut draft.end_time).desired_width(50.0),
                            );
                        }
                    });
                });
        });
        ui.add_space(4.0);
    }

    if let Some(index) = remove_index {
        state.events.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_draft_point_category_has_no_end() {
        let draft = EventDraft::blank(EventCategory::Interview, ymd(2025, 10, 20), 3);
        assert!(!draft.has_end);
        assert_eq!(draft.start_date, ymd(2025, 10, 20));
    }

    #[test]
    fn test_blank_draft_range_category_prefills_span() {
        let draft = EventDraft::blank(EventCategory::TestOrRange, ymd(2025, 10, 20), 3);
        assert!(draft.has_end);
        // 3-day window: start day plus 2
        assert_eq!(draft.end_date, ymd(2025, 10, 22));
    }

    #[test]
    fn test_draft_to_event_round_trip() {
        let mut draft = EventDraft::blank(EventCategory::TestOrRange, ymd(2025, 10, 20), 3);
        draft.title = "Online test".to_string();

        let event = draft.to_event("app-1").unwrap();
        assert_eq!(event.application_id, "app-1");
        assert_eq!(event.start.date_naive(), ymd(2025, 10, 20));
        assert_eq!(event.effective_end().date_naive(), ymd(2025, 10, 22));
        assert!(event.is_span());

        let back = EventDraft::from_event(&event);
        assert_eq!(back.id.as_deref(), Some(event.id.as_str()));
        assert_eq!(back.start_date, draft.start_date);
        assert_eq!(back.end_date, draft.end_date);
        assert_eq!(back.start_time, "09:00");
    }

    #[test]
    fn test_draft_rejects_empty_title() {
        let draft = EventDraft::blank(EventCategory::Interview, ymd(2025, 10, 20), 3);
        assert!(draft.to_event("app-1").is_err());
    }

    #[test]
    fn test_draft_rejects_inverted_range() {
        let mut draft = EventDraft::blank(EventCategory::TestOrRange, ymd(2025, 10, 20), 3);
        draft.title = "Test".to_string();
        draft.end_date = ymd(2025, 10, 18);
        assert!(draft.to_event("app-1").is_err());
    }

    #[test]
    fn test_draft_rejects_bad_time() {
        let mut draft = EventDraft::blank(EventCategory::Interview, ymd(2025, 10, 20), 3);
        draft.title = "Call".to_string();
        draft.start_time = "9 am".to_string();
        assert!(draft.to_event("app-1").is_err());
    }

    #[test]
    fn test_build_requires_company() {
        let state = ApplicationDialogState::new_blank(ymd(2025, 10, 20));
        assert!(state.build().is_err());
    }

    #[test]
    fn test_build_new_application_with_events() {
        let mut state = ApplicationDialogState::new_blank(ymd(2025, 10, 20));
        state.company = "Acme".to_string();
        state.position = "PM".to_string();
        let mut draft = EventDraft::blank(EventCategory::Interview, ymd(2025, 10, 22), 3);
        draft.title = "First round".to_string();
        state.events.push(draft);

        let (app, events) = state.build().unwrap();
        assert_eq!(app.company, "Acme");
        assert_eq!(app.apply_date.date_naive().day(), 20);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].application_id, app.id);
    }

    #[test]
    fn test_classification_result_fills_fields() {
        let ctx = egui::Context::default();
        let mut state = ApplicationDialogState::new_blank(ymd(2025, 10, 20));
        let (tx, rx) = mpsc::channel();
        state.classify_rx = Some(rx);

        tx.send(Classification {
            industry: "Energy".to_string(),
            company_type: CompanyType::Foreign,
        })
        .unwrap();
        poll_classification(&ctx, &mut state);

        assert_eq!(state.industry, "Energy");
        assert_eq!(state.company_type, CompanyType::Foreign);
        assert!(state.classify_rx.is_none());
    }

    #[test]
    fn test_classification_poll_clears_dead_worker() {
        let ctx = egui::Context::default();
        let mut state = ApplicationDialogState::new_blank(ymd(2025, 10, 20));
        let (tx, rx) = mpsc::channel::<Classification>();
        state.classify_rx = Some(rx);
        drop(tx);

        poll_classification(&ctx, &mut state);
        assert!(state.classify_rx.is_none());
        assert!(state.industry.is_empty());
    }

    #[test]
    fn test_from_application_preserves_identity() {
        let app = Application::new(
            "Acme",
            "PM",
            Local.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap(),
        )
        .unwrap();
        let event = JobEvent::new(
            &app.id,
            "Call",
            EventCategory::Interview,
            Local.with_ymd_and_hms(2025, 10, 22, 14, 0, 0).unwrap(),
        )
        .unwrap();

        let state = ApplicationDialogState::from_application(&app, std::slice::from_ref(&event));
        let (rebuilt, events) = state.build().unwrap();

        assert_eq!(rebuilt.id, app.id);
        assert_eq!(events[0].id, event.id);
    }
}

mod state;

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;

use self::state::{PendingDelete, ViewType};
use crate::models::application::Application;
use crate::models::event::JobEvent;
use crate::models::settings::Settings;
use crate::services::application::ApplicationService;
use crate::services::classify::CompanyClassifier;
use crate::services::database::Database;
use crate::services::event::EventService;
use crate::services::settings::SettingsService;
use crate::services::stats;
use crate::ui_egui::dialogs::application_dialog::{
    render_application_dialog, ApplicationDialogAction, ApplicationDialogState,
};
use crate::ui_egui::theme::AppTheme;
use crate::ui_egui::views::application_list::{
    ApplicationListAction, ApplicationListState, ApplicationListView,
};
use crate::ui_egui::views::calendar_view::{CalendarView, CalendarViewAction};
use crate::ui_egui::views::dashboard::DashboardView;

pub struct CareerApp {
    /// Leaked database for the 'static lifetime eframe requires
    database: &'static Database,
    settings: Settings,
    active_theme: AppTheme,
    current_view: ViewType,
    calendar_cursor: NaiveDate,
    selected_day: Option<NaiveDate>,
    list_state: ApplicationListState,
    /// Cached data, reloaded after every mutation
    applications: Vec<Application>,
    events: Vec<JobEvent>,
    /// application id -> company name, for event labels
    companies: HashMap<String, String>,
    dialog: Option<ApplicationDialogState>,
    pending_delete: Option<PendingDelete>,
    classifier: CompanyClassifier,
}

impl eframe::App for CareerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.current_view {
            ViewType::Applications => {
                let action = ApplicationListView::show(
                    ui,
                    &mut self.list_state,
                    &self.applications,
                    &self.events,
                    &self.active_theme,
                );
                self.handle_list_action(action);
            }
            ViewType::Calendar => {
                let action = CalendarView::show(
                    ui,
                    &mut self.calendar_cursor,
                    &mut self.selected_day,
                    &self.events,
                    &self.companies,
                    &self.settings,
                    &self.active_theme,
                );
                self.handle_calendar_action(action);
            }
            ViewType::Dashboard => {
                let stats = stats::compute(&self.applications, Local::now().date_naive());
                DashboardView::show(ui, &stats, &self.active_theme);
            }
        });

        self.render_dialog(ctx);
        self.render_delete_confirmation(ctx);
    }
}

impl CareerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let database = initialize_database();

        let settings_service = SettingsService::new(database);
        let settings = load_settings_or_default(&settings_service);
        let current_view = ViewType::parse(&settings.current_view);
        let active_theme = AppTheme::from_name(&settings.theme);
        active_theme.apply_to_context(&cc.egui_ctx);

        let classifier =
            CompanyClassifier::new().expect("Failed to build classification HTTP client");

        let mut app = Self {
            database,
            settings,
            active_theme,
            current_view,
            calendar_cursor: Local::now().date_naive(),
            selected_day: None,
            list_state: ApplicationListState::default(),
            applications: Vec::new(),
            events: Vec::new(),
            companies: HashMap::new(),
            dialog: None,
            pending_delete: None,
            classifier,
        };
        app.reload();
        app
    }

    /// Refresh the cached application and event lists from the database.
    fn reload(&mut self) {
        let conn = self.database.connection();

        self.applications = ApplicationService::new(conn).list_all().unwrap_or_else(|err| {
            log::error!("Failed to load applications: {:#}", err);
            Vec::new()
        });
        self.events = EventService::new(conn).list_all().unwrap_or_else(|err| {
            log::error!("Failed to load events: {:#}", err);
            Vec::new()
        });
        self.companies = self
            .applications
            .iter()
            .map(|app| (app.id.clone(), app.company.clone()))
            .collect();
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Career Track").strong().size(16.0));
                ui.add_space(12.0);

                for view in ViewType::all() {
                    let selected = self.current_view == view;
                    if ui.selectable_label(selected, view.as_str()).clicked() && !selected {
                        self.switch_view(view);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if self.active_theme.is_dark { "☀" } else { "🌙" };
                    if ui.button(icon).clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
            ui.add_space(2.0);
        });
    }

    fn switch_view(&mut self, view: ViewType) {
        self.current_view = view;
        self.settings.current_view = view.as_str().to_string();
        self.persist_settings();
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.active_theme = if self.active_theme.is_dark {
            AppTheme::light()
        } else {
            AppTheme::dark()
        };
        self.active_theme.apply_to_context(ctx);
        self.settings.theme = self.active_theme.name().to_string();
        self.persist_settings();
    }

    fn persist_settings(&self) {
        if let Err(err) = SettingsService::new(self.database).update(&self.settings) {
            log::error!("Failed to persist settings: {:#}", err);
        }
    }

    fn handle_list_action(&mut self, action: ApplicationListAction) {
        match action {
            ApplicationListAction::None => {}
            ApplicationListAction::Create => {
                self.dialog = Some(ApplicationDialogState::new_blank(Local::now().date_naive()));
            }
            ApplicationListAction::Edit(id) => self.open_application(&id),
            ApplicationListAction::Delete(id) => {
                let company = self
                    .companies
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| "this application".to_string());
                self.pending_delete = Some(PendingDelete {
                    application_id: id,
                    company,
                });
            }
        }
    }

    fn handle_calendar_action(&mut self, action: CalendarViewAction) {
        match action {
            CalendarViewAction::None => {}
            CalendarViewAction::EditEvent(event_id) => {
                let application_id = self
                    .events
                    .iter()
                    .find(|event| event.id == event_id)
                    .map(|event| event.application_id.clone());
                if let Some(application_id) = application_id {
                    self.open_application(&application_id);
                }
            }
        }
    }

    fn open_application(&mut self, id: &str) {
        let Some(app) = self.applications.iter().find(|app| app.id == id) else {
            log::warn!("Tried to open unknown application {}", id);
            return;
        };
        let events: Vec<JobEvent> = self
            .events
            .iter()
            .filter(|event| event.application_id == id)
            .cloned()
            .collect();
        self.dialog = Some(ApplicationDialogState::from_application(app, &events));
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(state) = &mut self.dialog else {
            return;
        };

        match render_application_dialog(
            ctx,
            state,
            &self.classifier,
            &self.settings,
            &self.active_theme,
        ) {
            ApplicationDialogAction::None => {}
            ApplicationDialogAction::Cancel => self.dialog = None,
            ApplicationDialogAction::Save(app, events) => {
                self.save_application(app, events);
                self.dialog = None;
            }
        }
    }

    fn save_application(&mut self, app: Application, events: Vec<JobEvent>) {
        let conn = self.database.connection();
        let application_service = ApplicationService::new(conn);

        let result = match application_service.get(&app.id) {
            Ok(Some(_)) => application_service.update(&app),
            Ok(None) => application_service.create(&app),
            Err(err) => Err(err),
        }
        .and_then(|_| EventService::new(conn).replace_for_application(&app.id, &events));

        match result {
            Ok(()) => log::info!("Saved application '{}' with {} events", app.company, events.len()),
            Err(err) => log::error!("Failed to save application '{}': {:#}", app.company, err),
        }

        self.reload();
    }

    fn render_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending_delete else {
            return;
        };

        let mut decision: Option<bool> = None;
        egui::Window::new("Delete application?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Delete {} and all of its events? This cannot be undone.",
                    pending.company
                ));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(false);
                    }
                });
            });

        match decision {
            Some(true) => {
                let id = pending.application_id.clone();
                self.pending_delete = None;
                if let Err(err) =
                    ApplicationService::new(self.database.connection()).delete(&id)
                {
                    log::error!("Failed to delete application {}: {:#}", id, err);
                }
                self.reload();
            }
            Some(false) => self.pending_delete = None,
            None => {}
        }
    }
}

fn initialize_database() -> &'static Database {
    #[cfg(debug_assertions)]
    let db_path = "career_track.db".to_string();

    #[cfg(not(debug_assertions))]
    let db_path = {
        if let Some(proj_dirs) = ProjectDirs::from("com", "CareerTrack", "CareerTrack") {
            let data_dir = proj_dirs.data_dir();
            std::fs::create_dir_all(data_dir).expect("Failed to create data directory");
            data_dir.join("career_track.db").to_string_lossy().to_string()
        } else {
            "career_track_prod.db".to_string()
        }
    };

    let db = Database::new(&db_path).expect("Failed to create database connection");
    db.initialize_schema()
        .expect("Failed to initialize database schema");

    Box::leak(Box::new(db))
}

fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Failed to load settings, using defaults: {:#}", err);
            Settings::default()
        }
    }
}

//! Application service entry point.
//! Database-backed CRUD and search over job applications.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing job applications stored in SQLite.
pub struct ApplicationService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> ApplicationService<'a> {
    /// Create a new ApplicationService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::{Application, ApplicationStatus, CompanyType};
    use crate::models::event::{EventCategory, JobEvent};
    use crate::services::database::Database;
    use crate::services::event::EventService;
    use chrono::{Duration, Local};

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn sample_app(company: &str, position: &str) -> Application {
        Application::new(company, position, Local::now()).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());

        let mut app = sample_app("Acme", "Product Manager");
        app.industry = "Manufacturing".to_string();
        app.company_type = CompanyType::Foreign;
        service.create(&app).unwrap();

        let loaded = service.get(&app.id).unwrap().unwrap();
        assert_eq!(loaded.company, "Acme");
        assert_eq!(loaded.position, "Product Manager");
        assert_eq!(loaded.industry, "Manufacturing");
        assert_eq!(loaded.company_type, CompanyType::Foreign);
        assert_eq!(loaded.status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());
        assert!(service.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_update() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());

        let mut app = sample_app("Acme", "PM");
        service.create(&app).unwrap();

        app.status = ApplicationStatus::Offer;
        app.note = "Signed!".to_string();
        service.update(&app).unwrap();

        let loaded = service.get(&app.id).unwrap().unwrap();
        assert_eq!(loaded.status, ApplicationStatus::Offer);
        assert_eq!(loaded.note, "Signed!");
    }

    #[test]
    fn test_update_missing_fails() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());
        assert!(service.update(&sample_app("Acme", "PM")).is_err());
    }

    #[test]
    fn test_delete_cascades_to_events() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());
        let events = EventService::new(db.connection());

        let app = sample_app("Acme", "PM");
        service.create(&app).unwrap();
        let event =
            JobEvent::new(&app.id, "First round", EventCategory::Interview, Local::now()).unwrap();
        events.create(&event).unwrap();

        service.delete(&app.id).unwrap();

        assert!(service.get(&app.id).unwrap().is_none());
        assert!(events.get(&event.id).unwrap().is_none());
    }

    #[test]
    fn test_list_all_newest_first() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());

        let mut older = sample_app("Old Corp", "Analyst");
        older.apply_date = Local::now() - Duration::days(10);
        let newer = sample_app("New Corp", "Analyst");
        service.create(&older).unwrap();
        service.create(&newer).unwrap();

        let all = service.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].company, "New Corp");
        assert_eq!(all[1].company, "Old Corp");
    }

    #[test]
    fn test_search_matches_company_and_position() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());

        service.create(&sample_app("ByteDance", "Product Ops")).unwrap();
        service.create(&sample_app("Acme", "Product Manager")).unwrap();
        service.create(&sample_app("Globex", "Data Analyst")).unwrap();

        let hits = service.search("product", None).unwrap();
        assert_eq!(hits.len(), 2);

        let hits = service.search("globex", None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "Globex");
    }

    #[test]
    fn test_search_treats_like_metacharacters_literally() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());

        service.create(&sample_app("100% Remote GmbH", "Engineer")).unwrap();
        service.create(&sample_app("100x Labs", "Engineer")).unwrap();
        service.create(&sample_app("Under_Score Inc", "Engineer")).unwrap();

        let hits = service.search("100%", None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "100% Remote GmbH");

        // A literal underscore must not act as a single-char wildcard
        let hits = service.search("r_s", None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "Under_Score Inc");
    }

    #[test]
    fn test_search_with_status_filter() {
        let db = setup_test_db();
        let service = ApplicationService::new(db.connection());

        let mut offered = sample_app("Acme", "PM");
        offered.status = ApplicationStatus::Offer;
        service.create(&offered).unwrap();
        service.create(&sample_app("Globex", "PM")).unwrap();

        let hits = service
            .search("", Some(ApplicationStatus::Offer))
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "Acme");

        let hits = service.search("", None).unwrap();
        assert_eq!(hits.len(), 2);
    }
}

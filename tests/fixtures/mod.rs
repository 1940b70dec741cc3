// Test fixtures - reusable test data
// Provides consistent builders across the integration test files

#![allow(dead_code)]

use career_track::models::application::Application;
use career_track::models::event::{EventCategory, JobEvent};
use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Local datetime in October 2025, the month most tests navigate to.
pub fn oct(day: u32, hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 10, day, hour, 0, 0).unwrap()
}

pub fn oct_day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

/// Point event (no end) on one day.
pub fn point_event(id: &str, application_id: &str, start: DateTime<Local>) -> JobEvent {
    JobEvent {
        id: id.to_string(),
        application_id: application_id.to_string(),
        title: format!("Event {}", id),
        category: EventCategory::Interview,
        start,
        end: None,
        completed: false,
        created_at: None,
        updated_at: None,
    }
}

/// Multi-day span event.
pub fn span_event(
    id: &str,
    application_id: &str,
    start: DateTime<Local>,
    end: DateTime<Local>,
) -> JobEvent {
    JobEvent {
        id: id.to_string(),
        application_id: application_id.to_string(),
        title: format!("Span {}", id),
        category: EventCategory::TestOrRange,
        start,
        end: Some(end),
        completed: false,
        created_at: None,
        updated_at: None,
    }
}

/// Minimal valid application.
pub fn application(company: &str) -> Application {
    Application::new(company, "Product Manager", oct(1, 9)).unwrap()
}

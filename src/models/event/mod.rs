// Job event module
// Calendar events (interviews, tests, deadlines) attached to one application

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category tag for a job event.
///
/// Interview and Other are point-like: the form pre-fills them without an
/// end time. TestOrRange is the one category the form treats as naturally
/// multi-day. The calendar layout never looks at the category; whether an
/// event renders as a span is decided purely by the presence of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Interview,
    TestOrRange,
    Other,
}

impl EventCategory {
    /// All categories in display order.
    pub fn all() -> [EventCategory; 3] {
        [
            EventCategory::Interview,
            EventCategory::TestOrRange,
            EventCategory::Other,
        ]
    }

    /// Stable string used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Interview => "Interview",
            EventCategory::TestOrRange => "TestOrRange",
            EventCategory::Other => "Other",
        }
    }

    /// Parse the database representation. Unknown strings map to Other.
    pub fn parse(value: &str) -> Self {
        match value {
            "Interview" => EventCategory::Interview,
            "TestOrRange" => EventCategory::TestOrRange,
            _ => EventCategory::Other,
        }
    }

    /// Human-readable label for the UI.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Interview => "Interview",
            EventCategory::TestOrRange => "Test / Assessment",
            EventCategory::Other => "Other",
        }
    }

    /// Whether the editor defaults this category to a zero-length event.
    pub fn is_point_like(&self) -> bool {
        !matches!(self, EventCategory::TestOrRange)
    }
}

/// A scheduled occurrence (interview, online test, ...) tied to one
/// application. `end` is optional: absent means the event occupies the
/// single instant `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct JobEvent {
    pub id: String,
    pub application_id: String,
    pub title: String,
    pub category: EventCategory,
    pub start: DateTime<Local>,
    pub end: Option<DateTime<Local>>,
    pub completed: bool,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl JobEvent {
    /// Create a new event with a fresh identifier.
    ///
    /// # Returns
    /// Returns `Result<JobEvent, String>` with validation.
    pub fn new(
        application_id: impl Into<String>,
        title: impl Into<String>,
        category: EventCategory,
        start: DateTime<Local>,
    ) -> Result<Self, String> {
        let title = title.into();

        if title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            application_id: application_id.into(),
            title,
            category,
            start,
            end: None,
            completed: false,
            created_at: None,
            updated_at: None,
        })
    }

    /// Validate the event.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }
        if self.application_id.trim().is_empty() {
            return Err("Event must reference an application".to_string());
        }
        Ok(())
    }

    /// The instant this event stops occupying time.
    ///
    /// An absent end, or an end before the start, yields `start`: the
    /// event is treated as a point. Malformed `end < start` records are
    /// deliberately not rejected so the editor can still load and fix
    /// them.
    pub fn effective_end(&self) -> DateTime<Local> {
        match self.end {
            Some(end) if end >= self.start => end,
            _ => self.start,
        }
    }

    /// Whether the event carries an end timestamp and therefore renders
    /// as a multi-cell span.
    pub fn is_span(&self) -> bool {
        self.end.is_some()
    }

    /// Whether `day` falls inside the closed day-granular interval
    /// covered by this event.
    pub fn touches_day(&self, day: NaiveDate) -> bool {
        self.start.date_naive() <= day && day <= self.effective_end().date_naive()
    }

    /// Duration from start to effective end (zero for point events).
    pub fn duration(&self) -> chrono::Duration {
        self.effective_end() - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_new_event_success() {
        let event = JobEvent::new("app-1", "First round", EventCategory::Interview, at(2025, 10, 20, 10))
            .unwrap();

        assert_eq!(event.title, "First round");
        assert_eq!(event.application_id, "app-1");
        assert!(event.end.is_none());
        assert!(!event.completed);
        assert!(!event.id.is_empty());
    }

    #[test]
    fn test_new_event_empty_title() {
        let result = JobEvent::new("app-1", "   ", EventCategory::Other, at(2025, 10, 20, 10));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Event title cannot be empty");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = JobEvent::new("app-1", "A", EventCategory::Other, at(2025, 10, 20, 10)).unwrap();
        let b = JobEvent::new("app-1", "B", EventCategory::Other, at(2025, 10, 20, 10)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_effective_end_point_event() {
        let event = JobEvent::new("app-1", "Call", EventCategory::Interview, at(2025, 10, 20, 10)).unwrap();
        assert_eq!(event.effective_end(), event.start);
        assert!(!event.is_span());
        assert_eq!(event.duration(), Duration::zero());
    }

    #[test]
    fn test_effective_end_span_event() {
        let mut event =
            JobEvent::new("app-1", "Online test", EventCategory::TestOrRange, at(2025, 10, 20, 9)).unwrap();
        event.end = Some(at(2025, 10, 23, 18));

        assert_eq!(event.effective_end(), at(2025, 10, 23, 18));
        assert!(event.is_span());
    }

    #[test]
    fn test_effective_end_clamps_inverted_range() {
        // end before start is treated as a point at start
        let mut event =
            JobEvent::new("app-1", "Broken", EventCategory::TestOrRange, at(2025, 10, 20, 9)).unwrap();
        event.end = Some(at(2025, 10, 18, 9));

        assert_eq!(event.effective_end(), event.start);
        assert_eq!(event.duration(), Duration::zero());
    }

    #[test]
    fn test_touches_day() {
        let mut event =
            JobEvent::new("app-1", "Test window", EventCategory::TestOrRange, at(2025, 10, 20, 9)).unwrap();
        event.end = Some(at(2025, 10, 22, 0) + Duration::minutes(1));

        assert!(!event.touches_day(NaiveDate::from_ymd_opt(2025, 10, 19).unwrap()));
        assert!(event.touches_day(NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()));
        assert!(event.touches_day(NaiveDate::from_ymd_opt(2025, 10, 21).unwrap()));
        // Ends at 00:01, still counts as touching that day
        assert!(event.touches_day(NaiveDate::from_ymd_opt(2025, 10, 22).unwrap()));
        assert!(!event.touches_day(NaiveDate::from_ymd_opt(2025, 10, 23).unwrap()));
    }

    #[test]
    fn test_category_round_trip() {
        for category in EventCategory::all() {
            assert_eq!(EventCategory::parse(category.as_str()), category);
        }
        assert_eq!(EventCategory::parse("garbage"), EventCategory::Other);
    }

    #[test]
    fn test_point_like_categories() {
        assert!(EventCategory::Interview.is_point_like());
        assert!(EventCategory::Other.is_point_like());
        assert!(!EventCategory::TestOrRange.is_point_like());
    }
}

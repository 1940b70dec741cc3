// Settings module
// Persisted display and behavior preferences

/// Application settings, persisted as a single row.
///
/// `max_visible_rows` is the calendar overflow budget: how many event
/// rows a day cell renders before collapsing the rest into a "+k more"
/// indicator. It is a display budget only; the row allocator is unaware
/// of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub id: Option<i64>,
    pub theme: String,
    /// Overflow budget per day cell.
    pub max_visible_rows: usize,
    /// How far back the urgency list still shows a started event, in hours.
    pub urgency_lookback_hours: i64,
    /// How far ahead the urgency list looks, in hours.
    pub urgency_lookahead_hours: i64,
    /// Default length of a TestOrRange window pre-filled by the form, in days.
    pub default_span_days: i64,
    /// Last active tab, restored on startup.
    pub current_view: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            theme: "light".to_string(),
            max_visible_rows: 3,
            urgency_lookback_hours: 2,
            urgency_lookahead_hours: 48,
            default_span_days: 3,
            current_view: "Applications".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.max_visible_rows, 3);
        assert_eq!(settings.urgency_lookback_hours, 2);
        assert_eq!(settings.urgency_lookahead_hours, 48);
        assert_eq!(settings.default_span_days, 3);
        assert_eq!(settings.current_view, "Applications");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    Applications,
    Calendar,
    Dashboard,
}

impl ViewType {
    pub fn all() -> [ViewType; 3] {
        [
            ViewType::Applications,
            ViewType::Calendar,
            ViewType::Dashboard,
        ]
    }

    /// Stable string persisted in settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Applications => "Applications",
            ViewType::Calendar => "Calendar",
            ViewType::Dashboard => "Dashboard",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Calendar" => ViewType::Calendar,
            "Dashboard" => ViewType::Dashboard,
            _ => ViewType::Applications,
        }
    }
}

/// Delete confirmation pending the user's answer.
pub struct PendingDelete {
    pub application_id: String,
    pub company: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_type_round_trip() {
        for view in ViewType::all() {
            assert_eq!(ViewType::parse(view.as_str()), view);
        }
        assert_eq!(ViewType::parse("garbage"), ViewType::Applications);
    }
}

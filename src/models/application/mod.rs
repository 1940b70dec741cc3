// Application module
// One job application and its pipeline status

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline status of an application, ordered roughly by progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    WrittenTest,
    AiInterview,
    FirstRound,
    SecondRound,
    HrRound,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    /// All statuses in pipeline order.
    pub fn all() -> [ApplicationStatus; 8] {
        [
            ApplicationStatus::Applied,
            ApplicationStatus::WrittenTest,
            ApplicationStatus::AiInterview,
            ApplicationStatus::FirstRound,
            ApplicationStatus::SecondRound,
            ApplicationStatus::HrRound,
            ApplicationStatus::Offer,
            ApplicationStatus::Rejected,
        ]
    }

    /// Stable string used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::WrittenTest => "WrittenTest",
            ApplicationStatus::AiInterview => "AiInterview",
            ApplicationStatus::FirstRound => "FirstRound",
            ApplicationStatus::SecondRound => "SecondRound",
            ApplicationStatus::HrRound => "HrRound",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Parse the database representation. Unknown strings map to Applied.
    pub fn parse(value: &str) -> Self {
        match value {
            "WrittenTest" => ApplicationStatus::WrittenTest,
            "AiInterview" => ApplicationStatus::AiInterview,
            "FirstRound" => ApplicationStatus::FirstRound,
            "SecondRound" => ApplicationStatus::SecondRound,
            "HrRound" => ApplicationStatus::HrRound,
            "Offer" => ApplicationStatus::Offer,
            "Rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Applied,
        }
    }

    /// Human-readable label for the UI.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::WrittenTest => "Written Test",
            ApplicationStatus::AiInterview => "AI Interview",
            ApplicationStatus::FirstRound => "1st Round",
            ApplicationStatus::SecondRound => "2nd Round",
            ApplicationStatus::HrRound => "HR Round",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Whether this application is still moving through the pipeline.
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, ApplicationStatus::Offer | ApplicationStatus::Rejected)
    }

    /// Whether the application reached any stage past the initial screen.
    pub fn reached_assessment(&self) -> bool {
        !matches!(self, ApplicationStatus::Applied | ApplicationStatus::Rejected)
    }
}

/// Rough company-type classification used by the dashboard and the
/// auto-classify service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    StateOwned,
    Foreign,
    Internet,
    Consulting,
    Startup,
    Other,
}

impl CompanyType {
    pub fn all() -> [CompanyType; 6] {
        [
            CompanyType::StateOwned,
            CompanyType::Foreign,
            CompanyType::Internet,
            CompanyType::Consulting,
            CompanyType::Startup,
            CompanyType::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::StateOwned => "StateOwned",
            CompanyType::Foreign => "Foreign",
            CompanyType::Internet => "Internet",
            CompanyType::Consulting => "Consulting",
            CompanyType::Startup => "Startup",
            CompanyType::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "StateOwned" | "State Owned" => CompanyType::StateOwned,
            "Foreign" => CompanyType::Foreign,
            "Internet" => CompanyType::Internet,
            "Consulting" => CompanyType::Consulting,
            "Startup" => CompanyType::Startup,
            _ => CompanyType::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanyType::StateOwned => "State Owned",
            CompanyType::Foreign => "Foreign",
            CompanyType::Internet => "Internet",
            CompanyType::Consulting => "Consulting",
            CompanyType::Startup => "Startup",
            CompanyType::Other => "Other",
        }
    }
}

/// A single job application record.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: String,
    pub company: String,
    pub position: String,
    pub apply_date: DateTime<Local>,
    pub industry: String,
    pub company_type: CompanyType,
    pub status: ApplicationStatus,
    pub note: String,
}

impl Application {
    /// Create a new application with a fresh identifier.
    ///
    /// # Returns
    /// Returns `Result<Application, String>` with validation.
    pub fn new(
        company: impl Into<String>,
        position: impl Into<String>,
        apply_date: DateTime<Local>,
    ) -> Result<Self, String> {
        let company = company.into();
        let position = position.into();

        if company.trim().is_empty() {
            return Err("Company name cannot be empty".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            company,
            position,
            apply_date,
            industry: String::new(),
            company_type: CompanyType::Other,
            status: ApplicationStatus::Applied,
            note: String::new(),
        })
    }

    /// Validate the application.
    pub fn validate(&self) -> Result<(), String> {
        if self.company.trim().is_empty() {
            return Err("Company name cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_date() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 10, 17, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_new_application_success() {
        let app = Application::new("Acme", "Product Manager", sample_date()).unwrap();

        assert_eq!(app.company, "Acme");
        assert_eq!(app.position, "Product Manager");
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.company_type, CompanyType::Other);
        assert!(!app.id.is_empty());
    }

    #[test]
    fn test_new_application_empty_company() {
        let result = Application::new("  ", "PM", sample_date());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Company name cannot be empty");
    }

    #[test]
    fn test_status_round_trip() {
        for status in ApplicationStatus::all() {
            assert_eq!(ApplicationStatus::parse(status.as_str()), status);
        }
        assert_eq!(
            ApplicationStatus::parse("unknown"),
            ApplicationStatus::Applied
        );
    }

    #[test]
    fn test_company_type_round_trip() {
        for company_type in CompanyType::all() {
            assert_eq!(CompanyType::parse(company_type.as_str()), company_type);
        }
        // Legacy display spelling is accepted too
        assert_eq!(CompanyType::parse("State Owned"), CompanyType::StateOwned);
    }

    #[test]
    fn test_status_progress_flags() {
        assert!(ApplicationStatus::Applied.is_in_progress());
        assert!(ApplicationStatus::FirstRound.is_in_progress());
        assert!(!ApplicationStatus::Offer.is_in_progress());
        assert!(!ApplicationStatus::Rejected.is_in_progress());

        assert!(!ApplicationStatus::Applied.reached_assessment());
        assert!(ApplicationStatus::WrittenTest.reached_assessment());
        assert!(ApplicationStatus::Offer.reached_assessment());
        assert!(!ApplicationStatus::Rejected.reached_assessment());
    }
}

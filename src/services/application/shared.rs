use chrono::{DateTime, Local};
use rusqlite::{self, Result, Row};

use crate::models::application::{Application, ApplicationStatus, CompanyType};

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Shared row mapper for the full applications column list:
/// id, company, position, apply_date, industry, company_type, status, note.
pub(crate) fn map_application_row(row: &Row<'_>) -> Result<Application> {
    Ok(Application {
        id: row.get(0)?,
        company: row.get(1)?,
        position: row.get(2)?,
        apply_date: to_local_datetime(row.get::<_, String>(3)?)?,
        industry: row.get(4)?,
        company_type: CompanyType::parse(&row.get::<_, String>(5)?),
        status: ApplicationStatus::parse(&row.get::<_, String>(6)?),
        note: row.get(7)?,
    })
}

use chrono::{DateTime, Local};
use rusqlite::{self, Result, Row};

use crate::models::event::{EventCategory, JobEvent};

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn to_optional_local_datetime(
    value: Option<String>,
) -> Result<Option<DateTime<Local>>> {
    value.map(to_local_datetime).transpose()
}

/// Shared row mapper for the full events column list:
/// id, application_id, title, category, start_datetime, end_datetime,
/// is_completed, created_at, updated_at.
pub(crate) fn map_event_row(row: &Row<'_>) -> Result<JobEvent> {
    Ok(JobEvent {
        id: row.get(0)?,
        application_id: row.get(1)?,
        title: row.get(2)?,
        category: EventCategory::parse(&row.get::<_, String>(3)?),
        start: to_local_datetime(row.get::<_, String>(4)?)?,
        end: to_optional_local_datetime(row.get(5)?)?,
        completed: row.get::<_, i32>(6)? != 0,
        created_at: Some(to_local_datetime(row.get::<_, String>(7)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
    })
}

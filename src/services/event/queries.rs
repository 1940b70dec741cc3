use super::shared::map_event_row;
use super::EventService;
use anyhow::Result;
use chrono::{DateTime, Local};

use crate::models::event::JobEvent;

impl<'a> EventService<'a> {
    /// List every event ordered by start date.
    pub fn list_all(&self) -> Result<Vec<JobEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, application_id, title, category, start_datetime, end_datetime,
                    is_completed, created_at, updated_at
             FROM events
             ORDER BY start_datetime ASC",
        )?;

        let events = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Events belonging to one application, ordered by start date.
    pub fn find_by_application(&self, application_id: &str) -> Result<Vec<JobEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, application_id, title, category, start_datetime, end_datetime,
                    is_completed, created_at, updated_at
             FROM events
             WHERE application_id = ?
             ORDER BY start_datetime ASC",
        )?;

        let events = stmt
            .query_map([application_id], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Events whose interval intersects [start, end]. Point events
    /// (no end_datetime) are matched on their start instant.
    pub fn find_by_date_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<JobEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, application_id, title, category, start_datetime, end_datetime,
                    is_completed, created_at, updated_at
             FROM events
             WHERE start_datetime <= ?
               AND COALESCE(end_datetime, start_datetime) >= ?
             ORDER BY start_datetime ASC",
        )?;

        let events = stmt
            .query_map([end.to_rfc3339(), start.to_rfc3339()], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}

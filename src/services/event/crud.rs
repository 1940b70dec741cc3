use super::EventService;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

use super::shared::map_event_row;
use crate::models::event::JobEvent;

const EVENT_COLUMNS: &str = "id, application_id, title, category, start_datetime, end_datetime,
             is_completed, created_at, updated_at";

impl<'a> EventService<'a> {
    /// Insert a new event.
    pub fn create(&self, event: &JobEvent) -> Result<()> {
        event.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO events (
                    id, application_id, title, category, start_datetime, end_datetime,
                    is_completed, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.id,
                    event.application_id,
                    event.title,
                    event.category.as_str(),
                    event.start.to_rfc3339(),
                    event.end.map(|end| end.to_rfc3339()),
                    event.completed as i32,
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert event")?;

        Ok(())
    }

    /// Retrieve an event by id.
    pub fn get(&self, id: &str) -> Result<Option<JobEvent>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS),
            [id],
            map_event_row,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing event.
    pub fn update(&self, event: &JobEvent) -> Result<()> {
        event.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET
                    application_id = ?, title = ?, category = ?, start_datetime = ?,
                    end_datetime = ?, is_completed = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    event.application_id,
                    event.title,
                    event.category.as_str(),
                    event.start.to_rfc3339(),
                    event.end.map(|end| end.to_rfc3339()),
                    event.completed as i32,
                    Local::now().to_rfc3339(),
                    event.id,
                ],
            )
            .context("Failed to update event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", event.id));
        }

        Ok(())
    }

    /// Delete an event by id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .context("Failed to delete event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }

    /// Flip the completion flag on one event.
    pub fn set_completed(&self, id: &str, completed: bool) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET is_completed = ?, updated_at = ? WHERE id = ?",
                params![completed as i32, Local::now().to_rfc3339(), id],
            )
            .context("Failed to update event completion")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }

    /// Replace every event of one application with `events`. The form
    /// saves its whole event list at once; other applications' events
    /// are untouched. Runs in a single transaction, so a failed insert
    /// rolls the delete back and keeps the previous list intact.
    pub fn replace_for_application(&self, application_id: &str, events: &[JobEvent]) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin event replacement transaction")?;

        tx.execute(
            "DELETE FROM events WHERE application_id = ?",
            [application_id],
        )
        .context("Failed to clear events for application")?;

        for event in events {
            self.create(event)?;
        }

        tx.commit()
            .context("Failed to commit event replacement")?;

        Ok(())
    }
}

use super::shared::map_application_row;
use super::ApplicationService;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

use crate::models::application::Application;

impl<'a> ApplicationService<'a> {
    /// Insert a new application.
    pub fn create(&self, app: &Application) -> Result<()> {
        app.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO applications (
                    id, company, position, apply_date, industry, company_type,
                    status, note, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    app.id,
                    app.company,
                    app.position,
                    app.apply_date.to_rfc3339(),
                    app.industry,
                    app.company_type.as_str(),
                    app.status.as_str(),
                    app.note,
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert application")?;

        Ok(())
    }

    /// Retrieve an application by id.
    pub fn get(&self, id: &str) -> Result<Option<Application>> {
        let result = self.conn.query_row(
            "SELECT id, company, position, apply_date, industry, company_type, status, note
             FROM applications WHERE id = ?",
            [id],
            map_application_row,
        );

        match result {
            Ok(app) => Ok(Some(app)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing application.
    pub fn update(&self, app: &Application) -> Result<()> {
        app.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE applications SET
                    company = ?, position = ?, apply_date = ?, industry = ?,
                    company_type = ?, status = ?, note = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    app.company,
                    app.position,
                    app.apply_date.to_rfc3339(),
                    app.industry,
                    app.company_type.as_str(),
                    app.status.as_str(),
                    app.note,
                    Local::now().to_rfc3339(),
                    app.id,
                ],
            )
            .context("Failed to update application")?;

        if rows_affected == 0 {
            return Err(anyhow!("Application with id {} not found", app.id));
        }

        Ok(())
    }

    /// Delete an application; its events go with it via the foreign-key
    /// cascade.
    pub fn delete(&self, id: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM applications WHERE id = ?", [id])
            .context("Failed to delete application")?;

        if rows_affected == 0 {
            return Err(anyhow!("Application with id {} not found", id));
        }

        Ok(())
    }
}

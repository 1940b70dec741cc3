use super::shared::map_application_row;
use super::ApplicationService;
use anyhow::Result;
use rusqlite::params;

use crate::models::application::{Application, ApplicationStatus};

/// Escape LIKE metacharacters so user text only matches itself.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl<'a> ApplicationService<'a> {
    /// List every application, newest apply date first.
    pub fn list_all(&self) -> Result<Vec<Application>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, company, position, apply_date, industry, company_type, status, note
             FROM applications
             ORDER BY apply_date DESC, created_at DESC",
        )?;

        let apps = stmt
            .query_map([], map_application_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(apps)
    }

    /// Case-insensitive search over company and position, optionally
    /// narrowed to one pipeline status. An empty query matches all.
    /// Query text is matched literally, LIKE metacharacters included.
    pub fn search(
        &self,
        query: &str,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>> {
        let pattern = format!("%{}%", escape_like(&query.trim().to_lowercase()));
        let status_pattern = match status {
            Some(status) => status.as_str().to_string(),
            None => "%".to_string(),
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, company, position, apply_date, industry, company_type, status, note
             FROM applications
             WHERE (LOWER(company) LIKE ?1 ESCAPE '\\' OR LOWER(position) LIKE ?1 ESCAPE '\\')
               AND status LIKE ?2
             ORDER BY apply_date DESC, created_at DESC",
        )?;

        let apps = stmt
            .query_map(params![pattern, status_pattern], map_application_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(apps)
    }
}

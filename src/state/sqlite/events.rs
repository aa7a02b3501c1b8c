use super::*;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::Row;

use crate::traits::Event;

#[async_trait]
impl crate::traits::EventStore for SqliteStore {
    async fn add_event(
        &self,
        name: &str,
        date: NaiveDateTime,
        description: &str,
    ) -> anyhow::Result<()> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO events (id, name, event_date, description, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(format_event_date(date))
        .bind(description)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        tracing::info!(name, date = %format_event_date(date), "Event added");
        Ok(())
    }

    async fn due_events(
        &self,
        now: NaiveDateTime,
        until: Option<NaiveDateTime>,
    ) -> anyhow::Result<Vec<Event>> {
        let now_str = format_event_date(now);

        let rows = if let Some(until) = until {
            sqlx::query(
                "SELECT id, name, event_date, description FROM events
                 WHERE event_date >= ? AND event_date <= ? AND notified = 0
                 ORDER BY event_date ASC",
            )
            .bind(&now_str)
            .bind(format_event_date(until))
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(
                "SELECT id, name, event_date, description FROM events
                 WHERE event_date >= ? AND notified = 0
                 ORDER BY event_date ASC",
            )
            .bind(&now_str)
            .fetch_all(&self.pool)
            .await?
        };

        let mut events = Vec::with_capacity(rows.len());
        for row in &rows {
            let raw_date: String = row.get("event_date");
            let Some(date) = parse_event_date(&raw_date) else {
                tracing::warn!(raw = %raw_date, "Skipping event with unparseable date");
                continue;
            };
            events.push(Event {
                id: row.get("id"),
                name: row.get("name"),
                date,
                description: row.get("description"),
            });
        }
        Ok(events)
    }

    async fn mark_notified(&self, name: &str, date: NaiveDateTime) -> anyhow::Result<()> {
        let result =
            sqlx::query("UPDATE events SET notified = 1 WHERE name = ? AND event_date = ?")
                .bind(name)
                .bind(format_event_date(date))
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            // Matching zero rows is allowed (legacy name+date key), but worth
            // surfacing in logs since it usually means a precision mismatch.
            tracing::warn!(name, "mark_notified matched no event");
        }
        Ok(())
    }
}

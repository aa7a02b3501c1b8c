use super::*;

use async_trait::async_trait;
use sqlx::Row;

use crate::traits::Contact;

fn row_to_contact(row: &sqlx::sqlite::SqliteRow) -> Contact {
    Contact {
        name: row.get("name"),
        info: row.get("info"),
    }
}

#[async_trait]
impl crate::traits::ContactStore for SqliteStore {
    async fn add_contact(&self, name: &str, info: Option<&str>) -> anyhow::Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query("INSERT INTO contacts (name, info, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(info)
            .bind(&now)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_contacts(&self) -> anyhow::Result<Vec<Contact>> {
        let rows = sqlx::query("SELECT name, info FROM contacts ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(row_to_contact).collect())
    }

    async fn find_contact(&self, needle: &str) -> anyhow::Result<Option<Contact>> {
        // instr() is a case-sensitive substring match, unlike LIKE. The
        // question store case-folds; contact search intentionally does not.
        let row = sqlx::query(
            "SELECT name, info FROM contacts WHERE instr(name, ?) > 0 ORDER BY id LIMIT 1",
        )
        .bind(needle)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_contact))
    }
}

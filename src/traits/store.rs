use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::{Contact, Event};

/// Company/project Q&A storage.
///
/// Questions are case-folded on both write and read, so at most one answer
/// exists per normalized question.
#[async_trait]
pub trait QaStore: Send + Sync {
    /// Insert or replace the answer for a question (upsert, not append).
    async fn upsert_qa(&self, question: &str, answer: &str) -> anyhow::Result<()>;

    /// Look up the stored answer. Returns None when the question is unknown.
    async fn lookup_qa(&self, question: &str) -> anyhow::Result<Option<String>>;
}

/// Colleague directory storage.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Append a contact. No dedup, duplicate names are kept.
    async fn add_contact(&self, name: &str, info: Option<&str>) -> anyhow::Result<()>;

    /// All contacts, sorted by name ascending.
    async fn list_contacts(&self) -> anyhow::Result<Vec<Contact>>;

    /// First contact whose name contains `needle` (case-sensitive substring,
    /// first by insertion order). Ambiguous needles silently pick one match.
    async fn find_contact(&self, needle: &str) -> anyhow::Result<Option<Contact>>;
}

/// Event storage and notification bookkeeping.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn add_event(
        &self,
        name: &str,
        date: NaiveDateTime,
        description: &str,
    ) -> anyhow::Result<()>;

    /// Un-notified events with `now <= date`, ascending by date.
    /// `until` bounds the window; None returns all future events.
    async fn due_events(
        &self,
        now: NaiveDateTime,
        until: Option<NaiveDateTime>,
    ) -> anyhow::Result<Vec<Event>>;

    /// Flip `notified` for the event matching both name and date exactly.
    /// Matching zero rows is not an error.
    async fn mark_notified(&self, name: &str, date: NaiveDateTime) -> anyhow::Result<()>;
}

/// Append-only digest log.
#[async_trait]
pub trait DigestStore: Send + Sync {
    async fn add_digest(&self, content: &str) -> anyhow::Result<()>;

    /// Most recent digest contents first, at most `limit`.
    async fn recent_digests(&self, limit: i64) -> anyhow::Result<Vec<String>>;
}

/// Facade trait so call sites can hold one `Arc<dyn Store>` while new code
/// can depend on the focused traits above.
pub trait Store: Send + Sync + QaStore + ContactStore + EventStore + DigestStore {}

impl<T> Store for T where T: Send + Sync + QaStore + ContactStore + EventStore + DigestStore {}

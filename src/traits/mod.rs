mod channel;
mod clock;
mod store;

pub use channel::Channel;
pub use clock::{Clock, SystemClock};
pub use store::{ContactStore, DigestStore, EventStore, QaStore, Store};

use chrono::NaiveDateTime;

/// A colleague directory entry. Names are not unique; the directory keeps
/// every entry as added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub info: Option<String>,
}

/// An upcoming event awaiting notification.
///
/// `date` is a naive timestamp compared as-is, without timezone
/// normalization. `id` is generated at insert time; the public
/// mark-notified operation still matches on name+date (legacy key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: NaiveDateTime,
    pub description: String,
}

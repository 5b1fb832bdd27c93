use chrono::{DateTime, Utc};
use serde::Serialize;

/// Descriptive information about a document.
///
/// Timestamps are UTC. The modification date is touched by the owning
/// [`Document`](crate::Document) whenever it is mutated or serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: String,
    pub creation_date: DateTime<Utc>,
    pub modification_date: DateTime<Utc>,
}

impl Metadata {
    pub fn new() -> Self {
        let now = Utc::now();
        Metadata {
            title: None,
            author: None,
            producer: crate::PRODUCER.to_string(),
            creation_date: now,
            modification_date: now,
        }
    }

    /// Set the modification date to the current time.
    pub fn update_modification_date(&mut self) {
        self.modification_date = Utc::now();
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type TopicId = u32;

/// The bundled topic; it always exists and cannot be deleted.
pub const PRESET_TOPIC_ID: TopicId = 1;

/// A named collection of practice items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_preset: bool,
}

/// A topic together with the number of items it holds.
#[derive(Clone, Debug, PartialEq)]
pub struct TopicSummary {
    pub topic: Topic,
    pub item_count: usize,
}

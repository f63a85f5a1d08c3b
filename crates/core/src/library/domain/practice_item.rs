use serde::{Deserialize, Serialize};

use super::topic::{TopicId, PRESET_TOPIC_ID};

pub type ItemId = u32;

pub const DEFAULT_DIFFICULTY: u32 = 1;
pub const DEFAULT_CATEGORY: &str = "General";

/// A reference passage the user reads aloud.
///
/// Deserializes from the import format, where only `title` and `content`
/// are mandatory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PracticeItem {
    #[serde(default)]
    pub id: ItemId,
    pub title: String,
    pub content: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub mp3_url: String,
    #[serde(default = "default_topic")]
    pub topic_id: TopicId,
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_topic() -> TopicId {
    PRESET_TOPIC_ID
}

impl PracticeItem {
    pub fn new(id: ItemId, title: &str, content: &str, topic_id: TopicId) -> Self {
        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            difficulty: DEFAULT_DIFFICULTY,
            category: default_category(),
            mp3_url: String::new(),
            topic_id,
        }
    }
}

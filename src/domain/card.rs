use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HasId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Card {
    pub fn new(id: Uuid, title: String, content: String) -> Self {
        Self { id, title, content }
    }
}

impl HasId for Card {
    fn item_id(&self) -> Uuid {
        self.id
    }
}

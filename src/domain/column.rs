use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Card, HasId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            cards: Vec::new(),
        }
    }
}

impl HasId for Column {
    fn item_id(&self) -> Uuid {
        self.id
    }
}

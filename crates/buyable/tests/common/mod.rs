use buyable::{Entity, InMemoryStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    #[serde(default)]
    pub published: bool,
}

impl Entity for Item {}

pub fn item(title: &str) -> Item {
    Item {
        title: title.to_string(),
        published: false,
    }
}

pub fn store() -> InMemoryStore<Item> {
    InMemoryStore::new()
}

pub fn attrs(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("attrs must be a JSON object")
}

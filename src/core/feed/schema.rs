//! Shape check applied to the structured feed value before mapping.
//!
//! Every item must carry `id`, `title`, `published`, `description`, `content`
//! and `enclosures`; keys outside the schema are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedDocument {
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    pub id: i64,
    pub title: String,
    /// Milliseconds since the Unix epoch.
    pub published: i64,
    pub description: String,
    pub content: String,
    pub enclosures: Vec<EnclosureItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnclosureItem {
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, thiserror::Error)]
#[error("feed does not match the episode schema: {0}")]
pub struct SchemaError(#[from] serde_json::Error);

pub fn validate_feed(value: Value) -> Result<FeedDocument, SchemaError> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pilot_item() -> Value {
        json!({
            "id": 1,
            "title": "Pilot",
            "published": 1_700_000_000_000_i64,
            "description": "d",
            "content": "c",
            "enclosures": [{ "url": "http://x/a.mp3", "type": "audio/mpeg", "length": "12" }],
            "link": "http://x/1"
        })
    }

    #[test]
    fn accepts_items_and_ignores_unknown_keys() {
        let document = validate_feed(json!({ "title": "Feed", "items": [pilot_item()] }))
            .expect("well-formed feed should validate");

        assert_eq!(document.items.len(), 1);
        let item = &document.items[0];
        assert_eq!(item.id, 1);
        assert_eq!(item.published, 1_700_000_000_000);
        assert_eq!(item.enclosures[0].mime_type, "audio/mpeg");
    }

    #[test]
    fn rejects_item_without_enclosures() {
        let mut item = pilot_item();
        item.as_object_mut()
            .expect("item is an object")
            .remove("enclosures");

        let error = validate_feed(json!({ "items": [item] })).expect_err("must fail");
        assert!(error.to_string().contains("enclosures"));
    }

    #[test]
    fn rejects_string_id_and_null_published() {
        let mut item = pilot_item();
        item["id"] = json!("abc");
        assert!(validate_feed(json!({ "items": [item] })).is_err());

        let mut item = pilot_item();
        item["published"] = Value::Null;
        assert!(validate_feed(json!({ "items": [item] })).is_err());
    }

    #[test]
    fn rejects_missing_items_list() {
        assert!(validate_feed(json!({ "title": "Feed" })).is_err());
        assert!(validate_feed(Value::Null).is_err());
    }

    #[test]
    fn empty_items_list_is_valid() {
        let document = validate_feed(json!({ "items": [] })).expect("empty feed is valid");
        assert!(document.items.is_empty());
    }
}

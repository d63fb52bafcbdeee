use chrono::DateTime;
use feed_rs::model::Entry;
use serde::Deserialize;
use serde_json::{json, Map, Number, Value};

const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("xml feed parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("atom feed parse error: {0}")]
    Atom(#[from] feed_rs::parser::ParseFeedError),
    #[error("json feed parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("rss document has no channel")]
    MissingChannel,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeed {
    title: Option<String>,
    #[serde(default)]
    items: Vec<JsonFeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeedItem {
    id: Option<Value>,
    title: Option<String>,
    summary: Option<String>,
    content_text: Option<String>,
    content_html: Option<String>,
    date_published: Option<String>,
    #[serde(default)]
    attachments: Vec<JsonFeedAttachment>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeedAttachment {
    url: String,
    mime_type: Option<String>,
}

/// Converts a feed document into the generic `{ "items": [...] }` value the
/// schema check consumes. Keys missing from the source are left out so the
/// schema decides whether the item is usable.
pub fn parse_feed_bytes(raw: &[u8]) -> Result<Value, FeedParseError> {
    let trimmed = trim_leading_ascii_whitespace(raw);
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }
    if trimmed[0] == b'{' {
        return parse_json_feed(trimmed);
    }

    let text = std::str::from_utf8(trimmed)?;
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)?;
    if doc.root_element().has_tag_name("rss") {
        return parse_rss(&doc);
    }
    parse_atom_feed(trimmed)
}

/// Object keys of a structured feed value, for diagnostics.
pub fn value_keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

fn parse_rss(doc: &roxmltree::Document) -> Result<Value, FeedParseError> {
    let channel = doc
        .root_element()
        .children()
        .find(|node| node.has_tag_name("channel"))
        .ok_or(FeedParseError::MissingChannel)?;

    let mut feed = Map::new();
    if let Some(title) = child_text(channel, "title") {
        feed.insert("title".to_string(), Value::String(title));
    }
    if let Some(link) = child_text(channel, "link") {
        feed.insert("link".to_string(), Value::String(link));
    }
    let items = channel
        .children()
        .filter(|node| node.has_tag_name("item"))
        .map(item_from_rss)
        .collect();
    feed.insert("items".to_string(), Value::Array(items));

    Ok(Value::Object(feed))
}

fn item_from_rss(node: roxmltree::Node) -> Value {
    let mut item = Map::new();

    if let Some(id) = child_text(node, "guid").or_else(|| child_text(node, "id")) {
        item.insert("id".to_string(), numeric_or_string(&id));
    }
    if let Some(title) = child_text(node, "title") {
        item.insert("title".to_string(), Value::String(title));
    }
    if let Some(link) = child_text(node, "link") {
        item.insert("link".to_string(), Value::String(link));
    }
    if let Some(pub_date) = child_text(node, "pubDate") {
        item.insert("published".to_string(), rfc2822_millis(&pub_date));
    }
    if let Some(description) = child_text(node, "description") {
        item.insert("description".to_string(), Value::String(description));
    }
    let content = node
        .children()
        .find(|child| child.has_tag_name((CONTENT_NS, "encoded")))
        .map(node_text);
    if let Some(content) = content {
        item.insert("content".to_string(), Value::String(content));
    }

    let enclosures = node
        .children()
        .filter(|child| child.has_tag_name("enclosure"))
        .map(|enclosure| {
            let mut object = Map::new();
            if let Some(url) = enclosure.attribute("url") {
                object.insert("url".to_string(), Value::String(url.to_string()));
            }
            if let Some(mime_type) = enclosure.attribute("type") {
                object.insert("type".to_string(), Value::String(mime_type.to_string()));
            }
            if let Some(length) = enclosure.attribute("length") {
                object.insert("length".to_string(), Value::String(length.to_string()));
            }
            Value::Object(object)
        })
        .collect();
    item.insert("enclosures".to_string(), Value::Array(enclosures));

    Value::Object(item)
}

fn parse_atom_feed(raw: &[u8]) -> Result<Value, FeedParseError> {
    let feed = feed_rs::parser::parse(raw)?;
    let title = feed.title.as_ref().map(|text| text.content.clone());
    let items: Vec<Value> = feed.entries.iter().map(item_from_entry).collect();

    let mut value = json!({ "items": items });
    if let Some(title) = title {
        value["title"] = Value::String(title);
    }
    Ok(value)
}

fn item_from_entry(entry: &Entry) -> Value {
    let mut item = Map::new();

    if !entry.id.trim().is_empty() {
        item.insert("id".to_string(), numeric_or_string(&entry.id));
    }
    if let Some(title) = &entry.title {
        item.insert("title".to_string(), Value::String(title.content.clone()));
    }
    if let Some(published) = entry.published.or(entry.updated) {
        item.insert("published".to_string(), Value::from(published.timestamp_millis()));
    }
    if let Some(summary) = &entry.summary {
        item.insert("description".to_string(), Value::String(summary.content.clone()));
    }
    if let Some(body) = entry.content.as_ref().and_then(|content| content.body.clone()) {
        item.insert("content".to_string(), Value::String(body));
    }

    let enclosures = entry
        .links
        .iter()
        .filter(|link| link.rel.as_deref() == Some("enclosure"))
        .map(|link| {
            let mut object = Map::new();
            object.insert("url".to_string(), Value::String(link.href.clone()));
            if let Some(media_type) = &link.media_type {
                object.insert("type".to_string(), Value::String(media_type.clone()));
            }
            Value::Object(object)
        })
        .collect();
    item.insert("enclosures".to_string(), Value::Array(enclosures));

    Value::Object(item)
}

fn parse_json_feed(raw: &[u8]) -> Result<Value, FeedParseError> {
    let feed: JsonFeed = serde_json::from_slice(raw)?;
    let items: Vec<Value> = feed
        .items
        .into_iter()
        .map(|entry| {
            let mut item = Map::new();
            match entry.id {
                Some(Value::String(id)) => {
                    item.insert("id".to_string(), numeric_or_string(&id));
                }
                Some(id @ Value::Number(_)) => {
                    item.insert("id".to_string(), id);
                }
                _ => {}
            }
            if let Some(title) = entry.title {
                item.insert("title".to_string(), Value::String(title));
            }
            if let Some(published) = entry.date_published {
                let millis = DateTime::parse_from_rfc3339(published.trim())
                    .map(|date| Value::from(date.timestamp_millis()))
                    .unwrap_or(Value::Null);
                item.insert("published".to_string(), millis);
            }
            if let Some(summary) = entry.summary {
                item.insert("description".to_string(), Value::String(summary));
            }
            if let Some(content) = entry.content_html.or(entry.content_text) {
                item.insert("content".to_string(), Value::String(content));
            }
            let enclosures = entry
                .attachments
                .into_iter()
                .map(|attachment| {
                    let mut object = Map::new();
                    object.insert("url".to_string(), Value::String(attachment.url));
                    if let Some(mime_type) = attachment.mime_type {
                        object.insert("type".to_string(), Value::String(mime_type));
                    }
                    Value::Object(object)
                })
                .collect();
            item.insert("enclosures".to_string(), Value::Array(enclosures));
            Value::Object(item)
        })
        .collect();

    let mut value = json!({ "items": items });
    if let Some(title) = feed.title {
        value["title"] = Value::String(title);
    }
    Ok(value)
}

/// Plain RSS child only; `itunes:title` and friends never stand in for `title`.
fn child_text(node: roxmltree::Node, name: &str) -> Option<String> {
    node.children()
        .find(|child| {
            child.is_element()
                && child.tag_name().namespace().is_none()
                && child.tag_name().name() == name
        })
        .map(node_text)
}

fn node_text(node: roxmltree::Node) -> String {
    node.descendants()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Unparseable dates become `null`, which the schema rejects.
fn rfc2822_millis(raw: &str) -> Value {
    DateTime::parse_from_rfc2822(raw.trim())
        .map(|date| Value::from(date.timestamp_millis()))
        .unwrap_or(Value::Null)
}

fn numeric_or_string(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::from(integer);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(trimmed.to_string()))
}

fn trim_leading_ascii_whitespace(raw: &[u8]) -> &[u8] {
    let mut index = 0;
    while index < raw.len() && raw[index].is_ascii_whitespace() {
        index += 1;
    }
    &raw[index..]
}

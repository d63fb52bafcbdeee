use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::{EnclosureItem, FeedItem};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Audio {
    pub src: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    pub id: i64,
    pub title: String,
    pub published: DateTime<Utc>,
    pub description: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
}

#[derive(Debug, thiserror::Error)]
#[error("episode {id} has an out of range timestamp: {published}")]
pub struct TimestampError {
    pub id: i64,
    pub published: i64,
}

impl From<EnclosureItem> for Audio {
    fn from(enclosure: EnclosureItem) -> Self {
        Self {
            src: enclosure.url,
            mime_type: enclosure.mime_type,
        }
    }
}

impl TryFrom<FeedItem> for Episode {
    type Error = TimestampError;

    fn try_from(item: FeedItem) -> Result<Self, Self::Error> {
        let published =
            DateTime::<Utc>::from_timestamp_millis(item.published).ok_or(TimestampError {
                id: item.id,
                published: item.published,
            })?;

        Ok(Self {
            id: item.id,
            title: format!("{}: {}", item.id, item.title),
            published,
            description: item.description,
            content: item.content,
            audio: item.enclosures.into_iter().next().map(Audio::from),
        })
    }
}

impl Episode {
    /// Plain-text rendering of the description, wrapped at `width` columns.
    pub fn summary_text(&self, width: usize) -> String {
        match html2text::config::plain().string_from_read(self.description.as_bytes(), width) {
            Ok(text) => text.trim().to_string(),
            Err(error) => {
                tracing::debug!(episode = self.id, %error, "description is not renderable html");
                self.description.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pilot() -> FeedItem {
        FeedItem {
            id: 1,
            title: "Pilot".to_string(),
            published: 1_700_000_000_000,
            description: "d".to_string(),
            content: "c".to_string(),
            enclosures: vec![EnclosureItem {
                url: "http://x/a.mp3".to_string(),
                mime_type: "audio/mpeg".to_string(),
            }],
        }
    }

    #[test]
    fn maps_pilot_item() {
        let episode = Episode::try_from(pilot()).expect("pilot should map");

        assert_eq!(
            episode,
            Episode {
                id: 1,
                title: "1: Pilot".to_string(),
                published: DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000)
                    .expect("valid timestamp"),
                description: "d".to_string(),
                content: "c".to_string(),
                audio: Some(Audio {
                    src: "http://x/a.mp3".to_string(),
                    mime_type: "audio/mpeg".to_string(),
                }),
            }
        );
        assert_eq!(episode.published.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn audio_comes_from_first_enclosure_only() {
        let mut item = pilot();
        item.enclosures.push(EnclosureItem {
            url: "http://x/b.ogg".to_string(),
            mime_type: "audio/ogg".to_string(),
        });

        let episode = Episode::try_from(item).expect("item should map");
        assert_eq!(
            episode.audio.map(|audio| audio.src).as_deref(),
            Some("http://x/a.mp3")
        );
    }

    #[test]
    fn no_enclosures_means_no_audio() {
        let mut item = pilot();
        item.enclosures.clear();

        let episode = Episode::try_from(item).expect("item should map");
        assert!(episode.audio.is_none());

        let json = serde_json::to_value(&episode).expect("episode serializes");
        assert!(json.get("audio").is_none());
    }

    #[test]
    fn rejects_out_of_range_timestamp() {
        let mut item = pilot();
        item.published = i64::MAX;

        let error = Episode::try_from(item).expect_err("timestamp must be rejected");
        assert_eq!(error.id, 1);
    }

    #[test]
    fn summary_text_strips_markup() {
        let mut episode = Episode::try_from(pilot()).expect("pilot should map");
        episode.description = "<p>Guam is sinking!</p>".to_string();

        assert_eq!(episode.summary_text(80), "Guam is sinking!");
    }
}

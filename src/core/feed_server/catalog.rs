use chrono::{DateTime, Days, TimeZone, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub guid: String,
    pub id: i64,
    pub title: String,
    pub published: DateTime<Utc>,
    pub description: String,
    pub content: String,
    pub enclosures: Vec<Enclosure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub items: Vec<CatalogItem>,
}

/// The two episodes the development feed server publishes, one week apart.
pub fn sample_channel() -> Channel {
    let base_time = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let week_later = base_time
        .checked_add_days(Days::new(7))
        .unwrap_or(base_time);

    Channel {
        title: "My Podcast".to_string(),
        link: "http://localhost:1323".to_string(),
        items: vec![
            CatalogItem {
                guid: "1".to_string(),
                id: 1,
                title: "Guam is sinking!".to_string(),
                published: base_time,
                description: "Oh no that can't be good.".to_string(),
                content: "<p>Guam is sinking! that cant be good</p>".to_string(),
                enclosures: vec![Enclosure {
                    url: "https://hollyweb.s3.us-east-1.amazonaws.com/episode1.wav".to_string(),
                    mime_type: "audio/wav".to_string(),
                }],
            },
            CatalogItem {
                guid: "2".to_string(),
                id: 2,
                title: "Oscar Nominations (ft. Justin Johnson)".to_string(),
                published: week_later,
                description: "Justin joins us to talk about Wishing Well and Gunston Road."
                    .to_string(),
                content: "<p>Oscar Nominations (ft. Justin Johnson)</p>".to_string(),
                enclosures: vec![Enclosure {
                    url: "https://hollyweb.s3.us-east-1.amazonaws.com/episode2.wav".to_string(),
                    mime_type: "audio/wav".to_string(),
                }],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_episodes_are_a_week_apart() {
        let channel = sample_channel();

        assert_eq!(channel.items.len(), 2);
        assert_eq!(
            channel.items[0].published.to_rfc3339(),
            "2025-01-01T00:00:00+00:00"
        );
        assert_eq!(
            channel.items[1].published - channel.items[0].published,
            chrono::Duration::days(7)
        );
    }
}

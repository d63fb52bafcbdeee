use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::catalog::{CatalogItem, Channel};

const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

#[derive(Debug, thiserror::Error)]
pub enum FeedWriteError {
    #[error("xml write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("feed is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes the channel as an indented RSS 2.0 document.
pub fn write_rss(channel: &Channel) -> Result<String, FeedWriteError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("rss").with_attributes([("version", "2.0"), ("xmlns:content", CONTENT_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;
    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "link", &channel.link)?;
    for item in &channel.items {
        write_item(&mut writer, item)?;
    }
    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

fn write_item(writer: &mut Writer<Cursor<Vec<u8>>>, item: &CatalogItem) -> Result<(), FeedWriteError> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    text_element(writer, "guid", &item.guid)?;
    text_element(writer, "id", &item.id.to_string())?;
    text_element(writer, "title", &item.title)?;
    text_element(writer, "pubDate", &item.published.to_rfc2822())?;
    text_element(writer, "description", &item.description)?;
    text_element(writer, "content:encoded", &item.content)?;
    for enclosure in &item.enclosures {
        writer.write_event(Event::Empty(BytesStart::new("enclosure").with_attributes([
            ("url", enclosure.url.as_str()),
            ("type", enclosure.mime_type.as_str()),
        ])))?;
    }
    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> Result<(), FeedWriteError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

//! RSS feed parser.
//!
//! Turns an RSS document into a flat list of [`FeedItem`]s. Documents are
//! read into a small element tree with quick-xml; the channel is located by
//! exact tag name first and then by namespace-suffix match, so prefixed
//! envelopes such as `<rss:channel>` are accepted. Pure Atom documents have
//! no channel and are handed to feed-rs instead.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{DailyLogError, Result};

/// Deepest element nesting accepted in a feed document.
const MAX_DEPTH: usize = 64;

/// A single feed entry.
///
/// Missing sub-elements are empty strings; the publication date is kept in
/// whatever format the source used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate")]
    pub published_date: String,
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    href: Option<String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String, href: Option<String>) -> Self {
        Self {
            name,
            href,
            ..Default::default()
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.name.ends_with(&format!(":{}", name))
    }

    /// Direct child by exact name, falling back to a namespace-suffix match.
    fn child(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.children.iter().find(|c| c.matches(name)))
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.matches(name))
    }

    fn child_text(&self, name: &str) -> String {
        self.child(name)
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default()
    }
}

/// Parse an RSS (or Atom) document into its items, in document order.
pub fn parse(xml: &str) -> Result<Vec<FeedItem>> {
    let root = read_tree(xml)?;

    let Some(channel) = root.child("channel") else {
        if root.matches("feed") {
            return parse_atom(xml);
        }
        return Err(DailyLogError::Parse(format!(
            "no channel element under <{}>",
            root.name
        )));
    };

    // RSS 1.0 (RDF) places items next to the channel rather than inside it.
    let mut items: Vec<&Element> = channel.children_named("item").collect();
    if items.is_empty() {
        items = root.children_named("item").collect();
    }

    Ok(items.into_iter().map(to_item).collect())
}

fn to_item(item: &Element) -> FeedItem {
    let link = match item.child("link") {
        Some(link) if !link.text.trim().is_empty() => link.text.trim().to_string(),
        Some(link) => link.href.clone().unwrap_or_default(),
        None => String::new(),
    };

    FeedItem {
        title: item.child_text("title"),
        link,
        published_date: item.child_text("pubDate"),
    }
}

fn read_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| DailyLogError::Parse(format!("malformed XML: {}", e)))?;

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(DailyLogError::Parse("document nested too deeply".to_string()));
                }
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                stack.push(Element::new(name, href_attribute(&e)));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let element = Element::new(name, href_attribute(&e));
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    // Undeclared entities (e.g. &nbsp;) keep their raw form
                    match t.unescape() {
                        Ok(text) => current.text.push_str(&text),
                        Err(_) => current.text.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(DailyLogError::Parse("unbalanced closing tag".to_string()));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(DailyLogError::Parse("unexpected end of document".to_string()));
    }

    root.ok_or_else(|| DailyLogError::Parse("document has no root element".to_string()))
}

fn href_attribute(e: &quick_xml::events::BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"href")
        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
}

fn parse_atom(xml: &str) -> Result<Vec<FeedItem>> {
    let feed = feed_rs::parser::parse(xml.as_bytes())
        .map_err(|e| DailyLogError::Parse(format!("failed to parse feed: {}", e)))?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| FeedItem {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link: entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default(),
            published_date: entry
                .published
                .or(entry.updated)
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_item() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Feed</title>
    <item><title>A</title><link>L</link><pubDate>D</pubDate></item>
  </channel>
</rss>"#;

        let items = parse(xml).unwrap();
        assert_eq!(
            items,
            vec![FeedItem {
                title: "A".to_string(),
                link: "L".to_string(),
                published_date: "D".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_missing_link() {
        let xml = "<rss><channel><item><title>No link</title><pubDate>D</pubDate></item></channel></rss>";

        let items = parse(xml).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "No link");
        assert_eq!(items[0].link, "");
    }

    #[test]
    fn test_parse_empty_item() {
        let xml = "<rss><channel><item/></channel></rss>";
        assert_eq!(parse(xml).unwrap(), vec![FeedItem::default()]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let xml = "<rss><channel>\
            <item><title>first</title></item>\
            <item><title>second</title></item>\
            <item><title>third</title></item>\
            </channel></rss>";

        let titles: Vec<String> = parse(xml).unwrap().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_channel_without_items() {
        let xml = "<rss><channel><title>Quiet</title></channel></rss>";
        assert!(parse(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_prefixed_channel() {
        let xml = r#"<rss:rss xmlns:rss="http://purl.org/rss/1.0/">
  <rss:channel>
    <rss:item><rss:title>Prefixed</rss:title><rss:link>http://x</rss:link></rss:item>
  </rss:channel>
</rss:rss>"#;

        let items = parse(xml).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Prefixed");
        assert_eq!(items[0].link, "http://x");
    }

    #[test]
    fn test_parse_rdf_items_beside_channel() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://purl.org/rss/1.0/">
  <channel><title>RDF</title></channel>
  <item><title>One</title><link>http://one</link></item>
  <item><title>Two</title><link>http://two</link></item>
</rdf:RDF>"#;

        let items = parse(xml).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].link, "http://two");
    }

    #[test]
    fn test_parse_unescapes_entities_and_cdata() {
        let xml = "<rss><channel><item>\
            <title>Tom &amp; Jerry</title>\
            <link><![CDATA[https://example.com/?a=1&b=2]]></link>\
            </item></channel></rss>";

        let items = parse(xml).unwrap();
        assert_eq!(items[0].title, "Tom & Jerry");
        assert_eq!(items[0].link, "https://example.com/?a=1&b=2");
    }

    #[test]
    fn test_parse_link_href_attribute() {
        let xml = r#"<rss><channel><item><title>T</title><link href="https://h"/></item></channel></rss>"#;
        assert_eq!(parse(xml).unwrap()[0].link, "https://h");
    }

    #[test]
    fn test_parse_atom_feed() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom</title>
  <id>urn:feed</id>
  <updated>2024-01-02T00:00:00Z</updated>
  <entry>
    <title>Entry</title>
    <id>urn:entry</id>
    <link href="https://example.com/entry"/>
    <updated>2024-01-02T03:04:05Z</updated>
  </entry>
</feed>"#;

        let items = parse(xml).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Entry");
        assert_eq!(items[0].link, "https://example.com/entry");
        assert!(items[0].published_date.starts_with("2024-01-02T03:04:05"));
    }

    #[test]
    fn test_parse_no_channel_is_error() {
        let result = parse("<html><body>not a feed</body></html>");
        assert!(matches!(result, Err(DailyLogError::Parse(_))));
    }

    #[test]
    fn test_parse_malformed_xml_is_error() {
        assert!(matches!(
            parse("<rss><channel><item></channel>"),
            Err(DailyLogError::Parse(_))
        ));
        assert!(matches!(parse(""), Err(DailyLogError::Parse(_))));
    }

    #[test]
    fn test_parse_deep_nesting_is_error() {
        let depth = 200_000;
        let xml = format!(
            "<rss><channel><item><title>{}{}</title></item></channel></rss>",
            "<a>".repeat(depth),
            "</a>".repeat(depth)
        );

        let err = parse(&xml).unwrap_err();
        assert!(matches!(err, DailyLogError::Parse(_)));
        assert!(err.to_string().contains("nested too deeply"));
    }

    #[test]
    fn test_parse_accepts_nesting_up_to_limit() {
        // rss, channel, item and title leave room for the rest
        let depth = MAX_DEPTH - 4;
        let xml = format!(
            "<rss><channel><item><title>T{}{}</title></item></channel></rss>",
            "<b>".repeat(depth),
            "</b>".repeat(depth)
        );
        assert_eq!(parse(&xml).unwrap()[0].title, "T");
    }

    #[test]
    fn test_feed_item_serializes_pub_date() {
        let item = FeedItem {
            title: "A".to_string(),
            link: "L".to_string(),
            published_date: "D".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["pubDate"], "D");
        assert!(json.get("published_date").is_none());
    }
}

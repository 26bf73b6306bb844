//! Atom 1.0 serialization of a [`FeedDocument`].
use atom_syndication::{Entry, Feed, Generator, Link, Person, Text};
use birdfeed_common::{BirdfeedError, Result};
use chrono::{DateTime, Utc};

use crate::feed::{FeedDocument, FeedEntry};

fn alternate(href: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_rel("alternate");
    link
}

fn atom_entry(entry: &FeedEntry) -> Entry {
    let mut author = Person::default();
    author.set_name(entry.author.name.as_str());
    author.set_uri(Some(entry.author.link.clone()));

    let mut out = Entry::default();
    out.set_id(entry.id.as_str());
    out.set_title(Text::from(entry.title.clone()));
    out.set_summary(Some(Text::from(entry.title.clone())));
    out.set_updated(entry.date.fixed_offset());
    out.set_published(Some(entry.date.fixed_offset()));
    out.set_authors(vec![author]);
    out.set_links(vec![alternate(&entry.link)]);
    out
}

/// Serialize `doc` as an Atom document.
///
/// Atom requires a feed-level `updated`; an empty feed has none, so
/// `fallback_updated` (normally the time the run started) stands in.
pub fn render_atom(doc: &FeedDocument, fallback_updated: DateTime<Utc>) -> Result<String> {
    let mut generator = Generator::default();
    generator.set_value("birdfeed");
    generator.set_version(Some(env!("CARGO_PKG_VERSION").to_string()));

    let mut feed = Feed::default();
    feed.set_id(doc.id.as_str());
    feed.set_title(Text::from(doc.title.clone()));
    feed.set_updated(doc.updated.unwrap_or(fallback_updated).fixed_offset());
    feed.set_links(vec![alternate(&doc.link)]);
    feed.set_generator(Some(generator));
    feed.set_entries(doc.entries.iter().map(atom_entry).collect::<Vec<_>>());

    let bytes = feed
        .write_to(Vec::new())
        .map_err(|e| BirdfeedError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BirdfeedError::Render(e.to_string()))
}

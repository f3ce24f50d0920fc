//! Turns a listing page into job records.
//!
//! The job board does not mark up its cards consistently, so every field is
//! filled by a short ordered list of strategies. Each strategy returns an
//! optional value and the first non-empty one wins. A card that defeats all
//! strategies still produces a record, just with empty fields.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::text::flatten;
use crate::{JobRecord, Site};

/// How many ancestors of a job anchor are searched for a heading.
pub const ANCESTOR_SEARCH_DEPTH: usize = 6;

/// Substring that marks an href as a job detail link.
pub const JOB_LINK_MARKER: &str = "view-job";

static JOB_ANCHOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!(r#"a[href*="{JOB_LINK_MARKER}"]"#)).expect("valid anchor selector")
});
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid heading selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

// `Location:` as a whole word, then everything up to a run of 2+ spaces,
// an opening bracket or the end.
static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bLocation\s*:\s*([^\[]+?)(?:\s{2,}|\s*\[|$)").expect("valid location regex")
});

/// Knobs that differ between the live API and the bulk exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Character cap for the fallback description snippet.
    pub description_limit: usize,
    /// Substituted when no title could be recovered.
    pub title_placeholder: Option<&'static str>,
    /// Whether to pull `id` out of the link's query string.
    pub parse_id: bool,
    /// Stop after this many records; 0 means no limit.
    pub max: usize,
}

impl ExtractOptions {
    pub const LIVE: Self = Self {
        description_limit: 300,
        title_placeholder: Some("No title"),
        parse_id: false,
        max: 0,
    };

    pub const EXPORT: Self = Self {
        description_limit: 600,
        title_placeholder: None,
        parse_id: true,
        max: 0,
    };

    pub fn with_max(self, max: usize) -> Self {
        Self { max, ..self }
    }
}

/// A job anchor together with the neighbourhood its fields are read from.
struct Card<'a> {
    document: &'a Html,
    anchor: ElementRef<'a>,
    link: String,
    /// Ancestor where the heading was found, or the anchor itself.
    container: ElementRef<'a>,
    /// Heading found while walking up from the anchor.
    heading: Option<String>,
    /// Flattened container text.
    text: String,
    /// Resolved title, before any placeholder is applied.
    title: String,
}

type Strategy = fn(&Card<'_>, &ExtractOptions) -> Option<String>;

const TITLE_STRATEGIES: &[Strategy] = &[ancestor_heading, preceding_heading];
const LOCATION_STRATEGIES: &[Strategy] = &[location_label];
const DESCRIPTION_STRATEGIES: &[Strategy] = &[first_paragraph, text_snippet];
const ID_STRATEGIES: &[Strategy] = &[query_id];

/// Extracts one record per distinct job link on the page.
pub fn extract_jobs(document: &Html, site: &Site, options: &ExtractOptions) -> Vec<JobRecord> {
    let limit = if options.max > 0 { options.max } else { usize::MAX };

    discover_links(document, site)
        .into_iter()
        .take(limit)
        .map(|(anchor, link)| extract_record(document, anchor, link, options))
        .collect()
}

/// Every job anchor on the page with its absolute link, in document order,
/// duplicates collapsed.
pub fn discover_links<'a>(document: &'a Html, site: &Site) -> Vec<(ElementRef<'a>, String)> {
    let mut seen = HashSet::new();
    let mut anchors = Vec::new();

    for anchor in document.select(&JOB_ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let link = site.normalize_link(href);
        if link.is_empty() || !seen.insert(link.clone()) {
            continue;
        }
        anchors.push((anchor, link));
    }

    anchors
}

fn extract_record<'a>(
    document: &'a Html,
    anchor: ElementRef<'a>,
    link: String,
    options: &ExtractOptions,
) -> JobRecord {
    let (container, heading) = walk_ancestors(anchor);
    let mut card = Card {
        document,
        anchor,
        link,
        container,
        heading,
        text: flatten(container, " "),
        title: String::new(),
    };

    card.title = first_non_empty(&card, options, TITLE_STRATEGIES);
    let location = first_non_empty(&card, options, LOCATION_STRATEGIES);
    let description = first_non_empty(&card, options, DESCRIPTION_STRATEGIES);
    let id = first_non_empty(&card, options, ID_STRATEGIES);

    let title = match (card.title.is_empty(), options.title_placeholder) {
        (true, Some(placeholder)) => placeholder.to_string(),
        _ => card.title,
    };

    JobRecord {
        id,
        title,
        link: card.link,
        location,
        description,
    }
}

fn first_non_empty(card: &Card<'_>, options: &ExtractOptions, strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .filter_map(|strategy| strategy(card, options))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Walks up from the anchor, at most `ANCESTOR_SEARCH_DEPTH` levels, and
/// stops at the first ancestor whose subtree holds a heading.
fn walk_ancestors(anchor: ElementRef<'_>) -> (ElementRef<'_>, Option<String>) {
    let mut node = anchor;
    for _ in 0..ANCESTOR_SEARCH_DEPTH {
        let Some(parent) = node.parent().and_then(ElementRef::wrap) else {
            break;
        };
        // `select` also matches the scope element itself; only descendants count.
        let heading = parent
            .select(&HEADING)
            .find(|heading| heading.id() != parent.id());
        if let Some(heading) = heading {
            return (parent, Some(flatten(heading, " ")));
        }
        node = parent;
    }
    (anchor, None)
}

fn ancestor_heading(card: &Card<'_>, _: &ExtractOptions) -> Option<String> {
    card.heading.clone()
}

/// Last heading that opens before the anchor in document order.
fn preceding_heading(card: &Card<'_>, _: &ExtractOptions) -> Option<String> {
    let anchor_id = card.anchor.id();
    let mut last = None;

    for node in card.document.root_element().descendants() {
        if node.id() == anchor_id {
            break;
        }
        if let Some(element) = ElementRef::wrap(node) {
            if HEADING.matches(&element) {
                last = Some(element);
            }
        }
    }

    last.map(|heading| flatten(heading, " "))
}

fn location_label(card: &Card<'_>, _: &ExtractOptions) -> Option<String> {
    extract_location(&card.text)
}

fn first_paragraph(card: &Card<'_>, _: &ExtractOptions) -> Option<String> {
    card.container
        .select(&PARAGRAPH)
        .next()
        .map(|paragraph| flatten(paragraph, " "))
}

fn text_snippet(card: &Card<'_>, options: &ExtractOptions) -> Option<String> {
    Some(snippet(&card.text, &card.title, options.description_limit))
}

fn query_id(card: &Card<'_>, options: &ExtractOptions) -> Option<String> {
    if !options.parse_id {
        return None;
    }
    job_id(&card.link)
}

/// Value following a `Location:` label, trimmed.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|location| !location.is_empty())
}

/// `text` with every occurrence of `title` removed, cut to `limit` characters.
pub fn snippet(text: &str, title: &str, limit: usize) -> String {
    let stripped = if title.is_empty() {
        text.to_string()
    } else {
        text.replace(title, "")
    };
    let truncated: String = stripped.trim().chars().take(limit).collect();
    truncated.trim().to_string()
}

/// First `id` query parameter of a job link.
pub fn job_id(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}

//! Picks the full description out of a job detail page.
//!
//! Detail pages rarely mark up "the description", so the largest plausible
//! content block is taken instead. Navigation chrome occasionally wins.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::text::{char_len, flatten};

/// A `div` must be longer than this to be considered.
pub const DIV_FLOOR: usize = 200;

const SEPARATOR: &str = "\n\n";

static CONTENT_BLOCKS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["article", "section", "main"]
        .into_iter()
        .map(|tag| Selector::parse(tag).expect("valid block selector"))
        .collect()
});
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").expect("valid div selector"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Best-effort full description of a detail page.
pub fn best_text_block(document: &Html) -> String {
    let mut best = String::new();

    for selector in CONTENT_BLOCKS.iter() {
        for block in document.select(selector) {
            let text = flatten(block, SEPARATOR);
            if char_len(&text) > char_len(&best) {
                best = text;
            }
        }
    }

    for div in document.select(&DIV) {
        let text = flatten(div, SEPARATOR);
        let len = char_len(&text);
        if len > char_len(&best) && len > DIV_FLOOR && !is_chrome(div) {
            best = text;
        }
    }

    if best.is_empty() {
        best = flatten(document.root_element(), SEPARATOR);
    }

    EXCESS_NEWLINES
        .replace_all(&best, SEPARATOR)
        .trim()
        .to_string()
}

fn is_chrome(div: ElementRef<'_>) -> bool {
    let class = div.value().attr("class").unwrap_or_default().to_lowercase();
    class.contains("footer") || class.contains("nav")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_article_wins() {
        let doc = Html::parse_document(
            "<main>Short</main><article><h1>Ranger</h1><p>Patrol the refuge.</p></article>",
        );
        assert_eq!(best_text_block(&doc), "Ranger\n\nPatrol the refuge.");
    }

    #[test]
    fn test_large_div_replaces_block() {
        let long = "Duties include seed collection. ".repeat(10);
        let doc = Html::parse_document(&format!(
            r#"<section>Apply now</section><div class="posting">{long}</div>"#
        ));
        assert_eq!(best_text_block(&doc), long.trim());
    }

    #[test]
    fn test_footer_and_nav_divs_skipped() {
        let long = "Links and legal text. ".repeat(20);
        let doc = Html::parse_document(&format!(
            r#"<article>Field technician wanted</article>
               <div class="Site-Footer">{long}</div>
               <div class="topnav">{long}</div>"#
        ));
        assert_eq!(best_text_block(&doc), "Field technician wanted");
    }

    #[test]
    fn test_short_div_ignored() {
        let doc = Html::parse_document(
            r#"<article>Tiny</article><div class="content">A bit longer but under the floor</div>"#,
        );
        assert_eq!(best_text_block(&doc), "Tiny");
    }

    #[test]
    fn test_falls_back_to_document_text() {
        let doc = Html::parse_document("<body><span>Only</span> <em>spans</em></body>");
        assert_eq!(best_text_block(&doc), "Only\n\nspans");
    }

    #[test]
    fn test_collapses_newline_runs() {
        let doc = Html::parse_document("<article>Line one\n\n\n\nLine two</article>");
        assert_eq!(best_text_block(&doc), "Line one\n\nLine two");
    }
}

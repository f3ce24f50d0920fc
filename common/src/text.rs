use scraper::ElementRef;

/// Flattens an element's text: every text node trimmed, empty ones
/// dropped, the rest joined with `separator`.
pub fn flatten(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_flatten_joins_trimmed_nodes() {
        let html = Html::parse_fragment("<div>  Forest <b>Tech</b>\n\n <i> </i>II </div>");
        let text = flatten(html.root_element(), " ");
        assert_eq!(text, "Forest Tech II");
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("Año"), 3);
    }
}

//! HTML link extraction
//!
//! Turns a document into the distinct `href` values of its anchors, in
//! document order, with any fragment suffix removed. Resolution and scope
//! filtering happen later in the pipeline.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Yields the raw href strings of a document
pub trait LinkExtractor: Send + Sync {
    /// One pass over the document; the result is finite, fragment-stripped
    /// and free of duplicates.
    fn extract_hrefs(&self, document: &str) -> Vec<String>;
}

/// `<a href>` extractor backed by `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_hrefs(&self, document: &str) -> Vec<String> {
        let Ok(anchors) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        let document = Html::parse_document(document);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&anchors) {
            if let Some(href) = element.value().attr("href") {
                let href = strip_fragment(href.trim());
                if seen.insert(href) {
                    links.push(href.to_string());
                }
            }
        }

        links
    }
}

/// Removes everything from the first `#` on
///
/// # Examples
///
/// ```
/// use sitecrawl::crawler::strip_fragment;
///
/// assert_eq!(strip_fragment("/page#section"), "/page");
/// assert_eq!(strip_fragment("#top"), "");
/// assert_eq!(strip_fragment("/plain"), "/plain");
/// ```
pub fn strip_fragment(href: &str) -> &str {
    match href.find('#') {
        Some(index) => &href[..index],
        None => href,
    }
}

/// Convenience function for extracting hrefs with the default extractor
pub fn extract_hrefs(document: &str) -> Vec<String> {
    HtmlLinkExtractor.extract_hrefs(document)
}

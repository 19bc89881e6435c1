use crate::http_client::HttpClient;
use crate::models::{Bookmark, PageOutcome};
use scraper::{Html, Selector};

const ITEM_SELECTOR: &str = ".user-bookmark-item";
const TITLE_SELECTOR: &str = ".bm-title a";
const DATE_SELECTOR: &str = ".chapter-datecreate";

/// Build the listing URL for a 1-based page number.
///
/// Page 1 is served at the bare bookmark path; later pages take a `page`
/// query parameter.
pub fn page_url(list_url: &str, page: u32) -> String {
    if page == 1 {
        list_url.to_string()
    } else {
        format!("{}?page={}", list_url, page)
    }
}

/// Extract bookmark records from one listing page.
///
/// Items without a title anchor are skipped with a warning; they never
/// abort the remaining items. Every returned record has a non-empty title
/// and no chapter date yet.
pub fn parse_bookmark_page(html: &str) -> Vec<Bookmark> {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse(ITEM_SELECTOR).unwrap();
    let title_selector = Selector::parse(TITLE_SELECTOR).unwrap();
    let date_selector = Selector::parse(DATE_SELECTOR).unwrap();

    let mut bookmarks = Vec::new();
    for item in document.select(&item_selector) {
        let title = match item.select(&title_selector).next() {
            Some(anchor) => anchor.text().collect::<String>().trim().to_string(),
            None => {
                log::warn!("Skipping an entry: missing title");
                continue;
            }
        };
        if title.is_empty() {
            log::warn!("Skipping an entry: missing title");
            continue;
        }

        let last_updated = item
            .select(&date_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        bookmarks.push(Bookmark::new(title, last_updated));
    }
    bookmarks
}

/// Fetch and parse one listing page.
///
/// Non-success status and network failures map to `TransportError`; a page
/// that parses to zero items maps to `EmptyOrDone`. Both end pagination.
pub async fn fetch_bookmark_page(client: &HttpClient, list_url: &str, page: u32) -> PageOutcome {
    let url = page_url(list_url, page);
    log::info!("Fetching bookmark page {}: {}", page, url);

    let response = match client.get(&url).await {
        Ok(r) => r,
        Err(e) => {
            log::error!("Request failed for page {}: {}", page, e);
            return PageOutcome::TransportError;
        }
    };

    if !response.status().is_success() {
        log::error!("Error fetching page {}: HTTP {}", page, response.status());
        return PageOutcome::TransportError;
    }

    let body = match response.text().await {
        Ok(t) => t,
        Err(e) => {
            log::error!("Failed to read page {} body: {}", page, e);
            return PageOutcome::TransportError;
        }
    };

    let bookmarks = parse_bookmark_page(&body);
    if bookmarks.is_empty() {
        log::warn!("No bookmarks found on page {}", page);
        return PageOutcome::EmptyOrDone;
    }

    log::info!("Fetched {} bookmarks from page {}", bookmarks.len(), page);
    PageOutcome::Items(bookmarks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: Option<&str>, date: Option<&str>) -> String {
        let title_html = title
            .map(|t| format!(r#"<div class="bm-title"><a href="/manga/x">{}</a></div>"#, t))
            .unwrap_or_default();
        let date_html = date
            .map(|d| format!(r#"<span class="chapter-datecreate">{}</span>"#, d))
            .unwrap_or_default();
        format!(r#"<div class="user-bookmark-item">{}{}</div>"#, title_html, date_html)
    }

    #[test]
    fn test_page_url_bare_for_first_page() {
        let list = "https://www.natomanga.com/bookmark";
        assert_eq!(page_url(list, 1), "https://www.natomanga.com/bookmark");
        assert_eq!(page_url(list, 2), "https://www.natomanga.com/bookmark?page=2");
        assert_eq!(page_url(list, 10), "https://www.natomanga.com/bookmark?page=10");
    }

    #[test]
    fn test_extraction_counts_well_formed_and_skips_titleless() {
        // 3 well-formed, 2 malformed (no title anchor)
        let html = format!(
            "<html><body>{}{}{}{}{}</body></html>",
            item(Some("Vinland Saga"), Some("Jan-05-2024")),
            item(None, Some("Jan-06-2024")),
            item(Some("Berserk"), None),
            item(None, None),
            item(Some("Dandadan"), Some("Feb-01-2024")),
        );
        let bookmarks = parse_bookmark_page(&html);
        assert_eq!(bookmarks.len(), 3);
        let titles: Vec<&str> = bookmarks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Vinland Saga", "Berserk", "Dandadan"]);
    }

    #[test]
    fn test_extraction_populates_fields() {
        let html = item(Some("  Vinland Saga  "), Some(" Jan-05-2024 "));
        let bookmarks = parse_bookmark_page(&html);
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].title, "Vinland Saga");
        assert_eq!(bookmarks[0].last_updated.as_deref(), Some("Jan-05-2024"));
        assert_eq!(bookmarks[0].latest_chapter_date, None);
    }

    #[test]
    fn test_extraction_without_date_element() {
        let html = item(Some("Berserk"), None);
        let bookmarks = parse_bookmark_page(&html);
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].last_updated, None);
    }

    #[test]
    fn test_extraction_of_empty_page() {
        let bookmarks = parse_bookmark_page("<html><body><p>nothing here</p></body></html>");
        assert!(bookmarks.is_empty());
    }
}

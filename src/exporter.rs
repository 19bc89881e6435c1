use crate::bookmarks;
use crate::catalog;
use crate::config::Config;
use crate::http_client::HttpClient;
use crate::models::{Bookmark, PageOutcome};
use crate::status::StatusLine;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// State owned by one export run; constructed fresh per invocation so
/// nothing accumulates across runs.
#[derive(Default)]
pub struct ExportContext {
    pub bookmarks: Vec<Bookmark>,
    pub processed: usize,
}

/// Terminal result of an export run.
#[derive(Debug)]
pub enum ExportOutcome {
    Exported { path: PathBuf, count: usize },
    /// Pagination yielded nothing; no file is written.
    NoBookmarks,
}

/// Run the full export: paginate, guard, enrich, finalize.
pub async fn export(
    client: &HttpClient,
    config: &Config,
    output_path: &Path,
    status: &StatusLine,
) -> Result<ExportOutcome, Box<dyn Error>> {
    let mut ctx = ExportContext::default();

    paginate(client, config, status, &mut ctx).await;

    if ctx.bookmarks.is_empty() {
        status.set("No bookmarks found");
        log::warn!("No bookmarks found; check whether the site structure changed");
        return Ok(ExportOutcome::NoBookmarks);
    }

    enrich(client, config, status, &mut ctx).await;

    status.set("Exporting bookmarks...");
    let json = finalize(&mut ctx.bookmarks)?;
    fs::write(output_path, json)?;
    log::info!(
        "Exported {} bookmarks to {}",
        ctx.bookmarks.len(),
        output_path.display()
    );
    status.set("Export complete");

    Ok(ExportOutcome::Exported {
        path: output_path.to_path_buf(),
        count: ctx.bookmarks.len(),
    })
}

/// Fetch listing pages 1,2,3,... until the first terminal outcome.
///
/// A transport error and an exhausted list both stop the loop; the
/// difference only shows in the status text and logs.
async fn paginate(client: &HttpClient, config: &Config, status: &StatusLine, ctx: &mut ExportContext) {
    let list_url = config.bookmark_list_url();
    let mut page = 1u32;
    loop {
        status.set(&format!("Fetching bookmarks... page {}", page));
        match bookmarks::fetch_bookmark_page(client, &list_url, page).await {
            PageOutcome::Items(items) => {
                ctx.bookmarks.extend(items);
                status.set(&format!("Fetched {} bookmarks...", ctx.bookmarks.len()));
                page += 1;
            }
            PageOutcome::EmptyOrDone => {
                status.set("Fetching complete, processing...");
                break;
            }
            PageOutcome::TransportError => {
                status.set("Failed to fetch bookmarks");
                break;
            }
        }
    }
}

/// Look up the latest chapter date for every bookmark, one at a time.
async fn enrich(client: &HttpClient, config: &Config, status: &StatusLine, ctx: &mut ExportContext) {
    let total = ctx.bookmarks.len();
    for (i, bookmark) in ctx.bookmarks.iter_mut().enumerate() {
        log::info!("Looking up latest chapter date for: {}", bookmark.title);
        status.set(&format!("Fetching latest chapter dates ({}/{})", i + 1, total));
        catalog::lookup_latest_chapter(client, &config.catalog, bookmark).await;
        ctx.processed += 1;
    }
}

/// Sort newest-first and serialize the whole sequence as pretty JSON.
pub fn finalize(bookmarks: &mut [Bookmark]) -> Result<String, serde_json::Error> {
    sort_by_latest_chapter(bookmarks);
    serde_json::to_string_pretty(bookmarks)
}

/// Stable descending sort by `latest_chapter_date`.
///
/// Missing and unparseable dates coerce to the minimum timestamp, so they
/// order after every valid date while keeping their insertion order.
pub fn sort_by_latest_chapter(bookmarks: &mut [Bookmark]) {
    bookmarks.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
}

fn sort_key(bookmark: &Bookmark) -> DateTime<Utc> {
    bookmark
        .latest_chapter_date
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(title: &str, latest: Option<&str>) -> Bookmark {
        Bookmark {
            title: title.to_string(),
            last_updated: None,
            latest_chapter_date: latest.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_sort_descending_by_date() {
        let mut list = vec![
            bookmark("B", Some("2023-01-01T00:00:00Z")),
            bookmark("A", Some("2024-01-01T00:00:00Z")),
        ];
        sort_by_latest_chapter(&mut list);
        let titles: Vec<&str> = list.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_nulls_sort_last() {
        let mut list = vec![
            bookmark("no-date", None),
            bookmark("old", Some("2020-06-15T08:00:00+00:00")),
            bookmark("garbage-date", Some("not a timestamp")),
            bookmark("new", Some("2024-02-29T23:59:59Z")),
        ];
        sort_by_latest_chapter(&mut list);
        let titles: Vec<&str> = list.iter().map(|b| b.title.as_str()).collect();
        // Dated entries first, newest to oldest; undated keep insertion order
        assert_eq!(titles, vec!["new", "old", "no-date", "garbage-date"]);
    }

    #[test]
    fn test_finalize_serializes_sorted_array() {
        let mut list = vec![
            bookmark("B", Some("2023-01-01T00:00:00Z")),
            bookmark("A", Some("2024-01-01T00:00:00Z")),
        ];
        let json = finalize(&mut list).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["title"], "A");
        assert_eq!(array[0]["latestChapterDate"], "2024-01-01T00:00:00Z");
        assert_eq!(array[1]["title"], "B");
        assert!(array[0]["lastUpdated"].is_null());
    }

    #[test]
    fn test_finalize_of_single_undated_bookmark() {
        let mut list = vec![bookmark("only", None)];
        let json = finalize(&mut list).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["latestChapterDate"].is_null());
    }
}

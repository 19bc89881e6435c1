use crate::config::CatalogConfig;
use crate::http_client::HttpClient;
use crate::models::Bookmark;
use serde::Deserialize;
use std::error::Error;

#[derive(Deserialize)]
struct MangaSearchResponse {
    #[serde(default)]
    data: Vec<MangaSearchEntry>,
}

#[derive(Deserialize)]
struct MangaSearchEntry {
    id: String,
}

#[derive(Deserialize)]
struct ChapterFeedResponse {
    #[serde(default)]
    data: Vec<ChapterFeedEntry>,
}

#[derive(Deserialize)]
struct ChapterFeedEntry {
    attributes: ChapterAttributes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChapterAttributes {
    publish_at: Option<String>,
}

fn first_search_id(body: &str) -> Result<Option<String>, serde_json::Error> {
    let response = serde_json::from_str::<MangaSearchResponse>(body)?;
    Ok(response.data.into_iter().next().map(|entry| entry.id))
}

fn first_feed_publish_at(body: &str) -> Result<Option<String>, serde_json::Error> {
    let response = serde_json::from_str::<ChapterFeedResponse>(body)?;
    Ok(response
        .data
        .into_iter()
        .next()
        .and_then(|entry| entry.attributes.publish_at))
}

/// Search the catalog for a title and return the first match's id.
///
/// The first search hit wins; there is no disambiguation between
/// similarly named series.
pub async fn search_manga_id(
    client: &HttpClient,
    catalog: &CatalogConfig,
    title: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    let url = format!(
        "{}/manga?title={}",
        catalog.api_url.trim_end_matches('/'),
        urlencoding::encode(title)
    );
    let body = client.get_text(&url).await?;
    Ok(first_search_id(&body)?)
}

/// Fetch the newest chapter's publish timestamp for a catalog manga id.
pub async fn latest_chapter_publish_at(
    client: &HttpClient,
    catalog: &CatalogConfig,
    manga_id: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    let url = format!(
        "{}/manga/{}/feed",
        catalog.api_url.trim_end_matches('/'),
        manga_id
    );
    let response = client
        .client()
        .get(&url)
        .query(&[
            ("limit", "1"),
            ("translatedLanguage[]", catalog.language.as_str()),
            ("order[publishAt]", "desc"),
        ])
        .send()
        .await?
        .error_for_status()?;
    let body = response.text().await?;
    Ok(first_feed_publish_at(&body)?)
}

/// Resolve the latest chapter release date for one bookmark.
///
/// Mutates `bookmark.latest_chapter_date` on success. Transport errors,
/// malformed payloads, and empty result sets all leave the date `None`
/// and log a warning; this function never fails, so the sequential
/// driver can always proceed to the next bookmark.
pub async fn lookup_latest_chapter(
    client: &HttpClient,
    catalog: &CatalogConfig,
    bookmark: &mut Bookmark,
) {
    let manga_id = match search_manga_id(client, catalog, &bookmark.title).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            log::warn!("No catalog entry found for: {}", bookmark.title);
            return;
        }
        Err(e) => {
            log::warn!("Catalog search failed for {}: {}", bookmark.title, e);
            return;
        }
    };

    match latest_chapter_publish_at(client, catalog, &manga_id).await {
        Ok(Some(publish_at)) => bookmark.latest_chapter_date = Some(publish_at),
        Ok(None) => log::warn!("No chapters in feed for: {}", bookmark.title),
        Err(e) => log::warn!(
            "Chapter feed lookup failed for {}: {}",
            bookmark.title,
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_search_id_takes_first_result() {
        let body = r#"{"result":"ok","response":"collection","data":[
            {"id":"a1b2","type":"manga"},
            {"id":"c3d4","type":"manga"}
        ]}"#;
        assert_eq!(first_search_id(body).unwrap(), Some("a1b2".to_string()));
    }

    #[test]
    fn test_first_search_id_empty_results() {
        let body = r#"{"result":"ok","response":"collection","data":[]}"#;
        assert_eq!(first_search_id(body).unwrap(), None);
    }

    #[test]
    fn test_first_search_id_malformed_payload() {
        assert!(first_search_id("not json").is_err());
    }

    #[test]
    fn test_feed_publish_at_passthrough() {
        // The timestamp is taken verbatim, no transformation
        let body = r#"{"data":[{"id":"ch1","attributes":{"publishAt":"2024-03-09T12:34:56+00:00","chapter":"112"}}]}"#;
        assert_eq!(
            first_feed_publish_at(body).unwrap(),
            Some("2024-03-09T12:34:56+00:00".to_string())
        );
    }

    #[test]
    fn test_feed_publish_at_empty_feed() {
        let body = r#"{"data":[]}"#;
        assert_eq!(first_feed_publish_at(body).unwrap(), None);
    }
}

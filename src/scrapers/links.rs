use crate::models::ListingLink;
use crate::scrapers::http::FetchError;
use crate::scrapers::traits::PageFetcher;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, error, info};
use url::Url;

/// Pull listing links out of a search-results page.
///
/// Keeps anchors whose raw `href` starts with `prefix`, resolves them against
/// `page_url` and drops repeats, preserving first-seen order.
pub fn extract_listing_links(html: &str, page_url: &Url, prefix: &str) -> Vec<ListingLink> {
    let document = Html::parse_document(html);
    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let anchors: Vec<_> = document.select(&anchor_selector).collect();
    info!("Found {} potential links on {}", anchors.len(), page_url);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in anchors {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.starts_with(prefix) {
            continue;
        }

        let full_url = match page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "Skipping unresolvable href");
                continue;
            }
        };

        if seen.insert(full_url.clone()) {
            info!("Found listing: {}", full_url);
            links.push(ListingLink::new(full_url));
        }
    }

    links
}

/// Fetch a results page and return its listing links
pub async fn fetch_listing_links<F: PageFetcher + ?Sized>(
    fetcher: &F,
    page_url: &Url,
    prefix: &str,
) -> Result<Vec<ListingLink>, FetchError> {
    let html = fetcher.fetch(page_url.as_str()).await?;
    Ok(extract_listing_links(&html, page_url, prefix))
}

/// Like [`fetch_listing_links`], but a failed fetch is logged and reads as
/// an empty page.
pub async fn discover_links<F: PageFetcher + ?Sized>(
    fetcher: &F,
    page_url: &Url,
    prefix: &str,
) -> Vec<ListingLink> {
    match fetch_listing_links(fetcher, page_url, prefix).await {
        Ok(links) => links,
        Err(e) => {
            error!(url = %page_url, error = %e, "Error fetching search results page");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::CannedPages;
    use crate::scrapers::types::LISTING_PATH_PREFIX;

    fn page() -> Url {
        Url::parse("https://wunderflats.com/en/furnished-apartments/berlin/1?minRooms=3").unwrap()
    }

    #[test]
    fn keeps_only_listing_anchors() {
        let html = r#"
            <a href="/en/furnished-apartment/loft-mitte/111">Loft</a>
            <a href="/en/furnished-apartments/berlin/2">Next</a>
            <a href="https://elsewhere.com/en/furnished-apartment/x">Absolute</a>
            <a>No href</a>
            <a href="/en/about">About</a>
        "#;

        let links = extract_listing_links(html, &page(), LISTING_PATH_PREFIX);
        let urls: Vec<_> = links.iter().map(|l| l.as_str()).collect();
        assert_eq!(urls, ["https://wunderflats.com/en/furnished-apartment/loft-mitte/111"]);
    }

    #[test]
    fn resolves_relative_href_against_page() {
        let page = Url::parse("https://site/en/furnished-apartments/berlin/1").unwrap();
        let html = r#"<a href="/en/furnished-apartment/x">x</a>"#;

        let links = extract_listing_links(html, &page, LISTING_PATH_PREFIX);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://site/en/furnished-apartment/x");
    }

    #[test]
    fn duplicates_collapse_in_first_seen_order() {
        let html = r#"
            <a href="/en/furnished-apartment/b/2">b</a>
            <a href="/en/furnished-apartment/a/1">a</a>
            <a href="/en/furnished-apartment/b/2"><img alt="b again"></a>
            <a href="/en/furnished-apartment/c/3">c</a>
            <a href="/en/furnished-apartment/a/1">a again</a>
        "#;

        let links = extract_listing_links(html, &page(), LISTING_PATH_PREFIX);
        let paths: Vec<_> = links
            .iter()
            .map(|l| Url::parse(l.as_str()).unwrap().path().to_string())
            .collect();
        assert_eq!(
            paths,
            [
                "/en/furnished-apartment/b/2",
                "/en/furnished-apartment/a/1",
                "/en/furnished-apartment/c/3",
            ]
        );
    }

    #[test]
    fn page_without_listings_is_empty() {
        let html = "<html><body><p>No results</p><a href=\"/en/help\">help</a></body></html>";
        assert!(extract_listing_links(html, &page(), LISTING_PATH_PREFIX).is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_reads_as_empty_page() {
        let fetcher = CannedPages::default();

        assert!(matches!(
            fetch_listing_links(&fetcher, &page(), LISTING_PATH_PREFIX).await,
            Err(FetchError::Status { .. })
        ));
        assert!(discover_links(&fetcher, &page(), LISTING_PATH_PREFIX)
            .await
            .is_empty());
    }
}

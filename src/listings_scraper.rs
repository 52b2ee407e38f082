use std::collections::HashSet;

use log::info;
use scraper::{Html, Selector};

use crate::{requests::RequestClient, text_manipulators::last_path_segment};

/// Scrapes the cinema's listings page for the films it links to.
pub struct ListingsScraper<'a> {
    url: String,
    request_client: &'a RequestClient,
}

impl<'a> ListingsScraper<'a> {
    pub fn new(url: String, request_client: &'a RequestClient) -> Self {
        Self {
            url,
            request_client,
        }
    }

    pub async fn scrape(&self) -> anyhow::Result<Vec<String>> {
        info!("Scraping listings from {}", self.url);
        let html = self.request_client.fetch_url_body(&self.url).await?;
        let movie_ids = extract_movie_ids(&html);
        info!("Found {} movies", movie_ids.len());
        Ok(movie_ids)
    }
}

/// The film id in a `.../movie/<id>` link, `None` for the bare `/movie/`
/// index.
fn movie_id(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once("/movie/")?;
    last_path_segment(rest)
}

/// Ids of every film linked from the page (`.../movie/<id>`), in page order
/// with duplicates dropped.
pub fn extract_movie_ids(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href*=\"/movie/\"]").unwrap();

    let mut seen = HashSet::new();
    document
        .select(&link_selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(movie_id)
        .filter(|id| seen.insert(id.to_string()))
        .map(String::from)
        .collect()
}

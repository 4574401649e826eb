use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::crawler::models::RawListing;
use crate::normalize::PropertyType;
use crate::query::QueryEntities;

pub mod fetcher;
pub mod models;
mod parser;

/// Build candidate search URLs from the parsed entities. Deterministic;
/// callers treat the URLs as opaque.
pub fn discover_sources(cfg: &Config, entities: &QueryEntities) -> Vec<String> {
    if cfg.base_url.is_empty() {
        return Vec::new();
    }

    let type_slug = match &entities.property_type {
        Some(PropertyType::House) => "houses",
        Some(PropertyType::Apartment) => "apartments",
        _ => "properties",
    };

    let location_slug = match &entities.location {
        Some(location) => format!("in-{}", location.to_lowercase().replace(' ', "-")),
        None => "in-ghana".to_string(),
    };

    let mut url = format!("{}/{}-for-rent-{}", cfg.base_url, type_slug, location_slug);
    if let Some(bedrooms) = entities.bedrooms {
        url.push_str(&format!("?bed={bedrooms}"));
    }

    vec![url]
}

/// Fetch one source and parse its listing cards. Errors bubble to the
/// caller, which treats them as that source's failure only.
pub async fn extract(client: &Client, url: &str) -> anyhow::Result<Vec<RawListing>> {
    let html = fetcher::fetch_html(client, url).await?;
    let listings = parser::extract_listings(&html, url);
    info!(url, count = listings.len(), "extracted listing cards");
    Ok(listings)
}

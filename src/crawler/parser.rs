use scraper::{ElementRef, Html, Selector};

use crate::crawler::models::RawListing;

/// Pull listing cards out of a search-results page. Selectors target the
/// meqasa card markup; a card is kept only when it yielded a price or a
/// description, everything else on it is optional.
pub fn extract_listings(html: &str, source_url: &str) -> Vec<RawListing> {
    let doc = Html::parse_document(html);

    let card_sel = Selector::parse(r#"article[class*="mqs-prop-card"]"#).unwrap();
    let fallback_sel = Selector::parse(
        r#"div[class*="mqs-featured-prop-inner-wrap"], div[class*="mqs-prop-card-premium"]"#,
    )
    .unwrap();

    let mut cards: Vec<ElementRef> = doc.select(&card_sel).collect();
    if cards.is_empty() {
        cards = doc.select(&fallback_sel).collect();
    }

    let price_sel = Selector::parse("span.h3").unwrap();
    let address_sel = Selector::parse("address").unwrap();
    let amenity_sel = Selector::parse("div.fur-are span[title]").unwrap();
    let type_sel = Selector::parse("div.prop-type-card").unwrap();
    let title_link_sel = Selector::parse("a.mqs-prop-dt-wrapper, a.prop-title-link").unwrap();

    let mut listings = Vec::new();

    for card in cards {
        let mut listing = RawListing::new(source_url);

        listing.price_raw = first_text(&card, &price_sel);
        listing.location_raw = first_text(&card, &address_sel);
        listing.property_type_raw = first_text(&card, &type_sel);

        for span in card.select(&amenity_sel) {
            let title = span
                .value()
                .attr("title")
                .unwrap_or_default()
                .to_lowercase();
            if title.contains("bedroom") && listing.bedrooms_raw.is_none() {
                listing.bedrooms_raw = text_of(&span);
            } else if title.contains("bathroom") && listing.bathrooms_raw.is_none() {
                listing.bathrooms_raw = text_of(&span);
            }
        }

        if let Some(link) = card.select(&title_link_sel).next() {
            listing.description_raw = link
                .value()
                .attr("title")
                .map(str::to_string)
                .or_else(|| text_of(&link));
            listing.listing_url = link
                .value()
                .attr("href")
                .map(|href| absolutize(source_url, href));
        }

        if listing.price_raw.is_some() || listing.description_raw.is_some() {
            listings.push(listing);
        }
    }

    listings
}

fn first_text(card: &ElementRef, sel: &Selector) -> Option<String> {
    card.select(sel).next().and_then(|el| text_of(&el))
}

fn text_of(el: &ElementRef) -> Option<String> {
    let text = el
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn absolutize(page_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match origin_of(page_url) {
        Some(origin) if href.starts_with('/') => format!("{origin}{href}"),
        Some(origin) => format!("{origin}/{href}"),
        None => href.to_string(),
    }
}

fn origin_of(url: &str) -> Option<String> {
    let scheme_end = url.find("://")? + 3;
    let host_end = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i)
        .unwrap_or(url.len());
    Some(url[..host_end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <article class="mqs-prop-card">
            <a class="mqs-prop-dt-wrapper" href="/listing/123" title="Newly built 2 bedroom apartment">
                <span class="h3">GHS 3,000 / month</span>
            </a>
            <div class="prop-type-card">Apartment</div>
            <address>Osu, Accra</address>
            <div class="fur-are">
                <span title="Bedroom">2</span>
                <span title="Bathroom">1</span>
            </div>
        </article>
        <article class="mqs-prop-card">
            <address>No price, no description</address>
        </article>
        </body></html>
    "#;

    #[test]
    fn extracts_card_fields() {
        let listings = extract_listings(PAGE, "https://www.meqasa.com/apartments-for-rent-in-osu");
        assert_eq!(listings.len(), 1);

        let listing = &listings[0];
        assert_eq!(listing.price_raw.as_deref(), Some("GHS 3,000 / month"));
        assert_eq!(listing.location_raw.as_deref(), Some("Osu, Accra"));
        assert_eq!(listing.bedrooms_raw.as_deref(), Some("2"));
        assert_eq!(listing.bathrooms_raw.as_deref(), Some("1"));
        assert_eq!(listing.property_type_raw.as_deref(), Some("Apartment"));
        assert_eq!(
            listing.description_raw.as_deref(),
            Some("Newly built 2 bedroom apartment")
        );
        assert_eq!(
            listing.listing_url.as_deref(),
            Some("https://www.meqasa.com/listing/123")
        );
        assert_eq!(
            listing.source_url,
            "https://www.meqasa.com/apartments-for-rent-in-osu"
        );
    }

    #[test]
    fn empty_page_yields_no_listings() {
        assert!(extract_listings("<html></html>", "https://example.com").is_empty());
    }

    #[test]
    fn relative_urls_resolve_against_page_origin() {
        assert_eq!(
            absolutize("https://www.meqasa.com/search/page-2", "/listing/9"),
            "https://www.meqasa.com/listing/9"
        );
        assert_eq!(
            absolutize("https://www.meqasa.com", "https://other.site/x"),
            "https://other.site/x"
        );
    }
}

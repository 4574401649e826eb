use crate::analysis::convert;
use crate::normalize::{Currency, NormalizedListing};
use crate::query::QueryEntities;

/// Reduce a filtered record set to a human-readable summary. Degenerate
/// cases get their own wording: zero matches, and matches without a single
/// usable price.
pub fn summarize(
    filtered: &[&NormalizedListing],
    entities: &QueryEntities,
    reference: Currency,
    rate_to_reference: f64,
) -> String {
    if filtered.is_empty() {
        return format!(
            "No listings found matching your criteria: {}.",
            entities.describe()
        );
    }

    let prices: Vec<f64> = filtered
        .iter()
        .filter_map(|listing| convert::to_monthly_reference(listing, reference, rate_to_reference))
        .filter(|price| price.is_finite())
        .collect();

    if prices.is_empty() {
        return format!(
            "Found {} listings for {}, but none had usable pricing information.",
            filtered.len(),
            entities.describe()
        );
    }

    let count = prices.len();
    let sum: f64 = prices.iter().sum();
    let avg = sum / count as f64;
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    format!(
        "Found {} listings. For {}: average monthly rent is {reference} {avg:.2}, \
         ranging from {reference} {min:.2} to {reference} {max:.2} \
         (based on {count} listings with usable pricing).",
        filtered.len(),
        entities.describe(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::models::RawListing;
    use crate::normalize::normalize;
    use crate::query::parse;

    fn priced_listing(price: &str) -> NormalizedListing {
        let mut raw = RawListing::new("https://example.com");
        raw.price_raw = Some(price.to_string());
        raw.location_raw = Some("Osu, Accra".to_string());
        normalize(raw)
    }

    fn unpriced_listing() -> NormalizedListing {
        let mut raw = RawListing::new("https://example.com");
        raw.location_raw = Some("Osu, Accra".to_string());
        normalize(raw)
    }

    #[test]
    fn zero_matches_report() {
        let entities = parse("2 bedroom apartment in Osu");
        let report = summarize(&[], &entities, Currency::Ghs, 14.5);
        assert_eq!(
            report,
            "No listings found matching your criteria: 2-bedroom apartments in Osu."
        );
    }

    #[test]
    fn matches_without_prices_get_distinct_report() {
        let entities = parse("apartment in Osu");
        let listings = [unpriced_listing(), unpriced_listing()];
        let refs: Vec<&NormalizedListing> = listings.iter().collect();
        let report = summarize(&refs, &entities, Currency::Ghs, 14.5);
        assert!(report.contains("Found 2 listings"));
        assert!(report.contains("none had usable pricing"));
        assert_ne!(report, summarize(&[], &entities, Currency::Ghs, 14.5));
    }

    #[test]
    fn computes_count_mean_min_max() {
        let entities = parse("apartment in Osu");
        let listings = [
            priced_listing("GHS 2,000 / month"),
            priced_listing("GHS 3,000 / month"),
            priced_listing("GHS 4,000 / month"),
            unpriced_listing(),
        ];
        let refs: Vec<&NormalizedListing> = listings.iter().collect();
        let report = summarize(&refs, &entities, Currency::Ghs, 14.5);
        assert!(report.contains("Found 4 listings"));
        assert!(report.contains("GHS 3000.00"));
        assert!(report.contains("from GHS 2000.00 to GHS 4000.00"));
        assert!(report.contains("based on 3 listings"));
    }

    #[test]
    fn report_is_order_independent() {
        let entities = parse("apartment in Osu");
        let listings = [
            priced_listing("GHS 2,500"),
            priced_listing("$300 / month"),
            priced_listing("GHS 42,000 / year"),
        ];
        let forward: Vec<&NormalizedListing> = listings.iter().collect();
        let reversed: Vec<&NormalizedListing> = listings.iter().rev().collect();
        let rotated: Vec<&NormalizedListing> =
            [&listings[1], &listings[2], &listings[0]].to_vec();

        let report = summarize(&forward, &entities, Currency::Ghs, 14.5);
        assert_eq!(report, summarize(&reversed, &entities, Currency::Ghs, 14.5));
        assert_eq!(report, summarize(&rotated, &entities, Currency::Ghs, 14.5));
    }
}

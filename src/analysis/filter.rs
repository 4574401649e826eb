use crate::normalize::NormalizedListing;
use crate::query::QueryEntities;

/// True iff the listing satisfies every constrained entity field. Unset
/// entity fields are wildcards; a listing missing a constrained field never
/// matches.
pub fn matches(listing: &NormalizedListing, entities: &QueryEntities) -> bool {
    if let Some(wanted) = &entities.location {
        match &listing.location_primary {
            Some(location) => {
                if !location.to_lowercase().contains(&wanted.to_lowercase()) {
                    return false;
                }
            }
            None => return false,
        }
    }

    if let Some(wanted) = entities.bedrooms {
        if listing.bedrooms_count != Some(wanted) {
            return false;
        }
    }

    if let Some(wanted) = &entities.property_type {
        match &listing.property_type_canonical {
            Some(actual) => {
                if !actual.as_str().eq_ignore_ascii_case(wanted.as_str()) {
                    return false;
                }
            }
            None => return false,
        }
    }

    true
}

/// Order-preserving filter over a dataset.
pub fn apply<'a>(
    dataset: &'a [NormalizedListing],
    entities: &QueryEntities,
) -> Vec<&'a NormalizedListing> {
    dataset
        .iter()
        .filter(|listing| matches(listing, entities))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::models::RawListing;
    use crate::normalize::{normalize, PropertyType};
    use crate::query::{parse, QueryEntities, RequestKind};

    fn listing(location: &str, bedrooms: u32, property_type: &str) -> NormalizedListing {
        let mut raw = RawListing::new("https://example.com");
        raw.location_raw = Some(location.to_string());
        raw.bedrooms_raw = Some(format!("{bedrooms} Beds"));
        raw.property_type_raw = Some(property_type.to_string());
        normalize(raw)
    }

    fn wildcard() -> QueryEntities {
        QueryEntities {
            location: None,
            bedrooms: None,
            property_type: None,
            request: RequestKind::RentCost,
        }
    }

    #[test]
    fn all_unset_entities_match_everything() {
        let entities = wildcard();
        for listing in [
            listing("Osu, Accra", 2, "Apartment"),
            listing("Tema", 4, "House"),
            normalize(RawListing::new("https://example.com")),
        ] {
            assert!(matches(&listing, &entities));
        }
    }

    #[test]
    fn bedroom_count_must_be_exact() {
        let three_bed = listing("Osu", 3, "Apartment");
        let mut entities = wildcard();
        entities.bedrooms = Some(4);
        assert!(!matches(&three_bed, &entities));
        entities.bedrooms = Some(3);
        assert!(matches(&three_bed, &entities));
    }

    #[test]
    fn location_is_case_insensitive_substring() {
        let entities = parse("apartment in east legon");
        assert!(matches(&listing("East Legon, Accra", 2, "Apartment"), &entities));
        assert!(!matches(&listing("Tema", 2, "Apartment"), &entities));
    }

    #[test]
    fn missing_field_fails_when_constrained() {
        let bare = normalize(RawListing::new("https://example.com"));
        let mut entities = wildcard();
        entities.location = Some("Osu".to_string());
        assert!(!matches(&bare, &entities));

        let mut entities = wildcard();
        entities.property_type = Some(PropertyType::Apartment);
        assert!(!matches(&bare, &entities));
    }

    #[test]
    fn property_type_equality() {
        let mut entities = wildcard();
        entities.property_type = Some(PropertyType::House);
        assert!(matches(&listing("Tema", 4, "Detached House"), &entities));
        assert!(!matches(&listing("Tema", 4, "Apartment"), &entities));
    }

    #[test]
    fn apply_preserves_order() {
        let dataset = vec![
            listing("Osu", 2, "Apartment"),
            listing("Osu", 3, "Apartment"),
            listing("Osu", 2, "House"),
            listing("Osu", 2, "Apartment"),
        ];
        let entities = parse("2 bedroom apartment in osu");
        let matched = apply(&dataset, &entities);
        assert_eq!(matched.len(), 2);
        assert!(std::ptr::eq(matched[0], &dataset[0]));
        assert!(std::ptr::eq(matched[1], &dataset[3]));
    }
}

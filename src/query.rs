use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::PropertyType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    RentCost,
}

/// Structured filter criteria extracted from a free-text query. `None`
/// fields impose no constraint downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEntities {
    pub location: Option<String>,
    pub bedrooms: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub request: RequestKind,
}

impl QueryEntities {
    /// A query with no location, no bedroom count and no property-type
    /// signal cannot bound the search space.
    pub fn is_actionable(&self) -> bool {
        self.location.is_some() || self.bedrooms.is_some() || self.property_type.is_some()
    }

    /// Human-readable echo of the criteria, e.g. "2-bedroom apartments in
    /// Osu" or "any-bedroom properties in Ghana".
    pub fn describe(&self) -> String {
        let bedrooms = self
            .bedrooms
            .map(|n| n.to_string())
            .unwrap_or_else(|| "any".to_string());
        let property = self
            .property_type
            .as_ref()
            .map(|p| format!("{p}s"))
            .unwrap_or_else(|| "properties".to_string());
        let location = self.location.as_deref().unwrap_or("Ghana");
        format!("{bedrooms}-bedroom {property} in {location}")
    }
}

const KNOWN_LOCATIONS: &[&str] = &[
    "east legon",
    "cantonments",
    "osu",
    "airport residential area",
    "airport hills",
    "labone",
    "roman ridge",
    "downtown accra",
    "spintex",
    "tema",
    "kumasi",
    "takoradi",
    "tesano",
    "dansoman",
    "adenta",
    "dome",
    "lapaz",
    "circle",
];

static BEDROOMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:bed|bedroom|br)").unwrap());

/// Best-effort keyword extraction of query entities.
pub fn parse(text: &str) -> QueryEntities {
    let lower = text.to_lowercase();

    let location = KNOWN_LOCATIONS
        .iter()
        .find(|loc| lower.contains(*loc))
        .map(|loc| title_case(loc));

    let bedrooms = BEDROOMS
        .captures(&lower)
        .and_then(|caps| caps[1].parse().ok());

    // Townhouse before house, same reason as in the normalizer.
    let property_type = if lower.contains("townhouse") {
        Some(PropertyType::Townhouse)
    } else if lower.contains("house") || lower.contains("bungalow") || lower.contains("villa") {
        Some(PropertyType::House)
    } else if lower.contains("apartment") || lower.contains("flat") {
        Some(PropertyType::Apartment)
    } else {
        None
    };

    let entities = QueryEntities {
        location,
        bedrooms,
        property_type,
        request: RequestKind::RentCost,
    };
    debug!(?entities, query = text, "parsed query entities");
    entities
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::crawler::models::RawListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "GHS")]
    Ghs,
    #[serde(rename = "USD")]
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Ghs => write!(f, "GHS"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Yearly,
    Weekly,
    Daily,
    Unknown,
}

/// Canonical property type. Raw text that matches none of the known kinds
/// keeps its lowercased form in `Other` instead of being forced into the
/// closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Apartment,
    House,
    Townhouse,
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Other(s) => s,
        }
    }
}

impl From<String> for PropertyType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "apartment" => PropertyType::Apartment,
            "house" => PropertyType::House,
            "townhouse" => PropertyType::Townhouse,
            _ => PropertyType::Other(s),
        }
    }
}

impl From<PropertyType> for String {
    fn from(p: PropertyType) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw listing plus the derived, typed fields. The raw record is embedded
/// whole and untouched; normalization only ever adds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    #[serde(flatten)]
    pub raw: RawListing,
    pub price_amount: Option<f64>,
    pub price_currency: Option<Currency>,
    pub price_frequency: Option<Frequency>,
    pub location_primary: Option<String>,
    pub bedrooms_count: Option<u32>,
    pub bathrooms_count: Option<u32>,
    pub property_type_canonical: Option<PropertyType>,
    pub is_processed: bool,
    pub processed_at: DateTime<Utc>,
}

struct ParsedPrice {
    amount: f64,
    currency: Currency,
    frequency: Frequency,
}

static NUMERIC_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,.]*").unwrap());
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Turn one raw listing into a normalized one. Never fails: absent fields
/// stay unset, unparseable fields are logged and stay unset.
pub fn normalize(raw: RawListing) -> NormalizedListing {
    let price = raw.price_raw.as_deref().and_then(parse_price);
    let (price_amount, price_currency, price_frequency) = match price {
        Some(p) => (Some(p.amount), Some(p.currency), Some(p.frequency)),
        None => (None, None, None),
    };

    let location_primary = raw.location_raw.as_deref().map(primary_segment);
    let bedrooms_count = raw.bedrooms_raw.as_deref().and_then(first_count);
    let bathrooms_count = raw.bathrooms_raw.as_deref().and_then(first_count);
    let property_type_canonical = raw
        .property_type_raw
        .as_deref()
        .map(canonical_property_type);

    NormalizedListing {
        raw,
        price_amount,
        price_currency,
        price_frequency,
        location_primary,
        bedrooms_count,
        bathrooms_count,
        property_type_canonical,
        is_processed: true,
        processed_at: Utc::now(),
    }
}

/// Parse amount, currency and frequency out of free-form price text.
///
/// Only the first numeric run is used, so a range like "2,000-3,000" yields
/// the lower bound. That mirrors how the listings portal quotes ranges and
/// is intentional.
fn parse_price(text: &str) -> Option<ParsedPrice> {
    let lower = text.to_lowercase();

    let currency = if lower.contains("usd") || lower.contains('$') {
        Currency::Usd
    } else {
        Currency::Ghs
    };

    let frequency = if lower.contains("year") || lower.contains("yr") || lower.contains("p.a.") {
        Frequency::Yearly
    } else if lower.contains("week") || lower.contains("wk") {
        Frequency::Weekly
    } else if lower.contains("day") || lower.contains("daily") || lower.contains("night") {
        Frequency::Daily
    } else {
        Frequency::Monthly
    };

    let Some(run) = NUMERIC_RUN.find(text) else {
        warn!(price = %text, "no numeric run in price text");
        return None;
    };

    match run.as_str().replace(',', "").parse::<f64>() {
        Ok(amount) => Some(ParsedPrice {
            amount,
            currency,
            frequency,
        }),
        Err(_) => {
            warn!(price = %text, "unparseable price amount");
            None
        }
    }
}

/// Everything before the first comma, trimmed. "East Legon, Accra" keeps
/// only "East Legon".
fn primary_segment(text: &str) -> String {
    text.split(',').next().unwrap_or(text).trim().to_string()
}

fn first_count(text: &str) -> Option<u32> {
    let run = DIGIT_RUN.find(text)?.as_str();
    match run.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(count = %text, "unparseable count");
            None
        }
    }
}

// Townhouse is tested before house: "townhouse" contains "house" and would
// otherwise never canonicalize.
fn canonical_property_type(text: &str) -> PropertyType {
    let lower = text.to_lowercase();
    if lower.contains("apartment") || lower.contains("flat") {
        PropertyType::Apartment
    } else if lower.contains("townhouse") {
        PropertyType::Townhouse
    } else if lower.contains("house")
        || lower.contains("bungalow")
        || lower.contains("villa")
        || lower.contains("detached")
    {
        PropertyType::House
    } else {
        PropertyType::Other(lower)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scraped listing before any cleaning. Text fields carry whatever the
/// page had, absent when the card did not show that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub id: Uuid,
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    pub price_raw: Option<String>,
    pub location_raw: Option<String>,
    pub bedrooms_raw: Option<String>,
    pub bathrooms_raw: Option<String>,
    pub property_type_raw: Option<String>,
    pub description_raw: Option<String>,
    pub listing_url: Option<String>,
}

impl RawListing {
    pub fn new(source_url: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source_url.to_string(),
            scraped_at: Utc::now(),
            price_raw: None,
            location_raw: None,
            bedrooms_raw: None,
            bathrooms_raw: None,
            property_type_raw: None,
            description_raw: None,
            listing_url: None,
        }
    }
}

use crate::normalize::{Currency, Frequency, NormalizedListing};

pub const WEEKS_PER_MONTH: f64 = 365.25 / 12.0 / 7.0;
/// Approximate, not calendar-exact.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// A listing's price as one amount per month in the reference currency.
/// Unset when the listing has no parsed price or an unknown frequency.
/// Currency is converted first, then frequency; both scalings are linear so
/// the order does not change the number, but they stay separate steps.
pub fn to_monthly_reference(
    listing: &NormalizedListing,
    reference: Currency,
    rate_to_reference: f64,
) -> Option<f64> {
    let amount = listing.price_amount?;
    let currency = listing.price_currency?;
    let frequency = listing.price_frequency?;
    let in_reference = convert_currency(amount, currency, reference, rate_to_reference);
    per_month(in_reference, frequency)
}

pub fn convert_currency(amount: f64, from: Currency, to: Currency, rate: f64) -> f64 {
    if from == to {
        amount
    } else {
        amount * rate
    }
}

pub fn per_month(amount: f64, frequency: Frequency) -> Option<f64> {
    match frequency {
        Frequency::Monthly => Some(amount),
        Frequency::Yearly => Some(amount / 12.0),
        Frequency::Weekly => Some(amount * WEEKS_PER_MONTH),
        Frequency::Daily => Some(amount * DAYS_PER_MONTH),
        Frequency::Unknown => None,
    }
}

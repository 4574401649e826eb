use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Root directory for the blob store. Unset means persistence is
    /// unavailable and the run degrades to in-memory only.
    pub data_dir: Option<PathBuf>,
    pub usd_to_ghs_rate: f64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: env::var("RENTALS_BASE_URL")
                .unwrap_or_else(|_| "https://www.meqasa.com".to_string()),
            delay_ms: parse_or("RENTALS_DELAY_MS", 2000)?,
            request_timeout_secs: parse_or("RENTALS_TIMEOUT_SECS", 30)?,
            data_dir: env::var("RENTALS_DATA_DIR").ok().map(PathBuf::from),
            usd_to_ghs_rate: parse_or("USD_TO_GHS_RATE", 14.5)?,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => Ok(value.parse()?),
        Err(_) => Ok(default),
    }
}

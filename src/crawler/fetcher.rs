use std::time::Duration;

use reqwest::Client;

const USER_AGENT: &str = "GhanaRentalAgent/1.0 (contact: rentals@example.com)";

pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .expect("failed to build http client")
}

pub async fn fetch_html(client: &Client, url: &str) -> anyhow::Result<String> {
    let res = client.get(url).send().await?.error_for_status()?;
    Ok(res.text().await?)
}

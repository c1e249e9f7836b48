use reqwest::blocking::Client;
use std::time::Duration;

use crate::{config::RemoteConfig, error::Result};

pub fn http_client(cfg: &RemoteConfig) -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()?;
    Ok(client)
}

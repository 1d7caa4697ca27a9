//! webtender - one signed call against the Webtender API
//!
//! Usage: webtender <METHOD> <PATH> [BODY]
//! Credentials come from WEBTENDER_API_KEY / WEBTENDER_API_SECRET (or `.env`).

use anyhow::{Context, bail};
use reqwest::Method;
use tracing_subscriber::{EnvFilter, fmt};

use webtender_api::{Error, WebtenderClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,webtender_api=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(method), Some(path)) = (args.next(), args.next()) else {
        bail!("usage: webtender <METHOD> <PATH> [BODY]");
    };
    let body = args.next().unwrap_or_default();

    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method {:?}", method))?;

    let client = WebtenderClient::from_env().context("Failed to configure client")?;
    tracing::info!("Using {}", client.base_url());

    let request = client.build_request(method, &path, body.into_bytes())?;
    match client.execute(request).await {
        Ok(resp) => {
            println!("{}", serde_json::to_string_pretty(&resp.data)?);
            Ok(())
        }
        Err(Error::Status { response, message }) => {
            println!("{}", serde_json::to_string_pretty(&response.data)?);
            bail!(message)
        }
        Err(e) => Err(e.into()),
    }
}

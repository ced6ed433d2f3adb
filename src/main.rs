//! Entry point: load config, read a trigger request from stdin, print the encoded body.

use std::io::{Read, Write};

use notif_trigger::config::Config;
use notif_trigger::{encode_request, TriggerRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let request: TriggerRequest =
        serde_json::from_str(&input).map_err(|e| anyhow::anyhow!("request: {}", e))?;

    let body = encode_request(&request, config.encryption_master_key.as_ref())?;
    tracing::info!(bytes = body.len(), "encoded request body");

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&body)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

//! Quantity Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. One request per line on stdin,
//! one response per line on stdout, logs on stderr.
//!
//! Methods:
//! - loadFormatAndParsingMaps: build every quantity type's specs for a system
//! - formatQuantity: render a magnitude for a quantity type
//! - parseIntoQuantityValue: parse text into a magnitude
//! - setOverrideFormats / getOverrideFormats / clearOverrideFormats / clearAllOverrideFormats
//! - findUnitByName: look up a unit
//! - ping
//!
//! Environment:
//! - RUST_LOG: log filter (default `info`)
//! - QUANTITY_USE_IMPERIAL: start with imperial formats active

mod rpc;

use std::env;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use quantity_formatter::QuantityFormatter;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn use_imperial_from_env() -> bool {
    env::var("QUANTITY_USE_IMPERIAL")
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let use_imperial = use_imperial_from_env();
    let formatter = QuantityFormatter::with_basic_units().with_imperial(use_imperial);
    if let Err(e) = formatter.load_format_and_parsing_maps(use_imperial).await {
        error!(error = %e, "failed to preload format and parsing maps");
    }
    info!(version = SERVER_VERSION, use_imperial, "quantity server ready");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("client disconnected");
                break;
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = rpc::handle_line(&formatter, line).await else {
            continue;
        };

        let written = async {
            stdout.write_all(response.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await
        };
        if let Err(e) = written.await {
            error!(error = %e, "error writing response");
            break;
        }
    }

    info!("server shutting down");
}

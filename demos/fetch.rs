//! Fetch a Gopher resource from the command line.
//!
//! Demonstrates:
//! - Building a client with a config file or defaults
//! - `get` on a URI or bare selector
//! - `search` against the configured search server
//! - Reading status and history afterwards
//!
//! Usage:
//!   cargo run --example fetch -- gopher://gopher.floodgap.com/1/
//!   cargo run --example fetch -- --search frogs
//!   cargo run --example fetch -- --config client.json /about --debug

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use gopher_client::{ClientConfig, GopherClient, Result};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_URI: &str = "gopher://gopher.floodgap.com/1/";

// ============================================================================
// Args
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
struct Args {
    debug: bool,
    json: bool,
    config: Option<PathBuf>,
    search: Option<String>,
    uri: Option<String>,
}

impl Args {
    /// Parse command-line arguments.
    fn parse() -> Self {
        let mut args = Self::default();
        let mut iter = std::env::args().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" => args.debug = true,
                "--json" => args.json = true,
                "--config" => args.config = iter.next().map(PathBuf::from),
                "--search" => args.search = iter.next(),
                _ => args.uri = Some(arg),
            }
        }

        args
    }
}

/// Initialize tracing/logging.
fn init_logging(debug: bool) {
    let filter = if debug {
        "gopher_client=debug"
    } else {
        "gopher_client=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // ========================================================================
    // Setup
    // ========================================================================

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    let client = GopherClient::builder().config(config).build()?;

    // ========================================================================
    // Request
    // ========================================================================

    let response = match &args.search {
        Some(text) => {
            println!("[search] {} ? {text}\n", client.search_uri());
            client.search(text).await
        }
        None => {
            let uri = args.uri.as_deref().unwrap_or(DEFAULT_URI);
            println!("[get] {uri}\n");
            client.get(uri).await
        }
    };

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            if client.is_active() {
                let entry = client.reset()?;
                eprintln!("[reset] archived failed request {}", entry.id);
            }
            return Err(e);
        }
    };

    println!("{}", response.text);

    // ========================================================================
    // Summary
    // ========================================================================

    let server = &response.data.server;
    println!(
        "\n[done] {} entries, {} bytes in {} chunks from {}",
        response.entries().len(),
        server.bytes,
        server.chunks,
        server
            .ipaddr
            .map_or_else(|| "unknown".to_string(), |ip| ip.to_string()),
    );

    if args.json {
        println!("{}", client.to_json()?);
    }

    Ok(())
}

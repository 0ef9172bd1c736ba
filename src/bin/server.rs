//! tuplekv Server Binary
//!
//! Starts the TCP server. Ctrl+C terminates the process immediately; there
//! is no drain phase, and worker threads are abandoned mid-flight.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use tuplekv::network::Server;
use tuplekv::Config;

/// tuplekv Server
#[derive(Parser, Debug)]
#[command(name = "tuplekv-server")]
#[command(about = "Minimal distributed tuple store server")]
#[command(version)]
struct Args {
    /// TCP port to bind and listen on
    port: u16,

    /// Store directory
    #[arg(short, long, default_value = "db")]
    store_dir: String,

    /// Pending-connection queue capacity
    #[arg(short, long, default_value = "10")]
    backlog: usize,

    /// Number of worker threads
    #[arg(short, long, default_value = "5")]
    workers: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tuplekv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("tuplekv Server v{}", tuplekv::VERSION);
    tracing::info!("Store directory: {}", args.store_dir);
    tracing::info!("Press Ctrl+C to shut down the server");

    let config = Config::builder()
        .listen_addr(format!("0.0.0.0:{}", args.port))
        .store_dir(&args.store_dir)
        .queue_capacity(args.backlog)
        .worker_threads(args.workers)
        .build();

    let server = match Server::bind(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

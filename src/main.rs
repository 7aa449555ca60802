//! terra-atlas CLI entry point
//!
//! Biodiversity occurrence map explorer - CLI + web app

use terra_atlas::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Catalogs the e-book library in the working directory.
//!
//! Takes no arguments. Reads the library from `Livros/` and writes
//! `catalogo.json` next to it, unless a `shelf.toml` says otherwise.

use shelf_config::Config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = ?err, "Unable to load configuration");
            return ExitCode::FAILURE;
        },
    };

    match shelf_library::build(&config).await {
        Ok(summary) => {
            println!("Found {} books", summary.discovered);
            println!("Catalog generated: {} books", summary.cataloged);
            println!("Written to {}", summary.output.display());
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!(error = ?err, "Build failed; no catalog written");
            ExitCode::FAILURE
        },
    }
}

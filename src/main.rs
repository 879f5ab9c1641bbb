//! # dsctl
//!
//! A command-line client for the console data-structures registry.
//!
//! Each run is stateless and performs exactly one action:
//!
//! ```bash
//! # Print a fresh access token
//! dsctl --token-only
//!
//! # Validate a data structure read from stdin
//! dsctl < schema.json
//!
//! # Promote a validated version to dev, then to prod
//! dsctl --promote-to-dev --message "initial release" < schema.json
//! dsctl --promote-to-prod < schema.json
//! ```
//!
//! Configuration comes from the `CONSOLE_ORGANIZATION_ID`,
//! `CONSOLE_API_KEY` and optional `CONSOLE_HOST` environment variables.
//! Any failure exits with status 1 after logging a diagnostic to stderr.

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use dsctl::{config::Config, input, registry::ConsoleClient, schema, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };
    let client = ConsoleClient::new(config);

    if cli.token_only {
        match client.get_token().await {
            Ok(token) => print!("{token}"),
            Err(e) => {
                error!("{e:#}");
                std::process::exit(1);
            }
        }
        return;
    }

    if !flow(&cli, &client).await {
        std::process::exit(1);
    }
}

/// Runs the one validate-or-promote action selected by the CLI flags.
async fn flow(cli: &Cli, client: &ConsoleClient) -> bool {
    let message = cli.message.as_deref().unwrap_or("No message provided");

    let token = match &cli.token {
        Some(token) => token.clone(),
        None => match client.get_token().await {
            Ok(token) => token,
            Err(e) => {
                error!("{e:#}");
                return false;
            }
        },
    };

    let document = match input::read_document(cli.file.as_deref()) {
        Ok(document) => document,
        Err(e) => {
            error!("{e:#}");
            return false;
        }
    };

    let deployment = match schema::resolve(&document, cli.includes_meta) {
        Ok(deployment) => deployment,
        Err(e) => {
            error!("{e}");
            return false;
        }
    };

    if cli.promote_to_dev || cli.promote_to_prod {
        client
            .promote(
                &deployment,
                &token,
                message,
                cli.promote_to_prod,
                cli.allow_patch,
            )
            .await
    } else {
        client
            .validate(&document, &token, &cli.schema_type, cli.includes_meta)
            .await
    }
}

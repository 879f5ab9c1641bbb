//! # dsctl Library
//!
//! Core library functionality for the dsctl tool: endpoint configuration,
//! self-describing schema resolution, and the console registry client.

use clap::Parser;
use std::path::PathBuf;

pub mod config;
pub mod input;
pub mod registry;
pub mod schema;

/// CLI tool for validating and promoting data structures against the
/// console schema registry
///
/// One invocation performs exactly one action: print an access token,
/// validate a data structure, or promote an already validated version
/// through the deployment pipeline (validated → dev → prod).
#[derive(Parser, Debug)]
#[command(
    name = "dsctl",
    version,
    about = "Validate and promote self-describing data structures against the console registry"
)]
pub struct Cli {
    /// Only get an access token and print it on stdout
    #[arg(long)]
    pub token_only: bool,

    /// Use this token to authenticate
    #[arg(long)]
    pub token: Option<String>,

    /// Read data structure from file (absolute path) instead of stdin
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Document type
    #[arg(long = "type", value_parser = ["event", "entity"], default_value = "event")]
    pub schema_type: String,

    /// The input document already contains the meta field
    #[arg(long)]
    pub includes_meta: bool,

    /// Promote from validated to dev; reads parameters from stdin or --file parameter
    #[arg(long)]
    pub promote_to_dev: bool,

    /// Promote from dev to prod; reads parameters from stdin or --file parameter
    #[arg(long)]
    pub promote_to_prod: bool,

    /// Request patch support in promotion request
    #[arg(long)]
    pub allow_patch: bool,

    /// Message to add to version deployment
    #[arg(long)]
    pub message: Option<String>,
}

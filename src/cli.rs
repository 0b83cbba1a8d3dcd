use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Service catalog: CRUD endpoint for payment service offerings
#[derive(Parser)]
#[command(name = "service-catalog", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the endpoint over HTTP
    Serve {
        /// Port to bind (overrides SERVICE_CATALOG_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Keep services in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },

    /// Run a single invocation event and print the response envelope
    Invoke {
        /// JSON event file; reads stdin when omitted
        #[arg(long)]
        event: Option<PathBuf>,
    },
}

//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// CLI for the product catalog pipeline.
#[derive(Debug, Parser)]
#[command(name = "catalog")]
#[command(version, about = "Product catalog client with caching, retry and offline fallback", long_about = None)]
pub struct Cli {
    /// Remote catalog base URL.
    #[arg(long, env = "CATALOG_URL")]
    pub url: Option<String>,

    /// Treat the remote as unreachable and serve from the local store.
    #[arg(long)]
    pub offline: bool,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print call metrics after the command.
    #[arg(long)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Pretty
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Get a product by ID.
    Get {
        /// Product ID.
        id: String,
    },
    /// List all products.
    List,
    /// Create a new product.
    Create {
        /// Product ID (generated when omitted).
        #[arg(long)]
        id: Option<String>,
        /// Product name.
        #[arg(long)]
        name: String,
        /// Product price.
        #[arg(long)]
        price: f64,
        /// Product description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Update an existing product. Omitted fields keep their current value.
    Update {
        /// Product ID.
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a product by ID.
    Delete {
        /// Product ID.
        id: String,
    },
}

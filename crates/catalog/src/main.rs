//! catalog CLI entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::cli::{Cli, Commands, OutputFormat};
use catalog::output::{format_output, pretty};
use catalog::{
    Config, ConnectivityFlag, InMemoryMetrics, LocalStore, PipelineBuilder, Product,
    ProductRepository,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(url) = &cli.url {
        config.catalog_url = url.clone();
    }

    let local = open_local_store(&config).await?;
    let connectivity = Arc::new(ConnectivityFlag::new(!cli.offline));
    let metrics = Arc::new(InMemoryMetrics::new());

    let mut builder = PipelineBuilder::from_config(&config, local, connectivity)
        .with_context(|| format!("failed to set up remote at {}", config.catalog_url))?;
    if cli.metrics {
        builder = builder.metrics(metrics.clone());
    }
    let repository = builder.build();

    let result = run(&cli, repository.as_ref()).await;

    if cli.metrics {
        let snapshot = metrics.snapshot();
        match cli.format() {
            OutputFormat::Json => eprintln!("{}", format_output(&snapshot, cli.format())),
            OutputFormat::Pretty => eprintln!("{}", pretty::format_metrics(&snapshot)),
        }
    }

    result
}

#[cfg(not(feature = "sqlite"))]
async fn open_local_store(_config: &Config) -> Result<Arc<dyn LocalStore>> {
    Ok(Arc::new(catalog::storage::InMemoryStore::new()))
}

#[cfg(feature = "sqlite")]
async fn open_local_store(config: &Config) -> Result<Arc<dyn LocalStore>> {
    let store = catalog::storage::SqliteStore::open(&config.sqlite_path)
        .await
        .with_context(|| format!("failed to open local store at {}", config.sqlite_path))?;
    Ok(Arc::new(store))
}

async fn run(cli: &Cli, repository: &dyn ProductRepository) -> Result<()> {
    let format = cli.format();

    match &cli.command {
        Commands::Get { id } => {
            let product = repository.get_product(id).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&product, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_product(&product)),
            }
        }
        Commands::List => {
            let products = repository.list_products().await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&products, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_products(&products)),
            }
        }
        Commands::Create {
            id,
            name,
            price,
            description,
        } => {
            let id = id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
            let mut product = Product::new(id, name.clone(), *price);
            product.description = description.clone();

            repository.create_product(&product).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&product, format)),
                OutputFormat::Pretty => {
                    println!("Created:\n{}", pretty::format_product(&product))
                }
            }
        }
        Commands::Update {
            id,
            name,
            price,
            description,
        } => {
            let mut product = repository.get_product(id).await?;
            if let Some(name) = name {
                product.name = name.clone();
            }
            if let Some(price) = price {
                product.price = *price;
            }
            if let Some(description) = description {
                product.description = Some(description.clone());
            }

            repository.update_product(&product).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&product, format)),
                OutputFormat::Pretty => {
                    println!("Updated:\n{}", pretty::format_product(&product))
                }
            }
        }
        Commands::Delete { id } => {
            repository.delete_product(id).await?;
            if format == OutputFormat::Pretty {
                println!("Deleted product {}", id);
            }
        }
    }

    Ok(())
}

mod cli;

use reelshelf::{catalog::CatalogResolver, config, server};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn load_config(
    config_path: Option<&Path>,
    media_root: Option<PathBuf>,
) -> Result<config::Config> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(root) = media_root {
        config.library.root = root;
        config::validate_config(&config)?;
    }
    Ok(config)
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
    media_root: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path, media_root)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Reelshelf server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "reelshelf=trace,reelshelf_common=debug,tower_http=debug"
    } else {
        "reelshelf=debug,tower_http=info"
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_log_filter(cli.verbose).to_string());

    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(
                host,
                port,
                cli.config.as_deref(),
                cli.media_root,
            ))
        }
        Commands::Scan { json } => scan(cli.config.as_deref(), cli.media_root, json),
        Commands::Resolve { path } => resolve(cli.config.as_deref(), cli.media_root, &path),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelshelf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn scan(config_path: Option<&Path>, media_root: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_config(config_path, media_root)?;
    let resolver = CatalogResolver::new(config.library);
    let listing = resolver
        .catalog()
        .with_context(|| format!("Failed to scan {:?}", resolver.library().root))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let reelshelf::catalog::Listing::Catalog { items } = listing else {
        anyhow::bail!("Unexpected listing for flat catalog");
    };

    println!("Media root: {:?}", resolver.library().root);
    println!("{} items", items.len());
    for item in &items {
        println!(
            "  {:<12} {:<32} {}",
            item.category.as_deref().unwrap_or("-"),
            item.name,
            item.path
        );
    }

    Ok(())
}

fn resolve(config_path: Option<&Path>, media_root: Option<PathBuf>, raw: &str) -> Result<()> {
    let config = load_config(config_path, media_root)?;
    let resolver = CatalogResolver::new(config.library);

    let path = resolver.parse(raw)?;
    let listing = resolver
        .resolve(&path)
        .with_context(|| format!("Failed to resolve {}", raw))?;

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Media root: {:?}", config.library.root);
            println!("  Video extensions: {}", config.library.video_extensions.join(", "));
            println!("  Subtitle extension: {}", config.library.subtitle_extension);
            println!("  TV directory: {}", config.library.tv_dir);
            println!("  Variants: {}", config.library.variants.join(", "));
            println!("  Snapshot TTL: {}s", config.library.cache_ttl_secs);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Media root: {:?}", config.library.root);
        }
    }

    Ok(())
}

//! rsrc - asset reference resolver
//!
//! Usage:
//!   rsrc resolve rsrc://env/tex.png      # Resolve references
//!   rsrc identifier ../a.png /show/x.usd # Build a relative-path identifier
//!   rsrc uri resource://my/file.usda     # Decompose a URI
//!   rsrc version AAA_084_0010/geo/v002   # Query the version store

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rsrc_core::config::{ConfigStore, ResolverConfig};
use rsrc_core::context::{
    ContextResolver, EnvSource, MapEnv, ProcessEnv, Resolution, ResolverContext, SHOT_NAME_VAR,
    SHOW_NAME_VAR,
};
use rsrc_core::hooks::DefaultHooks;
use rsrc_core::instrument::Instrumented;
use rsrc_core::store::{HttpCollection, MemoryCollection, ShotCollection, VersionStore};
use rsrc_core::uri;

#[derive(Parser)]
#[command(name = "rsrc")]
#[command(about = "Asset reference resolver", long_about = None)]
struct Cli {
    /// Config file (defaults to $RSRC_CONFIG or the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for every resolver call
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve asset references
    Resolve {
        /// Asset paths (rsrc://..., rsrc:/..., or plain paths)
        #[arg(required = true)]
        assets: Vec<String>,

        /// Show name (overrides SHOW_NAME)
        #[arg(long)]
        show: Option<String>,

        /// Shot name (overrides SHOT_NAME)
        #[arg(long)]
        shot: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Build the identifier for a relative reference
    Identifier {
        /// Asset path as authored
        asset: String,
        /// Resolved path of the referring document
        anchor: String,
    },

    /// Decompose a URI into its components (JSON)
    Uri {
        uri: String,
    },

    /// Resolve a shot/cacheType/version query
    Version {
        /// Query path, e.g. AAA_084_0010/cache_usd_geo/v002
        query: String,

        /// JSON file with shot documents instead of the configured store
        #[arg(long)]
        documents: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "rsrc=debug,rsrc_core=debug,info"
    } else {
        "rsrc=info,rsrc_core=info,warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Resolve {
            assets,
            show,
            shot,
            format,
        } => run_resolve(&config, assets, show, shot, format),
        Commands::Identifier { asset, anchor } => {
            let context = build_context(&config, Arc::new(ProcessEnv));
            println!("{}", context.create_identifier(&asset, &anchor));
            Ok(())
        }
        Commands::Uri { uri: input } => {
            let parsed = uri::parse(&input);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(())
        }
        Commands::Version { query, documents } => run_version(&config, &query, documents),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ResolverConfig> {
    let store = match path {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::discover()?,
    };
    tracing::debug!(path = %store.config_path().display(), "loading config");
    store.load()
}

fn build_context(config: &ResolverConfig, env: Arc<dyn EnvSource>) -> ResolverContext {
    let hooks = DefaultHooks::new(ContextResolver::with_env(config, env));
    ResolverContext::new(Arc::new(Instrumented::new(hooks)))
}

fn run_resolve(
    config: &ResolverConfig,
    assets: Vec<String>,
    show: Option<String>,
    shot: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let env: Arc<dyn EnvSource> = if show.is_some() || shot.is_some() {
        let env = MapEnv::new();
        for (name, value) in [(SHOW_NAME_VAR, show), (SHOT_NAME_VAR, shot)] {
            if let Some(value) = value.or_else(|| ProcessEnv.var(name)) {
                env.set(name, value);
            }
        }
        Arc::new(env)
    } else {
        Arc::new(ProcessEnv)
    };

    let context = build_context(config, env);
    let results: Vec<(String, Resolution)> = assets
        .into_iter()
        .map(|asset| {
            let resolution = context.resolve(&asset);
            (asset, resolution)
        })
        .collect();

    match format {
        OutputFormat::Table => {
            for (asset, resolution) in &results {
                match resolution {
                    Resolution::Resolved(path) => println!("{} -> {}", asset, path),
                    Resolution::NotApplicable => println!("{} -> (nothing to resolve)", asset),
                    Resolution::Unresolved(reason) => {
                        println!("{} -> unresolved: {}", asset, reason)
                    }
                }
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = results
                .iter()
                .map(|(asset, resolution)| {
                    serde_json::json!({
                        "asset": asset,
                        "resolved": resolution.path(),
                        "reason": match resolution {
                            Resolution::Unresolved(reason) => Some(reason.to_string()),
                            _ => None,
                        },
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

fn run_version(config: &ResolverConfig, query: &str, documents: Option<PathBuf>) -> Result<()> {
    let policy = config.store.retry_policy();

    let path = match documents {
        Some(path) => {
            let collection = MemoryCollection::from_file(&path)?;
            lookup(VersionStore::new(collection).with_policy(policy), query)?
        }
        None => {
            let url = config
                .store
                .url
                .as_deref()
                .context("No store url configured; set [store] url or pass --documents")?;
            let collection = HttpCollection::new(url)?;
            lookup(VersionStore::new(collection).with_policy(policy), query)?
        }
    };

    println!("{}", path);
    Ok(())
}

fn lookup<C: ShotCollection>(store: VersionStore<C>, query: &str) -> Result<String> {
    store
        .get_path_blocking(query)
        .with_context(|| format!("Failed to resolve version query '{}'", query))
}

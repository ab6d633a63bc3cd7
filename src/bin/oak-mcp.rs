//! oak-mcp CLI — ontology term tools with MCP server.
//!
//! Usage:
//!   oak-mcp mcp [--transport stdio]
//!   oak-mcp search <text> [--namespace ns] [--limit n]
//!   oak-mcp term <id>

use clap::{Parser, Subcommand};
use oak_mcp::terms::DEFAULT_LIMIT;
use oak_mcp::{BackendRegistry, OakConfig, TermService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "oak-mcp",
    version,
    about = "Ontology term search and lookup over MCP"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the OLS base URL
    #[arg(long, global = true)]
    ols_url: Option<String>,
    /// Override the directory holding local `<namespace>.db` stores
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP (Model Context Protocol) server
    Mcp {
        /// Transport type (currently only stdio)
        #[arg(long, default_value = "stdio")]
        transport: String,
    },
    /// Search for terms and print [id, namespace, label] triples
    Search {
        /// Free text to search for
        text: String,
        /// Ontology namespace, e.g. mondo or hp
        #[arg(long)]
        namespace: Option<String>,
        /// Maximum number of results (0 for no limit)
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Print label, definition and synonyms for a term
    Term {
        /// Term identifier, e.g. MONDO:0005148
        id: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<OakConfig, String> {
    let mut config = OakConfig::load_or_default(cli.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(url) = &cli.ols_url {
        config.ols.base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.local.data_dir = dir.clone();
    }
    Ok(config)
}

fn open_terms(config: OakConfig) -> Result<TermService, String> {
    let registry = BackendRegistry::new(config).map_err(|e| format!("Failed to set up backends: {}", e))?;
    Ok(TermService::new(Arc::new(registry)))
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn run_oneshot(config: OakConfig, command: Commands) -> i32 {
    let terms = match open_terms(config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return 1;
        }
    };
    rt.block_on(async {
        match command {
            Commands::Search {
                text,
                namespace,
                limit,
            } => print_json(&terms.search(&text, namespace.as_deref(), limit).await),
            Commands::Term { id } => print_json(&terms.term_details(&id).await),
            Commands::Mcp { .. } => 1,
        }
    })
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Mcp { transport } => {
            if transport != "stdio" {
                eprintln!("error: only 'stdio' transport is currently supported");
                std::process::exit(1);
            }
            oak_mcp::mcp::run_mcp_server(config)
        }
        command => run_oneshot(config, command),
    };
    std::process::exit(code);
}

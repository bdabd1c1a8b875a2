//! # Deckgen CLI Tool
//!
//! Command-line interface for the Deckgen presentation-generation service.
//! Provides template management, slide and deck generation, result download,
//! and a guided end-to-end demo.

mod cli;

use clap::{Parser, Subcommand};
use deckgen_client::ClientConfig;
use tracing::info;

use cli::{
    handle_config_command, handle_demo_command, handle_download_command, handle_generate_command,
    handle_template_command,
};

#[derive(Parser, Debug)]
#[command(name = "deckgen-cli")]
#[command(about = "Command-line interface for the Deckgen presentation-generation service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ~/.deckgen/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Template management operations
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Presentation generation operations
    #[command(subcommand)]
    Generate(GenerateCommands),

    /// Download a generated presentation
    Download {
        /// Generation ID or signed download URL
        #[arg(value_name = "TARGET")]
        target: String,
        /// Output file path
        #[arg(short, long)]
        output: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// End-to-end demo against a live service
    #[command(subcommand)]
    Demo(DemoCommands),
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// Upload a .pptx template via the signed-URL handshake
    Upload {
        /// Path to the template file
        #[arg(value_name = "FILE")]
        file: String,
        /// Template category (e.g., "reports", "sales")
        #[arg(short, long)]
        category: Option<String>,
        /// Template tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Template description
        #[arg(short, long)]
        description: Option<String>,
        /// Start analysis once the upload confirms
        #[arg(long)]
        analyze: bool,
    },
    /// Analyze a template to discover slides and placeholders
    Analyze {
        /// Template ID returned by upload
        #[arg(value_name = "TEMPLATE_ID")]
        template_id: String,
    },
    /// List templates in your organization
    List,
}

#[derive(Debug, Subcommand)]
pub enum GenerateCommands {
    /// Generate a single slide synchronously
    Slide {
        /// Template slide ID from analysis
        #[arg(long)]
        template_slide_id: String,
        /// Path to a JSON file with the slide data
        #[arg(short, long)]
        data: String,
        /// Save the generated file to this path
        #[arg(short, long)]
        output: Option<String>,
        /// Split oversized tables across slides
        #[arg(long)]
        auto_paginate_tables: bool,
    },
    /// Generate a full deck asynchronously
    Deck {
        /// Path to a JSON file with the deck request
        #[arg(short, long)]
        data: String,
        /// Save the generated file to this path
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved CLI configuration
    Show,
    /// Write a starter configuration file
    Init {
        /// Target path (default: ~/.deckgen/config.toml)
        #[arg(short, long)]
        path: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DemoCommands {
    /// Upload a template, analyze it, generate the sample deck, download the result
    Run {
        /// Path to the .pptx template to demo with
        #[arg(value_name = "TEMPLATE_FILE")]
        template: String,
        /// Output path for the generated deck
        #[arg(short, long, default_value = "demo_output.pptx")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> deckgen_client::ClientResult<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Load configuration: explicit --config file takes priority
    let config = if let Some(config_path) = cli.config {
        ClientConfig::load_from_file(std::path::Path::new(&config_path))?
    } else {
        ClientConfig::load()?
    };

    info!(
        base_url = %config.api.base_url,
        "Deckgen CLI starting"
    );

    // Execute command
    match cli.command {
        Commands::Template(template_cmd) => handle_template_command(template_cmd, &config).await,
        Commands::Generate(generate_cmd) => handle_generate_command(generate_cmd, &config).await,
        Commands::Download { target, output } => {
            handle_download_command(&target, &output, &config).await
        }
        Commands::Config(config_cmd) => handle_config_command(config_cmd, &config).await,
        Commands::Demo(demo_cmd) => handle_demo_command(demo_cmd, &config).await,
    }
}

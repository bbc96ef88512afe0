use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::bridge::run_extraction;
use crate::clipboard::copy_queries_to_clipboard;
use crate::config::ExtractorConfig;
use crate::extractor::extract;
use crate::models::ExtractionResult;
use crate::parsers::parse_conversation_file;
use crate::presenter::{Presenter, UiState, render_page, render_text};
use crate::utils::format_path_with_tilde;

#[derive(Parser)]
#[command(name = "chatgpt-query-extractor")]
#[command(version = "0.1.0")]
#[command(
    about = "Extract messages, search queries and reasoning thoughts from ChatGPT conversations",
    long_about = None
)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a conversation by its page URL and extract it
    Extract {
        /// Conversation page URL, e.g. https://chatgpt.com/c/<id>
        url: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Copy the extracted search queries to the clipboard
        #[arg(long)]
        copy: bool,

        /// Override the backend base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Session cookie value (defaults to CHATGPT_SESSION_TOKEN or the config file)
        #[arg(long)]
        session_token: Option<String>,
    },
    /// Extract from a conversation JSON saved to disk
    Inspect {
        /// Path to a saved `backend-api/conversation/<id>` response
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Extract { url, output, copy, base_url, session_token }) => {
            let mut config = ExtractorConfig::from_env()?;
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if let Some(token) = session_token {
                config.session_token = Some(token);
            }
            extract_url(&url, &config, &output, copy).await?;
        }
        Some(Commands::Inspect { file, output }) => {
            inspect_file(&file, &output)?;
        }
        Some(Commands::Config { init }) => {
            show_config(init)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

async fn extract_url(
    url: &str,
    config: &ExtractorConfig,
    output: &OutputArgs,
    copy: bool,
) -> Result<()> {
    let mut presenter = Presenter::new();
    presenter.run(run_extraction(url, config)).await;

    match presenter.state() {
        UiState::Success(result) => {
            emit(result, output)?;
            if copy {
                copy_queries_to_clipboard(&result.queries)?;
                eprintln!("Copied {} queries to clipboard", result.queries.len());
            }
            Ok(())
        }
        UiState::Error(message) => {
            if output.format == OutputFormat::Html {
                write_output(&render_page(presenter.state()), output.output.as_deref())?;
            }
            bail!("{}", message)
        }
        UiState::Idle | UiState::Extracting => bail!("Extraction did not complete"),
    }
}

fn inspect_file(path: &Path, output: &OutputArgs) -> Result<()> {
    let conversation = parse_conversation_file(path)
        .with_context(|| format!("Failed to read conversation from {}", path.display()))?;

    let mut result = extract(&conversation);
    if result.conversation_id.is_empty()
        && let Some(stem) = path.file_stem()
    {
        result.conversation_id = stem.to_string_lossy().into_owned();
    }

    if output.format == OutputFormat::Text {
        if let Some(created) = conversation.created_at() {
            println!("Created: {}", created.format("%Y-%m-%d %H:%M:%S"));
        }
        if let Some(updated) = conversation.updated_at() {
            println!("Updated: {}", updated.format("%Y-%m-%d %H:%M:%S"));
        }
    }

    info!(nodes = conversation.mapping.len(), "Extracted saved conversation");
    emit(&result, output)
}

fn emit(result: &ExtractionResult, output: &OutputArgs) -> Result<()> {
    let rendered = match output.format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(result)?;
            json.push('\n');
            json
        }
        OutputFormat::Html => render_page(&UiState::Success(result.clone())),
    };
    write_output(&rendered, output.output.as_deref())
}

fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", format_path_with_tilde(path));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn show_config(init: bool) -> Result<()> {
    let config = ExtractorConfig::from_env()?;

    if init {
        if config.config_path.exists() {
            println!("Config already exists: {}", format_path_with_tilde(&config.config_path));
        } else {
            config.save()?;
            println!("Wrote default config: {}", format_path_with_tilde(&config.config_path));
        }
    }

    println!("ChatGPT Query Extractor Configuration");
    println!("=====================================");
    println!("Config file: {}", format_path_with_tilde(&config.config_path));
    println!("Session endpoint: {}", config.session_url());
    println!("Conversation endpoint: {}", config.conversation_url("<id>"));
    println!("Allowed host: {}", config.allowed_host);
    println!("Settle delay: {}ms", config.settle_delay_ms);
    println!(
        "Session token: {}",
        if config.session_token.is_some() { "set" } else { "not set" }
    );

    Ok(())
}

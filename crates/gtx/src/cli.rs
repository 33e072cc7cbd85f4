//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gtx providers [--test]` | Adapter kinds and configured providers, optionally connection-tested |
//! | `gtx translate --target LANG` | Translate one string per line from stdin or `--input` |
//! | `gtx check-config` | Load and validate the configuration |

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use gtx_application::{BatchReport, BatchTranslator, ConnectionCheck, check_connections};
use gtx_application::ports::registry::list_translation_providers;
use gtx_domain::ports::{ProviderRegistry, SharedProviderRegistry};
use gtx_domain::{ContentPolicy, ProviderStatus};
use gtx_infrastructure::config::{AppConfig, ConfigLoader};
use gtx_infrastructure::logging::init_logging;
use gtx_infrastructure::{build_batch_translator, build_registry};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Command line interface for gtx
#[derive(Parser, Debug)]
#[command(name = "gtx")]
#[command(about = "Translate text through prioritized LLM providers with failover")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// gtx subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List adapter kinds and configured providers
    Providers {
        /// Send a one-line test translation to every enabled provider
        #[arg(long)]
        test: bool,
    },

    /// Translate text, one string per line
    Translate {
        /// Target language, e.g. "en" or "English"
        #[arg(short, long)]
        target: String,

        /// Content policy providers must permit
        #[arg(short, long, default_value_t = ContentPolicy::Strict)]
        policy: ContentPolicy,

        /// Input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and validate configuration
    CheckConfig,
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    match cli.command {
        Command::Providers { test } => {
            print!("{}", render_providers(&config)?);
            if test {
                let checks = test_providers(&config).await?;
                println!("\nConnection tests:");
                for check in &checks {
                    println!("  {}", format_connection_check(check));
                }
                let failed = checks
                    .iter()
                    .filter(|c| !c.is_ok() && !c.is_skipped())
                    .count();
                if failed > 0 {
                    bail!("{failed} provider(s) failed the connection test");
                }
            }
        }
        Command::Translate {
            target,
            policy,
            input,
            output,
        } => {
            translate(&config, &target, policy, input.as_deref(), output.as_deref()).await?;
        }
        Command::CheckConfig => {
            println!("{}", describe_config(&config));
        }
    }
    Ok(())
}

/// Load configuration from `path`, or from the default locations
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load().context("Failed to load configuration")
}

/// One-line summary of a valid configuration
pub fn describe_config(config: &AppConfig) -> String {
    let names: Vec<&str> = config.providers.iter().map(|p| p.name.as_str()).collect();
    format!(
        "Configuration OK: {} provider(s) [{}], batch size {}, {} concurrent request(s)",
        names.len(),
        names.join(", "),
        config.routing.batch_size,
        config.routing.max_concurrent_requests
    )
}

/// Adapter kinds plus a table of configured providers
pub fn render_providers(config: &AppConfig) -> Result<String> {
    let registry = build_registry(config)?;
    let mut out = String::new();

    writeln!(out, "Adapters:")?;
    for (kind, description) in list_translation_providers() {
        writeln!(out, "  {kind:<10} {description}")?;
    }

    writeln!(out, "\nProviders:")?;
    let statuses = registry.statuses();
    if statuses.is_empty() {
        writeln!(out, "  (none configured)")?;
    }
    for status in &statuses {
        writeln!(out, "  {}", format_status(status))?;
    }
    Ok(out)
}

/// Single-line rendering of a provider's state
pub fn format_status(status: &ProviderStatus) -> String {
    let mut line = format!(
        "{:<16} kind={:<10} priority={:<4} policy={:<8} health={}",
        status.name, status.kind, status.priority, status.content_policy, status.health
    );
    if let Some(remaining) = status.cooldown_remaining {
        let remaining = std::time::Duration::from_secs(remaining.as_secs());
        let _ = write!(line, " (retry in {})", humantime::format_duration(remaining));
    }
    if status.success_count + status.failure_count + status.rate_limit_count > 0 {
        let _ = write!(
            line,
            " ok={} failed={} rate_limited={}",
            status.success_count, status.failure_count, status.rate_limit_count
        );
    }
    if let (Some(error), Some(at)) = (&status.last_error, status.last_error_at) {
        let _ = write!(
            line,
            " last_error=\"{error}\" at {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    line
}

/// Run the connection test of every configured provider
pub async fn test_providers(config: &AppConfig) -> Result<Vec<ConnectionCheck>> {
    let registry: SharedProviderRegistry = build_registry(config)?;
    Ok(check_connections(&registry).await)
}

/// Single-line rendering of a connection test result
pub fn format_connection_check(check: &ConnectionCheck) -> String {
    let mark = if check.is_ok() {
        "ok"
    } else if check.is_skipped() {
        "--"
    } else {
        "!!"
    };
    format!(
        "[{mark}] {:<16} kind={:<10} {}",
        check.provider,
        check.kind,
        check.summary()
    )
}

/// Translate a document line by line
///
/// Newlines inside translated strings are written as `\n` so the output keeps
/// one line per input line.
pub async fn translate_document(
    translator: &BatchTranslator,
    source: &str,
    target_language: &str,
    content_policy: ContentPolicy,
    cancel: &CancellationToken,
) -> Result<(String, BatchReport)> {
    let lines: Vec<String> = source.lines().map(str::to_string).collect();
    let report = translator
        .translate_with_cancel(&lines, target_language, content_policy, cancel)
        .await
        .context("Translation failed")?;

    let mut output = String::new();
    for text in &report.texts {
        output.push_str(&text.replace("\r\n", "\\n").replace('\n', "\\n"));
        output.push('\n');
    }
    Ok((output, report))
}

async fn translate(
    config: &AppConfig,
    target_language: &str,
    content_policy: ContentPolicy,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let source = match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let translator = build_batch_translator(config)?;
    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling translation");
                cancel.cancel();
            }
        })
    };

    let result =
        translate_document(&translator, &source, target_language, content_policy, &cancel).await;
    interrupt.abort();
    let (translated, report) = result?;

    for status in translator.dispatcher().registry().statuses() {
        info!("{}", format_status(&status));
    }

    match output {
        Some(path) => tokio::fs::write(path, &translated)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(translated.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    if !report.is_complete() {
        bail!(
            "{} of {} line(s) left untranslated in {} failed batch(es)",
            report.untranslated_lines(),
            report.texts.len(),
            report.failures.len()
        );
    }
    Ok(())
}

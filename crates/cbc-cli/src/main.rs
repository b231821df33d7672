//! Consulta CPF Brasil - command-line front-end
//!
//! The `cbc` command formats, validates and looks up CPFs against the mock
//! Cadastro Base do Cidadão registry.
//!
//! ## Commands
//!
//! - `format`: Apply the `XXX.XXX.XXX-XX` mask
//! - `validate`: Check a CPF for shape
//! - `search`: Run a lookup against the mock registry
//! - `status`: Show the CBC-CPF API status panel
//! - `shell`: Interactive session with "Consulta" and "API Status" tabs

mod output;
mod shell;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};

use cbc_core::{
    format_cpf, render_state, ApiStatusPanel, Cpf, MockCitizenSource, MockSourceConfig,
    QueryOutcome, SearchController, SearchError, METRICS,
};
use output::{print_err, print_ok, TerminalNotifier};

#[derive(Parser)]
#[command(name = "cbc")]
#[command(author = "Consulta CPF Brasil Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Consulta CPF Brasil - Cadastro Base do Cidadão lookups", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CPF with the XXX.XXX.XXX-XX mask applied
    Format {
        /// CPF in any format
        input: String,
    },

    /// Check whether a CPF is well formed
    Validate {
        /// CPF in any format
        input: String,
    },

    /// Look up a CPF in the mock registry
    Search {
        /// CPF in any format
        input: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the CBC-CPF API status panel
    Status {
        /// Request a refresh first
        #[arg(long)]
        refresh: bool,

        /// Print the panel as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session
    Shell {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Mock registry overrides; unset flags fall back to the environment.
#[derive(Args, Debug, Clone, Default)]
struct SourceArgs {
    /// Simulated lookup latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Seed for reproducible mock records
    #[arg(long)]
    seed: Option<u64>,
}

impl SourceArgs {
    fn resolve(&self, base: MockSourceConfig) -> MockSourceConfig {
        let mut config = base;
        if let Some(ms) = self.latency_ms {
            config = config.with_latency(Duration::from_millis(ms));
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    fn config(&self) -> Result<MockSourceConfig> {
        let base = MockSourceConfig::from_env().context("Invalid mock source configuration")?;
        Ok(self.resolve(base))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    cbc_core::init_tracing(cli.log_json, level);

    let result = match cli.command {
        Commands::Format { input } => cmd_format(&input),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Search {
            input,
            source,
            json,
        } => cmd_search(&input, source.config()?, json).await,
        Commands::Status { refresh, json } => cmd_status(refresh, json),
        Commands::Shell { source } => cmd_shell(source.config()?).await,
    };

    METRICS.flush();
    result
}

fn cmd_format(input: &str) -> Result<()> {
    println!("{}", format_cpf(input));
    Ok(())
}

fn cmd_validate(input: &str) -> Result<()> {
    match Cpf::parse(input) {
        Ok(cpf) => {
            println!("✔ CPF válido: {}", cpf);
            Ok(())
        }
        Err(e) => {
            cbc_core::obs::emit_validation_failed(&e);
            METRICS.inc_validation_failures();
            println!("✘ CPF inválido: {}", format_cpf(input));
            bail!("invalid CPF: {}", e)
        }
    }
}

#[derive(Serialize)]
struct SearchOutput {
    cpf: String,
    #[serde(flatten)]
    outcome: QueryOutcome,
}

async fn cmd_search(input: &str, config: MockSourceConfig, json: bool) -> Result<()> {
    info!(
        latency_ms = config.latency.as_millis() as u64,
        seeded = config.seed.is_some(),
        "Starting mock lookup"
    );

    let controller = SearchController::new(
        Arc::new(MockCitizenSource::new(config)),
        Arc::new(TerminalNotifier),
    );

    let outcome = match controller.search(input).await {
        Ok(outcome) => outcome,
        Err(SearchError::InvalidCpf(e)) => {
            if json {
                print_err::<()>(None, "CPF inválido")?;
            }
            bail!("invalid CPF: {}", e);
        }
        Err(e) => return Err(e.into()),
    };

    let found = outcome.is_found();
    if json {
        let message = outcome.error_message().map(str::to_string);
        let data = SearchOutput {
            cpf: format_cpf(input),
            outcome,
        };
        match message {
            None => print_ok(data)?,
            Some(msg) => print_err(Some(data), &msg)?,
        }
    } else {
        print!("{}", render_state(&controller.snapshot().await));
    }

    if !found {
        bail!("lookup failed");
    }
    Ok(())
}

fn cmd_status(refresh: bool, json: bool) -> Result<()> {
    let panel = ApiStatusPanel;
    if refresh {
        panel.refresh();
    }
    if json {
        print_ok(panel.report())
    } else {
        print!("{}", panel.render());
        Ok(())
    }
}

async fn cmd_shell(config: MockSourceConfig) -> Result<()> {
    info!(latency_ms = config.latency.as_millis() as u64, "Starting shell");
    let shell = shell::Shell::new(config, Arc::new(TerminalNotifier));
    shell::run(shell).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_search_flags() {
        let cli = Cli::try_parse_from([
            "cbc",
            "-v",
            "search",
            "111.444.777-35",
            "--latency-ms",
            "10",
            "--seed",
            "7",
            "--json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Search {
                input,
                source,
                json,
            } => {
                assert_eq!(input, "111.444.777-35");
                assert_eq!(source.latency_ms, Some(10));
                assert_eq!(source.seed, Some(7));
                assert!(json);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_source_args_override_base() {
        let args = SourceArgs {
            latency_ms: Some(5),
            seed: None,
        };
        let base = MockSourceConfig::default().with_seed(9);
        let config = args.resolve(base);
        assert_eq!(config.latency, Duration::from_millis(5));
        assert_eq!(config.seed, Some(9));

        let untouched = SourceArgs::default().resolve(MockSourceConfig::default());
        assert_eq!(untouched, MockSourceConfig::default());
    }

    #[test]
    fn test_cmd_validate() {
        assert!(cmd_validate("111.444.777-35").is_ok());
        assert!(cmd_validate("11111111111").is_err());
        assert!(cmd_validate("123").is_err());
    }

    #[test]
    fn test_cmd_status_modes() {
        assert!(cmd_status(false, false).is_ok());
        assert!(cmd_status(true, true).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cmd_search_exit_status() {
        let config = MockSourceConfig::default().with_seed(1);
        assert!(cmd_search("11144477735", config.clone(), false).await.is_ok());
        assert!(cmd_search("11144477730", config.clone(), true).await.is_err());
        assert!(cmd_search("00000000000", config, false).await.is_err());
    }
}

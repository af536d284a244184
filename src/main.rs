//! suitegen CLI - generate test suite scaffolding
//!
//! Inline:
//!   suitegen --framework pytest --name Calculator --methods add subtract
//!
//! From a spec file (JSON or YAML, one spec or an array):
//!   suitegen --spec specs.yaml --output tests/

mod cli;

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generate pytest, unittest, Jest and JUnit test suites from specifications
#[derive(Parser, Debug)]
#[command(name = "suitegen", version, about, long_about = None)]
pub struct Cli {
    /// Target framework: pytest, unittest, jest or junit
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Subject under test (class or module name)
    #[arg(short, long, visible_alias = "class-name")]
    pub name: Option<String>,

    /// Members to test, space or comma separated
    #[arg(short, long, num_args = 1..)]
    pub methods: Vec<String>,

    /// Spec file (JSON or YAML) instead of --name/--methods
    #[arg(short, long, conflicts_with_all = ["name", "methods"])]
    pub spec: Option<PathBuf>,

    /// Output directory, or file for a single suite (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name to use instead of the derived one (single suite only)
    #[arg(long)]
    pub filename: Option<String>,

    /// Render without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Validate the specs and exit without rendering
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Emit the fixture / setup-teardown scaffold
    #[arg(long)]
    pub fixtures: bool,

    /// Import the framework's mocking library
    #[arg(long)]
    pub mocks: bool,

    /// Emit a parametrized sample test
    #[arg(long)]
    pub parametrize: bool,

    /// Test type for inline specs: unit, integration, e2e or api
    #[arg(long)]
    pub test_type: Option<String>,

    /// Import path of the subject for inline specs
    #[arg(long)]
    pub module: Option<String>,

    /// Stamp the generation time into the header
    #[arg(long)]
    pub timestamp: bool,

    /// Emit one suite per spec entry instead of merging same-subject entries
    #[arg(long)]
    pub separate: bool,

    /// Emit pytest tests as module-level functions
    #[arg(long)]
    pub pytest_functions: bool,

    /// Config file (defaults to ./.suitegen.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List supported frameworks and exit
    #[arg(long)]
    pub list_frameworks: bool,

    /// Print a JSON schema (spec or config) and exit
    #[arg(long, value_name = "NAME", num_args = 0..=1, default_missing_value = "spec")]
    pub print_schema: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = if cli.list_frameworks {
        cli::cmd_list_frameworks()
    } else if let Some(name) = cli.print_schema.as_deref() {
        cli::cmd_schema(name)
    } else {
        cli::cmd_generate(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to stderr; `-v` counts pick the level unless `RUST_LOG` is set
fn init_tracing(verbose: u8) {
    if verbose == 0 && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,suitegen=info".to_string(),
            2 => "info,suitegen=debug".to_string(),
            _ => "debug,suitegen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_methods_accept_many_values() {
        let cli = Cli::try_parse_from([
            "suitegen", "-f", "jest", "--class-name", "Calc", "--methods", "add", "sub,mul",
        ])
        .unwrap();
        assert_eq!(cli.name.as_deref(), Some("Calc"));
        assert_eq!(cli.methods, vec!["add", "sub,mul"]);
    }

    #[test]
    fn test_spec_conflicts_with_inline() {
        let err = Cli::try_parse_from(["suitegen", "--spec", "a.json", "--name", "Calc"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_print_schema_default() {
        let cli = Cli::try_parse_from(["suitegen", "--print-schema"]).unwrap();
        assert_eq!(cli.print_schema.as_deref(), Some("spec"));
        let cli = Cli::try_parse_from(["suitegen", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use effcheck_checker::{Checker, CheckerConfig, TypeEnv, DEFAULT_MAX_DEPTH};
use effcheck_cli::{is_illegal_effect, load_env, load_term, parse_ty, Report};
use effcheck_types::{instantiation, unify};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "effcheck")]
#[command(about = "Type-and-effect annotation oracle for generated test programs")]
struct Cli {
    /// Log every checker judgment to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check an annotated term and report its type and effect
    Check {
        /// Path to the term, as JSON
        file: PathBuf,

        /// JSON object mapping free variable names to types
        #[arg(long)]
        env: Option<PathBuf>,

        /// Reject terms nested deeper than this
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,

        /// Accept `match` nodes with no cases
        #[arg(long)]
        allow_empty_match: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Unify two types and print the solution
    Unify {
        /// Type as inline JSON or a path to a JSON file
        left: String,
        right: String,
    },

    /// Decide whether SPECIFIC is an instance of GENERAL
    Compat { general: String, specific: String },

    /// Pretty-print a term with its size and depth
    Show {
        /// Path to the term, as JSON
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            file,
            env,
            max_depth,
            allow_empty_match,
            format,
        } => {
            let config = CheckerConfig {
                max_depth,
                reject_empty_match: !allow_empty_match,
            };
            cmd_check(&file, env.as_deref(), config, format)
        }
        Commands::Unify { left, right } => cmd_unify(&left, &right),
        Commands::Compat { general, specific } => cmd_compat(&general, &specific),
        Commands::Show { file } => cmd_show(&file),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(
    file: &Path,
    env: Option<&Path>,
    config: CheckerConfig,
    format: Format,
) -> Result<ExitCode> {
    let term = match load_term(file) {
        Ok(term) => term,
        Err(e) if is_illegal_effect(&e) => {
            let report = Report::input_invariant(format!("{e:#}"));
            return emit(&report, format);
        }
        Err(e) => return Err(e),
    };
    let env = match env {
        Some(path) => load_env(path)?,
        None => TypeEnv::new(),
    };
    debug!(size = term.size(), depth = term.depth(), bindings = env.len(), "checking term");

    let result = Checker::with_config(config).check(&env, &term);
    let report = Report::from_check(&term, &result)?;
    emit(&report, format)
}

fn emit(report: &Report, format: Format) -> Result<ExitCode> {
    match format {
        Format::Pretty => println!("{report}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(ExitCode::from(report.exit_code()))
}

fn cmd_unify(left: &str, right: &str) -> Result<ExitCode> {
    let (a, b) = (parse_ty(left)?, parse_ty(right)?);
    match unify(&a, &b) {
        Ok(s) => {
            println!("solved: {s}");
            println!("  {}", s.apply(&a));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("no solution: {e}");
            Ok(ExitCode::from(1))
        }
    }
}

fn cmd_compat(general: &str, specific: &str) -> Result<ExitCode> {
    let (g, s) = (parse_ty(general)?, parse_ty(specific)?);
    match instantiation(&g, &s) {
        Some(witness) => {
            println!("compatible: {s} is an instance of {g} via {witness}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("incompatible: {s} is not an instance of {g}");
            Ok(ExitCode::from(1))
        }
    }
}

fn cmd_show(file: &Path) -> Result<ExitCode> {
    let term = load_term(file)?;
    println!("{term}");
    println!(
        "  type: {}  effect: {}  size: {}  depth: {}",
        term.ty(),
        term.eff(),
        term.size(),
        term.depth()
    );
    Ok(ExitCode::SUCCESS)
}

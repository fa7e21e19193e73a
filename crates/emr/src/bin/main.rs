//! emr command-line interface

use clap::{Parser, Subcommand};
use emr::cli::{evaluate, locales, names, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// EMR concept naming and clinical rule tool
#[derive(Parser)]
#[command(name = "emr")]
#[command(author, version, about = "EMR concept naming and clinical rule tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    /// Locale settings file (JSON)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show best, preferred and short names of every concept in a dataset
    Names {
        /// Dataset file (JSON)
        dataset: PathBuf,

        /// Locale to resolve names in (default: settings default)
        #[arg(short, long)]
        locale: Option<String>,

        /// Show the best name for every available locale instead
        #[arg(short, long)]
        all_locales: bool,
    },

    /// Resolve and evaluate a rule element for one patient
    Evaluate {
        /// Dataset file (JSON)
        dataset: PathBuf,

        /// Concept reference, e.g. "{HIV test from obs}"
        #[arg(short, long)]
        rule: String,

        /// Patient id
        #[arg(short, long)]
        patient: i64,

        /// Comparison operator
        #[arg(long = "operator")]
        operator: Option<String>,

        /// Right-hand side literal (true, false, a number or text)
        #[arg(short, long)]
        answer: Option<String>,

        /// Observation qualifier (exist, last, first)
        #[arg(short, long, default_value = "last")]
        qualifier: String,

        /// Duration carried with the element
        #[arg(short, long, default_value = "")]
        duration: String,

        /// Locale for concept lookup and display
        #[arg(short, long)]
        locale: Option<String>,

        /// Conclude value reported with the result
        #[arg(long)]
        conclude: Option<bool>,

        /// User variables (name=value)
        #[arg(short = 'u', long = "var")]
        user_vars: Vec<String>,
    },

    /// List the locales the installation offers
    Locales {
        /// Message bundle files to derive locales from
        bundle_files: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Fails only when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Names {
            dataset,
            locale,
            all_locales,
        } => {
            let config = names::NamesConfig {
                dataset,
                locale,
                all_locales,
                settings: cli.settings.clone(),
                verbose: cli.verbose,
                output_format: cli.format.clone(),
                output_file: cli.output.clone(),
            };
            names::names(config)
        }

        Commands::Evaluate {
            dataset,
            rule,
            patient,
            operator,
            answer,
            qualifier,
            duration,
            locale,
            conclude,
            user_vars,
        } => {
            let config = evaluate::EvaluateConfig {
                dataset,
                rule,
                patient,
                operator,
                answer,
                qualifier,
                duration,
                locale,
                conclude,
                user_vars,
                settings: cli.settings.clone(),
                verbose: cli.verbose,
                output_format: cli.format.clone(),
                output_file: cli.output.clone(),
            };
            evaluate::evaluate(config)
        }

        Commands::Locales { bundle_files } => {
            let config = locales::LocalesConfig {
                bundle_files,
                settings: cli.settings.clone(),
                verbose: cli.verbose,
                output_format: cli.format.clone(),
                output_file: cli.output.clone(),
            };
            locales::locales(config)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

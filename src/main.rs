//! dpt: generate and validate SPDX 3.0.1 data package documents
//!
//! Reads `<hash> <filename>` lines and describes them as files of a dataset
//! in an SPDX 3.0.1 JSON-LD bill of materials.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use datapackage_tools::{
    cli,
    config::{self, AppConfig, GenerateConfig, GenerateDefaults, LogConfig, ValidateConfig,
        ValidateDefaults},
    model::{ConfidentialityLevel, DatasetType},
    pipeline::exit_codes,
    validation::ReportFormat,
};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dpt")]
#[command(version)]
#[command(about = "Generate and validate SPDX 3.0.1 data package documents", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (also when the output pipe is closed early)
    1  Validation found errors
    2  Validation found warnings (with --fail-on-warning)
    3  Error occurred

EXAMPLES:
    # Describe a dataset from sha256sum output
    sha256sum data/* | dpt generate -a me -p http://example.org/ --bom-name b --dataset-name d

    # Read compressed hash lists and write to a file
    dpt generate -a me -p http://example.org/ --bom-name b --dataset-name d \\
        -O bom.jsonld hashes.txt.gz

    # Check a generated document in CI
    dpt validate --fail-on-warning bom.jsonld")]
struct Cli {
    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `generate` subcommand
#[derive(Parser)]
struct GenerateArgs {
    /// Creating agent, recorded as a Person
    #[arg(short, long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    agent: String,

    /// IRI prefix for every generated id, e.g. http://example.org/
    #[arg(short, long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    prefix: String,

    /// Name of the bill of materials
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    bom_name: String,

    /// Name of the dataset
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    dataset_name: String,

    /// Dataset type [default: other]
    #[arg(long, value_enum)]
    dataset_type: Option<DatasetType>,

    /// Confidentiality level [default: green]
    #[arg(long, value_enum)]
    confidentiality: Option<ConfidentialityLevel>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Write single-line JSON instead of pretty-printed output
    #[arg(long)]
    compact: bool,

    /// Input files of `<hash> <filename>` lines (stdin if none, or `-`)
    inputs: Vec<PathBuf>,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Treat digest length and file kind mismatches as errors
    #[arg(long)]
    strict: bool,

    /// Report format [default: text]
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Exit with code 2 if warnings are found
    #[arg(long)]
    fail_on_warning: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// JSON-LD documents to validate (stdin if none, or `-`)
    inputs: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a data package document from `<hash> <filename>` lines
    Generate(GenerateArgs),

    /// Validate data package documents
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .dpt.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Resolve the log level once, before anything can log
    init_logging(LogConfig::new(cli.verbose));

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn init_logging(log: LogConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log.level().to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config.as_deref();

    // Dispatch to command handlers
    match cli.command {
        Commands::Generate(args) => {
            let overrides = AppConfig {
                generate: GenerateDefaults {
                    dataset_type: args.dataset_type,
                    confidentiality_level: args.confidentiality,
                    compact: args.compact,
                },
                ..AppConfig::default()
            };
            let (merged, _) = AppConfig::from_file_with_overrides(config_path, &overrides);
            let config = GenerateConfig {
                agent: args.agent,
                prefix: args.prefix,
                bom_name: args.bom_name,
                dataset_name: args.dataset_name,
                dataset_type: merged.generate.dataset_type_or_default(),
                confidentiality_level: merged.generate.confidentiality_level_or_default(),
                inputs: args.inputs,
                output_file: args.output_file,
                compact: merged.generate.compact,
            };
            cli::run_generate(config)
        }

        Commands::Validate(args) => {
            let overrides = AppConfig {
                validate: ValidateDefaults {
                    strict: args.strict,
                    fail_on_warning: args.fail_on_warning,
                    format: args.format,
                },
                ..AppConfig::default()
            };
            let (merged, _) = AppConfig::from_file_with_overrides(config_path, &overrides);
            let config = ValidateConfig {
                inputs: args.inputs,
                strict: merged.validate.strict,
                fail_on_warning: merged.validate.fail_on_warning,
                format: merged.validate.format.unwrap_or_default(),
                output_file: args.output_file,
            };
            cli::run_validate(config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "dpt", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to render schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    writeln!(io::stdout(), "{schema}")?;
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config(action, config_path),
    }
}

fn run_config(action: ConfigAction, config_path: Option<&Path>) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(config_path);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            write!(io::stdout(), "{yaml}")?;
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for dir in config::search_dirs() {
                eprintln!("  {}", dir.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in config::CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(config_path) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".dpt.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "dpt",
            "--verbose",
            "generate",
            "-a",
            "me",
            "-p",
            "http://example.org/",
            "--bom-name",
            "b",
            "--dataset-name",
            "d",
            "--dataset-type",
            "text",
            "a.txt",
            "-",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.agent, "me");
                assert_eq!(args.dataset_type, Some(DatasetType::Text));
                assert_eq!(args.confidentiality, None);
                assert_eq!(args.inputs, vec![PathBuf::from("a.txt"), PathBuf::from("-")]);
            }
            _ => panic!("Expected generate"),
        }
    }

    #[test]
    fn test_dataset_type_spelled_as_in_config() {
        let cli = Cli::try_parse_from([
            "dpt",
            "generate",
            "-a",
            "me",
            "-p",
            "http://example.org/",
            "--bom-name",
            "b",
            "--dataset-name",
            "d",
            "--dataset-type",
            "noAssertion",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.dataset_type, Some(DatasetType::NoAssertion));
            }
            _ => panic!("Expected generate"),
        }
    }

    #[test]
    fn test_generate_requires_names() {
        assert!(Cli::try_parse_from(["dpt", "generate", "-a", "me"]).is_err());
        assert!(Cli::try_parse_from([
            "dpt",
            "generate",
            "-a",
            "",
            "-p",
            "http://example.org/",
            "--bom-name",
            "b",
            "--dataset-name",
            "d",
        ])
        .is_err());
    }
}

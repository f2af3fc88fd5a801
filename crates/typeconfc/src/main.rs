//! The typeconf compiler CLI.
//!
//! Provides the `typeconfc` command with the following subcommands:
//!
//! - `typeconfc compile <file>` - Compile a template to typed-model JSON
//! - `typeconfc check <file>` - Parse and type a template, report warnings
//!
//! Options:
//! - `--assume-all-required` - Ignore optionality hints; every field required
//! - `--output` - Write the JSON model to a file instead of stdout
//! - `--compact` - Emit compact JSON instead of pretty-printed

use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};

use typeconf_model::render::{line_range, render_error, render_warning};
use typeconf_model::{ModelBuildResult, ModelBuilder};

#[derive(Parser)]
#[command(name = "typeconfc", version, about = "Typed configuration schema compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a configuration template into typed-model JSON
    Compile {
        /// Path to the template (.conf)
        file: PathBuf,

        /// Treat every field as required, ignoring optionality hints
        #[arg(long = "assume-all-required")]
        assume_all_required: bool,

        /// Output path for the JSON model (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Parse and type a template, reporting warnings without emitting output
    Check {
        /// Path to the template (.conf)
        file: PathBuf,

        /// Treat every field as required, ignoring optionality hints
        #[arg(long = "assume-all-required")]
        assume_all_required: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            file,
            assume_all_required,
            output,
            compact,
        } => compile(&file, assume_all_required, output.as_deref(), compact),
        Commands::Check {
            file,
            assume_all_required,
        } => check(&file, assume_all_required),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Execute the compile pipeline: read -> parse -> build -> emit JSON.
fn compile(
    file: &Path,
    assume_all_required: bool,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), String> {
    let (source, result) = run_build(file, assume_all_required)?;

    for warning in &result.warnings {
        eprint!("{}", render_warning(warning, &source));
    }

    let json = if compact {
        serde_json::to_string(&result.root)
    } else {
        serde_json::to_string_pretty(&result.root)
    }
    .map_err(|e| format!("failed to serialize model: {}", e))?;

    match output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .map_err(|e| format!("failed to write '{}': {}", path.display(), e))?;
            eprintln!("  Model: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Parse and type a template without emitting the model.
fn check(file: &Path, assume_all_required: bool) -> Result<(), String> {
    let (source, result) = run_build(file, assume_all_required)?;

    for warning in &result.warnings {
        eprint!("{}", render_warning(warning, &source));
    }

    eprintln!(
        "  OK: {} top-level member(s), {} warning(s)",
        result.root.len(),
        result.warnings.len()
    );
    Ok(())
}

/// Shared front half of both subcommands: read the file, parse it,
/// build the model, rendering diagnostics along the way.
fn run_build(file: &Path, assume_all_required: bool) -> Result<(String, ModelBuildResult), String> {
    let source = std::fs::read_to_string(file)
        .map_err(|e| format!("failed to read '{}': {}", file.display(), e))?;

    let parse = typeconf_hocon::parse(&source);
    if !parse.ok() {
        report_parse_errors(&source, parse.errors());
        return Err("parsing failed due to errors above".to_string());
    }

    let result = ModelBuilder::new()
        .assume_all_required(assume_all_required)
        .build(parse.root())
        .map_err(|e| {
            eprint!("{}", render_error(&e, &source));
            "compilation failed due to errors above".to_string()
        })?;

    Ok((source, result))
}

/// Render parse errors with ariadne, labeled at the offending line.
fn report_parse_errors(source: &str, errors: &[typeconf_hocon::ParseError]) {
    for error in errors {
        let range = line_range(source, error.line);
        let range = if range.is_empty() {
            0..source.len().min(1)
        } else {
            range
        };
        let report = Report::build(ReportKind::Error, range.clone())
            .with_message(error.kind.to_string())
            .with_config(Config::default().with_color(false))
            .with_label(
                Label::new(range)
                    .with_message("syntax error here")
                    .with_color(Color::Red),
            )
            .finish();
        let mut buf = Vec::new();
        if report.write(Source::from(source), &mut buf).is_ok() {
            eprint!("{}", String::from_utf8_lossy(&buf));
        }
    }
}

//! Command-line interface for `confdiff`.
//!
//! Reads two JSON or YAML files, picks a parser per file from its extension
//! (or `--input-format`), and prints their structural diff in the requested
//! format.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use confdiff_core::{DiffOptions, InputFormat, KeyOrder, Mapping, OutputFormat, RenderConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV: &str = "CONFDIFF_LOG";
const EXIT_DIFFERENT: i32 = 1;
const EXIT_FAILURE: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "confdiff",
    version,
    about = "Compares two configuration files and shows a difference.",
    after_help = "Use '-' as a path to read that document from STDIN (requires --input-format).\n\
                  Set CONFDIFF_LOG (e.g. CONFDIFF_LOG=debug) to control log output on STDERR."
)]
struct Cli {
    /// Output format: `tree`, `plain`, or `json`.
    #[arg(short = 'f', long = "format", default_value = "tree")]
    format: OutputFormat,

    /// Parse both inputs as FORMAT instead of detecting it from extensions.
    #[arg(long = "input-format", value_name = "FORMAT")]
    input_format: Option<InputFormat>,

    /// Sort keys alphabetically instead of keeping document order.
    #[arg(long = "sort-keys")]
    sort_keys: bool,

    /// Spaces per nesting level in tree output.
    #[arg(long = "indent", default_value_t = 4)]
    indent: usize,

    /// Pretty-print JSON output.
    #[arg(long = "pretty")]
    pretty: bool,

    /// Exit with status 1 when the documents differ.
    #[arg(long = "exit-code")]
    exit_code: bool,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log debug information to STDERR.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// The original document.
    before: PathBuf,

    /// The updated document.
    after: PathBuf,
}

fn main() {
    match try_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "confdiff: {err:#}");
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn try_main() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<i32> {
    let before_source = InputSource::from_arg(&cli.before);
    let after_source = InputSource::from_arg(&cli.after);
    if matches!((&before_source, &after_source), (InputSource::Stdin, InputSource::Stdin)) {
        bail!("only one document can be read from STDIN");
    }

    let before = read_document(&before_source, cli.input_format)?;
    let after = read_document(&after_source, cli.input_format)?;

    let options = build_options(cli);
    let config = build_config(cli)?;

    let diff = before.diff(&after, &options);
    tracing::info!(nodes = diff.len(), changed = diff.has_changes(), "diff computed");
    let rendered = diff.render(cli.format, &config).context("failed to render diff")?;

    if let Some(path) = &cli.output {
        fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}")?;
        stdout.flush()?;
    }

    Ok(if cli.exit_code && diff.has_changes() { EXIT_DIFFERENT } else { 0 })
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == OsStr::new("-") {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "STDIN".to_owned(),
        }
    }
}

fn read_document(source: &InputSource, forced: Option<InputFormat>) -> Result<Mapping> {
    let format = match (forced, source) {
        (Some(format), _) => format,
        (None, InputSource::File(path)) => InputFormat::from_path(path)
            .with_context(|| format!("cannot pick a parser for {}", path.display()))?,
        (None, InputSource::Stdin) => bail!("reading from STDIN requires --input-format"),
    };

    let text = match source {
        InputSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
            buffer
        }
    };

    tracing::debug!(source = %source.describe(), %format, "loading document");
    Mapping::parse(&text, format).with_context(|| format!("failed to parse {}", source.describe()))
}

fn build_options(cli: &Cli) -> DiffOptions {
    let order = if cli.sort_keys { KeyOrder::Sorted } else { KeyOrder::FirstSeen };
    DiffOptions::default().with_key_order(order)
}

fn build_config(cli: &Cli) -> Result<RenderConfig> {
    let config = RenderConfig::default().with_indent(cli.indent)?.with_pretty(cli.pretty);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn defaults_to_tree_output() {
        let cli = parse(&["confdiff", "a.json", "b.json"]);
        assert_eq!(cli.format, OutputFormat::Tree);
        assert_eq!(cli.indent, 4);
        assert!(cli.input_format.is_none());
        assert!(!cli.exit_code);
    }

    #[test]
    fn format_flag_accepts_known_names() {
        let cli = parse(&["confdiff", "-f", "plain", "a.json", "b.yml"]);
        assert_eq!(cli.format, OutputFormat::Plain);
        let cli = parse(&["confdiff", "--format=json", "a.json", "b.yml"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_format_is_rejected_by_the_parser() {
        let err = Cli::try_parse_from(["confdiff", "-f", "xml", "a.json", "b.json"]).unwrap_err();
        assert!(err.to_string().contains("unknown output format 'xml'"), "{err}");
    }

    #[test]
    fn both_paths_are_required() {
        assert!(Cli::try_parse_from(["confdiff", "a.json"]).is_err());
    }

    #[test]
    fn sort_keys_maps_to_sorted_order() {
        let cli = parse(&["confdiff", "--sort-keys", "a.json", "b.json"]);
        assert_eq!(build_options(&cli).key_order(), KeyOrder::Sorted);
    }

    #[test]
    fn narrow_indent_is_an_error() {
        let cli = parse(&["confdiff", "--indent", "1", "a.json", "b.json"]);
        let err = build_config(&cli).unwrap_err();
        assert_eq!(err.to_string(), "indent width must be at least 2, got 1");
    }

    #[test]
    fn dash_means_stdin() {
        assert!(matches!(InputSource::from_arg(Path::new("-")), InputSource::Stdin));
        assert!(matches!(InputSource::from_arg(Path::new("a.json")), InputSource::File(_)));
    }
}

//! Sanjo command-line tool for checking and transcoding Sanjo documents.
//!
//! Usage: sanjo [OPTIONS] [FILE]
//!
//! Reads a Sanjo document from FILE (or stdin when FILE is missing or `-`),
//! parses it, and either reports that it is valid (`--check`) or writes it out
//! in another format.
//!
//! Set `RUST_LOG=libsanjo=trace` to watch the parser place each line.

use clap::{Parser, ValueEnum};
use libsanjo::{
    parse_source, Document, FileSource, FormatConfig, LineSource, StrSource,
    DEFAULT_INDENTATION_WIDTH, DEFAULT_LIST_KEY_SUFFIX, DEFAULT_LIST_SEPARATOR,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod transcode;

/// Name reported in messages for standard input.
const STDIN_NAME: &str = "stdin";

#[derive(Parser, Debug)]
#[command(name = "sanjo")]
#[command(version)]
#[command(about = "Check and transcode Sanjo documents", long_about = None)]
struct Cli {
    /// Input file (reads from stdin if not provided or "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    to: OutputFormat,

    /// Write output to the given file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only check that the input parses (exit 0 if valid, 1 if invalid)
    #[arg(long)]
    check: bool,

    /// Spaces per indentation level
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENTATION_WIDTH)]
    indent: usize,

    /// Key suffix that marks a list value
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_LIST_KEY_SUFFIX)]
    list_suffix: String,

    /// Separator between list elements
    #[arg(long, value_name = "SEP", default_value = DEFAULT_LIST_SEPARATOR)]
    list_separator: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Toml,
    Cbor,
    /// CBOR diagnostic notation
    Diag,
}

enum Output {
    Text(String),
    Binary(Vec<u8>),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> i32 {
    let config = match FormatConfig::new(
        cli.indent,
        cli.list_suffix.as_str(),
        cli.list_separator.as_str(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let input = cli.input.as_deref().filter(|p| *p != Path::new("-"));
    let doc = match read_document(input, &config) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if cli.check {
        match input {
            Some(path) => println!("{}: ok", path.display()),
            None => println!("ok"),
        }
        return 0;
    }

    let output = match encode(&doc, cli.to) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: Cannot convert to {:?}: {}", cli.to, e);
            return 1;
        }
    };

    let written = match &output {
        Output::Text(text) => write_text_output(text, cli.output.as_deref()),
        Output::Binary(bytes) => write_binary_output(bytes, cli.output.as_deref()),
    };
    if let Err(e) = written {
        eprintln!("Error writing output: {}", e);
        return 1;
    }
    0
}

/// Parse a file, or stdin when `path` is `None`.
fn read_document(path: Option<&Path>, config: &FormatConfig) -> Result<Document, String> {
    match path {
        Some(path) => {
            let source = FileSource::new(path);
            debug!(source = %source.identifier(), "reading file");
            parse_source(&source, config).map_err(|e| e.to_string())
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Cannot read stdin: {}", e))?;
            parse_source(&StrSource::new(STDIN_NAME, &text), config).map_err(|e| e.to_string())
        }
    }
}

fn encode(doc: &Document, format: OutputFormat) -> Result<Output, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(doc)
            .map(Output::Text)
            .map_err(|e| format!("JSON encode error: {}", e)),
        OutputFormat::Yaml => transcode::yaml::encode(doc).map(Output::Text),
        OutputFormat::Toml => transcode::toml::encode(doc).map(Output::Text),
        OutputFormat::Cbor => transcode::cbor::encode(doc).map(Output::Binary),
        OutputFormat::Diag => {
            let bytes = transcode::cbor::encode(doc)?;
            transcode::cbor::diagnostic(&bytes).map(Output::Text)
        }
    }
}

fn write_text_output(output: &str, output_file: Option<&Path>) -> io::Result<()> {
    match output_file {
        Some(path) => {
            fs::write(path, output)?;
            info!(path = %path.display(), bytes = output.len(), "wrote output");
        }
        None => {
            print!("{}", output);
            // Ensure output ends with newline
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn write_binary_output(output: &[u8], output_file: Option<&Path>) -> io::Result<()> {
    match output_file {
        Some(path) => {
            fs::write(path, output)?;
            info!(path = %path.display(), bytes = output.len(), "wrote output");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output)?;
            handle.flush()?;
        }
    }
    Ok(())
}

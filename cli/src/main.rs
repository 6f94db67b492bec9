use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use exact_json_parser::{options::DEFAULT_MAX_DEPTH, parse_with, ParseOptions};
use tracing_subscriber::EnvFilter;

/// Parse a JSON document without losing numeric precision and print it back.
#[derive(Parser)]
#[command(name = "exact-json", version)]
struct Cli {
    /// File to read. Reads stdin when omitted.
    path: Option<PathBuf>,

    /// Require exactly one comma between elements.
    #[arg(long)]
    strict_commas: bool,

    /// Decode backslash escapes in strings.
    #[arg(long)]
    unescape_strings: bool,

    /// Fail when text follows the root value.
    #[arg(long)]
    reject_trailing: bool,

    /// Deepest allowed nesting of objects and arrays.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            Ok(json)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let json = match read_input(cli.path.as_ref()) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: cannot read input: {}", e);
            return ExitCode::from(2);
        }
    };

    tracing::debug!(path = ?cli.path, bytes = json.len(), "read input");

    let options = ParseOptions::new()
        .strict_commas(cli.strict_commas)
        .unescape_strings(cli.unescape_strings)
        .allow_trailing(!cli.reject_trailing)
        .max_depth(cli.max_depth);

    match parse_with(&json, &options) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

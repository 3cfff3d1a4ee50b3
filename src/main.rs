//! json-tree CLI.
//!
//! Reads a JSON document from a file or standard input and reprints it in
//! compact canonical form.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use json_tree::{parse_with_limits, serialize, Limits};

#[derive(Parser)]
#[command(name = "json-tree")]
#[command(about = "Parse a JSON document and reprint it canonically", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file; reads standard input when omitted.
    file: Option<PathBuf>,

    /// Maximum nesting depth accepted by the parser.
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let input = match read_input(cli.file.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut limits = Limits::default();
    if let Some(depth) = cli.max_depth {
        limits.max_nesting_depth = depth;
    }

    match parse_with_limits(&input, limits) {
        Ok(value) => {
            println!("{}", serialize(&value));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

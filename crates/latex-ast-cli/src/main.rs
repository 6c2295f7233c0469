//! Parses a LaTeX formula and prints the resulting AST.
//!
//! Simplified from `math-core-cli/src/main.rs`'s `clap::Parser`-derived
//! `Args` struct and `read_stdin`/`exit_io_error` helpers: this binary has
//! no HTML-file replacement mode (that feature has no counterpart in this
//! crate), just "parse one formula, from an argument/file/stdin, and print
//! the tree".

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use latex_ast::{parse_with_config, ParserConfig};

mod config_file;

/// Parses a LaTeX math-mode fragment and prints its AST.
#[derive(Parser, Debug)]
#[command(version, about = "Parses a LaTeX formula and prints its AST", long_about = None)]
struct Args {
    /// The file to read the formula from. Use `-` for stdin.
    #[arg(conflicts_with = "formula", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Specifies the formula directly instead of reading a file.
    #[arg(short, long, conflicts_with = "file")]
    formula: Option<String>,

    /// TOML file with a `predefined-macros` array of `[name, body]` pairs.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also print any soft diagnostics recorded while parsing.
    #[arg(long)]
    diagnostics: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match config_file::load_config_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ParserConfig::default(),
    };

    let source = if let Some(formula) = &args.formula {
        formula.clone()
    } else if let Some(path) = &args.file {
        match read_input(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("IO error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        match read_stdin() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("IO error: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    let (document, diagnostics) = parse_with_config(&source, &config);
    println!("{document:#?}");

    if args.diagnostics {
        for d in &diagnostics {
            eprintln!("{d}");
        }
    }

    ExitCode::SUCCESS
}

fn read_input(path: &PathBuf) -> std::io::Result<String> {
    if path == &PathBuf::from("-") {
        read_stdin()
    } else {
        fs::read_to_string(path)
    }
}

fn read_stdin() -> std::io::Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

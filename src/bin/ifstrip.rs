//! Ifstrip CLI - conditional compilation for LaTeX sources

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use ifstrip::{
    expand_inputs_once, filter_latex_with_report, Condition, ConditionSet, FilterOptions,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::Path;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "ifstrip")]
#[command(version)]
#[command(about = "Ifstrip - conditional compilation for LaTeX sources", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Condition to resolve, as NAME or NAME=true|false.
    ///
    /// true (the default) deletes the \if branch and keeps the \else branch;
    /// false keeps the \if branch. May be repeated; on duplicate names the
    /// first occurrence wins.
    #[arg(short = 'c', long = "condition", value_name = "NAME[=BOOL]")]
    conditions: Vec<Condition>,

    /// Strip comment text, keeping line breaks
    #[arg(long)]
    delete_comments: bool,

    /// Substitute \input{file} occurrences once before filtering
    #[arg(long)]
    expand_inputs: bool,

    /// Write a filter report JSON to this path
    #[arg(long, value_name = "PATH")]
    report_log: Option<String>,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Read input
    let (mut input, filename) = match cli.input_file {
        Some(ref path) => (fs::read_to_string(path)?, Some(path.clone())),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, None)
        }
    };

    let conditions: ConditionSet = cli.conditions.into_iter().collect();
    let options = FilterOptions {
        delete_comments: cli.delete_comments,
        expand_inputs: cli.expand_inputs,
    };

    if options.expand_inputs {
        // References resolve against the input file's directory, or the
        // current directory when reading from stdin.
        let base_dir = filename
            .as_deref()
            .and_then(|path| Path::new(path).parent())
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Path::new(".").to_path_buf());
        input = match expand_inputs_once(&input, &base_dir) {
            Ok(expanded) => expanded,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        };
    }

    let outcome = match filter_latex_with_report(&input, &conditions, &options) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(path) = cli.report_log {
        let json = serde_json::to_string_pretty(&outcome.report)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        fs::write(&path, json)?;
    }

    // Write output
    match cli.output {
        Some(path) => fs::write(path, outcome.content)?,
        None => io::stdout().write_all(outcome.content.as_bytes())?,
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install ifstrip --features cli");
    eprintln!("  ifstrip [OPTIONS] [INPUT_FILE]");
}

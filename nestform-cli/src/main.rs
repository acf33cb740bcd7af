//! nestform: validate a set of inputs against a model class.
//!
//! # Usage
//!
//! ```bash
//! nestform person.json --input answers.json
//! nestform person.json --data seed.json --input answers.json -vv --log-file nestform.log
//! ```
//!
//! The class file is a JSON model class (`logicalName`, `verboseName`, `schema`).
//! The input file maps control names (qualified field names) to raw input: a
//! string for text and checked tokens, an array of strings for selections.
//!
//! Prints the submission as JSON on stdout. Exits with 1 when the submission is
//! invalid and 2 on any other failure.

mod error;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{debug, error, info};
use nestform::config::FormConfig;
use nestform::form::{Form, Submission};
use nestform::view::MemoryView;
use nestform_model::{ModelClass, ValueMap};
use serde::de::DeserializeOwned;
use serde_json::json;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "nestform", version, about = "Validate form inputs against a model class")]
struct Args {
    /// Model class definition (JSON)
    class: PathBuf,

    /// Control inputs, keyed by qualified field name (JSON object)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Initial attribute values of the edited record (JSON object)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Add list rows before submitting, as `list_name=count`
    #[arg(long = "rows", value_parser = parse_rows)]
    rows: Vec<(String, usize)>,

    /// Prefix of the generated form id
    #[arg(long, default_value = "form_")]
    id_prefix: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_rows(s: &str) -> Result<(String, usize), String> {
    let (name, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected list_name=count, got '{s}'"))?;
    let count = count
        .parse()
        .map_err(|e| format!("invalid row count '{count}': {e}"))?;
    Ok((name.to_string(), count))
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(file).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: &Args) -> Result<Submission, CliError> {
    let class: ModelClass = read_json(&args.class)?;
    info!(
        "Loaded class '{}' with {} attribute(s)",
        class.logical_name,
        class.schema.len()
    );

    let data: ValueMap = match &args.data {
        Some(path) => read_json(path)?,
        None => ValueMap::new(),
    };

    let mut view = match &args.input {
        Some(path) => {
            let inputs: serde_json::Value = read_json(path)?;
            MemoryView::from_json(inputs).map_err(|source| CliError::Json {
                path: path.clone(),
                source,
            })?
        }
        None => MemoryView::new(),
    };

    let config = FormConfig::default().with_id_prefix(&args.id_prefix);
    let mut form = Form::for_model(Arc::new(class), data, &config)?;
    form.mount(&mut view);

    for (name, count) in &args.rows {
        match form.field_mut(name).and_then(|f| f.as_list_mut()) {
            Some(list) => {
                for _ in 0..*count {
                    list.add_item(&mut view)?;
                }
                debug!("Added {} row(s) to '{}'", count, name);
            }
            None => error!("'{}' is not a list field", name),
        }
    }

    Ok(form.submit(&mut view))
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Error: {}", e);
        return ExitCode::from(2);
    }

    let submission = match run(&args) {
        Ok(submission) => submission,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let (output, code) = match &submission {
        Submission::Valid(data) => (json!({"valid": true, "data": data}), ExitCode::SUCCESS),
        Submission::Invalid(errors) => (json!({"valid": false, "errors": errors}), ExitCode::from(1)),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(text) => {
            println!("{}", text);
            code
        }
        Err(e) => {
            eprintln!("Error: {}", CliError::from(e));
            ExitCode::from(2)
        }
    }
}

//! mmp: render the highlighted code panel or the preview for editor output.
//!
//! Run with: cargo run --bin mmp -- --mode image page.html
//! Or: cat page.html | cargo run --bin mmp -- --preview

use clap::Parser;
use log::info;
use math_markup_preview::{highlight, EditorSettings, Result, SaveMode, Workbench};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

/// Highlight formula markup produced by a math editor
#[derive(Parser, Debug)]
#[command(name = "mmp", version, about = "Highlight formula markup produced by a math editor")]
struct CliArgs {
    /// HTML file to read (stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Save format of the formulas: xml, image or base64
    #[arg(short, long, value_name = "MODE")]
    mode: Option<SaveMode>,

    /// TOML settings file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the prepared preview instead of the code panel
    #[arg(long, conflicts_with = "escaped")]
    preview: bool,

    /// Input is already escaped; only insert the highlighting markers
    #[arg(long)]
    escaped: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("mmp: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<String> {
    let mut settings = match &args.config {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    };
    if let Some(mode) = args.mode {
        settings.set_save_mode(mode);
    }

    let source = read_input(args.input.as_ref())?;
    info!(
        "read {} bytes, save mode {}",
        source.len(),
        settings.save_mode
    );

    if args.escaped {
        return Ok(highlight(&source, settings.save_mode.content_mode()));
    }

    let bench = Workbench::with_settings(move || source.clone(), settings);
    let output = bench.update();
    Ok(if args.preview {
        output.preview
    } else {
        output.code
    })
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

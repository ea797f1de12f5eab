//! # avimeta
//!
//! Command-line AVI metadata inspector built on avimeta-core.

use std::path::PathBuf;

use anyhow::Result;
use avimeta_core::{format_report, parse_avi_file};

struct Options {
    path: PathBuf,
    json: bool,
}

impl Options {
    fn from_args(args: &[String]) -> Option<Self> {
        let json = args.iter().any(|arg| arg == "--json");
        let mut paths = args.iter().skip(1).filter(|arg| !arg.starts_with("--"));
        let path = paths.next()?;
        if paths.next().is_some() {
            return None;
        }
        Some(Self {
            path: PathBuf::from(path),
            json,
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avimeta=warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(options) = Options::from_args(&args) else {
        let program = args.first().map(String::as_str).unwrap_or("avimeta");
        eprintln!("Usage: {} [--json] <path/to/file.avi>", program);
        std::process::exit(1);
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    tracing::debug!(path = %options.path.display(), "inspecting");
    let info = parse_avi_file(&options.path)?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", format_report(&info));
    }
    Ok(())
}

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use loadtext_fs::{Codepage, LoadConfig, LoadedText, load_text_file_with_config};
use tracing_subscriber::EnvFilter;

/// Print a text file as UTF-8, whatever encoding it is stored in.
#[derive(Debug, Parser)]
#[command(name = "loadtext", version)]
struct Arguments {
    /// File to load
    path: PathBuf,

    /// Windows codepage to decode with; 0 detects it
    #[arg(short, long, default_value_t = 0)]
    codepage: u32,

    /// Reject files larger than this many bytes
    #[arg(long)]
    max_size: Option<u64>,

    /// Top-level domain hint for detection, e.g. "ru"
    #[arg(long)]
    tld: Option<String>,

    /// Print how the file was decoded instead of its text
    #[arg(short, long)]
    info: bool,

    /// Log detection and decoding decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let mut config = LoadConfig::from_env();
    if let Some(max_size) = args.max_size {
        config.max_file_size = max_size;
    }
    if let Some(tld) = args.tld.clone() {
        config.detector_tld = Some(tld);
    }

    let loaded = load_text_file_with_config(&args.path, Codepage(args.codepage), &config)
        .with_context(|| format!("failed to load '{}'", args.path.display()))?;
    tracing::info!(path = %args.path.display(), codepage = %loaded.codepage, "loaded file");

    let mut stdout = io::stdout().lock();
    if args.info {
        writeln!(stdout, "{}", summary(&args.path, &loaded))?;
    } else {
        stdout.write_all(loaded.text.as_bytes())?;
    }
    stdout.flush()?;

    Ok(())
}

fn summary(path: &std::path::Path, loaded: &LoadedText) -> String {
    format!(
        "{}: codepage {}, resolved by {:?}, eol {:?}, {} bytes, {} chars",
        path.display(),
        loaded.codepage,
        loaded.resolution,
        loaded.original_eol,
        loaded.byte_len,
        loaded.text.chars().count()
    )
}

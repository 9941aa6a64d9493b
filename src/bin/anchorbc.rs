use std::process::ExitCode;

use clap::Parser;
use log::error;

use anchorbc::*;

/// Extract the barcodes in front of an anchor sequence from fastq reads.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Input fastq or fasta file, optionally compressed ("-" for stdin)
    input: String,

    /// Output file with one barcode per line, gzip compressed if it ends in .gz ("-" for stdout)
    output: String,

    /// YAML file with extraction parameters
    #[arg(short, long)]
    config: Option<String>,

    /// Sequence that follows the barcode
    #[arg(short, long)]
    anchor: Option<String>,

    /// Maximum number of edits allowed when matching the anchor
    #[arg(short = 'e', long)]
    max_edits: Option<usize>,

    /// Minimum barcode length
    #[arg(short = 'l', long)]
    min_len: Option<usize>,

    /// Number of records read at a time
    #[arg(long)]
    chunk_size: Option<usize>,
}

impl Cli {
    fn config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            // validated once the flags are applied
            Some(file) => ExtractConfig::read_file(file)?,
            None => ExtractConfig::default(),
        };

        if let Some(anchor) = &self.anchor {
            config.anchor = anchor.clone();
        }
        if let Some(max_edits) = self.max_edits {
            config.max_edits = max_edits;
        }
        if let Some(min_len) = self.min_len {
            config.min_barcode_len = min_len;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }

        config.validate()?;
        Ok(config)
    }

    fn try_execute(&self) -> Result<()> {
        let config = self.config()?;
        extract_file(&self.input, &self.output, &config)?;
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = cli.try_execute() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

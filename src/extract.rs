use flate2::{write::GzEncoder, Compression};
use log::{info, warn};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::*;
use crate::errors::*;
use crate::fastq::*;
use crate::iter::*;

/// Summary of one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtractStats {
    /// Records read from the input.
    pub records: usize,
    /// Records where the anchor was found.
    pub matched: usize,
    /// Matched records whose barcode was shorter than the minimum length.
    pub too_short: usize,
    /// Matched records whose barcode contained an ambiguous base.
    pub ambiguous: usize,
    /// Barcodes written to the output.
    pub emitted: usize,
    pub elapsed_secs: f64,
}

/// Extract barcodes from `reads` and write them to `writer`, one per line, in input order.
///
/// The writer is flushed when the run completes, and also before an input error is returned.
pub fn extract<R: Reads, W: Write>(
    reads: R,
    config: &ExtractConfig,
    writer: W,
) -> Result<ExtractStats> {
    let anchor = config.anchor()?;
    let mut stats = ExtractStats::default();
    let mut filtered = FilterCounts::default();

    reads
        .count(|n| stats.records = n)
        .match_anchor(anchor)
        .filter_barcodes(config.rules(), |c| filtered = c)
        .write_barcodes(writer)
        .count(|n| stats.emitted = n)
        .time(|secs| stats.elapsed_secs = secs)
        .run()?;

    stats.matched = stats.records - filtered.unmatched;
    stats.too_short = filtered.too_short;
    stats.ambiguous = filtered.ambiguous;

    Ok(stats)
}

/// Extract barcodes from a fastq file (or stdin for `-`) into an output file (or stdout for `-`).
///
/// Output paths ending in `.gz` are gzip compressed. The output is written to a temporary
/// file next to the destination and renamed once the run succeeds, so a failed run never
/// leaves partial output behind.
pub fn extract_file(
    input: impl AsRef<str>,
    output: impl AsRef<str>,
    config: &ExtractConfig,
) -> Result<ExtractStats> {
    let input = input.as_ref();
    let output = output.as_ref();
    config.validate()?;

    info!(
        "Extracting barcodes from {} to {} (anchor={}, max_edits={}, min_barcode_len={})",
        input, output, config.anchor, config.max_edits, config.min_barcode_len
    );

    let reads = if input == "-" {
        iter_fastq_reader(std::io::stdin(), config.chunk_size)?
    } else {
        iter_fastq(input, config.chunk_size)?
    };

    let stats = if output == "-" {
        let mut writer = BufWriter::new(std::io::stdout());
        extract(reads, config, &mut writer)?
    } else {
        extract_to_path(reads, config, Path::new(output))?
    };

    log_stats(&stats);
    Ok(stats)
}

fn extract_to_path<R: Reads>(reads: R, config: &ExtractConfig, path: &Path) -> Result<ExtractStats> {
    let file_io = |file: &Path, e: std::io::Error| Error::FileIo {
        file: file.display().to_string(),
        source: Box::new(e),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| file_io(parent, e))?;
        }
    }

    let partial = partial_path(path);
    let file = File::create(&partial).map_err(|e| file_io(&partial, e))?;
    let gz = path.extension().map_or(false, |ext| ext == "gz");

    let res = if gz {
        write_gz(reads, config, file)
    } else {
        write_plain(reads, config, file)
    };

    match res {
        Ok(stats) => {
            std::fs::rename(&partial, path).map_err(|e| file_io(path, e))?;
            Ok(stats)
        }
        Err(e) => {
            if let Err(remove_err) = std::fs::remove_file(&partial) {
                warn!(
                    "Could not remove partial output \"{}\": {}",
                    partial.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}

fn write_plain<R: Reads>(reads: R, config: &ExtractConfig, file: File) -> Result<ExtractStats> {
    let mut writer = BufWriter::new(file);
    let stats = extract(reads, config, &mut writer)?;

    let file = writer.into_inner().map_err(|e| Error::Write {
        source: Box::new(e.into_error()),
    })?;
    file.sync_all()
        .map_err(|e| Error::Write { source: Box::new(e) })?;

    Ok(stats)
}

fn write_gz<R: Reads>(reads: R, config: &ExtractConfig, file: File) -> Result<ExtractStats> {
    let mut writer = BufWriter::new(GzEncoder::new(file, Compression::default()));
    let stats = extract(reads, config, &mut writer)?;

    let encoder = writer.into_inner().map_err(|e| Error::Write {
        source: Box::new(e.into_error()),
    })?;
    let file = encoder
        .finish()
        .map_err(|e| Error::Write { source: Box::new(e) })?;
    file.sync_all()
        .map_err(|e| Error::Write { source: Box::new(e) })?;

    Ok(stats)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_owned();
    name.push(".partial");
    path.with_file_name(name)
}

fn log_stats(stats: &ExtractStats) {
    info!(
        "Processed {} records in {:.2}s: {} matched the anchor, {} too short, {} ambiguous, {} barcodes written",
        stats.records,
        stats.elapsed_secs,
        stats.matched,
        stats.too_short,
        stats.ambiguous,
        stats.emitted
    );

    if stats.emitted == 0 {
        warn!("No barcodes were extracted");
    }
}

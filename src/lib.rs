//! Rust library for extracting barcodes that sit in front of a known anchor sequence in
//! sequencing reads.
//!
//! # Overview
//! Each read is expected to look like this:
//! ```text
//! AAATTTCCCGGG CATCGTCGCATCCAAGAGGCTAGCTAACTA ...
//! |--barcode-| |-----------anchor-----------|
//! ```
//! The anchor is searched for with a bound on the number of substitutions, insertions and
//! deletions. The best match is the one with the fewest edits, and the leftmost one among
//! equally good matches. Everything before the start of the best match is the barcode.
//! A barcode is kept if it is long enough and contains no ambiguous base (`N`).
//! Kept barcodes are written one per line, in the order of the input reads.
//!
//! ## Iterator-like API
//! Records are pulled through a chain of operations, similar to Rust iterators.
//! A source such as [`iter_fastq()`] produces [`Record`]s in chunks, and operations like
//! [`match_anchor()`](Reads::match_anchor) or [`write_barcodes()`](Reads::write_barcodes)
//! wrap it. Nothing happens until [`run()`](Reads::run) is called:
//! ```no_run
//! use anchorbc::*;
//!
//! let anchor = Anchor::new("CATCGTCGCATCCAAGAGGCTAGCTAACTA", 2).unwrap();
//! let out = std::fs::File::create("barcodes.tsv").unwrap();
//!
//! iter_fastq("reads.fastq.gz", 256)
//!     .unwrap()
//!     .match_anchor(anchor)
//!     .filter_barcodes(BarcodeRules::new(12), |_| ())
//!     .write_barcodes(std::io::BufWriter::new(out))
//!     .run()
//!     .unwrap();
//! ```
//!
//! [`extract()`] and [`extract_file()`] build this chain from an [`ExtractConfig`] and
//! return [`ExtractStats`] for the run.

pub mod barcode;
pub mod config;
pub mod errors;
pub mod extract;
pub mod fastq;
pub mod iter;
pub mod read;
pub mod search;

// commonly used functions and types

pub use crate::barcode::*;
pub use crate::config::*;
pub use crate::errors::{Error, Result};
pub use crate::extract::*;
pub use crate::fastq::*;
pub use crate::iter::*;
pub use crate::read::*;
pub use crate::search::*;

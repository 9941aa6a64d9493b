use std::io::Write;

use crate::barcode::*;
use crate::errors::*;
use crate::read::*;
use crate::search::*;

pub mod match_anchor_reads;
pub use match_anchor_reads::*;

pub mod filter_barcodes_reads;
pub use filter_barcodes_reads::*;

pub mod write_barcodes_reads;
pub use write_barcodes_reads::*;

pub mod count_reads;
pub use count_reads::*;

pub mod time_reads;
pub use time_reads::*;

/// A stream of records that is pulled in chunks.
///
/// Operations wrap the upstream `Reads` and are chained with the methods below.
/// Nothing happens until [`run()`](Reads::run) is called.
pub trait Reads {
    /// Pull every chunk through the chain, then finish it.
    fn run(mut self) -> Result<()>
    where
        Self: Sized,
    {
        while !self.next_chunk()?.is_empty() {}
        self.finish()
    }

    fn run_collect_reads(mut self) -> Result<Vec<Record>>
    where
        Self: Sized,
    {
        let mut res = Vec::new();

        loop {
            let reads = self.next_chunk()?;

            if reads.is_empty() {
                break;
            }

            res.extend(reads);
        }

        self.finish()?;
        Ok(res)
    }

    /// Search each record for the anchor and annotate it with the best match.
    #[must_use]
    fn match_anchor(self, anchor: Anchor) -> MatchAnchorReads<Self>
    where
        Self: Sized,
    {
        MatchAnchorReads::new(self, anchor)
    }

    /// Keep only the records with an anchor match and a valid barcode in front of it.
    ///
    /// `func` receives the number of records dropped for each reason when the chain finishes.
    #[must_use]
    fn filter_barcodes<F>(self, rules: BarcodeRules, func: F) -> FilterBarcodesReads<Self, F>
    where
        F: FnMut(FilterCounts),
        Self: Sized,
    {
        FilterBarcodesReads::new(self, rules, func)
    }

    /// Write the barcode of each record with an anchor match as one line to `writer`.
    #[must_use]
    fn write_barcodes<W>(self, writer: W) -> WriteBarcodesReads<Self, W>
    where
        W: Write,
        Self: Sized,
    {
        WriteBarcodesReads::new(self, writer)
    }

    /// Count the records that reach this point of the chain.
    #[must_use]
    fn count<F>(self, func: F) -> CountReads<Self, F>
    where
        F: FnMut(usize),
        Self: Sized,
    {
        CountReads::new(self, func)
    }

    /// Measure the time spent in the upstream operations, in seconds.
    #[must_use]
    fn time<F>(self, func: F) -> TimeReads<Self, F>
    where
        F: FnMut(f64),
        Self: Sized,
    {
        TimeReads::new(self, func)
    }

    #[must_use]
    fn boxed<'a>(self) -> Box<dyn Reads + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    fn next_chunk(&mut self) -> Result<Vec<Record>>;

    fn finish(&mut self) -> Result<()>;
}

impl<R: Reads + ?Sized> Reads for Box<R> {
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        (**self).next_chunk()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

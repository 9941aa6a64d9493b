use log::trace;

use crate::iter::*;

/// Number of records dropped by [`FilterBarcodesReads`], by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub unmatched: usize,
    pub too_short: usize,
    pub ambiguous: usize,
}

pub struct FilterBarcodesReads<R: Reads, F: FnMut(FilterCounts)> {
    reads: R,
    rules: BarcodeRules,
    counts: FilterCounts,
    func: F,
}

impl<R: Reads, F: FnMut(FilterCounts)> FilterBarcodesReads<R, F> {
    pub fn new(reads: R, rules: BarcodeRules, func: F) -> Self {
        Self {
            reads,
            rules,
            counts: FilterCounts::default(),
            func,
        }
    }

    fn keep(&mut self, read: &Record) -> bool {
        let Some(barcode) = read.barcode() else {
            self.counts.unmatched += 1;
            return false;
        };

        match self.rules.check(barcode) {
            Verdict::Accept => true,
            Verdict::TooShort => {
                trace!(
                    "Barcode of record {} ({}) in {} is too short: {}",
                    read.idx(),
                    utf8(read.name()),
                    read.origin(),
                    utf8(barcode)
                );
                self.counts.too_short += 1;
                false
            }
            Verdict::Ambiguous => {
                trace!(
                    "Barcode of record {} ({}) in {} has ambiguous bases: {}",
                    read.idx(),
                    utf8(read.name()),
                    read.origin(),
                    utf8(barcode)
                );
                self.counts.ambiguous += 1;
                false
            }
        }
    }
}

impl<R: Reads, F: FnMut(FilterCounts)> Reads for FilterBarcodesReads<R, F> {
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        // an empty chunk ends the stream, so chunks with nothing kept are skipped
        loop {
            let mut reads = self.reads.next_chunk()?;

            if reads.is_empty() {
                return Ok(reads);
            }

            reads.retain(|r| self.keep(r));

            if !reads.is_empty() {
                return Ok(reads);
            }
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.reads.finish()?;
        (self.func)(self.counts);
        Ok(())
    }
}

use std::ops::Range;
use std::sync::Arc;

use crate::fastq::Origin;
use crate::search::Match;

/// One sequencing record, along with the annotations added by the operations
/// it passes through.
#[derive(Debug, Clone)]
pub struct Record {
    name: Vec<u8>,
    seq: Vec<u8>,
    origin: Arc<Origin>,
    idx: usize,
    anchor: Option<Match>,
}

impl Record {
    pub fn new(name: &[u8], seq: &[u8], origin: Arc<Origin>, idx: usize) -> Self {
        Self {
            name: name.to_owned(),
            seq: seq.to_owned(),
            origin,
            idx,
            anchor: None,
        }
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    /// Input the record was read from.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Index of this record in its input, starting at zero.
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn anchor(&self) -> Option<&Match> {
        self.anchor.as_ref()
    }

    pub fn set_anchor(&mut self, anchor: Option<Match>) {
        self.anchor = anchor;
    }

    /// Interval of the sequence before the anchor match, if the anchor was found.
    pub fn barcode_range(&self) -> Option<Range<usize>> {
        self.anchor.as_ref().map(|m| 0..m.start)
    }

    pub fn barcode(&self) -> Option<&[u8]> {
        self.barcode_range().map(|r| &self.seq[r])
    }
}

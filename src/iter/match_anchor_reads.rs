use crate::iter::*;

pub struct MatchAnchorReads<R: Reads> {
    reads: R,
    anchor: Anchor,
}

impl<R: Reads> MatchAnchorReads<R> {
    pub fn new(reads: R, anchor: Anchor) -> Self {
        Self { reads, anchor }
    }
}

impl<R: Reads> Reads for MatchAnchorReads<R> {
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        let mut reads = self.reads.next_chunk()?;

        for read in reads.iter_mut() {
            let m = self.anchor.find_best(read.seq());
            read.set_anchor(m);
        }

        Ok(reads)
    }

    fn finish(&mut self) -> Result<()> {
        self.reads.finish()
    }
}

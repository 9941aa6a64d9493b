use crate::iter::*;

pub struct CountReads<R: Reads, F: FnMut(usize)> {
    reads: R,
    count: usize,
    func: F,
}

impl<R: Reads, F: FnMut(usize)> CountReads<R, F> {
    pub fn new(reads: R, func: F) -> Self {
        Self {
            reads,
            count: 0,
            func,
        }
    }
}

impl<R: Reads, F: FnMut(usize)> Reads for CountReads<R, F> {
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        let reads = self.reads.next_chunk()?;
        self.count += reads.len();
        Ok(reads)
    }

    fn finish(&mut self) -> Result<()> {
        self.reads.finish()?;
        (self.func)(self.count);
        Ok(())
    }
}

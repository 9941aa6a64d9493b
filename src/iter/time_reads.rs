use std::time::{Duration, Instant};

use crate::iter::*;

pub struct TimeReads<R: Reads, F: FnMut(f64)> {
    reads: R,
    duration: Duration,
    func: F,
}

impl<R: Reads, F: FnMut(f64)> TimeReads<R, F> {
    pub fn new(reads: R, func: F) -> Self {
        Self {
            reads,
            duration: Duration::default(),
            func,
        }
    }
}

impl<R: Reads, F: FnMut(f64)> Reads for TimeReads<R, F> {
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        let start = Instant::now();
        let reads = self.reads.next_chunk()?;
        self.duration += start.elapsed();

        Ok(reads)
    }

    fn finish(&mut self) -> Result<()> {
        let start = Instant::now();
        self.reads.finish()?;
        self.duration += start.elapsed();

        (self.func)(self.duration.as_secs_f64());
        Ok(())
    }
}

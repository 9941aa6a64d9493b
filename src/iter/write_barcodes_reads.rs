use log::warn;

use crate::iter::*;

pub struct WriteBarcodesReads<R: Reads, W: Write> {
    reads: R,
    writer: W,
    // barcode and newline, so each line is a single write
    line: Vec<u8>,
}

impl<R: Reads, W: Write> WriteBarcodesReads<R, W> {
    pub fn new(reads: R, writer: W) -> Self {
        Self {
            reads,
            writer,
            line: Vec::new(),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::Write { source: Box::new(e) })
    }
}

impl<R: Reads, W: Write> Reads for WriteBarcodesReads<R, W> {
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        let reads = match self.reads.next_chunk() {
            Ok(reads) => reads,
            Err(e) => {
                // keep every complete line written so far
                if let Err(flush_err) = self.flush() {
                    warn!("{}", flush_err);
                }
                return Err(e);
            }
        };

        for barcode in reads.iter().filter_map(|r| r.barcode()) {
            self.line.clear();
            self.line.extend_from_slice(barcode);
            self.line.push(b'\n');
            self.writer
                .write_all(&self.line)
                .map_err(|e| Error::Write { source: Box::new(e) })?;
        }

        Ok(reads)
    }

    fn finish(&mut self) -> Result<()> {
        self.reads.finish()?;
        self.flush()
    }
}

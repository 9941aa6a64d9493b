use log::debug;
use needletail::{parse_fastx_reader, FastxReader};

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use crate::errors::*;
use crate::iter::*;
use crate::read::*;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Where a record was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(String),
    Bytes,
    Records,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Origin::*;
        match self {
            File(file) => write!(f, "file \"{}\"", file),
            Bytes => write!(f, "bytes"),
            Records => write!(f, "records"),
        }
    }
}

/// Stream of records parsed from fastq (or fasta) input, possibly compressed.
pub struct FastqReads<'reader> {
    // `None` for an empty input
    reader: Option<Box<dyn FastxReader + 'reader>>,
    origin: Arc<Origin>,
    idx: usize,
    chunk_size: usize,
    // parse error held back until the records before it are returned
    pending: Option<Error>,
}

impl<'reader> Reads for FastqReads<'reader> {
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        if let Some(e) = self.pending.take() {
            self.reader = None;
            return Err(e);
        }

        let Some(reader) = self.reader.as_mut() else {
            return Ok(Vec::new());
        };

        let mut res = Vec::with_capacity(self.chunk_size);

        for _ in 0..self.chunk_size {
            let Some(record) = reader.next() else {
                break;
            };
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    let e = Error::ParseRecord {
                        origin: (*self.origin).clone(),
                        idx: self.idx,
                        source: Box::new(e),
                    };

                    if res.is_empty() {
                        self.reader = None;
                        return Err(e);
                    }

                    self.pending = Some(e);
                    break;
                }
            };

            res.push(Record::new(
                record.id(),
                &record.seq(),
                Arc::clone(&self.origin),
                self.idx,
            ));
            self.idx += 1;
        }

        if !res.is_empty() {
            debug!("Read {} records from {}", self.idx, self.origin);
        }

        Ok(res)
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

// an input with no bytes is an empty stream, not a parse failure
fn fastx_reader<'reader>(
    reader: impl std::io::Read + Send + 'reader,
) -> std::result::Result<Option<Box<dyn FastxReader + 'reader>>, BoxError> {
    let mut reader = BufReader::new(reader);

    if reader.fill_buf()?.is_empty() {
        return Ok(None);
    }

    Ok(Some(parse_fastx_reader(reader)?))
}

/// Stream records from a fastq or fasta file. Compressed files are decompressed transparently.
pub fn iter_fastq(file: impl AsRef<str>, chunk_size: usize) -> Result<FastqReads<'static>> {
    let f = File::open(file.as_ref()).map_err(|e| Error::FileIo {
        file: file.as_ref().to_owned(),
        source: Box::new(e),
    })?;
    let reader = fastx_reader(f).map_err(|e| Error::FileIo {
        file: file.as_ref().to_owned(),
        source: e,
    })?;

    Ok(FastqReads {
        reader,
        origin: Arc::new(Origin::File(file.as_ref().to_owned())),
        idx: 0,
        chunk_size,
        pending: None,
    })
}

/// Stream records from an arbitrary `Read`er.
pub fn iter_fastq_reader<'reader>(
    reader: impl std::io::Read + Send + 'reader,
    chunk_size: usize,
) -> Result<FastqReads<'reader>> {
    let reader = fastx_reader(reader).map_err(Error::BytesIo)?;

    Ok(FastqReads {
        reader,
        origin: Arc::new(Origin::Bytes),
        idx: 0,
        chunk_size,
        pending: None,
    })
}

/// Stream of records that were already decoded by the caller.
pub struct RecordReads<I> {
    records: I,
    origin: Arc<Origin>,
    idx: usize,
    chunk_size: usize,
}

impl<I, N, S> Reads for RecordReads<I>
where
    I: Iterator<Item = (N, S)>,
    N: AsRef<[u8]>,
    S: AsRef<[u8]>,
{
    fn next_chunk(&mut self) -> Result<Vec<Record>> {
        let mut res = Vec::with_capacity(self.chunk_size);

        for (name, seq) in self.records.by_ref().take(self.chunk_size) {
            res.push(Record::new(
                name.as_ref(),
                seq.as_ref(),
                Arc::clone(&self.origin),
                self.idx,
            ));
            self.idx += 1;
        }

        Ok(res)
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Stream `(name, sequence)` pairs supplied by the caller.
pub fn iter_records<I, N, S>(records: I, chunk_size: usize) -> RecordReads<I::IntoIter>
where
    I: IntoIterator<Item = (N, S)>,
    N: AsRef<[u8]>,
    S: AsRef<[u8]>,
{
    RecordReads {
        records: records.into_iter(),
        origin: Arc::new(Origin::Records),
        idx: 0,
        chunk_size,
    }
}

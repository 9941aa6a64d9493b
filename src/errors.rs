use thiserror;

use crate::fastq::Origin;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error reading or writing \"{file}\": {source}")]
    FileIo {
        file: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error reading or writing bytes: {0}")]
    BytesIo(Box<dyn std::error::Error + Send + Sync>),

    #[error("Error parsing record {idx} in {origin}: {source}")]
    ParseRecord {
        origin: Origin,
        idx: usize,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error writing barcodes: {source}")]
    Write {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid value for \"{field}\": {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("Error parsing config:\n{source}")]
    ParseConfig {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub fn utf8(b: &[u8]) -> String {
    String::from_utf8_lossy(b).into_owned()
}

use serde::Deserialize;

use std::path::Path;

use crate::barcode::*;
use crate::errors::*;
use crate::search::*;

pub const DEFAULT_ANCHOR: &str = "CATCGTCGCATCCAAGAGGCTAGCTAACTA";
pub const DEFAULT_MAX_EDITS: usize = 2;
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Parameters for extracting barcodes.
///
/// Can be deserialized from YAML, where every field is optional:
/// ```yaml
/// anchor: CATCGTCGCATCCAAGAGGCTAGCTAACTA
/// max_edits: 2
/// min_barcode_len: 12
/// ambiguous_base: N
/// chunk_size: 256
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Sequence expected right after the barcode.
    pub anchor: String,
    /// Maximum number of substitutions, insertions and deletions (inclusive).
    pub max_edits: usize,
    pub min_barcode_len: usize,
    /// Base call that makes a barcode invalid.
    pub ambiguous_base: char,
    /// Number of records pulled from the input at a time.
    pub chunk_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.to_owned(),
            max_edits: DEFAULT_MAX_EDITS,
            min_barcode_len: DEFAULT_MIN_LEN,
            ambiguous_base: DEFAULT_AMBIGUOUS as char,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ExtractConfig {
    pub fn from_yaml(yaml: &[u8]) -> Result<Self> {
        let config = Self::parse_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(file: impl AsRef<Path>) -> Result<Self> {
        let config = Self::read_file(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Deserialize without validating, for callers that override fields afterwards.
    pub fn parse_yaml(yaml: &[u8]) -> Result<Self> {
        serde_yaml::from_slice(yaml).map_err(|e| Error::ParseConfig { source: Box::new(e) })
    }

    /// Read and deserialize a YAML file without validating it.
    pub fn read_file(file: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read(file.as_ref()).map_err(|e| Error::FileIo {
            file: file.as_ref().display().to_string(),
            source: Box::new(e),
        })?;
        Self::parse_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchor.is_empty() {
            return Err(Error::InvalidConfig {
                field: "anchor",
                reason: "the anchor must not be empty".to_owned(),
            });
        }

        if let Some(c) = self.anchor.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(Error::InvalidConfig {
                field: "anchor",
                reason: format!("'{}' is not a nucleotide symbol", c),
            });
        }

        if self.max_edits >= self.anchor.len() {
            return Err(Error::InvalidConfig {
                field: "max_edits",
                reason: format!(
                    "must be smaller than the anchor length ({})",
                    self.anchor.len()
                ),
            });
        }

        if !self.ambiguous_base.is_ascii() {
            return Err(Error::InvalidConfig {
                field: "ambiguous_base",
                reason: format!("'{}' is not an ASCII character", self.ambiguous_base),
            });
        }

        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig {
                field: "chunk_size",
                reason: "must be greater than zero".to_owned(),
            });
        }

        Ok(())
    }

    pub fn anchor(&self) -> Result<Anchor> {
        self.validate()?;
        Anchor::new(self.anchor.as_bytes(), self.max_edits)
    }

    pub fn rules(&self) -> BarcodeRules {
        BarcodeRules {
            min_len: self.min_barcode_len,
            ambiguous: self.ambiguous_base as u8,
        }
    }
}

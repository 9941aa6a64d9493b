use memchr::memchr;

pub const DEFAULT_MIN_LEN: usize = 12;
pub const DEFAULT_AMBIGUOUS: u8 = b'N';

/// Rules for accepting the sequence in front of an anchor as a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeRules {
    pub min_len: usize,
    pub ambiguous: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    TooShort,
    Ambiguous,
}

impl BarcodeRules {
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len,
            ambiguous: DEFAULT_AMBIGUOUS,
        }
    }

    /// Length is checked before the ambiguous base scan.
    pub fn check(&self, barcode: &[u8]) -> Verdict {
        if barcode.len() < self.min_len {
            Verdict::TooShort
        } else if memchr(self.ambiguous, barcode).is_some() {
            Verdict::Ambiguous
        } else {
            Verdict::Accept
        }
    }
}

impl Default for BarcodeRules {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LEN)
    }
}

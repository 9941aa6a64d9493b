//! Approximate search for an anchor sequence inside reads.
//!
//! The search aligns the whole anchor against any substring of the read
//! (semi-global alignment) with unit costs for substitutions, insertions and
//! deletions. Every DP cell carries the edit count together with the start of
//! the read substring it was aligned to, and cells are compared by
//! `(edits, start)`. The cell in the last row of each column is therefore the
//! cheapest, then leftmost, alignment ending at that column, and the best
//! match overall is the minimum of these across all columns.
//!
//! Each read is first scanned with Myers' bit-parallel algorithm, which gives
//! the smallest edit count and the end positions that reach it. Reads without
//! the anchor stop there. Otherwise the DP above runs only over the window that
//! can hold those best alignments, bounded by their edit count. Rows that can no
//! longer reach the bound are skipped with Ukkonen's cut-off.

use bio::pattern_matching::myers::Myers;

use crate::errors::*;

/// Longest anchor handled by the bit-parallel scan. Longer anchors use the DP alone.
pub const MAX_BIT_PARALLEL_LEN: usize = 64;

/// Best occurrence of an anchor in a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Start of the matched region in the read.
    pub start: usize,
    /// End (exclusive) of the matched region in the read.
    pub end: usize,
    /// Number of substitutions, insertions and deletions in the alignment.
    pub edits: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Cell {
    // field order gives the (edits, start) ordering
    edits: usize,
    start: usize,
}

/// A fixed anchor pattern with a bound on the number of edits allowed when
/// searching for it.
#[derive(Debug, Clone)]
pub struct Anchor {
    pattern: Vec<u8>,
    max_edits: usize,
    myers: Option<Myers<u64>>,
    col: Vec<Cell>,
}

impl Anchor {
    pub fn new(pattern: impl AsRef<[u8]>, max_edits: usize) -> Result<Self> {
        let pattern = pattern.as_ref().to_owned();

        if pattern.is_empty() {
            return Err(Error::InvalidConfig {
                field: "anchor",
                reason: "the anchor must not be empty".to_owned(),
            });
        }

        if max_edits >= pattern.len() {
            return Err(Error::InvalidConfig {
                field: "max_edits",
                reason: format!(
                    "{} edits would match any read for an anchor of length {}",
                    max_edits,
                    pattern.len()
                ),
            });
        }

        let myers = if pattern.len() <= MAX_BIT_PARALLEL_LEN {
            Some(Myers::<u64>::new(&pattern[..]))
        } else {
            None
        };

        Ok(Self {
            col: Vec::with_capacity(pattern.len() + 1),
            myers,
            pattern,
            max_edits,
        })
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn max_edits(&self) -> usize {
        self.max_edits
    }

    /// Find the occurrence of the anchor in `seq` with the fewest edits,
    /// breaking ties by the leftmost start.
    ///
    /// Returns `None` if no substring of `seq` is within `max_edits` of the anchor.
    pub fn find_best(&mut self, seq: &[u8]) -> Option<Match> {
        let Some(myers) = &self.myers else {
            return self.align(seq, self.max_edits);
        };

        // smallest distance, and the first and last end (inclusive) reaching it
        let mut best: Option<(u8, usize, usize)> = None;

        for (end, dist) in myers.find_all_end(seq, self.max_edits as u8) {
            best = match best {
                Some((d, first, _)) if dist == d => Some((d, first, end)),
                Some((d, ..)) if dist > d => best,
                _ => Some((dist, end, end)),
            };
        }

        let (dist, first, last) = best?;
        let dist = dist as usize;

        // an alignment with `dist` edits spans at most `len + dist` bases
        let from = first.saturating_sub(self.pattern.len() + dist);
        let to = (last + 2).min(seq.len());

        self.align(&seq[from..to], dist).map(|m| Match {
            start: m.start + from,
            end: m.end + from,
            edits: m.edits,
        })
    }

    /// Semi-global DP over all of `seq`, keeping alignments with at most `k` edits.
    fn align(&mut self, seq: &[u8], k: usize) -> Option<Match> {
        let m = self.pattern.len();

        self.col.clear();
        self.col
            .extend((0..=m).map(|i| Cell { edits: i, start: 0 }));

        // every row past `last` holds more than `k` edits
        let mut last = k;
        let mut best: Option<Match> = None;

        for (j, &c) in seq.iter().enumerate() {
            let mut diag = self.col[0];
            self.col[0] = Cell {
                edits: 0,
                start: j + 1,
            };

            let top = (last + 1).min(m);

            for i in 1..=top {
                let left = self.col[i];
                let up = self.col[i - 1];

                let sub = Cell {
                    edits: diag.edits + (self.pattern[i - 1] != c) as usize,
                    start: diag.start,
                };
                let ins = Cell {
                    edits: left.edits + 1,
                    start: left.start,
                };
                let del = Cell {
                    edits: up.edits + 1,
                    start: up.start,
                };

                diag = left;
                self.col[i] = sub.min(ins).min(del);
            }

            last = top;
            while last > 0 && self.col[last].edits > k {
                last -= 1;
            }

            if last == m {
                let cell = self.col[m];

                if best.map_or(true, |b| (cell.edits, cell.start) < (b.edits, b.start)) {
                    best = Some(Match {
                        start: cell.start,
                        end: j + 1,
                        edits: cell.edits,
                    });
                }

                // an exact match cannot be beaten by anything starting later
                if cell.edits == 0 {
                    break;
                }
            }
        }

        best
    }
}

//! Report parsing modules.
//!
//! Each report format follows a layered structure:
//! - `layout`: header phrases, field names and column positions (source of truth)
//! - `reader`: access conventions for a format, where the format needs them
//! - `parser`: domain-level extraction (no direct column indexing)
//! - `error`: explicit errors for formats that can fail as a whole
//!
//! Parsers are pure and contain no I/O; the `tool` module runs the analysis
//! tool and the analysis layer feeds its stdout here.

pub mod conversations;
pub mod hierarchy;
pub mod packets;
pub mod section;
pub mod summary;

/// Records extracted from one report, with the count of rows the parser
/// dropped under its malformed-row policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T> {
    pub records: Vec<T>,
    pub dropped: usize,
}

impl<T> Extracted<T> {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
            dropped: 0,
        }
    }

    pub(crate) fn keep(&mut self, record: T) {
        self.records.push(record);
    }

    pub(crate) fn drop_row(&mut self) {
        self.dropped += 1;
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

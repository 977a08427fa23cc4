//! Whole-capture totals from the `-z io,stat,0` table.
//!
//! Degrade policy: a table that cannot be found or has no parseable
//! aggregate row yields the zero summary, never an error.
//!
//! Rows only count once the `Frames`/`Bytes` column header has been seen.
//! Output without that header reports zero totals even if some `|` row
//! would parse.

pub mod layout;
pub mod parser;

pub use parser::parse_packet_summary;

//! Protocol hierarchy report (`-z io,phs`).
//!
//! Every body line names one protocol layer followed by `frames:<n>` and
//! `bytes:<n>`. Indentation encodes nesting in the tool's output; the parser
//! keeps report order and flattens the tree.
//!
//! Malformed-line policy: skip and continue. A line with fewer than three
//! tokens, or whose counts do not parse, is dropped rather than zero-filled.

pub mod layout;
pub mod parser;

pub use parser::parse_protocol_hierarchy;

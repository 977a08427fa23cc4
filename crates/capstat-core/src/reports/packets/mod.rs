//! Per-packet detail from the `-T json` export.
//!
//! Each array element carries `_source.layers`. The tool emits either a flat
//! map of field name to one-element string array, or one nested object per
//! protocol layer with plain string values; the reader accepts both.
//!
//! Unlike the text reports this format fails as a whole: stdout that is not
//! a JSON array is an error. Individual fields never drop a packet; missing
//! or malformed values fall back to defaults so the output stays aligned
//! with the tool's frame numbering.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::parse_packet_details;

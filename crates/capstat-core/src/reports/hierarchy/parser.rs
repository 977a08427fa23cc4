use crate::ProtocolStat;
use crate::reports::Extracted;
use crate::reports::section::section_lines;

use super::layout;

/// Parse the protocol hierarchy report into per-protocol stats.
pub fn parse_protocol_hierarchy(text: &str) -> Extracted<ProtocolStat> {
    let mut extracted = Extracted::new();
    for line in section_lines(text, layout::SECTION_HEADER) {
        match parse_line(line) {
            Some(stat) => extracted.keep(stat),
            None => extracted.drop_row(),
        }
    }
    extracted
}

fn parse_line(line: &str) -> Option<ProtocolStat> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < layout::MIN_TOKENS {
        return None;
    }

    let packets = labelled_count(tokens[layout::FRAMES_TOKEN])?;
    let bytes = labelled_count(tokens[layout::BYTES_TOKEN])?;
    Some(ProtocolStat {
        protocol: tokens[layout::PROTOCOL_TOKEN].to_string(),
        packets,
        bytes,
    })
}

/// `frames:120` -> 120
fn labelled_count(token: &str) -> Option<u64> {
    let (_, value) = token.split_once(layout::LABEL_SEPARATOR)?;
    value.parse().ok()
}

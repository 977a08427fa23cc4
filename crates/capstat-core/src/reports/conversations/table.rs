//! Positional reader for the `-z conv,ip` table.
//!
//! Malformed-row policy: skip and continue. Column headers carry no pairing
//! token and are not rows; a row with more than one `<->` or too few tokens
//! is dropped.

use crate::Conversation;
use crate::reports::Extracted;
use crate::reports::section::section_lines;

use super::layout;

/// Parse the IPv4 conversation table, summing both directions per row.
pub fn parse_conversation_table(text: &str) -> Extracted<Conversation> {
    let mut extracted = Extracted::new();
    for line in section_lines(text, layout::TABLE_SECTION_HEADER) {
        if !line.contains(layout::PAIR_TOKEN) {
            continue;
        }
        match parse_row(line) {
            Some(conversation) => extracted.keep(conversation),
            None => extracted.drop_row(),
        }
    }
    extracted
}

fn parse_row(line: &str) -> Option<Conversation> {
    let mut halves = line.split(layout::PAIR_TOKEN);
    let (left, right) = match (halves.next(), halves.next(), halves.next()) {
        (Some(left), Some(right), None) => (left, right),
        _ => return None,
    };

    let source = left.split_whitespace().next()?;
    let tokens: Vec<&str> = right.split_whitespace().collect();
    let destination = tokens.get(layout::DESTINATION_TOKEN)?;
    let to_destination = byte_cell(&tokens, layout::BYTES_TO_DESTINATION_TOKEN)?;
    let from_destination = byte_cell(&tokens, layout::BYTES_FROM_DESTINATION_TOKEN)?;

    Some(Conversation {
        source: source.to_string(),
        destination: destination.to_string(),
        protocol: None,
        bytes: to_destination.checked_add(from_destination)?,
    })
}

/// Reads the count at `index`, scaled by a unit token directly after it.
fn byte_cell(tokens: &[&str], index: usize) -> Option<u64> {
    let raw: String = tokens
        .get(index)?
        .chars()
        .filter(|c| *c != layout::DIGIT_GROUP_SEPARATOR)
        .collect();
    let multiplier = tokens
        .get(index + 1)
        .and_then(|unit| unit_multiplier(unit))
        .unwrap_or(1);

    if let Ok(count) = raw.parse::<u64>() {
        return count.checked_mul(multiplier);
    }
    let scaled = raw.parse::<f64>().ok()? * multiplier as f64;
    if scaled.is_finite() && scaled >= 0.0 && scaled < u64::MAX as f64 {
        Some(scaled.round() as u64)
    } else {
        None
    }
}

fn unit_multiplier(token: &str) -> Option<u64> {
    layout::SIZE_UNITS
        .iter()
        .find(|(unit, _)| *unit == token)
        .map(|(_, multiplier)| *multiplier)
}

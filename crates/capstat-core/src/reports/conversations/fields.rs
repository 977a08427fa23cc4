//! Aggregation of the per-frame `ip.src,ip.dst,_ws.col.Protocol,frame.len`
//! export.
//!
//! Malformed-row policy: a row without exactly four fields, or with an empty
//! source, destination or protocol, is dropped. A length that does not parse
//! counts as zero; the row still identifies a conversation.

use std::collections::HashMap;

use crate::Conversation;
use crate::reports::Extracted;

use super::layout;

#[derive(Debug, Hash, PartialEq, Eq)]
struct ConversationKey {
    source: String,
    destination: String,
    protocol: String,
}

/// Sum frame lengths per `(source, destination, protocol)`.
///
/// Output is sorted by key so repeated runs produce identical reports.
pub fn aggregate_conversation_fields(text: &str) -> Extracted<Conversation> {
    let mut totals: HashMap<ConversationKey, u64> = HashMap::new();
    let mut dropped = 0;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some((key, length)) => {
                let entry = totals.entry(key).or_default();
                *entry = entry.saturating_add(length);
            }
            None => dropped += 1,
        }
    }

    let mut extracted = Extracted::new();
    extracted.dropped = dropped;
    for conversation in build_conversations(totals) {
        extracted.keep(conversation);
    }
    extracted
}

fn parse_row(line: &str) -> Option<(ConversationKey, u64)> {
    let fields: Vec<&str> = line.split(layout::FIELD_SEPARATOR).collect();
    if fields.len() != layout::FIELD_COUNT {
        return None;
    }

    let source = fields[layout::SOURCE_FIELD].trim();
    let destination = fields[layout::DESTINATION_FIELD].trim();
    let protocol = fields[layout::PROTOCOL_FIELD].trim();
    if source.is_empty() || destination.is_empty() || protocol.is_empty() {
        return None;
    }
    let length = fields[layout::LENGTH_FIELD].trim().parse().unwrap_or(0);

    Some((
        ConversationKey {
            source: source.to_string(),
            destination: destination.to_string(),
            protocol: protocol.to_string(),
        },
        length,
    ))
}

fn build_conversations(totals: HashMap<ConversationKey, u64>) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> = totals
        .into_iter()
        .map(|(key, bytes)| Conversation {
            source: key.source,
            destination: key.destination,
            protocol: Some(key.protocol),
            bytes,
        })
        .collect();

    conversations.sort_by(|a, b| {
        a.source
            .cmp(&b.source)
            .then_with(|| a.destination.cmp(&b.destination))
            .then_with(|| a.protocol.cmp(&b.protocol))
    });
    conversations
}

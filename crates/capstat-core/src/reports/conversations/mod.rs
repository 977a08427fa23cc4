//! Conversation reports.
//!
//! The tool can describe host-pair traffic two ways, and a deployment picks
//! one through [`ConversationStrategy`]:
//! - `table`: the pre-aggregated `-z conv,ip` report, read positionally. The
//!   column layout is tied to the tool version, so pin the tool when relying
//!   on it.
//! - `fields`: a raw per-frame `-T fields` export, aggregated here by
//!   `(source, destination, protocol)`.
//!
//! Both produce [`crate::Conversation`] records with direction bytes summed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod fields;
pub mod layout;
pub mod table;

pub use fields::aggregate_conversation_fields;
pub use table::parse_conversation_table;

use crate::Conversation;
use crate::reports::Extracted;

/// Source of conversation records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStrategy {
    /// Aggregate the per-frame field export.
    #[default]
    Fields,
    /// Read the tool's own conversation table.
    Table,
}

impl ConversationStrategy {
    /// Run the parser matching this strategy over the tool's stdout.
    pub fn parse(self, text: &str) -> Extracted<Conversation> {
        match self {
            ConversationStrategy::Fields => aggregate_conversation_fields(text),
            ConversationStrategy::Table => parse_conversation_table(text),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversationStrategy::Fields => "fields",
            ConversationStrategy::Table => "table",
        }
    }
}

impl fmt::Display for ConversationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "fields" => Ok(ConversationStrategy::Fields),
            "table" => Ok(ConversationStrategy::Table),
            other => Err(format!(
                "unknown conversation strategy '{other}' (expected 'fields' or 'table')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConversationStrategy;

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!(
            "TABLE".parse::<ConversationStrategy>().unwrap(),
            ConversationStrategy::Table
        );
        assert_eq!(
            "fields".parse::<ConversationStrategy>().unwrap(),
            ConversationStrategy::Fields
        );
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let err = "flows".parse::<ConversationStrategy>().unwrap_err();
        assert!(err.contains("unknown conversation strategy"));
    }

    #[test]
    fn strategy_dispatches_to_matching_parser() {
        let fields = "10.0.0.1,10.0.0.2,TCP,100\n";
        let parsed = ConversationStrategy::Fields.parse(fields);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].protocol.as_deref(), Some("TCP"));

        let parsed = ConversationStrategy::Table.parse(fields);
        assert!(parsed.records.is_empty());
    }
}

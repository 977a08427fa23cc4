use std::fmt;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reports::conversations::ConversationStrategy;
use crate::reports::hierarchy::parse_protocol_hierarchy;
use crate::reports::packets::error::PacketDetailError;
use crate::reports::packets::parse_packet_details;
use crate::reports::summary::parse_packet_summary;
use crate::tool::{ToolError, ToolRunner, TsharkQuery};
use crate::{AnalysisReport, PacketRecord};

/// Step of the analysis that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ProtocolHierarchy,
    Conversations,
    PacketSummary,
    PacketDetails,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ProtocolHierarchy => "protocol hierarchy",
            Stage::Conversations => "conversations",
            Stage::PacketSummary => "packet summary",
            Stage::PacketDetails => "packet details",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{stage} failed: {source}")]
    Tool {
        stage: Stage,
        #[source]
        source: ToolError,
    },
    #[error("{stage} failed: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: PacketDetailError,
    },
}

impl AnalysisError {
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisError::Tool { stage, .. } | AnalysisError::Decode { stage, .. } => *stage,
        }
    }
}

/// Which reports to request for a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub conversation_strategy: ConversationStrategy,
    /// Request the protocol hierarchy report; when off, `protocols` is empty.
    pub protocol_hierarchy: bool,
    /// Attach per-packet detail records to the report.
    pub packet_details: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            conversation_strategy: ConversationStrategy::default(),
            protocol_hierarchy: true,
            packet_details: false,
        }
    }
}

/// Run every configured report for `capture` and assemble the summary.
///
/// Tool invocations run one after another. Any failed invocation fails the
/// whole report; row-level problems are handled by the individual parsers.
pub fn analyze_capture<R: ToolRunner + ?Sized>(
    runner: &R,
    capture: &Path,
    config: &AnalyzerConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let protocols = if config.protocol_hierarchy {
        let stdout = run_stage(
            runner,
            Stage::ProtocolHierarchy,
            TsharkQuery::ProtocolHierarchy,
            capture,
        )?;
        let extracted = parse_protocol_hierarchy(&stdout);
        debug!(
            "protocol hierarchy: {} stats, {} lines dropped",
            extracted.records.len(),
            extracted.dropped
        );
        extracted.into_records()
    } else {
        Vec::new()
    };

    let query = match config.conversation_strategy {
        ConversationStrategy::Fields => TsharkQuery::ConversationFields,
        ConversationStrategy::Table => TsharkQuery::ConversationTable,
    };
    let stdout = run_stage(runner, Stage::Conversations, query, capture)?;
    let extracted = config.conversation_strategy.parse(&stdout);
    debug!(
        "conversations ({}): {} records, {} rows dropped",
        config.conversation_strategy,
        extracted.records.len(),
        extracted.dropped
    );
    let conversations = extracted.into_records();

    let stdout = run_stage(
        runner,
        Stage::PacketSummary,
        TsharkQuery::PacketSummary,
        capture,
    )?;
    let packet_summary = parse_packet_summary(&stdout);

    let packets = if config.packet_details {
        Some(extract_packets(runner, capture)?)
    } else {
        None
    };

    Ok(AnalysisReport {
        protocols,
        conversations,
        packet_summary,
        packets,
    })
}

/// Per-packet detail records for `capture`, filtered to IP/TCP/UDP frames.
pub fn extract_packets<R: ToolRunner + ?Sized>(
    runner: &R,
    capture: &Path,
) -> Result<Vec<PacketRecord>, AnalysisError> {
    let stdout = run_stage(
        runner,
        Stage::PacketDetails,
        TsharkQuery::PacketDetails,
        capture,
    )?;
    let packets = parse_packet_details(&stdout).map_err(|source| AnalysisError::Decode {
        stage: Stage::PacketDetails,
        source,
    })?;
    debug!("packet details: {} records", packets.len());
    Ok(packets)
}

fn run_stage<R: ToolRunner + ?Sized>(
    runner: &R,
    stage: Stage,
    query: TsharkQuery,
    capture: &Path,
) -> Result<String, AnalysisError> {
    runner
        .run(&query.args(capture))
        .and_then(|output| output.into_stdout())
        .map_err(|source| AnalysisError::Tool { stage, source })
}

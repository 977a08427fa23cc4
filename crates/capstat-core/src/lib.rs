//! capstat core library for summarising capture files through `tshark`.
//!
//! The crate turns the analysis tool's terminal-oriented reports into typed,
//! aggregated data: a tool runner produces raw output, report parsers
//! (layout/parser, plus a reader where a format needs one) extract records,
//! and the analysis layer assembles one [`AnalysisReport`] per capture.
//! Parsers are pure text-in/records-out; all process I/O lives in `tool`.
//!
//! Invariants:
//! - Parsing the same tool output twice yields equal reports.
//! - Malformed rows never abort a text report; each parser documents whether
//!   it skips, zero-fills or defaults them.
//! - Tool failures always abort the whole report and name the failing stage.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use capstat_core::{AnalyzerConfig, TsharkRunner, analyze_capture};
//!
//! let runner = TsharkRunner::default();
//! let report = analyze_capture(&runner, Path::new("capture.pcapng"), &AnalyzerConfig::default())?;
//! println!("{} packets", report.packet_summary.total_packets);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod filter;
pub mod reports;
mod tool;

pub use analysis::{AnalysisError, AnalyzerConfig, Stage, analyze_capture, extract_packets};
pub use filter::ReportFilter;
pub use reports::Extracted;
pub use reports::conversations::ConversationStrategy;
pub use tool::{ReplayRunner, ToolError, ToolOutput, ToolRunner, TsharkQuery, TsharkRunner};

/// Per-protocol packet and byte counts from the protocol hierarchy report.
///
/// # Examples
/// ```
/// use capstat_core::ProtocolStat;
///
/// let stat = ProtocolStat {
///     protocol: "tcp".to_string(),
///     packets: 120,
///     bytes: 45000,
/// };
/// assert_eq!(stat.protocol, "tcp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolStat {
    /// Protocol layer name as printed by the tool (never empty).
    pub protocol: String,
    /// Frames that carried this layer.
    pub packets: u64,
    /// Bytes of the frames that carried this layer.
    pub bytes: u64,
}

/// Traffic volume between two endpoints.
///
/// # Examples
/// ```
/// use capstat_core::Conversation;
///
/// let conversation = Conversation {
///     source: "10.0.0.1".to_string(),
///     destination: "10.0.0.2".to_string(),
///     protocol: Some("TCP".to_string()),
///     bytes: 150,
/// };
/// assert_eq!(conversation.bytes, 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Source address.
    pub source: String,
    /// Destination address.
    pub destination: String,
    /// Protocol column, only known to the field-aggregation strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Total bytes, both directions summed.
    pub bytes: u64,
}

/// Whole-capture totals.
///
/// # Examples
/// ```
/// use capstat_core::PacketSummary;
///
/// let summary = PacketSummary::default();
/// assert_eq!(summary.total_packets, 0);
/// assert_eq!(summary.total_bytes, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketSummary {
    pub total_packets: u64,
    pub total_bytes: u64,
}

/// Flat per-frame record from the tool's JSON export.
///
/// # Examples
/// ```
/// use capstat_core::PacketRecord;
///
/// let record = PacketRecord {
///     number: 1,
///     time_offset_seconds: 0.0,
///     source_address: "10.0.0.1".to_string(),
///     destination_address: "10.0.0.2".to_string(),
///     source_port: "443".to_string(),
///     destination_port: "51000".to_string(),
///     protocol: "TLSv1.3".to_string(),
///     length: "1514".to_string(),
///     info: "Application Data".to_string(),
/// };
/// assert_eq!(record.number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketRecord {
    /// Tool-assigned frame index (gaps appear when a display filter applies).
    pub number: u64,
    /// Seconds since the first frame of the capture.
    pub time_offset_seconds: f64,
    /// IP source, or the link-layer source when the frame has no IP layer.
    pub source_address: String,
    /// IP destination, or the link-layer destination.
    pub destination_address: String,
    /// TCP or UDP source port; empty when neither is present.
    pub source_port: String,
    /// TCP or UDP destination port; empty when neither is present.
    pub destination_port: String,
    pub protocol: String,
    /// Frame length as printed by the tool.
    pub length: String,
    pub info: String,
}

/// Summary of one capture, ready for JSON serialization.
///
/// # Examples
/// ```
/// use capstat_core::AnalysisReport;
///
/// let report = AnalysisReport::default();
/// let json = serde_json::to_value(&report).unwrap();
/// assert!(json.get("packets").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Protocol stats in the tool's report order.
    pub protocols: Vec<ProtocolStat>,
    /// Conversations from the configured strategy.
    pub conversations: Vec<Conversation>,
    pub packet_summary: PacketSummary,
    /// Per-packet detail, present only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packets: Option<Vec<PacketRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let report = AnalysisReport {
            protocols: vec![ProtocolStat {
                protocol: "eth".to_string(),
                packets: 1,
                bytes: 60,
            }],
            conversations: vec![Conversation {
                source: "10.0.0.1".to_string(),
                destination: "10.0.0.2".to_string(),
                protocol: None,
                bytes: 60,
            }],
            packet_summary: PacketSummary {
                total_packets: 1,
                total_bytes: 60,
            },
            packets: None,
        };

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("packets").is_none());
        assert!(value["conversations"][0].get("protocol").is_none());
        assert_eq!(value["packet_summary"]["total_bytes"], 60);
        assert_eq!(value["protocols"][0]["protocol"], "eth");
    }

    #[test]
    fn report_keeps_packets_and_protocol_when_present() {
        let report = AnalysisReport {
            conversations: vec![Conversation {
                source: "10.0.0.1".to_string(),
                destination: "10.0.0.2".to_string(),
                protocol: Some("UDP".to_string()),
                bytes: 10,
            }],
            packets: Some(Vec::new()),
            ..AnalysisReport::default()
        };

        let value = serde_json::to_value(&report).expect("report json");
        assert_eq!(value["conversations"][0]["protocol"], "UDP");
        assert!(value["packets"].as_array().expect("packets").is_empty());
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = AnalysisReport {
            packet_summary: PacketSummary {
                total_packets: 42,
                total_bytes: 18340,
            },
            ..AnalysisReport::default()
        };
        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: AnalysisReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, report);
    }
}

use crate::{AnalysisReport, Conversation, ProtocolStat};

/// Case-insensitive substring filter over a report's protocol stats and
/// conversations. Totals and packet records are left as they are.
///
/// # Examples
/// ```
/// use capstat_core::{AnalysisReport, ProtocolStat, ReportFilter};
///
/// let report = AnalysisReport {
///     protocols: vec![
///         ProtocolStat { protocol: "tcp".to_string(), packets: 1, bytes: 60 },
///         ProtocolStat { protocol: "udp".to_string(), packets: 1, bytes: 60 },
///     ],
///     ..AnalysisReport::default()
/// };
/// let filtered = ReportFilter::new("TCP").apply(&report);
/// assert_eq!(filtered.protocols.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    needle: String,
}

impl ReportFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// A filtered copy of `report`.
    pub fn apply(&self, report: &AnalysisReport) -> AnalysisReport {
        if self.is_empty() {
            return report.clone();
        }
        AnalysisReport {
            protocols: report
                .protocols
                .iter()
                .filter(|stat| self.matches_protocol(stat))
                .cloned()
                .collect(),
            conversations: report
                .conversations
                .iter()
                .filter(|conversation| self.matches_conversation(conversation))
                .cloned()
                .collect(),
            packet_summary: report.packet_summary,
            packets: report.packets.clone(),
        }
    }

    fn matches_protocol(&self, stat: &ProtocolStat) -> bool {
        self.contains(&stat.protocol)
    }

    fn matches_conversation(&self, conversation: &Conversation) -> bool {
        self.contains(&conversation.source)
            || self.contains(&conversation.destination)
            || conversation
                .protocol
                .as_deref()
                .is_some_and(|protocol| self.contains(protocol))
    }

    fn contains(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::ReportFilter;
    use crate::{AnalysisReport, Conversation, PacketSummary, ProtocolStat};

    fn conversation(source: &str, destination: &str, protocol: Option<&str>) -> Conversation {
        Conversation {
            source: source.to_string(),
            destination: destination.to_string(),
            protocol: protocol.map(str::to_string),
            bytes: 1,
        }
    }

    fn report() -> AnalysisReport {
        AnalysisReport {
            protocols: vec![
                ProtocolStat {
                    protocol: "eth".to_string(),
                    packets: 3,
                    bytes: 300,
                },
                ProtocolStat {
                    protocol: "udp".to_string(),
                    packets: 1,
                    bytes: 100,
                },
            ],
            conversations: vec![
                conversation("10.0.0.1", "10.0.0.2", Some("TCP")),
                conversation("192.168.1.1", "10.0.0.9", Some("UDP")),
                conversation("192.168.1.2", "8.8.8.8", None),
            ],
            packet_summary: PacketSummary {
                total_packets: 3,
                total_bytes: 300,
            },
            packets: None,
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let report = report();
        assert_eq!(ReportFilter::new("  ").apply(&report), report);
    }

    #[test]
    fn matches_protocol_case_insensitively() {
        let filtered = ReportFilter::new("UdP").apply(&report());
        assert_eq!(filtered.protocols.len(), 1);
        assert_eq!(filtered.protocols[0].protocol, "udp");
        assert_eq!(filtered.conversations.len(), 1);
        assert_eq!(filtered.conversations[0].source, "192.168.1.1");
    }

    #[test]
    fn matches_either_endpoint() {
        let filtered = ReportFilter::new("192.168.1").apply(&report());
        assert!(filtered.protocols.is_empty());
        assert_eq!(filtered.conversations.len(), 2);

        let filtered = ReportFilter::new("10.0.0.9").apply(&report());
        assert_eq!(filtered.conversations.len(), 1);
    }

    #[test]
    fn totals_are_untouched() {
        let filtered = ReportFilter::new("nothing-matches").apply(&report());
        assert!(filtered.protocols.is_empty());
        assert!(filtered.conversations.is_empty());
        assert_eq!(filtered.packet_summary.total_packets, 3);
    }
}

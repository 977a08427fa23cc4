use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use super::{ToolError, ToolOutput, ToolRunner};

const DEFAULT_PROGRAM: &str = "tshark";
const PACKET_DETAIL_FILTER: &str = "ip || tcp || udp";
const CONVERSATION_FIELDS: [&str; 4] = ["ip.src", "ip.dst", "_ws.col.Protocol", "frame.len"];

/// Report requested from the tool for one capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsharkQuery {
    ProtocolHierarchy,
    ConversationTable,
    ConversationFields,
    PacketSummary,
    PacketDetails,
}

impl TsharkQuery {
    /// Full argument list, including `-r <capture>`.
    pub fn args(self, capture: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-r".into(), capture.as_os_str().to_owned()];
        let tail: Vec<String> = match self {
            TsharkQuery::ProtocolHierarchy => statistics("io,phs"),
            TsharkQuery::ConversationTable => statistics("conv,ip"),
            TsharkQuery::PacketSummary => statistics("io,stat,0"),
            TsharkQuery::ConversationFields => {
                let mut tail = vec!["-T".to_string(), "fields".to_string()];
                for field in CONVERSATION_FIELDS {
                    tail.push("-e".to_string());
                    tail.push(field.to_string());
                }
                tail.extend(
                    ["-E", "separator=,", "-E", "occurrence=f"]
                        .into_iter()
                        .map(String::from),
                );
                tail
            }
            TsharkQuery::PacketDetails => vec![
                "-T".to_string(),
                "json".to_string(),
                "-Y".to_string(),
                PACKET_DETAIL_FILTER.to_string(),
            ],
        };
        args.extend(tail.into_iter().map(OsString::from));
        args
    }
}

fn statistics(spec: &str) -> Vec<String> {
    vec!["-q".to_string(), "-z".to_string(), spec.to_string()]
}

/// Runs the `tshark` binary synchronously and captures its output.
#[derive(Debug, Clone)]
pub struct TsharkRunner {
    program: PathBuf,
}

impl TsharkRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for TsharkRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ToolRunner for TsharkRunner {
    fn run(&self, args: &[OsString]) -> Result<ToolOutput, ToolError> {
        debug!("running {} {:?}", self.program.display(), args);
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        debug!(
            "{} exited with {:?} ({} bytes stdout)",
            self.program.display(),
            output.status.code(),
            output.stdout.len()
        );

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;

    use super::{TsharkQuery, TsharkRunner};
    use crate::tool::{ToolError, ToolRunner};

    fn args(query: TsharkQuery) -> Vec<String> {
        query
            .args(Path::new("capture.pcapng"))
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn statistics_queries_read_capture_quietly() {
        assert_eq!(
            args(TsharkQuery::ProtocolHierarchy),
            vec!["-r", "capture.pcapng", "-q", "-z", "io,phs"]
        );
        assert_eq!(
            args(TsharkQuery::ConversationTable),
            vec!["-r", "capture.pcapng", "-q", "-z", "conv,ip"]
        );
        assert_eq!(
            args(TsharkQuery::PacketSummary),
            vec!["-r", "capture.pcapng", "-q", "-z", "io,stat,0"]
        );
    }

    #[test]
    fn field_export_requests_four_first_occurrence_fields() {
        assert_eq!(
            args(TsharkQuery::ConversationFields),
            vec![
                "-r",
                "capture.pcapng",
                "-T",
                "fields",
                "-e",
                "ip.src",
                "-e",
                "ip.dst",
                "-e",
                "_ws.col.Protocol",
                "-e",
                "frame.len",
                "-E",
                "separator=,",
                "-E",
                "occurrence=f",
            ]
        );
    }

    #[test]
    fn packet_details_filter_ip_tcp_udp() {
        assert_eq!(
            args(TsharkQuery::PacketDetails),
            vec!["-r", "capture.pcapng", "-T", "json", "-Y", "ip || tcp || udp"]
        );
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let runner = TsharkRunner::new("/nonexistent/capstat-tshark");
        let err = runner.run(&[OsString::from("-v")]).unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
        assert!(err.to_string().contains("failed to launch"));
    }

    #[test]
    fn default_program_is_tshark() {
        assert_eq!(TsharkRunner::default().program(), Path::new("tshark"));
    }
}

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{ToolError, ToolOutput, ToolRunner, TsharkQuery};

const QUERIES: [TsharkQuery; 5] = [
    TsharkQuery::ProtocolHierarchy,
    TsharkQuery::ConversationTable,
    TsharkQuery::ConversationFields,
    TsharkQuery::PacketSummary,
    TsharkQuery::PacketDetails,
];

/// Serves previously recorded tool output from a directory, one file per
/// report (`phs.txt`, `conv_ip.txt`, `fields.csv`, `io_stat.txt`,
/// `packets.json`). A missing file is replayed as a failed run.
#[derive(Debug, Clone)]
pub struct ReplayRunner {
    dir: PathBuf,
}

impl ReplayRunner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn recording_name(query: TsharkQuery) -> &'static str {
        match query {
            TsharkQuery::ProtocolHierarchy => "phs.txt",
            TsharkQuery::ConversationTable => "conv_ip.txt",
            TsharkQuery::ConversationFields => "fields.csv",
            TsharkQuery::PacketSummary => "io_stat.txt",
            TsharkQuery::PacketDetails => "packets.json",
        }
    }
}

impl ToolRunner for ReplayRunner {
    fn run(&self, args: &[OsString]) -> Result<ToolOutput, ToolError> {
        let Some(query) = identify(args) else {
            return Ok(failed(format!("no recording for arguments {args:?}")));
        };
        let path = self.dir.join(Self::recording_name(query));
        debug!("replaying {:?} from {}", query, path.display());
        match fs::read_to_string(&path) {
            Ok(stdout) => Ok(ToolOutput {
                exit_code: Some(0),
                stdout,
                stderr: String::new(),
            }),
            Err(err) => Ok(failed(format!("{}: {err}", path.display()))),
        }
    }
}

/// Matches everything after `-r <capture>` against the known queries.
fn identify(args: &[OsString]) -> Option<TsharkQuery> {
    let tail = args.get(2..)?;
    QUERIES
        .into_iter()
        .find(|query| query.args(Path::new("")).get(2..) == Some(tail))
}

fn failed(stderr: String) -> ToolOutput {
    ToolOutput {
        exit_code: Some(1),
        stdout: String::new(),
        stderr,
    }
}

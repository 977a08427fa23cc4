pub const LAYERS_POINTER: &str = "/_source/layers";

pub const FRAME_NUMBER: &str = "frame.number";
pub const FRAME_TIME_RELATIVE: &str = "frame.time_relative";
pub const FRAME_LEN: &str = "frame.len";

/// Preferred field first; later entries are fallbacks.
pub const SOURCE_ADDRESS: &[&str] = &["ip.src", "eth.src"];
pub const DESTINATION_ADDRESS: &[&str] = &["ip.dst", "eth.dst"];
pub const SOURCE_PORT: &[&str] = &["tcp.srcport", "udp.srcport"];
pub const DESTINATION_PORT: &[&str] = &["tcp.dstport", "udp.dstport"];

pub const PROTOCOL_COLUMN: &str = "_ws.col.Protocol";
pub const INFO_COLUMN: &str = "_ws.col.Info";

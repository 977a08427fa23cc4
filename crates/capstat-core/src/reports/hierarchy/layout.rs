pub const SECTION_HEADER: &str = "Protocol Hierarchy Statistics";

pub const PROTOCOL_TOKEN: usize = 0;
pub const FRAMES_TOKEN: usize = 1;
pub const BYTES_TOKEN: usize = 2;
pub const MIN_TOKENS: usize = 3;

pub const LABEL_SEPARATOR: char = ':';

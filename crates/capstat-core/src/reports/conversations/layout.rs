// `-z conv,ip` table
pub const TABLE_SECTION_HEADER: &str = "IPv4 Conversations";
pub const PAIR_TOKEN: &str = "<->";
/// Right-half token positions; token 0 is the destination address.
pub const DESTINATION_TOKEN: usize = 0;
pub const BYTES_TO_DESTINATION_TOKEN: usize = 2;
pub const BYTES_FROM_DESTINATION_TOKEN: usize = 5;
pub const DIGIT_GROUP_SEPARATOR: char = ',';

/// Size units printed after a byte count, with decimal and binary multipliers.
pub const SIZE_UNITS: &[(&str, u64)] = &[
    ("bytes", 1),
    ("B", 1),
    ("kB", 1_000),
    ("MB", 1_000_000),
    ("GB", 1_000_000_000),
    ("KiB", 1 << 10),
    ("MiB", 1 << 20),
    ("GiB", 1 << 30),
];

// `-T fields` export: ip.src, ip.dst, _ws.col.Protocol, frame.len
pub const FIELD_SEPARATOR: char = ',';
pub const FIELD_COUNT: usize = 4;
pub const SOURCE_FIELD: usize = 0;
pub const DESTINATION_FIELD: usize = 1;
pub const PROTOCOL_FIELD: usize = 2;
pub const LENGTH_FIELD: usize = 3;

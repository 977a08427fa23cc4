pub const ROW_PREFIX: char = '|';
pub const CELL_SEPARATOR: char = '|';

/// Both labels appear on the column header row.
pub const FRAMES_LABEL: &str = "Frames";
pub const BYTES_LABEL: &str = "Bytes";

/// First cell (counting the empty cell before the leading pipe) that may
/// hold the frame count.
pub const FIRST_COUNT_CELL: usize = 2;

use log::warn;

use crate::PacketSummary;

use super::layout;

/// Parse total packets and bytes from the statistics table.
///
/// Only rows after the column header are candidates; the first one holding
/// two adjacent integer cells from cell 2 onwards wins. The interval cell is
/// never an integer, which lets the same rule read both the single-cell
/// interval layout (`| 0.0 <> 12.3 | 42 | 18340 |`) and the split one
/// (`| 0.0 | 200.0000 | 42 | 18340 |`).
pub fn parse_packet_summary(text: &str) -> PacketSummary {
    let mut rows = text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(layout::ROW_PREFIX));

    if !rows.by_ref().any(is_header_row) {
        warn!("statistics table header not found; reporting zero totals");
        return PacketSummary::default();
    }

    match rows.find_map(parse_row) {
        Some(summary) => summary,
        None => {
            warn!("no aggregate row in statistics table; reporting zero totals");
            PacketSummary::default()
        }
    }
}

fn is_header_row(line: &str) -> bool {
    line.contains(layout::FRAMES_LABEL) && line.contains(layout::BYTES_LABEL)
}

fn parse_row(line: &str) -> Option<PacketSummary> {
    let cells: Vec<Option<u64>> = line
        .split(layout::CELL_SEPARATOR)
        .skip(layout::FIRST_COUNT_CELL)
        .map(|cell| cell.trim().parse().ok())
        .collect();

    cells.windows(2).find_map(|pair| match pair {
        [Some(total_packets), Some(total_bytes)] => Some(PacketSummary {
            total_packets: *total_packets,
            total_bytes: *total_bytes,
        }),
        _ => None,
    })
}

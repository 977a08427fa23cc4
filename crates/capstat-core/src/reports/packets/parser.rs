use serde_json::Value;

use crate::PacketRecord;

use super::error::PacketDetailError;
use super::layout;
use super::reader::LayerReader;

/// Decode the JSON packet export into one record per array element.
pub fn parse_packet_details(text: &str) -> Result<Vec<PacketRecord>, PacketDetailError> {
    let packets: Vec<Value> = serde_json::from_str(text)?;
    Ok(packets.iter().map(parse_packet).collect())
}

fn parse_packet(packet: &Value) -> PacketRecord {
    let reader = LayerReader::new(packet);
    PacketRecord {
        number: reader.parse_or(layout::FRAME_NUMBER, 0),
        time_offset_seconds: time_offset(&reader),
        source_address: reader.text_or_empty(layout::SOURCE_ADDRESS),
        destination_address: reader.text_or_empty(layout::DESTINATION_ADDRESS),
        source_port: reader.text_or_empty(layout::SOURCE_PORT),
        destination_port: reader.text_or_empty(layout::DESTINATION_PORT),
        protocol: reader.text_or_empty(&[layout::PROTOCOL_COLUMN]),
        length: reader.text_or_empty(&[layout::FRAME_LEN]),
        info: reader.text_or_empty(&[layout::INFO_COLUMN]),
    }
}

/// Seconds since the first frame; anything but a finite non-negative value
/// reads as 0.
fn time_offset(reader: &LayerReader<'_>) -> f64 {
    let seconds: f64 = reader.parse_or(layout::FRAME_TIME_RELATIVE, 0.0);
    if seconds.is_finite() && seconds >= 0.0 {
        seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::parse_packet_details;
    use crate::PacketRecord;
    use crate::reports::packets::error::PacketDetailError;

    #[test]
    fn parses_flat_packet() {
        let text = r#"[{"_source": {"layers": {
            "frame.number": ["3"],
            "frame.time_relative": ["0.250000000"],
            "ip.src": ["10.0.0.1"],
            "ip.dst": ["10.0.0.2"],
            "tcp.srcport": ["443"],
            "tcp.dstport": ["51000"],
            "_ws.col.Protocol": ["TLSv1.3"],
            "frame.len": ["1514"],
            "_ws.col.Info": ["Application Data"]
        }}}]"#;
        let packets = parse_packet_details(text).unwrap();
        assert_eq!(packets.len(), 1);
        let packet = &packets[0];
        assert_eq!(packet.number, 3);
        assert_eq!(packet.time_offset_seconds, 0.25);
        assert_eq!(packet.source_address, "10.0.0.1");
        assert_eq!(packet.destination_address, "10.0.0.2");
        assert_eq!(packet.source_port, "443");
        assert_eq!(packet.destination_port, "51000");
        assert_eq!(packet.protocol, "TLSv1.3");
        assert_eq!(packet.length, "1514");
        assert_eq!(packet.info, "Application Data");
    }

    #[test]
    fn falls_back_to_link_layer_addresses() {
        let text = r#"[{"_source": {"layers": {
            "eth.src": ["aa:bb:cc:dd:ee:ff"],
            "eth.dst": ["ff:ff:ff:ff:ff:ff"]
        }}}]"#;
        let packet = &parse_packet_details(text).unwrap()[0];
        assert_eq!(packet.source_address, "aa:bb:cc:dd:ee:ff");
        assert_eq!(packet.destination_address, "ff:ff:ff:ff:ff:ff");
        assert_eq!(packet.source_port, "");
        assert_eq!(packet.destination_port, "");
    }

    #[test]
    fn prefers_tcp_ports_then_udp() {
        let text = r#"[
            {"_source": {"layers": {
                "tcp.srcport": ["80"], "udp.srcport": ["53"],
                "tcp.dstport": ["8080"], "udp.dstport": ["5353"]
            }}},
            {"_source": {"layers": {"udp.srcport": ["53"], "udp.dstport": ["5353"]}}}
        ]"#;
        let packets = parse_packet_details(text).unwrap();
        assert_eq!(packets[0].source_port, "80");
        assert_eq!(packets[0].destination_port, "8080");
        assert_eq!(packets[1].source_port, "53");
        assert_eq!(packets[1].destination_port, "5353");
    }

    #[test]
    fn every_element_yields_a_record() {
        let text = r#"[{}, {"_source": {}}, 5, {"_source": {"layers": {"frame.number": ["9"]}}}]"#;
        let packets = parse_packet_details(text).unwrap();
        assert_eq!(packets.len(), 4);
        assert_eq!(packets[0].number, 0);
        assert_eq!(packets[0].time_offset_seconds, 0.0);
        assert_eq!(packets[0].info, "");
        assert_eq!(packets[3].number, 9);
    }

    #[test]
    fn invalid_time_offsets_fall_back_to_zero() {
        let text = r#"[
            {"_source": {"layers": {"frame.time_relative": ["-1.5"]}}},
            {"_source": {"layers": {"frame.time_relative": ["NaN"]}}},
            {"_source": {"layers": {"frame.time_relative": ["inf"]}}},
            {"_source": {"layers": {"frame.time_relative": ["1.5"]}}}
        ]"#;
        let packets = parse_packet_details(text).unwrap();
        let offsets: Vec<f64> = packets.iter().map(|p| p.time_offset_seconds).collect();
        assert_eq!(offsets, vec![0.0, 0.0, 0.0, 1.5]);

        let json = serde_json::to_string(&packets).unwrap();
        assert!(!json.contains("null"));
        let parsed: Vec<PacketRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, packets);
    }

    #[test]
    fn empty_array_yields_no_records() {
        assert!(parse_packet_details("[]").unwrap().is_empty());
    }

    #[test]
    fn non_json_fails() {
        let err = parse_packet_details("tshark: oops").unwrap_err();
        assert!(matches!(err, PacketDetailError::Decode(_)));
    }

    #[test]
    fn non_array_fails() {
        assert!(parse_packet_details(r#"{"_source": {}}"#).is_err());
    }
}

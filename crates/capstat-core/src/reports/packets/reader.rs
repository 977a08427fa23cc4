use std::collections::VecDeque;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::layout;

/// Field access over one packet's `_source.layers`.
pub struct LayerReader<'a> {
    layers: Option<&'a Map<String, Value>>,
}

impl<'a> LayerReader<'a> {
    pub fn new(packet: &'a Value) -> Self {
        Self {
            layers: packet
                .pointer(layout::LAYERS_POINTER)
                .and_then(Value::as_object),
        }
    }

    /// First value of `name`, looked up flat first and then breadth-first
    /// through nested layer objects, so an outer header wins over one
    /// embedded deeper (e.g. the quoted IP header inside ICMP errors).
    pub fn field(&self, name: &str) -> Option<&'a str> {
        let layers = self.layers?;
        if let Some(value) = layers.get(name) {
            return first_string(value);
        }

        let mut queue: VecDeque<&'a Map<String, Value>> =
            layers.values().filter_map(Value::as_object).collect();
        while let Some(object) = queue.pop_front() {
            if let Some(value) = object.get(name).and_then(first_string) {
                return Some(value);
            }
            queue.extend(object.values().filter_map(Value::as_object));
        }
        None
    }

    /// First present field among `names`, or an empty string.
    pub fn text_or_empty(&self, names: &[&str]) -> String {
        names
            .iter()
            .find_map(|name| self.field(name))
            .unwrap_or_default()
            .to_string()
    }

    pub fn parse_or<T: FromStr>(&self, name: &str, default: T) -> T {
        self.field(name)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }
}

fn first_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => Some(text),
        Value::Array(items) => items.first().and_then(Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::LayerReader;
    use serde_json::json;

    #[test]
    fn reads_flat_single_element_arrays() {
        let packet = json!({"_source": {"layers": {"ip.src": ["10.0.0.1"]}}});
        let reader = LayerReader::new(&packet);
        assert_eq!(reader.field("ip.src"), Some("10.0.0.1"));
        assert_eq!(reader.field("ip.dst"), None);
    }

    #[test]
    fn reads_nested_layer_objects() {
        let packet = json!({"_source": {"layers": {
            "frame": {"frame.number": "7"},
            "ip": {"ip.src": "10.0.0.1"}
        }}});
        let reader = LayerReader::new(&packet);
        assert_eq!(reader.field("ip.src"), Some("10.0.0.1"));
        assert_eq!(reader.parse_or("frame.number", 0u64), 7);
    }

    #[test]
    fn outer_layer_wins_over_embedded_header() {
        let packet = json!({"_source": {"layers": {
            "icmp": {"ip": {"ip.src": "192.0.2.9"}},
            "ip": {"ip.src": "10.0.0.1"}
        }}});
        let reader = LayerReader::new(&packet);
        assert_eq!(reader.field("ip.src"), Some("10.0.0.1"));
    }

    #[test]
    fn missing_layers_default() {
        let packet = json!({"_index": "packets"});
        let reader = LayerReader::new(&packet);
        assert_eq!(reader.text_or_empty(&["ip.src", "eth.src"]), "");
        assert_eq!(reader.parse_or("frame.time_relative", 0.0f64), 0.0);
    }

    #[test]
    fn unparseable_numbers_default() {
        let packet = json!({"_source": {"layers": {"frame.number": ["x"]}}});
        let reader = LayerReader::new(&packet);
        assert_eq!(reader.parse_or("frame.number", 0u64), 0);
    }
}

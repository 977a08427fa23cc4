use thiserror::Error;

/// Errors returned by packet detail decoding.
///
/// # Examples
/// ```
/// use capstat_core::reports::packets::parse_packet_details;
///
/// let err = parse_packet_details("not json").unwrap_err();
/// assert!(err.to_string().contains("JSON decode error"));
/// ```
#[derive(Debug, Error)]
pub enum PacketDetailError {
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

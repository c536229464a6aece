//! Framing and message classification for the shell bridge.
//!
//! Messages travel as `Content-Length: N\r\n\r\n` followed by N bytes of
//! JSON, in both directions.

use super::error::{BridgeError, Result};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Classification of an incoming JSON-RPC message.
#[derive(Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// A response to a request we sent (has `id`, no `method`).
    Response,
    /// A request from the shell (has `id` + `method`). The core serves none.
    IncomingRequest { id: u64 },
    /// A notification (has `method`, no `id`), e.g. `bridge.log`.
    Notification,
}

/// Classify a JSON-RPC message by inspecting `id` and `method` fields.
pub fn classify_message(json: &serde_json::Value) -> MessageKind {
    let has_id = json.get("id").and_then(|v| v.as_u64());
    let has_method = json.get("method").and_then(|v| v.as_str());

    match (has_id, has_method) {
        (Some(id), Some(_)) => MessageKind::IncomingRequest { id },
        (Some(_), None) => MessageKind::Response,
        _ => MessageKind::Notification,
    }
}

/// Serialize `message` into one frame
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>> {
    let body = serde_json::to_vec(message)?;
    let mut frame = format!("Content-Length: {}\r\n\r\n", body.len()).into_bytes();
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Read the next frame body.
///
/// Blank lines before the header and unknown headers are skipped.
/// End of stream gives [`BridgeError::TransportClosed`].
pub async fn read_frame<R>(reader: &mut R, line: &mut String) -> Result<Vec<u8>>
where
    R: AsyncBufRead + Unpin,
{
    let content_length = read_content_length(reader, line).await?;

    // Skip remaining headers up to the blank separator
    loop {
        line.clear();
        if reader.read_line(line).await? == 0 {
            return Err(BridgeError::TransportClosed);
        }
        if line.trim().is_empty() {
            break;
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;
    Ok(body)
}

async fn read_content_length<R>(reader: &mut R, line: &mut String) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        line.clear();
        let bytes_read = reader.read_line(line).await?;
        if bytes_read == 0 {
            return Err(BridgeError::TransportClosed);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(len_str) = trimmed.strip_prefix("Content-Length:")
            && let Ok(len) = len_str.trim().parse::<usize>()
        {
            return Ok(len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[test]
    fn classify_response() {
        let json = serde_json::json!({"id": 1, "result": true});
        assert_eq!(classify_message(&json), MessageKind::Response);
    }

    #[test]
    fn classify_incoming_request() {
        let json = serde_json::json!({"id": 3, "method": "core.ping"});
        assert_eq!(
            classify_message(&json),
            MessageKind::IncomingRequest { id: 3 }
        );
    }

    #[test]
    fn classify_notification() {
        let json = serde_json::json!({"method": "bridge.log", "params": {}});
        assert_eq!(classify_message(&json), MessageKind::Notification);
    }

    #[tokio::test]
    async fn read_frame_skips_noise_and_extra_headers() {
        let input = "\r\nContent-Length: 14\r\nContent-Type: application/json\r\n\r\n{\"id\":1,\"a\":2}";
        let mut reader = BufReader::new(input.as_bytes());
        let mut line = String::new();

        let body = read_frame(&mut reader, &mut line).await.unwrap();
        assert_eq!(body, b"{\"id\":1,\"a\":2}");
        assert!(matches!(
            read_frame(&mut reader, &mut line).await,
            Err(BridgeError::TransportClosed)
        ));
    }

    #[tokio::test]
    async fn encoded_frame_is_readable() {
        let frame = encode_frame(&serde_json::json!({"method": "page.closed"})).unwrap();
        assert!(frame.starts_with(b"Content-Length: 24\r\n\r\n"));

        let mut reader = BufReader::new(frame.as_slice());
        let mut line = String::new();
        let body = read_frame(&mut reader, &mut line).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["method"], "page.closed");
    }
}

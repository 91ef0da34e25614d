//! Engine.IO v4 / Socket.IO v5 frame codec for the WebSocket transport.
//!
//! Only the subset the harness backend uses is modelled: text frames, the
//! default namespace, and JSON events. Binary packets are rejected as
//! protocol errors.
//!
//! ```text
//! 0{"sid":..,"pingInterval":25000,"pingTimeout":20000}   engine open
//! 2 / 3                                                   ping / pong
//! 40  40{"sid":..}                                        namespace connect
//! 42["message",{...}]                                     event
//! 44{"message":"unauthorized"}                            connect error
//! 41 / 1                                                  disconnect / close
//! ```

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use lnviz_core::prelude::*;

/// Engine.IO handshake sent by the server in the `open` packet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between server pings
    pub ping_interval: u64,
    /// Milliseconds the server waits for a pong
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

impl Handshake {
    /// Silence after which the session is considered lost
    pub fn liveness_deadline(&self) -> Duration {
        Duration::from_millis(self.ping_interval + self.ping_timeout)
    }
}

/// Socket.IO packet carried inside an Engine.IO `message`
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect(Option<Value>),
    Disconnect,
    Event {
        name: String,
        /// First argument after the event name, `Null` when absent
        payload: Value,
        ack_id: Option<u64>,
    },
    Ack,
    ConnectError(Value),
}

/// One decoded WebSocket text frame
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Socket(SocketPacket),
    Noop,
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub const PONG: &str = "3";
pub const CONNECT: &str = "40";
pub const DISCONNECT: &str = "41";

/// `42["name",payload]`
pub fn encode_event(name: &str, payload: &Value) -> Result<String> {
    let body = serde_json::to_string(&(name, payload))?;
    Ok(format!("42{body}"))
}

/// Empty acknowledgement for an event that carried an ack id
pub fn encode_ack(ack_id: u64) -> String {
    format!("43{ack_id}[]")
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode one text frame
pub fn decode(text: &str) -> Result<Frame> {
    let mut chars = text.chars();
    let kind = chars
        .next()
        .ok_or_else(|| Error::protocol("empty engine packet"))?;
    let rest = chars.as_str();

    match kind {
        '0' => {
            let handshake: Handshake = serde_json::from_str(rest)
                .map_err(|e| Error::protocol(format!("bad open packet: {e}")))?;
            Ok(Frame::Open(handshake))
        }
        '1' => Ok(Frame::Close),
        '2' => Ok(Frame::Ping),
        '3' => Ok(Frame::Pong),
        '4' => decode_socket(rest).map(Frame::Socket),
        '6' => Ok(Frame::Noop),
        other => Err(Error::protocol(format!(
            "unsupported engine packet type '{other}'"
        ))),
    }
}

fn decode_socket(text: &str) -> Result<SocketPacket> {
    let mut chars = text.chars();
    let kind = chars
        .next()
        .ok_or_else(|| Error::protocol("empty socket packet"))?;
    let rest = skip_namespace(chars.as_str());

    match kind {
        '0' => {
            if rest.is_empty() {
                Ok(SocketPacket::Connect(None))
            } else {
                Ok(SocketPacket::Connect(Some(serde_json::from_str(rest)?)))
            }
        }
        '1' => Ok(SocketPacket::Disconnect),
        '2' => decode_event(rest),
        '3' => Ok(SocketPacket::Ack),
        '4' => {
            let payload = if rest.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(rest)?
            };
            Ok(SocketPacket::ConnectError(payload))
        }
        '5' | '6' => Err(Error::protocol("binary packets are not supported")),
        other => Err(Error::protocol(format!(
            "unsupported socket packet type '{other}'"
        ))),
    }
}

/// Strip a leading `/nsp,` if present. Only the default namespace is used.
fn skip_namespace(text: &str) -> &str {
    if text.starts_with('/') {
        match text.find(',') {
            Some(idx) => &text[idx + 1..],
            None => "",
        }
    } else {
        text
    }
}

fn decode_event(text: &str) -> Result<SocketPacket> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    let (id_part, body) = text.split_at(digits);
    let ack_id = if id_part.is_empty() {
        None
    } else {
        id_part.parse().ok()
    };

    let args: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| Error::protocol(format!("bad event body: {e}")))?;
    let mut args = args.into_iter();

    let name = match args.next() {
        Some(Value::String(name)) => name,
        _ => return Err(Error::protocol("event without a name")),
    };
    let payload = args.next().unwrap_or(Value::Null);

    Ok(SocketPacket::Event {
        name,
        payload,
        ack_id,
    })
}

/// WebSocket endpoint for a harness base URL.
///
/// `http://host:5000` becomes
/// `ws://host:5000/socket.io/?EIO=4&transport=websocket`.
pub fn socket_url(base_url: &str) -> Result<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(Error::InvalidUrl(format!(
                "{base_url}: unsupported scheme '{other}'"
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| Error::InvalidUrl(base_url.to_string()))?;

    let path = format!("{}/socket.io/", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(Some("EIO=4&transport=websocket"));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_open() {
        let frame = decode(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#)
            .unwrap();

        let Frame::Open(hs) = frame else {
            panic!("expected open, got {frame:?}");
        };
        assert_eq!(hs.sid, "abc");
        assert_eq!(hs.liveness_deadline(), Duration::from_millis(45_000));
    }

    #[test]
    fn test_decode_ping_and_close() {
        assert_eq!(decode("2").unwrap(), Frame::Ping);
        assert_eq!(decode("1").unwrap(), Frame::Close);
        assert_eq!(decode("6").unwrap(), Frame::Noop);
    }

    #[test]
    fn test_decode_connect_ack() {
        let frame = decode(r#"40{"sid":"xyz"}"#).unwrap();
        assert_eq!(
            frame,
            Frame::Socket(SocketPacket::Connect(Some(json!({"sid": "xyz"}))))
        );
        assert_eq!(
            decode("40").unwrap(),
            Frame::Socket(SocketPacket::Connect(None))
        );
    }

    #[test]
    fn test_decode_event() {
        let frame = decode(r#"42["message",{"event":"Connect","direction":"out"}]"#).unwrap();
        assert_eq!(
            frame,
            Frame::Socket(SocketPacket::Event {
                name: "message".into(),
                payload: json!({"event": "Connect", "direction": "out"}),
                ack_id: None,
            })
        );
    }

    #[test]
    fn test_decode_event_with_ack_id_and_namespace() {
        let frame = decode(r#"42/admin,7["error",{"error":"boom"}]"#).unwrap();
        assert_eq!(
            frame,
            Frame::Socket(SocketPacket::Event {
                name: "error".into(),
                payload: json!({"error": "boom"}),
                ack_id: Some(7),
            })
        );
    }

    #[test]
    fn test_decode_event_without_payload() {
        let frame = decode(r#"42["sequence_complete"]"#).unwrap();
        assert!(matches!(
            frame,
            Frame::Socket(SocketPacket::Event { ref name, payload: Value::Null, .. }) if name == "sequence_complete"
        ));
    }

    #[test]
    fn test_decode_connect_error() {
        let frame = decode(r#"44{"message":"not allowed"}"#).unwrap();
        assert_eq!(
            frame,
            Frame::Socket(SocketPacket::ConnectError(json!({"message": "not allowed"})))
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("").is_err());
        assert!(decode("9").is_err());
        assert!(decode("42not json").is_err());
        assert!(decode("42[1,2]").is_err());
        assert!(decode("45-[\"x\"]").is_err());
    }

    #[test]
    fn test_encode_event() {
        let text = encode_event("message", &json!({"a": 1})).unwrap();
        assert_eq!(text, r#"42["message",{"a":1}]"#);
        assert_eq!(encode_ack(12), "4312[]");
    }

    #[test]
    fn test_socket_url() {
        let url = socket_url("http://localhost:5000").unwrap();
        assert_eq!(
            url.as_str(),
            "ws://localhost:5000/socket.io/?EIO=4&transport=websocket"
        );

        let url = socket_url("https://harness.example/api/").unwrap();
        assert_eq!(
            url.as_str(),
            "wss://harness.example/api/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_socket_url_rejects_bad_input() {
        assert!(matches!(socket_url("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(
            socket_url("ftp://host"),
            Err(Error::InvalidUrl(_))
        ));
    }
}

//! REST calls against the harness backend

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use lnviz_core::prelude::*;
use lnviz_core::MessageEvent;

/// Reply to `POST /connect`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectResponse {
    pub status: String,
    pub sequence_id: String,
    pub node_id: String,
    pub steps_completed: u32,
}

/// Reply to `POST /rawmsg`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMessageResponse {
    pub status: String,
    pub message_type: String,
    #[serde(default)]
    pub content: Value,
}

/// Reply to `GET /node-info`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub active_connections: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeInfo {
    pub fn has_connections(&self) -> bool {
        self.active_connections > 0
    }
}

/// Reply to `GET /messages`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagesResponse {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub messages: Vec<MessageEvent>,
}

/// Keep the history entries that parse. One bad entry must not fail the
/// whole poll.
fn skip_malformed<'de, D>(deserializer: D) -> std::result::Result<Vec<MessageEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping malformed history entry {}: {}", index, e);
                None
            }
        })
        .collect())
}

#[derive(Serialize)]
struct ConnectRequest<'a> {
    node_id: &'a str,
}

#[derive(Serialize)]
struct RawMessageRequest<'a> {
    #[serde(rename = "type")]
    msg_type: &'a str,
    content: &'a Value,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Thin JSON client for the four backend endpoints
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /connect {node_id}`
    pub async fn connect_sequence(&self, node_id: &str) -> Result<ConnectResponse> {
        let request = self
            .http
            .post(self.endpoint("/connect"))
            .json(&ConnectRequest { node_id });
        self.send(request).await
    }

    /// `POST /rawmsg {type, content}`
    pub async fn raw_message(&self, msg_type: &str, content: &Value) -> Result<RawMessageResponse> {
        let request = self
            .http
            .post(self.endpoint("/rawmsg"))
            .json(&RawMessageRequest { msg_type, content });
        self.send(request).await
    }

    /// `GET /node-info`
    pub async fn node_info(&self) -> Result<NodeInfo> {
        self.send(self.http.get(self.endpoint("/node-info"))).await
    }

    /// `GET /messages`
    pub async fn messages(&self) -> Result<MessagesResponse> {
        self.send(self.http.get(self.endpoint("/messages"))).await
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::http(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| status.to_string());
            return Err(Error::backend(status.as_u16(), message));
        }

        serde_json::from_slice(&body)
            .map_err(|e| Error::http(format!("unexpected response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> RestClient {
        RestClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_connect_sequence_posts_node_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/connect"))
            .and(body_json(json!({"node_id": "03"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "sequence_id": "seq_03_1700000000",
                "node_id": "03",
                "steps_completed": 7
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client(&server).connect_sequence("03").await.unwrap();

        assert_eq!(reply.steps_completed, 7);
        assert_eq!(reply.sequence_id, "seq_03_1700000000");
    }

    #[tokio::test]
    async fn test_raw_message_sends_type_and_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rawmsg"))
            .and(body_json(json!({
                "type": "ping",
                "content": {"num_pong_bytes": 1, "ignored": "00"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "sent",
                "message_type": "ping",
                "content": {"num_pong_bytes": 1, "ignored": "00"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client(&server)
            .raw_message("ping", &json!({"num_pong_bytes": 1, "ignored": "00"}))
            .await
            .unwrap();

        assert_eq!(reply.status, "sent");
        assert_eq!(reply.message_type, "ping");
    }

    #[tokio::test]
    async fn test_backend_error_text_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rawmsg"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Message type is required"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .raw_message("", &json!({}))
            .await
            .unwrap_err();

        match err {
            Error::Backend { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Message type is required");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_without_body_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/node-info"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).node_info().await.unwrap_err();

        assert!(matches!(err, Error::Backend { status: 404, .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_node_info_and_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/node-info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "active_connections": 2,
                "alias": "ldk"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [
                    {"direction": "in", "event": "pong", "data": {}, "timestamp": 42}
                ]
            })))
            .mount(&server)
            .await;

        let rest = client(&server);
        let info = rest.node_info().await.unwrap();
        assert!(info.has_connections());
        assert_eq!(info.extra.get("alias"), Some(&json!("ldk")));

        let history = rest.messages().await.unwrap();
        assert_eq!(history.messages.len(), 1);
        assert_eq!(history.messages[0].event, "pong");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Nothing listens on port 9 on loopback in test environments
        let rest = RestClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = rest.node_info().await.unwrap_err();
        assert!(matches!(err, Error::Http { .. }));
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let err = RestClient::new("::nope", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_malformed_history_entries_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [
                    {"direction": "out", "event": "Connect", "data": {}, "timestamp": 1},
                    {"direction": "in", "data": {}, "timestamp": 2},
                    {"direction": "in", "event": "init"},
                    "not an object",
                    {"direction": "in", "event": "pong", "data": {}, "timestamp": 4}
                ]
            })))
            .mount(&server)
            .await;

        let history = client(&server).messages().await.unwrap();

        let names: Vec<_> = history.messages.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, ["Connect", "pong"]);
    }

    #[test]
    fn test_missing_messages_field_is_empty_history() {
        let history: MessagesResponse = serde_json::from_value(json!({})).unwrap();
        assert!(history.messages.is_empty());
    }
}

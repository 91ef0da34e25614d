//! Canned protocol message templates offered for one-click sending

use serde_json::{json, Value};

/// BOLT message family a template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Connection,
    Channel,
    Commitment,
    Routing,
}

impl MessageCategory {
    pub fn label(self) -> &'static str {
        match self {
            MessageCategory::Connection => "connection",
            MessageCategory::Channel => "channel",
            MessageCategory::Commitment => "commitment",
            MessageCategory::Routing => "routing",
        }
    }
}

/// A read-only catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: MessageCategory,
    /// Wire message type passed as `type` to `/rawmsg`
    pub msg_type: &'static str,
    pub payload: Value,
}

impl MessageTemplate {
    fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        category: MessageCategory,
        payload: Value,
    ) -> Self {
        Self {
            id,
            name,
            description,
            category,
            msg_type: id,
            payload,
        }
    }

    /// Case-insensitive match against name, id and description
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.id.contains(&q)
            || self.description.to_lowercase().contains(&q)
    }
}

/// The built-in template catalog, in display order
pub fn default_catalog() -> Vec<MessageTemplate> {
    use MessageCategory::*;

    vec![
        MessageTemplate::new(
            "init",
            "Init",
            "Initialize connection with peer",
            Connection,
            json!({ "globalfeatures": "00", "features": "01" }),
        ),
        MessageTemplate::new(
            "ping",
            "Ping",
            "Send ping to peer",
            Connection,
            json!({ "num_pong_bytes": 1, "ignored": "00" }),
        ),
        MessageTemplate::new(
            "pong",
            "Pong",
            "Response to ping message",
            Connection,
            json!({ "ignored": "00" }),
        ),
        MessageTemplate::new(
            "error",
            "Error",
            "Send error message to peer",
            Connection,
            json!({
                "channel_id": "0000000000000000000000000000000000000000000000000000000000000000",
                "data": "Test error message"
            }),
        ),
        MessageTemplate::new(
            "open_channel",
            "Open Channel",
            "Request to open a new channel",
            Channel,
            json!({}),
        ),
        MessageTemplate::new(
            "accept_channel",
            "Accept Channel",
            "Accept a channel opening request",
            Channel,
            json!({}),
        ),
        MessageTemplate::new(
            "funding_created",
            "Funding Created",
            "Channel funding transaction created",
            Channel,
            json!({}),
        ),
        MessageTemplate::new(
            "commitment_signed",
            "Commitment Signed",
            "Sign a new commitment transaction",
            Commitment,
            json!({}),
        ),
        MessageTemplate::new(
            "revoke_and_ack",
            "Revoke and Acknowledge",
            "Revoke previous commitment transaction and acknowledge new one",
            Commitment,
            json!({}),
        ),
        MessageTemplate::new(
            "channel_announcement",
            "Channel Announcement",
            "Announce a new channel to the network",
            Routing,
            json!({}),
        ),
        MessageTemplate::new(
            "node_announcement",
            "Node Announcement",
            "Announce node information to the network",
            Routing,
            json!({}),
        ),
        MessageTemplate::new(
            "channel_update",
            "Channel Update",
            "Update channel routing policies",
            Routing,
            json!({}),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_ping_template_payload() {
        let catalog = default_catalog();
        let ping = catalog.iter().find(|t| t.id == "ping").unwrap();
        assert_eq!(ping.msg_type, "ping");
        assert_eq!(ping.payload, json!({ "num_pong_bytes": 1, "ignored": "00" }));
        assert_eq!(ping.category, MessageCategory::Connection);
    }

    #[test]
    fn test_template_matches() {
        let catalog = default_catalog();
        let revoke = catalog.iter().find(|t| t.id == "revoke_and_ack").unwrap();
        assert!(revoke.matches("revoke"));
        assert!(revoke.matches("ACKNOWLEDGE"));
        assert!(revoke.matches(""));
        assert!(!revoke.matches("ping"));
    }
}

//! REST send tasks

use serde_json::Value;
use tokio::sync::mpsc;

use lnviz_transport::TransportBridge;

use crate::message::Message;

/// `POST /rawmsg`, reported as [`Message::RawMessageSent`]
pub(super) fn spawn_send(
    bridge: TransportBridge,
    msg_tx: mpsc::Sender<Message>,
    msg_type: String,
    content: Value,
) {
    tokio::spawn(async move {
        let result = bridge
            .send_message(&msg_type, &content)
            .await
            .map_err(|e| e.to_string());
        let _ = msg_tx
            .send(Message::RawMessageSent { msg_type, result })
            .await;
    });
}

/// `POST /connect` without touching the push channel
pub(super) fn spawn_sequence(bridge: TransportBridge, msg_tx: mpsc::Sender<Message>, node_id: String) {
    tokio::spawn(async move {
        let result = bridge
            .run_connect_sequence(&node_id)
            .await
            .map_err(|e| e.to_string());
        let _ = msg_tx.send(Message::SequenceStarted { result }).await;
    });
}

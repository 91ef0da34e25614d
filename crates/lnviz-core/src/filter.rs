//! Free-text filtering over the message history

use crate::events::MessageEvent;

/// True when `query` occurs (case-insensitively) in the event name, the
/// compact JSON of its payload, or its sequence id. An empty or
/// whitespace-only query matches everything.
pub fn matches_query(event: &MessageEvent, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    if event.event.to_lowercase().contains(&needle) {
        return true;
    }
    if event.data_compact().to_lowercase().contains(&needle) {
        return true;
    }
    event
        .sequence_id
        .as_deref()
        .is_some_and(|seq| seq.to_lowercase().contains(&needle))
}

/// Indices into `events` that pass the query, in original order
pub fn filter_indices(events: &[MessageEvent], query: &str) -> Vec<usize> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches_query(e, query))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Direction;
    use serde_json::json;

    fn sample() -> Vec<MessageEvent> {
        vec![
            MessageEvent::at(Direction::Out, "Connect", json!({"nodeId": "03"}), 1)
                .with_sequence("seq_03_1", 1),
            MessageEvent::at(Direction::In, "ExpectMsg", json!({"msgtype": "init"}), 2)
                .with_sequence("seq_03_1", 2),
            MessageEvent::at(
                Direction::Out,
                "RawMsg",
                json!({"msgtype": "ping", "num_pong_bytes": 1}),
                3,
            ),
        ]
    }

    #[test]
    fn test_empty_query_matches_all() {
        let events = sample();
        assert_eq!(filter_indices(&events, ""), vec![0, 1, 2]);
        assert_eq!(filter_indices(&events, "   "), vec![0, 1, 2]);
    }

    #[test]
    fn test_matches_event_name_case_insensitive() {
        let events = sample();
        assert_eq!(filter_indices(&events, "expectmsg"), vec![1]);
        assert_eq!(filter_indices(&events, "RAW"), vec![2]);
    }

    #[test]
    fn test_matches_payload_text() {
        let events = sample();
        assert_eq!(filter_indices(&events, "ping"), vec![2]);
        assert_eq!(filter_indices(&events, "\"msgtype\":\"init\""), vec![1]);
    }

    #[test]
    fn test_matches_sequence_id() {
        let events = sample();
        assert_eq!(filter_indices(&events, "SEQ_03"), vec![0, 1]);
    }

    #[test]
    fn test_no_match() {
        let events = sample();
        assert!(filter_indices(&events, "closing_signed").is_empty());
    }
}

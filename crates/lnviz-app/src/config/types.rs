//! Configuration types
//!
//! Defines `Settings` and one sub-struct per `config.toml` section.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lnviz_transport::BridgeConfig;

/// Lower bound for both poll loops
pub const POLL_MIN_MS: u64 = 500;

/// Allowed range for the transient flow edge
pub const EDGE_DISPLAY_MIN_MS: u64 = 2_000;
pub const EDGE_DISPLAY_MAX_MS: u64 = 3_000;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub polling: PollingSettings,

    #[serde(default)]
    pub flow: FlowSettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl Settings {
    /// Apply CLI overrides for the backend URL and node id
    pub fn with_overrides(mut self, base_url: Option<String>, node_id: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.server.base_url = url;
        }
        if let Some(id) = node_id {
            self.server.node_id = id;
        }
        self
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            base_url: self.server.base_url.clone(),
            request_timeout: Duration::from_millis(self.server.request_timeout_ms),
            connect_timeout: Duration::from_millis(self.server.connect_timeout_ms),
        }
    }
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// REST base URL; the push channel is derived from it
    pub base_url: String,
    /// Node id sent with `POST /connect`
    pub node_id: String,
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            node_id: "03".to_string(),
            request_timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
        }
    }
}

/// `[polling]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingSettings {
    pub interval_ms: u64,
    /// Poll `GET /node-info` to re-derive connection status
    pub status_enabled: bool,
    /// Poll `GET /messages` and replace local history
    pub history_enabled: bool,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            status_enabled: true,
            history_enabled: true,
        }
    }
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(POLL_MIN_MS))
    }
}

/// `[flow]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlowSettings {
    pub edge_display_ms: u64,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            edge_display_ms: EDGE_DISPLAY_MIN_MS,
        }
    }
}

impl FlowSettings {
    /// Display duration, clamped to 2000–3000 ms
    pub fn edge_display(&self) -> Duration {
        Duration::from_millis(
            self.edge_display_ms
                .clamp(EDGE_DISPLAY_MIN_MS, EDGE_DISPLAY_MAX_MS),
        )
    }
}

/// `[log]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    pub show_timestamps: bool,
    pub auto_scroll: bool,
    pub export_dir: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            auto_scroll: true,
            export_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.base_url, "http://localhost:5000");
        assert_eq!(settings.server.node_id, "03");
        assert_eq!(settings.polling.interval(), Duration::from_millis(2000));
        assert!(settings.polling.status_enabled);
        assert_eq!(settings.flow.edge_display(), Duration::from_millis(2000));
        assert!(settings.log.show_timestamps);
    }

    #[test]
    fn test_edge_display_is_clamped() {
        let low = FlowSettings { edge_display_ms: 10 };
        let high = FlowSettings {
            edge_display_ms: 60_000,
        };
        let mid = FlowSettings {
            edge_display_ms: 2_500,
        };
        assert_eq!(low.edge_display(), Duration::from_millis(2000));
        assert_eq!(high.edge_display(), Duration::from_millis(3000));
        assert_eq!(mid.edge_display(), Duration::from_millis(2500));
    }

    #[test]
    fn test_poll_interval_has_floor() {
        let polling = PollingSettings {
            interval_ms: 1,
            ..Default::default()
        };
        assert_eq!(polling.interval(), Duration::from_millis(POLL_MIN_MS));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default()
            .with_overrides(Some("http://10.0.0.2:5000".into()), None);
        assert_eq!(settings.server.base_url, "http://10.0.0.2:5000");
        assert_eq!(settings.server.node_id, "03");

        let bridge = settings.bridge_config();
        assert_eq!(bridge.request_timeout, Duration::from_millis(10_000));
        assert_eq!(bridge.connect_timeout, Duration::from_millis(5_000));
    }
}

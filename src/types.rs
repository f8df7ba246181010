use crate::detection::FunnelConfig;
use crate::geometry::Size;
use crate::pipeline::SessionConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub funnel: FunnelConfig,
    pub session: SessionConfig,
    pub display: DisplayConfig,
    pub replay: ReplayConfig,
    pub logging: LoggingConfig,
}

/// Overlay / camera preview area the detections are drawn into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: f64,
    pub height: f64,
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub input_path: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input_path: "detections.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

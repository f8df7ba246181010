// src/pipeline/mod.rs

pub mod event_bus;
pub mod metrics;
pub mod session;
pub mod transform;

pub use event_bus::{EventBus, SessionEvent};
pub use metrics::{MetricsSummary, SessionMetrics};
pub use session::{CaptureError, CaptureSession, SessionConfig};
pub use transform::{capture_quad, display_quad, ImageOrientation};

//! Scan detection core - stabilizes noisy per-frame quadrilateral detections
//! of a document in a camera feed and maps them between coordinate spaces.
//!
//! - `geometry`: quadrilaterals, sizes, affine helpers
//! - `detection`: proximity scoring and the stabilization funnel
//! - `pipeline`: display/capture mapping and the per-session driver
//! - `replay`: JSON-lines detection logs for offline runs

pub mod config;
pub mod detection;
pub mod geometry;
pub mod pipeline;
pub mod replay;
pub mod types;

pub use detection::{DetectionResult, FunnelConfig, FunnelDecision, RectangleFunnel};
pub use geometry::{Quadrilateral, Size};
pub use pipeline::{CaptureError, CaptureSession, ImageOrientation, SessionConfig, SessionEvent};
pub use types::Config;

// src/detection/mod.rs

mod funnel;
mod matcher;
mod selector;
mod types;

// Re-export public APIs
pub use funnel::{FunnelConfig, RectangleFunnel};
pub use matcher::{best_match, score_window, RectangleMatch};
pub use selector::select_largest;
pub use types::*;

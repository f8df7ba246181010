// src/detection/types.rs
use crate::geometry::{Quadrilateral, Size};
use serde::{Deserialize, Serialize};

/// One frame's accepted quadrilateral together with the pixel size of the
/// frame it came from. Later transforms are relative to this size, not the
/// size of whatever frame is current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub quadrilateral: Quadrilateral,
    pub image_size: Size,
}

impl DetectionResult {
    pub fn new(quadrilateral: Quadrilateral, image_size: Size) -> Self {
        Self {
            quadrilateral,
            image_size,
        }
    }
}

/// Outcome of feeding one candidate to the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FunnelDecision {
    /// Nothing new to show this frame.
    None,
    /// New best-effort preview, not yet trusted.
    Provisional(Quadrilateral),
    /// Stable across enough consecutive frames to act on.
    Final(Quadrilateral),
}

impl FunnelDecision {
    pub fn quadrilateral(&self) -> Option<&Quadrilateral> {
        match self {
            Self::None => None,
            Self::Provisional(q) | Self::Final(q) => Some(q),
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Provisional(_) => "PROVISIONAL",
            Self::Final(_) => "FINAL",
        }
    }
}

// src/pipeline/session.rs
//
// Per-session driver around the funnel: owns miss tracking, the last
// accepted detection, and the detecting/capturing flags, and turns funnel
// decisions into display-space events.
//
// Must be driven from one serialized frame stream. A multi-threaded host
// should hand the whole session to a single worker rather than share it.

use super::event_bus::{EventBus, SessionEvent};
use super::metrics::SessionMetrics;
use super::transform::{capture_quad, display_quad, ImageOrientation};
use crate::detection::{DetectionResult, FunnelConfig, FunnelDecision, RectangleFunnel};
use crate::geometry::{Quadrilateral, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Failed to get the user's authorization for camera.")]
    Unauthorized,
    #[error("Could not setup input device.")]
    InvalidDevice,
    #[error("Could not input or output data through capture session.")]
    InvalidIo,
    #[error("Could not capture picture.")]
    InvalidCapture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Consecutive empty frames tolerated before tracking counts as lost
    pub miss_threshold: u32,
    /// Fire the shutter as soon as the funnel reports a final result
    pub auto_capture: bool,
    /// Bound of the outbound event queue
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            miss_threshold: 5,
            auto_capture: true,
            event_capacity: 64,
        }
    }
}

pub struct CaptureSession {
    config: SessionConfig,
    display_area: Size,
    funnel: RectangleFunnel,
    events: EventBus,
    metrics: SessionMetrics,

    is_detecting: bool,
    is_capturing: bool,
    miss_count: u32,
    tracking_lost: bool,
    latest_result: Option<DetectionResult>,
}

impl CaptureSession {
    pub fn new(funnel: FunnelConfig, config: SessionConfig, display_area: Size) -> Self {
        Self {
            events: EventBus::new(config.event_capacity),
            config,
            display_area,
            funnel: RectangleFunnel::new(funnel),
            metrics: SessionMetrics::new(),
            is_detecting: false,
            is_capturing: false,
            miss_count: 0,
            tracking_lost: false,
            latest_result: None,
        }
    }

    pub fn start(&mut self) {
        if self.is_detecting {
            return;
        }
        self.is_detecting = true;
        info!("▶ Detection started");
    }

    /// Stop detecting and forget all consensus so the next start begins clean.
    pub fn stop(&mut self) {
        self.is_detecting = false;
        self.funnel.reset();
        self.latest_result = None;
        self.miss_count = 0;
        self.tracking_lost = false;
        info!("■ Detection stopped");
    }

    /// Handle one frame from the detector. `candidate` is `None` when the
    /// frame produced no quadrilateral.
    pub fn process_frame(
        &mut self,
        candidate: Option<Quadrilateral>,
        image_size: Size,
    ) -> FunnelDecision {
        if !self.is_detecting {
            return FunnelDecision::None;
        }
        self.metrics.inc(&self.metrics.total_frames);

        let Some(candidate) = candidate else {
            self.handle_miss(image_size);
            return FunnelDecision::None;
        };

        self.metrics.inc(&self.metrics.frames_with_detection);
        self.miss_count = 0;
        self.tracking_lost = false;

        let latest = self.latest_result.map(|r| r.quadrilateral);
        let decision = self.funnel.add(candidate, latest.as_ref());

        if let Some(accepted) = decision.quadrilateral() {
            let result = DetectionResult::new(*accepted, image_size);
            self.latest_result = Some(result);
            let quad = display_quad(&result, self.display_area);
            if quad.is_finite() {
                self.events.publish(SessionEvent::QuadDetected {
                    quad: Some(quad),
                    image_size,
                });
            } else {
                warn!(
                    "Skipping overlay for degenerate frame {}x{}",
                    image_size.width, image_size.height
                );
            }
        }

        match decision {
            FunnelDecision::Provisional(_) => {
                self.metrics.inc(&self.metrics.provisional_results);
            }
            FunnelDecision::Final(_) => {
                self.metrics.inc(&self.metrics.final_results);
                if self.config.auto_capture && !self.is_capturing {
                    info!("📸 Final rectangle, triggering capture");
                    self.is_capturing = true;
                    self.events.publish(SessionEvent::CaptureStarted);
                }
            }
            FunnelDecision::None => {}
        }

        decision
    }

    fn handle_miss(&mut self, image_size: Size) {
        self.metrics.inc(&self.metrics.missed_frames);
        self.miss_count = self.miss_count.saturating_add(1);

        // once per gap, on the frame that crosses the threshold
        if self.miss_count > self.config.miss_threshold && !self.tracking_lost {
            self.tracking_lost = true;
            debug!("No rectangle for {} frames, tracking lost", self.miss_count);
            self.metrics.inc(&self.metrics.tracking_losses);
            self.funnel.reset_agreement();
            self.latest_result = None;
            self.events.publish(SessionEvent::QuadDetected {
                quad: None,
                image_size,
            });
        }
    }

    /// Manual shutter.
    pub fn request_capture(&mut self) -> Result<(), CaptureError> {
        if !self.is_detecting {
            return Err(CaptureError::InvalidCapture);
        }
        if !self.is_capturing {
            self.is_capturing = true;
            self.events.publish(SessionEvent::CaptureStarted);
        }
        Ok(())
    }

    /// The photo is in: map the last stabilized detection into its pixel
    /// space, stop the session and report.
    pub fn complete_capture(
        &mut self,
        captured_size: Size,
        orientation: ImageOrientation,
    ) -> Option<Quadrilateral> {
        let quad = self
            .latest_result
            .map(|result| capture_quad(&result, captured_size, orientation));

        self.stop();
        self.is_capturing = false;
        self.metrics.inc(&self.metrics.captures);
        info!(
            "✓ Picture captured {}x{} ({}), quad: {}",
            captured_size.width,
            captured_size.height,
            orientation.as_str(),
            quad.is_some()
        );

        self.events.publish(SessionEvent::PictureCaptured {
            image_size: captured_size,
            quad,
        });
        quad
    }

    pub fn fail_capture(&mut self, error: CaptureError) {
        self.stop();
        self.is_capturing = false;
        self.metrics.inc(&self.metrics.capture_failures);
        warn!("✗ Capture failed: {}", error);
        self.events.publish(SessionEvent::Failed(error));
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    pub fn is_detecting(&self) -> bool {
        self.is_detecting
    }

    pub fn is_capturing(&self) -> bool {
        self.is_capturing
    }

    pub fn latest_result(&self) -> Option<&DetectionResult> {
        self.latest_result.as_ref()
    }

    pub fn funnel(&self) -> &RectangleFunnel {
        &self.funnel
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }
}

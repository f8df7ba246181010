// src/pipeline/metrics.rs
//
// Counters for one capture session. Atomic so a reporting task can read
// them while the frame worker keeps writing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SessionMetrics {
    pub total_frames: Arc<AtomicU64>,
    pub frames_with_detection: Arc<AtomicU64>,
    pub missed_frames: Arc<AtomicU64>,
    pub provisional_results: Arc<AtomicU64>,
    pub final_results: Arc<AtomicU64>,
    pub tracking_losses: Arc<AtomicU64>,
    pub captures: Arc<AtomicU64>,
    pub capture_failures: Arc<AtomicU64>,
    pub started_at: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            total_frames: Arc::new(AtomicU64::new(0)),
            frames_with_detection: Arc::new(AtomicU64::new(0)),
            missed_frames: Arc::new(AtomicU64::new(0)),
            provisional_results: Arc::new(AtomicU64::new(0)),
            final_results: Arc::new(AtomicU64::new(0)),
            tracking_losses: Arc::new(AtomicU64::new(0)),
            captures: Arc::new(AtomicU64::new(0)),
            capture_failures: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
        }
    }

    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Share of processed frames that carried a detection.
    pub fn detection_rate(&self) -> f64 {
        let frames = self.total_frames.load(Ordering::Relaxed);
        if frames == 0 {
            return 0.0;
        }
        self.frames_with_detection.load(Ordering::Relaxed) as f64 / frames as f64
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_frames: self.total_frames.load(Ordering::Relaxed),
            frames_with_detection: self.frames_with_detection.load(Ordering::Relaxed),
            missed_frames: self.missed_frames.load(Ordering::Relaxed),
            provisional_results: self.provisional_results.load(Ordering::Relaxed),
            final_results: self.final_results.load(Ordering::Relaxed),
            tracking_losses: self.tracking_losses.load(Ordering::Relaxed),
            captures: self.captures.load(Ordering::Relaxed),
            capture_failures: self.capture_failures.load(Ordering::Relaxed),
            detection_rate: self.detection_rate(),
            elapsed_secs: self.started_at.elapsed().as_secs_f64(),
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSummary {
    pub total_frames: u64,
    pub frames_with_detection: u64,
    pub missed_frames: u64,
    pub provisional_results: u64,
    pub final_results: u64,
    pub tracking_losses: u64,
    pub captures: u64,
    pub capture_failures: u64,
    pub detection_rate: f64,
    pub elapsed_secs: f64,
}

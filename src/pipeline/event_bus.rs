// src/pipeline/event_bus.rs
//
// Outbound notifications from the capture session. The session publishes,
// the caller drains once per frame and forwards to whatever context renders
// the overlay or drives the camera. Nothing flows back.

use super::session::CaptureError;
use crate::geometry::{Quadrilateral, Size};
use std::collections::VecDeque;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// New overlay quad in display space; `None` means tracking was lost.
    QuadDetected {
        quad: Option<Quadrilateral>,
        image_size: Size,
    },

    /// The shutter should fire now.
    CaptureStarted,

    /// Photo finished; `quad` is in the photo's pixel space.
    PictureCaptured {
        image_size: Size,
        quad: Option<Quadrilateral>,
    },

    Failed(CaptureError),
}

pub struct EventBus {
    events: VecDeque<SessionEvent>,
    max_pending: usize,
}

impl EventBus {
    pub fn new(max_pending: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_pending),
            max_pending: max_pending.max(1),
        }
    }

    pub fn publish(&mut self, event: SessionEvent) {
        if self.events.len() >= self.max_pending {
            warn!(
                "Event bus full ({} events), dropping oldest",
                self.max_pending
            );
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_oldest_when_full() {
        let mut bus = EventBus::new(2);
        bus.publish(SessionEvent::Failed(CaptureError::InvalidDevice));
        bus.publish(SessionEvent::CaptureStarted);
        bus.publish(SessionEvent::Failed(CaptureError::InvalidIo));
        assert_eq!(bus.pending_count(), 2);

        let events = bus.drain();
        assert_eq!(events[0], SessionEvent::CaptureStarted);
        assert_eq!(events[1], SessionEvent::Failed(CaptureError::InvalidIo));
        assert_eq!(bus.pending_count(), 0);
    }
}

// src/detection/funnel.rs
//
// Temporal stabilization of per-frame quadrilateral candidates.
//
// Two tolerances are in play:
//   - matching_threshold groups jittery detections of the same object into
//     consensus clusters and picks the best candidate of the window.
//   - result_matching_threshold is much tighter and only gates finality:
//     the best candidate must sit on top of the previously accepted result
//     for efficient_match_count consecutive frames before Final fires.
//
// An object still sliding into frame may look locally consistent for a
// while, but it will not hold the tight tolerance long enough to fire.

use super::matcher::{best_match, score_window, RectangleMatch};
use super::types::FunnelDecision;
use crate::geometry::Quadrilateral;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    /// Window capacity; older candidates are evicted first
    pub max_rectangle_count: usize,
    /// No decision is produced until the window holds this many candidates
    pub min_rectangle_count: usize,
    /// Corner tolerance (px) for intra-window agreement
    pub matching_threshold: f64,
    /// Corner tolerance (px) against the last accepted result
    pub result_matching_threshold: f64,
    /// Consecutive tight agreements required before Final
    pub efficient_match_count: u32,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            max_rectangle_count: 8,
            min_rectangle_count: 3,
            matching_threshold: 40.0,
            result_matching_threshold: 6.0,
            efficient_match_count: 35,
        }
    }
}

pub struct RectangleFunnel {
    config: FunnelConfig,
    window: VecDeque<RectangleMatch>,
    similar_match_count: u32,
}

impl RectangleFunnel {
    pub fn new(config: FunnelConfig) -> Self {
        Self {
            window: VecDeque::with_capacity(config.max_rectangle_count + 1),
            config,
            similar_match_count: 0,
        }
    }

    /// Feed one frame's candidate. `latest` is the result the caller last
    /// accepted (and is presumably displaying), if any.
    pub fn add(
        &mut self,
        candidate: Quadrilateral,
        latest: Option<&Quadrilateral>,
    ) -> FunnelDecision {
        self.window.push_back(RectangleMatch::new(candidate));

        if self.window.len() < self.config.min_rectangle_count {
            return FunnelDecision::None;
        }
        while self.window.len() > self.config.max_rectangle_count {
            self.window.pop_front();
        }

        score_window(&mut self.window, self.config.matching_threshold);

        let Some(best) = best_match(&self.window, latest, self.config.matching_threshold) else {
            return FunnelDecision::None;
        };
        let best_rectangle = best.rectangle;
        debug!(
            "Funnel best match: score={} window={} [{}]",
            best.score,
            self.window.len(),
            best_rectangle
        );

        match latest {
            Some(latest)
                if best_rectangle.is_within(self.config.result_matching_threshold, latest) =>
            {
                self.similar_match_count += 1;
                if self.similar_match_count >= self.config.efficient_match_count {
                    info!(
                        "✓ Rectangle stable for {} frames, finalizing",
                        self.similar_match_count
                    );
                    self.similar_match_count = 0;
                    FunnelDecision::Final(best_rectangle)
                } else {
                    FunnelDecision::None
                }
            }
            _ => {
                if self.similar_match_count > 0 {
                    debug!(
                        "Agreement streak broken after {} frames",
                        self.similar_match_count
                    );
                }
                self.similar_match_count = 0;
                FunnelDecision::Provisional(best_rectangle)
            }
        }
    }

    /// Drop accumulated agreement so a later rectangle cannot complete a
    /// stale streak.
    pub fn reset_agreement(&mut self) {
        self.similar_match_count = 0;
    }

    /// Forget everything: window and agreement.
    pub fn reset(&mut self) {
        self.window.clear();
        self.similar_match_count = 0;
    }

    pub fn similar_match_count(&self) -> u32 {
        self.similar_match_count
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Candidates currently in the window, oldest first.
    pub fn window(&self) -> impl Iterator<Item = &Quadrilateral> {
        self.window.iter().map(|m| &m.rectangle)
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }
}

// src/detection/matcher.rs
//
// Pairwise proximity scoring over the funnel window.
//
// Scores are rebuilt from zero on every frame: each unordered pair of
// window entries whose corners agree within the matching threshold adds
// one point to both members.

use crate::geometry::Quadrilateral;
use std::collections::VecDeque;

/// A window entry: a candidate plus its proximity score for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleMatch {
    pub rectangle: Quadrilateral,
    pub score: u32,
}

impl RectangleMatch {
    pub fn new(rectangle: Quadrilateral) -> Self {
        Self {
            rectangle,
            score: 0,
        }
    }
}

/// Recompute every score in the window against `threshold`.
pub fn score_window(window: &mut VecDeque<RectangleMatch>, threshold: f64) {
    let matches = window.make_contiguous();
    for m in matches.iter_mut() {
        m.score = 0;
    }

    for i in 0..matches.len() {
        for j in (i + 1)..matches.len() {
            if matches[i]
                .rectangle
                .is_within(threshold, &matches[j].rectangle)
            {
                matches[i].score += 1;
                matches[j].score += 1;
            }
        }
    }
}

/// Highest-scoring entry, scanned oldest first.
///
/// On a score tie the incumbent keeps its place unless it is not near
/// `latest` and the challenger is, so the earliest entry agreeing with
/// the last accepted result wins. Without `latest`, the earliest entry wins.
pub fn best_match<'a>(
    window: &'a VecDeque<RectangleMatch>,
    latest: Option<&Quadrilateral>,
    threshold: f64,
) -> Option<&'a RectangleMatch> {
    let mut best: Option<&RectangleMatch> = None;

    for candidate in window {
        let Some(current) = best else {
            best = Some(candidate);
            continue;
        };

        if candidate.score > current.score {
            best = Some(candidate);
        } else if candidate.score == current.score {
            if let Some(latest) = latest {
                let current_near = current.rectangle.is_within(threshold, latest);
                if !current_near && candidate.rectangle.is_within(threshold, latest) {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}

// src/replay.rs
//
// JSON-lines detection log: one record per line, standing in for the live
// detector and camera collaborators.

use crate::detection::select_largest;
use crate::geometry::{Quadrilateral, Size};
use crate::pipeline::ImageOrientation;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayRecord {
    Start,
    Stop,
    Frame {
        width: f64,
        height: f64,
        #[serde(default)]
        candidates: Vec<[[f64; 2]; 4]>,
        #[serde(default)]
        normalized: bool,
    },
    Capture {
        width: f64,
        height: f64,
        #[serde(default)]
        orientation: ImageOrientation,
    },
}

impl ReplayRecord {
    /// Frame size and the single candidate the funnel should see, if this
    /// record is a frame.
    pub fn frame_candidate(&self) -> Option<(Option<Quadrilateral>, Size)> {
        match self {
            Self::Frame {
                width,
                height,
                candidates,
                normalized,
            } => {
                let size = Size::new(*width, *height);
                let quads: Vec<Quadrilateral> = candidates
                    .iter()
                    .map(|c| Quadrilateral::from_corners(*c))
                    .collect();
                Some((select_largest(&quads, size, *normalized), size))
            }
            _ => None,
        }
    }
}

pub fn parse_records(contents: &str) -> Result<Vec<ReplayRecord>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<ReplayRecord>(line)
                .with_context(|| format!("replay line {}", idx + 1))
        })
        .collect()
}

pub fn load_records(path: &str) -> Result<Vec<ReplayRecord>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading replay log {}", path))?;
    parse_records(&contents)
}

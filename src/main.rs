// src/main.rs
//
// Offline driver: replays a recorded detection log through a capture
// session the way a live camera would feed it.
//
//   producer task ──frames──▶ session worker ──events──▶ overlay task
//
// The worker is the only owner of the session; events are fire-and-forget.

use anyhow::{Context, Result};
use scan_detection::pipeline::{CaptureSession, SessionEvent};
use scan_detection::replay::{self, ReplayRecord};
use scan_detection::types::Config;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const FRAME_QUEUE: usize = 64;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = Config::load(&config_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scan_detection={}", config.logging.level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("📄 Scan detection replay starting");
    info!(
        "Funnel: window {}..{}, match {:.0}px, result {:.0}px, final after {} frames",
        config.funnel.min_rectangle_count,
        config.funnel.max_rectangle_count,
        config.funnel.matching_threshold,
        config.funnel.result_matching_threshold,
        config.funnel.efficient_match_count
    );

    let records = replay::load_records(&config.replay.input_path)?;
    if records.is_empty() {
        error!("No records found in {}", config.replay.input_path);
        return Ok(());
    }
    info!("Loaded {} replay record(s)", records.len());

    let (frame_tx, frame_rx) = mpsc::channel::<ReplayRecord>(FRAME_QUEUE);
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();

    let producer = tokio::spawn(async move {
        for record in records {
            if frame_tx.send(record).await.is_err() {
                warn!("Session worker gone, stopping replay");
                break;
            }
        }
    });

    let mut session = CaptureSession::new(
        config.funnel.clone(),
        config.session.clone(),
        config.display.size(),
    );
    let worker = tokio::spawn(async move {
        run_session(&mut session, frame_rx, event_tx).await;
        session
    });

    let overlay = tokio::spawn(render_events(event_rx));

    producer.await.context("replay producer panicked")?;
    let session = worker.await.context("session worker panicked")?;
    overlay.await.context("overlay task panicked")?;

    let summary = session.metrics().summary();
    info!("\n✓ Replay finished");
    info!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_session(
    session: &mut CaptureSession,
    mut frames: mpsc::Receiver<ReplayRecord>,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    session.start();

    while let Some(record) = frames.recv().await {
        match record {
            ReplayRecord::Start => session.start(),
            ReplayRecord::Stop => session.stop(),
            ReplayRecord::Capture {
                width,
                height,
                orientation,
            } => {
                session.complete_capture(scan_detection::Size::new(width, height), orientation);
            }
            frame @ ReplayRecord::Frame { .. } => {
                if let Some((candidate, image_size)) = frame.frame_candidate() {
                    let decision = session.process_frame(candidate, image_size);
                    debug!("Frame decision: {}", decision.as_str());
                }
            }
        }

        for event in session.drain_events() {
            // overlay may already be gone at shutdown
            let _ = events.send(event);
        }
    }
}

async fn render_events(mut events: mpsc::UnboundedReceiver<SessionEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::QuadDetected {
                quad: Some(quad), ..
            } => info!("▢ Overlay quad: {}", quad),
            SessionEvent::QuadDetected { quad: None, .. } => info!("▢ Overlay cleared"),
            SessionEvent::CaptureStarted => info!("📸 Shutter"),
            SessionEvent::PictureCaptured { image_size, quad } => match quad {
                Some(quad) => info!(
                    "🖼  Picture {}x{} crop: {}",
                    image_size.width, image_size.height, quad
                ),
                None => info!(
                    "🖼  Picture {}x{} without a detected region",
                    image_size.width, image_size.height
                ),
            },
            SessionEvent::Failed(err) => error!("Capture failed: {}", err),
        }
    }
}

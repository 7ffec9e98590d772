mod capture;
mod cli;
mod controls;
mod display;
mod session;

use anyhow::Context;
use chroma_tracker::{PipelineConfig, TrackerError, VisionPipeline};
use clap::Parser;
use cli::Cli;
use log::{debug, error, info, warn};
use opencv::{core::Mat, highgui};
use session::{EmptyFrameStreak, KeyAction, LoopState, ThroughputMeter, THROUGHPUT_WINDOW};
use std::process::ExitCode;

/// Exit status when the capture source cannot be opened (`-1` as a byte).
const CAPTURE_FAILURE_EXIT: u8 = 255;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            match err.downcast_ref::<TrackerError>() {
                Some(TrackerError::CaptureUnavailable { .. }) => {
                    ExitCode::from(CAPTURE_FAILURE_EXIT)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // --- 1. Capture Initialization ---
    let mut source = capture::FrameSource::open(cli.source())?;
    info!("opened {}", source.source());
    info!("FPS = {}", source.fps());

    // --- 2. Windows & Controls ---
    let mut initial = PipelineConfig::default();
    initial.apply(&cli.overrides);
    let display = display::Display::open().context("creating display windows")?;
    let controls = controls::ControlPanel::create(&initial).context("creating trackbars")?;

    // --- 3. Main Processing Loop ---
    let mut pipeline = VisionPipeline::new();
    let mut meter = ThroughputMeter::new(THROUGHPUT_WINDOW);
    let mut frame = Mat::default();
    let mut empty_frames = EmptyFrameStreak::default();
    let mut state = LoopState::Running;

    while state.is_running() {
        // Parameters are read once, before any stage runs.
        let config = controls.snapshot().context("reading trackbars")?;

        if source.read(&mut frame)? {
            if let Some(skipped) = empty_frames.record_frame() {
                debug!("capture recovered after {skipped} empty frames");
            }
            let report = pipeline.process(&frame, &config)?;
            display.render(&report).context("rendering frame")?;
            if let Some(rate) = meter.tick() {
                debug!("processing at {rate:.1} frames/s");
            }
        } else if empty_frames.record_empty() {
            warn!("capture returned an empty frame, skipping");
        }

        // --- 4. Key Poll & Pacing ---
        let key = highgui::wait_key(cli.wait_ms).context("polling keyboard")?;
        state = state.on_key(KeyAction::from_key_code(key));
    }

    // --- 5. Cleanup ---
    info!("video stopped after {} frames", pipeline.frames_processed());
    display.close().context("closing windows")?;
    state = state.on_cleanup();
    debug!("session {:?}", state);
    Ok(())
}

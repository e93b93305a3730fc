// Corner debugger: live view of the corner/hint telemetry a device logs.
// • The device logs "corners" or "hints", then 3 lines of "(x1,y1) (x2,y2)".
// • Corners show as magenta "+", hints as cyan "x", on a black window at
//   1/DOWNSCALE of the device resolution.
// • Close the window, press ESC or Ctrl-C to quit.

mod bridge;
mod classify;
mod cli;
mod coords;
mod draw;
mod error;
mod render;
mod types;

use anyhow::Context;
use bridge::LogBridge;
use classify::{Step, StreamClassifier};
use draw::{Display, Drawer};
use error::Error;
use render::PointRenderer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;
use types::Downscale;

/// Native resolution of the device the telemetry comes from.
const DEVICE_SIZE: (usize, usize) = (1080, 1920);

/// How long to wait for a log line before checking the window again.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Why the main loop stopped. All of these are clean exits.
#[derive(Debug, PartialEq, Eq)]
enum Stop {
    WindowClosed,
    Interrupted,
    BlankLine,
    StreamClosed,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = cli::parse_or_exit();
    println!("Watching {}", cli.serial);

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("installing Ctrl-C handler")?;

    /* --- Window setup ---
       Visual: an empty black window at 1/DOWNSCALE of the device size. */
    let (w, h) = cli.downscale.window_size(DEVICE_SIZE.0, DEVICE_SIZE.1);
    log::info!("window {w}x{h} (downscale {})", cli.downscale.get());
    let drawer = Drawer::new("Corner debugger", w, h).context("opening window")?;
    let mut renderer = PointRenderer::new(drawer, w, h);
    renderer.redraw()?;

    // Dropped (adb killed) before the renderer on every path out of main.
    let bridge = LogBridge::open(&cli.serial)
        .with_context(|| format!("starting adb for {}", cli.serial))?;

    let stop = run(bridge.lines(), &mut renderer, cli.downscale, &interrupted)?;
    log::info!("stopped: {stop:?}");
    Ok(())
}

/// Classify -> parse -> render, one line at a time, until something stops us.
fn run<D: Display>(
    lines: &Receiver<String>,
    renderer: &mut PointRenderer<D>,
    downscale: Downscale,
    interrupted: &AtomicBool,
) -> Result<Stop, Error> {
    let mut classifier = StreamClassifier::new();

    loop {
        if interrupted.load(Ordering::SeqCst) {
            return Ok(Stop::Interrupted);
        }
        // Close/ESC only become visible once window events are processed.
        let display = renderer.display_mut();
        display.pump();
        if display.quit_requested() {
            return Ok(Stop::WindowClosed);
        }

        let line = match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Ok(Stop::StreamClosed),
        };

        match classifier.push(&line) {
            Step::Pending => {}
            Step::Block(block) => {
                let points = coords::points_from_block(&block, downscale);
                renderer.set(block.category, points)?;
            }
            Step::End => {
                if let Some(category) = classifier.armed() {
                    log::debug!("ended with {} {} line(s) pending", classifier.buffered(), category);
                }
                return Ok(Stop::BlankLine);
            }
        }
    }
}

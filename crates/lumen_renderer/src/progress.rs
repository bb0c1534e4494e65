//! Render progress reporting.
//!
//! The scheduler reports every finished pixel and every phase change to a
//! [`ProgressSink`]. Nothing in the renderer depends on a sink consuming them.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::RenderPhase;

/// A finished pixel, already quantized to 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelEvent {
    /// Image row, counted from the bottom
    pub row: u32,
    /// Image column, counted from the left
    pub col: u32,
    pub rgb: [u8; 3],
}

/// Receiver for progress events. Called concurrently from worker threads.
pub trait ProgressSink: Sync {
    /// A pixel has been written to the buffer.
    fn pixel_done(&self, event: PixelEvent);

    /// The scheduler entered a new phase.
    fn phase_changed(&self, _phase: RenderPhase) {}
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn pixel_done(&self, _event: PixelEvent) {}
}

impl<F> ProgressSink for F
where
    F: Fn(PixelEvent) + Sync,
{
    fn pixel_done(&self, event: PixelEvent) {
        self(event)
    }
}

/// Streams one `"<col> <row> <r> <g> <b>"` line per finished pixel, for
/// front-ends that paint the image as it renders.
pub struct LineProgress<W: Write + Send> {
    writer: Mutex<W>,
    failed: AtomicBool,
}

impl<W: Write + Send> LineProgress<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            failed: AtomicBool::new(false),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> ProgressSink for LineProgress<W> {
    fn pixel_done(&self, event: PixelEvent) {
        if self.failed.load(Ordering::Relaxed) {
            return;
        }

        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let [r, g, b] = event.rgb;
        let result = writeln!(writer, "{} {} {} {} {}", event.col, event.row, r, g, b)
            .and_then(|_| writer.flush());

        // A closed consumer must not fail the render
        if let Err(err) = result {
            if !self.failed.swap(true, Ordering::Relaxed) {
                log::warn!("Progress stream closed, dropping further updates: {}", err);
            }
        }
    }
}

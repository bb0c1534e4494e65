//! Parallel pixel scheduling for Lumen.
//!
//! Every pixel is an independent task. A dedicated rayon pool of
//! `worker_count` threads pulls tasks through work stealing, so pixels that
//! recurse deeply (glass, grazing metal) never leave other workers idle.
//!
//! Each task owns exactly one slot of a flat row-major buffer, handed out as
//! a `&mut` by `par_iter_mut`, so pixel writes need no locking. The only
//! shared mutable state is the completion counter and the cancel flag.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::{
    color_to_rgb8, render_pixel, write_ppm, Camera, Hittable, PixelEvent, ProgressSink,
    RenderError, RenderResult,
};
use lumen_core::RenderConfig;
use lumen_math::Color;

/// Phases of a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// Nothing started yet
    Idle,
    /// Enumerating pixel tasks
    Scheduling,
    /// Workers are pulling and shading tasks
    Draining,
    /// Every task has finished; the buffer is complete
    Barrier,
    /// The buffer has been encoded
    Serialized,
}

/// Image storage for render output, indexed by `(row, col)` with row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major slot index of a pixel.
    #[inline]
    pub fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Inverse of [`PixelBuffer::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index / width) as u32, (index % width) as u32)
    }

    /// Get the pixel at (row, col).
    pub fn get(&self, row: u32, col: u32) -> Color {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at (row, col).
    pub fn set(&mut self, row: u32, col: u32, color: Color) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }

    /// All pixels in row-major order, bottom row first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixels in output order: top row first, left to right.
    pub fn scanlines(&self) -> impl Iterator<Item = Color> + '_ {
        let width = self.width as usize;
        self.pixels
            .chunks(width.max(1))
            .rev()
            .flat_map(|row| row.iter().copied())
    }
}

/// Shared flag that aborts a running render.
///
/// A cancelled renderer stays cancelled; start over with a new [`Renderer`].
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub pixels: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Deterministic per-pixel seed: splitmix64 over the base seed and coordinates.
pub fn pixel_seed(seed: u64, row: u32, col: u32) -> u64 {
    let mut z = seed ^ (((row as u64) << 32) | col as u64);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Distributes pixel tasks over a fixed worker pool.
pub struct Renderer {
    config: RenderConfig,
    pool: rayon::ThreadPool,
    cancel: CancelHandle,
}

impl Renderer {
    /// Clamp the configuration and spin up `worker_count` worker threads.
    pub fn new(config: &RenderConfig) -> RenderResult<Self> {
        let config = config.clamped();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_count)
            .thread_name(|index| format!("lumen-worker-{}", index))
            .build()?;

        Ok(Self {
            config,
            pool,
            cancel: CancelHandle::default(),
        })
    }

    /// The clamped configuration this renderer uses.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Handle that can abort renders from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Render every pixel and return the completed buffer.
    ///
    /// Returns only after all workers have finished. The first failed or
    /// cancelled task fails the whole render; no partial buffer is returned.
    pub fn render(
        &self,
        camera: &Camera,
        world: &dyn Hittable,
        progress: &dyn ProgressSink,
    ) -> RenderResult<(PixelBuffer, RenderStats)> {
        let config = &self.config;
        let start = Instant::now();
        progress.phase_changed(RenderPhase::Idle);

        log::info!(
            "Rendering {}x{} @ {} spp, depth {}, {} workers",
            config.image_width,
            config.image_height,
            config.samples_per_pixel,
            config.max_depth,
            config.worker_count
        );

        progress.phase_changed(RenderPhase::Scheduling);
        let mut buffer = PixelBuffer::new(config.image_width, config.image_height);
        let width = config.image_width as usize;
        log::debug!("Scheduled {} pixel tasks", config.pixel_count());

        progress.phase_changed(RenderPhase::Draining);
        let completed = AtomicUsize::new(0);
        let result = self.pool.install(|| {
            buffer
                .pixels
                .par_iter_mut()
                .enumerate()
                .try_for_each(|(index, slot)| {
                    if self.cancel.is_cancelled() {
                        return Err(RenderError::Cancelled);
                    }

                    let row = (index / width) as u32;
                    let col = (index % width) as u32;
                    let color = shade_task(camera, world, row, col, config)?;
                    *slot = color;

                    completed.fetch_add(1, Ordering::Relaxed);
                    guarded(row, col, || {
                        progress.pixel_done(PixelEvent {
                            row,
                            col,
                            rgb: color_to_rgb8(color),
                        })
                    })
                })
        });

        // install() returns only once every worker is done with its task
        progress.phase_changed(RenderPhase::Barrier);
        if let Err(err) = result {
            log::warn!(
                "Render aborted after {} of {} pixels: {}",
                completed.load(Ordering::Relaxed),
                buffer.pixels.len(),
                err
            );
            return Err(err);
        }

        let stats = RenderStats {
            pixels: completed.into_inner(),
            workers: config.worker_count,
            elapsed: start.elapsed(),
        };
        log::info!("Rendered {} pixels in {:?}", stats.pixels, stats.elapsed);

        Ok((buffer, stats))
    }

    /// Render, then encode the finished buffer as PPM into `writer`.
    pub fn render_to<W: Write>(
        &self,
        camera: &Camera,
        world: &dyn Hittable,
        progress: &dyn ProgressSink,
        writer: W,
    ) -> RenderResult<RenderStats> {
        let (buffer, stats) = self.render(camera, world, progress)?;
        write_ppm(&buffer, writer)?;
        progress.phase_changed(RenderPhase::Serialized);
        Ok(stats)
    }
}

/// Shade one pixel with its own seeded random source.
fn shade_task(
    camera: &Camera,
    world: &dyn Hittable,
    row: u32,
    col: u32,
    config: &RenderConfig,
) -> RenderResult<Color> {
    guarded(row, col, || {
        let mut rng = StdRng::seed_from_u64(pixel_seed(config.seed, row, col));
        render_pixel(camera, world, row, col, config, &mut rng)
    })
}

/// Run part of the task for pixel (row, col), turning a panic into
/// [`RenderError::WorkerFailed`].
fn guarded<T>(row: u32, col: u32, work: impl FnOnce() -> T) -> RenderResult<T> {
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| RenderError::WorkerFailed {
        row,
        col,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

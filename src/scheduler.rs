// Frame scheduling. The host calls `Animator::frame` once per display refresh;
// each frame asks the scheduler for the next one, so the loop runs until
// `stop` or until the host stops answering requests.

use crate::field::ParticleField;
use crate::renderer::Renderer;
use crate::surface::Surface;
use rand::Rng;

pub trait FrameScheduler {
    /// Ask for exactly one future call to `Animator::frame`.
    fn request_frame(&mut self);
}

/// Collects frame requests so a test or a headless host can drive frames by hand.
#[derive(Default, Debug)]
pub struct ManualScheduler {
    pending: usize,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Consumes one pending request, returning whether there was one.
    pub fn take(&mut self) -> bool {
        if self.pending > 0 {
            self.pending -= 1;
            true
        } else {
            false
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
    }
}

pub struct Animator<S: Surface, F: FrameScheduler, R: Rng> {
    pub field: ParticleField<R>,
    pub renderer: Renderer<S>,
    pub scheduler: F,
    running: bool,
    frames: u64,
    dropped_frames: u64,
}

impl<S: Surface, F: FrameScheduler, R: Rng> Animator<S, F, R> {
    pub fn new(field: ParticleField<R>, surface: S, scheduler: F) -> Self {
        let renderer = Renderer::new(surface, field.width(), field.height());
        Animator {
            field,
            renderer,
            scheduler,
            running: false,
            frames: 0,
            dropped_frames: 0,
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        log::info!("starting particle loop with {} particles", self.field.len());
        self.running = true;
        self.scheduler.request_frame();
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!(
                "stopping particle loop after {} frames ({} dropped)",
                self.frames,
                self.dropped_frames
            );
        }
        self.running = false;
    }

    /// Runs one tick. A drawing failure is logged and the next frame is
    /// still requested.
    pub fn frame(&mut self) {
        if !self.running {
            return;
        }
        self.frames += 1;
        if let Err(e) = self.field.tick(&mut self.renderer) {
            self.dropped_frames += 1;
            log::warn!("frame {} dropped: {}", self.frames, e);
        }
        self.scheduler.request_frame();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.on_resize(width, height);
        self.renderer
            .resize(self.field.width(), self.field.height());
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.field.on_pointer_move(x, y);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }
}

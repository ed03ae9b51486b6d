mod utils;

pub mod color;
pub mod config;
pub mod field;
pub mod particle;
pub mod renderer;
pub mod scheduler;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

pub use crate::color::{hex_to_rgba, Color, ColorError};
pub use crate::config::{ConfigError, FieldConfig, Span};
pub use crate::field::ParticleField;
pub use crate::particle::{Particle, ParticleKind};
pub use crate::renderer::Renderer;
pub use crate::scheduler::{Animator, FrameScheduler, ManualScheduler};
pub use crate::surface::{DrawCommand, Fill, RecordingSurface, Surface, SurfaceError};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(log::Level::Info);
}

// Tunables for the particle field. Defaults reproduce the stock background.

use crate::color::Color;
use rand::Rng;
use thiserror::Error;

pub const DEFAULT_PALETTE: [Color; 4] = [
    Color::from_u32(0x7df9ff),
    Color::from_u32(0xc86fff),
    Color::from_u32(0xff4dd2),
    Color::from_u32(0x8b5cff),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("area per particle must be positive, got {0}")]
    BadDensity(f64),
    #[error("minimum particle count must be at least 1")]
    ZeroMinimum,
    #[error("eviction count must be at least 1")]
    ZeroEviction,
    #[error("range {name} is inverted: [{low}, {high})")]
    InvertedSpan { name: &'static str, low: f64, high: f64 },
    #[error("maximum particle count {max} is below the minimum {min}")]
    MaxBelowMin { min: usize, max: usize },
    #[error("{name} = {value} is outside {bounds}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        bounds: &'static str,
    },
}

/// Half-open interval `[low, high)` sampled uniformly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    pub low: f64,
    pub high: f64,
}

impl Span {
    pub const fn new(low: f64, high: f64) -> Span {
        Span { low, high }
    }

    /// Interval of width `2 * half` centered on zero.
    pub fn symmetric(half: f64) -> Span {
        Span { low: -half, high: half }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen::<f64>() * (self.high - self.low) + self.low
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.low <= self.high {
            Ok(())
        } else {
            Err(ConfigError::InvertedSpan {
                name,
                low: self.low,
                high: self.high,
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub palette: Vec<Color>,

    // Population
    pub area_per_particle: f64,
    pub min_particles: usize,
    /// Ceiling on the ambient population however large the viewport.
    pub max_particles: usize,
    pub soft_cap: usize,
    pub evict_count: usize,
    /// Distance past each viewport edge before a particle wraps.
    pub wrap_margin: f64,

    // Ambient particles
    pub ambient_radius: Span,
    pub ambient_velocity: Span,
    pub ambient_opacity: Span,
    pub bright_dot_chance: f64,

    // Pointer bursts
    pub burst_count: usize,
    pub burst_offset: Span,
    pub burst_radius: Span,
    pub burst_velocity: Span,
    pub burst_opacity: f64,

    // Drawing
    pub background_stops: [(f64, &'static str); 2],
    pub blob_draw_scale: f64,
    pub blob_gradient_scale: f64,
    pub dot_min_radius: f64,
    pub dot_radius_divisor: f64,
    pub dot_opacity: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            palette: DEFAULT_PALETTE.to_vec(),
            area_per_particle: 60_000.0,
            min_particles: 40,
            max_particles: 20_000,
            soft_cap: 300,
            evict_count: 40,
            wrap_margin: 100.0,
            ambient_radius: Span::new(6.0, 46.0),
            ambient_velocity: Span::symmetric(0.1),
            ambient_opacity: Span::new(0.08, 0.20),
            bright_dot_chance: 0.3,
            burst_count: 3,
            burst_offset: Span::symmetric(20.0),
            burst_radius: Span::new(2.0, 8.0),
            burst_velocity: Span::symmetric(0.6),
            burst_opacity: 0.6,
            background_stops: [(0.0, "rgba(6,2,12,0.5)"), (1.0, "rgba(2,0,6,0.7)")],
            blob_draw_scale: 1.7,
            blob_gradient_scale: 2.0,
            dot_min_radius: 1.2,
            dot_radius_divisor: 10.0,
            dot_opacity: 0.22,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !(self.area_per_particle > 0.0) {
            return Err(ConfigError::BadDensity(self.area_per_particle));
        }
        if self.min_particles == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.max_particles < self.min_particles {
            return Err(ConfigError::MaxBelowMin {
                min: self.min_particles,
                max: self.max_particles,
            });
        }
        if self.evict_count == 0 {
            return Err(ConfigError::ZeroEviction);
        }
        opacity("ambient_opacity.low", self.ambient_opacity.low)?;
        opacity("ambient_opacity.high", self.ambient_opacity.high)?;
        opacity("burst_opacity", self.burst_opacity)?;
        opacity("dot_opacity", self.dot_opacity)?;
        if !(0.0..=1.0).contains(&self.bright_dot_chance) {
            return Err(ConfigError::OutOfRange {
                name: "bright_dot_chance",
                value: self.bright_dot_chance,
                bounds: "[0, 1]",
            });
        }
        self.ambient_radius.check("ambient_radius")?;
        self.ambient_velocity.check("ambient_velocity")?;
        self.ambient_opacity.check("ambient_opacity")?;
        self.burst_offset.check("burst_offset")?;
        self.burst_radius.check("burst_radius")?;
        self.burst_velocity.check("burst_velocity")?;
        Ok(())
    }

    /// Number of ambient particles for a viewport: `max(min, floor(area / density))`,
    /// capped at `max_particles`.
    pub fn population_for(&self, width: f64, height: f64) -> usize {
        let area = width.max(0.0) * height.max(0.0);
        let scaled = if area.is_finite() {
            (area / self.area_per_particle)
                .floor()
                .min(self.max_particles as f64) as usize
        } else {
            0
        };
        scaled.max(self.min_particles)
    }

    pub fn pick_color<R: Rng>(&self, rng: &mut R) -> Color {
        let i = (rng.gen::<f64>() * self.palette.len() as f64) as usize;
        self.palette[i.min(self.palette.len() - 1)]
    }
}

fn opacity(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            bounds: "(0, 1]",
        })
    }
}

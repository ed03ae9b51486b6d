// Renderer paints a frame of the particle field onto a Surface: clear, the
// diagonal background wash, then every particle in insertion order.

use crate::config::FieldConfig;
use crate::particle::{Particle, ParticleKind};
use crate::surface::{ColorStop, Fill, LinearGradient, RadialGradient, Surface, SurfaceError};

pub struct Renderer<S: Surface> {
    pub surface: S,
    width: f64,
    height: f64,
}

impl<S: Surface> Renderer<S> {
    pub fn new(mut surface: S, width: f64, height: f64) -> Self {
        surface.resize(width, height);
        Renderer {
            surface,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.surface.resize(width, height);
    }

    pub fn clear_screen(&mut self) -> Result<(), SurfaceError> {
        self.surface.clear_rect(0.0, 0.0, self.width, self.height)
    }

    pub fn render_background(&mut self, cfg: &FieldConfig) -> Result<(), SurfaceError> {
        let stops = cfg
            .background_stops
            .iter()
            .map(|&(offset, color)| ColorStop::new(offset, color))
            .collect();
        let fill = Fill::Linear(LinearGradient {
            from: [0.0, 0.0],
            to: [self.width, self.height],
            stops,
        });
        self.surface
            .fill_rect(0.0, 0.0, self.width, self.height, &fill)
    }

    pub fn render_particles<'a, I>(&mut self, particles: I, cfg: &FieldConfig) -> Result<(), SurfaceError>
    where
        I: IntoIterator<Item = &'a Particle>,
    {
        for p in particles {
            let [x, y] = p.pos;
            match p.kind {
                ParticleKind::SoftBlob => {
                    let fill = Fill::Radial(RadialGradient {
                        inner: [x, y, 0.0],
                        outer: [x, y, p.radius * cfg.blob_gradient_scale],
                        stops: vec![
                            ColorStop::new(0.0, p.color.rgba(p.opacity)),
                            ColorStop::new(1.0, p.color.rgba(0.0)),
                        ],
                    });
                    self.surface
                        .fill_circle(x, y, p.radius * cfg.blob_draw_scale, &fill)?;
                }
                ParticleKind::BrightDot => {
                    let radius = (p.radius / cfg.dot_radius_divisor).max(cfg.dot_min_radius);
                    let fill = Fill::Solid(p.color.rgba(cfg.dot_opacity));
                    self.surface.fill_circle(x, y, radius, &fill)?;
                }
            }
        }
        Ok(())
    }

    pub fn render_frame<'a, I>(&mut self, particles: I, cfg: &FieldConfig) -> Result<(), SurfaceError>
    where
        I: IntoIterator<Item = &'a Particle>,
    {
        self.clear_screen()?;
        self.render_background(cfg)?;
        self.render_particles(particles, cfg)
    }
}

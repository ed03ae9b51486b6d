// Particle record plus the two factories that create them: ambient particles
// scattered over the viewport, and bright bursts spawned at the pointer.

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Radial gradient disc fading to transparent.
    SoftBlob,
    /// Small flat disc.
    BrightDot,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub color: Color,
    pub opacity: f64,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(
        pos: Vector2<f64>,
        vel: Vector2<f64>,
        radius: f64,
        color: Color,
        opacity: f64,
        kind: ParticleKind,
    ) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            color,
            opacity,
            kind,
        }
    }

    pub fn ambient<R: Rng>(rng: &mut R, width: f64, height: f64, cfg: &FieldConfig) -> Particle {
        let x = rng.gen::<f64>() * width;
        let y = rng.gen::<f64>() * height;
        let radius = cfg.ambient_radius.sample(rng);
        let vel_x = cfg.ambient_velocity.sample(rng);
        let vel_y = cfg.ambient_velocity.sample(rng);
        let color = cfg.pick_color(rng);
        let opacity = cfg.ambient_opacity.sample(rng);
        let kind = if rng.gen::<f64>() < cfg.bright_dot_chance {
            ParticleKind::BrightDot
        } else {
            ParticleKind::SoftBlob
        };
        Particle::new([x, y], [vel_x, vel_y], radius, color, opacity, kind)
    }

    pub fn burst<R: Rng>(rng: &mut R, px: f64, py: f64, cfg: &FieldConfig) -> Particle {
        let x = px + cfg.burst_offset.sample(rng);
        let y = py + cfg.burst_offset.sample(rng);
        let radius = cfg.burst_radius.sample(rng);
        let vel_x = cfg.burst_velocity.sample(rng);
        let vel_y = cfg.burst_velocity.sample(rng);
        let color = cfg.pick_color(rng);
        Particle::new(
            [x, y],
            [vel_x, vel_y],
            radius,
            color,
            cfg.burst_opacity,
            ParticleKind::BrightDot,
        )
    }

    /// Moves by one tick of velocity, then wraps each axis independently
    /// inside `[-margin, dim + margin]`.
    pub fn advance(&mut self, width: f64, height: f64, margin: f64) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.pos[0] = wrap(self.pos[0], width, margin);
        self.pos[1] = wrap(self.pos[1], height, margin);
    }
}

fn wrap(coord: f64, dim: f64, margin: f64) -> f64 {
    if coord < -margin {
        dim + margin
    } else if coord > dim + margin {
        -margin
    } else {
        coord
    }
}

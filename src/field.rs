// ParticleField owns the particle population and the viewport it lives in.
// Insertion order is eviction order, so the population is a VecDeque and
// pointer bursts push onto the back.

use crate::config::{ConfigError, FieldConfig};
use crate::particle::Particle;
use crate::renderer::Renderer;
use crate::surface::{Surface, SurfaceError};
use rand::Rng;
use std::collections::VecDeque;

pub struct ParticleField<R: Rng> {
    particles: VecDeque<Particle>,
    width: f64,
    height: f64,
    pointer: Option<[f64; 2]>,
    config: FieldConfig,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Builds a populated field with the default configuration.
    pub fn new(width: f64, height: f64, rng: R) -> Self {
        let mut field = ParticleField {
            particles: VecDeque::new(),
            width: 0.0,
            height: 0.0,
            pointer: None,
            config: FieldConfig::default(),
            rng,
        };
        field.populate(width, height);
        field
    }

    /// Builds an empty field; nothing is drawn but the background until `populate`.
    pub fn with_config(config: FieldConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ParticleField {
            particles: VecDeque::new(),
            width: 0.0,
            height: 0.0,
            pointer: None,
            config,
            rng,
        })
    }

    /// Replaces the whole population with freshly scattered ambient particles.
    pub fn populate(&mut self, width: f64, height: f64) {
        self.width = sanitize(width);
        self.height = sanitize(height);
        let count = self.config.population_for(self.width, self.height);

        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let p = Particle::ambient(&mut self.rng, self.width, self.height, &self.config);
            self.particles.push_back(p);
        }
        log::debug!(
            "populated {} particles for {}x{}",
            count,
            self.width,
            self.height
        );
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.populate(width, height);
    }

    /// Spawns a burst of bright dots around the pointer, evicting the oldest
    /// particles once the population passes the soft cap.
    pub fn on_pointer_move(&mut self, px: f64, py: f64) {
        self.pointer = Some([px, py]);
        for _ in 0..self.config.burst_count {
            let p = Particle::burst(&mut self.rng, px, py, &self.config);
            self.particles.push_back(p);
        }
        if self.particles.len() > self.config.soft_cap {
            let evict = self.config.evict_count.min(self.particles.len());
            self.particles.drain(..evict);
            log::trace!(
                "evicted {} particles, {} remain",
                evict,
                self.particles.len()
            );
        }
    }

    /// Advances every particle one step.
    pub fn update(&mut self) {
        let (w, h, margin) = (self.width, self.height, self.config.wrap_margin);
        for p in self.particles.iter_mut() {
            p.advance(w, h, margin);
        }
    }

    /// One frame: step the simulation, then draw it.
    pub fn tick<S: Surface>(&mut self, renderer: &mut Renderer<S>) -> Result<(), SurfaceError> {
        self.update();
        renderer.render_frame(self.particles.iter(), &self.config)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Last pointer position seen by `on_pointer_move`.
    pub fn pointer(&self) -> Option<[f64; 2]> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

fn sanitize(dim: f64) -> f64 {
    if dim.is_finite() && dim > 0.0 {
        dim
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleKind;
    use crate::surface::{DrawCommand, RecordingSurface};
    use crate::testing::ScriptedRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(width: f64, height: f64) -> ParticleField<StdRng> {
        ParticleField::new(width, height, StdRng::seed_from_u64(7))
    }

    fn in_extended_bounds(field: &ParticleField<StdRng>) -> bool {
        let (w, h) = (field.width(), field.height());
        field.particles().all(|p| {
            p.pos[0] >= -100.0 && p.pos[0] <= w + 100.0 && p.pos[1] >= -100.0 && p.pos[1] <= h + 100.0
        })
    }

    #[test]
    fn populate_small_viewport_uses_minimum() {
        let field = seeded(800.0, 600.0);
        assert_eq!(field.len(), 40);
    }

    #[test]
    fn populate_count_and_positions() {
        for &(w, h) in &[(1.0, 1.0), (640.0, 480.0), (3000.0, 2000.0), (3840.0, 2160.0)] {
            let field = seeded(w, h);
            let expected = std::cmp::max(40, ((w * h) / 60_000.0).floor() as usize);
            assert_eq!(field.len(), expected, "{}x{}", w, h);
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] < w);
                assert!(p.pos[1] >= 0.0 && p.pos[1] < h);
                assert!(p.radius >= 6.0 && p.radius < 46.0);
                assert!(p.vel[0].abs() <= 0.1 && p.vel[1].abs() <= 0.1);
                assert!(p.opacity >= 0.08 && p.opacity < 0.20);
            }
        }
    }

    #[test]
    fn populate_mixes_both_kinds() {
        let field = seeded(6000.0, 4000.0);
        let dots = field
            .particles()
            .filter(|p| p.kind == ParticleKind::BrightDot)
            .count();
        assert!(dots > 0 && dots < field.len());
    }

    #[test]
    fn positions_stay_in_extended_bounds() {
        let mut field = seeded(320.0, 240.0);
        for _ in 0..200 {
            field.on_pointer_move(10.0, 230.0);
        }
        for _ in 0..5_000 {
            field.update();
            assert!(in_extended_bounds(&field));
        }
    }

    #[test]
    fn update_moves_by_velocity() {
        let mut field = seeded(800.0, 600.0);
        let before: Vec<Particle> = field.particles().cloned().collect();
        field.update();
        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(new.pos[0], old.pos[0] + old.vel[0]);
            assert_eq!(new.pos[1], old.pos[1] + old.vel[1]);
            assert_eq!(new.vel, old.vel);
            assert_eq!(new.radius, old.radius);
        }
    }

    #[test]
    fn pointer_move_adds_burst() {
        let mut field = seeded(800.0, 600.0);
        field.on_pointer_move(400.0, 300.0);
        assert_eq!(field.len(), 43);
        assert_eq!(field.pointer(), Some([400.0, 300.0]));

        let burst: Vec<&Particle> = field.particles().skip(40).collect();
        for p in burst {
            assert_eq!(p.kind, ParticleKind::BrightDot);
            assert_eq!(p.opacity, 0.6);
            assert!((p.pos[0] - 400.0).abs() <= 20.0);
            assert!((p.pos[1] - 300.0).abs() <= 20.0);
            assert!(p.radius >= 2.0 && p.radius < 8.0);
            assert!(p.vel[0].abs() <= 0.6 && p.vel[1].abs() <= 0.6);
        }
    }

    #[test]
    fn eviction_drops_oldest_forty() {
        let mut field = seeded(800.0, 600.0);
        // 40 ambient + 86 bursts of 3 = 298
        for i in 0..86 {
            field.on_pointer_move(i as f64, 0.0);
        }
        assert_eq!(field.len(), 298);

        let survivor = *field.particles().nth(40).unwrap();
        field.on_pointer_move(1.0, 1.0);
        assert_eq!(field.len(), 261);
        assert_eq!(*field.particles().next().unwrap(), survivor);
    }

    #[test]
    fn population_never_exceeds_cap_between_bursts() {
        let mut field = seeded(800.0, 600.0);
        let mut seen_max = 0;
        for _ in 0..500 {
            field.on_pointer_move(5.0, 5.0);
            seen_max = seen_max.max(field.len());
            assert!(field.len() <= 300);
        }
        assert_eq!(seen_max, 300);
    }

    #[test]
    fn resize_discards_everything() {
        let mut field = seeded(800.0, 600.0);
        for _ in 0..10 {
            field.on_pointer_move(100.0, 100.0);
        }
        field.on_resize(3000.0, 2000.0);
        assert_eq!(field.len(), 100);
        assert!(field
            .particles()
            .all(|p| p.pos[0] < 3000.0 && p.pos[1] < 2000.0 && p.opacity < 0.2));
        assert_eq!((field.width(), field.height()), (3000.0, 2000.0));
    }

    #[test]
    fn unpopulated_field_draws_background_only() {
        let mut field =
            ParticleField::with_config(FieldConfig::default(), ScriptedRng::constant(0.5)).unwrap();
        assert!(field.is_empty());
        let mut renderer = Renderer::new(RecordingSurface::default(), 800.0, 600.0);
        field.tick(&mut renderer).unwrap();
        assert_eq!(renderer.surface.commands().len(), 2);
    }

    #[test]
    fn tick_draws_every_particle_after_moving() {
        let mut field = seeded(800.0, 600.0);
        let mut renderer = Renderer::new(RecordingSurface::default(), 800.0, 600.0);
        field.tick(&mut renderer).unwrap();

        let cmds = renderer.surface.take();
        assert_eq!(cmds.len(), 2 + field.len());
        for (cmd, p) in cmds[2..].iter().zip(field.particles()) {
            match cmd {
                DrawCommand::Circle { x, y, .. } => assert_eq!([*x, *y], p.pos),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn custom_config_is_validated() {
        let mut cfg = FieldConfig::default();
        cfg.palette.clear();
        let res = ParticleField::with_config(cfg, ScriptedRng::constant(0.5));
        assert_eq!(res.err(), Some(ConfigError::EmptyPalette));
    }

    #[test]
    fn huge_viewport_populates_up_to_ceiling() {
        let field = ParticleField::new(1e200, 1e100, ScriptedRng::constant(0.5));
        assert_eq!(field.len(), field.config().max_particles);
    }

    #[test]
    fn degenerate_viewport_still_populates() {
        let field = ParticleField::new(f64::NAN, -3.0, ScriptedRng::constant(0.5));
        assert_eq!(field.len(), 40);
        assert!(field.particles().all(|p| p.pos == [0.0, 0.0]));
    }
}

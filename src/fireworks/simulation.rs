use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::explosion::{Explosion, ExplosionKind};
use super::particle::{FADE_GLYPHS, Particle, Spark, TRAIL_GLYPH};
use super::sequence::Placement;

pub const DEFAULT_WIDTH: f64 = 500.0;
pub const DEFAULT_HEIGHT: f64 = 300.0;
pub const DEFAULT_MAX_FRAMES: u32 = 80;

/// Height above the bottom edge where bouncing particles rebound
const FLOOR_OFFSET: f64 = 20.0;

/// One thing to draw, in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub glyph: char,
    /// Source of the color
    pub spark: Spark,
    pub alpha: f64,
    pub bold: bool,
    pub trail: bool,
}

/// Particle physics for one fireworks show.
///
/// The simulation is stepped once per frame. After each step, [`Simulation::sprites`]
/// holds a drawable snapshot, so rendering never touches the RNG.
#[derive(Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    frame: u32,
    max_frames: u32,
    width: f64,
    height: f64,
    rng: StdRng,
    sprites: Vec<Sprite>,
}

impl Simulation {
    pub fn new(width: f64, height: f64, max_frames: u32) -> Self {
        Self::with_rng(width, height, max_frames, StdRng::from_entropy())
    }

    /// Deterministic simulation for tests and replays
    pub fn with_seed(width: f64, height: f64, max_frames: u32, seed: u64) -> Self {
        Self::with_rng(width, height, max_frames, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f64, height: f64, max_frames: u32, rng: StdRng) -> Self {
        Simulation {
            particles: Vec::new(),
            frame: 0,
            max_frames,
            width,
            height,
            rng,
            sprites: Vec::new(),
        }
    }

    /// Drop every particle and rewind the frame counter
    pub fn reset(&mut self) {
        self.particles.clear();
        self.sprites.clear();
        self.frame = 0;
    }

    /// Spawn a randomized explosion at `(x, y)`
    pub fn add_explosion(&mut self, x: f64, y: f64, kind: ExplosionKind) {
        let explosion = Explosion::random(x, y, kind, &mut self.rng);
        self.spawn(explosion);
    }

    /// Spawn a prepared explosion
    pub fn spawn(&mut self, explosion: Explosion) {
        let particles = explosion.spawn(&mut self.rng);
        self.particles.extend(particles);
    }

    /// Canvas position for a placement
    pub fn resolve(&mut self, placement: Placement) -> (f64, f64) {
        match placement {
            Placement::Fixed { fx, fy } => (self.width * fx, self.height * fy),
            Placement::Random => (
                self.width * (0.2 + self.rng.r#gen::<f64>() * 0.6),
                self.height * (0.1 + self.rng.r#gen::<f64>() * 0.4),
            ),
        }
    }

    /// Advance every particle one frame and drop the ones that are done
    pub fn update(&mut self) {
        let frame = self.frame as f64;
        let (width, height) = (self.width, self.height);
        let rng = &mut self.rng;

        self.particles.retain_mut(|p| {
            p.trail.push(p.x, p.y, p.alpha);
            p.trail.fade();

            p.vy += p.gravity;

            p.vx *= p.wind_resistance;
            p.vy *= p.wind_resistance;

            p.vx += 0.03 * (frame * 0.2 + p.x * 0.02).sin();

            p.vx += (rng.r#gen::<f64>() - 0.5) * 0.04;
            p.vy += (rng.r#gen::<f64>() - 0.5) * 0.025;

            p.x += p.vx;
            p.y += p.vy;
            p.age += 1;

            if p.bounce && p.y >= height - FLOOR_OFFSET && p.vy > 0.0 {
                p.vy *= -0.8;
                p.vx *= 0.9;
                p.y = height - FLOOR_OFFSET;
                p.vx += (rng.r#gen::<f64>() - 0.5) * 0.5;
            }

            if p.fade {
                let ratio = p.life_ratio();
                if ratio > 0.7 {
                    p.alpha = 1.0 - (ratio - 0.7) / 0.3;
                } else if ratio < 0.1 {
                    p.alpha = ratio / 0.1;
                }
                p.alpha = p.alpha.clamp(0.0, 1.0);
            }

            !(p.x < 0.0 || p.x > width || p.y > height || p.age > p.max_age)
        });

        self.frame += 1;
    }

    /// One frame: physics, then a fresh sprite snapshot
    pub fn step(&mut self) {
        self.update();
        self.compose_sprites();
    }

    fn compose_sprites(&mut self) {
        self.sprites.clear();

        for p in &self.particles {
            for point in p.trail.iter().filter(|t| t.alpha > 0.1) {
                self.sprites.push(Sprite {
                    x: point.x,
                    y: point.y,
                    glyph: TRAIL_GLYPH,
                    spark: p.spark,
                    alpha: point.alpha,
                    bold: false,
                    trail: true,
                });
            }
        }

        for p in &self.particles {
            let ratio = p.life_ratio();
            let mut spark = p.spark;
            let mut glyph = spark.glyph();

            if p.sparkle && self.rng.gen_bool(0.3) {
                spark = *Spark::SPARKLE.choose(&mut self.rng).unwrap_or(&spark);
                glyph = spark.glyph();
            } else if ratio > 0.8 {
                if p.alpha < 0.5 {
                    glyph = *FADE_GLYPHS.choose(&mut self.rng).unwrap_or(&TRAIL_GLYPH);
                }
            } else if ratio > 0.6 && self.rng.gen_bool(0.4) {
                spark = *Spark::TRANSITION.choose(&mut self.rng).unwrap_or(&spark);
                glyph = spark.glyph();
            }

            self.sprites.push(Sprite {
                x: p.x,
                y: p.y,
                glyph,
                spark,
                alpha: p.alpha,
                bold: p.alpha > 0.7,
                trail: false,
            });
        }
    }

    /// True once the frame budget is spent and every particle is gone
    pub fn is_finished(&self) -> bool {
        self.frame >= self.max_frames && self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for seeding particle states directly
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn max_frames(&self) -> u32 {
        self.max_frames
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_MAX_FRAMES)
    }
}

use std::f64::consts::PI;

use rand::Rng;
use rand::seq::SliceRandom;

use super::particle::{Particle, Spark, Trail};

/// Shape of the initial velocity field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionKind {
    /// Uniform in every direction
    Burst,
    /// Narrow cone pointing up
    Fountain,
    /// Fixed-radius spiral
    Spiral,
    Heart,
    /// Five-pointed star
    Star,
}

/// A pending explosion. Spawning consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub count: usize,
    pub palette: Vec<Spark>,
    pub speed: f64,
    /// Base lifetime in frames
    pub life: u32,
    pub kind: ExplosionKind,
}

impl Explosion {
    /// Explosion at `(x, y)` with randomized size, speed and lifetime
    pub fn random<R: Rng + ?Sized>(x: f64, y: f64, kind: ExplosionKind, rng: &mut R) -> Self {
        Explosion {
            x,
            y,
            count: 30 + rng.gen_range(0..40),
            palette: Spark::ALL.to_vec(),
            speed: 4.0 + rng.r#gen::<f64>() * 4.0,
            life: 20 + rng.gen_range(0..15),
            kind,
        }
    }

    /// Launch velocity of the `i`th particle
    pub fn velocity<R: Rng + ?Sized>(&self, i: usize, rng: &mut R) -> (f64, f64) {
        let s = self.speed;
        match self.kind {
            ExplosionKind::Burst => {
                let angle = rng.r#gen::<f64>() * 2.0 * PI;
                let speed = s * (0.5 + rng.r#gen::<f64>() * 0.5);
                (angle.cos() * speed, angle.sin() * speed)
            }
            ExplosionKind::Fountain => {
                let angle = -PI / 2.0 + (rng.r#gen::<f64>() - 0.5) * PI / 3.0;
                let speed = s * (0.7 + rng.r#gen::<f64>() * 0.6);
                (angle.cos() * speed, angle.sin() * speed)
            }
            ExplosionKind::Spiral => {
                let angle = i as f64 * 0.5;
                let radius = s * 0.8;
                (angle.cos() * radius, angle.sin() * radius)
            }
            ExplosionKind::Heart => {
                let t = i as f64 / self.count as f64 * 2.0 * PI;
                let scale = s * 0.15;
                let hx = scale * 16.0 * t.sin().powi(3);
                let hy = -scale
                    * (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
                let pulse = 1.0 + 0.3 * (i as f64 * 0.5).sin();
                (hx * pulse, hy * pulse)
            }
            ExplosionKind::Star => {
                let point = i % 10;
                let angle = point as f64 * (PI / 5.0);
                let radius = if point % 2 == 0 { s } else { s * 0.4 };
                (angle.cos() * radius, angle.sin() * radius)
            }
        }
    }

    /// Turn the explosion into its particles
    pub fn spawn<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Particle> {
        (0..self.count)
            .map(|i| {
                let (vx, vy) = self.velocity(i, rng);
                Particle {
                    x: self.x,
                    y: self.y,
                    vx,
                    vy,
                    start_x: self.x,
                    start_y: self.y,
                    age: 0,
                    max_age: self.life + rng.gen_range(0..30),
                    size: 0.8 + rng.r#gen::<f64>() * 1.5,
                    spark: self.palette.choose(rng).copied().unwrap_or(Spark::Rocket),
                    gravity: 0.15 + rng.r#gen::<f64>() * 0.25,
                    wind_resistance: 0.95 + rng.r#gen::<f64>() * 0.03,
                    fade: true,
                    alpha: 1.0,
                    trail: Trail::default(),
                    bounce: rng.gen_bool(0.4),
                    sparkle: rng.gen_bool(0.2),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed(kind: ExplosionKind, count: usize, speed: f64) -> Explosion {
        Explosion {
            x: 100.0,
            y: 50.0,
            count,
            palette: Spark::ALL.to_vec(),
            speed,
            life: 20,
            kind,
        }
    }

    #[test]
    fn random_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let e = Explosion::random(0.0, 0.0, ExplosionKind::Burst, &mut rng);
            assert!((30..70).contains(&e.count));
            assert!((4.0..8.0).contains(&e.speed));
            assert!((20..35).contains(&e.life));
            assert_eq!(e.palette.len(), 10);
        }
    }

    #[test]
    fn spawn_particles_start_at_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let e = Explosion::random(120.0, 80.0, ExplosionKind::Heart, &mut rng);
        let count = e.count;
        let life = e.life;
        let particles = e.spawn(&mut rng);
        assert_eq!(particles.len(), count);
        for p in &particles {
            assert_eq!((p.x, p.y), (120.0, 80.0));
            assert_eq!((p.start_x, p.start_y), (120.0, 80.0));
            assert!(p.max_age >= life && p.max_age < life + 30);
            assert!((0.8..2.3).contains(&p.size));
            assert!((0.15..0.4).contains(&p.gravity));
            assert!((0.95..0.98).contains(&p.wind_resistance));
            assert_eq!(p.alpha, 1.0);
            assert!(p.fade);
            assert!(p.trail.is_empty());
        }
    }

    #[test]
    fn burst_speed_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let e = fixed(ExplosionKind::Burst, 50, 6.0);
        for i in 0..50 {
            let (vx, vy) = e.velocity(i, &mut rng);
            let speed = (vx * vx + vy * vy).sqrt();
            assert!(speed >= 3.0 - 1e-9 && speed <= 6.0 + 1e-9);
        }
    }

    #[test]
    fn fountain_points_up() {
        let mut rng = StdRng::seed_from_u64(4);
        let e = fixed(ExplosionKind::Fountain, 50, 6.0);
        for i in 0..50 {
            let (vx, vy) = e.velocity(i, &mut rng);
            assert!(vy < 0.0);
            // Within 30 degrees of vertical
            assert!(vx.abs() <= (-vy) * (PI / 6.0).tan() + 1e-9);
        }
    }

    #[test]
    fn spiral_has_fixed_radius() {
        let mut rng = StdRng::seed_from_u64(5);
        let e = fixed(ExplosionKind::Spiral, 10, 5.0);
        for i in 0..10 {
            let (vx, vy) = e.velocity(i, &mut rng);
            assert!(((vx * vx + vy * vy).sqrt() - 4.0).abs() < 1e-9);
        }
        let (vx, vy) = e.velocity(0, &mut rng);
        assert!((vx - 4.0).abs() < 1e-9 && vy.abs() < 1e-9);
    }

    #[test]
    fn star_alternates_radius() {
        let mut rng = StdRng::seed_from_u64(6);
        let e = fixed(ExplosionKind::Star, 20, 5.0);
        for i in 0..20 {
            let (vx, vy) = e.velocity(i, &mut rng);
            let r = (vx * vx + vy * vy).sqrt();
            let expected = if i % 2 == 0 { 5.0 } else { 2.0 };
            assert!((r - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn heart_top_point() {
        let mut rng = StdRng::seed_from_u64(8);
        let e = fixed(ExplosionKind::Heart, 40, 4.0);
        // t = 0: x = 0, y = -scale * (13 - 5 - 2 - 1)
        let (vx, vy) = e.velocity(0, &mut rng);
        assert!(vx.abs() < 1e-9);
        assert!((vy - (-0.6 * 5.0)).abs() < 1e-9);
    }
}

use std::collections::VecDeque;

/// Points kept in each particle's trail
pub const TRAIL_CAPACITY: usize = 3;

/// Per-tick fade applied to every trail point
pub const TRAIL_FADE: f64 = 0.8;

/// The kind of spark a particle draws as. Each one has its own glyph and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spark {
    Rocket,
    Sparkler,
    Sparkles,
    GlowingStar,
    Dizzy,
    Star,
    Collision,
    Fire,
    ShootingStar,
    Confetti,
}

impl Spark {
    pub const ALL: [Spark; 10] = [
        Spark::Rocket,
        Spark::Sparkler,
        Spark::Sparkles,
        Spark::GlowingStar,
        Spark::Dizzy,
        Spark::Star,
        Spark::Collision,
        Spark::Fire,
        Spark::ShootingStar,
        Spark::Confetti,
    ];

    /// Sparks a sparkling particle flickers between
    pub const SPARKLE: [Spark; 4] = [Spark::Sparkles, Spark::Dizzy, Spark::GlowingStar, Spark::Star];

    /// Sparks shown during the middle of a particle's life
    pub const TRANSITION: [Spark; 3] = [Spark::Sparkles, Spark::Dizzy, Spark::Star];

    pub fn glyph(self) -> char {
        match self {
            Spark::Rocket => '*',
            Spark::Sparkler => '+',
            Spark::Sparkles => '✦',
            Spark::GlowingStar => '✶',
            Spark::Dizzy => '✧',
            Spark::Star => '★',
            Spark::Collision => '✺',
            Spark::Fire => '❋',
            Spark::ShootingStar => '⁕',
            Spark::Confetti => '⁂',
        }
    }
}

/// Glyphs for a particle that is almost gone
pub const FADE_GLYPHS: [char; 3] = ['·', '˙', '°'];

/// Glyph for trail points
pub const TRAIL_GLYPH: char = '·';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
    pub age: u32,
}

/// Recent positions of a particle, oldest first. Never longer than [`TRAIL_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    /// Record a position, dropping the oldest point when full
    pub fn push(&mut self, x: f64, y: f64, alpha: f64) {
        if self.points.len() == TRAIL_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint { x, y, alpha, age: 0 });
    }

    /// Age every point by one tick and dim it
    pub fn fade(&mut self) {
        for p in &mut self.points {
            p.age += 1;
            p.alpha *= TRAIL_FADE;
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }
}

/// One spark of an explosion. Positions are in canvas units, time in frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub age: u32,
    pub max_age: u32,
    pub size: f64,
    pub spark: Spark,
    pub gravity: f64,
    pub wind_resistance: f64,
    pub fade: bool,
    /// Opacity in [0, 1]
    pub alpha: f64,
    pub trail: Trail,
    pub bounce: bool,
    pub sparkle: bool,
}

impl Particle {
    /// Fraction of its life the particle has used up
    pub fn life_ratio(&self) -> f64 {
        if self.max_age == 0 {
            return 1.0;
        }
        self.age as f64 / self.max_age as f64
    }
}

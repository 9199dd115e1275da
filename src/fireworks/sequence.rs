use std::time::Duration;

use super::explosion::ExplosionKind;

/// Where a cue explodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Fractions of the canvas width and height
    Fixed { fx: f64, fy: f64 },
    /// Somewhere in the upper middle of the canvas
    Random,
}

/// One scheduled explosion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    /// Offset from the start of the show
    pub at: Duration,
    pub kind: ExplosionKind,
    pub placement: Placement,
}

impl Cue {
    fn fixed(ms: u64, kind: ExplosionKind, fx: f64, fy: f64) -> Self {
        Cue {
            at: Duration::from_millis(ms),
            kind,
            placement: Placement::Fixed { fx, fy },
        }
    }
}

/// The celebration timeline: an opening burst, a heart, stars, fountains,
/// spirals, a triple-burst finale and five random bursts. Sorted by time.
pub fn celebration() -> Vec<Cue> {
    use ExplosionKind::*;

    let mut cues = vec![
        Cue::fixed(0, Burst, 0.5, 0.3),
        Cue::fixed(150, Burst, 0.3, 0.25),
        Cue::fixed(150, Burst, 0.7, 0.25),
        Cue::fixed(400, Heart, 0.5, 0.4),
        Cue::fixed(700, Star, 0.2, 0.2),
        Cue::fixed(750, Star, 0.8, 0.2),
        Cue::fixed(800, Star, 0.5, 0.15),
        Cue::fixed(1000, Fountain, 0.25, 0.7),
        Cue::fixed(1000, Fountain, 0.75, 0.7),
        Cue::fixed(1150, Spiral, 0.4, 0.5),
        Cue::fixed(1250, Spiral, 0.6, 0.5),
        Cue::fixed(1500, Burst, 0.5, 0.4),
        Cue::fixed(1580, Burst, 0.45, 0.35),
        Cue::fixed(1660, Burst, 0.55, 0.45),
    ];
    cues.extend((0..5).map(|k| Cue {
        at: Duration::from_millis(1760 + k * 60),
        kind: Burst,
        placement: Placement::Random,
    }));
    cues
}

use std::collections::VecDeque;
use std::time::Duration;

use super::explosion::ExplosionKind;
use super::sequence::{self, Cue, Placement};
use super::simulation::Simulation;
use crate::model::config::FireworksConfig;

/// Most ticks replayed by a single `advance`; the rest of a long stall is skipped
pub const MAX_CATCH_UP_TICKS: u32 = 3;

/// Work for the show, processed in FIFO order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    AddExplosion {
        kind: ExplosionKind,
        placement: Placement,
    },
    Tick,
}

/// Drives a [`Simulation`] through the celebration timeline.
///
/// Time only moves when the owner calls [`Show::advance`], so the show runs on
/// whatever thread owns it.
#[derive(Debug)]
pub struct Show {
    sim: Simulation,
    cues: Vec<Cue>,
    next_cue: usize,
    frame_interval: Duration,
    elapsed: Duration,
    next_tick: Duration,
    queue: VecDeque<Message>,
    stopped: bool,
}

impl Show {
    pub fn new(sim: Simulation, cues: Vec<Cue>, frame_interval: Duration) -> Self {
        Show {
            sim,
            cues,
            next_cue: 0,
            frame_interval,
            elapsed: Duration::ZERO,
            next_tick: frame_interval,
            queue: VecDeque::new(),
            stopped: false,
        }
    }

    /// The standard celebration, sized from config. `seed` makes it repeatable.
    pub fn celebration(config: &FireworksConfig, seed: Option<u64>) -> Self {
        let sim = match seed {
            Some(seed) => Simulation::with_seed(config.width, config.height, config.max_frames, seed),
            None => Simulation::new(config.width, config.height, config.max_frames),
        };
        let interval = Duration::from_millis(config.frame_ms.max(1));
        Show::new(sim, sequence::celebration(), interval)
    }

    /// Rewind to the beginning and fire the cues due at time zero
    pub fn start(&mut self) {
        self.sim.reset();
        self.next_cue = 0;
        self.elapsed = Duration::ZERO;
        self.next_tick = self.frame_interval;
        self.queue.clear();
        self.stopped = false;
        self.advance(Duration::ZERO);
    }

    /// Halt the show. Everything after this is a no-op.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.queue.clear();
    }

    /// Queue a message for the next drain
    pub fn send(&mut self, msg: Message) {
        if !self.stopped {
            self.queue.push_back(msg);
        }
    }

    /// Move the clock forward by `dt`, queue every cue and tick that came due, and
    /// process the queue. A cue and a tick due at the same instant run cue first.
    pub fn advance(&mut self, dt: Duration) {
        if self.stopped {
            return;
        }
        self.elapsed += dt;

        let mut ticks = 0;
        loop {
            let cue_at = self
                .cues
                .get(self.next_cue)
                .map(|c| c.at)
                .filter(|at| *at <= self.elapsed);
            let tick_due = self.next_tick <= self.elapsed;

            match cue_at {
                Some(at) if !tick_due || at <= self.next_tick => {
                    let cue = self.cues[self.next_cue];
                    self.next_cue += 1;
                    self.queue.push_back(Message::AddExplosion {
                        kind: cue.kind,
                        placement: cue.placement,
                    });
                }
                _ if tick_due => {
                    if ticks < MAX_CATCH_UP_TICKS {
                        self.queue.push_back(Message::Tick);
                        ticks += 1;
                    }
                    self.next_tick += self.frame_interval;
                }
                _ => break,
            }
        }

        self.process();
    }

    /// Handle every queued message
    pub fn process(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            self.handle(msg);
        }
    }

    fn handle(&mut self, msg: Message) {
        if self.stopped {
            return;
        }
        match msg {
            Message::AddExplosion { kind, placement } => {
                let (x, y) = self.sim.resolve(placement);
                self.sim.add_explosion(x, y, kind);
            }
            Message::Tick => {
                if !self.sim.is_finished() {
                    self.sim.step();
                }
            }
        }
    }

    /// All cues fired and the simulation has wound down, or the show was stopped
    pub fn is_done(&self) -> bool {
        self.stopped || (self.next_cue >= self.cues.len() && self.sim.is_finished())
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn cues_fired(&self) -> usize {
        self.next_cue
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}

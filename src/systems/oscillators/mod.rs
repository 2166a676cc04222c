//! Oscillators - motion sources that drive a body every step
//!
//! - `MovingPlatform`: sine/cosine trajectory along an axis
//! - `Pendulum`: swings around a pivot with its own velocity state
//! - `DampedHarmonicOscillator`: spring force towards an origin
//!
//! Platforms and pendulums report their motion so a carrier can hand it to
//! its riders.

mod pendulum;
mod platform;
mod spring;

pub use pendulum::Pendulum;
pub use platform::MovingPlatform;
pub use spring::{DampedHarmonicOscillator, DampingRegime};

use crate::core::Vec2;
use crate::systems::body::{BodyId, PhysicsBody};
use crate::systems::gravity::GravitySample;

pub type OscillatorId = u32;

/// Step context handed to a motion source.
pub struct MotionContext<'a> {
    pub body: &'a mut PhysicsBody,
    pub gravity: &'a GravitySample,
    pub dt: f32,
}

/// Carrier motion produced by one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarrierMotion {
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

/// Motion source trait - each oscillator kind implements this
pub trait MotionSource {
    /// The body this source moves.
    fn body(&self) -> BodyId;
    fn step(&mut self, ctx: &mut MotionContext) -> Option<CarrierMotion>;
    fn reset(&mut self);
}

pub enum Oscillator {
    Platform(MovingPlatform),
    Pendulum(Pendulum),
    Spring(DampedHarmonicOscillator),
}

impl Oscillator {
    fn source(&self) -> &dyn MotionSource {
        match self {
            Oscillator::Platform(p) => p,
            Oscillator::Pendulum(p) => p,
            Oscillator::Spring(s) => s,
        }
    }

    fn source_mut(&mut self) -> &mut dyn MotionSource {
        match self {
            Oscillator::Platform(p) => p,
            Oscillator::Pendulum(p) => p,
            Oscillator::Spring(s) => s,
        }
    }
}

/// Oscillator registry - keeps sources in registration order
pub struct OscillatorRegistry {
    entries: Vec<(OscillatorId, Oscillator)>,
    next_id: OscillatorId,
}

impl OscillatorRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, oscillator: Oscillator) -> OscillatorId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push((id, oscillator));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: OscillatorId) -> Option<&Oscillator> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, o)| o)
    }

    pub fn get_mut(&mut self, id: OscillatorId) -> Option<&mut Oscillator> {
        self.entries.iter_mut().find(|(i, _)| *i == id).map(|(_, o)| o)
    }

    pub fn reset(&mut self, id: OscillatorId) -> bool {
        match self.get_mut(id) {
            Some(o) => {
                o.source_mut().reset();
                true
            }
            None => false,
        }
    }

    /// Drops every source attached to `body`.
    pub fn remove_for_body(&mut self, body: BodyId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, o)| o.source().body() != body);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 1;
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&mut dyn MotionSource, OscillatorId)> {
        self.entries.iter_mut().map(|(id, o)| (o.source_mut(), *id))
    }
}

impl Default for OscillatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

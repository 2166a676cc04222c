//! MovingWith - carries riders along with a moving body
//!
//! A carrier remembers which bodies stand on it (by id, it never owns them).
//! Every step its motion source calls `propagate`, which hands the carrier
//! velocity down as base velocity and adds the carrier acceleration to each rider.

use crate::core::Vec2;
use crate::systems::body::BodyId;
use crate::systems::body_system::BodySystem;

/// Default tolerance between "up" and the contact direction, in degrees.
pub const DEFAULT_MOVING_WITH_ANGLE: f32 = 10.0;

pub struct MovingWith {
    carrier: BodyId,
    angle_tolerance_deg: f32,
    riders: Vec<BodyId>,
    last_velocity: Vec2,
}

impl MovingWith {
    pub fn new(carrier: BodyId, angle_tolerance_deg: f32) -> Self {
        Self {
            carrier,
            angle_tolerance_deg,
            riders: Vec::new(),
            last_velocity: Vec2::zero(),
        }
    }

    pub fn carrier(&self) -> BodyId {
        self.carrier
    }

    pub fn riders(&self) -> &[BodyId] {
        &self.riders
    }

    pub fn last_velocity(&self) -> Vec2 {
        self.last_velocity
    }

    /// `normal` is the contact normal seen from the carrier, so a rider on
    /// top produces a normal pointing down.
    pub fn accepts(&self, normal: Vec2) -> bool {
        (-normal).angle_deg(Vec2::UP) < self.angle_tolerance_deg
    }

    /// Returns true when the body was accepted as a rider.
    pub fn on_contact_gained(&mut self, bodies: &mut BodySystem, rider: BodyId, normal: Vec2) -> bool {
        if rider == self.carrier || !self.accepts(normal) {
            return false;
        }
        let Some(body) = bodies.get_mut(rider) else {
            return false;
        };

        if !self.riders.contains(&rider) {
            self.riders.push(rider);
        }
        body.set_base_velocity(self.last_velocity);
        true
    }

    pub fn on_contact_lost(&mut self, bodies: &mut BodySystem, rider: BodyId, now: f32) {
        let Some(idx) = self.riders.iter().position(|r| *r == rider) else {
            return;
        };
        self.riders.remove(idx);
        if let Some(body) = bodies.get_mut(rider) {
            body.reset_base_velocity(now);
        }
    }

    pub fn propagate(&mut self, bodies: &mut BodySystem, velocity: Vec2, acceleration: Vec2, dt: f32) {
        self.last_velocity = velocity;
        let delta = acceleration * dt;
        let carrier = self.carrier;

        self.riders.retain(|id| match bodies.get_mut(*id) {
            Some(body) => {
                body.set_base_velocity(velocity);
                body.add_velocity(delta);
                true
            }
            None => {
                tracing::trace!(carrier, rider = *id, "dropping destroyed rider");
                false
            }
        });
    }
}

use crate::domain::config::BodyConfig;
use crate::systems::body::{BodyId, PhysicsBody};
use crate::systems::gravity::GravitySample;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Owns every body in the world.
pub struct BodySystem {
    bodies: Vec<PhysicsBody>,
    next_id: BodyId,
}

impl BodySystem {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a new body and return its id. Ids are never reused.
    pub fn add_body(&mut self, config: &BodyConfig) -> BodyId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.bodies.push(PhysicsBody::new(id, config));
        id
    }

    /// Remove a body by ID. Returns false when it was not registered.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        if let Some(idx) = self.bodies.iter().position(|b| b.id == id) {
            self.bodies.swap_remove(idx);
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.next_id = 1;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.iter().any(|b| b.id == id)
    }

    pub fn get(&self, id: BodyId) -> Option<&PhysicsBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut PhysicsBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhysicsBody> {
        self.bodies.iter()
    }

    /// Integration pass. Every body only touches its own state here, so the
    /// pass runs in parallel when the `parallel` feature is on.
    pub fn integrate_all(&mut self, gravity: &GravitySample, time: f32, dt: f32) {
        #[cfg(feature = "parallel")]
        {
            self.bodies
                .par_iter_mut()
                .for_each(|b| b.integrate(gravity, time, dt));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for b in self.bodies.iter_mut() {
                b.integrate(gravity, time, dt);
            }
        }
    }

    pub fn integrate_positions(&mut self, dt: f32) {
        for b in self.bodies.iter_mut() {
            b.integrate_position(dt);
        }
    }
}

impl Default for BodySystem {
    fn default() -> Self {
        Self::new()
    }
}

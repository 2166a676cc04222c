//! GravityField - the world's single directional gravity vector
//!
//! Bodies subtract the gravity vector from their velocity, so the default
//! direction `(0, 1)` pulls towards -y. The field is only written through
//! `set_direction`; bodies read a per-step `GravitySample` copy.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// Magnitude applied to every non-zero gravity direction.
pub const GRAVITY_ACCELERATION: f32 = 9.81;

/// Snapshot of the field handed to bodies for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravitySample {
    pub vector: Vec2,
    pub acceleration: f32,
}

impl GravitySample {
    /// Unit vector of the direction bodies actually accelerate towards.
    pub fn pull_direction(&self) -> Vec2 {
        (-self.vector).normalize()
    }
}

#[derive(Clone, Debug)]
pub struct GravityField {
    vector: Vec2,
    version: u64,
}

impl GravityField {
    pub fn new() -> Self {
        Self {
            vector: GravityDirection::Down.to_vector() * GRAVITY_ACCELERATION,
            version: 0,
        }
    }

    /// Normalizes `direction` and scales it by `GRAVITY_ACCELERATION`.
    /// A zero direction disables gravity.
    pub fn set_direction(&mut self, direction: Vec2) {
        let direction = finite!(direction, "GravityField::set_direction");
        self.vector = direction.normalize() * GRAVITY_ACCELERATION;
        self.version += 1;
    }

    pub fn get(&self) -> GravitySample {
        GravitySample {
            vector: self.vector,
            acceleration: GRAVITY_ACCELERATION,
        }
    }

    /// Bumped by every `set_direction`.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for GravityField {
    fn default() -> Self {
        Self::new()
    }
}

/// Named gravity directions a controller can switch between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityDirection {
    Left,
    Down,
    Right,
    Up,
    None,
}

/// Turns `v` by `quarter_turns` steps of `(x, y) -> (-y, x)`; negative
/// counts turn the other way.
pub fn rotate_quarter_turns(v: Vec2, quarter_turns: i32) -> Vec2 {
    let mut v = v;
    for _ in 0..quarter_turns.rem_euclid(4) {
        v = Vec2::new(-v.y, v.x);
    }
    v
}

impl GravityDirection {
    pub fn to_vector(self) -> Vec2 {
        match self {
            GravityDirection::Down => Vec2::new(0.0, 1.0),
            GravityDirection::Left => Vec2::new(1.0, 0.0),
            GravityDirection::Right => Vec2::new(-1.0, 0.0),
            GravityDirection::Up => Vec2::new(0.0, -1.0),
            GravityDirection::None => Vec2::zero(),
        }
    }

    /// Named direction for an axis-aligned vector of any length.
    pub fn from_vector(v: Vec2) -> Option<Self> {
        let n = v.normalize();
        [
            GravityDirection::Left,
            GravityDirection::Down,
            GravityDirection::Right,
            GravityDirection::Up,
            GravityDirection::None,
        ]
        .into_iter()
        .find(|d| (d.to_vector() - n).length() < 1e-4)
    }

    /// Steps through Left -> Down -> Right -> Up, wrapping in both directions.
    pub fn rotated(self, quarter_turns: i32) -> Self {
        Self::from_vector(rotate_quarter_turns(self.to_vector(), quarter_turns)).unwrap_or(self)
    }
}

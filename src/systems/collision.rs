//! Collision response
//!
//! Both formulas read cached velocities, i.e. the velocity a body had at the
//! end of its own integration this step. Each body of a dynamic pair resolves
//! its own side independently; there is no shared impulse.

use crate::core::Vec2;
use crate::systems::body::BodySnapshot;

/// Below this resultant magnitude a dynamic exchange is treated as a reflection.
pub const COLLISION_MAGNITUDE_TOLERANCE: f32 = -0.1;

/// Bounce off something immovable.
///
/// `v' = b * reflect(c * |n|, n) + c * (1 - |n|)`: the part of the cached
/// velocity along the normal axes is reflected and scaled by the bounciness,
/// the rest passes through untouched.
pub fn resolve_static(cached: Vec2, normal: Vec2, bounciness: f32) -> Vec2 {
    let normal_abs = normal.abs();
    cached.scale(normal_abs).reflect(normal) * bounciness + cached.scale(Vec2::ONE - normal_abs)
}

/// Momentum exchange between two dynamic bodies, seen from `this`.
///
/// The exchange uses the mean bounciness of both bodies; the separation test
/// uses only `this` body's bounciness, so the two sides of one contact can
/// disagree.
pub fn resolve_dynamic(this: &BodySnapshot, other: &BodySnapshot, normal: Vec2) -> Vec2 {
    let m1 = this.mass;
    let m2 = other.mass;
    let c1 = this.cached_velocity;
    let c2 = other.cached_velocity;
    let total = m1 + m2;

    let mixed_bounciness = (this.bounciness + other.bounciness) / 2.0;
    let exchanged = (c1 * m1 + c2 * m2 + (c2 - c1) * (m2 * mixed_bounciness)) / total;

    let magnitude = resultant_magnitude(this, other);

    if magnitude < COLLISION_MAGNITUDE_TOLERANCE {
        (-exchanged).reflect(normal)
    } else {
        exchanged
    }
}

/// Scalar version of the exchange on speeds, with `this` body's own bounciness.
pub fn resultant_magnitude(this: &BodySnapshot, other: &BodySnapshot) -> f32 {
    let s1 = this.cached_velocity.length();
    let s2 = other.cached_velocity.length();
    (this.mass * s1 + other.mass * s2 + other.mass * this.bounciness * (s2 - s1))
        / (this.mass + other.mass)
}

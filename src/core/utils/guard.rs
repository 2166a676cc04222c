//! Fail-fast guards for programmer errors.
//!
//! The simulation has no recoverable error path: a NaN velocity or a body id
//! that was never registered means the caller is broken, so we stop right there
//! with a message that names the operation.

/// Panics when a `Vec2` (or anything with `is_finite()`) carries NaN/inf.
///
/// ```should_panic
/// use gravitas_engine::{finite, core::Vec2};
///
/// let v = Vec2::new(f32::NAN, 0.0);
/// finite!(v, "set_velocity");
/// ```
#[macro_export]
macro_rules! finite {
    ($value:expr, $op:expr) => {{
        let value = $value;
        if !value.is_finite() {
            panic!("{}: non-finite input {:?}", $op, value);
        }
        value
    }};
}

/// Unwraps a body lookup, panicking with the offending id.
#[macro_export]
macro_rules! known_body {
    ($lookup:expr, $id:expr, $op:expr) => {{
        match $lookup {
            Some(body) => body,
            None => panic!("{}: unknown body id {}", $op, $id),
        }
    }};
}

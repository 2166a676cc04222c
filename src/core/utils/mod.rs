#[macro_use]
pub mod guard;

use crate::core::Vec2;

use super::body::{BodyId, BodyKind};

/// What a body needs to know about the other side of a collision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub kind: BodyKind,
    pub mass: f32,
    pub cached_velocity: Vec2,
    pub bounciness: f32,
}

/// The other side of a contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactPartner {
    /// Level geometry or anything without a body.
    StaticSurface,
    Body(BodySnapshot),
}

impl ContactPartner {
    /// Static surfaces and kinematic bodies both count as immovable.
    pub fn is_static(&self) -> bool {
        match self {
            ContactPartner::StaticSurface => true,
            ContactPartner::Body(b) => b.kind == BodyKind::Kinematic,
        }
    }

    pub fn body_id(&self) -> Option<BodyId> {
        match self {
            ContactPartner::StaticSurface => None,
            ContactPartner::Body(b) => Some(b.id),
        }
    }
}

/// Receiver of contact callbacks from the external collision detector.
///
/// `normal` points from the partner towards the receiver.
pub trait ContactListener {
    fn on_contact_enter(&mut self, partner: &ContactPartner, normal: Vec2);
    fn on_contact_stay(&mut self, partner: &ContactPartner, normal: Vec2);
    fn on_contact_exit(&mut self, partner: &ContactPartner);
}

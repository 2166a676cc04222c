use crate::core::Vec2;
use crate::domain::media::MediumVolume;
use crate::systems::body::BodyId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

/// One side of a contact reported by the collision detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactEvent {
    pub body: BodyId,
    /// `None` for level geometry.
    pub other: Option<BodyId>,
    /// Points from `other` towards `body`.
    pub normal: Vec2,
    pub phase: ContactPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerPhase {
    Enter,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerEvent {
    pub body: BodyId,
    pub volume: MediumVolume,
    pub phase: TriggerPhase,
}

/// Queue entry; contacts and triggers share one queue to keep submission order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldEvent {
    Contact(ContactEvent),
    Trigger(TriggerEvent),
}

impl WorldEvent {
    /// Receiver the event is addressed to.
    pub fn body(&self) -> BodyId {
        match self {
            WorldEvent::Contact(c) => c.body,
            WorldEvent::Trigger(t) => t.body,
        }
    }
}

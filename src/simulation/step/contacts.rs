use tracing::{debug, warn};

use crate::systems::body::{ContactListener, ContactPartner};

use super::{ContactEvent, ContactPhase, TriggerEvent, TriggerPhase, WorldCore, WorldEvent};

#[derive(Clone, Copy, Debug, Default)]
pub(super) struct EventTally {
    pub(super) contacts: u32,
    pub(super) triggers: u32,
    pub(super) dropped: u32,
}

/// Drains the event queue in submission order.
pub(super) fn process_events(world: &mut WorldCore) -> EventTally {
    let mut events = std::mem::take(&mut world.events);
    let mut tally = EventTally::default();

    for event in events.iter() {
        if !world.bodies.contains(event.body()) {
            warn!(body = event.body(), event = ?event, "event for a destroyed body dropped");
            tally.dropped += 1;
            continue;
        }
        match event {
            WorldEvent::Contact(c) => {
                handle_contact(world, c);
                tally.contacts += 1;
            }
            WorldEvent::Trigger(t) => {
                handle_trigger(world, t);
                tally.triggers += 1;
            }
        }
    }

    // keep the allocation; commands issued meanwhile cannot queue events
    events.clear();
    world.events = events;
    tally
}

fn handle_contact(world: &mut WorldCore, event: &ContactEvent) {
    let partner = match event.other {
        None => ContactPartner::StaticSurface,
        Some(other) => match world.bodies.get(other) {
            Some(b) => ContactPartner::Body(b.snapshot()),
            None => {
                debug!(body = event.body, other, "contact partner destroyed, resolving as static");
                ContactPartner::StaticSurface
            }
        },
    };

    if let Some(body) = world.bodies.get_mut(event.body) {
        match event.phase {
            ContactPhase::Enter => body.on_contact_enter(&partner, event.normal),
            ContactPhase::Stay => body.on_contact_stay(&partner, event.normal),
            ContactPhase::Exit => body.on_contact_exit(&partner),
        }
    }

    // The receiver may also carry the partner
    let Some(rider) = partner.body_id() else {
        return;
    };
    let now = world.time;
    let WorldCore { bodies, carriers, .. } = world;
    if let Some(carrier) = carriers.iter_mut().find(|c| c.carrier() == event.body) {
        match event.phase {
            ContactPhase::Enter => {
                if carrier.on_contact_gained(bodies, rider, event.normal) {
                    debug!(carrier = event.body, rider, "rider boarded");
                }
            }
            ContactPhase::Stay => {}
            ContactPhase::Exit => carrier.on_contact_lost(bodies, rider, now),
        }
    }
}

fn handle_trigger(world: &mut WorldCore, event: &TriggerEvent) {
    if let Some(body) = world.bodies.get_mut(event.body) {
        match event.phase {
            TriggerPhase::Enter => body.enter_medium(event.volume),
            TriggerPhase::Exit => body.exit_medium(),
        }
    }
}

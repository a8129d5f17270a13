//! Movement system - advances Mover components toward their destinations.
//!
//! The state machines only issue destinations and poll arrival; this
//! system does the walking. Movement is straight-line across the open
//! floor and always eventually completes.

use hecs::World;

use crate::components::Mover;

/// Walk every non-seated mover toward its destination.
pub fn movement_system(world: &mut World, delta_seconds: f32) {
    for (_, mover) in world.query_mut::<&mut Mover>() {
        // A freshly issued destination is "path pending" for the tick it
        // was issued; pick it up now so arrival can't report early.
        mover.path_pending = false;

        if mover.seated {
            continue;
        }

        let diff = mover.destination - mover.position;
        let distance = diff.length();
        if distance <= 0.0 {
            continue;
        }

        let step = mover.speed * delta_seconds;
        if step >= distance {
            mover.position = mover.destination;
        } else {
            mover.position = mover.position + diff.normalize() * step;
        }
    }
}

//! Waiter state machine - shuttling between customers, stations, and tables.
//!
//! Waiters hold their target customer as an entity id plus the visit
//! counter stamped at claim time, and re-validate both by lookup every
//! tick. Any staleness (customer gone, no longer in the expected state,
//! or a recycled slot carrying a different visit) resets the waiter to
//! Idle - never an error.

use hecs::{Entity, World};

use tavern_logic::constants::movement::ARRIVAL_THRESHOLD;
use tavern_logic::constants::reputation::DELIVERY_BONUS;

use crate::catalog::{Catalog, InventoryService, MenuPolicy};
use crate::components::{
    CustomerRecord, CustomerState, Mover, SeatId, TableId, Vec3, WaiterRecord, WaiterState,
};
use crate::generation::TavernLayout;

use super::cleaning::CleaningTracker;
use super::customer::ServiceQueues;
use super::events::{EventBus, EventPayload, Severity, TavernEvent};
use super::orders::OrderScheduler;
use super::reputation::Reputation;
use super::seating::SeatingRegistry;

/// Where a waiter stands relative to the seat they are serving.
const SERVICE_OFFSET: Vec3 = Vec3 {
    x: 0.6,
    y: 0.6,
    z: 0.0,
};

/// Advance every waiter by one fixed step. Runs after the customer
/// system so worklist entries from this tick are already visible.
#[allow(clippy::too_many_arguments)]
pub fn waiter_system(
    world: &mut World,
    seating: &mut SeatingRegistry,
    orders: &mut OrderScheduler,
    cleaning: &CleaningTracker,
    reputation: &mut Reputation,
    events: &mut EventBus,
    queues: &mut ServiceQueues,
    catalog: &Catalog,
    menu: &dyn MenuPolicy,
    inventory: &mut dyn InventoryService,
    layout: &TavernLayout,
) {
    let waiters: Vec<Entity> = world
        .query::<&WaiterRecord>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in waiters {
        let state = match world.get::<&WaiterRecord>(entity) {
            Ok(record) => record.state,
            Err(_) => continue,
        };

        match state {
            WaiterState::Idle => idle(world, entity, seating, queues, layout),
            WaiterState::TakeOrder => {
                take_order(world, entity, orders, events, catalog, menu, inventory, layout);
            }
            WaiterState::WaitPrep => wait_prep(world, entity, seating, orders),
            WaiterState::Deliver => deliver(world, entity, reputation, events),
            WaiterState::Clean => clean(world, entity, seating, cleaning),
        }
    }
}

/// Worklist entry validity: the customer must still exist, be waiting to
/// order, not be blocked, and not already have a waiter. Returns the
/// seat alongside the visit counter the claim gets stamped with.
fn claimable_seat(world: &World, customer: Entity) -> Option<(TableId, SeatId, u64)> {
    let record = world.get::<&CustomerRecord>(customer).ok()?;
    if record.active
        && record.state == CustomerState::Order
        && !record.blocked
        && !record.waiter_assigned
    {
        record
            .table
            .zip(record.seat)
            .map(|(table, seat)| (table, seat, record.visit))
    } else {
        None
    }
}

fn idle(
    world: &mut World,
    entity: Entity,
    seating: &SeatingRegistry,
    queues: &mut ServiceQueues,
    layout: &TavernLayout,
) {
    // First priority: take an order. Stale entries are dropped as we go.
    let mut claimed = None;
    while let Some(candidate) = queues.needs_order.pop_front() {
        if let Some((table, seat, visit)) = claimable_seat(world, candidate) {
            claimed = Some((candidate, table, seat, visit));
            break;
        }
    }

    if let Some((customer, table, seat, visit)) = claimed {
        if let Ok(mut record) = world.get::<&mut CustomerRecord>(customer) {
            record.waiter_assigned = true;
        }
        let service_point = seating
            .seat_anchor(table, seat)
            .map(|anchor| anchor + SERVICE_OFFSET)
            .unwrap_or(layout.waiter_idle);
        if let Ok(mut waiter) = world.get::<&mut WaiterRecord>(entity) {
            waiter.state = WaiterState::TakeOrder;
            waiter.target = Some(customer);
            waiter.target_visit = visit;
            waiter.target_table = Some(table);
            waiter.service_point = service_point;
        }
        if let Ok(mut mover) = world.get::<&mut Mover>(entity) {
            mover.set_destination(service_point);
        }
        return;
    }

    // Second priority: wipe down a flagged table.
    if let Some(table) = queues.needs_cleaning.pop_front() {
        if let Some(anchor) = seating.table_anchor(table) {
            if let Ok(mut waiter) = world.get::<&mut WaiterRecord>(entity) {
                waiter.state = WaiterState::Clean;
                waiter.target_table = Some(table);
            }
            if let Ok(mut mover) = world.get::<&mut Mover>(entity) {
                mover.set_destination(anchor);
            }
        }
        return;
    }

    // Nothing to do: drift back to the pickup point.
    if let Ok(mut mover) = world.get::<&mut Mover>(entity) {
        if mover.destination != layout.waiter_idle {
            mover.set_destination(layout.waiter_idle);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn take_order(
    world: &mut World,
    entity: Entity,
    orders: &mut OrderScheduler,
    events: &mut EventBus,
    catalog: &Catalog,
    menu: &dyn MenuPolicy,
    inventory: &mut dyn InventoryService,
    layout: &TavernLayout,
) {
    let (target, table, visit, arrived) = match world.get::<&WaiterRecord>(entity) {
        Ok(waiter) => {
            let arrived = world
                .get::<&Mover>(entity)
                .map(|m| m.has_reached(ARRIVAL_THRESHOLD))
                .unwrap_or(false);
            (waiter.target, waiter.target_table, waiter.target_visit, arrived)
        }
        Err(_) => return,
    };

    // Stale target: customer despawned, moved on without us, or the slot
    // was recycled into a different visit.
    let customer = target.filter(|&c| {
        world
            .get::<&CustomerRecord>(c)
            .map(|r| r.active && r.state == CustomerState::Order && r.visit == visit)
            .unwrap_or(false)
    });
    let (customer, table) = match customer.zip(table) {
        Some(pair) => pair,
        None => {
            reset_to_idle(world, entity);
            return;
        }
    };

    if !arrived {
        return;
    }

    let recipe_id = world
        .get::<&CustomerRecord>(customer)
        .ok()
        .and_then(|r| r.current_recipe)
        .or_else(|| catalog.house_default());

    // Two-gate validation: menu policy first, then inventory.
    let verdict = match recipe_id.and_then(|id| catalog.get(id)) {
        None => Err("order could not be resolved"),
        Some(recipe) if !menu.is_allowed(recipe) => Err("not on the menu"),
        Some(recipe) if !inventory.try_consume(recipe) => Err("no ingredients"),
        Some(recipe) => Ok(recipe),
    };

    match verdict {
        Ok(recipe) => {
            if let Ok(mut record) = world.get::<&mut CustomerRecord>(customer) {
                record.current_recipe = Some(recipe.id);
                record.enter_phase(CustomerState::WaitDrink);
            }
            orders.enqueue_order(table, recipe);
            let pickup = layout.pickup_point(recipe.area);
            if let Ok(mut waiter) = world.get::<&mut WaiterRecord>(entity) {
                waiter.state = WaiterState::WaitPrep;
                waiter.order_area = Some(recipe.area);
            }
            if let Ok(mut mover) = world.get::<&mut Mover>(entity) {
                mover.set_destination(pickup);
            }
        }
        Err(reason) => {
            if let Ok(mut record) = world.get::<&mut CustomerRecord>(customer) {
                record.blocked = true;
                record.block_reason = Some(reason.to_string());
                record.waiter_assigned = false;
            }
            let payload = EventPayload::at_table(table);
            let payload = match recipe_id {
                Some(id) => payload.with_recipe(id),
                None => payload,
            };
            events.publish(TavernEvent::new(
                format!("Order refused: {reason}"),
                Severity::Warning,
                "counter",
                payload,
            ));
            reset_to_idle(world, entity);
        }
    }
}

fn wait_prep(
    world: &mut World,
    entity: Entity,
    seating: &SeatingRegistry,
    orders: &mut OrderScheduler,
) {
    let (target, table, visit, service_point, arrived) = match world.get::<&WaiterRecord>(entity) {
        Ok(waiter) => {
            let arrived = world
                .get::<&Mover>(entity)
                .map(|m| m.has_reached(ARRIVAL_THRESHOLD))
                .unwrap_or(false);
            (
                waiter.target,
                waiter.target_table,
                waiter.target_visit,
                waiter.service_point,
                arrived,
            )
        }
        Err(_) => return,
    };

    let table = match table {
        Some(table) => table,
        None => {
            reset_to_idle(world, entity);
            return;
        }
    };

    // Stale target check: the same visit must still be waiting for this.
    let still_waiting = target
        .and_then(|c| world.get::<&CustomerRecord>(c).ok())
        .map(|r| r.active && r.state == CustomerState::WaitDrink && r.visit == visit)
        .unwrap_or(false);
    if !still_waiting {
        // The party is gone; if nobody is seated there anymore, scrap the
        // table's orders so the stations don't stay blocked forever.
        let table_empty = seating
            .table(table)
            .map(|t| t.seats.iter().all(|s| !s.occupied))
            .unwrap_or(true);
        if table_empty {
            orders.discard_orders_for(table);
        }
        reset_to_idle(world, entity);
        return;
    }

    if !arrived {
        return;
    }

    if let Some((recipe_id, area)) = orders.try_consume_ready_order(table) {
        if let Ok(mut waiter) = world.get::<&mut WaiterRecord>(entity) {
            waiter.state = WaiterState::Deliver;
            waiter.carried = Some(recipe_id);
            waiter.order_area = Some(area);
        }
        if let Ok(mut mover) = world.get::<&mut Mover>(entity) {
            mover.set_destination(service_point);
        }
    }
}

fn deliver(world: &mut World, entity: Entity, reputation: &mut Reputation, events: &mut EventBus) {
    let (target, table, visit, carried, arrived) = match world.get::<&WaiterRecord>(entity) {
        Ok(waiter) => {
            let arrived = world
                .get::<&Mover>(entity)
                .map(|m| m.has_reached(ARRIVAL_THRESHOLD))
                .unwrap_or(false);
            (
                waiter.target,
                waiter.target_table,
                waiter.target_visit,
                waiter.carried,
                arrived,
            )
        }
        Err(_) => return,
    };

    if !arrived {
        return;
    }

    // Hand over only if the claimed visit is still waiting; a customer
    // that left, timed out, or got recycled into a new visit meanwhile
    // means the delivery is silently dropped.
    let delivered = target
        .and_then(|c| world.get::<&mut CustomerRecord>(c).ok())
        .map(|mut record| {
            if record.active && record.state == CustomerState::WaitDrink && record.visit == visit {
                record.current_recipe = carried;
                record.waiter_assigned = false;
                record.enter_phase(CustomerState::Eat);
                true
            } else {
                false
            }
        })
        .unwrap_or(false);

    if delivered {
        reputation.add(DELIVERY_BONUS);
        let payload = match (table, carried) {
            (Some(t), Some(r)) => EventPayload::at_table(t).with_recipe(r),
            (Some(t), None) => EventPayload::at_table(t),
            _ => EventPayload::default(),
        };
        events.publish(TavernEvent::new(
            "Order delivered",
            Severity::Success,
            "floor",
            payload,
        ));
    }

    reset_to_idle(world, entity);
}

fn clean(world: &mut World, entity: Entity, seating: &mut SeatingRegistry, cleaning: &CleaningTracker) {
    let (table, arrived) = match world.get::<&WaiterRecord>(entity) {
        Ok(waiter) => {
            let arrived = world
                .get::<&Mover>(entity)
                .map(|m| m.has_reached(ARRIVAL_THRESHOLD))
                .unwrap_or(false);
            (waiter.target_table, arrived)
        }
        Err(_) => return,
    };

    let table = match table {
        Some(table) => table,
        None => {
            reset_to_idle(world, entity);
            return;
        }
    };

    if !arrived {
        return;
    }

    cleaning.clean(seating, table);
    reset_to_idle(world, entity);
}

fn reset_to_idle(world: &mut World, entity: Entity) {
    if let Ok(mut waiter) = world.get::<&mut WaiterRecord>(entity) {
        waiter.reset_to_idle();
    }
}

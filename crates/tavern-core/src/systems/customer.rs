//! Customer state machine - the visit lifecycle from door to door.
//!
//! All customers are advanced before any waiter runs; cross-agent effects
//! (order-taking, despawn) are buffered through the worklists so waiters
//! only observe same-tick customer changes through those queues.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::Rng;

use tavern_logic::constants::movement::{ARRIVAL_THRESHOLD, WANDER_RADIUS};
use tavern_logic::constants::reputation::ANGRY_PENALTY;
use tavern_logic::constants::timing::{
    ENTER_GRACE, LEAVE_GRACE, MEAL_DURATION, SEAT_RETRY_INTERVAL, SETTLE_DELAY,
    TABLE_SEARCH_TIMEOUT,
};
use tavern_logic::tips::tip_for_wait;

use crate::catalog::{Catalog, InventoryService, MenuPolicy};
use crate::components::{CustomerRecord, CustomerState, Mover, TableId, Vec3};
use crate::generation::TavernLayout;

use super::events::{EventBus, EventPayload, Severity, TavernEvent};
use super::ledger::CashLedger;
use super::reputation::Reputation;
use super::seating::SeatingRegistry;

/// FIFO buffers decoupling the customer and waiter phases of a tick.
#[derive(Debug, Default)]
pub struct ServiceQueues {
    /// Customers waiting for a waiter to take their order.
    pub needs_order: VecDeque<Entity>,
    /// Tables flagged for cleaning.
    pub needs_cleaning: VecDeque<TableId>,
    /// Customers done with their visit, flushed by the engine's late tick.
    pub despawn: Vec<Entity>,
}

impl ServiceQueues {
    /// Flag a table for cleaning, once.
    pub fn flag_for_cleaning(&mut self, table: TableId) {
        if !self.needs_cleaning.contains(&table) {
            self.needs_cleaning.push_back(table);
        }
    }
}

/// Advance every active customer by one fixed step.
#[allow(clippy::too_many_arguments)]
pub fn customer_system(
    world: &mut World,
    seating: &mut SeatingRegistry,
    ledger: &mut CashLedger,
    reputation: &mut Reputation,
    events: &mut EventBus,
    queues: &mut ServiceQueues,
    catalog: &Catalog,
    menu: &dyn MenuPolicy,
    inventory: &dyn InventoryService,
    layout: &TavernLayout,
    rng: &mut impl Rng,
    delta_seconds: f32,
) {
    for (entity, (record, mover)) in world.query_mut::<(&mut CustomerRecord, &mut Mover)>() {
        if !record.active {
            continue;
        }

        match record.state {
            CustomerState::Enter => {
                record.phase_timer += delta_seconds;
                if mover.has_reached(ARRIVAL_THRESHOLD) || record.phase_timer >= ENTER_GRACE {
                    record.enter_phase(CustomerState::FindTable);
                    // First reservation attempt happens immediately; the
                    // retry timer only paces the wander re-issues.
                    record.retry_timer = 0.0;
                }
            }

            CustomerState::FindTable => {
                if let (Some(table), Some(seat)) = (record.table, record.seat) {
                    // Seat reserved; walking over to it.
                    if mover.has_reached(ARRIVAL_THRESHOLD) {
                        if let Some(anchor) = seating.seat_anchor(table, seat) {
                            mover.sit_at(anchor);
                        }
                        record.enter_phase(CustomerState::Sit);
                    }
                } else if let Some((table, seat)) = seating.try_reserve_seat() {
                    record.table = Some(table);
                    record.seat = Some(seat);
                    if let Some(anchor) = seating.seat_anchor(table, seat) {
                        mover.set_destination(anchor);
                    }
                } else {
                    record.phase_timer += delta_seconds;
                    record.retry_timer += delta_seconds;
                    if record.phase_timer >= TABLE_SEARCH_TIMEOUT {
                        storm_out(record, mover, seating, queues, layout);
                        reputation.remove(ANGRY_PENALTY);
                        events.publish(TavernEvent::new(
                            "Customer left angry: no free table",
                            Severity::Warning,
                            "floor",
                            EventPayload::default(),
                        ));
                    } else if record.retry_timer >= SEAT_RETRY_INTERVAL {
                        // Keep the agent visually active while retrying.
                        record.retry_timer = 0.0;
                        let wander = layout.entry
                            + Vec3::new(
                                rng.gen_range(-WANDER_RADIUS..WANDER_RADIUS),
                                rng.gen_range(-WANDER_RADIUS..WANDER_RADIUS),
                                0.0,
                            );
                        mover.set_destination(wander);
                    }
                }
            }

            CustomerState::Sit => {
                record.phase_timer += delta_seconds;
                if record.phase_timer >= SETTLE_DELAY {
                    begin_ordering(entity, record, catalog, queues);
                }
            }

            CustomerState::Order => {
                record.wait_timer += delta_seconds;
                if record.patience_exhausted() {
                    abort_angry(record, mover, seating, queues, reputation, events, layout);
                    continue;
                }
                if record.blocked {
                    // Policy and stock can change under us; re-check every
                    // tick and rejoin the worklist once unblocked.
                    let unblocked = record
                        .current_recipe
                        .and_then(|id| catalog.get(id))
                        .map(|r| menu.is_allowed(r) && inventory.can_craft(r))
                        .unwrap_or(false);
                    if unblocked {
                        record.blocked = false;
                        record.block_reason = None;
                        record.waiter_assigned = false;
                        queues.needs_order.push_back(entity);
                    }
                }
            }

            CustomerState::WaitDrink => {
                record.wait_timer += delta_seconds;
                if record.patience_exhausted() {
                    abort_angry(record, mover, seating, queues, reputation, events, layout);
                }
            }

            CustomerState::Eat => {
                record.phase_timer += delta_seconds;
                if record.phase_timer >= MEAL_DURATION {
                    let recipe = record.current_recipe.and_then(|id| catalog.get(id));
                    record.bill.add_course(
                        recipe.map(|r| r.sell_price),
                        recipe.map(|r| r.unit_cost),
                    );
                    record.courses_done += 1;
                    record.current_recipe = None;
                    if record.courses_done < record.courses_desired {
                        begin_ordering(entity, record, catalog, queues);
                    } else {
                        record.enter_phase(CustomerState::Pay);
                    }
                }
            }

            CustomerState::Pay => {
                record.bill.apply_fallback_charge();
                let tip = tip_for_wait(record.wait_timer);

                // Course costs come out of the till; if the till can't
                // cover them the spend is rejected and the loss is simply
                // not booked - never a fault.
                ledger.try_spend(record.bill.cost);
                ledger.add_revenue(record.bill.revenue + tip);

                events.publish(TavernEvent::new(
                    "Payment received",
                    Severity::Success,
                    "till",
                    payload_for(record).with_amount(record.bill.revenue + tip),
                ));

                if let (Some(table), Some(seat)) = (record.table, record.seat) {
                    seating.release_seat(table, seat);
                    queues.flag_for_cleaning(table);
                }
                record.table = None;
                record.seat = None;
                mover.stand_up();
                mover.set_destination(layout.exit);
                record.enter_phase(CustomerState::Leave);
            }

            CustomerState::Leave => {
                record.phase_timer += delta_seconds;
                if mover.has_reached(ARRIVAL_THRESHOLD) || record.phase_timer >= LEAVE_GRACE {
                    // Inactive from here on; the engine recycles the
                    // entity in its late tick.
                    record.active = false;
                    queues.despawn.push(entity);
                }
            }
        }
    }
}

/// Enter the Order phase: resolve the pending recipe (favorite, else the
/// house default) and join the worklist.
fn begin_ordering(
    entity: Entity,
    record: &mut CustomerRecord,
    catalog: &Catalog,
    queues: &mut ServiceQueues,
) {
    record.current_recipe = record.favorite.or_else(|| catalog.house_default());
    record.waiter_assigned = false;
    record.enter_phase(CustomerState::Order);
    queues.needs_order.push_back(entity);
}

/// Patience ran out: hard preemption to Leave with an angry event carrying
/// the most specific known block reason.
fn abort_angry(
    record: &mut CustomerRecord,
    mover: &mut Mover,
    seating: &mut SeatingRegistry,
    queues: &mut ServiceQueues,
    reputation: &mut Reputation,
    events: &mut EventBus,
    layout: &TavernLayout,
) {
    let reason = record
        .block_reason
        .clone()
        .unwrap_or_else(|| "waited too long".to_string());
    let payload = payload_for(record);

    storm_out(record, mover, seating, queues, layout);
    reputation.remove(ANGRY_PENALTY);
    events.publish(TavernEvent::new(
        format!("Customer left angry: {reason}"),
        Severity::Warning,
        "floor",
        payload,
    ));
}

/// Common exit path for every angry departure: give the seat back, flag
/// the table, and head for the door.
fn storm_out(
    record: &mut CustomerRecord,
    mover: &mut Mover,
    seating: &mut SeatingRegistry,
    queues: &mut ServiceQueues,
    layout: &TavernLayout,
) {
    if let (Some(table), Some(seat)) = (record.table, record.seat) {
        seating.release_seat(table, seat);
        queues.flag_for_cleaning(table);
    }
    record.table = None;
    record.seat = None;
    record.waiter_assigned = false;
    mover.stand_up();
    mover.set_destination(layout.exit);
    record.enter_phase(CustomerState::Leave);
}

fn payload_for(record: &CustomerRecord) -> EventPayload {
    EventPayload {
        table: record.table,
        recipe: record.current_recipe,
        amount: None,
    }
}

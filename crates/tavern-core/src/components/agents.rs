//! Agent records: customer and waiter state machines as flat components.
//!
//! State handling is a `match` over these enums in the customer and waiter
//! systems - no virtual dispatch. Waiters reference their target customer
//! by entity id plus the visit counter stamped at claim time; a failed
//! lookup, a record in an unexpected state, or a visit mismatch is the
//! staleness signal.

use hecs::Entity;
use serde::{Deserialize, Serialize};
use tavern_logic::billing::Bill;

use super::common::Vec3;
use super::venue::{PrepArea, RecipeId, SeatId, TableId};

/// Phases of a customer visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerState {
    /// Walking in toward the entry mark.
    Enter,
    /// Looking for a free seat; wanders while retrying.
    FindTable,
    /// Settling in at the seat.
    Sit,
    /// Waiting for a waiter to take the order.
    Order,
    /// Order submitted; waiting on preparation and delivery.
    WaitDrink,
    /// Consuming the delivered course.
    Eat,
    /// Settling the bill.
    Pay,
    /// Walking out toward the exit mark.
    Leave,
}

/// Full per-customer record. Reset (not destroyed) on despawn so the
/// backing entity is recyclable through the spawn pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub state: CustomerState,
    /// False while the entity sits in the spawn pool.
    pub active: bool,
    /// Borrowed (never owned) table/seat pair, at most one at a time.
    pub table: Option<TableId>,
    pub seat: Option<SeatId>,
    /// Timer for the current phase.
    pub phase_timer: f32,
    /// Cumulative wait across Order and WaitDrink phases.
    pub wait_timer: f32,
    /// How long this customer tolerates waiting before storming out.
    pub patience: f32,
    /// Re-wander cadence while the seat search keeps failing.
    pub retry_timer: f32,
    pub courses_desired: u32,
    pub courses_done: u32,
    pub bill: Bill,
    /// Preferred recipe rolled at spawn, if any.
    pub favorite: Option<RecipeId>,
    /// Recipe currently being ordered, prepared, or eaten.
    pub current_recipe: Option<RecipeId>,
    /// Set when the order was rejected by menu policy or inventory.
    pub blocked: bool,
    /// Human-readable reason for display while blocked.
    pub block_reason: Option<String>,
    /// A waiter has claimed this customer from the worklist.
    pub waiter_assigned: bool,
    /// Cosmetic gold carried.
    pub gold: f32,
    /// Bumped on every new visit. Entities are recycled through the spawn
    /// pool, so the id alone cannot distinguish successive occupants of
    /// the same slot; claims carry this counter alongside the id.
    pub visit: u64,
}

impl Default for CustomerRecord {
    fn default() -> Self {
        Self {
            state: CustomerState::Enter,
            active: false,
            table: None,
            seat: None,
            phase_timer: 0.0,
            wait_timer: 0.0,
            patience: 0.0,
            retry_timer: 0.0,
            courses_desired: 1,
            courses_done: 0,
            bill: Bill::default(),
            favorite: None,
            current_recipe: None,
            blocked: false,
            block_reason: None,
            waiter_assigned: false,
            gold: 0.0,
            visit: 0,
        }
    }
}

impl CustomerRecord {
    /// Wipe the record back to its pooled state, keeping the visit
    /// counter so the next activation stays distinguishable. Seat release
    /// is the seating registry's job and must happen before this is
    /// called.
    pub fn reset(&mut self) {
        let visit = self.visit;
        *self = Self::default();
        self.visit = visit;
    }

    /// Begin a new phase; the phase timer starts over.
    pub fn enter_phase(&mut self, state: CustomerState) {
        self.state = state;
        self.phase_timer = 0.0;
    }

    /// True once the cumulative wait has used up the patience budget.
    pub fn patience_exhausted(&self) -> bool {
        self.wait_timer >= self.patience
    }
}

/// Phases of waiter work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaiterState {
    /// Looking for work; idles at the pickup point otherwise.
    Idle,
    /// Walking to a claimed customer to take their order.
    TakeOrder,
    /// Waiting at a lane pickup point for the order to finish.
    WaitPrep,
    /// Carrying a finished order back to the table.
    Deliver,
    /// Walking to a flagged table to wipe it down.
    Clean,
}

/// Per-waiter record. One per registered waiter, never despawned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiterRecord {
    pub state: WaiterState,
    /// Weak reference to the claimed customer - re-looked-up by identity
    /// each tick, never retained across invalidation.
    #[serde(skip)]
    pub target: Option<Entity>,
    /// Visit counter of the claimed customer at claim time. A mismatch on
    /// re-lookup means the slot was recycled into a new visit.
    pub target_visit: u64,
    /// Table the claimed customer sits at, or the table to clean.
    pub target_table: Option<TableId>,
    /// Lane the submitted order went to; drives the pickup point.
    pub order_area: Option<PrepArea>,
    /// Recipe physically carried during Deliver.
    pub carried: Option<RecipeId>,
    /// Where to stand when serving the claimed customer.
    pub service_point: Vec3,
}

impl Default for WaiterRecord {
    fn default() -> Self {
        Self {
            state: WaiterState::Idle,
            target: None,
            target_visit: 0,
            target_table: None,
            order_area: None,
            carried: None,
            service_point: Vec3::ZERO,
        }
    }
}

impl WaiterRecord {
    /// Drop all claims and go back to looking for work.
    pub fn reset_to_idle(&mut self) {
        self.state = WaiterState::Idle;
        self.target = None;
        self.target_visit = 0;
        self.target_table = None;
        self.order_area = None;
        self.carried = None;
    }
}

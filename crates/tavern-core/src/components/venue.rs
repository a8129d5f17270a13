//! Venue data: tables, seats, recipes, and preparation orders.

use serde::{Deserialize, Serialize};

use super::common::Vec3;

/// Identity of a table, stable for the lifetime of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub u32);

/// Identity of a seat within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatId(pub u32);

/// One seat at a table. Mutated only through the seating registry's
/// reserve/release calls - agents never flip `occupied` directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    /// Where a seated customer is anchored.
    pub anchor: Vec3,
    pub occupied: bool,
}

impl Seat {
    pub fn new(id: SeatId, anchor: Vec3) -> Self {
        Self {
            id,
            anchor,
            occupied: false,
        }
    }
}

/// A table with its ordered seats and a dirtiness accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub anchor: Vec3,
    pub seats: Vec<Seat>,
    /// Grows while the table is in use; reset to 0 by cleaning.
    pub dirtiness: f32,
}

impl Table {
    pub fn new(id: TableId, anchor: Vec3, seats: Vec<Seat>) -> Self {
        Self {
            id,
            anchor,
            seats,
            dirtiness: 0.0,
        }
    }

    /// First unoccupied seat in seat order, if any.
    pub fn first_free_seat(&self) -> Option<SeatId> {
        self.seats.iter().find(|s| !s.occupied).map(|s| s.id)
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == id)
    }
}

/// Which preparation lane handles a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrepArea {
    Kitchen,
    Bar,
}

/// Identity of a recipe in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

/// Immutable reference data describing one item the tavern can serve.
/// Owned by the catalog; orders and records hold the id, never a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Seconds a station spends preparing this.
    pub prep_seconds: f32,
    pub sell_price: f32,
    pub unit_cost: f32,
    pub area: PrepArea,
    /// Whether customers may roll this as their favorite.
    pub favorite_candidate: bool,
}

/// Lifecycle of an order on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// Waiting for a free station on its lane.
    Queued,
    /// Occupying a station; `remaining` counts down.
    InPreparation,
    /// Finished; still occupies its station until a waiter picks it up.
    Ready,
}

/// One order in flight between a table and a preparation lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub table: TableId,
    pub recipe: RecipeId,
    pub area: PrepArea,
    /// Preparation seconds left; floored at 0.
    pub remaining: f32,
    pub state: OrderState,
}

/// Read-only view of an active order, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub table: TableId,
    pub recipe: RecipeId,
    pub area: PrepArea,
    pub remaining: f32,
    pub state: OrderState,
}

impl From<&Order> for OrderSnapshot {
    fn from(order: &Order) -> Self {
        Self {
            table: order.table,
            recipe: order.recipe,
            area: order.area,
            remaining: order.remaining,
            state: order.state,
        }
    }
}

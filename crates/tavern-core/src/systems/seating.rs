//! Seating registry - tables, seats, occupancy, first-fit reservation.

use serde::{Deserialize, Serialize};

use crate::components::{Seat, SeatId, Table, TableId, Vec3};

/// Owns every table in the venue. Seats are mutated only through
/// reserve/release here, never directly by agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatingRegistry {
    tables: Vec<Table>,
}

impl SeatingRegistry {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// First-fit reservation: scan tables in registration order and take
    /// the first free seat found. The seat is marked occupied in the same
    /// scan - there is no separate commit step.
    pub fn try_reserve_seat(&mut self) -> Option<(TableId, SeatId)> {
        for table in &mut self.tables {
            if let Some(seat_id) = table.first_free_seat() {
                if let Some(seat) = table.seat_mut(seat_id) {
                    seat.occupied = true;
                    return Some((table.id, seat_id));
                }
            }
        }
        None
    }

    /// Mark a seat unoccupied. No-op if the ids match nothing, so calling
    /// it twice (or on a never-reserved seat) is harmless.
    pub fn release_seat(&mut self, table_id: TableId, seat_id: SeatId) {
        if let Some(table) = self.tables.iter_mut().find(|t| t.id == table_id) {
            if let Some(seat) = table.seat_mut(seat_id) {
                seat.occupied = false;
            }
        }
    }

    /// Read-only gate for whether a customer-spawn attempt makes sense.
    pub fn has_any_free_seat(&self) -> bool {
        self.tables.iter().any(|t| t.first_free_seat().is_some())
    }

    pub fn seat_anchor(&self, table_id: TableId, seat_id: SeatId) -> Option<Vec3> {
        self.table(table_id)?.seat(seat_id).map(|s| s.anchor)
    }

    pub fn table_anchor(&self, table_id: TableId) -> Option<Vec3> {
        self.table(table_id).map(|t| t.anchor)
    }

    pub fn table(&self, table_id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn table_mut(&mut self, table_id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }

    pub fn total_seats(&self) -> usize {
        self.tables.iter().map(|t| t.seats.len()).sum()
    }

    pub fn occupied_seats(&self) -> usize {
        self.tables
            .iter()
            .flat_map(|t| t.seats.iter())
            .filter(|s| s.occupied)
            .count()
    }
}

//! Floor generation - navigation marks and the table grid.

use crate::components::{PrepArea, Seat, SeatId, Table, TableId, Vec3};

/// Spacing of the table grid in floor units.
const TABLE_SPACING: f32 = 4.0;
/// How many tables per row before wrapping.
const TABLES_PER_ROW: u32 = 4;
/// Seat anchors around a table, clockwise from the left.
const SEAT_OFFSETS: [Vec3; 4] = [
    Vec3 { x: -1.0, y: 0.0, z: 0.0 },
    Vec3 { x: 0.0, y: -1.0, z: 0.0 },
    Vec3 { x: 1.0, y: 0.0, z: 0.0 },
    Vec3 { x: 0.0, y: 1.0, z: 0.0 },
];

/// Fixed navigation marks on the tavern floor. Agents walk between these
/// and the seat anchors; there is no other geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TavernLayout {
    /// Where new customers appear and walk in from.
    pub entry: Vec3,
    /// Where departing customers walk out to.
    pub exit: Vec3,
    /// Pickup point for finished kitchen orders.
    pub kitchen_pickup: Vec3,
    /// Pickup point for finished bar orders.
    pub bar_pickup: Vec3,
    /// Where waiters stand when there is no work.
    pub waiter_idle: Vec3,
}

impl Default for TavernLayout {
    fn default() -> Self {
        Self {
            entry: Vec3::new(0.0, -8.0, 0.0),
            exit: Vec3::new(-3.0, -8.0, 0.0),
            kitchen_pickup: Vec3::new(12.0, 10.0, 0.0),
            bar_pickup: Vec3::new(-4.0, 10.0, 0.0),
            waiter_idle: Vec3::new(4.0, 9.0, 0.0),
        }
    }
}

impl TavernLayout {
    /// Pickup mark for a preparation lane.
    pub fn pickup_point(&self, area: PrepArea) -> Vec3 {
        match area {
            PrepArea::Kitchen => self.kitchen_pickup,
            PrepArea::Bar => self.bar_pickup,
        }
    }
}

/// Lay out `table_count` tables on a grid, each with `seats_per_table`
/// seats anchored around it. Seat counts above four reuse the offsets.
pub fn generate_tables(table_count: u32, seats_per_table: u32) -> Vec<Table> {
    let mut tables = Vec::with_capacity(table_count as usize);
    for i in 0..table_count {
        let col = i % TABLES_PER_ROW;
        let row = i / TABLES_PER_ROW;
        let anchor = Vec3::new(
            col as f32 * TABLE_SPACING - 6.0,
            row as f32 * TABLE_SPACING,
            0.0,
        );
        let seats = (0..seats_per_table)
            .map(|s| {
                let offset = SEAT_OFFSETS[(s as usize) % SEAT_OFFSETS.len()];
                Seat::new(SeatId(s), anchor + offset)
            })
            .collect();
        tables.push(Table::new(TableId(i), anchor, seats));
    }
    tables
}

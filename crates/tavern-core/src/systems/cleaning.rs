//! Cleaning tracker - per-table dirtiness accrual and reset.

use crate::components::TableId;

use super::seating::SeatingRegistry;

/// Accrues dirtiness on every registered table and resets it on cleaning.
/// Dirtiness is unbounded above; nothing but presentation reads it.
#[derive(Debug, Clone)]
pub struct CleaningTracker {
    rate: f32,
}

impl CleaningTracker {
    pub fn new(rate: f32) -> Self {
        Self { rate: rate.max(0.0) }
    }

    /// Accrue `rate * delta` on every table.
    pub fn tick(&self, seating: &mut SeatingRegistry, delta_seconds: f32) {
        if delta_seconds <= 0.0 || self.rate == 0.0 {
            return;
        }
        for table in seating.tables_mut() {
            table.dirtiness += self.rate * delta_seconds;
        }
    }

    /// Reset a table to spotless. No-op on unknown ids, and cleaning an
    /// already-clean table is harmless.
    pub fn clean(&self, seating: &mut SeatingRegistry, table_id: TableId) {
        if let Some(table) = seating.table_mut(table_id) {
            table.dirtiness = 0.0;
        }
    }

    /// Current dirtiness, for display.
    pub fn dirtiness(&self, seating: &SeatingRegistry, table_id: TableId) -> Option<f32> {
        seating.table(table_id).map(|t| t.dirtiness)
    }
}

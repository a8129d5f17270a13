//! Order scheduler - per-lane, station-capacity-limited preparation queue.
//!
//! Two independent lanes (kitchen and bar), each with its own station
//! count. Per tick each lane decrements every in-preparation order first,
//! then promotes queued orders FIFO into free stations - in that order, so
//! an order finishing exactly at its deadline can be consumed within the
//! same tick without a one-tick latency artifact.

use crate::components::{Order, OrderSnapshot, OrderState, PrepArea, Recipe, RecipeId, TableId};

/// One preparation lane with its stations and arrival-ordered queue.
#[derive(Debug, Clone)]
struct Lane {
    stations: usize,
    /// Arrival order preserved; queued orders promote front-to-back.
    orders: Vec<Order>,
}

impl Lane {
    fn new(stations: usize) -> Self {
        Self {
            stations,
            orders: Vec::new(),
        }
    }

    /// Ready orders still occupy their station until picked up.
    fn station_load(&self) -> usize {
        self.orders
            .iter()
            .filter(|o| matches!(o.state, OrderState::InPreparation | OrderState::Ready))
            .count()
    }

    fn tick(&mut self, delta_seconds: f32) {
        // Decrement pass first.
        for order in &mut self.orders {
            if order.state == OrderState::InPreparation {
                order.remaining = (order.remaining - delta_seconds).max(0.0);
                if order.remaining <= 0.0 {
                    order.state = OrderState::Ready;
                }
            }
        }
        // Then promote FIFO while stations are free.
        let mut load = self.station_load();
        for order in &mut self.orders {
            if load >= self.stations {
                break;
            }
            if order.state == OrderState::Queued {
                order.state = if order.remaining <= 0.0 {
                    OrderState::Ready
                } else {
                    OrderState::InPreparation
                };
                load += 1;
            }
        }
    }
}

/// The order board shared by waiters and the preparation stations.
#[derive(Debug, Clone)]
pub struct OrderScheduler {
    kitchen: Lane,
    bar: Lane,
}

impl OrderScheduler {
    pub fn new(kitchen_stations: usize, bar_stations: usize) -> Self {
        Self {
            kitchen: Lane::new(kitchen_stations),
            bar: Lane::new(bar_stations),
        }
    }

    fn lane(&self, area: PrepArea) -> &Lane {
        match area {
            PrepArea::Kitchen => &self.kitchen,
            PrepArea::Bar => &self.bar,
        }
    }

    fn lane_mut(&mut self, area: PrepArea) -> &mut Lane {
        match area {
            PrepArea::Kitchen => &mut self.kitchen,
            PrepArea::Bar => &mut self.bar,
        }
    }

    /// Append a new queued order to the recipe's lane.
    pub fn enqueue_order(&mut self, table: TableId, recipe: &Recipe) {
        let order = Order {
            table,
            recipe: recipe.id,
            area: recipe.area,
            remaining: recipe.prep_seconds.max(0.0),
            state: OrderState::Queued,
        };
        self.lane_mut(recipe.area).orders.push(order);
    }

    /// Advance both lanes by one fixed step.
    pub fn tick(&mut self, delta_seconds: f32) {
        self.kitchen.tick(delta_seconds);
        self.bar.tick(delta_seconds);
    }

    /// Remove and return the first finished order for `table`, if any.
    /// Only orders that actually went through a station count as ready -
    /// a queued order whose timer underflowed is never served early.
    pub fn try_consume_ready_order(&mut self, table: TableId) -> Option<(RecipeId, PrepArea)> {
        for lane in [&mut self.kitchen, &mut self.bar] {
            if let Some(idx) = lane
                .orders
                .iter()
                .position(|o| o.table == table && o.state == OrderState::Ready)
            {
                let order = lane.orders.remove(idx);
                return Some((order.recipe, order.area));
            }
        }
        None
    }

    /// Drop every order belonging to `table`. Used when a table's party
    /// is gone for good and the stations should not stay blocked.
    pub fn discard_orders_for(&mut self, table: TableId) -> usize {
        let mut dropped = 0;
        for lane in [&mut self.kitchen, &mut self.bar] {
            let before = lane.orders.len();
            lane.orders.retain(|o| o.table != table);
            dropped += before - lane.orders.len();
        }
        dropped
    }

    pub fn in_preparation_count(&self, area: PrepArea) -> usize {
        self.lane(area)
            .orders
            .iter()
            .filter(|o| o.state == OrderState::InPreparation)
            .count()
    }

    pub fn ready_count(&self, area: PrepArea) -> usize {
        self.lane(area)
            .orders
            .iter()
            .filter(|o| o.state == OrderState::Ready)
            .count()
    }

    pub fn queued_count(&self, area: PrepArea) -> usize {
        self.lane(area)
            .orders
            .iter()
            .filter(|o| o.state == OrderState::Queued)
            .count()
    }

    pub fn station_count(&self, area: PrepArea) -> usize {
        self.lane(area).stations
    }

    /// Read-only view of every active order, for display.
    pub fn snapshot(&self) -> Vec<OrderSnapshot> {
        self.kitchen
            .orders
            .iter()
            .chain(self.bar.orders.iter())
            .map(OrderSnapshot::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: u32, prep: f32, area: PrepArea) -> Recipe {
        Recipe {
            id: RecipeId(id),
            name: format!("recipe-{id}"),
            prep_seconds: prep,
            sell_price: 1.0,
            unit_cost: 0.5,
            area,
            favorite_candidate: false,
        }
    }

    #[test]
    fn test_capacity_limits_in_preparation() {
        let mut board = OrderScheduler::new(2, 1);
        for i in 0..5 {
            board.enqueue_order(TableId(i), &recipe(i, 10.0, PrepArea::Kitchen));
        }
        board.tick(0.0);
        assert_eq!(board.in_preparation_count(PrepArea::Kitchen), 2);
        assert_eq!(board.queued_count(PrepArea::Kitchen), 3);

        // Capacity holds across further ticks.
        board.tick(1.0);
        assert!(board.in_preparation_count(PrepArea::Kitchen) <= 2);
    }

    #[test]
    fn test_lanes_are_independent() {
        let mut board = OrderScheduler::new(1, 1);
        board.enqueue_order(TableId(0), &recipe(0, 5.0, PrepArea::Kitchen));
        board.enqueue_order(TableId(1), &recipe(1, 5.0, PrepArea::Bar));
        board.tick(0.0);
        assert_eq!(board.in_preparation_count(PrepArea::Kitchen), 1);
        assert_eq!(board.in_preparation_count(PrepArea::Bar), 1);
    }

    #[test]
    fn test_fifo_promotion() {
        let mut board = OrderScheduler::new(1, 1);
        board.enqueue_order(TableId(0), &recipe(0, 0.2, PrepArea::Bar));
        board.enqueue_order(TableId(1), &recipe(1, 0.2, PrepArea::Bar));

        board.tick(0.0);
        // First arrival takes the station; second waits.
        assert_eq!(board.in_preparation_count(PrepArea::Bar), 1);
        assert_eq!(board.queued_count(PrepArea::Bar), 1);
        assert!(board.try_consume_ready_order(TableId(0)).is_none());

        board.tick(0.2);
        // First order finished; it still holds the station, so the second
        // stays queued until it is picked up.
        assert_eq!(board.ready_count(PrepArea::Bar), 1);
        assert_eq!(board.queued_count(PrepArea::Bar), 1);

        let (recipe_id, area) = board.try_consume_ready_order(TableId(0)).unwrap();
        assert_eq!(recipe_id, RecipeId(0));
        assert_eq!(area, PrepArea::Bar);

        board.tick(0.0);
        assert_eq!(board.in_preparation_count(PrepArea::Bar), 1);
        assert_eq!(board.queued_count(PrepArea::Bar), 0);
    }

    #[test]
    fn test_queued_order_never_consumed_early() {
        let mut board = OrderScheduler::new(1, 1);
        board.enqueue_order(TableId(0), &recipe(0, 10.0, PrepArea::Kitchen));
        // Zero-prep order stuck behind a long one; its timer is already 0
        // but it has not been through a station.
        board.enqueue_order(TableId(1), &recipe(1, 0.0, PrepArea::Kitchen));

        board.tick(1.0);
        assert!(board.try_consume_ready_order(TableId(1)).is_none());
    }

    #[test]
    fn test_zero_prep_ready_on_promotion() {
        let mut board = OrderScheduler::new(1, 1);
        board.enqueue_order(TableId(0), &recipe(0, 0.0, PrepArea::Bar));
        board.tick(0.0);
        assert!(board.try_consume_ready_order(TableId(0)).is_some());
    }

    #[test]
    fn test_consume_matches_table() {
        let mut board = OrderScheduler::new(2, 2);
        board.enqueue_order(TableId(0), &recipe(0, 0.1, PrepArea::Kitchen));
        board.enqueue_order(TableId(1), &recipe(1, 0.1, PrepArea::Kitchen));
        board.tick(0.0);
        board.tick(0.2);

        assert!(board.try_consume_ready_order(TableId(1)).is_some());
        assert!(board.try_consume_ready_order(TableId(1)).is_none());
        assert!(board.try_consume_ready_order(TableId(0)).is_some());
    }

    #[test]
    fn test_discard_frees_stations() {
        let mut board = OrderScheduler::new(1, 1);
        board.enqueue_order(TableId(0), &recipe(0, 0.1, PrepArea::Kitchen));
        board.enqueue_order(TableId(1), &recipe(1, 0.1, PrepArea::Kitchen));
        board.tick(0.2);

        assert_eq!(board.discard_orders_for(TableId(0)), 1);
        board.tick(0.0);
        assert_eq!(board.in_preparation_count(PrepArea::Kitchen), 1);
    }

    #[test]
    fn test_snapshot_reports_all_orders() {
        let mut board = OrderScheduler::new(1, 1);
        board.enqueue_order(TableId(0), &recipe(0, 5.0, PrepArea::Kitchen));
        board.enqueue_order(TableId(1), &recipe(1, 3.0, PrepArea::Bar));
        board.tick(0.0);
        board.tick(1.0);

        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), 2);
        let kitchen = snapshot.iter().find(|o| o.area == PrepArea::Kitchen).unwrap();
        assert_eq!(kitchen.state, OrderState::InPreparation);
        assert!((kitchen.remaining - 4.0).abs() < 1e-4);
    }
}

//! Customer attribute rolls and staff spawning.

use hecs::{Entity, World};
use rand::Rng;

use tavern_logic::constants::movement::WALK_SPEED;
use tavern_logic::constants::rolls;

use crate::catalog::Catalog;
use crate::components::{CustomerRecord, CustomerState, Mover, WaiterRecord};

use super::floor::TavernLayout;
use super::names::generate_name;

/// Roll the per-visit attributes onto a (fresh or recycled) customer
/// record and mark it active at the start of its visit.
pub fn roll_customer(record: &mut CustomerRecord, catalog: &Catalog, rng: &mut impl Rng) {
    record.reset();
    record.visit = record.visit.wrapping_add(1);
    record.active = true;
    record.state = CustomerState::Enter;
    record.patience = rng.gen_range(rolls::PATIENCE_MIN..rolls::PATIENCE_MAX);
    record.courses_desired = rng.gen_range(rolls::COURSES_MIN..=rolls::COURSES_MAX);
    record.gold = rng.gen_range(rolls::GOLD_MIN..rolls::GOLD_MAX);
    record.favorite = roll_favorite(catalog, rng);
}

/// Most customers have a preferred recipe; the rest take the house default.
fn roll_favorite(catalog: &Catalog, rng: &mut impl Rng) -> Option<crate::components::RecipeId> {
    if !rng.gen_bool(rolls::FAVORITE_CHANCE) {
        return None;
    }
    let candidates: Vec<_> = catalog.favorite_candidates().collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())].id)
}

/// Spawn a dormant customer entity for the pool. The record stays
/// inactive until the engine activates it with fresh rolls.
pub fn spawn_pooled_customer(world: &mut World, layout: &TavernLayout, rng: &mut impl Rng) -> Entity {
    world.spawn((
        generate_name(rng),
        CustomerRecord::default(),
        Mover::new(layout.entry, WALK_SPEED),
    ))
}

/// Spawn the waiter roster. Waiters live for the whole simulation.
pub fn spawn_waiters(
    world: &mut World,
    count: u32,
    layout: &TavernLayout,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            world.spawn((
                generate_name(rng),
                WaiterRecord::default(),
                Mover::new(layout.waiter_idle, WALK_SPEED),
            ))
        })
        .collect()
}

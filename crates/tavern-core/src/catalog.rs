//! Recipe catalog and the two order-validation gates.
//!
//! The catalog is immutable reference data: orders and customer records
//! hold [`RecipeId`]s and resolve them here. Menu policy and inventory are
//! the collaborators a waiter consults before submitting an order.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::components::{PrepArea, Recipe, RecipeId};

/// The tavern's recipe book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The stock tavern menu used when no catalog file is supplied.
    pub fn house_catalog() -> Self {
        let entries: [(&str, f32, f32, f32, PrepArea, bool); 6] = [
            ("Ale", 3.0, 2.0, 0.5, PrepArea::Bar, true),
            ("Mead", 4.0, 3.0, 1.0, PrepArea::Bar, true),
            ("Mulled Wine", 6.0, 4.0, 1.5, PrepArea::Bar, true),
            ("Trencher Bread", 5.0, 3.0, 1.0, PrepArea::Kitchen, false),
            ("Barley Stew", 8.0, 5.0, 2.0, PrepArea::Kitchen, true),
            ("Roast Boar", 12.0, 9.0, 4.0, PrepArea::Kitchen, true),
        ];
        let recipes = entries
            .iter()
            .enumerate()
            .map(
                |(i, &(name, prep, sell, cost, area, favorite))| Recipe {
                    id: RecipeId(i as u32),
                    name: name.to_string(),
                    prep_seconds: prep,
                    sell_price: sell,
                    unit_cost: cost,
                    area,
                    favorite_candidate: favorite,
                },
            )
            .collect();
        Self { recipes }
    }

    /// Load a catalog from JSON (same shape `to_json` produces).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// House default served when a customer has no favorite.
    pub fn house_default(&self) -> Option<RecipeId> {
        self.recipes.first().map(|r| r.id)
    }

    /// Recipes customers may roll as their favorite.
    pub fn favorite_candidates(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(|r| r.favorite_candidate)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// First validation gate: is the recipe on the menu right now?
pub trait MenuPolicy {
    fn is_allowed(&self, recipe: &Recipe) -> bool;
}

/// Second validation gate: can the larder actually produce it?
pub trait InventoryService {
    fn can_craft(&self, recipe: &Recipe) -> bool;
    /// Consume the ingredients for one serving. Returns false (and
    /// consumes nothing) when stock is insufficient.
    fn try_consume(&mut self, recipe: &Recipe) -> bool;
}

/// Allow-everything menu with an explicit ban list, togglable at runtime.
#[derive(Debug, Clone, Default)]
pub struct HouseMenu {
    banned: HashSet<RecipeId>,
}

impl HouseMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ban(&mut self, id: RecipeId) {
        self.banned.insert(id);
    }

    pub fn unban(&mut self, id: RecipeId) {
        self.banned.remove(&id);
    }
}

impl MenuPolicy for HouseMenu {
    fn is_allowed(&self, recipe: &Recipe) -> bool {
        !self.banned.contains(&recipe.id)
    }
}

/// Stock-count inventory: each serving of a recipe consumes one portion.
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    stock: HashMap<RecipeId, u32>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pantry holding `portions` of every recipe in the catalog.
    pub fn stocked(catalog: &Catalog, portions: u32) -> Self {
        let stock = catalog.recipes().iter().map(|r| (r.id, portions)).collect();
        Self { stock }
    }

    pub fn set_stock(&mut self, id: RecipeId, portions: u32) {
        self.stock.insert(id, portions);
    }

    pub fn stock_of(&self, id: RecipeId) -> u32 {
        self.stock.get(&id).copied().unwrap_or(0)
    }
}

impl InventoryService for Pantry {
    fn can_craft(&self, recipe: &Recipe) -> bool {
        self.stock_of(recipe.id) > 0
    }

    fn try_consume(&mut self, recipe: &Recipe) -> bool {
        match self.stock.get_mut(&recipe.id) {
            Some(portions) if *portions > 0 => {
                *portions -= 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_catalog_lookup() {
        let catalog = Catalog::house_catalog();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.house_default(), Some(RecipeId(0)));

        let ale = catalog.get(RecipeId(0)).unwrap();
        assert_eq!(ale.name, "Ale");
        assert_eq!(ale.area, PrepArea::Bar);
        assert!(catalog.get(RecipeId(99)).is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let catalog = Catalog::house_catalog();
        let json = catalog.to_json().unwrap();
        let loaded = Catalog::from_json(&json).unwrap();
        assert_eq!(loaded.len(), catalog.len());
        assert_eq!(loaded.get(RecipeId(4)).unwrap().name, "Barley Stew");
    }

    #[test]
    fn test_menu_ban_unban() {
        let catalog = Catalog::house_catalog();
        let ale = catalog.get(RecipeId(0)).unwrap();

        let mut menu = HouseMenu::new();
        assert!(menu.is_allowed(ale));

        menu.ban(RecipeId(0));
        assert!(!menu.is_allowed(ale));

        menu.unban(RecipeId(0));
        assert!(menu.is_allowed(ale));
    }

    #[test]
    fn test_pantry_consumes_stock() {
        let catalog = Catalog::house_catalog();
        let stew = catalog.get(RecipeId(4)).unwrap();

        let mut pantry = Pantry::new();
        pantry.set_stock(stew.id, 2);

        assert!(pantry.can_craft(stew));
        assert!(pantry.try_consume(stew));
        assert!(pantry.try_consume(stew));
        // Third serving is refused, nothing goes negative.
        assert!(!pantry.try_consume(stew));
        assert!(!pantry.can_craft(stew));
    }

    #[test]
    fn test_empty_pantry_rejects_unknown_recipe() {
        let catalog = Catalog::house_catalog();
        let ale = catalog.get(RecipeId(0)).unwrap();
        let mut pantry = Pantry::new();
        assert!(!pantry.can_craft(ale));
        assert!(!pantry.try_consume(ale));
    }
}

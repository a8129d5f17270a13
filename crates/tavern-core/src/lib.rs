//! Tavern Core - Tavern Operation Simulation Engine
//!
//! An ECS-based simulation of a working tavern: customers enter, find a
//! seat, order food and drink, wait on preparation, eat, pay, and leave,
//! while waiters shuttle between tables and the kitchen and bar.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: Customers and waiters
//! - **Components**: Pure data attached to entities (CustomerRecord, Mover, etc.)
//! - **Systems**: Logic that queries and updates components each fixed step
//!
//! Shared resources (seating, the order board, the cash ledger, reputation,
//! cleaning) live on the engine as plain managers, mutated only from within
//! a tick on the single simulation thread.
//!
//! # Example
//!
//! ```rust,no_run
//! use tavern_core::prelude::*;
//!
//! let mut engine = TavernEngine::new(TavernConfig::default());
//!
//! // Run simulation
//! loop {
//!     engine.spawn_customer();
//!     engine.advance(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod catalog;
pub mod components;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::{Catalog, HouseMenu, InventoryService, MenuPolicy, Pantry};
    pub use crate::components::*;
    pub use crate::engine::{TavernConfig, TavernEngine};
    pub use crate::generation::TavernLayout;
    pub use crate::systems::{Severity, TavernEvent};
}

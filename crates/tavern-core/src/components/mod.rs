//! ECS components and plain data types for the tavern simulation.
//!
//! Organized into modules by concern:
//! - `common`: Shared components (Vec3, Mover, Name)
//! - `venue`: Tables, seats, recipes, orders
//! - `agents`: Customer and waiter records and state enums

pub mod agents;
pub mod common;
pub mod venue;

pub use agents::*;
pub use common::*;
pub use venue::*;

//! Systems - logic that operates on components and shared resources

mod cleaning;
mod customer;
mod events;
mod ledger;
mod movement;
mod orders;
mod reputation;
mod seating;
mod waiter;

pub use cleaning::*;
pub use customer::*;
pub use events::*;
pub use ledger::*;
pub use movement::*;
pub use orders::*;
pub use reputation::*;
pub use seating::*;
pub use waiter::*;

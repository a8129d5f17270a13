//! Generation - procedural creation of the floor, customers, and staff

mod floor;
mod names;
mod patrons;

pub use floor::*;
pub use names::*;
pub use patrons::*;

//! Pure simulation logic for the tavern.
//!
//! This crate contains the tuning values and math that are independent of
//! the ECS world and engine runtime. Functions take plain data and return
//! results, making them unit-testable and portable to headless tools.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`billing`] | Bill accumulation, per-course revenue/cost, fallback charges |
//! | [`constants`] | All tuning values: timers, graces, rolls, reputation deltas |
//! | [`timestep`] | Fixed-timestep accumulator driving the tick scheduler |
//! | [`tips`] | Wait-time-based tip curve |

pub mod billing;
pub mod constants;
pub mod timestep;
pub mod tips;

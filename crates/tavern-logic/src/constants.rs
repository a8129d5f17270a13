//! Tuning constants - timers, graces, attribute rolls, reputation deltas.
//!
//! These are plain values with no engine dependency. Both the core engine
//! and the native simtest harness use these.

pub mod timing {
    /// Fixed simulation step in seconds (10 Hz).
    pub const FIXED_STEP: f32 = 0.1;
    /// Grace period before a customer gives up on reaching the entry mark.
    pub const ENTER_GRACE: f32 = 1.0;
    /// How often a seatless customer re-issues a short wander.
    pub const SEAT_RETRY_INTERVAL: f32 = 1.5;
    /// How long a customer searches for a table before storming out.
    pub const TABLE_SEARCH_TIMEOUT: f32 = 12.0;
    /// Settle-in delay between sitting down and being ready to order.
    pub const SETTLE_DELAY: f32 = 0.5;
    /// How long a customer spends eating one course.
    pub const MEAL_DURATION: f32 = 6.0;
    /// Grace period before a departing customer is despawned regardless
    /// of whether the exit mark was reached.
    pub const LEAVE_GRACE: f32 = 10.0;
    /// Simulated seconds between forced overhead deductions.
    pub const OVERHEAD_INTERVAL: f32 = 60.0;
}

pub mod movement {
    /// Walking speed for customers and waiters, units per second.
    pub const WALK_SPEED: f32 = 1.4;
    /// Distance at which a destination counts as reached.
    pub const ARRIVAL_THRESHOLD: f32 = 0.5;
    /// Radius of the short wander issued while retrying the seat search.
    pub const WANDER_RADIUS: f32 = 2.0;
}

pub mod rolls {
    /// Per-customer patience budget range in seconds.
    pub const PATIENCE_MIN: f32 = 45.0;
    pub const PATIENCE_MAX: f32 = 90.0;
    /// How many courses a customer wants (inclusive range).
    pub const COURSES_MIN: u32 = 1;
    pub const COURSES_MAX: u32 = 3;
    /// Cosmetic gold carried by a customer.
    pub const GOLD_MIN: f32 = 5.0;
    pub const GOLD_MAX: f32 = 40.0;
    /// Chance that a customer has a favorite recipe at all.
    pub const FAVORITE_CHANCE: f64 = 0.6;
}

pub mod reputation {
    /// Penalty when a customer leaves angry.
    pub const ANGRY_PENALTY: i32 = 2;
    /// Bonus for a successful delivery.
    pub const DELIVERY_BONUS: i32 = 1;
}

pub mod billing {
    /// Sell price applied when a course finishes with no recipe on record.
    pub const FALLBACK_SELL_PRICE: f32 = 4.0;
    /// Unit cost applied when a course finishes with no recipe on record.
    pub const FALLBACK_UNIT_COST: f32 = 1.5;
    /// Charge applied when a customer reaches the till with an empty bill.
    pub const FALLBACK_CHARGE: f32 = 2.0;
}

pub mod tips {
    /// Waits at or below this earn the full tip.
    pub const FULL_TIP_WAIT: f32 = 5.0;
    /// Waits at or above this earn nothing.
    pub const ZERO_TIP_WAIT: f32 = 30.0;
    /// The full tip amount.
    pub const MAX_TIP: f32 = 3.0;
}

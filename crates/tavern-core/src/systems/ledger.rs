//! Cash ledger - balance, spend/revenue operations, periodic overhead.

use tavern_logic::constants::timing::OVERHEAD_INTERVAL;

use super::events::Signal;

/// The tavern's cash balance. Never goes negative through `try_spend`;
/// only the forced overhead can drain it, and that floors at zero.
pub struct CashLedger {
    balance: f32,
    overhead_per_minute: f32,
    overhead_accumulator: f32,
    /// Fires with the new balance after every mutation.
    pub on_change: Signal<f32>,
}

impl CashLedger {
    pub fn new(starting_balance: f32, overhead_per_minute: f32) -> Self {
        Self {
            balance: starting_balance.max(0.0),
            overhead_per_minute: overhead_per_minute.max(0.0),
            overhead_accumulator: 0.0,
            on_change: Signal::default(),
        }
    }

    pub fn balance(&self) -> f32 {
        self.balance
    }

    pub fn overhead_per_minute(&self) -> f32 {
        self.overhead_per_minute
    }

    /// Credit revenue. Amounts at or below zero are a no-op.
    pub fn add_revenue(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.balance += amount;
        let balance = self.balance;
        self.on_change.emit(&balance);
    }

    /// Debit `amount` if funds cover it. Insufficient funds reject the
    /// spend without mutation; negative amounts are an always-succeeding
    /// no-op.
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if amount < 0.0 {
            return true;
        }
        if amount > self.balance {
            return false;
        }
        self.balance -= amount;
        let balance = self.balance;
        self.on_change.emit(&balance);
        true
    }

    /// Accrue simulated time. Every 60 accumulated seconds the per-minute
    /// overhead is deducted, forced even when funds fall short (floored
    /// at zero) - rent is owed whether or not the till can cover it.
    pub fn tick(&mut self, delta_seconds: f32) {
        if delta_seconds <= 0.0 {
            return;
        }
        self.overhead_accumulator += delta_seconds;
        while self.overhead_accumulator >= OVERHEAD_INTERVAL {
            self.overhead_accumulator -= OVERHEAD_INTERVAL;
            if self.overhead_per_minute > 0.0 {
                self.balance = (self.balance - self.overhead_per_minute).max(0.0);
                let balance = self.balance;
                self.on_change.emit(&balance);
            }
        }
    }

    /// Restore balance from a snapshot without emitting change events.
    pub(crate) fn restore_balance(&mut self, balance: f32) {
        self.balance = balance.max(0.0);
    }
}

impl std::fmt::Debug for CashLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashLedger")
            .field("balance", &self.balance)
            .field("overhead_per_minute", &self.overhead_per_minute)
            .finish()
    }
}

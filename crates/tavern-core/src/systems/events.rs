//! Event bus and change signals for presentation collaborators.
//!
//! Delivery is best-effort: a panicking observer is contained and counted,
//! never allowed to interrupt publishing or the simulation. A bounded
//! history of recent events is kept for HUD display.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::components::{RecipeId, TableId};

/// How loud an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Small structured payload carried alongside the message.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EventPayload {
    pub table: Option<TableId>,
    pub recipe: Option<RecipeId>,
    pub amount: Option<f32>,
}

impl EventPayload {
    pub fn at_table(table: TableId) -> Self {
        Self {
            table: Some(table),
            ..Default::default()
        }
    }

    pub fn with_recipe(mut self, recipe: RecipeId) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn with_amount(mut self, amount: f32) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// One published happening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TavernEvent {
    pub message: String,
    pub severity: Severity,
    /// Which part of the simulation raised this ("floor", "till", ...).
    pub source: &'static str,
    pub payload: EventPayload,
}

impl TavernEvent {
    pub fn new(
        message: impl Into<String>,
        severity: Severity,
        source: &'static str,
        payload: EventPayload,
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            source,
            payload,
        }
    }
}

/// Observer-list event bus.
pub struct EventBus {
    observers: Vec<Box<dyn FnMut(&TavernEvent) + Send>>,
    recent: VecDeque<TavernEvent>,
    history_cap: usize,
    faulted_deliveries: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventBus {
    pub fn new(history_cap: usize) -> Self {
        Self {
            observers: Vec::new(),
            recent: VecDeque::with_capacity(history_cap),
            history_cap: history_cap.max(1),
            faulted_deliveries: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&TavernEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Publish to every observer. Observer panics are swallowed and
    /// counted so one broken consumer cannot break the simulation.
    pub fn publish(&mut self, event: TavernEvent) {
        for observer in &mut self.observers {
            if catch_unwind(AssertUnwindSafe(|| observer(&event))).is_err() {
                self.faulted_deliveries += 1;
            }
        }
        if self.recent.len() == self.history_cap {
            self.recent.pop_front();
        }
        self.recent.push_back(event);
    }

    /// Recent events, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &TavernEvent> {
        self.recent.iter()
    }

    /// How many deliveries were dropped because an observer faulted.
    pub fn faulted_deliveries(&self) -> u64 {
        self.faulted_deliveries
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("recent", &self.recent.len())
            .field("faulted_deliveries", &self.faulted_deliveries)
            .finish()
    }
}

/// Observer list for a single changing value (cash, reputation, counts).
pub struct Signal<T> {
    listeners: Vec<Box<dyn FnMut(&T) + Send>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<T> Signal<T> {
    pub fn connect(&mut self, listener: impl FnMut(&T) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, value: &T) {
        for listener in &mut self.listeners {
            listener(value);
        }
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

//! Bill accumulation - per-course revenue and cost with fallbacks.

use serde::{Deserialize, Serialize};

use crate::constants::billing::{FALLBACK_CHARGE, FALLBACK_SELL_PRICE, FALLBACK_UNIT_COST};

/// Running bill for one customer visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// What the customer will be charged.
    pub revenue: f32,
    /// What the courses cost the house to produce.
    pub cost: f32,
}

impl Bill {
    /// Add one finished course. Missing prices fall back to house defaults
    /// so a lost recipe reference never produces a free meal.
    pub fn add_course(&mut self, sell_price: Option<f32>, unit_cost: Option<f32>) {
        self.revenue += sell_price.unwrap_or(FALLBACK_SELL_PRICE);
        self.cost += unit_cost.unwrap_or(FALLBACK_UNIT_COST);
    }

    /// True if nothing was ever billed.
    pub fn is_empty(&self) -> bool {
        self.revenue <= 0.0
    }

    /// Charge applied when a customer reaches the till without a bill.
    pub fn apply_fallback_charge(&mut self) {
        if self.is_empty() {
            self.revenue = FALLBACK_CHARGE;
        }
    }

    /// Revenue minus cost.
    pub fn margin(&self) -> f32 {
        self.revenue - self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_course_with_prices() {
        let mut bill = Bill::default();
        bill.add_course(Some(5.0), Some(2.0));
        bill.add_course(Some(3.0), Some(1.0));
        assert_eq!(bill.revenue, 8.0);
        assert_eq!(bill.cost, 3.0);
        assert_eq!(bill.margin(), 5.0);
    }

    #[test]
    fn test_add_course_falls_back() {
        let mut bill = Bill::default();
        bill.add_course(None, None);
        assert_eq!(bill.revenue, FALLBACK_SELL_PRICE);
        assert_eq!(bill.cost, FALLBACK_UNIT_COST);
    }

    #[test]
    fn test_fallback_charge_only_when_empty() {
        let mut empty = Bill::default();
        empty.apply_fallback_charge();
        assert_eq!(empty.revenue, FALLBACK_CHARGE);

        let mut billed = Bill {
            revenue: 10.0,
            cost: 4.0,
        };
        billed.apply_fallback_charge();
        assert_eq!(billed.revenue, 10.0);
    }
}

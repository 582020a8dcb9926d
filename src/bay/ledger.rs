//! Capacity ledger - total vs remaining space in the bay's native unit
//!
//! The unit is tons for cargo and infantry bays and unit slots for the rest;
//! callers normalize costs before they get here.

use serde::{Deserialize, Serialize};

use crate::core::error::{BayError, Result};

/// A cost below zero would grow the free space past the total
pub fn is_valid_cost(cost: f64) -> bool {
    cost.is_finite() && cost >= 0.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityLedger {
    total: f64,
    remaining: f64,
}

impl CapacityLedger {
    /// Create an empty ledger; capacity must be finite and non-negative
    pub fn new(total: f64) -> Result<Self> {
        if !total.is_finite() || total < 0.0 {
            return Err(BayError::InvalidConfiguration(format!(
                "Bay capacity must be a non-negative number, got {}",
                total
            )));
        }
        Ok(Self {
            total,
            remaining: total,
        })
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn unused(&self) -> f64 {
        self.remaining
    }

    pub fn used(&self) -> f64 {
        self.total - self.remaining
    }

    /// Exact comparison; costs are already in the ledger's unit
    pub fn can_fit(&self, cost: f64) -> bool {
        is_valid_cost(cost) && cost <= self.remaining
    }

    pub fn reserve(&mut self, cost: f64) -> Result<()> {
        if !is_valid_cost(cost) {
            return Err(BayError::InvalidConfiguration(format!(
                "Cost must be a non-negative number, got {}",
                cost
            )));
        }
        if !self.can_fit(cost) {
            return Err(BayError::InsufficientCapacity {
                needed: cost,
                available: self.remaining,
            });
        }
        self.remaining -= cost;
        Ok(())
    }

    /// Give space back, never above the total
    pub fn release(&mut self, cost: f64) {
        if !is_valid_cost(cost) {
            return;
        }
        self.remaining = (self.remaining + cost).min(self.total);
    }

    /// Release everything
    pub fn reset(&mut self) {
        self.remaining = self.total;
    }
}

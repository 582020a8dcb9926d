//! Recovery slot pool for bays that run launch/recovery cycles
//!
//! Each slot is either open (`0`) or cooling down (`n > 0` rounds left).
//! Slots are picked lowest index first. Door losses remove slots from the
//! front no matter what state they are in.

use serde::{Deserialize, Serialize};

use crate::core::config::BayRules;
use crate::core::error::NoSlotAvailable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverySlotPool {
    slots: Vec<u8>,
    cooldown: u8,
    slots_per_door: u32,
}

impl RecoverySlotPool {
    /// Pool of open slots sized for `door_count` doors
    pub fn new(door_count: u32, rules: &BayRules) -> Self {
        let mut pool = Self {
            slots: Vec::new(),
            cooldown: rules.recovery_cooldown_rounds,
            slots_per_door: rules.slots_per_door,
        };
        pool.reinitialize(door_count);
        pool
    }

    pub fn slots(&self) -> &[u8] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn cooldown(&self) -> u8 {
        self.cooldown
    }

    pub fn slots_per_door(&self) -> u32 {
        self.slots_per_door
    }

    pub fn available_count(&self) -> u32 {
        self.slots.iter().filter(|s| **s == 0).count() as u32
    }

    /// Close the first open slot for a full cooldown
    pub fn try_consume_slot(&mut self) -> Result<(), NoSlotAvailable> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| **s == 0)
            .ok_or(NoSlotAvailable)?;
        *slot = self.cooldown;
        Ok(())
    }

    /// Age every cooling slot by one round
    pub fn advance_round(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = slot.saturating_sub(1);
        }
    }

    /// Drop up to `n` slots from the front, cooling or not
    pub fn remove_slots(&mut self, n: u32) {
        let n = (n as usize).min(self.slots.len());
        self.slots.drain(..n);
    }

    /// Rebuild as all-open slots. Never use mid-battle: it reopens cooling slots.
    pub fn reinitialize(&mut self, door_count: u32) {
        self.slots = vec![0; door_count.saturating_mul(self.slots_per_door) as usize];
    }
}

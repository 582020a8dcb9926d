//! Door array - functional doors now and at the start of next round
//!
//! Doors only ever go down during a battle. Over-destruction clamps at zero.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorArray {
    total: u32,
    current: u32,
    next: u32,
}

impl DoorArray {
    pub fn new(doors: u32) -> Self {
        Self {
            total: doors,
            current: doors,
            next: doors,
        }
    }

    /// Doors as built
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn doors_available(&self) -> u32 {
        self.current
    }

    pub fn doors_next(&self) -> u32 {
        self.next
    }

    pub fn is_disabled(&self) -> bool {
        self.current == 0
    }

    /// Lose a door at the next round boundary
    pub fn schedule_destruction(&mut self) {
        self.next = self.next.saturating_sub(1);
    }

    /// Lose a door immediately. Returns false if none were left.
    ///
    /// The pending count drops too, so the next commit cannot bring the door back.
    pub fn destroy_now(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.next = self.next.saturating_sub(1).min(self.current);
        true
    }

    /// Apply scheduled losses. Returns how many doors were lost.
    pub fn commit_round(&mut self) -> u32 {
        let committed = self.next.min(self.current);
        let lost = self.current - committed;
        self.current = committed;
        self.next = committed;
        lost
    }

    /// Restore every door; out-of-battle repair only
    pub fn repair(&mut self) {
        self.current = self.total;
        self.next = self.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduled_destruction_waits_for_commit() {
        let mut doors = DoorArray::new(2);
        doors.schedule_destruction();
        assert_eq!(doors.doors_available(), 2);
        assert_eq!(doors.doors_next(), 1);

        assert_eq!(doors.commit_round(), 1);
        assert_eq!(doors.doors_available(), 1);
    }

    #[test]
    fn test_destroy_now_is_immediate() {
        let mut doors = DoorArray::new(3);
        assert!(doors.destroy_now());
        assert_eq!(doors.doors_available(), 2);
        assert_eq!(doors.doors_next(), 2);
    }

    #[test]
    fn test_destroy_now_and_schedule_stack() {
        let mut doors = DoorArray::new(3);
        doors.schedule_destruction();
        doors.destroy_now();
        assert_eq!(doors.doors_available(), 2);
        assert_eq!(doors.doors_next(), 1);
        assert_eq!(doors.commit_round(), 1);
        assert_eq!(doors.doors_available(), 1);
    }

    #[test]
    fn test_over_destruction_clamps_at_zero() {
        let mut doors = DoorArray::new(1);
        for _ in 0..5 {
            doors.schedule_destruction();
        }
        assert_eq!(doors.doors_next(), 0);
        doors.commit_round();
        assert!(doors.is_disabled());
        assert!(!doors.destroy_now());
        assert_eq!(doors.doors_available(), 0);
    }

    #[test]
    fn test_commit_without_damage_is_noop() {
        let mut doors = DoorArray::new(2);
        assert_eq!(doors.commit_round(), 0);
        assert_eq!(doors.doors_available(), 2);
    }

    #[test]
    fn test_repair_restores_all() {
        let mut doors = DoorArray::new(2);
        doors.destroy_now();
        doors.destroy_now();
        doors.repair();
        assert_eq!(doors.doors_available(), 2);
        assert_eq!(doors.doors_next(), 2);
    }
}

//! A single transport bay aboard a carrier
//!
//! `Bay` composes a capacity ledger, a door array and, for launch/recovery
//! bays, a recovery slot pool. Loading goes through the `Transporter`
//! contract; this file holds construction, the round lifecycle and damage.

use serde::{Deserialize, Serialize};

use crate::bay::doors::DoorArray;
use crate::bay::kind::{BayKind, CraftBayClass, CouplingKind, UnitBayClass};
use crate::bay::ledger::{is_valid_cost, CapacityLedger};
use crate::bay::platoon::PlatoonType;
use crate::bay::recovery::RecoverySlotPool;
use crate::core::config::{self, BayRules};
use crate::core::error::{BayError, NoSlotAvailable, Result};
use crate::core::types::{BayId, UnitId};
use crate::unit::Embarkable;

/// A unit aboard, with the space it was charged when it came in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadedUnit {
    pub id: UnitId,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bay {
    pub(crate) id: BayId,
    pub(crate) kind: BayKind,
    /// Capacity as advertised (platoons for infantry bays)
    pub(crate) rated_capacity: f64,
    pub(crate) ledger: CapacityLedger,
    pub(crate) doors: DoorArray,
    pub(crate) recovery: Option<RecoverySlotPool>,
    /// Load order
    pub(crate) loaded: Vec<LoadedUnit>,
    pub(crate) launched_this_round: u32,
    pub(crate) rules: BayRules,
}

impl Bay {
    /// Build a bay under the global rules
    ///
    /// `capacity` is in the bay's advertised unit: platoons for infantry
    /// bays, tons for cargo bays, unit slots otherwise.
    pub fn new(kind: BayKind, capacity: f64, doors: u32, id: BayId) -> Result<Self> {
        Self::with_rules(kind, capacity, doors, id, config::rules())
    }

    pub fn with_rules(
        kind: BayKind,
        capacity: f64,
        doors: u32,
        id: BayId,
        rules: &BayRules,
    ) -> Result<Self> {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(BayError::InvalidConfiguration(format!(
                "Bay {} capacity must be a non-negative number, got {}",
                id, capacity
            )));
        }
        if doors > rules.max_doors_per_bay {
            return Err(BayError::InvalidConfiguration(format!(
                "Bay {} has {} doors, at most {} allowed",
                id, doors, rules.max_doors_per_bay
            )));
        }
        if kind.is_coupling() && (capacity != 1.0 || doors != 1) {
            return Err(BayError::InvalidConfiguration(format!(
                "{} holds exactly one unit through one coupling",
                kind.display_name()
            )));
        }

        let ledger = CapacityLedger::new(capacity * kind.capacity_scale())?;
        let recovery = kind
            .has_recovery_pool()
            .then(|| RecoverySlotPool::new(doors, rules));

        Ok(Self {
            id,
            kind,
            rated_capacity: capacity,
            ledger,
            doors: DoorArray::new(doors),
            recovery,
            loaded: Vec::new(),
            launched_this_round: 0,
            rules: rules.clone(),
        })
    }

    pub fn fighter(capacity: f64, doors: u32, id: BayId) -> Result<Self> {
        Self::new(BayKind::LaunchRecovery(CraftBayClass::Fighter), capacity, doors, id)
    }

    pub fn small_craft(capacity: f64, doors: u32, id: BayId) -> Result<Self> {
        Self::new(BayKind::LaunchRecovery(CraftBayClass::SmallCraft), capacity, doors, id)
    }

    pub fn unit_count(class: UnitBayClass, capacity: f64, doors: u32, id: BayId) -> Result<Self> {
        Self::new(BayKind::UnitCount(class), capacity, doors, id)
    }

    pub fn infantry(platoon: PlatoonType, platoons: f64, doors: u32, id: BayId) -> Result<Self> {
        Self::new(BayKind::Infantry(platoon), platoons, doors, id)
    }

    pub fn cargo(tons: f64, doors: u32, id: BayId) -> Result<Self> {
        Self::new(BayKind::Cargo, tons, doors, id)
    }

    pub fn docking_collar(id: BayId) -> Result<Self> {
        Self::new(BayKind::Coupling(CouplingKind::DockingCollar), 1.0, 1, id)
    }

    pub fn trailer_hitch(id: BayId) -> Result<Self> {
        Self::new(BayKind::Coupling(CouplingKind::TrailerHitch), 1.0, 1, id)
    }

    // === ACCESSORS ===

    pub fn id(&self) -> BayId {
        self.id
    }

    pub fn kind(&self) -> BayKind {
        self.kind
    }

    pub fn rules(&self) -> &BayRules {
        &self.rules
    }

    /// Raw capacity in the ledger's unit (tons for infantry)
    pub fn total_capacity(&self) -> f64 {
        self.ledger.total()
    }

    pub fn remaining_capacity(&self) -> f64 {
        self.ledger.unused()
    }

    /// Capacity as advertised: platoon slots for infantry bays
    pub fn capacity_in_units(&self) -> f64 {
        self.rated_capacity
    }

    pub fn unused_in_units(&self) -> f64 {
        self.ledger.unused() / self.kind.capacity_scale()
    }

    pub fn doors_total(&self) -> u32 {
        self.doors.total()
    }

    pub fn doors_next(&self) -> u32 {
        self.doors.doors_next()
    }

    pub fn loaded(&self) -> &[LoadedUnit] {
        &self.loaded
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_loaded(&self, unit: UnitId) -> bool {
        self.loaded.iter().any(|l| l.id == unit)
    }

    pub fn recovery_pool(&self) -> Option<&RecoverySlotPool> {
        self.recovery.as_ref()
    }

    /// Open recovery slots; zero for bays without a pool
    pub fn available_recovery_slots(&self) -> u32 {
        self.recovery
            .as_ref()
            .map(|p| p.available_count())
            .unwrap_or(0)
    }

    pub fn launched_this_round(&self) -> u32 {
        self.launched_this_round
    }

    /// Units that may launch this round through the doors still working
    pub fn launch_limit(&self) -> u32 {
        self.doors
            .doors_available()
            .saturating_mul(self.rules.launches_per_door)
    }

    // === CHECKS ===

    /// Why `unit` could not be loaded right now, or its cost if it can
    pub fn check_load<U: Embarkable + ?Sized>(&self, unit: &U) -> Result<f64> {
        let unit_id = unit.unit_id();
        if self.is_loaded(unit_id) {
            return Err(BayError::AlreadyLoaded(unit_id));
        }
        let cost = self.kind.cost(unit);
        // A unit with a negative or non-finite weight is not a real unit
        if !self.kind.type_is_compatible(unit, &self.rules) || !is_valid_cost(cost) {
            return Err(BayError::IncompatibleUnit {
                bay: self.id,
                unit: unit_id,
            });
        }
        if self.doors.is_disabled() {
            return Err(BayError::NoDoorsAvailable { bay: self.id });
        }
        if !self.ledger.can_fit(cost) {
            return Err(BayError::InsufficientCapacity {
                needed: cost,
                available: self.ledger.unused(),
            });
        }
        Ok(cost)
    }

    /// As `check_load`, plus an open recovery slot
    pub fn check_recover<U: Embarkable + ?Sized>(&self, unit: &U) -> Result<f64> {
        let pool = self
            .recovery
            .as_ref()
            .ok_or(BayError::RecoveryNotSupported { bay: self.id })?;
        let cost = self.check_load(unit)?;
        if pool.available_count() == 0 {
            return Err(NoSlotAvailable.into());
        }
        Ok(cost)
    }

    // === LAUNCH ===

    /// Send a carried unit out through a door during play
    ///
    /// Capped at `launch_limit()` per round; the unit leaves the bay.
    pub fn launch(&mut self, unit: UnitId) -> Result<()> {
        let index = self.position_of(unit)?;
        if self.doors.is_disabled() {
            return Err(BayError::NoDoorsAvailable { bay: self.id });
        }
        let limit = self.launch_limit();
        if self.launched_this_round >= limit {
            return Err(BayError::LaunchLimitReached { bay: self.id, limit });
        }

        let departed = self.loaded.remove(index);
        self.ledger.release(departed.cost);
        self.launched_this_round += 1;
        tracing::debug!(
            "Bay {} launched unit {} ({}/{} this round)",
            self.id,
            unit,
            self.launched_this_round,
            limit
        );
        Ok(())
    }

    pub(crate) fn position_of(&self, unit: UnitId) -> Result<usize> {
        self.loaded
            .iter()
            .position(|l| l.id == unit)
            .ok_or(BayError::NotLoaded(unit))
    }

    // === DOORS ===

    /// Lose a door this round; its recovery slots go with it
    pub fn destroy_door(&mut self) {
        if self.doors.destroy_now() {
            if let Some(pool) = self.recovery.as_mut() {
                pool.remove_slots(pool.slots_per_door());
            }
            tracing::info!(
                "Bay {} lost a door, {} remaining",
                self.id,
                self.doors.doors_available()
            );
        }
    }

    /// Lose a door at the next round boundary
    pub fn destroy_door_next(&mut self) {
        self.doors.schedule_destruction();
        tracing::debug!(
            "Bay {} door destruction scheduled, {} doors next round",
            self.id,
            self.doors.doors_next()
        );
    }

    /// Restore every door and reopen the recovery pool. Out-of-battle only.
    pub fn repair_doors(&mut self) {
        self.doors.repair();
        if let Some(pool) = self.recovery.as_mut() {
            pool.reinitialize(self.doors.doors_available());
        }
    }

    // === ROUND LIFECYCLE ===

    /// Finalize scheduled door losses, shrinking the pool to match
    pub fn commit_round(&mut self) {
        let lost = self.doors.commit_round();
        if lost == 0 {
            return;
        }
        if let Some(pool) = self.recovery.as_mut() {
            pool.remove_slots(lost.saturating_mul(pool.slots_per_door()));
        }
        tracing::info!(
            "Bay {} lost {} door(s) at round end, {} remaining",
            self.id,
            lost,
            self.doors.doors_available()
        );
    }

    /// Age cooling recovery slots by one round
    pub fn advance_round(&mut self) {
        if let Some(pool) = self.recovery.as_mut() {
            pool.advance_round();
        }
    }

    /// Round transition: doors, then slot aging, then launch counters
    pub fn end_round(&mut self) {
        self.commit_round();
        self.advance_round();
        self.launched_this_round = 0;
    }

    /// Empty the bay
    pub fn reset(&mut self) {
        self.loaded.clear();
        self.ledger.reset();
        self.launched_this_round = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bay::Transporter;
    use crate::unit::UnitProfile;

    #[test]
    fn test_fighter_bay_starts_with_full_pool() {
        let bay = Bay::fighter(6.0, 2, BayId(1)).unwrap();
        assert_eq!(bay.total_capacity(), 6.0);
        assert_eq!(bay.remaining_capacity(), 6.0);
        assert_eq!(bay.recovery_pool().unwrap().len(), 4);
        assert_eq!(bay.available_recovery_slots(), 4);
    }

    #[test]
    fn test_unit_bays_have_no_pool() {
        let bay = Bay::unit_count(UnitBayClass::Mek, 4.0, 1, BayId(1)).unwrap();
        assert!(bay.recovery_pool().is_none());
        assert_eq!(bay.available_recovery_slots(), 0);
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let err = Bay::cargo(-5.0, 1, BayId(1)).unwrap_err();
        assert!(matches!(err, BayError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_negative_weight_cargo_rejected() {
        let mut bay = Bay::cargo(10.0, 1, BayId(1)).unwrap();
        let bogus = UnitProfile::cargo(-5.0);
        assert!(!bay.can_load(&bogus));
        assert!(matches!(
            bay.load(&bogus),
            Err(BayError::IncompatibleUnit { .. })
        ));
        assert!(bay.load(&UnitProfile::cargo(f64::NAN)).is_err());
        assert_eq!(bay.remaining_capacity(), 10.0);
        assert!(bay.loaded().is_empty());
    }

    #[test]
    fn test_door_count_capped_by_rules() {
        let rules = BayRules {
            max_doors_per_bay: 4,
            ..BayRules::default()
        };
        let kind = BayKind::LaunchRecovery(CraftBayClass::Fighter);
        assert!(Bay::with_rules(kind, 6.0, 4, BayId(1), &rules).is_ok());
        let err = Bay::with_rules(kind, 6.0, 5, BayId(1), &rules).unwrap_err();
        assert!(matches!(err, BayError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_infantry_capacity_is_stored_in_tons() {
        let bay = Bay::infantry(PlatoonType::Motorized, 3.0, 1, BayId(2)).unwrap();
        assert_eq!(bay.total_capacity(), 21.0);
        assert_eq!(bay.capacity_in_units(), 3.0);
    }

    #[test]
    fn test_destroy_door_removes_two_slots() {
        let mut bay = Bay::fighter(6.0, 2, BayId(1)).unwrap();
        bay.destroy_door();
        assert_eq!(bay.doors.doors_available(), 1);
        assert_eq!(bay.recovery_pool().unwrap().len(), 2);
    }

    #[test]
    fn test_scheduled_door_loss_shrinks_pool_at_commit() {
        let mut bay = Bay::fighter(6.0, 2, BayId(1)).unwrap();
        bay.destroy_door_next();
        assert_eq!(bay.recovery_pool().unwrap().len(), 4);
        bay.commit_round();
        assert_eq!(bay.doors.doors_available(), 1);
        assert_eq!(bay.recovery_pool().unwrap().len(), 2);
    }

    #[test]
    fn test_launch_limit_per_round() {
        let mut bay = Bay::fighter(6.0, 1, BayId(1)).unwrap();
        let fighters: Vec<UnitProfile> = (0..3).map(|_| UnitProfile::fighter(45.0)).collect();
        for f in &fighters {
            bay.load(f).unwrap();
        }

        bay.launch(fighters[0].id).unwrap();
        bay.launch(fighters[1].id).unwrap();
        let err = bay.launch(fighters[2].id).unwrap_err();
        assert!(matches!(err, BayError::LaunchLimitReached { limit: 2, .. }));

        bay.end_round();
        bay.launch(fighters[2].id).unwrap();
        assert_eq!(bay.remaining_capacity(), 6.0);
    }

    #[test]
    fn test_launch_without_doors_fails() {
        let mut bay = Bay::fighter(2.0, 1, BayId(1)).unwrap();
        let f = UnitProfile::fighter(45.0);
        bay.load(&f).unwrap();
        bay.destroy_door();
        assert!(matches!(
            bay.launch(f.id),
            Err(BayError::NoDoorsAvailable { .. })
        ));
        assert!(bay.is_loaded(f.id));
    }

    #[test]
    fn test_repair_reopens_pool() {
        let mut bay = Bay::fighter(6.0, 2, BayId(1)).unwrap();
        bay.recover(&UnitProfile::fighter(40.0)).unwrap();
        bay.destroy_door();
        bay.repair_doors();
        assert_eq!(bay.doors_total(), 2);
        assert_eq!(bay.available_recovery_slots(), 4);
    }

    #[test]
    fn test_reset_empties_bay() {
        let mut bay = Bay::cargo(10.0, 1, BayId(1)).unwrap();
        bay.load(&UnitProfile::cargo(4.0)).unwrap();
        bay.reset();
        assert_eq!(bay.loaded_count(), 0);
        assert_eq!(bay.remaining_capacity(), 10.0);
    }

    #[test]
    fn test_coupling_must_be_single_slot() {
        let kind = BayKind::Coupling(CouplingKind::TrailerHitch);
        assert!(Bay::new(kind, 2.0, 1, BayId(1)).is_err());
        assert!(Bay::trailer_hitch(BayId(1)).is_ok());
    }
}

//! The capability contract the movement and deployment logic talks to

use crate::bay::transport_bay::{Bay, LoadedUnit};
use crate::core::error::Result;
use crate::core::types::UnitId;
use crate::unit::Embarkable;

/// Something that carries units
///
/// `load` is deployment-time placement and never touches recovery slots.
/// `recover` is the mid-game return from a launch cycle and consumes one.
/// Every call either commits fully or leaves the transporter untouched.
pub trait Transporter {
    fn can_load<U: Embarkable + ?Sized>(&self, unit: &U) -> bool;

    fn load<U: Embarkable + ?Sized>(&mut self, unit: &U) -> Result<()>;

    fn can_recover<U: Embarkable + ?Sized>(&self, unit: &U) -> bool;

    fn recover<U: Embarkable + ?Sized>(&mut self, unit: &U) -> Result<()>;

    fn unload(&mut self, unit: UnitId) -> Result<()>;

    fn unused(&self) -> f64;

    /// Carried units in load order
    fn loaded_units(&self) -> Vec<UnitId>;

    fn doors_available(&self) -> u32;

    fn can_unload_units(&self) -> bool;
}

impl Transporter for Bay {
    fn can_load<U: Embarkable + ?Sized>(&self, unit: &U) -> bool {
        self.check_load(unit).is_ok()
    }

    fn load<U: Embarkable + ?Sized>(&mut self, unit: &U) -> Result<()> {
        let cost = self.check_load(unit)?;
        self.ledger.reserve(cost)?;
        self.loaded.push(LoadedUnit {
            id: unit.unit_id(),
            cost,
        });
        tracing::debug!(
            "Bay {} loaded {} {} (cost {}, {} left)",
            self.id,
            unit.kind().name(),
            unit.unit_id(),
            cost,
            self.ledger.unused()
        );
        Ok(())
    }

    fn can_recover<U: Embarkable + ?Sized>(&self, unit: &U) -> bool {
        self.check_recover(unit).is_ok()
    }

    fn recover<U: Embarkable + ?Sized>(&mut self, unit: &U) -> Result<()> {
        let cost = self.check_recover(unit)?;
        if let Some(pool) = self.recovery.as_mut() {
            pool.try_consume_slot()?;
        }
        self.ledger.reserve(cost)?;
        self.loaded.push(LoadedUnit {
            id: unit.unit_id(),
            cost,
        });
        tracing::debug!(
            "Bay {} recovered {} {} ({} recovery slots open)",
            self.id,
            unit.kind().name(),
            unit.unit_id(),
            self.available_recovery_slots()
        );
        Ok(())
    }

    fn unload(&mut self, unit: UnitId) -> Result<()> {
        let index = self.position_of(unit)?;
        let removed = self.loaded.remove(index);
        self.ledger.release(removed.cost);
        tracing::debug!("Bay {} unloaded unit {}", self.id, unit);
        Ok(())
    }

    fn unused(&self) -> f64 {
        self.ledger.unused()
    }

    fn loaded_units(&self) -> Vec<UnitId> {
        self.loaded.iter().map(|l| l.id).collect()
    }

    fn doors_available(&self) -> u32 {
        self.doors.doors_available()
    }

    fn can_unload_units(&self) -> bool {
        !self.loaded.is_empty() && !self.doors.is_disabled()
    }
}

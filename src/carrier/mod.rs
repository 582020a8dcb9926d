//! Carrier - the vehicle that owns a set of bays
//!
//! A carrier owns its bays outright and bays never point back at it.
//! Everything spanning several bays (total fighter space, open recovery
//! slots) is a read-only fold over the owned bays.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bay::{Bay, BayKind, Transporter};
use crate::core::error::{BayError, Result};
use crate::core::types::{BayId, Round, UnitId};
use crate::unit::Embarkable;

/// Carrier layout as written in a TOML file: a name and one record per bay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierSpec {
    pub name: String,
    #[serde(default)]
    pub bays: Vec<String>,
}

impl CarrierSpec {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| BayError::Config(format!("Failed to parse carrier TOML: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrier {
    pub name: String,
    bays: Vec<Bay>,
    /// Which bay each carried unit is in
    aboard: AHashMap<UnitId, BayId>,
    round: Round,
}

impl Carrier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bays: Vec::new(),
            aboard: AHashMap::new(),
            round: 0,
        }
    }

    /// Build every bay listed in the layout
    pub fn from_spec(spec: &CarrierSpec) -> Result<Self> {
        let mut carrier = Self::new(spec.name.clone());
        for record in &spec.bays {
            carrier.add_bay(Bay::from_record(record)?)?;
        }
        Ok(carrier)
    }

    pub fn add_bay(&mut self, bay: Bay) -> Result<()> {
        if self.bays.iter().any(|b| b.id() == bay.id()) {
            return Err(BayError::DuplicateBay(bay.id()));
        }
        let units = bay.loaded_units();
        if let Some(unit) = units.iter().find(|u| self.aboard.contains_key(*u)) {
            return Err(BayError::AlreadyLoaded(*unit));
        }
        for unit in units {
            self.aboard.insert(unit, bay.id());
        }
        self.bays.push(bay);
        Ok(())
    }

    pub fn bays(&self) -> &[Bay] {
        &self.bays
    }

    pub fn bay(&self, id: BayId) -> Option<&Bay> {
        self.bays.iter().find(|b| b.id() == id)
    }

    fn bay_mut(&mut self, id: BayId) -> Result<&mut Bay> {
        self.bays
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(BayError::UnknownBay(id))
    }

    pub fn round(&self) -> Round {
        self.round
    }

    /// Bay currently holding the unit
    pub fn carrying(&self, unit: UnitId) -> Option<BayId> {
        self.aboard.get(&unit).copied()
    }

    fn ensure_not_aboard(&self, unit: UnitId) -> Result<()> {
        if self.aboard.contains_key(&unit) {
            return Err(BayError::AlreadyLoaded(unit));
        }
        Ok(())
    }

    // === LOADING ===

    /// First bay that would accept the unit at deployment
    pub fn find_bay_for<U: Embarkable + ?Sized>(&self, unit: &U) -> Option<BayId> {
        self.bays.iter().find(|b| b.can_load(unit)).map(|b| b.id())
    }

    /// First bay with an open recovery slot for the unit
    pub fn find_recovery_bay_for<U: Embarkable + ?Sized>(&self, unit: &U) -> Option<BayId> {
        self.bays.iter().find(|b| b.can_recover(unit)).map(|b| b.id())
    }

    pub fn load_into<U: Embarkable + ?Sized>(&mut self, bay: BayId, unit: &U) -> Result<()> {
        self.ensure_not_aboard(unit.unit_id())?;
        self.bay_mut(bay)?.load(unit)?;
        self.aboard.insert(unit.unit_id(), bay);
        Ok(())
    }

    pub fn recover_into<U: Embarkable + ?Sized>(&mut self, bay: BayId, unit: &U) -> Result<()> {
        self.ensure_not_aboard(unit.unit_id())?;
        self.bay_mut(bay)?.recover(unit)?;
        self.aboard.insert(unit.unit_id(), bay);
        Ok(())
    }

    /// Deploy the unit into the first bay that takes it
    pub fn load<U: Embarkable + ?Sized>(&mut self, unit: &U) -> Result<BayId> {
        self.ensure_not_aboard(unit.unit_id())?;
        let bay = self
            .find_bay_for(unit)
            .ok_or(BayError::NoBayAvailable(unit.unit_id()))?;
        self.load_into(bay, unit)?;
        Ok(bay)
    }

    /// Recover the unit into the first bay with room and an open slot
    pub fn recover<U: Embarkable + ?Sized>(&mut self, unit: &U) -> Result<BayId> {
        self.ensure_not_aboard(unit.unit_id())?;
        let bay = self
            .find_recovery_bay_for(unit)
            .ok_or(BayError::NoBayAvailable(unit.unit_id()))?;
        self.recover_into(bay, unit)?;
        Ok(bay)
    }

    pub fn unload(&mut self, unit: UnitId) -> Result<BayId> {
        let bay = self.carrying(unit).ok_or(BayError::NotLoaded(unit))?;
        self.bay_mut(bay)?.unload(unit)?;
        self.aboard.remove(&unit);
        Ok(bay)
    }

    pub fn launch(&mut self, unit: UnitId) -> Result<BayId> {
        let bay = self.carrying(unit).ok_or(BayError::NotLoaded(unit))?;
        self.bay_mut(bay)?.launch(unit)?;
        self.aboard.remove(&unit);
        Ok(bay)
    }

    // === DAMAGE ===

    pub fn destroy_door(&mut self, bay: BayId) -> Result<()> {
        self.bay_mut(bay)?.destroy_door();
        Ok(())
    }

    pub fn destroy_door_next(&mut self, bay: BayId) -> Result<()> {
        self.bay_mut(bay)?.destroy_door_next();
        Ok(())
    }

    // === ROUND ===

    /// Close the round on every bay exactly once
    pub fn end_round(&mut self) {
        for bay in self.bays.iter_mut() {
            bay.end_round();
        }
        self.round += 1;
        tracing::debug!("{} finished round {}", self.name, self.round);
    }

    // === AGGREGATES ===

    /// Sum of `unused()` over every bay, in each bay's native unit
    pub fn total_unused(&self) -> f64 {
        self.bays.iter().map(|b| b.unused()).sum()
    }

    /// Sum of `unused()` over bays matching the predicate
    pub fn unused_by<F>(&self, predicate: F) -> f64
    where
        F: Fn(&Bay) -> bool,
    {
        self.bays
            .iter()
            .filter(|&b| predicate(b))
            .map(|b| b.unused())
            .sum()
    }

    /// Total craft slots across launch/recovery bays, as built
    pub fn fighter_capacity(&self) -> f64 {
        self.bays
            .iter()
            .filter(|b| matches!(b.kind(), BayKind::LaunchRecovery(_)))
            .map(|b| b.capacity_in_units())
            .sum()
    }

    pub fn open_recovery_slots(&self) -> u32 {
        self.bays.iter().map(|b| b.available_recovery_slots()).sum()
    }

    pub fn units_aboard(&self) -> usize {
        self.aboard.len()
    }

    /// One summary line per bay
    pub fn summary(&self) -> String {
        let mut out = format!("{} (round {})", self.name, self.round);
        for bay in &self.bays {
            out.push_str(&format!("\n  [{}] {}", bay.id(), bay));
        }
        out
    }
}

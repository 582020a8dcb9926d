//! Units that can ride in a bay
//!
//! The game owns its units; bays only need to classify them. `Embarkable` is
//! the seam the rest of the game implements, and `UnitProfile` is a plain
//! implementation for callers without their own unit type.

use serde::{Deserialize, Serialize};

use crate::bay::platoon::PlatoonType;
use crate::core::types::UnitId;

/// Broad classification of a carried unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    // Ground
    Mek,
    ProtoMek,
    Vehicle,
    Infantry,
    BattleArmor,

    // Aerospace
    Fighter,
    SmallCraft,
    DropShip,

    // Towed and freight
    Trailer,
    Cargo,
}

impl UnitKind {
    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Mek => "Mek",
            UnitKind::ProtoMek => "ProtoMek",
            UnitKind::Vehicle => "Vehicle",
            UnitKind::Infantry => "Infantry",
            UnitKind::BattleArmor => "Battle Armor",
            UnitKind::Fighter => "Fighter",
            UnitKind::SmallCraft => "Small Craft",
            UnitKind::DropShip => "DropShip",
            UnitKind::Trailer => "Trailer",
            UnitKind::Cargo => "Cargo",
        }
    }
}

/// Anything a bay can be asked to carry
pub trait Embarkable {
    fn unit_id(&self) -> UnitId;

    fn kind(&self) -> UnitKind;

    /// Weight in tons
    fn weight(&self) -> f64;

    /// Platoon movement type, for infantry and battle armor
    fn platoon_type(&self) -> Option<PlatoonType> {
        None
    }

    /// Squads in the platoon (only meaningful for mechanized infantry)
    fn squad_count(&self) -> u32 {
        1
    }

    fn is_fighter(&self) -> bool {
        self.kind() == UnitKind::Fighter
    }

    fn is_small_craft(&self) -> bool {
        self.kind() == UnitKind::SmallCraft
    }

    fn is_infantry(&self) -> bool {
        matches!(self.kind(), UnitKind::Infantry | UnitKind::BattleArmor)
    }
}

/// Minimal description of a unit, enough for bay accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProfile {
    pub id: UnitId,
    pub kind: UnitKind,
    pub weight: f64,
    pub platoon: Option<PlatoonType>,
    pub squads: u32,
}

impl UnitProfile {
    pub fn new(kind: UnitKind, weight: f64) -> Self {
        Self {
            id: UnitId::new(),
            kind,
            weight,
            platoon: None,
            squads: 1,
        }
    }

    pub fn fighter(weight: f64) -> Self {
        Self::new(UnitKind::Fighter, weight)
    }

    pub fn small_craft(weight: f64) -> Self {
        Self::new(UnitKind::SmallCraft, weight)
    }

    pub fn mek(weight: f64) -> Self {
        Self::new(UnitKind::Mek, weight)
    }

    pub fn vehicle(weight: f64) -> Self {
        Self::new(UnitKind::Vehicle, weight)
    }

    pub fn dropship(weight: f64) -> Self {
        Self::new(UnitKind::DropShip, weight)
    }

    pub fn trailer(weight: f64) -> Self {
        Self::new(UnitKind::Trailer, weight)
    }

    pub fn cargo(weight: f64) -> Self {
        Self::new(UnitKind::Cargo, weight)
    }

    /// Infantry platoon; battle armor types produce a battle armor unit
    pub fn platoon(platoon: PlatoonType) -> Self {
        let kind = if platoon.is_battle_armor() {
            UnitKind::BattleArmor
        } else {
            UnitKind::Infantry
        };
        Self {
            id: UnitId::new(),
            kind,
            weight: platoon.weight(),
            platoon: Some(platoon),
            squads: 1,
        }
    }

    /// Mechanized platoon riding in `squads` squad cubicles
    pub fn mechanized(squads: u32) -> Self {
        let mut profile = Self::platoon(PlatoonType::Mechanized);
        profile.squads = squads;
        profile
    }

    pub fn with_id(mut self, id: UnitId) -> Self {
        self.id = id;
        self
    }
}

impl Embarkable for UnitProfile {
    fn unit_id(&self) -> UnitId {
        self.id
    }

    fn kind(&self) -> UnitKind {
        self.kind
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn platoon_type(&self) -> Option<PlatoonType> {
        self.platoon
    }

    fn squad_count(&self) -> u32 {
        self.squads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fighter_predicates() {
        let f = UnitProfile::fighter(50.0);
        assert!(f.is_fighter());
        assert!(!f.is_small_craft());
        assert!(!f.is_infantry());
    }

    #[test]
    fn test_battle_armor_counts_as_infantry() {
        let ba = UnitProfile::platoon(PlatoonType::BattleArmorClan);
        assert_eq!(ba.kind, UnitKind::BattleArmor);
        assert!(ba.is_infantry());
    }

    #[test]
    fn test_mechanized_squads() {
        let mech = UnitProfile::mechanized(4);
        assert_eq!(mech.squad_count(), 4);
        assert_eq!(mech.platoon_type(), Some(PlatoonType::Mechanized));
    }

    #[test]
    fn test_with_id_keeps_kind() {
        let id = UnitId::new();
        let unit = UnitProfile::mek(55.0).with_id(id);
        assert_eq!(unit.unit_id(), id);
        assert_eq!(unit.kind(), UnitKind::Mek);
    }
}

//! Infantry platoon types and their bay space
//!
//! Infantry bays track raw tonnage; callers think in platoons of one type.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::BayError;

/// Platoon movement type, which decides how much bay space a platoon takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatoonType {
    Foot,
    Jump,
    Motorized,
    /// Priced per squad rather than per platoon
    Mechanized,
    BattleArmorInnerSphere,
    BattleArmorClan,
    BattleArmorComStar,
}

impl PlatoonType {
    pub const ALL: [PlatoonType; 7] = [
        PlatoonType::Foot,
        PlatoonType::Jump,
        PlatoonType::Motorized,
        PlatoonType::Mechanized,
        PlatoonType::BattleArmorInnerSphere,
        PlatoonType::BattleArmorClan,
        PlatoonType::BattleArmorComStar,
    ];

    /// Tons of bay space per platoon (per squad for mechanized)
    pub fn weight(&self) -> f64 {
        match self {
            PlatoonType::Foot => 5.0,
            PlatoonType::Jump => 6.0,
            PlatoonType::Motorized => 7.0,
            PlatoonType::Mechanized => 8.0,
            PlatoonType::BattleArmorInnerSphere => 8.0,
            PlatoonType::BattleArmorClan => 10.0,
            PlatoonType::BattleArmorComStar => 12.0,
        }
    }

    pub fn is_mechanized(&self) -> bool {
        *self == PlatoonType::Mechanized
    }

    pub fn is_battle_armor(&self) -> bool {
        matches!(
            self,
            PlatoonType::BattleArmorInnerSphere
                | PlatoonType::BattleArmorClan
                | PlatoonType::BattleArmorComStar
        )
    }

    /// Bay space for a platoon of this type with the given squad count
    pub fn cost(&self, squads: u32) -> f64 {
        if self.is_mechanized() {
            self.weight() * squads as f64
        } else {
            self.weight()
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatoonType::Foot => "foot",
            PlatoonType::Jump => "jump",
            PlatoonType::Motorized => "motorized",
            PlatoonType::Mechanized => "mechanized",
            PlatoonType::BattleArmorInnerSphere => "ba_is",
            PlatoonType::BattleArmorClan => "ba_clan",
            PlatoonType::BattleArmorComStar => "ba_comstar",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlatoonType::Foot => "Foot",
            PlatoonType::Jump => "Jump",
            PlatoonType::Motorized => "Motorized",
            PlatoonType::Mechanized => "Mechanized",
            PlatoonType::BattleArmorInnerSphere => "Battle Armor (IS)",
            PlatoonType::BattleArmorClan => "Battle Armor (Clan)",
            PlatoonType::BattleArmorComStar => "Battle Armor (ComStar)",
        }
    }
}

impl FromStr for PlatoonType {
    type Err = BayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatoonType::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BayError::MalformedRecord(format!("Unknown platoon type: {}", s)))
    }
}

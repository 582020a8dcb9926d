//! Bay variants and their per-variant rules
//!
//! Every bay is one of a closed set of kinds. A kind decides what a unit
//! costs, which units fit at all, and whether the bay runs recovery cycles.

use serde::{Deserialize, Serialize};

use crate::bay::platoon::PlatoonType;
use crate::core::config::BayRules;
use crate::unit::{Embarkable, UnitKind};

/// Bays that hold one unit per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitBayClass {
    Mek,
    ProtoMek,
    LightVehicle,
    HeavyVehicle,
    SuperHeavyVehicle,
}

/// Bays that launch and recover aerospace craft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftBayClass {
    Fighter,
    SmallCraft,
}

/// Single-slot couplings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouplingKind {
    DockingCollar,
    TrailerHitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BayKind {
    UnitCount(UnitBayClass),
    LaunchRecovery(CraftBayClass),
    Infantry(PlatoonType),
    Cargo,
    Coupling(CouplingKind),
}

impl BayKind {
    /// Whether the unit is the right sort for this bay, ignoring space
    pub fn type_is_compatible<U: Embarkable + ?Sized>(&self, unit: &U, rules: &BayRules) -> bool {
        match self {
            BayKind::UnitCount(class) => match class {
                UnitBayClass::Mek => unit.kind() == UnitKind::Mek,
                UnitBayClass::ProtoMek => unit.kind() == UnitKind::ProtoMek,
                UnitBayClass::LightVehicle => {
                    unit.kind() == UnitKind::Vehicle && unit.weight() <= rules.light_vehicle_limit
                }
                UnitBayClass::HeavyVehicle => {
                    unit.kind() == UnitKind::Vehicle && unit.weight() <= rules.heavy_vehicle_limit
                }
                UnitBayClass::SuperHeavyVehicle => {
                    unit.kind() == UnitKind::Vehicle
                        && unit.weight() <= rules.super_heavy_vehicle_limit
                }
            },
            BayKind::LaunchRecovery(CraftBayClass::Fighter) => unit.is_fighter(),
            BayKind::LaunchRecovery(CraftBayClass::SmallCraft) => {
                unit.is_fighter() || unit.is_small_craft()
            }
            // The configured platoon type only sizes the bay; any platoon that fits is accepted
            BayKind::Infantry(_) => unit.is_infantry() && unit.platoon_type().is_some(),
            BayKind::Cargo => unit.kind() == UnitKind::Cargo,
            BayKind::Coupling(CouplingKind::DockingCollar) => unit.kind() == UnitKind::DropShip,
            BayKind::Coupling(CouplingKind::TrailerHitch) => unit.kind() == UnitKind::Trailer,
        }
    }

    /// Space the unit takes, in the bay's native unit
    pub fn cost<U: Embarkable + ?Sized>(&self, unit: &U) -> f64 {
        match self {
            BayKind::UnitCount(_) | BayKind::LaunchRecovery(_) | BayKind::Coupling(_) => 1.0,
            BayKind::Infantry(configured) => unit
                .platoon_type()
                .unwrap_or(*configured)
                .cost(unit.squad_count()),
            BayKind::Cargo => unit.weight(),
        }
    }

    pub fn has_recovery_pool(&self) -> bool {
        matches!(self, BayKind::LaunchRecovery(_))
    }

    pub fn is_coupling(&self) -> bool {
        matches!(self, BayKind::Coupling(_))
    }

    /// Tons of raw capacity per advertised unit of capacity
    pub fn capacity_scale(&self) -> f64 {
        match self {
            BayKind::Infantry(platoon) => platoon.weight(),
            _ => 1.0,
        }
    }

    /// Construction record tag
    pub fn tag(&self) -> &'static str {
        match self {
            BayKind::UnitCount(UnitBayClass::Mek) => "mekbay",
            BayKind::UnitCount(UnitBayClass::ProtoMek) => "protomekbay",
            BayKind::UnitCount(UnitBayClass::LightVehicle) => "lightvehiclebay",
            BayKind::UnitCount(UnitBayClass::HeavyVehicle) => "heavyvehiclebay",
            BayKind::UnitCount(UnitBayClass::SuperHeavyVehicle) => "superheavyvehiclebay",
            BayKind::LaunchRecovery(CraftBayClass::Fighter) => "asfbay",
            BayKind::LaunchRecovery(CraftBayClass::SmallCraft) => "smallcraftbay",
            BayKind::Infantry(_) => "infantrybay",
            BayKind::Cargo => "cargobay",
            BayKind::Coupling(CouplingKind::DockingCollar) => "dockingcollar",
            BayKind::Coupling(CouplingKind::TrailerHitch) => "trailerhitch",
        }
    }

    /// Kind for a record tag. Infantry tags need the platoon type supplied separately.
    pub fn from_tag(tag: &str, platoon: Option<PlatoonType>) -> Option<Self> {
        let kind = match tag {
            "mekbay" => BayKind::UnitCount(UnitBayClass::Mek),
            "protomekbay" => BayKind::UnitCount(UnitBayClass::ProtoMek),
            "lightvehiclebay" => BayKind::UnitCount(UnitBayClass::LightVehicle),
            "heavyvehiclebay" => BayKind::UnitCount(UnitBayClass::HeavyVehicle),
            "superheavyvehiclebay" => BayKind::UnitCount(UnitBayClass::SuperHeavyVehicle),
            "asfbay" => BayKind::LaunchRecovery(CraftBayClass::Fighter),
            "smallcraftbay" => BayKind::LaunchRecovery(CraftBayClass::SmallCraft),
            "infantrybay" => BayKind::Infantry(platoon?),
            "cargobay" => BayKind::Cargo,
            "dockingcollar" => BayKind::Coupling(CouplingKind::DockingCollar),
            "trailerhitch" => BayKind::Coupling(CouplingKind::TrailerHitch),
            _ => return None,
        };
        Some(kind)
    }

    pub fn display_name(&self) -> String {
        match self {
            BayKind::UnitCount(UnitBayClass::Mek) => "Mek Bay".into(),
            BayKind::UnitCount(UnitBayClass::ProtoMek) => "ProtoMek Bay".into(),
            BayKind::UnitCount(UnitBayClass::LightVehicle) => "Light Vehicle Bay".into(),
            BayKind::UnitCount(UnitBayClass::HeavyVehicle) => "Heavy Vehicle Bay".into(),
            BayKind::UnitCount(UnitBayClass::SuperHeavyVehicle) => {
                "Super Heavy Vehicle Bay".into()
            }
            BayKind::LaunchRecovery(CraftBayClass::Fighter) => "Fighter Bay".into(),
            BayKind::LaunchRecovery(CraftBayClass::SmallCraft) => "Small Craft Bay".into(),
            BayKind::Infantry(platoon) => format!("Infantry Bay ({})", platoon.display_name()),
            BayKind::Cargo => "Cargo Bay".into(),
            BayKind::Coupling(CouplingKind::DockingCollar) => "Docking Collar".into(),
            BayKind::Coupling(CouplingKind::TrailerHitch) => "Trailer Hitch".into(),
        }
    }

    /// Noun for the capacity figure in summaries
    pub fn capacity_label(&self) -> &'static str {
        match self {
            BayKind::Infantry(_) => "platoons",
            BayKind::Cargo => "tons",
            _ => "units",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitProfile;

    fn rules() -> BayRules {
        BayRules::default()
    }

    #[test]
    fn test_fighter_bay_rejects_small_craft() {
        let kind = BayKind::LaunchRecovery(CraftBayClass::Fighter);
        assert!(kind.type_is_compatible(&UnitProfile::fighter(50.0), &rules()));
        assert!(!kind.type_is_compatible(&UnitProfile::small_craft(200.0), &rules()));
    }

    #[test]
    fn test_small_craft_bay_takes_fighters_too() {
        let kind = BayKind::LaunchRecovery(CraftBayClass::SmallCraft);
        assert!(kind.type_is_compatible(&UnitProfile::fighter(50.0), &rules()));
        assert!(kind.type_is_compatible(&UnitProfile::small_craft(200.0), &rules()));
        assert!(!kind.type_is_compatible(&UnitProfile::mek(50.0), &rules()));
    }

    #[test]
    fn test_vehicle_bays_scale_by_weight() {
        let light = BayKind::UnitCount(UnitBayClass::LightVehicle);
        let heavy = BayKind::UnitCount(UnitBayClass::HeavyVehicle);
        let tank = UnitProfile::vehicle(80.0);
        assert!(!light.type_is_compatible(&tank, &rules()));
        assert!(heavy.type_is_compatible(&tank, &rules()));
        // Heavy bays still take light vehicles
        assert!(heavy.type_is_compatible(&UnitProfile::vehicle(20.0), &rules()));
    }

    #[test]
    fn test_infantry_bay_accepts_other_platoon_types() {
        let kind = BayKind::Infantry(PlatoonType::Motorized);
        let jump = UnitProfile::platoon(PlatoonType::Jump);
        assert!(kind.type_is_compatible(&jump, &rules()));
        assert_eq!(kind.cost(&jump), 6.0);
        assert!(!kind.type_is_compatible(&UnitProfile::mek(20.0), &rules()));
    }

    #[test]
    fn test_mechanized_cost_uses_squads() {
        let kind = BayKind::Infantry(PlatoonType::Mechanized);
        assert_eq!(kind.cost(&UnitProfile::mechanized(3)), 24.0);
    }

    #[test]
    fn test_cargo_cost_is_weight() {
        assert_eq!(BayKind::Cargo.cost(&UnitProfile::cargo(2.5)), 2.5);
    }

    #[test]
    fn test_couplings_match_their_unit() {
        let collar = BayKind::Coupling(CouplingKind::DockingCollar);
        let hitch = BayKind::Coupling(CouplingKind::TrailerHitch);
        assert!(collar.type_is_compatible(&UnitProfile::dropship(3500.0), &rules()));
        assert!(!collar.type_is_compatible(&UnitProfile::trailer(10.0), &rules()));
        assert!(hitch.type_is_compatible(&UnitProfile::trailer(10.0), &rules()));
    }

    #[test]
    fn test_only_launch_recovery_has_pool() {
        assert!(BayKind::LaunchRecovery(CraftBayClass::Fighter).has_recovery_pool());
        assert!(!BayKind::UnitCount(UnitBayClass::Mek).has_recovery_pool());
        assert!(!BayKind::Cargo.has_recovery_pool());
    }

    #[test]
    fn test_tag_lookup() {
        let kind = BayKind::UnitCount(UnitBayClass::SuperHeavyVehicle);
        assert_eq!(BayKind::from_tag(kind.tag(), None), Some(kind));
        assert_eq!(BayKind::from_tag("infantrybay", None), None);
        assert_eq!(BayKind::from_tag("hangar", None), None);
    }
}

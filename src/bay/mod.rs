//! Transport bays - capacity, doors and recovery slots
//!
//! Leaves first: the ledger, door array and recovery pool are standalone
//! primitives. `Bay` composes them behind the `Transporter` contract, with
//! one closed `BayKind` deciding costs and compatibility.

pub mod doors;
pub mod kind;
pub mod ledger;
pub mod platoon;
pub mod record;
pub mod recovery;
pub mod transport_bay;
pub mod transporter;

pub use doors::DoorArray;
pub use kind::{BayKind, CouplingKind, CraftBayClass, UnitBayClass};
pub use ledger::CapacityLedger;
pub use platoon::PlatoonType;
pub use recovery::RecoverySlotPool;
pub use transport_bay::{Bay, LoadedUnit};
pub use transporter::Transporter;

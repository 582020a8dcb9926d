//! Property tests for bay invariants
//!
//! Random operation sequences against a fighter bay must keep capacity in
//! range, keep slot counts tied to doors, and never bring a door back.

use carrier_bays::bay::{Bay, RecoverySlotPool, Transporter};
use carrier_bays::core::config::BayRules;
use carrier_bays::core::types::{BayId, UnitId};
use carrier_bays::unit::UnitProfile;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Load,
    Recover,
    Unload(usize),
    Launch(usize),
    DestroyDoor,
    DestroyDoorNext,
    EndRound,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Load),
        3 => Just(Op::Recover),
        2 => (0usize..16).prop_map(Op::Unload),
        2 => (0usize..16).prop_map(Op::Launch),
        1 => Just(Op::DestroyDoor),
        1 => Just(Op::DestroyDoorNext),
        2 => Just(Op::EndRound),
    ]
}

fn pick(bay: &Bay, index: usize) -> Option<UnitId> {
    let units = bay.loaded_units();
    if units.is_empty() {
        None
    } else {
        Some(units[index % units.len()])
    }
}

proptest! {
    #[test]
    fn capacity_stays_in_range(
        capacity in 0u32..12,
        doors in 0u32..4,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut bay = Bay::fighter(capacity as f64, doors, BayId(1)).unwrap();
        let mut last_doors = bay.doors_available();

        for op in ops {
            match op {
                Op::Load => { let _ = bay.load(&UnitProfile::fighter(45.0)); }
                Op::Recover => { let _ = bay.recover(&UnitProfile::fighter(45.0)); }
                Op::Unload(i) => {
                    if let Some(id) = pick(&bay, i) {
                        bay.unload(id).unwrap();
                    }
                }
                Op::Launch(i) => {
                    if let Some(id) = pick(&bay, i) {
                        let _ = bay.launch(id);
                    }
                }
                Op::DestroyDoor => bay.destroy_door(),
                Op::DestroyDoorNext => bay.destroy_door_next(),
                Op::EndRound => bay.end_round(),
            }

            prop_assert!(bay.remaining_capacity() >= 0.0);
            prop_assert!(bay.remaining_capacity() <= bay.total_capacity());
            prop_assert_eq!(
                bay.remaining_capacity() + bay.loaded_count() as f64,
                bay.total_capacity()
            );

            // Doors never come back mid-battle
            prop_assert!(bay.doors_available() <= last_doors);
            last_doors = bay.doors_available();

            let pool = bay.recovery_pool().unwrap();
            prop_assert_eq!(pool.len(), 2 * bay.doors_available() as usize);
            prop_assert!(pool.slots().iter().all(|s| *s <= 5));
        }
    }

    #[test]
    fn remove_slots_never_underflows(doors in 0u32..6, remove in 0u32..20) {
        let mut pool = RecoverySlotPool::new(doors, &BayRules::default());
        let before = pool.len();
        pool.remove_slots(remove);
        prop_assert_eq!(pool.len(), before.saturating_sub(remove as usize));
    }

    #[test]
    fn consumed_slot_reopens_after_cooldown(cooldown in 1u8..10, doors in 1u32..4) {
        let rules = BayRules { recovery_cooldown_rounds: cooldown, ..BayRules::default() };
        let mut pool = RecoverySlotPool::new(doors, &rules);
        let open = pool.available_count();
        pool.try_consume_slot().unwrap();

        for _ in 1..cooldown {
            pool.advance_round();
            prop_assert_eq!(pool.available_count(), open - 1);
        }
        pool.advance_round();
        prop_assert_eq!(pool.available_count(), open);
    }

    #[test]
    fn records_round_trip(capacity in 0u32..500, tenths in 0u32..10, doors in 0u32..8, id in 0u32..1000) {
        let capacity = capacity as f64 + tenths as f64 / 10.0;
        let bay = Bay::cargo(capacity, doors, BayId(id)).unwrap();
        let record = bay.to_record();
        let parsed = Bay::from_record(&record).unwrap();
        prop_assert_eq!(parsed.to_record(), record);
        prop_assert_eq!(parsed.total_capacity(), bay.total_capacity());
        prop_assert_eq!(parsed.doors_available(), doors);
        prop_assert_eq!(parsed.id(), BayId(id));
    }

    #[test]
    fn cargo_weights_keep_capacity_in_range(
        weights in prop::collection::vec(-50.0f64..50.0, 0..30),
    ) {
        let mut bay = Bay::cargo(100.0, 1, BayId(1)).unwrap();
        for weight in weights {
            let _ = bay.load(&UnitProfile::cargo(weight));
            prop_assert!(bay.remaining_capacity() >= 0.0);
            prop_assert!(bay.remaining_capacity() <= bay.total_capacity());
        }
    }
}

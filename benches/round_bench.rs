use carrier_bays::bay::{Bay, Transporter};
use carrier_bays::carrier::Carrier;
use carrier_bays::core::types::BayId;
use carrier_bays::unit::UnitProfile;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A carrier with many fighter bays, half their slots cooling
fn busy_carrier(bays: u32) -> Carrier {
    let mut carrier = Carrier::new("Bench");
    for id in 0..bays {
        let mut bay = Bay::fighter(20.0, 4, BayId(id)).unwrap();
        for _ in 0..4 {
            bay.recover(&UnitProfile::fighter(45.0)).unwrap();
        }
        carrier.add_bay(bay).unwrap();
    }
    carrier
}

fn bench_end_round(c: &mut Criterion) {
    c.bench_function("end_round_200_bays", |b| {
        b.iter_batched(
            || busy_carrier(200),
            |mut carrier| {
                for _ in 0..6 {
                    carrier.end_round();
                }
                black_box(carrier.open_recovery_slots())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_recover_search(c: &mut Criterion) {
    let carrier = busy_carrier(200);
    let fighter = UnitProfile::fighter(45.0);
    c.bench_function("find_recovery_bay_200_bays", |b| {
        b.iter(|| black_box(carrier.find_recovery_bay_for(&fighter)))
    });
}

criterion_group!(benches, bench_end_round, bench_recover_search);
criterion_main!(benches);

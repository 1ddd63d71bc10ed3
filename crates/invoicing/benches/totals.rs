use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use jewelbill_core::ItemId;
use jewelbill_invoicing::{compute_totals, BillRates, ItemDetails, LineItem};
use rust_decimal::Decimal;

fn build_items(count: usize) -> Vec<LineItem> {
    (0..count)
        .map(|i| {
            let net = Decimal::new(1_000 + i as i64, 3);
            let details = ItemDetails::new(format!("Piece {i}"), net, Decimal::new(612_350, 2));
            LineItem::new(ItemId::new(), details).expect("valid bench item")
        })
        .collect()
}

/// Recalculation cost per edit, by bill length.
fn bench_compute_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_totals");
    let rates = BillRates::default();

    for count in [1usize, 10, 100] {
        let items = build_items(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| compute_totals(black_box(items), black_box(&rates)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_totals);
criterion_main!(benches);

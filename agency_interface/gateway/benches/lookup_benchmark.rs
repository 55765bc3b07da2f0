use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gateway::AgencyCatalog;
use serde_json::json;

fn catalog(size: usize) -> AgencyCatalog {
    let agencies: Vec<_> = (0..size)
        .map(|i| {
            json!({
                "acronym": format!("AG{i}"),
                "tier": (i % 8) + 1,
                "domain": if i % 3 == 0 { "healthcare" } else { "defense" },
            })
        })
        .collect();
    AgencyCatalog::from_document(json!({ "agencies": agencies })).expect("catalog")
}

pub fn lookup_bench(c: &mut Criterion) {
    let catalog = catalog(500);

    c.bench_function("find_last_acronym", |b| {
        b.iter(|| catalog.find(black_box("AG499")))
    });
    c.bench_function("acronyms_by_tier", |b| {
        b.iter(|| catalog.acronyms_by_tier(black_box(4)))
    });
    c.bench_function("acronyms_by_domain", |b| {
        b.iter(|| catalog.acronyms_by_domain(black_box("healthcare")))
    });
}

criterion_group!(benches, lookup_bench);
criterion_main!(benches);

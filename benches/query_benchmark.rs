use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use steamgraph::catalog::GameListItem;
use steamgraph::sparql::{Cell, QueryBuilder, Row, TabularResult};

/// Benchmark query text assembly for each catalog view
fn bench_query_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_building");

    group.bench_function("search", |b| {
        b.iter(|| QueryBuilder::search(r#"half "life""#, 20, 40))
    });
    group.bench_function("detail", |b| b.iter(|| QueryBuilder::detail(620)));
    group.bench_function("top_genres", |b| b.iter(|| QueryBuilder::top_genres(20)));

    group.finish();
}

/// Benchmark parsing and mapping search results
fn bench_row_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_mapping");

    for size in [20, 200, 2_000].iter() {
        let rows: Vec<Row> = (0..*size)
            .map(|i| {
                Row::new()
                    .with("appid", Cell::literal(i.to_string()))
                    .with("label", Cell::literal(format!("Game {}", i)))
                    .with("price", Cell::literal(format!("{}.99", i % 60)))
                    .with("discount", Cell::literal((i % 100).to_string()))
            })
            .collect();
        let json = serde_json::to_string(&TabularResult::new(vec![], rows)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let result = TabularResult::from_json(&json).unwrap();
                result
                    .rows
                    .iter()
                    .filter_map(GameListItem::from_row)
                    .count()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_query_building, bench_row_mapping);
criterion_main!(benches);

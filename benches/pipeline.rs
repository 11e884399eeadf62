//! Pipeline evaluation benchmark

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use sentibal::data::{observation, MarketData};
use sentibal::pipeline::{PipelineEngine, SimEngine};
use sentibal::scheduler::sessions_between;
use sentibal::strategy::{make_pipeline, DATA_PIPE};

fn fixture(symbols: usize) -> (MarketData, NaiveDate) {
    let start: NaiveDate = "2024-01-02".parse().unwrap();
    let end: NaiveDate = "2024-12-31".parse().unwrap();
    let sessions = sessions_between(start, end);
    let last = *sessions.last().unwrap();

    let mut data = MarketData::new();
    for (i, day) in sessions.iter().enumerate() {
        for s in 0..symbols {
            let reading = Decimal::from((i + s) as i64 % 100 - 50) / Decimal::from(100);
            data.insert(*day, observation(&format!("SYM{s:03}"), Some(reading), true, None));
        }
    }
    (data, last)
}

fn bench_pipeline_compute(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (data, last) = fixture(100);
    let engine = SimEngine::new(data);
    rt.block_on(engine.attach_pipeline(DATA_PIPE, make_pipeline(3)))
        .unwrap();

    c.bench_function("pipeline_compute_100_symbols", |b| {
        b.to_async(&rt).iter(|| async {
            engine.compute(last).await.unwrap();
        });
    });
}

criterion_group!(benches, bench_pipeline_compute);
criterion_main!(benches);

//! Performance benchmarks for the roster engine.
//!
//! Covers the two request-scoped computations that grow with roster size:
//! - Grid build over a week of shifts
//! - Labour cost rollup over the same shifts
//! - The GET /roster endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use uuid::Uuid;

use roster_engine::api::{AppState, create_router};
use roster_engine::config::ConfigLoader;
use roster_engine::models::{Employee, PayRate, ShiftDraft, ShiftRecord};
use roster_engine::roster::{DateRange, RateBook, RosterFilter, RosterGrid, rollup};
use roster_engine::store::{InMemoryShiftStore, ShiftStore};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const VENUE: &str = "VEN-0001-01";

fn week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn employees(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| Employee {
            id: format!("emp_{:04}", i),
            first_name: format!("First{}", i),
            last_name: "Bench".to_string(),
            preferred_name: None,
            role: None,
            venue_id: VENUE.to_string(),
            work_area_id: None,
            pay_rate: PayRate {
                hourly_rate: Some(Decimal::new(3000, 2)),
                ..PayRate::default()
            },
        })
        .collect()
}

/// One shift per employee per day, plus one open shift per day.
fn week_of_shifts(employees: &[Employee]) -> Vec<ShiftRecord> {
    let now = Utc::now();
    let mut shifts = Vec::new();
    for day in 0..7 {
        let date = week_start() + Duration::days(day);
        let ids = employees
            .iter()
            .map(|e| Some(e.id.clone()))
            .chain(std::iter::once(None));
        for employee_id in ids {
            let draft = ShiftDraft {
                employee_id,
                venue_id: VENUE.to_string(),
                work_area_id: None,
                date,
                start_time: NaiveTime::from_hms_opt(9, 0, 0),
                end_time: NaiveTime::from_hms_opt(17, 0, 0),
                is_rest_day: false,
                break_minutes: 30,
                role: None,
                notes: None,
                repeat: false,
            };
            shifts.push(ShiftRecord::create(Uuid::new_v4(), draft, now).unwrap());
        }
    }
    shifts
}

/// Benchmark: grid build at increasing roster sizes.
fn bench_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_build");

    for employee_count in [10, 50, 200].iter() {
        let staff = employees(*employee_count);
        let shifts = week_of_shifts(&staff);
        let filter = RosterFilter::new(VENUE, DateRange::week_from(week_start()).unwrap());

        group.throughput(Throughput::Elements(shifts.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, _| {
                b.iter(|| {
                    let grid =
                        RosterGrid::build(filter.clone(), staff.clone(), shifts.clone()).unwrap();
                    black_box(grid.view())
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: weekly cost rollup at increasing roster sizes.
fn bench_cost_rollup(c: &mut Criterion) {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let venue = config.venues()[0].clone();
    let mut group = c.benchmark_group("cost_rollup");

    for employee_count in [10, 50, 200].iter() {
        let staff = employees(*employee_count);
        let shifts = week_of_shifts(&staff);
        let rates = RateBook::build(&venue, &staff, &config.settings().standard_hours);
        let range = DateRange::week_from(week_start()).unwrap();

        group.throughput(Throughput::Elements(shifts.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, _| b.iter(|| black_box(rollup(&shifts, &rates, venue.weekly_forecast, range))),
        );
    }

    group.finish();
}

/// Benchmark: GET /roster for the configured venue with a populated week.
fn bench_roster_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let store = Arc::new(InMemoryShiftStore::new());
    let staff: Vec<Employee> = config
        .employees()
        .iter()
        .filter(|e| e.venue_id == VENUE)
        .cloned()
        .collect();
    for shift in week_of_shifts(&staff) {
        store.insert(shift).unwrap();
    }
    let router = create_router(AppState::with_store(config, store));
    let uri = format!("/roster?venue_id={}&start_date={}", VENUE, week_start());

    c.bench_function("roster_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(Request::builder().uri(uri.as_str()).body(Body::empty()).unwrap())
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_grid_build,
    bench_cost_rollup,
    bench_roster_endpoint,
);
criterion_main!(benches);

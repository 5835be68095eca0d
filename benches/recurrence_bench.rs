// Benchmark for chore scheduling
// Measures occurrence predicates, rotation resolution and month-view map building

use chrono::{NaiveDate, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use famboard::models::chore::Chore;
use famboard::models::household::HouseholdState;
use famboard::models::member::{FamilyMember, MemberId};
use famboard::models::recurrence::Recurrence;
use famboard::models::ui::CalendarView;
use famboard::services::occurrence::{build_occurrence_map, compute_range};
use famboard::services::recurrence::occurrences_in_range;
use famboard::services::rotation::{resolve_rotation_assignments, RotationRequest};
use famboard::utils::date::add_days;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn bench_occurrences_in_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("occurrences_in_range");
    let anchor = ymd(2020, 1, 31);
    let start = ymd(2025, 1, 1);

    for kind in [
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Weekdays,
        Recurrence::Monthly,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(kind.as_str()), &kind, |b, kind| {
            b.iter(|| {
                occurrences_in_range(
                    black_box(anchor),
                    black_box(kind),
                    black_box(start),
                    black_box(add_days(start, 365)),
                )
            });
        });
    }

    group.finish();
}

fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation");
    let order: Vec<MemberId> = (0..4).map(|i| MemberId::new(format!("member-{}", i))).collect();
    let current = order[1].clone();
    let today = ymd(2025, 6, 15);

    // Far-off anchors make every step count walk further
    for years_back in [0i64, 1, 5].iter() {
        let anchor = add_days(today, -365 * years_back);
        let dates = occurrences_in_range(anchor, &Recurrence::Weekdays, add_days(today, -21), add_days(today, 20));
        group.bench_with_input(BenchmarkId::from_parameter(years_back), &dates, |b, dates| {
            let request = RotationRequest {
                dates,
                rotation_order: &order,
                current_assignee: Some(&current),
                anchor,
                recurrence: &Recurrence::Weekdays,
            };
            b.iter(|| resolve_rotation_assignments(black_box(&request), black_box(today)));
        });
    }

    group.finish();
}

fn bench_month_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("month_view");
    let anchor = ymd(2025, 1, 6);
    let members: Vec<FamilyMember> = (0..4)
        .map(|i| FamilyMember::new(format!("member-{}", i).as_str(), format!("Member {}", i)))
        .collect();
    let kinds = [
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Weekdays,
        Recurrence::Weekends,
        Recurrence::Monthly,
    ];

    for count in [10usize, 50].iter() {
        let chores: Vec<Chore> = (0..*count)
            .map(|i| {
                Chore::builder()
                    .id(format!("chore-{}", i).as_str())
                    .title(format!("Chore {}", i))
                    .assign("member-0")
                    .recurrence(kinds[i % kinds.len()].clone())
                    .rotate(i % 2 == 0)
                    .anchored_on(anchor)
                    .build(anchor)
                    .unwrap()
            })
            .collect();
        let state = HouseholdState::new(members.clone(), chores);
        let focus = ymd(2025, 6, 15);
        let range = compute_range(CalendarView::Month, focus, Weekday::Sun);

        group.bench_with_input(BenchmarkId::from_parameter(count), &state, |b, state| {
            b.iter(|| build_occurrence_map(black_box(state), black_box(&range), black_box(focus)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_occurrences_in_range, bench_rotation, bench_month_view);
criterion_main!(benches);

//! Tests for the timer list reducer
//!
//! Verifies id stability, lifecycle notifications and phase queries.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use outpost_types::PhaseFilter;

use super::{Lifecycle, PhaseCounts, TimerAction, TimerError, TimerForm, TimerId, TimerList};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 8, 30, 0).unwrap()
}

/// Add a timer with `hours` of its cycle remaining
fn add(list: &TimerList, project: &str, hours: u32) -> (TimerList, TimerId) {
    let record = TimerForm::new(project, "星辰联盟")
        .with_remaining(0, hours, 0)
        .submit(now())
        .unwrap();
    match list.apply(TimerAction::Add(record)).unwrap() {
        (next, Lifecycle::Added { id, .. }) => (next, id),
        (_, other) => panic!("unexpected lifecycle {other:?}"),
    }
}

#[test]
fn test_add_assigns_increasing_ids() {
    let list = TimerList::new();
    let (list, a) = add(&list, "阿尔法站", 10);
    let (list, b) = add(&list, "贝塔站", 20);

    assert_eq!(a, TimerId(1));
    assert_eq!(b, TimerId(2));
    assert_eq!(list.len(), 2);
    assert_eq!(list.entries()[0].record.project, "阿尔法站");
}

#[test]
fn test_apply_does_not_touch_previous_state() {
    let empty = TimerList::new();
    let (one, _) = add(&empty, "阿尔法站", 10);

    assert!(empty.is_empty());
    assert_eq!(one.len(), 1);
}

#[test]
fn test_remove_keeps_other_ids_stable() {
    let list = TimerList::new();
    let (list, a) = add(&list, "阿尔法站", 10);
    let (list, b) = add(&list, "贝塔站", 20);
    let (list, c) = add(&list, "伽马站", 30);

    let (list, lifecycle) = list.apply(TimerAction::Remove(a)).unwrap();
    assert_eq!(lifecycle, Lifecycle::Removed(a));

    assert!(list.get(a).is_none());
    assert_eq!(list.get(b).unwrap().record.project, "贝塔站");
    assert_eq!(list.get(c).unwrap().record.project, "伽马站");

    // Removing by the id that used to sit at position 1 still targets 贝塔站
    let (list, _) = list.apply(TimerAction::Remove(b)).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.entries()[0].id, c);
}

#[test]
fn test_remove_unknown_id_fails() {
    let list = TimerList::new();
    let (list, _) = add(&list, "阿尔法站", 10);

    assert_eq!(
        list.apply(TimerAction::Remove(TimerId(42))),
        Err(TimerError::NotFound(TimerId(42)))
    );
}

#[test]
fn test_ids_are_not_reused_after_clear() {
    let list = TimerList::new();
    let (list, a) = add(&list, "阿尔法站", 10);

    let (list, lifecycle) = list.apply(TimerAction::Clear).unwrap();
    assert_eq!(lifecycle, Lifecycle::Cleared);
    assert!(list.is_empty());

    let (_, b) = add(&list, "贝塔站", 10);
    assert!(b > a);
}

#[test]
fn test_future_start_is_rejected() {
    let mut record = TimerForm::new("阿尔法站", "星辰联盟").submit(now()).unwrap();
    record.start_time = now() + TimeDelta::seconds(1);

    let result = TimerList::new().apply(TimerAction::Add(record));
    assert!(matches!(result, Err(TimerError::StartInFuture { .. })));
}

#[test]
fn test_counts_and_filters_by_phase() {
    let list = TimerList::new();
    // 90h left: 6h into the cycle, contestable
    let (list, contestable) = add(&list, "阿尔法站", 90);
    // 48h left: protected
    let (list, protected) = add(&list, "贝塔站", 48);
    // 10h left: protected
    let (list, _) = add(&list, "伽马站", 10);

    assert_eq!(
        list.counts(now()),
        PhaseCounts {
            total: 3,
            contestable: 1,
            protected: 2,
        }
    );

    let only_contestable = list.filtered(PhaseFilter::Contestable, now());
    assert_eq!(only_contestable.len(), 1);
    assert_eq!(only_contestable[0].0.id, contestable);

    let only_protected = list.filtered(PhaseFilter::Protected, now());
    assert_eq!(only_protected.len(), 2);
    assert_eq!(only_protected[0].0.id, protected);

    assert_eq!(list.filtered(PhaseFilter::All, now()).len(), 3);
}

#[test]
fn test_counts_move_with_time() {
    let list = TimerList::new();
    // One hour left in the cycle
    let (list, _) = add(&list, "阿尔法站", 1);
    assert_eq!(list.counts(now()).protected, 1);

    // Two hours later the next cycle has begun
    let later = now() + TimeDelta::hours(2);
    assert_eq!(list.counts(later).contestable, 1);
}

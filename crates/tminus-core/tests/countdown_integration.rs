//! Integration tests for the countdown engine.
//!
//! These exercise resolution, the remaining-time breakdown and progress
//! together, the way a view evaluates them on every tick.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tminus_core::countdown::far_future;
use tminus_core::timezone::TIMEZONES;
use tminus_core::{compute, progress, resolve, Event, EventDraft, Snapshot};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn test_fixed_offsets_resolve_to_utc() {
    assert_eq!(
        resolve("2030-01-01", "00:00", "Asia/Tokyo"),
        utc(2029, 12, 31, 15, 0, 0)
    );
    assert_eq!(
        resolve("2030-01-01", "00:00", "America/New_York"),
        utc(2030, 1, 1, 5, 0, 0)
    );
    assert_eq!(
        resolve("2030-01-01", "00:00", "Asia/Karachi"),
        utc(2029, 12, 31, 19, 0, 0)
    );
}

#[test]
fn test_unlisted_zone_reads_as_local() {
    // Not a selectable zone, so no fixed offset applies.
    assert_eq!(
        resolve("2030-01-01", "00:00", "Asia/Kolkata"),
        resolve("2030-01-01", "00:00", "local")
    );
}

#[test]
fn test_every_listed_zone_resolves() {
    for zone in TIMEZONES {
        let target = resolve("2031-07-15", "12:00", zone.id);
        assert_ne!(target, far_future(), "{} did not resolve", zone.id);
    }
}

#[test]
fn test_malformed_input_never_finishes() {
    let now = utc(2030, 1, 1, 0, 0, 0);
    for (date, time) in [("", "10:00"), ("2030-01-01", ""), ("soon", "later")] {
        let countdown = compute(resolve(date, time, "Etc/GMT"), now);
        assert!(!countdown.finished, "{date:?} {time:?} finished");
    }
}

#[test]
fn test_snapshot_over_lifetime() {
    let created = utc(2030, 1, 1, 0, 0, 0);
    let event = Event::new(
        EventDraft {
            title: "Launch".into(),
            date: "2030-01-11".into(),
            time: "00:00".into(),
            timezone: "Etc/GMT".into(),
            ..Default::default()
        },
        created,
    );

    let start = Snapshot::of(&event, created);
    assert_eq!(start.time_left.days, 10);
    assert_eq!(start.progress, 0.0);

    let middle = Snapshot::of(&event, created + Duration::days(5));
    assert_eq!(middle.time_left.days, 5);
    assert!((middle.progress - 50.0).abs() < 1e-9);

    let after = Snapshot::of(&event, created + Duration::days(11));
    assert!(after.finished);
    assert_eq!(after.progress, 100.0);
    assert_eq!(after.time_left.days, 0);
}

#[test]
fn test_legacy_numeric_id_drives_progress() {
    let json = r#"{"id":"1893456000000","title":"Old","date":"2030-01-11","time":"00:00","timezone":"Etc/GMT"}"#;
    let event: Event = serde_json::from_str(json).unwrap();
    let snap = Snapshot::of(&event, utc(2030, 1, 6, 0, 0, 0));
    assert!((snap.progress - 50.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn resolve_is_deterministic(
        y in 2000i32..2100, mo in 1u32..=12, d in 1u32..=28,
        h in 0u32..24, mi in 0u32..60, zone in 0usize..TIMEZONES.len(),
    ) {
        let date = format!("{y:04}-{mo:02}-{d:02}");
        let time = format!("{h:02}:{mi:02}");
        let id = TIMEZONES[zone].id;
        prop_assert_eq!(resolve(&date, &time, id), resolve(&date, &time, id));
    }

    #[test]
    fn larger_offsets_resolve_earlier(
        y in 2000i32..2100, mo in 1u32..=12, d in 1u32..=28,
        h in 0u32..24, mi in 0u32..60,
    ) {
        let date = format!("{y:04}-{mo:02}-{d:02}");
        let time = format!("{h:02}:{mi:02}");
        let fixed: Vec<_> = TIMEZONES.iter().filter(|z| z.offset_hours.is_some()).collect();
        for a in &fixed {
            for b in &fixed {
                let (oa, ob) = (a.offset_hours.unwrap(), b.offset_hours.unwrap());
                if oa > ob {
                    prop_assert!(resolve(&date, &time, a.id) < resolve(&date, &time, b.id));
                }
            }
        }
    }

    #[test]
    fn progress_never_decreases(
        total_secs in 1i64..10_000_000,
        a in 0i64..20_000_000,
        b in 0i64..20_000_000,
    ) {
        let created = utc(2030, 1, 1, 0, 0, 0);
        let target = created + Duration::seconds(total_secs);
        let (early, late) = (a.min(b), a.max(b));
        let at = |offset: i64| {
            let now = created + Duration::seconds(offset);
            progress(Some(created), target, now, compute(target, now).finished)
        };
        let (p1, p2) = (at(early), at(late));
        prop_assert!(p1 <= p2);
        prop_assert!((0.0..=100.0).contains(&p1));
        prop_assert!((0.0..=100.0).contains(&p2));
    }

    #[test]
    fn remaining_parts_reassemble(ms in 1i64..5_000_000_000) {
        let now = utc(2030, 1, 1, 0, 0, 0);
        let left = compute(now + Duration::milliseconds(ms), now).time_left;
        let secs = left.days as i64 * 86_400
            + i64::from(left.hours) * 3_600
            + i64::from(left.minutes) * 60
            + i64::from(left.seconds);
        prop_assert_eq!(secs, ms / 1000);
        prop_assert!(left.hours < 24 && left.minutes < 60 && left.seconds < 60);
    }
}

//! Picking the calendar entries that are rides to sync.

use chrono::NaiveDate;
use karoosync_client::utils::event_date;
use karoosync_client::{EventRecord, WorkoutSummary};

use crate::error::{SyncError, SyncResult};

/// Event type of the workouts that get synced.
pub const RIDE: &str = "Ride";

/// Inclusive range of dates to sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncWindow {
    pub oldest: NaiveDate,
    pub newest: NaiveDate,
}

impl SyncWindow {
    pub fn new(oldest: NaiveDate, newest: NaiveDate) -> SyncResult<Self> {
        if newest < oldest {
            return Err(SyncError::ConfigInvalid(format!(
                "newest date {newest} is before oldest date {oldest}"
            )));
        }
        Ok(Self { oldest, newest })
    }

    /// A window covering one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            oldest: date,
            newest: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.oldest <= date && date <= self.newest
    }

    pub fn is_single_day(&self) -> bool {
        self.oldest == self.newest
    }
}

/// Keep the rides scheduled inside `window`, in listing order.
///
/// Every match is returned; an empty result means there is nothing to sync.
pub fn locate(records: &[EventRecord], window: SyncWindow) -> Vec<WorkoutSummary> {
    records
        .iter()
        .filter(|r| r.kind.as_deref() == Some(RIDE))
        .filter_map(|r| {
            let Some(id) = r.id.clone() else {
                tracing::warn!(name = ?r.name, "skipping ride without an id");
                return None;
            };
            let raw_date = r.start_date_local.as_deref().unwrap_or_default();
            let Some(date) = event_date(raw_date) else {
                tracing::warn!(id = %id, start_date_local = raw_date, "skipping ride with unreadable date");
                return None;
            };
            window.contains(date).then(|| WorkoutSummary {
                id,
                date,
                name: r.name.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn record(id: &str, kind: Option<&str>, start: &str) -> EventRecord {
        EventRecord {
            id: Some(id.into()),
            kind: kind.map(str::to_string),
            name: Some(format!("workout {id}")),
            start_date_local: Some(start.into()),
        }
    }

    #[test]
    fn window_rejects_inverted_range() {
        assert!(matches!(
            SyncWindow::new(day(5), day(4)),
            Err(SyncError::ConfigInvalid(_))
        ));
        assert!(SyncWindow::new(day(4), day(4)).unwrap().is_single_day());
    }

    #[test]
    fn keeps_every_ride_in_window() {
        let records = vec![
            record("1", Some("Ride"), "2024-03-01T00:00:00"),
            record("2", Some("Run"), "2024-03-01T00:00:00"),
            record("3", Some("Ride"), "2024-03-02T06:30:00"),
            record("4", Some("Ride"), "2024-03-04T00:00:00"),
            record("5", None, "2024-03-02T00:00:00"),
        ];
        let found = locate(&records, SyncWindow::new(day(1), day(3)).unwrap());
        let ids: Vec<&str> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(found[1].date, day(2));
        assert_eq!(found[1].name.as_deref(), Some("workout 3"));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let records = vec![
            record("a", Some("Ride"), "2024-03-01"),
            record("b", Some("Ride"), "2024-03-03T23:59:59"),
        ];
        assert_eq!(locate(&records, SyncWindow::new(day(1), day(3)).unwrap()).len(), 2);
    }

    #[test]
    fn single_day_returns_all_matches_that_day() {
        let records = vec![
            record("am", Some("Ride"), "2024-03-01T07:00:00"),
            record("pm", Some("Ride"), "2024-03-01T18:00:00"),
            record("next", Some("Ride"), "2024-03-02T07:00:00"),
        ];
        let found = locate(&records, SyncWindow::single(day(1)));
        let ids: Vec<&str> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["am", "pm"]);
    }

    #[test]
    fn reads_dates_with_fractional_seconds_or_no_seconds() {
        let records = vec![
            record("frac", Some("Ride"), "2024-03-01T07:00:00.000"),
            record("short", Some("Ride"), "2024-03-01T18:00"),
        ];
        let found = locate(&records, SyncWindow::single(day(1)));
        let ids: Vec<&str> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["frac", "short"]);
        assert!(found.iter().all(|s| s.date == day(1)));
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let records = vec![record("1", Some("Run"), "2024-03-01")];
        assert!(locate(&records, SyncWindow::single(day(1))).is_empty());
        assert!(locate(&[], SyncWindow::single(day(1))).is_empty());
    }

    #[test]
    fn skips_records_without_id_or_date() {
        let mut no_id = record("x", Some("Ride"), "2024-03-01");
        no_id.id = None;
        let mut no_date = record("y", Some("Ride"), "");
        no_date.start_date_local = None;
        let bad_date = record("z", Some("Ride"), "soon");
        assert!(locate(&[no_id, no_date, bad_date], SyncWindow::single(day(1))).is_empty());
    }
}

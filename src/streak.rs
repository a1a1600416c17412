use crate::errors::{TrackError, TrackResult};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Length of the unbroken run of logged days ending exactly at `today`.
///
/// Duplicates collapse and input order does not matter. Adjacency is tested
/// by date membership, one day at a time, so a gap always ends the run.
pub fn current_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let logged: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut streak = 0u32;
    let mut cursor = today;
    while logged.contains(&cursor) {
        streak = streak.saturating_add(1);
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

pub fn parse_date(raw: &str) -> TrackResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| TrackError::invalid(format!("invalid date '{raw}': {err}")))
}

pub fn parse_dates<'a, I>(raw: I) -> TrackResult<Vec<NaiveDate>>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter().map(parse_date).collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

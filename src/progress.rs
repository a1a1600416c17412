use crate::errors::{TrackError, TrackResult};
use crate::models::ProgressRecord;
use crate::skills::normalize_skill;
use chrono::{DateTime, Utc};

pub const MAX_PROGRESS: u8 = 100;

/// Where a single skill sits in the progress state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillState {
    Untouched,
    Tracked { initial: u8, current: u8 },
}

/// Accepts integral JSON numbers, including `1e1` style floats.
/// Values outside the `i64` range saturate.
pub fn parse_delta(raw: &serde_json::Number) -> TrackResult<i64> {
    if let Some(delta) = raw.as_i64() {
        return Ok(delta);
    }
    if raw.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match raw.as_f64() {
        Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(TrackError::invalid(format!("delta must be an integer, got {raw}"))),
    }
}

fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_PROGRESS)) as u8
}

impl ProgressRecord {
    pub fn state(&self, skill: &str) -> SkillState {
        match (self.initial.get(skill), self.current.get(skill)) {
            (Some(initial), Some(current)) => SkillState::Tracked {
                initial: *initial,
                current: *current,
            },
            (Some(initial), None) => SkillState::Tracked {
                initial: *initial,
                current: 0,
            },
            (None, _) => SkillState::Untouched,
        }
    }

    pub fn current_of(&self, skill: &str) -> u8 {
        self.current.get(skill).copied().unwrap_or(0)
    }

    /// Moves `skill` by `delta`, clamped to [0, 100].
    ///
    /// Every call is a touch: the first touch of a skill records its prior
    /// value as the baseline, and the first touch of any skill stamps
    /// `tracking_started_at`. Neither is overwritten later.
    pub fn apply_delta(&mut self, skill: &str, delta: i64, now: DateTime<Utc>) -> TrackResult<u8> {
        let skill = normalize_skill(skill)?;
        let previous = self.current_of(&skill);
        let next = clamp_progress(i64::from(previous).saturating_add(delta));

        self.initial.entry(skill.clone()).or_insert(previous);
        self.tracking_started_at.get_or_insert(now);
        self.current.insert(skill, next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap()
    }

    #[test]
    fn first_touch_captures_baseline_and_start() {
        let mut record = ProgressRecord::default();
        assert_eq!(record.state("React"), SkillState::Untouched);

        assert_eq!(record.apply_delta("React", 10, at(9)).unwrap(), 10);
        assert_eq!(record.state("React"), SkillState::Tracked { initial: 0, current: 10 });
        assert_eq!(record.tracking_started_at, Some(at(9)));
    }

    #[test]
    fn up_then_down_restores_current_keeps_initial() {
        let mut record = ProgressRecord::default();
        record.current.insert("Go".into(), 30);

        record.apply_delta("Go", 10, at(9)).unwrap();
        record.apply_delta("Go", -10, at(10)).unwrap();

        assert_eq!(record.current_of("Go"), 30);
        assert_eq!(record.initial.get("Go"), Some(&30));
        assert_eq!(record.tracking_started_at, Some(at(9)));
    }

    #[test]
    fn clamps_at_both_bounds() {
        let mut record = ProgressRecord::default();
        record.current.insert("Rust".into(), 95);
        assert_eq!(record.apply_delta("Rust", 20, at(9)).unwrap(), 100);
        assert_eq!(record.apply_delta("Rust", -250, at(9)).unwrap(), 0);
        assert_eq!(record.apply_delta("Rust", i64::MIN, at(9)).unwrap(), 0);
        assert_eq!(record.apply_delta("Rust", i64::MAX, at(9)).unwrap(), 100);
    }

    #[test]
    fn clamped_no_op_still_counts_as_touch() {
        let mut record = ProgressRecord::default();
        assert_eq!(record.apply_delta("CSS", -10, at(8)).unwrap(), 0);
        assert_eq!(record.state("CSS"), SkillState::Tracked { initial: 0, current: 0 });
        assert_eq!(record.tracking_started_at, Some(at(8)));
    }

    #[test]
    fn zero_baseline_is_never_overwritten() {
        let mut record = ProgressRecord::default();
        record.apply_delta("SQL", 0, at(8)).unwrap();
        record.apply_delta("SQL", 40, at(9)).unwrap();
        record.apply_delta("SQL", 10, at(10)).unwrap();
        assert_eq!(record.initial.get("SQL"), Some(&0));
        assert_eq!(record.current_of("SQL"), 50);
    }

    #[test]
    fn tracking_start_is_set_once_across_skills() {
        let mut record = ProgressRecord::default();
        record.apply_delta("A", 10, at(8)).unwrap();
        record.apply_delta("B", 10, at(8) + Duration::days(3)).unwrap();
        assert_eq!(record.tracking_started_at, Some(at(8)));
        assert_eq!(record.initial.get("B"), Some(&0));
    }

    #[test]
    fn rejects_blank_skill_and_fractional_delta() {
        let mut record = ProgressRecord::default();
        assert!(matches!(record.apply_delta("  ", 10, at(8)), Err(TrackError::InvalidInput(_))));
        assert_eq!(record, ProgressRecord::default());

        let fractional: serde_json::Number = serde_json::from_str("2.5").unwrap();
        assert!(parse_delta(&fractional).is_err());
        let whole: serde_json::Number = serde_json::from_str("-10").unwrap();
        assert_eq!(parse_delta(&whole).unwrap(), -10);
    }

    #[test]
    fn oversized_and_exponent_deltas_saturate() {
        let number = |raw: &str| -> serde_json::Number { serde_json::from_str(raw).unwrap() };

        assert_eq!(parse_delta(&number("10000000000000000000")).unwrap(), i64::MAX);
        assert_eq!(parse_delta(&number("1e1")).unwrap(), 10);
        assert_eq!(parse_delta(&number("-1e30")).unwrap(), i64::MIN);
        assert_eq!(parse_delta(&number("1e30")).unwrap(), i64::MAX);
        assert!(parse_delta(&number("1.5e0")).is_err());

        let mut record = ProgressRecord::default();
        let delta = parse_delta(&number("18446744073709551615")).unwrap();
        assert_eq!(record.apply_delta("Go", delta, at(9)).unwrap(), MAX_PROGRESS);
    }
}

use crate::models::{ProgressRecord, ProgressSummary, SkillDelta};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Gain per skill since tracking began, in the iteration order of `current`.
///
/// Returns `None` when either mapping is missing: there is nothing to
/// summarize yet, which is not the same as a summary with zero gain.
pub fn summarize<'a, I>(
    current: Option<I>,
    initial: Option<&BTreeMap<String, u8>>,
    tracking_started_at: Option<DateTime<Utc>>,
) -> Option<ProgressSummary>
where
    I: IntoIterator<Item = (&'a str, u8)>,
{
    let (current, initial) = (current?, initial?);

    let mut items = Vec::new();
    let mut total_gain = 0i64;
    for (skill, value) in current {
        let baseline = initial.get(skill).copied().unwrap_or(0);
        let delta = i32::from(value) - i32::from(baseline);
        total_gain += i64::from(delta);
        items.push(SkillDelta {
            skill: skill.to_string(),
            delta,
        });
    }

    Some(ProgressSummary {
        items,
        total_gain,
        tracking_started_at,
    })
}

pub fn summarize_record(record: Option<&ProgressRecord>) -> Option<ProgressSummary> {
    let record = record?;
    summarize(
        Some(record.current.iter().map(|(skill, value)| (skill.as_str(), *value))),
        Some(&record.initial),
        record.tracking_started_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(pairs: &[(&str, u8)]) -> BTreeMap<String, u8> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn missing_initial_counts_as_zero() {
        let current = vec![("React", 40u8), ("Go", 10u8)];
        let initial = baseline(&[("React", 10)]);

        let summary = summarize(Some(current), Some(&initial), None).expect("summary");
        assert_eq!(
            summary.items,
            vec![
                SkillDelta { skill: "React".into(), delta: 30 },
                SkillDelta { skill: "Go".into(), delta: 10 },
            ]
        );
        assert_eq!(summary.total_gain, 40);
    }

    #[test]
    fn negative_deltas_are_kept() {
        let current = vec![("Rust", 20u8), ("SQL", 50u8)];
        let initial = baseline(&[("Rust", 60), ("SQL", 30)]);

        let summary = summarize(Some(current), Some(&initial), None).unwrap();
        assert_eq!(summary.items[0].delta, -40);
        assert_eq!(summary.total_gain, -20);
    }

    #[test]
    fn total_gain_is_sum_of_listed_deltas() {
        let current = vec![("a", 100u8), ("b", 0u8), ("c", 55u8), ("d", 7u8)];
        let initial = baseline(&[("a", 20), ("b", 10), ("zz", 90)]);

        let summary = summarize(Some(current.clone()), Some(&initial), None).unwrap();
        let expected: i64 = current
            .iter()
            .map(|(skill, value)| i64::from(*value) - i64::from(initial.get(*skill).copied().unwrap_or(0)))
            .sum();
        assert_eq!(summary.total_gain, expected);
        assert_eq!(summary.items.iter().map(|i| i64::from(i.delta)).sum::<i64>(), expected);
        assert_eq!(summary.items.len(), current.len());
    }

    #[test]
    fn absent_inputs_mean_not_applicable() {
        let initial = BTreeMap::new();
        assert!(summarize(None::<Vec<(&str, u8)>>, Some(&initial), None).is_none());
        assert!(summarize(Some(vec![("Go", 10u8)]), None, None).is_none());
        assert!(summarize_record(None).is_none());
    }

    #[test]
    fn empty_record_is_zero_gain_not_absent() {
        let summary = summarize_record(Some(&ProgressRecord::default())).unwrap();
        assert!(summary.items.is_empty());
        assert_eq!(summary.total_gain, 0);
    }
}

use crate::models::{
    DashboardResponse, DayActivity, NoteEntry, ProfileLink, ProgressRecord, RecruiterSnapshot, TrackedSkillView,
    UserProfile,
};
use crate::streak::{current_streak, date_key};
use crate::summary::summarize_record;
use chrono::{Duration, Local, NaiveDate};
use std::collections::BTreeMap;

pub fn build_dashboard(
    notes: &BTreeMap<NaiveDate, NoteEntry>,
    progress: Option<&ProgressRecord>,
) -> DashboardResponse {
    build_dashboard_at(Local::now().date_naive(), notes, progress)
}

pub fn build_dashboard_at(
    today: NaiveDate,
    notes: &BTreeMap<NaiveDate, NoteEntry>,
    progress: Option<&ProgressRecord>,
) -> DashboardResponse {
    const WINDOW_DAYS: i64 = 7;

    let mut last_7_days = Vec::with_capacity(WINDOW_DAYS as usize);
    for offset in (0..WINDOW_DAYS).rev() {
        let date = today - Duration::days(offset);
        last_7_days.push(DayActivity {
            date: date_key(date),
            logged: notes.contains_key(&date),
        });
    }

    DashboardResponse {
        date: date_key(today),
        streak: current_streak(notes.keys().copied(), today),
        total_entries: notes.len(),
        last_7_days,
        summary: summarize_record(progress),
    }
}

/// Read-only public view of a user. Only tracked skills carry progress.
pub fn build_snapshot(uid: String, profile: &UserProfile, progress: Option<&ProgressRecord>) -> RecruiterSnapshot {
    let links = [
        ("GitHub", &profile.github_url),
        ("LinkedIn", &profile.linkedin_url),
        ("Portfolio", &profile.portfolio_url),
        ("Resume", &profile.resume_url),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        url.as_ref().map(|url| ProfileLink {
            label: label.to_string(),
            url: url.clone(),
        })
    })
    .collect();

    let tracked_skills = profile
        .skills
        .tracked()
        .into_iter()
        .map(|skill| TrackedSkillView {
            progress: progress.map(|p| p.current_of(&skill)).unwrap_or(0),
            skill,
        })
        .collect();

    RecruiterSnapshot {
        uid,
        full_name: profile.full_name.clone(),
        user_name: profile.user_name.clone(),
        role: profile.role.clone(),
        bio: profile.bio.clone(),
        photo_url: profile.photo_url.clone(),
        links,
        primary_skills: profile.skills.primary(),
        tracked_skills,
        summary: summarize_record(progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note() -> NoteEntry {
        NoteEntry {
            note: "practiced".into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn dashboard_window_marks_logged_days() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut notes = BTreeMap::new();
        notes.insert(today, note());
        notes.insert(today - Duration::days(1), note());
        notes.insert(today - Duration::days(3), note());
        notes.insert(today - Duration::days(30), note());

        let dashboard = build_dashboard_at(today, &notes, None);
        assert_eq!(dashboard.streak, 2);
        assert_eq!(dashboard.total_entries, 4);
        assert_eq!(dashboard.last_7_days.len(), 7);
        assert_eq!(dashboard.last_7_days[6].date, "2026-01-05");
        let logged: Vec<bool> = dashboard.last_7_days.iter().map(|d| d.logged).collect();
        assert_eq!(logged, vec![false, false, false, true, false, true, true]);
        assert!(dashboard.summary.is_none());
    }

    #[test]
    fn dashboard_includes_summary_once_tracking_started() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut progress = ProgressRecord::default();
        progress.apply_delta("Go", 30, Utc::now()).unwrap();

        let dashboard = build_dashboard_at(today, &BTreeMap::new(), Some(&progress));
        assert_eq!(dashboard.streak, 0);
        let summary = dashboard.summary.expect("summary");
        assert_eq!(summary.total_gain, 30);
    }

    #[test]
    fn snapshot_lists_links_and_tracked_progress() {
        let mut skills = crate::skills::SkillRoster::from_primary_list("Go, React");
        skills.track("React").unwrap();
        skills.track("Docker").unwrap();
        let profile = UserProfile {
            full_name: "Ada Lovelace".into(),
            user_name: "ada".into(),
            github_url: Some("https://github.com/ada".into()),
            resume_url: Some("https://ada.dev/cv.pdf".into()),
            skills,
            ..UserProfile::default()
        };
        let mut progress = ProgressRecord::default();
        progress.apply_delta("React", 40, Utc::now()).unwrap();

        let snapshot = build_snapshot("u1".into(), &profile, Some(&progress));
        let labels: Vec<_> = snapshot.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["GitHub", "Resume"]);
        assert_eq!(snapshot.primary_skills, vec!["Go", "React"]);
        let tracked: Vec<_> = snapshot
            .tracked_skills
            .iter()
            .map(|t| (t.skill.as_str(), t.progress))
            .collect();
        assert_eq!(tracked, vec![("Docker", 0), ("React", 40)]);
        assert_eq!(snapshot.summary.unwrap().total_gain, 40);
    }
}

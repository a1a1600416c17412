use crate::skills::SkillRoster;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored body of a daily note; the date is the map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNoteEntry {
    pub date: NaiveDate,
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub current: BTreeMap<String, u8>,
    pub initial: BTreeMap<String, u8>,
    pub tracking_started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLog {
    pub id: u64,
    pub text: String,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub user_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills: SkillRoster,
}

/// Everything the store holds for one user id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub notes: BTreeMap<NaiveDate, NoteEntry>,
    #[serde(default)]
    pub progress: Option<ProgressRecord>,
    #[serde(default)]
    pub skill_logs: BTreeMap<String, Vec<SkillLog>>,
    #[serde(default)]
    pub next_log_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppData {
    pub users: BTreeMap<String, UserRecord>,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct DeltaRequest {
    pub delta: serde_json::Number,
}

#[derive(Debug, Deserialize)]
pub struct SkillLogRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub full_name: String,
    pub user_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Comma separated, as typed on the sign-up form.
    #[serde(default)]
    pub primary_skills: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDelta {
    pub skill: String,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub items: Vec<SkillDelta>,
    pub total_gain: i64,
    pub tracking_started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub date: String,
    pub streak: u32,
    pub total_entries: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: String,
    pub logged: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: String,
    pub streak: u32,
    pub total_entries: usize,
    pub last_7_days: Vec<DayActivity>,
    pub summary: Option<ProgressSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub uid: String,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub primary_skills: Vec<String>,
    pub tracked_skills: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackedSkillView {
    pub skill: String,
    pub progress: u8,
}

/// Public, read-only view of a user for recruiters.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecruiterSnapshot {
    pub uid: String,
    pub full_name: String,
    pub user_name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub links: Vec<ProfileLink>,
    pub primary_skills: Vec<String>,
    pub tracked_skills: Vec<TrackedSkillView>,
    pub summary: Option<ProgressSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

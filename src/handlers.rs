use crate::errors::{AppError, TrackError};
use crate::models::{
    DailyNoteEntry, DashboardResponse, DeltaRequest, NoteRequest, ProfileRequest, ProfileResponse, ProgressRecord,
    ProgressSummary, RecruiterSnapshot, SkillLog, SkillLogRequest, StreakResponse, UserProfile,
};
use crate::notes::by_recency;
use crate::progress::parse_delta;
use crate::skills::SkillRoster;
use crate::state::AppState;
use crate::stats::{build_dashboard, build_snapshot};
use crate::storage::RosterChange;
use crate::streak::{current_streak, date_key, parse_date};
use crate::summary::summarize_record;
use crate::ui::render_recruiter;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

const MIN_USER_NAME_CHARS: usize = 3;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = require_profile(&state, &uid).await?;
    Ok(Json(to_profile_response(uid, profile)))
}

pub async fn put_profile(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let full_name = payload.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::bad_request("full_name is required"));
    }
    let user_name = payload.user_name.trim();
    if user_name.chars().count() < MIN_USER_NAME_CHARS {
        return Err(AppError::bad_request(format!(
            "user_name needs at least {MIN_USER_NAME_CHARS} characters"
        )));
    }

    let profile = UserProfile {
        full_name: full_name.to_string(),
        user_name: user_name.to_string(),
        role: non_blank(payload.role),
        bio: non_blank(payload.bio),
        github_url: non_blank(payload.github_url),
        linkedin_url: non_blank(payload.linkedin_url),
        portfolio_url: non_blank(payload.portfolio_url),
        resume_url: non_blank(payload.resume_url),
        photo_url: non_blank(payload.photo_url),
        created_at: None,
        skills: SkillRoster::default(),
    };
    let saved = state
        .store
        .save_profile(&uid, profile, &payload.primary_skills)
        .await?;
    info!(uid = %uid, "profile saved");
    Ok(Json(to_profile_response(uid, saved)))
}

pub async fn track_skill(
    State(state): State<AppState>,
    Path((uid, skill)): Path<(String, String)>,
) -> Result<Json<ProfileResponse>, AppError> {
    update_roster(state, uid, &skill, RosterChange::Track).await
}

pub async fn untrack_skill(
    State(state): State<AppState>,
    Path((uid, skill)): Path<(String, String)>,
) -> Result<Json<ProfileResponse>, AppError> {
    update_roster(state, uid, &skill, RosterChange::Untrack).await
}

pub async fn promote_skill(
    State(state): State<AppState>,
    Path((uid, skill)): Path<(String, String)>,
) -> Result<Json<ProfileResponse>, AppError> {
    update_roster(state, uid, &skill, RosterChange::Promote).await
}

async fn update_roster(
    state: AppState,
    uid: String,
    skill: &str,
    change: RosterChange,
) -> Result<Json<ProfileResponse>, AppError> {
    let saved = state.store.update_roster(&uid, skill, change).await?;
    info!(uid = %uid, skill = %skill, ?change, "roster updated");
    Ok(Json(to_profile_response(uid, saved)))
}

pub async fn list_notes(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<DailyNoteEntry>>, AppError> {
    let notes = state.store.entries_for_user(&uid).await?;
    Ok(Json(by_recency(&notes)))
}

pub async fn put_note(
    State(state): State<AppState>,
    Path((uid, date)): Path<(String, String)>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<DailyNoteEntry>, AppError> {
    let date = parse_date(&date)?;
    let entry = state.store.upsert_entry(&uid, date, &payload.note).await?;
    info!(uid = %uid, date = %date, "note saved");
    Ok(Json(entry))
}

pub async fn patch_note(
    State(state): State<AppState>,
    Path((uid, date)): Path<(String, String)>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<DailyNoteEntry>, AppError> {
    let date = parse_date(&date)?;
    let entry = state.store.update_entry(&uid, date, &payload.note).await?;
    info!(uid = %uid, date = %date, "note updated");
    Ok(Json(entry))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path((uid, date)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let date = parse_date(&date)?;
    state.store.delete_entry(&uid, date).await?;
    info!(uid = %uid, date = %date, "note deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_streak(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<StreakResponse>, AppError> {
    let today = today();
    let notes = state.store.entries_for_user(&uid).await?;
    Ok(Json(StreakResponse {
        date: date_key(today),
        streak: current_streak(notes.keys().copied(), today),
        total_entries: notes.len(),
    }))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Option<ProgressRecord>>, AppError> {
    Ok(Json(state.store.progress_for_user(&uid).await?))
}

pub async fn post_progress(
    State(state): State<AppState>,
    Path((uid, skill)): Path<(String, String)>,
    Json(payload): Json<DeltaRequest>,
) -> Result<Json<ProgressRecord>, AppError> {
    let delta = parse_delta(&payload.delta)?;
    let record = state.store.apply_delta(&uid, &skill, delta).await?;
    info!(uid = %uid, skill = %skill, delta, "progress updated");
    Ok(Json(record))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Option<ProgressSummary>>, AppError> {
    let progress = state.store.progress_for_user(&uid).await?;
    Ok(Json(summarize_record(progress.as_ref())))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    let notes = state.store.entries_for_user(&uid).await?;
    let progress = state.store.progress_for_user(&uid).await?;
    Ok(Json(build_dashboard(&notes, progress.as_ref())))
}

pub async fn list_skill_logs(
    State(state): State<AppState>,
    Path((uid, skill)): Path<(String, String)>,
) -> Result<Json<Vec<SkillLog>>, AppError> {
    Ok(Json(state.store.skill_logs(&uid, &skill).await?))
}

pub async fn add_skill_log(
    State(state): State<AppState>,
    Path((uid, skill)): Path<(String, String)>,
    Json(payload): Json<SkillLogRequest>,
) -> Result<(StatusCode, Json<SkillLog>), AppError> {
    let log = state.store.add_skill_log(&uid, &skill, &payload.text).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn edit_skill_log(
    State(state): State<AppState>,
    Path((uid, skill, id)): Path<(String, String, u64)>,
    Json(payload): Json<SkillLogRequest>,
) -> Result<Json<SkillLog>, AppError> {
    Ok(Json(state.store.edit_skill_log(&uid, &skill, id, &payload.text).await?))
}

pub async fn delete_skill_log(
    State(state): State<AppState>,
    Path((uid, skill, id)): Path<(String, String, u64)>,
) -> Result<StatusCode, AppError> {
    state.store.delete_skill_log(&uid, &skill, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn recruiter_json(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<RecruiterSnapshot>, AppError> {
    Ok(Json(load_snapshot(&state, uid).await?))
}

pub async fn recruiter_page(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Html<String>, AppError> {
    let snapshot = load_snapshot(&state, uid).await?;
    Ok(Html(render_recruiter(&snapshot)))
}

async fn load_snapshot(state: &AppState, uid: String) -> Result<RecruiterSnapshot, AppError> {
    let profile = require_profile(state, &uid).await?;
    let progress = state.store.progress_for_user(&uid).await?;
    Ok(build_snapshot(uid, &profile, progress.as_ref()))
}

async fn require_profile(state: &AppState, uid: &str) -> Result<UserProfile, AppError> {
    state
        .store
        .profile(uid)
        .await?
        .ok_or_else(|| TrackError::unavailable(format!("no profile for user '{uid}'")).into())
}

fn to_profile_response(uid: String, profile: UserProfile) -> ProfileResponse {
    ProfileResponse {
        uid,
        primary_skills: profile.skills.primary(),
        tracked_skills: profile.skills.tracked(),
        profile,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

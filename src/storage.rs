//! Document store boundary.
//!
//! Everything is scoped by an explicit user id. The JSON file store keeps the
//! whole document in memory and rewrites the file after each mutation; the
//! in-memory copy only changes once the write has succeeded.

use crate::errors::{TrackError, TrackResult};
use crate::models::{AppData, DailyNoteEntry, NoteEntry, ProgressRecord, SkillLog, UserProfile, UserRecord};
use crate::notes::{logs_newest_first, validate_log_text, validate_note};
use crate::skills::{normalize_skill, SkillRoster};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// A roster transition applied atomically to a stored profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterChange {
    Track,
    Untrack,
    Promote,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn entries_for_user(&self, uid: &str) -> TrackResult<BTreeMap<NaiveDate, NoteEntry>>;

    /// Creates or overwrites the note for `date`.
    async fn upsert_entry(&self, uid: &str, date: NaiveDate, note: &str) -> TrackResult<DailyNoteEntry>;

    /// Edits an existing note; fails with `DataUnavailable` if there is none.
    async fn update_entry(&self, uid: &str, date: NaiveDate, note: &str) -> TrackResult<DailyNoteEntry>;

    async fn delete_entry(&self, uid: &str, date: NaiveDate) -> TrackResult<()>;

    /// `None` until the first progress change.
    async fn progress_for_user(&self, uid: &str) -> TrackResult<Option<ProgressRecord>>;

    async fn apply_delta(&self, uid: &str, skill: &str, delta: i64) -> TrackResult<ProgressRecord>;

    async fn profile(&self, uid: &str) -> TrackResult<Option<UserProfile>>;

    /// Saves profile fields and redeclares the primary skills.
    ///
    /// The roster on `profile` is ignored: an existing roster keeps its
    /// tracked skills, and a new one starts tracking every skill that
    /// already has progress.
    async fn save_profile(&self, uid: &str, profile: UserProfile, primary_skills: &str) -> TrackResult<UserProfile>;

    async fn update_roster(&self, uid: &str, skill: &str, change: RosterChange) -> TrackResult<UserProfile>;

    async fn skill_logs(&self, uid: &str, skill: &str) -> TrackResult<Vec<SkillLog>>;

    async fn add_skill_log(&self, uid: &str, skill: &str, text: &str) -> TrackResult<SkillLog>;

    async fn edit_skill_log(&self, uid: &str, skill: &str, id: u64, text: &str) -> TrackResult<SkillLog>;

    async fn delete_skill_log(&self, uid: &str, skill: &str, id: u64) -> TrackResult<()>;
}

pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<AppData>,
}

fn normalize_uid(uid: &str) -> TrackResult<&str> {
    let uid = uid.trim();
    if uid.is_empty() {
        return Err(TrackError::invalid("user id must not be empty"));
    }
    Ok(uid)
}

impl JsonFileStore {
    /// Fails on an unreadable or corrupt file so it is never overwritten.
    pub async fn open(path: PathBuf) -> TrackResult<Self> {
        let data = load_data(&path).await?;
        debug!(path = %path.display(), users = data.users.len(), "store opened");
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read<T, F>(&self, uid: &str, view: F) -> TrackResult<T>
    where
        T: Send,
        F: FnOnce(Option<&UserRecord>) -> T + Send,
    {
        let uid = normalize_uid(uid)?;
        let data = self.data.lock().await;
        Ok(view(data.users.get(uid)))
    }

    async fn mutate<T, F>(&self, uid: &str, change: F) -> TrackResult<T>
    where
        T: Send,
        F: FnOnce(&mut UserRecord) -> TrackResult<T> + Send,
    {
        let uid = normalize_uid(uid)?;
        let mut data = self.data.lock().await;

        let mut record = data.users.get(uid).cloned().unwrap_or_default();
        let out = change(&mut record)?;

        let previous = data.users.insert(uid.to_string(), record);
        if let Err(err) = persist_data(&self.path, &data).await {
            match previous {
                Some(previous) => data.users.insert(uid.to_string(), previous),
                None => data.users.remove(uid),
            };
            return Err(err);
        }
        Ok(out)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn entries_for_user(&self, uid: &str) -> TrackResult<BTreeMap<NaiveDate, NoteEntry>> {
        self.read(uid, |record| record.map(|r| r.notes.clone()).unwrap_or_default())
            .await
    }

    async fn upsert_entry(&self, uid: &str, date: NaiveDate, note: &str) -> TrackResult<DailyNoteEntry> {
        let note = validate_note(note)?;
        self.mutate(uid, |record| {
            let entry = NoteEntry {
                note,
                timestamp: Utc::now(),
            };
            record.notes.insert(date, entry.clone());
            Ok(DailyNoteEntry {
                date,
                note: entry.note,
                timestamp: entry.timestamp,
            })
        })
        .await
    }

    async fn update_entry(&self, uid: &str, date: NaiveDate, note: &str) -> TrackResult<DailyNoteEntry> {
        let note = validate_note(note)?;
        self.mutate(uid, |record| {
            let entry = record
                .notes
                .get_mut(&date)
                .ok_or_else(|| TrackError::unavailable(format!("no note for {date}")))?;
            entry.note = note;
            entry.timestamp = Utc::now();
            Ok(DailyNoteEntry {
                date,
                note: entry.note.clone(),
                timestamp: entry.timestamp,
            })
        })
        .await
    }

    async fn delete_entry(&self, uid: &str, date: NaiveDate) -> TrackResult<()> {
        self.mutate(uid, |record| {
            record
                .notes
                .remove(&date)
                .map(|_| ())
                .ok_or_else(|| TrackError::unavailable(format!("no note for {date}")))
        })
        .await
    }

    async fn progress_for_user(&self, uid: &str) -> TrackResult<Option<ProgressRecord>> {
        self.read(uid, |record| record.and_then(|r| r.progress.clone()))
            .await
    }

    async fn apply_delta(&self, uid: &str, skill: &str, delta: i64) -> TrackResult<ProgressRecord> {
        let skill = normalize_skill(skill)?;
        self.mutate(uid, |record| {
            let progress = record.progress.get_or_insert_with(ProgressRecord::default);
            progress.apply_delta(&skill, delta, Utc::now())?;
            let updated = progress.clone();
            if let Some(profile) = record.profile.as_mut() {
                profile.skills.track(&skill)?;
            }
            Ok(updated)
        })
        .await
    }

    async fn profile(&self, uid: &str) -> TrackResult<Option<UserProfile>> {
        self.read(uid, |record| record.and_then(|r| r.profile.clone()))
            .await
    }

    async fn save_profile(&self, uid: &str, mut profile: UserProfile, primary_skills: &str) -> TrackResult<UserProfile> {
        self.mutate(uid, |record| {
            match record.profile.take() {
                Some(existing) => {
                    profile.created_at = existing.created_at.or(profile.created_at);
                    profile.skills = existing.skills;
                    profile.skills.redeclare_primary(primary_skills);
                }
                None => {
                    profile.skills = SkillRoster::from_primary_list(primary_skills);
                    if let Some(progress) = &record.progress {
                        for skill in progress.current.keys() {
                            profile.skills.track(skill)?;
                        }
                    }
                }
            }
            profile.created_at.get_or_insert_with(Utc::now);
            record.profile = Some(profile.clone());
            Ok(profile)
        })
        .await
    }

    async fn update_roster(&self, uid: &str, skill: &str, change: RosterChange) -> TrackResult<UserProfile> {
        let skill = normalize_skill(skill)?;
        self.mutate(uid, |record| {
            let profile = record
                .profile
                .as_mut()
                .ok_or_else(|| TrackError::unavailable(format!("no profile for user '{uid}'")))?;
            match change {
                RosterChange::Track => profile.skills.track(&skill).map(|_| ())?,
                RosterChange::Untrack => profile.skills.untrack(&skill).map(|_| ())?,
                RosterChange::Promote => profile.skills.promote(&skill).map(|_| ())?,
            }
            Ok(profile.clone())
        })
        .await
    }

    async fn skill_logs(&self, uid: &str, skill: &str) -> TrackResult<Vec<SkillLog>> {
        let skill = normalize_skill(skill)?;
        self.read(uid, |record| {
            record
                .and_then(|r| r.skill_logs.get(&skill))
                .map(|logs| logs_newest_first(logs))
                .unwrap_or_default()
        })
        .await
    }

    async fn add_skill_log(&self, uid: &str, skill: &str, text: &str) -> TrackResult<SkillLog> {
        let skill = normalize_skill(skill)?;
        let text = validate_log_text(text)?;
        self.mutate(uid, |record| {
            record.next_log_id += 1;
            let log = SkillLog {
                id: record.next_log_id,
                text,
                logged_at: Utc::now(),
            };
            record.skill_logs.entry(skill).or_default().push(log.clone());
            Ok(log)
        })
        .await
    }

    async fn edit_skill_log(&self, uid: &str, skill: &str, id: u64, text: &str) -> TrackResult<SkillLog> {
        let skill = normalize_skill(skill)?;
        let text = validate_log_text(text)?;
        self.mutate(uid, |record| {
            let log = record
                .skill_logs
                .get_mut(&skill)
                .and_then(|logs| logs.iter_mut().find(|log| log.id == id))
                .ok_or_else(|| TrackError::unavailable(format!("no log {id} for {skill}")))?;
            log.text = text;
            Ok(log.clone())
        })
        .await
    }

    async fn delete_skill_log(&self, uid: &str, skill: &str, id: u64) -> TrackResult<()> {
        let skill = normalize_skill(skill)?;
        self.mutate(uid, |record| {
            let logs = record
                .skill_logs
                .get_mut(&skill)
                .ok_or_else(|| TrackError::unavailable(format!("no logs for {skill}")))?;
            let before = logs.len();
            logs.retain(|log| log.id != id);
            if logs.len() == before {
                return Err(TrackError::unavailable(format!("no log {id} for {skill}")));
            }
            if logs.is_empty() {
                record.skill_logs.remove(&skill);
            }
            Ok(())
        })
        .await
    }
}

/// A missing file is an empty store; anything else unreadable is an error.
pub async fn load_data(path: &Path) -> TrackResult<AppData> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
            error!(path = %path.display(), "failed to parse data file: {err}");
            TrackError::from(err)
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppData::default()),
        Err(err) => {
            error!(path = %path.display(), "failed to read data file: {err}");
            Err(err.into())
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> TrackResult<()> {
    let payload = serde_json::to_vec_pretty(data)?;
    if let Err(err) = fs::write(path, payload).await {
        warn!(path = %path.display(), "failed to write data file: {err}");
        return Err(err.into());
    }
    Ok(())
}

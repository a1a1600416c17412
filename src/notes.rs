use crate::errors::{TrackError, TrackResult};
use crate::models::{DailyNoteEntry, NoteEntry, SkillLog};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const MAX_NOTE_CHARS: usize = 500;

pub fn validate_note(raw: &str) -> TrackResult<String> {
    let note = raw.trim();
    if note.is_empty() {
        return Err(TrackError::invalid("note must not be empty"));
    }
    let chars = note.chars().count();
    if chars > MAX_NOTE_CHARS {
        return Err(TrackError::invalid(format!(
            "note is {chars} characters, limit is {MAX_NOTE_CHARS}"
        )));
    }
    Ok(note.to_string())
}

pub fn validate_log_text(raw: &str) -> TrackResult<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TrackError::invalid("log text must not be empty"));
    }
    Ok(text.to_string())
}

/// Most recently written first; same-instant entries fall back to newest date.
pub fn by_recency(notes: &BTreeMap<NaiveDate, NoteEntry>) -> Vec<DailyNoteEntry> {
    let mut entries: Vec<DailyNoteEntry> = notes
        .iter()
        .map(|(date, entry)| DailyNoteEntry {
            date: *date,
            note: entry.note.clone(),
            timestamp: entry.timestamp,
        })
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.date.cmp(&a.date)));
    entries
}

pub fn logs_newest_first(logs: &[SkillLog]) -> Vec<SkillLog> {
    let mut logs = logs.to_vec();
    logs.sort_by(|a, b| b.logged_at.cmp(&a.logged_at).then(b.id.cmp(&a.id)));
    logs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn note_is_trimmed_and_bounded() {
        assert_eq!(validate_note("  shipped the parser \n").unwrap(), "shipped the parser");
        assert!(validate_note("   ").is_err());
        assert!(validate_note(&"x".repeat(MAX_NOTE_CHARS)).is_ok());
        assert!(validate_note(&"x".repeat(MAX_NOTE_CHARS + 1)).is_err());
        // multi-byte characters count once each
        assert!(validate_note(&"é".repeat(MAX_NOTE_CHARS)).is_ok());
    }

    #[test]
    fn entries_sorted_by_last_write() {
        let mut notes = BTreeMap::new();
        let d1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let d3 = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let written = |hour| Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap();

        notes.insert(d1, NoteEntry { note: "old day, edited last".into(), timestamp: written(12) });
        notes.insert(d2, NoteEntry { note: "b".into(), timestamp: written(9) });
        notes.insert(d3, NoteEntry { note: "c".into(), timestamp: written(9) });

        let dates: Vec<_> = by_recency(&notes).into_iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d1, d3, d2]);
    }
}

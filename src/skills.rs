use crate::errors::{TrackError, TrackResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    /// Declared at sign-up, progress not measured.
    Primary,
    /// Primary skill whose progress is measured.
    Tracked,
    /// Measured skill that is not (yet) primary.
    TrackedAndNew,
}

impl SkillStatus {
    pub fn is_primary(self) -> bool {
        matches!(self, Self::Primary | Self::Tracked)
    }

    pub fn is_tracked(self) -> bool {
        matches!(self, Self::Tracked | Self::TrackedAndNew)
    }
}

/// A user's skills, one status per name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillRoster {
    skills: BTreeMap<String, SkillStatus>,
}

pub fn normalize_skill(raw: &str) -> TrackResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(TrackError::invalid("skill name must not be empty"));
    }
    Ok(name.to_string())
}

impl SkillRoster {
    /// Parses the comma separated list typed on the sign-up form.
    pub fn from_primary_list(raw: &str) -> Self {
        let skills = raw
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(|skill| (skill.to_string(), SkillStatus::Primary))
            .collect();
        Self { skills }
    }

    /// Replaces the declared primary skills, keeping what is tracked.
    pub fn redeclare_primary(&mut self, raw: &str) {
        let declared = Self::from_primary_list(raw);
        let mut skills = BTreeMap::new();
        for (name, status) in &self.skills {
            if status.is_tracked() {
                let status = if declared.skills.contains_key(name) {
                    SkillStatus::Tracked
                } else {
                    SkillStatus::TrackedAndNew
                };
                skills.insert(name.clone(), status);
            }
        }
        for name in declared.skills.into_keys() {
            skills.entry(name).or_insert(SkillStatus::Primary);
        }
        self.skills = skills;
    }

    pub fn status(&self, skill: &str) -> Option<SkillStatus> {
        self.skills.get(skill.trim()).copied()
    }

    pub fn track(&mut self, skill: &str) -> TrackResult<SkillStatus> {
        let name = normalize_skill(skill)?;
        let status = match self.skills.get(&name) {
            Some(SkillStatus::Primary) => SkillStatus::Tracked,
            Some(tracked) => *tracked,
            None => SkillStatus::TrackedAndNew,
        };
        self.skills.insert(name, status);
        Ok(status)
    }

    /// Returns the new status, or `None` when the skill left the roster.
    pub fn untrack(&mut self, skill: &str) -> TrackResult<Option<SkillStatus>> {
        let name = normalize_skill(skill)?;
        match self.skills.get(&name).copied() {
            Some(SkillStatus::Tracked) => {
                self.skills.insert(name, SkillStatus::Primary);
                Ok(Some(SkillStatus::Primary))
            }
            Some(SkillStatus::TrackedAndNew) => {
                self.skills.remove(&name);
                Ok(None)
            }
            Some(SkillStatus::Primary) => Ok(Some(SkillStatus::Primary)),
            None => Err(TrackError::invalid(format!("skill '{name}' is not on the roster"))),
        }
    }

    pub fn promote(&mut self, skill: &str) -> TrackResult<SkillStatus> {
        let name = normalize_skill(skill)?;
        match self.skills.get(&name).copied() {
            Some(SkillStatus::TrackedAndNew) => {
                self.skills.insert(name, SkillStatus::Tracked);
                Ok(SkillStatus::Tracked)
            }
            Some(status) => Ok(status),
            None => Err(TrackError::invalid(format!("skill '{name}' is not tracked"))),
        }
    }

    pub fn primary(&self) -> Vec<String> {
        self.names_where(SkillStatus::is_primary)
    }

    pub fn tracked(&self) -> Vec<String> {
        self.names_where(SkillStatus::is_tracked)
    }

    fn names_where(&self, keep: fn(SkillStatus) -> bool) -> Vec<String> {
        self.skills
            .iter()
            .filter(|(_, status)| keep(**status))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

use std::{fs, path::Path};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    criteria::{CombineMode, FileSelectionCriteria},
    error::CriteriaError,
};

/// Serialized form of [`FileSelectionCriteria`], as read from a JSON
/// criteria file.
///
/// ```json
/// { "name_patterns": ["*.log"], "older_than_days": 5, "combine": "and" }
/// ```
///
/// Absolute bounds (`older_than`, RFC 3339) win over the relative
/// `*_days` forms when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaConfig {
    pub name_patterns: Vec<String>,
    pub older_than: Option<DateTime<Utc>>,
    pub newer_than: Option<DateTime<Utc>>,
    pub older_than_days: Option<u32>,
    pub newer_than_days: Option<u32>,
    /// Octal permission bits, e.g. `"644"` or `"0o600"`.
    pub mode: Option<String>,
    pub combine: CombineMode,
}

impl CriteriaConfig {
    pub fn from_json_str(s: &str) -> Result<Self, CriteriaError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, CriteriaError> {
        let raw = fs::read_to_string(path).map_err(|source| CriteriaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Build the criteria, resolving relative ages against `now`.
    pub fn into_criteria(self, now: DateTime<Utc>) -> Result<FileSelectionCriteria, CriteriaError> {
        let mut criteria = FileSelectionCriteria::new()
            .with_patterns(&self.name_patterns)?
            .combine(self.combine);

        let days_ago = |days: u32| {
            TimeDelta::try_days(i64::from(days))
                .and_then(|age| now.checked_sub_signed(age))
                .ok_or(CriteriaError::Age(days))
        };

        let older_than = match self.older_than {
            Some(t) => Some(t),
            None => self.older_than_days.map(days_ago).transpose()?,
        };
        let newer_than = match self.newer_than {
            Some(t) => Some(t),
            None => self.newer_than_days.map(days_ago).transpose()?,
        };

        if let Some(t) = older_than {
            criteria = criteria.older_than(t);
        }
        if let Some(t) = newer_than {
            criteria = criteria.newer_than(t);
        }
        if let Some(mode) = self.mode.as_deref() {
            criteria = criteria.with_mode(parse_mode(mode)?);
        }

        Ok(criteria)
    }
}

pub fn parse_mode(raw: &str) -> Result<u32, CriteriaError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(CriteriaError::Mode(raw.to_owned()));
    }
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|m| *m <= 0o7777)
        .ok_or_else(|| CriteriaError::Mode(raw.to_owned()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

use std::fmt;

use chrono::{DateTime, Utc};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::{AugmentedFileInfo, error::CriteriaError};

/// How active sub-criteria are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Every active sub-criterion must match.
    #[default]
    And,
    /// Any single active sub-criterion is enough.
    Or,
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineMode::And => f.write_str("AND File Select Criterion"),
            CombineMode::Or => f.write_str("OR File Select Criterion"),
        }
    }
}

/// Composite predicate deciding which files a walk selects.
///
/// A sub-criterion only takes part in the decision when it is active:
/// a non-blank name pattern, a timestamp bound, or a non-zero mode.
/// With nothing active every file is selected.
#[derive(Debug, Clone, Default)]
pub struct FileSelectionCriteria {
    patterns: Vec<String>,
    matcher: Option<GlobSet>,
    older_than: Option<DateTime<Utc>>,
    newer_than: Option<DateTime<Utc>>,
    mode: u32,
    combine: CombineMode,
}

impl FileSelectionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the name patterns. Patterns are trimmed; blank ones are
    /// kept in [`patterns`](Self::patterns) but never match anything.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_owned())
            .collect();

        let mut builder = GlobSetBuilder::new();
        let mut any = false;
        for pattern in patterns.iter().filter(|p| !p.is_empty()) {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| CriteriaError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
            any = true;
        }

        self.matcher = if any {
            let set = builder.build().map_err(|source| CriteriaError::Pattern {
                pattern: patterns.join(", "),
                source,
            })?;
            Some(set)
        } else {
            None
        };
        self.patterns = patterns;
        Ok(self)
    }

    /// Select files modified strictly before `t`.
    pub fn older_than(mut self, t: DateTime<Utc>) -> Self {
        self.older_than = Some(t);
        self
    }

    /// Select files modified strictly after `t`.
    pub fn newer_than(mut self, t: DateTime<Utc>) -> Self {
        self.newer_than = Some(t);
        self
    }

    /// Select files whose permission bits equal `mode`. Zero disables.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn combine(mut self, combine: CombineMode) -> Self {
        self.combine = combine;
        self
    }

    #[inline]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[inline]
    pub fn older_than_bound(&self) -> Option<DateTime<Utc>> {
        self.older_than
    }

    #[inline]
    pub fn newer_than_bound(&self) -> Option<DateTime<Utc>> {
        self.newer_than
    }

    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn combine_mode(&self) -> CombineMode {
        self.combine
    }

    #[inline]
    pub fn are_patterns_active(&self) -> bool {
        self.matcher.is_some()
    }

    pub fn active_count(&self) -> usize {
        [
            self.matcher.is_some(),
            self.older_than.is_some(),
            self.newer_than.is_some(),
            self.mode != 0,
        ]
        .into_iter()
        .filter(|&active| active)
        .count()
    }

    pub fn matches(&self, info: &AugmentedFileInfo) -> bool {
        let outcomes = self.evaluate_all(info);
        let mut active = outcomes.iter().flatten().peekable();

        if active.peek().is_none() {
            return true;
        }

        match self.combine {
            CombineMode::And => active.all(|&matched| matched),
            CombineMode::Or => active.any(|&matched| matched),
        }
    }

    /// One slot per sub-criterion: `None` when inactive, otherwise whether
    /// `info` satisfies it.
    fn evaluate_all(&self, info: &AugmentedFileInfo) -> [Option<bool>; 4] {
        let pattern = self.matcher.as_ref().map(|set| set.is_match(info.name()));
        let older = self.older_than.map(|t| info.modified() < t);
        let newer = self.newer_than.map(|t| info.modified() > t);
        let mode = (self.mode != 0).then(|| info.mode() == self.mode);
        [pattern, older, newer, mode]
    }
}

#[cfg(test)]
#[path = "criteria_tests.rs"]
mod tests;

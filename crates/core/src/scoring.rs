use crate::{ConfigError, HandKind, HandRule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
    pub base_score: i64,
    pub base_mult: i64,
    pub level_score: i64,
    pub level_mult: i64,
    pub level: u32,
}

impl ScoreEntry {
    pub fn effective(&self) -> (i64, i64) {
        let extra = i64::from(self.level.saturating_sub(1));
        (
            self.base_score
                .saturating_add(self.level_score.saturating_mul(extra)),
            self.base_mult.saturating_add(self.level_mult.saturating_mul(extra)),
        )
    }
}

/// Per-category base values and levels. Holds exactly one entry per
/// [`HandKind`], indexed by the kind's strength order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreTable {
    entries: Vec<ScoreEntry>,
}

impl ScoreTable {
    pub fn from_rules(rules: &[HandRule]) -> Result<Self, ConfigError> {
        let mut slots: Vec<Option<ScoreEntry>> = vec![None; HandKind::ALL.len()];
        for rule in rules {
            let slot = &mut slots[rule.kind as usize];
            if slot.is_some() {
                return Err(ConfigError::DuplicateHandRule(rule.kind));
            }
            *slot = Some(ScoreEntry {
                base_score: rule.base_score,
                base_mult: rule.base_mult,
                level_score: rule.level_score,
                level_mult: rule.level_mult,
                level: 1,
            });
        }
        let entries = slots
            .into_iter()
            .zip(HandKind::ALL)
            .map(|(slot, kind)| slot.ok_or(ConfigError::MissingHandRule(kind)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn entry(&self, kind: HandKind) -> &ScoreEntry {
        &self.entries[kind as usize]
    }

    pub fn effective_base(&self, kind: HandKind) -> (i64, i64) {
        self.entry(kind).effective()
    }

    /// Base values for a classification; no category scores nothing.
    pub fn base_for(&self, kind: Option<HandKind>) -> (i64, i64) {
        kind.map_or((0, 0), |kind| self.effective_base(kind))
    }

    pub fn level(&self, kind: HandKind) -> u32 {
        self.entry(kind).level
    }

    /// Permanently raises the category by one level and returns the new level.
    pub fn upgrade(&mut self, kind: HandKind) -> u32 {
        let entry = &mut self.entries[kind as usize];
        entry.level = entry.level.saturating_add(1);
        entry.level
    }
}

use crate::error::{DerError, Result};

/// A labeled time interval attributed to one speaker.
///
/// Turns are immutable once constructed: the constructor is the only place
/// the `start < end` / non-negative / finite invariant is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub speaker: String,
    pub start: f64,
    pub end: f64,
}

impl Turn {
    /// Construct a turn, validating the invariants from the data model.
    pub fn new(speaker: impl Into<String>, start: f64, end: f64) -> Result<Self> {
        let speaker = speaker.into();
        if !start.is_finite() || !end.is_finite() || start < 0.0 || start >= end {
            return Err(DerError::InvalidTurn {
                speaker,
                start,
                end,
            });
        }
        Ok(Self {
            speaker,
            start,
            end,
        })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// An ordered collection of turns belonging to one recording.
///
/// Turns may overlap, including turns of the same speaker; no ordering is
/// required at construction time. [`crate::core::timeline`] imposes
/// ordering internally when it builds a [`crate::models::Timeline`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnList {
    turns: Vec<Turn>,
}

impl TurnList {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn empty() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Earliest start / latest end across all turns, if any.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let start = self
            .turns
            .iter()
            .map(|t| t.start)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f64| a.min(s))));
        let end = self
            .turns
            .iter()
            .map(|t| t.end)
            .fold(None, |acc, e| Some(acc.map_or(e, |a: f64| a.max(e))));
        match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

impl FromIterator<Turn> for TurnList {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

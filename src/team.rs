//! Scoring teams and their identifiers
//!
//! This module defines the teams competing in a game. Every team has a
//! stable identity that survives renames, a display name, and a running
//! score. Scores are mutated exclusively by the scoring transition of the
//! question lifecycle; nothing else in the system writes to them.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use uuid::Uuid;

/// A unique identifier for a scoring team
///
/// Team identity is stable across renames: award messages refer to teams
/// by this ID, never by display name.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Creates a new random team ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TeamId {
    /// Creates a new random team ID (same as `new()`)
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TeamId {
    /// Formats the ID as a UUID string
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TeamId {
    type Err = uuid::Error;

    /// Parses a team ID from a UUID string
    ///
    /// # Errors
    ///
    /// Returns a `uuid::Error` if the string is not a valid UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A scoring team
///
/// Teams live for the duration of a play session. The score is a plain
/// signed integer with no floor; negative totals are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable identifier, unchanged by renames
    pub id: TeamId,
    /// Display name shown on both surfaces
    pub name: String,
    /// Running score, mutated only by the scoring transition
    pub score: i64,
}

impl Team {
    /// Creates a new team with a fresh ID and a zero score
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for the team
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TeamId::new(),
            name: name.into(),
            score: 0,
        }
    }
}

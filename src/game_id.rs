//! Game ID generation and management
//!
//! This module provides functionality for generating unique game IDs that
//! name the broadcast topic connecting the host console and the audience
//! surface. Game IDs are displayed in octal format to make them easier to
//! communicate verbally when opening the audience surface on another screen.

use std::{fmt::Display, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Minimum value for generated game IDs (in octal: 10000)
const MIN_VALUE: u16 = 0o10_000;
/// Maximum value for generated game IDs (in octal: 100000)
const MAX_VALUE: u16 = 0o100_000;

/// A unique identifier for one logical game
///
/// A game ID scopes the sync channel: both surfaces subscribe to the topic
/// it names, and messages never cross between games. IDs are generated
/// randomly within a range that always displays as a 5-digit octal number,
/// which reduces confusion when sharing them verbally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameId(u16);

impl GameId {
    /// Creates a new random game ID
    ///
    /// The ID is generated within the valid range to ensure it displays
    /// as a 5-digit octal number for easy communication.
    pub fn new() -> Self {
        Self(fastrand::u16(MIN_VALUE..MAX_VALUE))
    }
}

impl Default for GameId {
    /// Creates a new random game ID (same as `new()`)
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GameId {
    /// Formats the game ID as a 5-digit octal number
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:05o}", self.0)
    }
}

impl Serialize for GameId {
    /// Serializes the game ID as an octal string
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GameId {
    /// Deserializes a game ID from an octal string
    fn deserialize<D>(deserializer: D) -> Result<GameId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GameId::from_str(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

impl FromStr for GameId {
    type Err = ParseIntError;

    /// Parses a game ID from an octal string representation
    ///
    /// # Errors
    ///
    /// Returns a `ParseIntError` if the string cannot be parsed as a valid
    /// octal number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(u16::from_str_radix(s, 8)?))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_new_in_range() {
        for _ in 0..100 {
            let id = GameId::new();
            assert!(id.0 >= MIN_VALUE);
            assert!(id.0 < MAX_VALUE);
        }
    }

    #[test]
    fn test_game_id_display_format() {
        let id = GameId(MIN_VALUE);
        assert_eq!(id.to_string(), "10000");

        let id = GameId(MIN_VALUE + 1);
        assert_eq!(id.to_string(), "10001");

        let id = GameId(MAX_VALUE - 1);
        assert_eq!(id.to_string(), "77777");
    }

    #[test]
    fn test_game_id_from_str() {
        let id = GameId::from_str("10000").unwrap();
        assert_eq!(id.0, MIN_VALUE);

        let id = GameId::from_str("12345").unwrap();
        assert_eq!(id.0, 0o12345);
    }

    #[test]
    fn test_game_id_from_str_invalid() {
        assert!(GameId::from_str("invalid").is_err());
        assert!(GameId::from_str("888").is_err()); // Invalid octal digit
        assert!(GameId::from_str("").is_err());
    }

    #[test]
    fn test_game_id_serialization() {
        let id = GameId(0o12345);
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "\"12345\"");

        let deserialized: GameId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn test_game_id_deserialization_error() {
        let invalid_json = "123"; // Number instead of string
        let result: Result<GameId, _> = serde_json::from_str(invalid_json);
        assert!(result.is_err());
    }
}

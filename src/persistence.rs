//! Configuration persistence and file export/import
//!
//! Configuration survives in two places: a key-value store holding a single
//! JSON snapshot (so the setup survives a reload of the host surface), and
//! an exported file for backing up or sharing a game setup. Only
//! configuration persists; the in-progress play session never does.
//!
//! Exported files deliberately reduce teams to their names: scores never
//! leave the host, and importing regenerates every team with a fresh
//! identifier and a zero score.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::Branding, config::Category, team::Team};

/// Key under which the configuration snapshot is stored
pub const CONFIG_KEY: &str = "quizboardConfig";

/// Errors reported by a configuration store
///
/// Store failures are never fatal; the game continues in memory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying storage rejected the write or is unreachable
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors reported when loading a configuration file
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file is not parseable as a configuration at all
    #[error("the configuration file is invalid or corrupted: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The file parses but lacks a required field
    #[error("the configuration file is missing the required `{0}` field")]
    MissingField(&'static str),
}

/// A key-value store for the configuration snapshot
///
/// This is the seam to whatever storage the embedding surface provides
/// (browser local storage, a file on disk, ...). The core only ever uses a
/// single key.
pub trait ConfigStore {
    /// Reads the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the storage is unavailable; callers treat
    /// this as non-fatal.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value stored under `key`, if any
    fn remove(&mut self, key: &str);
}

/// An in-memory store, used by tests and headless setups
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The full configuration snapshot as stored in the key-value store
///
/// Wire shape: `{categories, teams, gameTitle, logoUrl, mainColor,
/// showLogo, logoPosition, logoSize}`. Branding fields are individually
/// defaulted, so partial snapshots still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    /// Categories in board-column order
    pub categories: Vec<Category>,
    /// Full team roster, identifiers and scores included
    pub teams: Vec<Team>,
    /// The game title
    pub game_title: String,
    /// Visual branding, flattened into the snapshot object
    #[serde(flatten)]
    pub branding: Branding,
}

/// Team shape used in exported files: the name and nothing else
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExportedTeam {
    name: String,
}

/// The shape of an exported/imported configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportedConfig {
    teams: Vec<ExportedTeam>,
    categories: Vec<Category>,
    game_title: String,
    #[serde(flatten)]
    branding: Branding,
}

/// Checks that the required top-level fields are present
fn require_fields(value: &serde_json::Value) -> Result<(), ImportError> {
    for field in ["categories", "teams", "gameTitle"] {
        if value.get(field).is_none() {
            return Err(ImportError::MissingField(field));
        }
    }
    Ok(())
}

/// Persists a snapshot to the store
///
/// A store failure is logged and swallowed: the worst case is losing the
/// saved setup on the next reload, never interrupting the running game.
pub fn save_snapshot(store: &mut impl ConfigStore, snapshot: &ConfigSnapshot) {
    let raw = serde_json::to_string(snapshot).expect("default serializer cannot fail");
    if let Err(e) = store.set(CONFIG_KEY, &raw) {
        log::warn!("could not persist configuration: {e}");
    }
}

/// Loads the snapshot from the store, if a valid one exists
///
/// A snapshot that fails to parse or lacks a required field is discarded
/// from the store so it cannot fail again on the next load; the caller
/// falls back to defaults.
pub fn load_snapshot(store: &mut impl ConfigStore) -> Option<ConfigSnapshot> {
    let raw = store.get(CONFIG_KEY)?;
    let parsed = serde_json::from_str::<serde_json::Value>(&raw)
        .map_err(ImportError::from)
        .and_then(|value| {
            require_fields(&value)?;
            Ok(serde_json::from_value::<ConfigSnapshot>(value)?)
        });
    match parsed {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::warn!("discarding corrupted configuration snapshot: {e}");
            store.remove(CONFIG_KEY);
            None
        }
    }
}

/// Serializes a snapshot as a downloadable configuration file
///
/// Teams are reduced to `{name}`; scores and identifiers never leave the
/// host.
pub fn export_config(snapshot: &ConfigSnapshot) -> String {
    let exported = ExportedConfig {
        teams: snapshot
            .teams
            .iter()
            .map(|team| ExportedTeam {
                name: team.name.clone(),
            })
            .collect_vec(),
        categories: snapshot.categories.clone(),
        game_title: snapshot.game_title.clone(),
        branding: snapshot.branding.clone(),
    };
    serde_json::to_string_pretty(&exported).expect("default serializer cannot fail")
}

/// Parses a configuration file into a snapshot
///
/// Teams are regenerated with fresh identifiers and zero scores. Missing
/// branding fields fall back to their defaults.
///
/// # Errors
///
/// Returns an `ImportError` if the file is not valid JSON or lacks any of
/// `categories`, `teams`, or `gameTitle`. Callers keep their current state
/// untouched on error.
pub fn import_config(raw: &str) -> Result<ConfigSnapshot, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    require_fields(&value)?;
    let exported: ExportedConfig = serde_json::from_value(value)?;

    Ok(ConfigSnapshot {
        categories: exported.categories,
        teams: exported
            .teams
            .into_iter()
            .map(|team| Team::new(team.name))
            .collect_vec(),
        game_title: exported.game_title,
        branding: exported.branding,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::Question;

    fn sample_snapshot() -> ConfigSnapshot {
        ConfigSnapshot {
            categories: vec![Category {
                name: "History".to_owned(),
                questions: vec![Question {
                    points: 100,
                    question: "Q1".to_owned(),
                    answer: "A1".to_owned(),
                }],
            }],
            teams: vec![Team::new("Team A"), Team::new("Team B")],
            game_title: "Quiz Night".to_owned(),
            branding: Branding::default(),
        }
    }

    #[test]
    fn test_snapshot_round_trip_through_store() {
        let mut store = MemoryStore::default();
        let snapshot = sample_snapshot();

        save_snapshot(&mut store, &snapshot);
        assert_eq!(load_snapshot(&mut store), Some(snapshot));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let raw = serde_json::to_string(&sample_snapshot()).unwrap();
        assert!(raw.contains("\"gameTitle\""));
        assert!(raw.contains("\"mainColor\""));
        assert!(raw.contains("\"logoPosition\":\"right\""));
    }

    #[test]
    fn test_corrupted_snapshot_is_discarded() {
        let mut store = MemoryStore::default();
        store.set(CONFIG_KEY, "{not json").unwrap();

        assert_eq!(load_snapshot(&mut store), None);
        // The corrupted value was removed so it cannot fail again
        assert_eq!(store.get(CONFIG_KEY), None);
    }

    #[test]
    fn test_snapshot_missing_required_field_is_discarded() {
        let mut store = MemoryStore::default();
        store
            .set(CONFIG_KEY, r#"{"categories": [], "teams": []}"#)
            .unwrap();

        assert_eq!(load_snapshot(&mut store), None);
        assert_eq!(store.get(CONFIG_KEY), None);
    }

    #[test]
    fn test_export_strips_scores_and_ids() {
        let mut snapshot = sample_snapshot();
        snapshot.teams[0].score = 500;

        let raw = export_config(&snapshot);
        assert!(!raw.contains("\"score\""));
        assert!(!raw.contains(&snapshot.teams[0].id.to_string()));
        assert!(raw.contains("Team A"));
    }

    #[test]
    fn test_import_round_trip_regenerates_teams() {
        let mut snapshot = sample_snapshot();
        snapshot.teams[0].score = 500;

        let imported = import_config(&export_config(&snapshot)).unwrap();

        assert_eq!(imported.categories, snapshot.categories);
        assert_eq!(imported.game_title, snapshot.game_title);
        assert_eq!(imported.teams.len(), 2);
        for (imported_team, original) in imported.teams.iter().zip(&snapshot.teams) {
            assert_eq!(imported_team.name, original.name);
            assert_eq!(imported_team.score, 0);
            assert_ne!(imported_team.id, original.id);
        }
    }

    #[test]
    fn test_import_rejects_missing_fields() {
        let raw = r#"{"teams": [{"name": "Team A"}], "gameTitle": "X"}"#;
        assert!(matches!(
            import_config(raw),
            Err(ImportError::MissingField("categories"))
        ));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(
            import_config("definitely not json"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_import_defaults_missing_branding() {
        let raw = r#"{
            "categories": [],
            "teams": [{"name": "Team A"}],
            "gameTitle": "Quiz Night"
        }"#;
        let imported = import_config(raw).unwrap();
        assert_eq!(imported.branding, Branding::default());
    }

    #[test]
    fn test_import_accepts_full_team_objects() {
        // A snapshot-shaped file still imports; extra team fields are
        // ignored and replaced
        let raw = serde_json::to_string(&sample_snapshot()).unwrap();
        let imported = import_config(&raw).unwrap();
        assert_eq!(imported.teams[0].name, "Team A");
        assert_eq!(imported.teams[0].score, 0);
    }
}

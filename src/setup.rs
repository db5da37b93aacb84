//! The setup phase: configuration editing and the game lifecycle boundary
//!
//! `Setup` is what the host works with before play starts and returns to
//! when a game ends: the editable category grid, the team roster, and the
//! branding. Every edit happens here; once a session starts, the session
//! owns a derived copy and the setup state stays untouched until the teams
//! come back with their final scores.

use garde::Validate;
use itertools::Itertools;

use crate::{
    board::Board,
    config::{Branding, Category, GameConfig, Question},
    constants,
    game::GameSession,
    persistence::{
        ConfigSnapshot, ConfigStore, ImportError, export_config, import_config, load_snapshot,
        save_snapshot,
    },
    team::{Team, TeamId},
};

/// The host's setup-phase state
///
/// Holds everything the configuration snapshot persists. Mutating methods
/// do not persist automatically; the embedding surface calls
/// [`Setup::save`] after each edit, mirroring how the snapshot is written
/// on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct Setup {
    config: GameConfig,
    teams: Vec<Team>,
    branding: Branding,
}

impl Default for Setup {
    /// The out-of-the-box setup: two placeholder teams, no categories
    fn default() -> Self {
        Self {
            config: GameConfig {
                title: constants::board::DEFAULT_TITLE.to_owned(),
                categories: Vec::new(),
            },
            teams: vec![Team::new("Team A"), Team::new("Team B")],
            branding: Branding::default(),
        }
    }
}

impl Setup {
    /// Creates the default setup
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the editable game configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the team roster
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Returns the visual branding
    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Returns the branding for editing
    pub fn branding_mut(&mut self) -> &mut Branding {
        &mut self.branding
    }

    /// Sets the game title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
    }

    /// Appends a team named after its position (`Team 3`, `Team 4`, ...)
    pub fn add_team(&mut self) -> TeamId {
        let team = Team::new(format!("Team {}", self.teams.len() + 1));
        let id = team.id;
        self.teams.push(team);
        id
    }

    /// Removes the team with the given ID, keeping its teammates' scores
    pub fn remove_team(&mut self, id: TeamId) {
        self.teams.retain(|team| team.id != id);
    }

    /// Renames the team with the given ID; unknown IDs are ignored
    pub fn rename_team(&mut self, id: TeamId, name: impl Into<String>) {
        if let Some(team) = self.teams.iter_mut().find(|team| team.id == id) {
            team.name = name.into();
        }
    }

    /// Appends an empty category named after its position
    pub fn add_category(&mut self) {
        self.config.categories.push(Category {
            name: format!("Category {}", self.config.categories.len() + 1),
            questions: Vec::new(),
        });
    }

    /// Removes the category at `index`; out-of-range indices are ignored
    pub fn remove_category(&mut self, index: usize) {
        if index < self.config.categories.len() {
            self.config.categories.remove(index);
        }
    }

    /// Renames the category at `index`; out-of-range indices are ignored
    pub fn rename_category(&mut self, index: usize, name: impl Into<String>) {
        if let Some(category) = self.config.categories.get_mut(index) {
            category.name = name.into();
        }
    }

    /// Appends an empty zero-point question to the category at `category`
    pub fn add_question(&mut self, category: usize) {
        if let Some(category) = self.config.categories.get_mut(category) {
            category.questions.push(Question {
                points: 0,
                question: String::new(),
                answer: String::new(),
            });
        }
    }

    /// Removes a question; out-of-range indices are ignored
    pub fn remove_question(&mut self, category: usize, question: usize) {
        if let Some(category) = self.config.categories.get_mut(category) {
            if question < category.questions.len() {
                category.questions.remove(question);
            }
        }
    }

    /// Replaces a question's content; out-of-range indices are ignored
    pub fn update_question(&mut self, category: usize, question: usize, content: Question) {
        if let Some(slot) = self
            .config
            .categories
            .get_mut(category)
            .and_then(|c| c.questions.get_mut(question))
        {
            *slot = content;
        }
    }

    /// Discards all edits and returns to the out-of-the-box defaults
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Validates the configuration against the size and content limits
    ///
    /// # Errors
    ///
    /// Returns the validation report if any limit is exceeded.
    pub fn validate(&self) -> Result<(), garde::Report> {
        self.config.validate()?;
        self.branding.validate()?;
        Ok(())
    }

    /// Captures the full setup state as a persistable snapshot
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            categories: self.config.categories.clone(),
            teams: self.teams.clone(),
            game_title: self.config.title.clone(),
            branding: self.branding.clone(),
        }
    }

    /// Restores setup state from a snapshot
    pub fn from_snapshot(snapshot: ConfigSnapshot) -> Self {
        Self {
            config: GameConfig {
                title: snapshot.game_title,
                categories: snapshot.categories,
            },
            teams: snapshot.teams,
            branding: snapshot.branding,
        }
    }

    /// Persists the current setup to the store
    ///
    /// Store failures are logged and swallowed; editing continues in memory.
    pub fn save(&self, store: &mut impl ConfigStore) {
        save_snapshot(store, &self.snapshot());
    }

    /// Loads setup state from the store, falling back to defaults
    ///
    /// An absent or corrupted snapshot yields the out-of-the-box setup; a
    /// corrupted one is additionally removed from the store.
    pub fn load(store: &mut impl ConfigStore) -> Self {
        load_snapshot(store).map_or_else(Self::default, Self::from_snapshot)
    }

    /// Serializes the setup as a configuration file for download
    ///
    /// Team scores and identifiers are stripped; see
    /// [`crate::persistence::export_config`].
    pub fn export(&self) -> String {
        export_config(&self.snapshot())
    }

    /// Replaces the setup with the contents of a configuration file
    ///
    /// Imported teams get fresh identifiers and zero scores.
    ///
    /// # Errors
    ///
    /// Returns an `ImportError` if the file is invalid; the current setup
    /// state is left untouched in that case.
    pub fn import(&mut self, raw: &str) -> Result<(), ImportError> {
        let snapshot = import_config(raw)?;
        *self = Self::from_snapshot(snapshot);
        Ok(())
    }

    /// Starts a play session from the current configuration
    ///
    /// The session gets a copy of the roster and a board derived from the
    /// categories, with every cell unplayed. The setup state itself is not
    /// consumed; it waits for [`Setup::end_game`].
    pub fn start_game(&self) -> GameSession {
        GameSession::new(
            self.teams.iter().cloned().collect_vec(),
            Board::from_categories(&self.config.categories),
        )
    }

    /// Ends a play session, taking the teams' final scores back into setup
    ///
    /// The board and its played flags are discarded with the session.
    pub fn end_game(&mut self, session: GameSession) {
        self.teams = session.into_teams();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::persistence::{CONFIG_KEY, MemoryStore};

    fn filled_setup() -> Setup {
        let mut setup = Setup::new();
        setup.set_title("Quiz Night");
        setup.add_category();
        setup.rename_category(0, "History");
        setup.add_question(0);
        setup.update_question(
            0,
            0,
            Question {
                points: 100,
                question: "Q1".to_owned(),
                answer: "A1".to_owned(),
            },
        );
        setup
    }

    #[test]
    fn test_default_setup_has_two_teams_and_no_categories() {
        let setup = Setup::new();
        assert_eq!(setup.teams()[0].name, "Team A");
        assert_eq!(setup.teams()[1].name, "Team B");
        assert!(setup.config().is_empty());
        assert_eq!(setup.config().title, "Jeopardy");
    }

    #[test]
    fn test_team_crud() {
        let mut setup = Setup::new();

        let id = setup.add_team();
        assert_eq!(setup.teams()[2].name, "Team 3");

        setup.rename_team(id, "The Experts");
        assert_eq!(setup.teams()[2].name, "The Experts");

        setup.remove_team(id);
        assert_eq!(setup.teams().len(), 2);

        // Unknown IDs are ignored
        setup.rename_team(TeamId::new(), "Nobody");
        assert_eq!(setup.teams().len(), 2);
    }

    #[test]
    fn test_category_and_question_crud() {
        let setup = filled_setup();
        assert_eq!(setup.config().categories[0].name, "History");
        assert_eq!(setup.config().categories[0].questions[0].points, 100);

        let mut setup = setup;
        setup.remove_question(0, 0);
        assert!(setup.config().categories[0].questions.is_empty());

        setup.remove_category(0);
        assert!(setup.config().is_empty());

        // Out-of-range edits are ignored
        setup.rename_category(5, "Ghost");
        setup.remove_question(5, 5);
        assert!(setup.config().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut setup = filled_setup();
        setup.branding_mut().show_logo = true;
        setup.reset_to_defaults();

        assert!(setup.config().is_empty());
        assert_eq!(setup.config().title, "Jeopardy");
        assert!(!setup.branding().show_logo);
        assert_eq!(setup.teams().len(), 2);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut store = MemoryStore::default();
        let setup = filled_setup();

        setup.save(&mut store);
        assert_eq!(Setup::load(&mut store), setup);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let mut store = MemoryStore::default();
        assert_eq!(Setup::load(&mut store), Setup::default());

        store.set(CONFIG_KEY, "{broken").unwrap();
        assert_eq!(Setup::load(&mut store), Setup::default());
    }

    #[test]
    fn test_export_import_round_trip_regenerates_teams() {
        let mut exported_from = filled_setup();
        exported_from.rename_team(exported_from.teams()[0].id, "The Experts");

        let mut imported_into = Setup::new();
        imported_into.import(&exported_from.export()).unwrap();

        assert_eq!(imported_into.config(), exported_from.config());
        assert_eq!(imported_into.branding(), exported_from.branding());
        assert_eq!(imported_into.teams()[0].name, "The Experts");
        assert_eq!(imported_into.teams()[0].score, 0);
        assert_ne!(imported_into.teams()[0].id, exported_from.teams()[0].id);
    }

    #[test]
    fn test_failed_import_leaves_state_untouched() {
        let mut setup = filled_setup();
        let before = setup.clone();

        assert!(setup.import("not a config").is_err());
        assert!(setup.import(r#"{"teams": [], "gameTitle": "X"}"#).is_err());
        assert_eq!(setup, before);
    }

    #[test]
    fn test_validation_catches_oversized_config() {
        let mut setup = filled_setup();
        assert!(setup.validate().is_ok());

        setup.set_title("t".repeat(500));
        assert!(setup.validate().is_err());
    }

    #[test]
    fn test_game_round_trip_carries_scores_back() {
        let mut setup = filled_setup();
        let team1 = setup.teams()[0].id;

        let mut session = setup.start_game();
        let channel = crate::channel::InProcessChannel::new();
        let endpoint = channel.subscribe(crate::game_id::GameId::new());

        session.select_cell(0, 0, &endpoint);
        session.reveal_answer(&endpoint);
        session.award_points(team1, 100);
        session.close(&endpoint);

        setup.end_game(session);
        assert_eq!(setup.teams()[0].score, 100);

        // A fresh session starts with a clean board
        let next = setup.start_game();
        assert!(!next.board().cell(0, 0).unwrap().played());
    }
}

//! Configuration constants for the quizboard game system
//!
//! This module contains all the configuration limits and constraints
//! used throughout the game system to ensure data integrity and
//! provide consistent boundaries for different game components.

/// Board layout configuration constants
pub mod board {
    /// Default game title applied when none is configured
    pub const DEFAULT_TITLE: &str = "Jeopardy";
    /// Maximum number of categories (board columns) in a single game
    pub const MAX_CATEGORY_COUNT: usize = 30;
    /// Maximum number of questions within a single category
    pub const MAX_QUESTION_COUNT: usize = 30;
    /// Maximum length of a game title in characters
    pub const MAX_TITLE_LENGTH: usize = 200;
    /// Maximum length of a category name in characters
    pub const MAX_CATEGORY_NAME_LENGTH: usize = 200;
}

/// Question content configuration constants
pub mod question {
    /// Maximum length of question and answer text in characters
    pub const MAX_TEXT_LENGTH: usize = 500;
    /// Minimum point value of a question
    pub const MIN_POINTS: i64 = 0;
    /// Maximum point value of a question
    pub const MAX_POINTS: i64 = 1_000_000;
}

/// Team roster configuration constants
pub mod team {
    /// Maximum number of scoring teams in a single game
    pub const MAX_TEAM_COUNT: usize = 100;
    /// Maximum length of a team name in characters
    pub const MAX_NAME_LENGTH: usize = 100;
}

/// Branding defaults shared by both surfaces
pub mod branding {
    /// Default accent color applied when none is configured
    pub const DEFAULT_MAIN_COLOR: &str = "#ad4d42";
    /// Default logo height in pixels
    pub const DEFAULT_LOGO_SIZE: u32 = 80;
    /// Maximum length of a logo URL in characters
    pub const MAX_LOGO_URL_LENGTH: usize = 2000;
}

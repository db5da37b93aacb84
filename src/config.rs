//! Game configuration and question management
//!
//! This module defines the setup-phase data that describes a game before
//! play begins: the categories and their point-valued questions, the game
//! title, and the visual branding shared by both surfaces. Configuration is
//! editable only during the setup phase; once play starts, the board is
//! derived from it and the configuration itself is no longer touched.

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::constants;

/// A single question inside a category
///
/// Questions are immutable once play starts; edits happen only through the
/// setup-phase editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Point value awarded for this question
    #[garde(range(min = constants::question::MIN_POINTS, max = constants::question::MAX_POINTS))]
    pub points: i64,
    /// The question text shown on the host console
    #[garde(length(max = constants::question::MAX_TEXT_LENGTH))]
    pub question: String,
    /// The answer text, revealed by the host
    #[garde(length(max = constants::question::MAX_TEXT_LENGTH))]
    pub answer: String,
}

/// A named category holding an ordered sequence of questions
///
/// The order of questions is meaningful: it is the top-to-bottom order of
/// the board column derived from this category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Display name of the category (board column header)
    #[garde(length(max = constants::board::MAX_CATEGORY_NAME_LENGTH))]
    pub name: String,
    /// Questions in board-column order
    #[garde(length(max = constants::board::MAX_QUESTION_COUNT), dive)]
    pub questions: Vec<Question>,
}

/// Where the logo sits relative to the game title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPosition {
    /// Logo aligned to the left edge
    Left,
    /// Logo centered above the title
    Center,
    /// Logo aligned to the right edge (the default)
    #[default]
    Right,
}

fn default_main_color() -> String {
    constants::branding::DEFAULT_MAIN_COLOR.to_owned()
}

fn default_logo_size() -> u32 {
    constants::branding::DEFAULT_LOGO_SIZE
}

/// Visual branding applied to both surfaces
///
/// Every field carries a serde default so that snapshots and imported
/// configuration files written before a field existed still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    /// URL of the logo image; empty means no logo
    #[serde(default)]
    #[garde(length(max = constants::branding::MAX_LOGO_URL_LENGTH))]
    pub logo_url: String,
    /// Accent color as a CSS color string
    #[serde(default = "default_main_color")]
    #[garde(skip)]
    pub main_color: String,
    /// Whether the logo is displayed at all
    #[serde(default)]
    #[garde(skip)]
    pub show_logo: bool,
    /// Placement of the logo relative to the title
    #[serde(default)]
    #[garde(skip)]
    pub logo_position: LogoPosition,
    /// Logo height in pixels
    #[serde(default = "default_logo_size")]
    #[garde(skip)]
    pub logo_size: u32,
}

impl Default for Branding {
    /// Branding with no logo and the default accent color
    fn default() -> Self {
        Self {
            logo_url: String::new(),
            main_color: default_main_color(),
            show_logo: false,
            logo_position: LogoPosition::default(),
            logo_size: default_logo_size(),
        }
    }
}

/// The complete editable game configuration
///
/// This is the static part of a game: the title and the category grid.
/// Teams are kept separately in the roster since they carry play state
/// (scores) that outlives individual configuration edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GameConfig {
    /// The game title shown on both surfaces
    #[garde(length(max = constants::board::MAX_TITLE_LENGTH))]
    pub title: String,
    /// Categories in board-column order
    #[garde(length(max = constants::board::MAX_CATEGORY_COUNT), dive)]
    pub categories: Vec<Category>,
}

impl GameConfig {
    /// Returns the number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Checks whether the configuration contains any categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

//! The play-time board derived from the configuration
//!
//! At game start every category is deep-copied into a column of
//! [`BoardCell`]s, each carrying a `played` flag alongside the question
//! content. The flag starts `false`, flips to `true` exactly once at
//! scoring time, and never reverts: a played cell can never become the
//! active question again.

use serde::{Deserialize, Serialize};

use crate::config::Category;

/// One playable cell on the board
///
/// A cell is a snapshot of its question taken at game start, plus the
/// monotonic `played` flag. The flag is private so that only the lifecycle
/// transitions in [`crate::game`] can flip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    /// Point value of this cell
    pub points: i64,
    /// The question text
    pub question: String,
    /// The answer text
    pub answer: String,
    /// Whether this cell has been scored (monotonic, false to true once)
    played: bool,
}

impl BoardCell {
    /// Returns whether this cell has already been played
    pub fn played(&self) -> bool {
        self.played
    }
}

/// One column of the board: a category header plus its cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    /// The category name shown as the column header
    pub name: String,
    cells: Vec<BoardCell>,
}

impl BoardColumn {
    /// Returns the cells of this column in board order
    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }
}

/// The full play-time grid, one column per category
///
/// The board is derived once at game start and discarded when the host
/// returns to setup; it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<BoardColumn>,
}

impl Board {
    /// Derives a fresh board from the configured categories
    ///
    /// Every cell starts unplayed regardless of any previous session.
    ///
    /// # Arguments
    ///
    /// * `categories` - The setup-phase categories in board-column order
    pub fn from_categories(categories: &[Category]) -> Self {
        Self {
            columns: categories
                .iter()
                .map(|category| BoardColumn {
                    name: category.name.clone(),
                    cells: category
                        .questions
                        .iter()
                        .map(|q| BoardCell {
                            points: q.points,
                            question: q.question.clone(),
                            answer: q.answer.clone(),
                            played: false,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Returns the columns of the board in category order
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Looks up a cell by category and question index
    ///
    /// # Returns
    ///
    /// The cell if both indices are in range, otherwise `None`
    pub fn cell(&self, category: usize, question: usize) -> Option<&BoardCell> {
        self.columns.get(category)?.cells.get(question)
    }

    /// Marks a cell as played
    ///
    /// Idempotent after the first call; the flag never reverts. Out-of-range
    /// indices are ignored.
    pub(crate) fn mark_played(&mut self, category: usize, question: usize) {
        if let Some(cell) = self
            .columns
            .get_mut(category)
            .and_then(|column| column.cells.get_mut(question))
        {
            cell.played = true;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::Question;

    fn history_board() -> Board {
        Board::from_categories(&[Category {
            name: "History".to_owned(),
            questions: vec![
                Question {
                    points: 100,
                    question: "Q1".to_owned(),
                    answer: "A1".to_owned(),
                },
                Question {
                    points: 200,
                    question: "Q2".to_owned(),
                    answer: "A2".to_owned(),
                },
            ],
        }])
    }

    #[test]
    fn test_cells_start_unplayed() {
        let board = history_board();
        assert!(!board.cell(0, 0).unwrap().played());
        assert!(!board.cell(0, 1).unwrap().played());
    }

    #[test]
    fn test_cell_lookup_out_of_range() {
        let board = history_board();
        assert!(board.cell(1, 0).is_none());
        assert!(board.cell(0, 2).is_none());
    }

    #[test]
    fn test_mark_played_is_monotonic_and_idempotent() {
        let mut board = history_board();

        board.mark_played(0, 0);
        assert!(board.cell(0, 0).unwrap().played());

        // A second call changes nothing
        board.mark_played(0, 0);
        assert!(board.cell(0, 0).unwrap().played());

        // The neighbouring cell is untouched
        assert!(!board.cell(0, 1).unwrap().played());
    }

    #[test]
    fn test_mark_played_out_of_range_is_ignored() {
        let mut board = history_board();
        board.mark_played(5, 5);
        assert!(!board.cell(0, 0).unwrap().played());
    }

    #[test]
    fn test_board_copies_question_content() {
        let board = history_board();
        let cell = board.cell(0, 1).unwrap();
        assert_eq!(cell.points, 200);
        assert_eq!(cell.question, "Q2");
        assert_eq!(cell.answer, "A2");
    }
}

//! Core game session and the question lifecycle state machine
//!
//! This module owns the authoritative play-time state: the scoring teams,
//! the board of played/unplayed cells, and the single active question, if
//! any. All mutation happens through the lifecycle transitions defined
//! here, whether triggered by a local host action or by a remote-control
//! message from the audience surface. The audience holds no authoritative
//! state of its own, so there is exactly one mutable copy of the session
//! in the whole system.

use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    channel::Endpoint,
    protocol::{AudienceMessage, HostMessage},
    team::{Team, TeamId},
};

/// The lifecycle state of the question flow
///
/// Derived on demand from `(board, active_question)` rather than stored:
/// an illegal combination of state and data is unrepresentable, and
/// invariant I2 (an active question exists iff the state is
/// `QuestionShown` or `AnswerRevealed`) holds structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// No question is in flight
    Idle,
    /// A question is open, its answer still hidden
    QuestionShown,
    /// The answer is revealed and awards may be given
    AnswerRevealed,
}

/// The single currently selected, in-flight question
///
/// At most one of these exists at any time; it is created when the host
/// selects an unplayed cell and destroyed when the question closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuestion {
    /// Index of the cell's category (board column)
    pub category_index: usize,
    /// Index of the cell within its column
    pub question_index: usize,
    /// Point value of the question
    pub points: i64,
    /// The question text
    pub question: String,
    /// The answer text
    pub answer: String,
    /// Whether the answer has been revealed yet
    revealed: bool,
}

impl ActiveQuestion {
    /// Returns whether the answer has been revealed
    pub fn revealed(&self) -> bool {
        self.revealed
    }
}

/// Local UI events raised on the host console itself
#[derive(Debug, Clone, PartialEq)]
pub enum LocalEvent {
    /// The host clicked a board cell
    SelectCell {
        /// Index of the cell's category
        category: usize,
        /// Index of the cell within its column
        question: usize,
    },
    /// The host revealed the answer
    RevealAnswer,
    /// The host awarded points to a team
    AwardPoints {
        /// The team being awarded
        team: TeamId,
        /// Points to add to that team's score
        points: i64,
    },
    /// The host closed the question
    Close,
}

/// The tagged union of everything that can drive a transition
///
/// Local UI events and remote protocol messages feed the same state
/// machine through [`GameSession::receive_event`], so transition logic is
/// independent of where an action originated.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum HostEvent {
    /// An event raised locally on the host console
    Local(LocalEvent),
    /// A remote-control message received from the audience surface
    Remote(AudienceMessage),
}

/// The authoritative play-time state, owned exclusively by the host
///
/// Created at game start from the setup-phase configuration, destroyed
/// when the host returns to setup. Transition methods take the host's
/// channel endpoint so that every externally visible change is broadcast
/// to the audience surface as a side effect of the transition itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    teams: Vec<Team>,
    board: Board,
    active: Option<ActiveQuestion>,
}

impl GameSession {
    /// Creates a session from a team roster and a freshly derived board
    ///
    /// # Arguments
    ///
    /// * `teams` - The scoring teams, carried over from setup
    /// * `board` - The board derived from the configured categories
    pub fn new(teams: Vec<Team>, board: Board) -> Self {
        Self {
            teams,
            board,
            active: None,
        }
    }

    /// Derives the current lifecycle state
    pub fn state(&self) -> LifecycleState {
        match &self.active {
            None => LifecycleState::Idle,
            Some(active) if active.revealed => LifecycleState::AnswerRevealed,
            Some(_) => LifecycleState::QuestionShown,
        }
    }

    /// Returns the scoring teams
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Returns the play-time board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the active question, if one is in flight
    pub fn active_question(&self) -> Option<&ActiveQuestion> {
        self.active.as_ref()
    }

    /// Consumes the session, handing the teams back to the setup phase
    ///
    /// The board and any active question are discarded; only team scores
    /// survive the return to setup.
    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }

    /// Announces the game to the audience surface
    ///
    /// Sends `GameStart` with the current team list. Called when play
    /// begins, and may be called again by the host to bring a late-joining
    /// or reloaded audience surface up to date; there is no automatic
    /// replay.
    pub fn announce_start(&self, endpoint: &impl Endpoint) {
        endpoint.publish(
            HostMessage::GameStart {
                teams: self.teams.clone(),
            }
            .to_message(),
        );
    }

    /// Feeds one inbound event into the state machine
    ///
    /// Local UI events and remote protocol messages are dispatched to the
    /// same transition handlers; the handlers' guards decide whether the
    /// event has any effect.
    ///
    /// # Arguments
    ///
    /// * `event` - The event to dispatch
    /// * `endpoint` - The host's channel endpoint for outbound notifications
    pub fn receive_event(&mut self, event: HostEvent, endpoint: &impl Endpoint) {
        match event {
            HostEvent::Local(LocalEvent::SelectCell { category, question }) => {
                self.select_cell(category, question, endpoint);
            }
            HostEvent::Local(LocalEvent::RevealAnswer)
            | HostEvent::Remote(AudienceMessage::ShowAnswerInMain {}) => {
                self.reveal_answer(endpoint);
            }
            HostEvent::Local(LocalEvent::AwardPoints { team, points })
            | HostEvent::Remote(AudienceMessage::AwardPoints {
                team_id: team,
                points,
            }) => {
                self.award_points(team, points);
            }
            HostEvent::Local(LocalEvent::Close)
            | HostEvent::Remote(AudienceMessage::CloseModal {}) => {
                self.close(endpoint);
            }
        }
    }

    /// Drains the host's endpoint, dispatching audience messages
    ///
    /// Unparseable messages are dropped; the channel gives no delivery
    /// guarantees, so a malformed message is treated the same as a lost one.
    pub fn drain_channel(&mut self, endpoint: &impl Endpoint) {
        while let Some(raw) = endpoint.poll() {
            match AudienceMessage::from_message(&raw) {
                Ok(message) => self.receive_event(HostEvent::Remote(message), endpoint),
                Err(e) => log::debug!("dropping malformed audience message: {e}"),
            }
        }
    }

    /// Transition: Idle → QuestionShown
    ///
    /// Selecting a cell that does not exist, is already played, or while
    /// another question is in flight is a silent no-op. On success the
    /// cell's content becomes the active question and the audience is
    /// notified with the full payload, answer text included.
    pub fn select_cell(&mut self, category: usize, question: usize, endpoint: &impl Endpoint) {
        if self.active.is_some() {
            log::debug!("select_cell ignored: a question is already active");
            return;
        }
        let Some(cell) = self.board.cell(category, question) else {
            log::debug!("select_cell ignored: no cell at ({category}, {question})");
            return;
        };
        if cell.played() {
            log::debug!("select_cell ignored: cell ({category}, {question}) already played");
            return;
        }

        self.active = Some(ActiveQuestion {
            category_index: category,
            question_index: question,
            points: cell.points,
            question: cell.question.clone(),
            answer: cell.answer.clone(),
            revealed: false,
        });

        endpoint.publish(
            HostMessage::ShowQuestion {
                answer: cell.answer.clone(),
                points: cell.points,
                teams: self.teams.clone(),
            }
            .to_message(),
        );
    }

    /// Transition: QuestionShown → AnswerRevealed
    ///
    /// A no-op unless a question is open with its answer still hidden.
    pub fn reveal_answer(&mut self, endpoint: &impl Endpoint) {
        match &mut self.active {
            Some(active) if !active.revealed => {
                active.revealed = true;
                endpoint.publish(HostMessage::ShowAwardUi {}.to_message());
            }
            _ => log::debug!("reveal_answer ignored: no hidden answer to reveal"),
        }
    }

    /// Transition: AnswerRevealed → AnswerRevealed (self-loop)
    ///
    /// Adds `points` to the team's score and marks the active cell as
    /// played. The played flag is idempotent after the first award; the
    /// score mutation is not, so awarding twice accumulates. An unknown
    /// team ID skips the score mutation but still marks the cell played.
    /// Outside `AnswerRevealed` (including after a stale close) this is a
    /// silent no-op.
    pub fn award_points(&mut self, team: TeamId, points: i64) {
        let Some(active) = &self.active else {
            log::debug!("award_points ignored: no active question");
            return;
        };
        if !active.revealed {
            log::debug!("award_points ignored: answer not revealed yet");
            return;
        }

        match self.teams.iter_mut().find(|t| t.id == team) {
            Some(team) => team.score += points,
            None => log::debug!("award_points: unknown team {team}, cell still marked played"),
        }

        self.board
            .mark_played(active.category_index, active.question_index);
    }

    /// Transition: QuestionShown or AnswerRevealed → Idle
    ///
    /// Clears the active question and tells the audience to reset its
    /// display. Closing while already idle is a no-op and sends nothing.
    pub fn close(&mut self, endpoint: &impl Endpoint) {
        if self.active.take().is_some() {
            endpoint.publish(HostMessage::ClearAnswer {}.to_message());
        }
    }
}

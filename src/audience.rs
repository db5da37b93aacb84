//! The audience surface: a thin mirror plus a remote control
//!
//! The audience view holds no authoritative state. Its team list and cached
//! question are presentation-only copies, fully replaced by every relevant
//! inbound message and never merged or diffed against history. If the
//! surface reloads mid-game it simply stays blank until the next message
//! arrives. Its outbound messages do not mutate anything locally; they are
//! requests the host's state machine is free to ignore.

use serde::{Deserialize, Serialize};

use crate::{
    channel::Endpoint,
    protocol::{AudienceMessage, HostMessage},
    team::{Team, TeamId},
};

/// What the audience surface currently displays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum AudienceDisplay {
    /// Nothing in flight; the idle display
    #[default]
    Idle,
    /// A question is open on the host; the answer is cached but hidden
    AnswerHidden {
        /// The cached answer text, not yet shown
        answer: String,
        /// Point value of the open question
        points: i64,
    },
    /// The answer is shown together with per-team award buttons
    AwardSelection {
        /// The revealed answer text
        answer: String,
        /// Points each award button will send
        points: i64,
    },
}

/// Presentation state of the audience surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudienceView {
    teams: Vec<Team>,
    display: AudienceDisplay,
}

impl AudienceView {
    /// Creates a blank view, as after a fresh load of the surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mirrored team list
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Returns the current display state
    pub fn display(&self) -> &AudienceDisplay {
        &self.display
    }

    /// Applies one inbound host message
    ///
    /// Each message fully replaces the local copies it touches. A
    /// `ShowAwardUI` arriving with no cached question (for example after a
    /// mid-game reload) is ignored, since there is nothing to reveal.
    pub fn apply(&mut self, message: HostMessage) {
        match message {
            HostMessage::GameStart { teams } => {
                self.teams = teams;
            }
            HostMessage::ShowQuestion {
                answer,
                points,
                teams,
            } => {
                self.teams = teams;
                self.display = AudienceDisplay::AnswerHidden { answer, points };
            }
            HostMessage::ShowAwardUi {} => {
                if let AudienceDisplay::AnswerHidden { answer, points } = &self.display {
                    self.display = AudienceDisplay::AwardSelection {
                        answer: answer.clone(),
                        points: *points,
                    };
                } else {
                    log::debug!("ShowAwardUI ignored: no cached question to reveal");
                }
            }
            HostMessage::ClearAnswer {} => {
                self.display = AudienceDisplay::Idle;
            }
        }
    }

    /// Drains the audience's endpoint, applying host messages
    ///
    /// Unparseable messages are dropped, the same as lost ones.
    pub fn drain_channel(&mut self, endpoint: &impl Endpoint) {
        while let Some(raw) = endpoint.poll() {
            match HostMessage::from_message(&raw) {
                Ok(message) => self.apply(message),
                Err(e) => log::debug!("dropping malformed host message: {e}"),
            }
        }
    }

    /// Remote control: ask the host to reveal the answer
    pub fn request_reveal(&self, endpoint: &impl Endpoint) {
        endpoint.publish(AudienceMessage::ShowAnswerInMain {}.to_message());
    }

    /// Remote control: award the open question's points to a team
    ///
    /// Only meaningful while award buttons are displayed; otherwise nothing
    /// is sent. The points come from the cached payload, mirroring the
    /// buttons the surface renders.
    pub fn award(&self, team: TeamId, endpoint: &impl Endpoint) {
        if let AudienceDisplay::AwardSelection { points, .. } = &self.display {
            endpoint.publish(
                AudienceMessage::AwardPoints {
                    team_id: team,
                    points: *points,
                }
                .to_message(),
            );
        } else {
            log::debug!("award ignored: no award buttons displayed");
        }
    }

    /// Remote control: ask the host to close the active question
    pub fn request_close(&self, endpoint: &impl Endpoint) {
        endpoint.publish(AudienceMessage::CloseModal {}.to_message());
    }
}

//! Sync protocol messages exchanged between the two surfaces
//!
//! A single broadcast channel scoped to one game carries discrete,
//! self-contained notifications: host-to-audience messages mirror the
//! externally visible lifecycle state, audience-to-host messages act as a
//! remote control driving host-side transitions. There is no
//! request/response correlation and no acknowledgement; every message is a
//! full replacement of whatever the receiver held before, never a diff.
//!
//! On the wire each message is a JSON envelope `{"type": ..., "payload": ...}`.

use serde::{Deserialize, Serialize};

use crate::team::{Team, TeamId};

/// Messages broadcast from the host console to the audience surface
///
/// The audience surface is host-trusted, not player-trusted: answer text is
/// included as soon as a question is shown, since the surface decides for
/// itself when to reveal it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all_fields = "camelCase")]
pub enum HostMessage {
    /// The host started a game; the audience initializes its team list
    GameStart {
        /// Full replacement for the audience's team list
        teams: Vec<Team>,
    },
    /// A question was opened; the audience enters its answer-hidden state
    ShowQuestion {
        /// The answer text, cached but not yet displayed
        answer: String,
        /// Point value of the open question
        points: i64,
        /// Full replacement for the audience's team list
        teams: Vec<Team>,
    },
    /// The answer was revealed; the audience shows it with award buttons
    #[serde(rename = "ShowAwardUI")]
    ShowAwardUi {},
    /// The question was closed; the audience resets to its idle display
    ClearAnswer {},
}

/// Messages sent from the audience surface back to the host
///
/// These carry no authority of their own: each one is fed into the host's
/// lifecycle state machine, which applies its usual guards. A stale message
/// arriving after the relevant transition already happened is silently
/// dropped by those guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all_fields = "camelCase")]
pub enum AudienceMessage {
    /// Award points to a team for the currently active question
    AwardPoints {
        /// The team being awarded
        team_id: TeamId,
        /// Points to add to that team's score
        points: i64,
    },
    /// Close the active question and return the host to idle
    CloseModal {},
    /// Reveal the answer on the host console
    ShowAnswerInMain {},
}

impl HostMessage {
    /// Converts the message to a JSON envelope for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }

    /// Parses a message from a received JSON envelope
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the envelope is malformed or its
    /// type tag is unknown.
    pub fn from_message(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl AudienceMessage {
    /// Converts the message to a JSON envelope for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }

    /// Parses a message from a received JSON envelope
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the envelope is malformed or its
    /// type tag is unknown.
    pub fn from_message(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

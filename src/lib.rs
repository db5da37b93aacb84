//! # Quizboard Game Library
//!
//! This library provides the core logic for a Jeopardy-style quiz game
//! played across two surfaces: a host console that owns all authoritative
//! state, and an audience display that mirrors it. It covers the question
//! lifecycle state machine, team scoring, the sync protocol between the
//! surfaces, and setup-phase configuration with persistence.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

pub mod constants;

pub mod audience;
pub mod board;
pub mod channel;
pub mod config;
pub mod game;
pub mod game_id;
pub mod persistence;
pub mod protocol;
pub mod setup;
pub mod team;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{
        audience::{AudienceDisplay, AudienceView},
        channel::InProcessChannel,
        config::Question,
        game::LifecycleState,
        game_id::GameId,
        setup::Setup,
    };

    /// Plays one full question across both surfaces, pumping the channel
    /// in both directions the way the two event loops would.
    #[test]
    fn test_cross_surface_question_round() {
        let mut setup = Setup::new();
        setup.add_category();
        setup.add_question(0);
        setup.update_question(
            0,
            0,
            Question {
                points: 300,
                question: "Q1".to_owned(),
                answer: "A1".to_owned(),
            },
        );

        let channel = InProcessChannel::new();
        let topic = GameId::new();
        let host_endpoint = channel.subscribe(topic);
        let audience_endpoint = channel.subscribe(topic);

        let mut session = setup.start_game();
        let mut view = AudienceView::new();

        session.announce_start(&host_endpoint);
        view.drain_channel(&audience_endpoint);
        assert_eq!(view.teams().len(), 2);

        // Host opens a question; the audience caches the hidden answer
        session.select_cell(0, 0, &host_endpoint);
        view.drain_channel(&audience_endpoint);
        assert_eq!(
            view.display(),
            &AudienceDisplay::AnswerHidden {
                answer: "A1".to_owned(),
                points: 300
            }
        );

        // The audience acts as remote control: reveal, then award
        view.request_reveal(&audience_endpoint);
        session.drain_channel(&host_endpoint);
        assert_eq!(session.state(), LifecycleState::AnswerRevealed);

        view.drain_channel(&audience_endpoint);
        assert!(matches!(
            view.display(),
            AudienceDisplay::AwardSelection { .. }
        ));

        let team1 = view.teams()[0].id;
        view.award(team1, &audience_endpoint);
        view.request_close(&audience_endpoint);
        session.drain_channel(&host_endpoint);

        assert_eq!(session.teams()[0].score, 300);
        assert!(session.board().cell(0, 0).unwrap().played());
        assert_eq!(session.state(), LifecycleState::Idle);

        view.drain_channel(&audience_endpoint);
        assert_eq!(view.display(), &AudienceDisplay::Idle);

        // Scores flow back into setup when the game ends
        setup.end_game(session);
        assert_eq!(setup.teams()[0].score, 300);
    }
}

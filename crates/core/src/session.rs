use crate::{
    Deck, DeckError, GameRules, PackId, PlayerId, Player, PromptCard, RngState, VenueId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod lifecycle;
mod roster;
mod round;

pub use roster::Removal;
pub use round::SubmitProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Lobby,
    PackSelection,
    Playing,
    Judging,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// One round, then the session ends.
    Quick,
    /// First player to reach the target score wins.
    Scored,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("that action is not allowed in the {0:?} phase")]
    InvalidPhase(Phase),
    #[error("you are not allowed to do that")]
    Unauthorized,
    #[error("that player is not in this session")]
    NotInSession,
    #[error("already joined this session")]
    AlreadyJoined,
    #[error("already submitted this round")]
    AlreadySubmitted,
    #[error("the czar judges this round and does not submit")]
    IsCzar,
    #[error("no such card in hand")]
    InvalidCardReference,
    #[error("pick a number between 1 and {0}")]
    InvalidPickIndex(usize),
    #[error("at least {0} players are required")]
    BelowMinimumPlayers(usize),
    #[error("target score must be between 1 and {0}")]
    InvalidTargetScore(u32),
    #[error("unknown pack '{0}'")]
    UnknownPack(PackId),
    #[error("a session is already running in this venue")]
    VenueBusy,
    #[error("no session is running in this venue")]
    NoSession,
    #[error(transparent)]
    ContentExhausted(#[from] DeckError),
}

/// A finalized set of response cards for the current prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub player: PlayerId,
    pub cards: Vec<String>,
}

/// One game for one venue: roster, czar rotation, deck, and the state of the
/// round in flight. Every mutation comes in through a method that validates
/// first and leaves the session untouched when it rejects.
#[derive(Debug, Clone)]
pub struct Session {
    pub venue: VenueId,
    pub host: PlayerId,
    pub mode: Mode,
    pub target_score: u32,
    pub rules: GameRules,
    pub phase: Phase,
    pub round: u32,
    players: Vec<Player>,
    czar_order: Vec<PlayerId>,
    czar_index: usize,
    prompt: Option<PromptCard>,
    submissions: Vec<Submission>,
    display_order: Vec<PlayerId>,
    deck: Option<Deck>,
    selected_packs: Vec<PackId>,
    rng: RngState,
}

impl Session {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn prompt(&self) -> Option<&PromptCard> {
        self.prompt.as_ref()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Submitter identities in the randomized order shown to the czar.
    /// Presentation layers must not leak this mapping to players.
    pub fn display_order(&self) -> &[PlayerId] {
        &self.display_order
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn selected_packs(&self) -> &[PackId] {
        &self.selected_packs
    }

    pub fn czar_order(&self) -> &[PlayerId] {
        &self.czar_order
    }
}

use crate::{PackId, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    TargetReached,
    QuickRoundComplete,
    HostEnded,
    TooFewPlayers,
    ContentExhausted,
}

/// Everything the transport needs to narrate a state transition. One player
/// action can cascade (a submit may start judging, a pick may end the game),
/// so a single call can emit several of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PlayerJoined {
        player: PlayerId,
        name: String,
        seated: usize,
    },
    PlayerLeft {
        player: PlayerId,
        name: String,
    },
    PackSelectionStarted,
    PacksSelected {
        packs: Vec<PackId>,
        prompts: usize,
        responses: usize,
    },
    RoundStarted {
        round: u32,
        czar: PlayerId,
        prompt: String,
        pick: u8,
    },
    CardChosen {
        player: PlayerId,
        remaining: u8,
    },
    SubmissionLocked {
        player: PlayerId,
        waiting_on: Vec<PlayerId>,
    },
    PendingReturned {
        player: PlayerId,
        count: usize,
    },
    JudgingStarted {
        submissions: usize,
    },
    WinnerPicked {
        player: PlayerId,
        cards: Vec<String>,
        score: u32,
    },
    CzarSkipped {
        czar: PlayerId,
    },
    RoundAborted {
        czar: PlayerId,
    },
    GameOver {
        reason: GameOverReason,
        winner: Option<PlayerId>,
        scoreboard: Vec<ScoreEntry>,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}

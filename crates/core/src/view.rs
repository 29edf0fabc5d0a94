use crate::{GameError, Mode, Phase, PlayerId, Session};
use serde::Serialize;

/// Roster line safe to show to everyone.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatus {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub is_czar: bool,
    pub submitted: bool,
}

/// Public snapshot of a session. Contains nothing a player should not see:
/// no hands, no pending picks, no submission authorship.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub phase: Phase,
    pub mode: Mode,
    pub round: u32,
    pub target_score: u32,
    pub czar: Option<PlayerId>,
    pub prompt: Option<String>,
    pub pick: Option<u8>,
    pub players: Vec<PlayerStatus>,
    pub waiting_on: Vec<String>,
    pub responses_left: usize,
    pub prompts_left: usize,
}

/// Private snapshot for one player.
#[derive(Debug, Clone, Serialize)]
pub struct HandView {
    pub player: PlayerId,
    pub hand: Vec<String>,
    pub pending: Vec<String>,
    pub submitted: Option<Vec<String>>,
}

/// Anonymized submissions in display order, for the czar to judge.
/// Positions are 1-based when shown to users.
#[derive(Debug, Clone, Serialize)]
pub struct JudgingView {
    pub prompt: String,
    pub pick: u8,
    pub entries: Vec<Vec<String>>,
}

impl Session {
    pub fn status_view(&self) -> StatusView {
        let czar = self.czar_id();
        let waiting_on = if self.phase == Phase::Playing {
            self.waiting_on()
                .into_iter()
                .filter_map(|id| self.player(id).map(|player| player.name.clone()))
                .collect()
        } else {
            Vec::new()
        };
        StatusView {
            phase: self.phase,
            mode: self.mode,
            round: self.round,
            target_score: self.target_score,
            czar,
            prompt: self.prompt().map(|prompt| prompt.text.clone()),
            pick: self.prompt().map(|prompt| prompt.pick),
            players: self
                .players()
                .iter()
                .map(|player| PlayerStatus {
                    id: player.id,
                    name: player.name.clone(),
                    score: player.score,
                    is_czar: czar == Some(player.id),
                    submitted: self
                        .submissions()
                        .iter()
                        .any(|sub| sub.player == player.id),
                })
                .collect(),
            waiting_on,
            responses_left: self.deck().map_or(0, |deck| deck.responses_left()),
            prompts_left: self.deck().map_or(0, |deck| deck.prompts_left()),
        }
    }

    pub fn hand_view(&self, player: PlayerId) -> Result<HandView, GameError> {
        let slot = self.player(player).ok_or(GameError::NotInSession)?;
        Ok(HandView {
            player,
            hand: slot.hand.clone(),
            pending: slot.pending.clone(),
            submitted: self
                .submissions()
                .iter()
                .find(|sub| sub.player == player)
                .map(|sub| sub.cards.clone()),
        })
    }

    pub fn judging_view(&self) -> Result<JudgingView, GameError> {
        if self.phase != Phase::Judging {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let prompt = self
            .prompt()
            .ok_or(GameError::InvalidPhase(self.phase))?;
        let entries = self
            .display_order()
            .iter()
            .filter_map(|id| {
                self.submissions()
                    .iter()
                    .find(|sub| &sub.player == id)
                    .map(|sub| sub.cards.clone())
            })
            .collect();
        Ok(JudgingView {
            prompt: prompt.text.clone(),
            pick: prompt.pick,
            entries,
        })
    }
}

use super::*;
use crate::{Event, EventBus};

/// Outcome of a single `submit_card` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitProgress {
    /// The card joined the player's pending picks; more are needed.
    Pending { remaining: u8 },
    /// The submission is locked in for this round.
    Locked { all_in: bool },
}

impl Session {
    /// Moves exactly one card from the player's hand into their pending
    /// picks. Once the picks cover the prompt's blanks they lock in as the
    /// player's submission. Multi-blank prompts are therefore submitted one
    /// card per call, never as a batch.
    pub fn submit_card(
        &mut self,
        player: PlayerId,
        card_index: usize,
        events: &mut EventBus,
    ) -> Result<SubmitProgress, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if !self.players.iter().any(|p| p.id == player) {
            return Err(GameError::NotInSession);
        }
        if self.czar_id() == Some(player) {
            return Err(GameError::IsCzar);
        }
        if self.submissions.iter().any(|sub| sub.player == player) {
            return Err(GameError::AlreadySubmitted);
        }
        let pick = self.prompt.as_ref().map_or(1, |prompt| prompt.pick);

        let slot = self
            .players
            .iter_mut()
            .find(|p| p.id == player)
            .ok_or(GameError::NotInSession)?;
        let card = slot
            .take_card(card_index)
            .ok_or(GameError::InvalidCardReference)?;
        slot.pending.push(card);

        if (slot.pending.len() as u8) < pick {
            let remaining = pick - slot.pending.len() as u8;
            events.push(Event::CardChosen { player, remaining });
            return Ok(SubmitProgress::Pending { remaining });
        }

        let cards = std::mem::take(&mut slot.pending);
        self.submissions.push(Submission { player, cards });
        let waiting_on = self.waiting_on();
        let all_in = waiting_on.is_empty();
        events.push(Event::SubmissionLocked { player, waiting_on });
        Ok(SubmitProgress::Locked { all_in })
    }

    /// Returns a partially accumulated submission to the player's hand.
    pub fn cancel_pending(
        &mut self,
        player: PlayerId,
        events: &mut EventBus,
    ) -> Result<usize, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let slot = self.player_mut(player).ok_or(GameError::NotInSession)?;
        let count = slot.return_pending();
        if count > 0 {
            events.push(Event::PendingReturned { player, count });
        }
        Ok(count)
    }

    /// Non-czar players who still owe a submission, in roster order.
    pub fn waiting_on(&self) -> Vec<PlayerId> {
        let czar = self.czar_id();
        self.players
            .iter()
            .filter(|player| Some(player.id) != czar)
            .filter(|player| !self.submissions.iter().any(|sub| sub.player == player.id))
            .map(|player| player.id)
            .collect()
    }

    /// True iff the set of non-czar identities equals the set of submitters.
    pub fn all_submitted(&self) -> bool {
        let czar = self.czar_id();
        let expected = self
            .players
            .iter()
            .filter(|player| Some(player.id) != czar)
            .count();
        expected > 0
            && self.submissions.len() == expected
            && self
                .players
                .iter()
                .filter(|player| Some(player.id) != czar)
                .all(|player| self.submissions.iter().any(|sub| sub.player == player.id))
    }

    /// Freezes the submissions and assigns a random display order so the
    /// judge cannot infer authorship from position.
    pub(crate) fn begin_judging(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let mut order: Vec<PlayerId> = self.submissions.iter().map(|sub| sub.player).collect();
        self.rng.shuffle(&mut order);
        self.display_order = order;
        self.phase = Phase::Judging;
        events.push(Event::JudgingStarted {
            submissions: self.display_order.len(),
        });
        Ok(())
    }

    /// The czar picks a winner by 1-based display position. The winner
    /// scores a point and every played card goes to discard.
    pub fn pick_winner(
        &mut self,
        actor: PlayerId,
        choice: usize,
        events: &mut EventBus,
    ) -> Result<PlayerId, GameError> {
        if self.phase != Phase::Judging {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if self.czar_id() != Some(actor) {
            return Err(GameError::Unauthorized);
        }
        if choice == 0 || choice > self.display_order.len() {
            return Err(GameError::InvalidPickIndex(self.display_order.len()));
        }
        if self.deck.is_none() {
            return Err(GameError::InvalidPhase(self.phase));
        }

        let winner = self.display_order[choice - 1];
        let slot = self.player_mut(winner).ok_or(GameError::NotInSession)?;
        slot.score += 1;
        let score = slot.score;
        let cards = self
            .submissions
            .iter()
            .find(|sub| sub.player == winner)
            .map(|sub| sub.cards.clone())
            .unwrap_or_default();

        if let Some(deck) = self.deck.as_mut() {
            for submission in self.submissions.drain(..) {
                deck.discard_responses(submission.cards);
            }
            if let Some(prompt) = self.prompt.take() {
                deck.discard_prompt(prompt);
            }
        }
        self.display_order.clear();
        events.push(Event::WinnerPicked {
            player: winner,
            cards,
            score,
        });
        Ok(winner)
    }

    /// In scored mode, the first player at the target score. Quick mode has
    /// no score-based ending; the caller ends it after the single round.
    pub fn check_game_over(&self) -> Option<PlayerId> {
        if self.mode == Mode::Quick {
            return None;
        }
        self.players
            .iter()
            .find(|player| player.score >= self.target_score)
            .map(|player| player.id)
    }

    /// Tears down the round in flight: submitted and pending cards return to
    /// their owners' hands (or to discard when the owner already left) and
    /// the prompt goes to discard. Used when the czar leaves or is skipped.
    pub(crate) fn abort_round(&mut self) {
        for submission in self.submissions.drain(..) {
            let Submission { player, mut cards } = submission;
            if let Some(slot) = self.players.iter_mut().find(|p| p.id == player) {
                slot.hand.append(&mut cards);
            } else if let Some(deck) = self.deck.as_mut() {
                deck.discard_responses(cards);
            }
        }
        for player in &mut self.players {
            player.return_pending();
        }
        if let Some(prompt) = self.prompt.take() {
            if let Some(deck) = self.deck.as_mut() {
                deck.discard_prompt(prompt);
            }
        }
        self.display_order.clear();
    }
}

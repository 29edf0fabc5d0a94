use super::*;
use crate::{CardCatalog, Event, EventBus, GameOverReason, ScoreEntry};

impl Session {
    pub fn new(
        venue: VenueId,
        host: PlayerId,
        host_name: impl Into<String>,
        mode: Mode,
        target_score: Option<u32>,
        rules: GameRules,
        seed: u64,
    ) -> Result<Self, GameError> {
        let target = match (mode, target_score) {
            (Mode::Quick, _) => 1,
            (Mode::Scored, Some(target)) => {
                if target == 0 || target > rules.max_target_score {
                    return Err(GameError::InvalidTargetScore(rules.max_target_score));
                }
                target
            }
            (Mode::Scored, None) => rules.default_target_score,
        };
        Ok(Self {
            venue,
            host,
            mode,
            target_score: target,
            rules,
            phase: Phase::Lobby,
            round: 0,
            players: vec![Player::new(host, host_name)],
            czar_order: vec![host],
            czar_index: 0,
            prompt: None,
            submissions: Vec::new(),
            display_order: Vec::new(),
            deck: None,
            selected_packs: Vec::new(),
            rng: RngState::from_seed(seed),
        })
    }

    /// Builds the session deck from a pack selection. An empty selection
    /// means every pack in the catalog. When the session was already waiting
    /// in pack selection, the first round starts right away.
    pub fn select_packs(
        &mut self,
        actor: PlayerId,
        ids: &[PackId],
        catalog: &CardCatalog,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if actor != self.host {
            return Err(GameError::Unauthorized);
        }
        if !matches!(self.phase, Phase::Lobby | Phase::PackSelection) {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let chosen = if ids.is_empty() {
            catalog.packs().iter().collect()
        } else {
            catalog.select(ids)?
        };
        let deck = Deck::from_packs(&chosen, &mut self.rng);
        let prompts = deck.prompt_draw.len();
        let responses = deck.response_draw.len();
        self.selected_packs = chosen.iter().map(|pack| pack.id.clone()).collect();
        self.deck = Some(deck);
        events.push(Event::PacksSelected {
            packs: self.selected_packs.clone(),
            prompts,
            responses,
        });
        if self.phase == Phase::PackSelection {
            return self.launch(events);
        }
        Ok(())
    }

    /// Host starts the game. Without a deck the session first parks in
    /// `PackSelection` and waits for `select_packs`.
    pub fn begin(&mut self, actor: PlayerId, events: &mut EventBus) -> Result<(), GameError> {
        if actor != self.host {
            return Err(GameError::Unauthorized);
        }
        if self.phase != Phase::Lobby {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if self.players.len() < self.rules.min_players {
            return Err(GameError::BelowMinimumPlayers(self.rules.min_players));
        }
        if self.deck.is_none() {
            self.phase = Phase::PackSelection;
            events.push(Event::PackSelectionStarted);
            return Ok(());
        }
        self.launch(events)
    }

    fn launch(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.rng.shuffle(&mut self.czar_order);
        self.czar_index = 0;
        self.start_round(events)
    }

    /// Begins the next round: draws a prompt, tops every hand up to the
    /// target size, and clears the previous round's submission state.
    pub(crate) fn start_round(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        for player in &mut self.players {
            player.return_pending();
        }
        let deck = self
            .deck
            .as_mut()
            .ok_or(GameError::InvalidPhase(self.phase))?;
        for submission in self.submissions.drain(..) {
            deck.discard_responses(submission.cards);
        }
        self.display_order.clear();

        let prompt = deck.draw_prompt(&mut self.rng)?;
        for player in &mut self.players {
            let deficit = self.rules.hand_size.saturating_sub(player.hand.len());
            if deficit > 0 {
                match deck.draw_responses(deficit, &mut self.rng) {
                    Ok(mut drawn) => player.hand.append(&mut drawn),
                    Err(err) => {
                        deck.discard_prompt(prompt);
                        return Err(err.into());
                    }
                }
            }
        }

        self.round += 1;
        let czar = self
            .czar_id()
            .ok_or(GameError::BelowMinimumPlayers(self.rules.min_players))?;
        events.push(Event::RoundStarted {
            round: self.round,
            czar,
            prompt: prompt.text.clone(),
            pick: prompt.pick,
        });
        self.prompt = Some(prompt);
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Terminal transition. The caller decides the reason; the engine only
    /// reports the final standings.
    pub(crate) fn finish(
        &mut self,
        reason: GameOverReason,
        winner: Option<PlayerId>,
        events: &mut EventBus,
    ) {
        self.phase = Phase::Finished;
        events.push(Event::GameOver {
            reason,
            winner,
            scoreboard: self.scoreboard(),
        });
    }

    /// Standings sorted by score, highest first; ties keep roster order.
    pub fn scoreboard(&self) -> Vec<ScoreEntry> {
        let mut entries: Vec<ScoreEntry> = self
            .players
            .iter()
            .map(|player| ScoreEntry {
                player: player.id,
                name: player.name.clone(),
                score: player.score,
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }
}

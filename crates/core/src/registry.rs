use crate::{
    CardCatalog, Event, EventBus, GameError, GameOverReason, GameRules, HandView, JudgingView,
    Mode, PackId, Phase, PlayerId, Session, StatusView, SubmitProgress, VenueId,
};
use std::collections::HashMap;

/// What a successful action hands back to the transport: the refreshed
/// public view plus every event the transition (and its cascades) emitted.
#[derive(Debug, Clone)]
pub struct ActionReply {
    pub view: StatusView,
    pub events: Vec<Event>,
}

/// Process-wide venue -> session map and the narrow API the transport
/// drives. One entry per venue, created on `start_session` and deleted the
/// moment a session finishes. Every transition runs under `&mut self`, so a
/// caller that owns the registry (or wraps it in its own lock or actor)
/// gets the per-session serialization the engine requires for free.
#[derive(Debug)]
pub struct SessionRegistry {
    catalog: CardCatalog,
    rules: GameRules,
    sessions: HashMap<VenueId, Session>,
}

impl SessionRegistry {
    pub fn new(catalog: CardCatalog, rules: GameRules) -> Self {
        Self {
            catalog,
            rules,
            sessions: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn session(&self, venue: VenueId) -> Option<&Session> {
        self.sessions.get(&venue)
    }

    pub fn start_session(
        &mut self,
        venue: VenueId,
        host: PlayerId,
        host_name: impl Into<String>,
        mode: Mode,
        target_score: Option<u32>,
        seed: u64,
    ) -> Result<ActionReply, GameError> {
        if self.sessions.contains_key(&venue) {
            return Err(GameError::VenueBusy);
        }
        let session = Session::new(
            venue,
            host,
            host_name,
            mode,
            target_score,
            self.rules.clone(),
            seed,
        )?;
        let view = session.status_view();
        self.sessions.insert(venue, session);
        Ok(ActionReply {
            view,
            events: Vec::new(),
        })
    }

    pub fn join(
        &mut self,
        venue: VenueId,
        player: PlayerId,
        name: impl Into<String>,
    ) -> Result<ActionReply, GameError> {
        let name = name.into();
        self.act(venue, move |session, _, events| {
            session.join(player, name, events)
        })
    }

    pub fn select_packs(
        &mut self,
        venue: VenueId,
        actor: PlayerId,
        ids: &[PackId],
    ) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, catalog, events| {
            session.select_packs(actor, ids, catalog, events)
        })
    }

    pub fn begin(&mut self, venue: VenueId, actor: PlayerId) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| session.begin(actor, events))
    }

    /// One card per call; when the last outstanding submission locks in,
    /// judging starts within the same transition.
    pub fn submit_card(
        &mut self,
        venue: VenueId,
        player: PlayerId,
        card_index: usize,
    ) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| {
            let progress = session.submit_card(player, card_index, events)?;
            if let SubmitProgress::Locked { all_in: true } = progress {
                session.begin_judging(events)?;
            }
            Ok(())
        })
    }

    pub fn cancel_pending(
        &mut self,
        venue: VenueId,
        player: PlayerId,
    ) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| {
            session.cancel_pending(player, events).map(|_| ())
        })
    }

    /// Awards the round, then settles what comes next: a scored win or a
    /// finished quick round ends the session, otherwise the czar advances
    /// and a fresh round starts.
    pub fn pick_winner(
        &mut self,
        venue: VenueId,
        actor: PlayerId,
        choice: usize,
    ) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| {
            let winner = session.pick_winner(actor, choice, events)?;
            if let Some(champion) = session.check_game_over() {
                session.finish(GameOverReason::TargetReached, Some(champion), events);
                return Ok(());
            }
            if session.mode == Mode::Quick {
                session.finish(GameOverReason::QuickRoundComplete, Some(winner), events);
                return Ok(());
            }
            session.advance_czar();
            session.start_round(events)
        })
    }

    pub fn leave(&mut self, venue: VenueId, player: PlayerId) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| {
            Self::handle_removal(session, player, events)
        })
    }

    pub fn remove_player(
        &mut self,
        venue: VenueId,
        actor: PlayerId,
        target: PlayerId,
    ) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| {
            if actor != session.host {
                return Err(GameError::Unauthorized);
            }
            Self::handle_removal(session, target, events)
        })
    }

    /// Host bypasses an unresponsive czar without unseating them: the round
    /// is torn down, the duty rotates, and a new round starts.
    pub fn skip_czar(&mut self, venue: VenueId, actor: PlayerId) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| {
            if actor != session.host {
                return Err(GameError::Unauthorized);
            }
            if !matches!(session.phase, Phase::Playing | Phase::Judging) {
                return Err(GameError::InvalidPhase(session.phase));
            }
            let czar = session
                .czar_id()
                .ok_or(GameError::InvalidPhase(session.phase))?;
            session.abort_round();
            events.push(Event::CzarSkipped { czar });
            session.advance_czar();
            session.start_round(events)
        })
    }

    pub fn end_game(&mut self, venue: VenueId, actor: PlayerId) -> Result<ActionReply, GameError> {
        self.act(venue, move |session, _, events| {
            if actor != session.host {
                return Err(GameError::Unauthorized);
            }
            session.finish(GameOverReason::HostEnded, None, events);
            Ok(())
        })
    }

    pub fn status(&self, venue: VenueId) -> Result<StatusView, GameError> {
        self.sessions
            .get(&venue)
            .map(Session::status_view)
            .ok_or(GameError::NoSession)
    }

    pub fn hand(&self, venue: VenueId, player: PlayerId) -> Result<HandView, GameError> {
        self.sessions
            .get(&venue)
            .ok_or(GameError::NoSession)?
            .hand_view(player)
    }

    pub fn judging(&self, venue: VenueId) -> Result<JudgingView, GameError> {
        self.sessions
            .get(&venue)
            .ok_or(GameError::NoSession)?
            .judging_view()
    }

    /// Runs one serialized transition against a session, then reaps it if it
    /// reached a terminal state. A validation error bubbles out untouched;
    /// deck exhaustion is not a validation error and converts into a
    /// `GameOver` termination instead.
    fn act(
        &mut self,
        venue: VenueId,
        action: impl FnOnce(&mut Session, &CardCatalog, &mut EventBus) -> Result<(), GameError>,
    ) -> Result<ActionReply, GameError> {
        let Self {
            catalog, sessions, ..
        } = self;
        let session = sessions.get_mut(&venue).ok_or(GameError::NoSession)?;
        let mut events = EventBus::default();
        match action(session, catalog, &mut events) {
            Ok(()) => {}
            Err(GameError::ContentExhausted(_)) => {
                session.finish(GameOverReason::ContentExhausted, None, &mut events);
            }
            Err(other) => return Err(other),
        }
        let view = session.status_view();
        let finished = session.phase == Phase::Finished;
        let reply = ActionReply {
            view,
            events: events.drain().collect(),
        };
        if finished {
            sessions.remove(&venue);
        }
        Ok(reply)
    }

    fn handle_removal(
        session: &mut Session,
        id: PlayerId,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let removal = session.remove_player(id, events)?;
        if removal.below_minimum {
            session.finish(GameOverReason::TooFewPlayers, None, events);
            return Ok(());
        }
        if removal.was_acting_czar {
            session.abort_round();
            events.push(Event::RoundAborted { czar: id });
            return session.start_round(events);
        }
        if session.phase == Phase::Playing && session.all_submitted() {
            return session.begin_judging(events);
        }
        Ok(())
    }
}

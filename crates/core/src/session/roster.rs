use super::*;
use crate::{Event, EventBus};

/// What the caller needs to know after a player was removed, so it can
/// decide whether to abort the round, start judging, or end the session.
#[derive(Debug, Clone)]
pub struct Removal {
    pub name: String,
    pub was_acting_czar: bool,
    pub below_minimum: bool,
}

impl Session {
    pub fn join(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::InvalidPhase(self.phase));
        }
        if self.players.iter().any(|player| player.id == id) {
            return Err(GameError::AlreadyJoined);
        }
        let player = Player::new(id, name);
        events.push(Event::PlayerJoined {
            player: id,
            name: player.name.clone(),
            seated: self.players.len() + 1,
        });
        self.players.push(player);
        self.czar_order.push(id);
        Ok(())
    }

    /// The identity currently judging, if anyone is seated.
    pub fn czar_id(&self) -> Option<PlayerId> {
        if self.czar_order.is_empty() {
            None
        } else {
            Some(self.czar_order[self.czar_index % self.czar_order.len()])
        }
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    /// Rotates the judging duty to the next seat.
    pub(crate) fn advance_czar(&mut self) {
        if !self.czar_order.is_empty() {
            self.czar_index = (self.czar_index + 1) % self.czar_order.len();
        }
    }

    /// Removes a player in any phase. Their hand, pending picks, and any
    /// finalized submission go to the response discard so every card stays
    /// accounted for. The czar index keeps pointing at the same seat.
    pub fn remove_player(
        &mut self,
        id: PlayerId,
        events: &mut EventBus,
    ) -> Result<Removal, GameError> {
        let index = self
            .players
            .iter()
            .position(|player| player.id == id)
            .ok_or(GameError::NotInSession)?;
        let was_acting_czar = self.czar_id() == Some(id)
            && matches!(self.phase, Phase::Playing | Phase::Judging);
        let mut player = self.players.remove(index);

        if let Some(deck) = self.deck.as_mut() {
            let mut held = std::mem::take(&mut player.hand);
            held.append(&mut player.pending);
            deck.discard_responses(held);
            if let Some(pos) = self.submissions.iter().position(|sub| sub.player == id) {
                let submission = self.submissions.remove(pos);
                deck.discard_responses(submission.cards);
            }
        }
        self.display_order.retain(|pid| *pid != id);

        if let Some(pos) = self.czar_order.iter().position(|pid| *pid == id) {
            self.czar_order.remove(pos);
            if pos < self.czar_index {
                self.czar_index -= 1;
            }
            if self.czar_index >= self.czar_order.len() {
                self.czar_index = 0;
            }
        }

        events.push(Event::PlayerLeft {
            player: id,
            name: player.name.clone(),
        });
        Ok(Removal {
            name: player.name,
            was_acting_czar,
            below_minimum: self.players.len() < self.rules.min_players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventBus, GameRules, Mode, VenueId};

    fn lobby_session(players: u64) -> Session {
        let mut session = Session::new(
            VenueId(1),
            PlayerId(1),
            "p1",
            Mode::Scored,
            None,
            GameRules::default(),
            99,
        )
        .expect("valid defaults");
        let mut events = EventBus::default();
        for n in 2..=players {
            session
                .join(PlayerId(n), format!("p{n}"), &mut events)
                .expect("fresh id");
        }
        session
    }

    #[test]
    fn join_is_rejected_once_seated() {
        let mut session = lobby_session(3);
        let mut events = EventBus::default();
        let err = session
            .join(PlayerId(2), "again", &mut events)
            .expect_err("duplicate id");
        assert_eq!(err, GameError::AlreadyJoined);
        assert_eq!(session.players().len(), 3);
    }

    #[test]
    fn czar_rotation_wraps_around_the_roster() {
        let mut session = lobby_session(3);
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(session.czar_id().expect("someone seated"));
            session.advance_czar();
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
        assert_eq!(session.czar_id(), Some(session.czar_order()[0]));
    }

    #[test]
    fn removing_an_earlier_seat_keeps_the_acting_czar() {
        let mut session = lobby_session(4);
        session.advance_czar();
        session.advance_czar();
        let acting = session.czar_id().expect("someone seated");
        let first_seat = session.czar_order()[0];
        assert_ne!(acting, first_seat);

        let mut events = EventBus::default();
        session
            .remove_player(first_seat, &mut events)
            .expect("seated player");
        assert_eq!(session.czar_id(), Some(acting));
    }

    #[test]
    fn removing_the_last_seat_reclamps_the_index() {
        let mut session = lobby_session(3);
        session.advance_czar();
        session.advance_czar();
        let acting = session.czar_id().expect("someone seated");

        let mut events = EventBus::default();
        session
            .remove_player(acting, &mut events)
            .expect("seated player");
        // index pointed past the shortened order and must wrap to a seat
        assert!(session.czar_id().is_some());
        assert!(session.czar_order().len() == 2);
    }

    #[test]
    fn removing_unknown_player_is_rejected() {
        let mut session = lobby_session(3);
        let mut events = EventBus::default();
        let err = session
            .remove_player(PlayerId(42), &mut events)
            .expect_err("never joined");
        assert_eq!(err, GameError::NotInSession);
    }
}

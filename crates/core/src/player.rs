use crate::PlayerId;
use serde::{Deserialize, Serialize};

/// One seated participant. The hand is private to the player; `pending`
/// holds cards picked for a multi-blank prompt that are not locked in yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<String>,
    pub score: u32,
    pub pending: Vec<String>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            score: 0,
            pending: Vec::new(),
        }
    }

    /// Removes the card at `index` from the hand, or leaves the hand
    /// untouched when the index is out of range.
    pub fn take_card(&mut self, index: usize) -> Option<String> {
        if index < self.hand.len() {
            Some(self.hand.remove(index))
        } else {
            None
        }
    }

    /// Moves every pending pick back into the hand.
    pub fn return_pending(&mut self) -> usize {
        let count = self.pending.len();
        let mut pending = std::mem::take(&mut self.pending);
        self.hand.append(&mut pending);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_card_out_of_range_leaves_hand_intact() {
        let mut player = Player::new(PlayerId(1), "ada");
        player.hand = vec!["a".to_string(), "b".to_string()];
        assert_eq!(player.take_card(5), None);
        assert_eq!(player.hand.len(), 2);
        assert_eq!(player.take_card(1), Some("b".to_string()));
        assert_eq!(player.hand, ["a".to_string()]);
    }

    #[test]
    fn return_pending_appends_to_hand() {
        let mut player = Player::new(PlayerId(1), "ada");
        player.hand = vec!["a".to_string()];
        player.pending = vec!["b".to_string(), "c".to_string()];
        assert_eq!(player.return_pending(), 2);
        assert_eq!(player.hand.len(), 3);
        assert!(player.pending.is_empty());
    }
}

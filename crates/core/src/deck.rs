use crate::{Pack, PromptCard, RngState};
use thiserror::Error;

/// Raised when a draw pile and its discard pile are both empty. The selected
/// packs cannot cover the game length, so the session has to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("no response cards left in the draw or discard pile")]
    ResponsesExhausted,
    #[error("no prompt cards left in the draw or discard pile")]
    PromptsExhausted,
}

/// One session's card supply: independent draw/discard pairs for responses
/// and prompts. Discards are recycled lazily, only when a draw finds the
/// draw pile empty.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pub response_draw: Vec<String>,
    pub response_discard: Vec<String>,
    pub prompt_draw: Vec<PromptCard>,
    pub prompt_discard: Vec<PromptCard>,
}

impl Deck {
    /// Flattens the selected packs into two freshly shuffled pools.
    pub fn from_packs(packs: &[&Pack], rng: &mut RngState) -> Self {
        let mut response_draw = Vec::new();
        let mut prompt_draw = Vec::new();
        for pack in packs {
            response_draw.extend(pack.responses.iter().cloned());
            prompt_draw.extend(pack.prompts.iter().cloned());
        }
        rng.shuffle(&mut response_draw);
        rng.shuffle(&mut prompt_draw);
        Self {
            response_draw,
            response_discard: Vec::new(),
            prompt_draw,
            prompt_discard: Vec::new(),
        }
    }

    pub fn draw_responses(
        &mut self,
        count: usize,
        rng: &mut RngState,
    ) -> Result<Vec<String>, DeckError> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if self.response_draw.is_empty() {
                if self.response_discard.is_empty() {
                    // put the partial draw back so no card goes missing
                    self.response_draw.append(&mut cards);
                    return Err(DeckError::ResponsesExhausted);
                }
                self.response_draw.append(&mut self.response_discard);
                rng.shuffle(&mut self.response_draw);
            }
            if let Some(card) = self.response_draw.pop() {
                cards.push(card);
            }
        }
        Ok(cards)
    }

    pub fn draw_prompt(&mut self, rng: &mut RngState) -> Result<PromptCard, DeckError> {
        if self.prompt_draw.is_empty() {
            if self.prompt_discard.is_empty() {
                return Err(DeckError::PromptsExhausted);
            }
            self.prompt_draw.append(&mut self.prompt_discard);
            rng.shuffle(&mut self.prompt_draw);
        }
        self.prompt_draw.pop().ok_or(DeckError::PromptsExhausted)
    }

    pub fn discard_responses(&mut self, mut cards: Vec<String>) {
        self.response_discard.append(&mut cards);
    }

    pub fn discard_prompt(&mut self, card: PromptCard) {
        self.prompt_discard.push(card);
    }

    /// Responses still inside the deck (either pile).
    pub fn responses_left(&self) -> usize {
        self.response_draw.len() + self.response_discard.len()
    }

    pub fn prompts_left(&self) -> usize {
        self.prompt_draw.len() + self.prompt_discard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PackId;

    fn pack(responses: usize, prompts: usize) -> Pack {
        Pack {
            id: PackId::from("test"),
            name: "Test".to_string(),
            description: String::new(),
            prompts: (0..prompts)
                .map(|i| PromptCard {
                    text: format!("prompt {i} _"),
                    pick: 1,
                    pack: PackId::from("test"),
                })
                .collect(),
            responses: (0..responses).map(|i| format!("response {i}")).collect(),
        }
    }

    #[test]
    fn reshuffles_discard_only_when_draw_pile_is_empty() {
        let mut rng = RngState::from_seed(1);
        let source = pack(4, 1);
        let mut deck = Deck::from_packs(&[&source], &mut rng);

        let first = deck.draw_responses(3, &mut rng).expect("plenty left");
        deck.discard_responses(first);
        assert_eq!(deck.response_discard.len(), 3);

        // one card still in the draw pile, so the discard stays untouched
        let second = deck.draw_responses(1, &mut rng).expect("one left");
        assert_eq!(second.len(), 1);
        assert_eq!(deck.response_discard.len(), 3);

        // now the draw pile is empty and the discard gets promoted mid-draw
        let third = deck.draw_responses(2, &mut rng).expect("recycled");
        assert_eq!(third.len(), 2);
        assert!(deck.response_discard.is_empty());
        assert_eq!(deck.response_draw.len(), 1);
    }

    #[test]
    fn exhausted_draw_restores_partial_pop() {
        let mut rng = RngState::from_seed(2);
        let source = pack(3, 1);
        let mut deck = Deck::from_packs(&[&source], &mut rng);

        let err = deck
            .draw_responses(5, &mut rng)
            .expect_err("only three cards exist");
        assert_eq!(err, DeckError::ResponsesExhausted);
        // the three popped cards must be back in the deck
        assert_eq!(deck.responses_left(), 3);
    }

    #[test]
    fn prompt_pile_recycles_and_exhausts() {
        let mut rng = RngState::from_seed(3);
        let source = pack(1, 2);
        let mut deck = Deck::from_packs(&[&source], &mut rng);

        let a = deck.draw_prompt(&mut rng).expect("first prompt");
        let b = deck.draw_prompt(&mut rng).expect("second prompt");
        assert_eq!(deck.draw_prompt(&mut rng), Err(DeckError::PromptsExhausted));

        deck.discard_prompt(a);
        let recycled = deck.draw_prompt(&mut rng).expect("discard promoted");
        assert_eq!(recycled.pack, PackId::from("test"));
        deck.discard_prompt(b);
        deck.discard_prompt(recycled);
        assert_eq!(deck.prompts_left(), 2);
    }

    #[test]
    fn conservation_across_mixed_operations() {
        let mut rng = RngState::from_seed(4);
        let source = pack(20, 5);
        let mut deck = Deck::from_packs(&[&source], &mut rng);

        let mut held = Vec::new();
        for _ in 0..6 {
            held.extend(deck.draw_responses(3, &mut rng).expect("enough cards"));
            let give_back = held.split_off(held.len() / 2);
            deck.discard_responses(give_back);
            assert_eq!(deck.responses_left() + held.len(), 20);
        }
    }
}

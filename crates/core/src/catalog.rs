use crate::{GameError, PackId, PromptCard};

/// A named, independently selectable bundle of prompt and response cards.
#[derive(Debug, Clone)]
pub struct Pack {
    pub id: PackId,
    pub name: String,
    pub description: String,
    pub prompts: Vec<PromptCard>,
    pub responses: Vec<String>,
}

/// Read-only registry of every pack available to new sessions.
/// Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    packs: Vec<Pack>,
}

impl CardCatalog {
    pub fn new(packs: Vec<Pack>) -> Self {
        Self { packs }
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn pack(&self, id: &PackId) -> Option<&Pack> {
        self.packs.iter().find(|pack| &pack.id == id)
    }

    pub fn all_ids(&self) -> Vec<PackId> {
        self.packs.iter().map(|pack| pack.id.clone()).collect()
    }

    /// Resolves a selection of pack ids, rejecting the first unknown one.
    pub fn select(&self, ids: &[PackId]) -> Result<Vec<&Pack>, GameError> {
        let mut chosen = Vec::with_capacity(ids.len());
        for id in ids {
            let pack = self
                .pack(id)
                .ok_or_else(|| GameError::UnknownPack(id.clone()))?;
            chosen.push(pack);
        }
        Ok(chosen)
    }

    pub fn total_prompts(&self) -> usize {
        self.packs.iter().map(|pack| pack.prompts.len()).sum()
    }

    pub fn total_responses(&self) -> usize {
        self.packs.iter().map(|pack| pack.responses.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(id: &str) -> Pack {
        Pack {
            id: PackId::from(id),
            name: id.to_string(),
            description: String::new(),
            prompts: vec![PromptCard {
                text: "_?".to_string(),
                pick: 1,
                pack: PackId::from(id),
            }],
            responses: vec!["a card".to_string()],
        }
    }

    #[test]
    fn select_rejects_unknown_pack() {
        let catalog = CardCatalog::new(vec![pack("base")]);
        let err = catalog
            .select(&[PackId::from("missing")])
            .expect_err("unknown pack must be rejected");
        assert_eq!(err, GameError::UnknownPack(PackId::from("missing")));
    }

    #[test]
    fn select_preserves_requested_order() {
        let catalog = CardCatalog::new(vec![pack("a"), pack("b")]);
        let chosen = catalog
            .select(&[PackId::from("b"), PackId::from("a")])
            .expect("both packs exist");
        let ids: Vec<&PackId> = chosen.iter().map(|pack| &pack.id).collect();
        assert_eq!(ids, [&PackId::from("b"), &PackId::from("a")]);
    }
}

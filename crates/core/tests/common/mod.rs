use blanks_core::{
    CardCatalog, GameRules, Mode, Pack, PackId, PlayerId, PromptCard, SessionRegistry, VenueId,
};

pub const VENUE: VenueId = VenueId(7);
pub const HOST: PlayerId = PlayerId(1);

pub fn pack(id: &str, prompts: usize, pick: u8, responses: usize) -> Pack {
    Pack {
        id: PackId::from(id),
        name: id.to_string(),
        description: String::new(),
        prompts: (0..prompts)
            .map(|i| PromptCard {
                text: match pick {
                    2 => format!("prompt {i}: _ and _"),
                    _ => format!("prompt {i}: _"),
                },
                pick,
                pack: PackId::from(id),
            })
            .collect(),
        responses: (0..responses).map(|i| format!("card {i}")).collect(),
    }
}

pub fn registry(packs: Vec<Pack>) -> SessionRegistry {
    SessionRegistry::new(CardCatalog::new(packs), GameRules::default())
}

/// Starts a session with `seats` players, selects every pack, and begins.
pub fn start_game(
    reg: &mut SessionRegistry,
    mode: Mode,
    target: Option<u32>,
    seats: u64,
    seed: u64,
) {
    reg.start_session(VENUE, HOST, "host", mode, target, seed)
        .expect("venue is free");
    for n in 2..=seats {
        reg.join(VENUE, PlayerId(n), format!("p{n}"))
            .expect("lobby accepts joins");
    }
    reg.select_packs(VENUE, HOST, &[]).expect("packs exist");
    reg.begin(VENUE, HOST).expect("enough players");
}

pub fn czar(reg: &SessionRegistry) -> PlayerId {
    reg.session(VENUE)
        .expect("session running")
        .czar_id()
        .expect("someone seated")
}

pub fn non_czars(reg: &SessionRegistry) -> Vec<PlayerId> {
    let judging = czar(reg);
    reg.session(VENUE)
        .expect("session running")
        .players()
        .iter()
        .map(|player| player.id)
        .filter(|id| *id != judging)
        .collect()
}

/// Every non-czar submits their first `picks` cards, index 0 each time
/// (the hand shifts left as cards leave it).
pub fn submit_all(reg: &mut SessionRegistry, picks: usize) {
    for id in non_czars(reg) {
        for _ in 0..picks {
            reg.submit_card(VENUE, id, 0).expect("legal submission");
        }
    }
}

/// 1-based judging position of a given submitter.
pub fn display_position(reg: &SessionRegistry, target: PlayerId) -> usize {
    reg.session(VENUE)
        .expect("session running")
        .display_order()
        .iter()
        .position(|id| *id == target)
        .expect("player submitted")
        + 1
}

/// Response cards in circulation: deck piles, hands, pending picks, and
/// finalized submissions.
pub fn responses_in_circulation(reg: &SessionRegistry) -> usize {
    let session = reg.session(VENUE).expect("session running");
    let deck = session.deck().expect("deck built");
    deck.responses_left()
        + session
            .players()
            .iter()
            .map(|player| player.hand.len() + player.pending.len())
            .sum::<usize>()
        + session
            .submissions()
            .iter()
            .map(|sub| sub.cards.len())
            .sum::<usize>()
}

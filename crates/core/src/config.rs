use serde::{Deserialize, Serialize};

/// Tunable rules shared by every session a registry creates.
///
/// The timeout fields are advisory: the engine never expires a round on its
/// own. An external timer that wants auto-skip behavior reads them and calls
/// `skip_czar` / `remove_player` itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub hand_size: usize,
    pub min_players: usize,
    pub default_target_score: u32,
    pub max_target_score: u32,
    pub submit_timeout_secs: u64,
    pub judge_timeout_secs: u64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            hand_size: 10,
            min_players: 3,
            default_target_score: 7,
            max_target_score: 50,
            submit_timeout_secs: 180,
            judge_timeout_secs: 180,
        }
    }
}

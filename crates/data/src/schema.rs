use serde::Deserialize;

/// On-disk shape of a pack file. The pack id comes from the file name, and
/// prompts carry their pack id only after validation builds the real types.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPack {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub prompts: Vec<RawPrompt>,
    pub responses: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrompt {
    pub text: String,
    #[serde(default = "default_pick")]
    pub pick: u8,
}

fn default_pick() -> u8 {
    1
}

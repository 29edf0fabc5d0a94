use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, platform-assigned player identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Identifies the venue (channel, room, table) a session runs in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct VenueId(pub u64);

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "venue#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackId(pub String);

impl From<&str> for PackId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A moderator prompt with one or more blanks. `pick` is the number of
/// response cards a submission must contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptCard {
    pub text: String,
    pub pick: u8,
    pub pack: PackId,
}

impl PromptCard {
    /// Renders the prompt with the given answers substituted into its blanks.
    /// Prompts without any blank marker get the answers appended instead.
    pub fn filled(&self, answers: &[String]) -> String {
        if blank_count(&self.text) == 0 {
            return format!("{} {}", self.text, answers.join(" / "));
        }
        let mut out = String::with_capacity(self.text.len());
        let mut answers = answers.iter();
        let mut chars = self.text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '_' {
                while matches!(chars.peek(), Some('_')) {
                    chars.next();
                }
                match answers.next() {
                    Some(answer) => out.push_str(answer),
                    None => out.push('_'),
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// Counts maximal runs of `_` in a prompt text. One run is one blank.
pub fn blank_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_blank = false;
    for c in text.chars() {
        if c == '_' {
            if !in_blank {
                count += 1;
            }
            in_blank = true;
        } else {
            in_blank = false;
        }
    }
    count
}

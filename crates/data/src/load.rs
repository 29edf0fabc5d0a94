use crate::schema::RawPack;
use anyhow::{bail, Context};
use blanks_core::{blank_count, CardCatalog, Pack, PackId, PromptCard};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Loads every `*.json` pack file in a directory into a catalog. File order
/// is made deterministic by sorting on path.
pub fn load_catalog(dir: &Path) -> anyhow::Result<CardCatalog> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("read {}", dir.display()))?
        .collect::<Result<_, _>>()
        .with_context(|| format!("read {}", dir.display()))?;
    entries.sort_by_key(|entry| entry.path());

    let mut packs = Vec::new();
    let mut seen = HashSet::new();
    for entry in entries {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let pack = load_pack(&path)?;
        if !seen.insert(pack.id.clone()) {
            bail!("duplicate pack id '{}' from {}", pack.id, path.display());
        }
        packs.push(pack);
    }
    if packs.is_empty() {
        bail!("no pack files in {}", dir.display());
    }
    Ok(CardCatalog::new(packs))
}

pub fn load_pack(path: &Path) -> anyhow::Result<Pack> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let parsed: RawPack =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .with_context(|| format!("pack file name is not valid UTF-8: {}", path.display()))?;
    build_pack(id, parsed).with_context(|| format!("validate {}", path.display()))
}

fn build_pack(id: String, raw: RawPack) -> anyhow::Result<Pack> {
    let pack_id = PackId(id);
    if raw.name.trim().is_empty() {
        bail!("pack name cannot be empty");
    }
    if raw.prompts.is_empty() {
        bail!("pack has no prompt cards");
    }
    if raw.responses.is_empty() {
        bail!("pack has no response cards");
    }

    let mut prompts = Vec::with_capacity(raw.prompts.len());
    for prompt in raw.prompts {
        let text = prompt.text.trim().to_string();
        if text.is_empty() {
            bail!("prompt text cannot be empty");
        }
        if prompt.pick == 0 {
            bail!("prompt '{}' has pick 0", text);
        }
        let blanks = blank_count(&text);
        if blanks > 0 && blanks != usize::from(prompt.pick) {
            bail!(
                "prompt '{}' has {} blanks but pick {}",
                text,
                blanks,
                prompt.pick
            );
        }
        prompts.push(PromptCard {
            text,
            pick: prompt.pick,
            pack: pack_id.clone(),
        });
    }

    let mut responses = Vec::with_capacity(raw.responses.len());
    for response in raw.responses {
        let text = response.trim().to_string();
        if text.is_empty() {
            bail!("response text cannot be empty");
        }
        responses.push(text);
    }

    Ok(Pack {
        id: pack_id,
        name: raw.name,
        description: raw.description,
        prompts,
        responses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawPrompt;

    fn raw(prompts: Vec<RawPrompt>, responses: Vec<&str>) -> RawPack {
        RawPack {
            name: "Test Pack".to_string(),
            description: String::new(),
            prompts,
            responses: responses.iter().map(|text| text.to_string()).collect(),
        }
    }

    fn prompt(text: &str, pick: u8) -> RawPrompt {
        RawPrompt {
            text: text.to_string(),
            pick,
        }
    }

    #[test]
    fn builds_a_valid_pack() {
        let pack = build_pack(
            "base".to_string(),
            raw(
                vec![prompt("Why? _", 1), prompt("_ plus _", 2)],
                vec!["one", "two"],
            ),
        )
        .expect("valid pack");
        assert_eq!(pack.id, PackId::from("base"));
        assert_eq!(pack.prompts.len(), 2);
        assert!(pack.prompts.iter().all(|p| p.pack == pack.id));
    }

    #[test]
    fn rejects_blank_count_mismatch() {
        let err = build_pack(
            "base".to_string(),
            raw(vec![prompt("only _ one blank", 2)], vec!["one"]),
        )
        .expect_err("one blank but pick 2");
        assert!(err.to_string().contains("1 blanks but pick 2"));
    }

    #[test]
    fn allows_implicit_pick_without_markers() {
        let pack = build_pack(
            "base".to_string(),
            raw(vec![prompt("What's next?", 1)], vec!["one"]),
        )
        .expect("marker-free prompt is fine");
        assert_eq!(pack.prompts[0].pick, 1);
    }

    #[test]
    fn rejects_pick_zero_and_empty_pools() {
        assert!(build_pack(
            "base".to_string(),
            raw(vec![prompt("_", 0)], vec!["one"]),
        )
        .is_err());
        assert!(build_pack("base".to_string(), raw(vec![], vec!["one"])).is_err());
        assert!(build_pack("base".to_string(), raw(vec![prompt("_", 1)], vec![])).is_err());
    }
}

//! Parsing and validation of `KEY=VALUE` configuration blocks.
//!
//! A block is the raw text the operator edits. Each line is split on its
//! first `=`, both halves are trimmed, and a line only counts when both the
//! key and the value are non-empty. Later lines overwrite earlier ones.
//!
//! The checks here never fail loudly: `is_valid` and `keys_match_template`
//! return booleans, and the draft decides whether to restore the template.

use std::collections::BTreeMap;

use agentdeck_contracts::error::{DeckError, DeckResult};

/// Parsed configuration block.
pub type ConfigMap = BTreeMap<String, String>;

/// Parse `text` into a key/value mapping.
///
/// Lines without `=`, or with an empty key or value, contribute nothing.
pub fn parse(text: &str) -> ConfigMap {
    let mut map = ConfigMap::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), value.to_string());
    }
    map
}

/// Render a mapping back into block text, one `KEY=VALUE` per line.
pub fn serialize(map: &ConfigMap) -> String {
    map.iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A block is valid when it yields at least one entry.
pub fn is_valid(text: &str) -> bool {
    !parse(text).is_empty()
}

/// Keys present in `text` that the template does not declare, sorted.
pub fn unexpected_keys(text: &str, template: &str) -> Vec<String> {
    let allowed = parse(template);
    parse(text)
        .into_keys()
        .filter(|key| !allowed.contains_key(key))
        .collect()
}

/// True when every key in `text` also appears in `template`.
///
/// Only values may differ from the template; a subset of its keys is fine.
pub fn keys_match_template(text: &str, template: &str) -> bool {
    unexpected_keys(text, template).is_empty()
}

/// Apply both checks in commit order and return the parsed block.
///
/// The key-set check runs first so that a renamed key is reported as
/// `KeySetMismatch` even when the rest of the block is well formed.
pub fn check_against_template(text: &str, template: &str) -> DeckResult<ConfigMap> {
    let unexpected = unexpected_keys(text, template);
    if !unexpected.is_empty() {
        return Err(DeckError::KeySetMismatch { unexpected });
    }

    let parsed = parse(text);
    if parsed.is_empty() {
        return Err(DeckError::MalformedConfig);
    }
    Ok(parsed)
}

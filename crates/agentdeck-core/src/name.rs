//! Agent name filtering.
//!
//! Names are checked on every edit, before the stored value changes, so a
//! draft never holds a name with a forbidden character.

use agentdeck_contracts::{
    agent::AgentKind,
    error::{DeckError, DeckResult},
};

/// Characters that may not appear anywhere in an agent name.
pub const FORBIDDEN_NAME_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '-', '=', '[', ']', '{', '}',
    ';', '\'', ':', '"', '|', ',', '.', '<', '>', '/', '?',
];

/// Return `NameRejected` carrying the first forbidden character in
/// `candidate`, if any. `kind` only labels the message.
pub fn check_name(candidate: &str, kind: AgentKind) -> DeckResult<()> {
    match candidate.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        Some(character) => Err(DeckError::NameRejected { character, kind }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn plain_names_with_spaces_pass() {
        assert!(check_name("Agent Name", AgentKind::LocalAgent).is_ok());
        assert!(check_name("Submit Agent 2", AgentKind::LocalAgent).is_ok());
        assert!(check_name("", AgentKind::Orchestrator).is_ok());
    }

    #[test]
    fn at_sign_is_rejected() {
        let err = check_name("Agent@Name", AgentKind::LocalAgent).unwrap_err();
        assert!(matches!(
            err,
            DeckError::NameRejected {
                character: '@',
                kind: AgentKind::LocalAgent
            }
        ));
        assert_eq!(
            err.to_string(),
            "Local agent name cannot have special characters in name (found '@')"
        );
    }

    #[test]
    fn first_forbidden_character_is_reported() {
        let err = check_name("a.b-c", AgentKind::Mcp).unwrap_err();
        assert!(matches!(err, DeckError::NameRejected { character: '.', .. }));
    }

    proptest! {
        #[test]
        fn any_name_with_a_forbidden_char_is_rejected(
            prefix in "[A-Za-z0-9 ]{0,8}",
            idx in 0usize..FORBIDDEN_NAME_CHARS.len(),
            suffix in "[A-Za-z0-9 ]{0,8}",
        ) {
            let name = format!("{prefix}{}{suffix}", FORBIDDEN_NAME_CHARS[idx]);
            prop_assert!(check_name(&name, AgentKind::LocalAgent).is_err());
        }

        #[test]
        fn alphanumeric_names_pass(name in "[A-Za-z0-9 ]{0,24}") {
            prop_assert!(check_name(&name, AgentKind::LocalAgent).is_ok());
        }
    }
}

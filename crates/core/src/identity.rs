//! Display-name derivation shared by the login and score paths.

use crate::state::PlayerId;

/// Number of trailing id characters used in generated fallback names.
const FALLBACK_TAIL: usize = 4;

/// Derive the public display name for a player.
///
/// Preference order: `@handle`, then the trimmed concatenation of given and
/// family name, then a generated fallback from the id's trailing characters.
/// Total function: always returns a non-empty string.
pub fn derive_display_name(
    handle: Option<&str>,
    given_name: Option<&str>,
    family_name: Option<&str>,
    player_id: &PlayerId,
) -> String {
    if let Some(handle) = normalize(handle) {
        return format!("@{handle}");
    }

    let full_name = [given_name, family_name]
        .into_iter()
        .filter_map(normalize)
        .collect::<Vec<_>>()
        .join(" ");
    if !full_name.is_empty() {
        return full_name;
    }

    format!("Player{}", player_id.tail(FALLBACK_TAIL))
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> PlayerId {
        PlayerId::new(raw)
    }

    #[test]
    fn handle_wins_over_names() {
        let name = derive_display_name(Some("nova"), Some("Ivan"), Some("Petrov"), &id("777"));
        assert_eq!(name, "@nova");
    }

    #[test]
    fn full_name_when_no_handle() {
        let name = derive_display_name(None, Some("Ivan"), Some("Petrov"), &id("777"));
        assert_eq!(name, "Ivan Petrov");
    }

    #[test]
    fn given_name_alone_is_enough() {
        let name = derive_display_name(None, Some("Ivan"), None, &id("777"));
        assert_eq!(name, "Ivan");
    }

    #[test]
    fn falls_back_to_id_tail() {
        let name = derive_display_name(None, None, None, &id("abcd1234"));
        assert_eq!(name, "Player1234");
    }

    #[test]
    fn short_ids_use_the_whole_id() {
        let name = derive_display_name(None, None, None, &id("42"));
        assert_eq!(name, "Player42");
    }

    #[test]
    fn blank_handle_falls_through() {
        let name = derive_display_name(Some("   "), None, Some("Petrov"), &id("777"));
        assert_eq!(name, "Petrov");
    }
}

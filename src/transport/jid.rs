//! Conversation and participant identifier helpers
//!
//! Transport identifiers look like `5511999999999@s.whatsapp.net`, or
//! `5511999999999:12@s.whatsapp.net` for a specific linked device. Groups end
//! in `@g.us`. Comparisons happen on the canonical number.

/// Suffix of group conversation identifiers
pub const GROUP_SUFFIX: &str = "@g.us";

/// Suffix of individual user identifiers
pub const USER_SUFFIX: &str = "@s.whatsapp.net";

const LEGACY_USER_SUFFIX: &str = "@c.us";

/// Strip the domain suffix and device suffix, leaving the bare number
pub fn canonical_number(id: &str) -> String {
    let without_domain = id.split('@').next().unwrap_or(id);
    let without_device = without_domain.split(':').next().unwrap_or(without_domain);
    without_device.trim_start_matches('+').to_string()
}

/// True if the identifier denotes a group conversation
pub fn is_group(id: &str) -> bool {
    id.ends_with(GROUP_SUFFIX)
}

/// Full user identifier for a bare number
pub fn user_jid(number: &str) -> String {
    format!("{}{}", canonical_number(number), USER_SUFFIX)
}

/// Representations under which a number may appear in a participant list
pub fn candidate_ids(number: &str) -> Vec<String> {
    let bare = canonical_number(number);
    vec![
        bare.clone(),
        format!("{}{}", bare, USER_SUFFIX),
        format!("{}{}", bare, LEGACY_USER_SUFFIX),
    ]
}

/// True if a participant identifier refers to the given bare number
pub fn matches_number(participant_id: &str, number: &str) -> bool {
    let bare = canonical_number(number);
    if bare.is_empty() {
        return false;
    }

    candidate_ids(&bare).iter().any(|c| c == participant_id)
        || canonical_number(participant_id) == bare
}

/// `@number` mention text for a participant identifier
pub fn mention_text(id: &str) -> String {
    format!("@{}", canonical_number(id))
}

//! Group metadata and participant models
//!
//! These are read-only projections of what the chat transport reports.

use serde::{Deserialize, Serialize};

/// Role of a participant inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Admins and super admins hold moderation authority
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Member => write!(f, "member"),
            Role::Admin => write!(f, "admin"),
            Role::SuperAdmin => write!(f, "superadmin"),
        }
    }
}

/// Group member as reported by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub role: Role,
}

impl Participant {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), role }
    }
}

/// Live metadata of a group conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMetadata {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creation: Option<i64>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// Summary of a group shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: String,
    pub subject: String,
    pub participant_count: usize,
    pub creation_time: Option<i64>,
    pub owner: Option<String>,
    pub description: Option<String>,
}

impl GroupMetadata {
    /// Participants holding admin or super admin role
    pub fn admins(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.role.is_admin())
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id.clone(),
            subject: self.subject.clone(),
            participant_count: self.participants.len(),
            creation_time: self.creation,
            owner: self.owner.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let participant: Participant =
            serde_json::from_str(r#"{"id": "1@s.whatsapp.net", "role": "superadmin"}"#).unwrap();
        assert_eq!(participant.role, Role::SuperAdmin);

        let missing: Participant = serde_json::from_str(r#"{"id": "2@s.whatsapp.net"}"#).unwrap();
        assert_eq!(missing.role, Role::Member);
        assert!(!missing.role.is_admin());
    }

    #[test]
    fn test_summary_counts_participants() {
        let metadata = GroupMetadata {
            id: "g@g.us".to_string(),
            subject: "Test".to_string(),
            owner: None,
            description: None,
            creation: Some(1_700_000_000),
            participants: vec![
                Participant::new("1@s.whatsapp.net", Role::Admin),
                Participant::new("2@s.whatsapp.net", Role::Member),
            ],
        };
        assert_eq!(metadata.summary().participant_count, 2);
        assert_eq!(metadata.admins().count(), 1);
    }
}

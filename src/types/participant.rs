//! Participant records

use serde::{Deserialize, Serialize};

use super::{truncate_chars, ParticipantId};

/// Maximum length (in chars) of a participant name
pub const NAME_MAX_CHARS: usize = 99;
/// Maximum length (in chars) of an email address
pub const EMAIL_MAX_CHARS: usize = 99;
/// Maximum length (in chars) of a phone number
pub const PHONE_MAX_CHARS: usize = 19;

/// Person who can register for events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Participant {
    pub fn new(id: ParticipantId, draft: NewParticipant) -> Self {
        Self {
            id,
            name: truncate_chars(draft.name, NAME_MAX_CHARS),
            email: truncate_chars(draft.email, EMAIL_MAX_CHARS),
            phone: truncate_chars(draft.phone, PHONE_MAX_CHARS),
        }
    }

    pub(crate) fn apply(&mut self, update: ParticipantUpdate) {
        if let Some(name) = update.name {
            self.name = truncate_chars(name, NAME_MAX_CHARS);
        }
        if let Some(email) = update.email {
            self.email = truncate_chars(email, EMAIL_MAX_CHARS);
        }
        if let Some(phone) = update.phone {
            self.phone = truncate_chars(phone, PHONE_MAX_CHARS);
        }
    }
}

/// Fields supplied when creating a participant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParticipant {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewParticipant {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Partial edit of a participant; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_participant_truncates_phone() {
        let p = Participant::new(
            ParticipantId(1),
            NewParticipant::new("Ana", "ana@example.com", "+55 11 99999-9999 ramal 3"),
        );
        assert_eq!(p.phone.chars().count(), PHONE_MAX_CHARS);
        assert_eq!(p.email, "ana@example.com");
    }

    #[test]
    fn test_apply_partial_update() {
        let mut p = Participant::new(
            ParticipantId(1),
            NewParticipant::new("Ana", "ana@example.com", "1234"),
        );
        p.apply(ParticipantUpdate {
            email: Some("ana@rust.dev".to_string()),
            ..Default::default()
        });
        assert_eq!(p.name, "Ana");
        assert_eq!(p.email, "ana@rust.dev");
        assert_eq!(p.phone, "1234");
    }
}

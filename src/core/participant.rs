use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a participant in the shared-expense group.
///
/// A participant is anyone who can pay for a transaction or share in its
/// cost: a flatmate, a trip member, a colleague splitting lunches.
///
/// # Examples
///
/// ```
/// use splitledger::core::participant::ParticipantId;
///
/// let ana = ParticipantId::new("ana");
/// let ben = ParticipantId::new("ben");
/// assert_ne!(ana, ben);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new participant identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this participant ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_equality() {
        let a = ParticipantId::new("ana");
        let b = ParticipantId::new("ana");
        let c = ParticipantId::new("ben");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_participant_display() {
        let p = ParticipantId::new("carla");
        assert_eq!(format!("{}", p), "carla");
    }

    #[test]
    fn test_participant_ordering() {
        let a = ParticipantId::new("ana");
        let b = ParticipantId::new("ben");
        assert!(a < b);
    }
}

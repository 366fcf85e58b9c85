use crate::core::error::NameRejection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Words the command router gives meaning to. None of them may be used
/// as a participant name, otherwise commands would become ambiguous.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "add", "all", "balances", "clear", "for", "help", "owes", "paid", "print", "quit", "save",
    "simplify", "stats",
];

/// Case-normalized name of a participant in the ledger.
///
/// Names are tokens of the command language, so they cannot contain
/// whitespace and cannot collide with a command keyword.
///
/// # Examples
///
/// ```
/// use debt_ledger::core::participant::ParticipantName;
///
/// let bob = ParticipantName::parse("Bob").unwrap();
/// assert_eq!(bob.as_str(), "bob");
/// assert!(ParticipantName::parse("help").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Normalize `raw` (case-fold) and check it is a legal name.
    ///
    /// Duplicate detection needs the whole ledger and happens in
    /// [`Ledger::add_participants`](crate::core::ledger::Ledger::add_participants).
    pub fn parse(raw: &str) -> Result<Self, NameRejection> {
        let name = raw.to_lowercase();
        if name.is_empty() {
            return Err(NameRejection::Empty);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(NameRejection::ContainsWhitespace);
        }
        if is_reserved(&name) {
            return Err(NameRejection::ReservedKeyword);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether `word` (already lowercased) is a command keyword.
pub fn is_reserved(word: &str) -> bool {
    RESERVED_KEYWORDS.contains(&word)
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_case_folded() {
        let a = ParticipantName::parse("ALICE").unwrap();
        let b = ParticipantName::parse("alice").unwrap();
        assert_eq!(a, b);
        assert_eq!(format!("{}", a), "alice");
    }

    #[test]
    fn test_name_rejects_whitespace() {
        assert_eq!(
            ParticipantName::parse("mary ann"),
            Err(NameRejection::ContainsWhitespace)
        );
        assert_eq!(
            ParticipantName::parse("tab\there"),
            Err(NameRejection::ContainsWhitespace)
        );
    }

    #[test]
    fn test_name_rejects_keywords_in_any_case() {
        for keyword in RESERVED_KEYWORDS {
            assert_eq!(
                ParticipantName::parse(&keyword.to_uppercase()),
                Err(NameRejection::ReservedKeyword),
                "{keyword} should be reserved"
            );
        }
    }

    #[test]
    fn test_name_rejects_empty() {
        assert_eq!(ParticipantName::parse(""), Err(NameRejection::Empty));
    }
}

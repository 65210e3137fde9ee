//! Person identifiers.
//!
//! People are not registered anywhere: a person exists as soon as an expense
//! names them as payer or participant. Two spellings that only differ by case,
//! surrounding whitespace or Unicode compatibility forms refer to the same
//! person.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Case-normalized person identifier.
///
/// Ordering is plain string ordering on the normalized form; the settlement
/// planner relies on it to break ties deterministically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Normalizes `raw` (trim, NFKC, lower-case) and rejects empty names.
    pub fn parse(raw: &str) -> ResultEngine<Self> {
        let normalized: String = raw.trim().nfkc().collect::<String>().to_lowercase();
        if normalized.is_empty() {
            return Err(EngineError::InvalidName(
                "person name must not be empty".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lowercases_and_trims() {
        let id = PersonId::parse("  Alice ").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id, PersonId::parse("ALICE").unwrap());
    }

    #[test]
    fn parse_applies_compatibility_normalization() {
        // Fullwidth letters fold to ASCII under NFKC.
        let id = PersonId::parse("\u{FF22}\u{FF4F}\u{FF42}").unwrap();
        assert_eq!(id.as_str(), "bob");
    }

    #[test]
    fn parse_rejects_blank_names() {
        assert!(matches!(
            PersonId::parse("   "),
            Err(EngineError::InvalidName(_))
        ));
    }

    #[test]
    fn ordering_follows_normalized_name() {
        let mut ids = vec![
            PersonId::parse("carol").unwrap(),
            PersonId::parse("Alice").unwrap(),
            PersonId::parse("bob").unwrap(),
        ];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(PersonId::as_str).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }
}

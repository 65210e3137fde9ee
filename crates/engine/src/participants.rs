//! Participant defaulting for expenses created without an explicit list.

use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, PersonId, ResultEngine};

/// What to do when an expense arrives without participants.
///
/// ```rust
/// use engine::{ParticipantPolicy, PersonId};
///
/// let payer = PersonId::parse("alice").unwrap();
/// let people = ParticipantPolicy::PayerOnly.resolve(&payer, "coffee").unwrap();
/// assert_eq!(people, vec![payer]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ParticipantPolicy {
    /// The payer alone, so the expense does not move any balance.
    #[default]
    PayerOnly,
    /// Refuse the expense.
    RequireExplicit,
    /// Look for known names in the description.
    ///
    /// Every name found as a whole word joins the payer, in configuration
    /// order. When none is found, `fallback` is used; an empty fallback means
    /// the payer alone.
    KnownNames {
        names: Vec<String>,
        #[serde(default)]
        fallback: Vec<String>,
    },
}

impl ParticipantPolicy {
    /// Resolve the participants of an expense whose list was omitted.
    ///
    /// The payer is always first in the returned list.
    pub fn resolve(&self, payer: &PersonId, description: &str) -> ResultEngine<Vec<PersonId>> {
        match self {
            Self::PayerOnly => Ok(vec![payer.clone()]),
            Self::RequireExplicit => Err(EngineError::MissingParticipants(
                "participants are required".to_string(),
            )),
            Self::KnownNames { names, fallback } => {
                let tokens = words(description);
                let mut people = vec![payer.clone()];
                let mut matched = false;
                for name in names {
                    let person = PersonId::parse(name)?;
                    if contains_phrase(&tokens, &words(person.as_str())) {
                        matched = true;
                        push_unique(&mut people, person);
                    }
                }
                if !matched {
                    for name in fallback {
                        push_unique(&mut people, PersonId::parse(name)?);
                    }
                }
                Ok(people)
            }
        }
    }
}

fn push_unique(people: &mut Vec<PersonId>, person: PersonId) {
    if !people.contains(&person) {
        people.push(person);
    }
}

fn words(text: &str) -> Vec<String> {
    text.nfkc()
        .collect::<String>()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn contains_phrase(words: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty() && words.windows(phrase.len()).any(|window| window == phrase)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn person(name: &str) -> PersonId {
        PersonId::parse(name).unwrap()
    }

    fn known_names(names: &[&str], fallback: &[&str]) -> ParticipantPolicy {
        ParticipantPolicy::KnownNames {
            names: names.iter().map(ToString::to_string).collect(),
            fallback: fallback.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn payer_only_returns_payer() {
        let people = ParticipantPolicy::PayerOnly
            .resolve(&person("alice"), "dinner with bob")
            .unwrap();
        assert_eq!(people, vec![person("alice")]);
    }

    #[test]
    fn require_explicit_rejects() {
        let err = ParticipantPolicy::RequireExplicit
            .resolve(&person("alice"), "dinner")
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingParticipants(_)));
    }

    #[rstest]
    #[case::single_match("Dinner with Bob", &["bob", "carol"], &[], &["alice", "bob"])]
    #[case::config_order("carol and bob", &["bob", "carol"], &[], &["alice", "bob", "carol"])]
    #[case::whole_words_only("tom paid from home", &["om"], &[], &["alice"])]
    #[case::multi_word_name("lunch with Mary Ann", &["mary ann"], &[], &["alice", "mary ann"])]
    #[case::payer_named(
        "alice and bob",
        &["alice", "bob"],
        &[],
        &["alice", "bob"]
    )]
    #[case::fallback_when_nothing_matched(
        "groceries",
        &["bob"],
        &["bob", "carol"],
        &["alice", "bob", "carol"]
    )]
    #[case::fallback_ignored_on_match("taxi with carol", &["carol"], &["bob"], &["alice", "carol"])]
    fn known_names_scans_description(
        #[case] description: &str,
        #[case] names: &[&str],
        #[case] fallback: &[&str],
        #[case] expected: &[&str],
    ) {
        let people = known_names(names, fallback)
            .resolve(&person("alice"), description)
            .unwrap();
        let expected: Vec<PersonId> = expected.iter().map(|p| person(p)).collect();
        assert_eq!(people, expected);
    }

    #[test]
    fn known_names_rejects_blank_configured_name() {
        let err = known_names(&["  "], &[])
            .resolve(&person("alice"), "anything")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidName(_)));
    }
}

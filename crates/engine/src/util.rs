//! Internal helpers for input parsing.
//!
//! These utilities are **not** part of the public API.

use uuid::Uuid;

use crate::{EngineError, PersonId, ResultEngine};

/// Parse a UUID supplied by a caller and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| EngineError::InvalidId(format!("invalid {label} id: {value}")))
}

/// Normalize a list of raw names. The first invalid name fails the whole list.
pub(crate) fn parse_people(names: &[String]) -> ResultEngine<Vec<PersonId>> {
    names.iter().map(|name| PersonId::parse(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uuid_labels_the_error() {
        let err = parse_uuid("nope", "expense").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidId("invalid expense id: nope".to_string())
        );
    }

    #[test]
    fn parse_uuid_accepts_surrounding_whitespace() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&format!(" {id} "), "expense").unwrap(), id);
    }

    #[test]
    fn parse_people_rejects_blank_names() {
        let names = vec!["Alice".to_string(), " ".to_string()];
        assert!(matches!(
            parse_people(&names),
            Err(EngineError::InvalidName(_))
        ));
    }
}

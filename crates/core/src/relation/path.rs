use std::fmt;

use serde::Serialize;

use super::RelationError;

/// A validated relation path: a head segment plus an optional nested
/// remainder resolved through the head relation's target type.
///
/// The grammar is `segment ("." segment)*` where a segment is one or more
/// word characters. Only the head segment is consumed per level; the
/// remainder is handed to the related repository, which applies the same
/// rule recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationPath {
    segment: String,
    nested: Option<Box<RelationPath>>,
}

impl RelationPath {
    /// Parses and validates a dot-separated relation path.
    pub fn parse(path: &str) -> Result<Self, RelationError> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        if !is_segment(head) {
            return Err(RelationError::InvalidPath(path.to_string()));
        }
        let nested = match rest {
            Some(rest) => {
                // Report the full original string, not just the remainder.
                let parsed = Self::parse(rest)
                    .map_err(|_| RelationError::InvalidPath(path.to_string()))?;
                Some(Box::new(parsed))
            }
            None => None,
        };
        Ok(Self {
            segment: head.to_string(),
            nested,
        })
    }

    /// The relation name to resolve at this level.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// The remainder to resolve through this relation's target, if any.
    pub fn nested(&self) -> Option<&RelationPath> {
        self.nested.as_deref()
    }
}

impl fmt::Display for RelationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segment)?;
        if let Some(nested) = &self.nested {
            write!(f, ".{nested}")?;
        }
        Ok(())
    }
}

fn is_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment() {
        let path = RelationPath::parse("subscriptions").unwrap();
        assert_eq!(path.segment(), "subscriptions");
        assert!(path.nested().is_none());
    }

    #[test]
    fn test_nested_path() {
        let path = RelationPath::parse("subscriptions.service_type").unwrap();
        assert_eq!(path.segment(), "subscriptions");
        let nested = path.nested().unwrap();
        assert_eq!(nested.segment(), "service_type");
        assert!(nested.nested().is_none());
    }

    #[test]
    fn test_deeply_nested_path() {
        let path = RelationPath::parse("a.b.c").unwrap();
        assert_eq!(path.segment(), "a");
        assert_eq!(path.nested().unwrap().segment(), "b");
        assert_eq!(path.nested().unwrap().nested().unwrap().segment(), "c");
    }

    #[test]
    fn test_accepts_word_characters() {
        for path in ["a", "a.b", "service_type", "a1.b2", "_private"] {
            assert!(RelationPath::parse(path).is_ok(), "should accept {path}");
        }
    }

    #[test]
    fn test_rejects_malformed_paths() {
        for path in ["", "a.", ".a", "a..b", "a-b", "a b", "a.b-c", "."] {
            assert!(
                matches!(
                    RelationPath::parse(path),
                    Err(RelationError::InvalidPath(_))
                ),
                "should reject {path:?}"
            );
        }
    }

    #[test]
    fn test_invalid_nested_reports_full_path() {
        let err = RelationPath::parse("a..b").unwrap_err();
        assert_eq!(err, RelationError::InvalidPath("a..b".to_string()));
    }

    #[test]
    fn test_display_round_trip() {
        let path = RelationPath::parse("subscriptions.service_type").unwrap();
        assert_eq!(path.to_string(), "subscriptions.service_type");
    }
}

//! Identity decomposition
//!
//! A submitted identity is either a bare user id (`bob`) or a user id
//! qualified with an organization (`alice@example.com`). Anything with more
//! than one `@` is kept whole and treated as unqualified.

use serde::{Deserialize, Serialize};

/// Separator between the local user id and the organizational qualifier
pub const QUALIFIER_SEPARATOR: char = '@';

/// Identity split into its local id and organizational qualifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedIdentity {
    /// User identifier before the separator, or the whole identity
    pub local_id: String,
    /// Organization after the separator; empty when unqualified
    pub org_qualifier: String,
}

impl ParsedIdentity {
    /// Whether an organizational qualifier was present
    pub fn is_qualified(&self) -> bool {
        !self.org_qualifier.is_empty()
    }
}

/// Split a raw identity into `(local_id, org_qualifier)`.
///
/// The identity is trimmed first. Exactly one `@` splits it; zero or several
/// leave the trimmed identity whole with an empty qualifier. Never fails.
pub fn parse_identity(identity: &str) -> ParsedIdentity {
    let trimmed = identity.trim();
    let mut parts = trimmed.split(QUALIFIER_SEPARATOR);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(local_id), Some(org_qualifier), None) => ParsedIdentity {
            local_id: local_id.to_string(),
            org_qualifier: org_qualifier.to_string(),
        },
        _ => ParsedIdentity {
            local_id: trimmed.to_string(),
            org_qualifier: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn qualified_identity_splits_at_separator() {
        let parsed = parse_identity("alice@example.com");
        assert_eq!(parsed.local_id, "alice");
        assert_eq!(parsed.org_qualifier, "example.com");
        assert!(parsed.is_qualified());
    }

    #[test]
    fn bare_identity_has_empty_qualifier() {
        let parsed = parse_identity("  bob \t");
        assert_eq!(parsed.local_id, "bob");
        assert_eq!(parsed.org_qualifier, "");
        assert!(!parsed.is_qualified());
    }

    #[test]
    fn multiple_separators_are_not_split() {
        let parsed = parse_identity(" a@b@c ");
        assert_eq!(parsed.local_id, "a@b@c");
        assert_eq!(parsed.org_qualifier, "");
    }

    #[test]
    fn edge_separators() {
        assert_eq!(
            parse_identity("@corp"),
            ParsedIdentity {
                local_id: String::new(),
                org_qualifier: "corp".to_string()
            }
        );
        assert_eq!(parse_identity("user@").local_id, "user");
        assert_eq!(parse_identity("").local_id, "");
    }

    proptest! {
        #[test]
        fn single_separator_splits_exactly(local in "[a-z0-9. ]{0,12}", org in "[a-z0-9. ]{0,12}") {
            let raw = format!("{local}@{org}");
            let trimmed = raw.trim();
            let (expected_local, expected_org) = trimmed.split_once('@').unwrap();
            let parsed = parse_identity(&raw);
            prop_assert_eq!(parsed.local_id, expected_local);
            prop_assert_eq!(parsed.org_qualifier, expected_org);
        }

        #[test]
        fn no_separator_is_whole(raw in "[^@]{0,24}") {
            let parsed = parse_identity(&raw);
            prop_assert_eq!(parsed.local_id, raw.trim());
            prop_assert_eq!(parsed.org_qualifier, "");
        }

        #[test]
        fn several_separators_are_whole(a in "[a-z]{0,6}", b in "[a-z]{0,6}", c in "[a-z@]{0,6}") {
            let raw = format!("{a}@{b}@{c}");
            let parsed = parse_identity(&raw);
            prop_assert_eq!(parsed.local_id, raw.trim());
            prop_assert_eq!(parsed.org_qualifier, "");
        }
    }
}

//! Verification outcomes and protocol decisions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of checking a credential against an identity backend
///
/// `Unavailable` covers backends that could not give an answer (endpoint
/// unreachable, timeout). It never accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationOutcome {
    /// Backend confirmed the credential
    Accepted,
    /// Backend refused the credential
    Rejected,
    /// Backend could not be consulted
    Unavailable,
}

impl VerificationOutcome {
    /// Whether the outcome grants access
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl From<bool> for VerificationOutcome {
    fn from(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }
}

/// Binary outcome communicated back over the transport protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Grant access
    Accept,
    /// Deny access
    Reject,
}

impl Decision {
    /// Status token used in audit records
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "Accept",
            Self::Reject => "Reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VerificationOutcome> for Decision {
    fn from(outcome: VerificationOutcome) -> Self {
        map_decision(outcome.is_accepted())
    }
}

/// Map a verification result to a protocol decision.
pub fn map_decision(accepted: bool) -> Decision {
    if accepted {
        Decision::Accept
    } else {
        Decision::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn map_is_two_armed() {
        assert_eq!(map_decision(true), Decision::Accept);
        assert_eq!(map_decision(false), Decision::Reject);
    }

    #[test]
    fn unavailable_never_accepts() {
        assert_eq!(
            Decision::from(VerificationOutcome::Unavailable),
            Decision::Reject
        );
        assert_eq!(Decision::from(VerificationOutcome::Accepted), Decision::Accept);
        assert_eq!(Decision::from(VerificationOutcome::Rejected), Decision::Reject);
    }

    #[test]
    fn status_tokens() {
        assert_eq!(Decision::Accept.to_string(), "Accept");
        assert_eq!(Decision::Reject.to_string(), "Reject");
    }

    proptest! {
        #[test]
        fn map_is_deterministic(accepted in any::<bool>()) {
            let first = map_decision(accepted);
            prop_assert_eq!(first, map_decision(accepted));
            prop_assert_eq!(first == Decision::Accept, accepted);
            prop_assert_eq!(Decision::from(VerificationOutcome::from(accepted)), first);
        }
    }
}

//! Audit record construction and credential redaction
//!
//! Every authentication decision becomes one [`AuditRecord`]. The plaintext
//! credential is reduced to a SHA-1 hex digest before the record exists, so
//! nothing downstream of the encoder can see it. The digest is unsalted and
//! serves audit-trail correlation only; it must never be used to store or
//! compare credentials.

use crate::decision::{Decision, VerificationOutcome};
use crate::errors::{GateError, Result};
use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// Local-time format of the audit log timestamp column
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Length in hex characters of a credential digest
pub const CREDENTIAL_DIGEST_LEN: usize = 40;

/// Status written into an audit record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditStatus {
    /// Access granted
    Accept,
    /// Access denied by the backend
    Reject,
    /// Access denied because the backend could not be consulted
    Unavailable,
}

impl AuditStatus {
    /// Literal token stored in the `status` field
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "Accept",
            Self::Reject => "Reject",
            Self::Unavailable => "Unavailable",
        }
    }

    /// Status for a verification outcome
    pub fn from_outcome(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Accepted => Self::Accept,
            VerificationOutcome::Rejected => Self::Reject,
            VerificationOutcome::Unavailable => Self::Unavailable,
        }
    }

    /// Protocol decision this status corresponds to
    pub fn decision(self) -> Decision {
        match self {
            Self::Accept => Decision::Accept,
            Self::Reject | Self::Unavailable => Decision::Reject,
        }
    }
}

impl From<Decision> for AuditStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => Self::Accept,
            Decision::Reject => Self::Reject,
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON key under which the organizational qualifier is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QualifierField {
    /// `"domain"`
    #[default]
    Domain,
    /// `"company"`
    Company,
}

impl QualifierField {
    /// JSON key name
    pub fn key(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Company => "company",
        }
    }
}

impl FromStr for QualifierField {
    type Err = GateError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "domain" => Ok(Self::Domain),
            "company" => Ok(Self::Company),
            other => Err(GateError::config(format!(
                "audit_qualifier_field must be 'domain' or 'company', got '{other}'"
            ))),
        }
    }
}

/// Redacted, immutable record of one authentication decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    status: AuditStatus,
    user_id: String,
    org_qualifier: String,
    credential_digest: String,
    qualifier_field: QualifierField,
}

impl AuditRecord {
    /// Recorded status
    pub fn status(&self) -> AuditStatus {
        self.status
    }

    /// Local user id
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Organizational qualifier, possibly empty
    pub fn org_qualifier(&self) -> &str {
        &self.org_qualifier
    }

    /// Hex digest of the submitted credential
    pub fn credential_digest(&self) -> &str {
        &self.credential_digest
    }

    /// Serialize to the single-line JSON form written to the audit log
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            GateError::serialization(format!("Failed to encode audit record: {e}"))
        })
    }
}

// Field order and names are part of the log format; `password` carries the
// digest.
impl Serialize for AuditRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AuditRecord", 4)?;
        state.serialize_field("status", self.status.as_str())?;
        state.serialize_field("userID", &self.user_id)?;
        match self.qualifier_field {
            QualifierField::Domain => state.serialize_field("domain", &self.org_qualifier)?,
            QualifierField::Company => state.serialize_field("company", &self.org_qualifier)?,
        }
        state.serialize_field("password", &self.credential_digest)?;
        state.end()
    }
}

/// Hex-encoded SHA-1 digest of a credential, for audit redaction only.
pub fn credential_digest(credential: &str) -> String {
    hex::encode(Sha1::digest(credential.as_bytes()))
}

/// Builds audit records with a fixed qualifier key
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditEncoder {
    qualifier_field: QualifierField,
}

impl AuditEncoder {
    /// Create an encoder writing the qualifier under `qualifier_field`
    pub fn new(qualifier_field: QualifierField) -> Self {
        Self { qualifier_field }
    }

    /// Build the redacted record for one decision.
    pub fn encode(
        &self,
        status: impl Into<AuditStatus>,
        local_id: &str,
        org_qualifier: &str,
        credential: &str,
    ) -> AuditRecord {
        AuditRecord {
            status: status.into(),
            user_id: local_id.to_string(),
            org_qualifier: org_qualifier.to_string(),
            credential_digest: credential_digest(credential),
            qualifier_field: self.qualifier_field,
        }
    }
}

/// Render the timestamp column of an audit log line
pub fn format_audit_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(AUDIT_TIMESTAMP_FORMAT).to_string()
}

/// Render one complete audit log line, newline included
pub fn format_audit_line(timestamp: &NaiveDateTime, serialized: &str) -> String {
    format!("{}\t{serialized}\n", format_audit_timestamp(timestamp))
}

/// Split an audit log line back into its timestamp and JSON object
pub fn parse_audit_line(line: &str) -> Result<(NaiveDateTime, serde_json::Value)> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let (timestamp, json) = line
        .split_once('\t')
        .ok_or_else(|| GateError::serialization("audit line has no tab separator"))?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp, AUDIT_TIMESTAMP_FORMAT)
        .map_err(|e| GateError::serialization(format!("bad audit timestamp: {e}")))?;
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(GateError::serialization("audit payload is not an object"));
    }
    Ok((timestamp, value))
}

//! Gateway configuration
//!
//! Configuration arrives as a line-oriented `key=value` file: `#` starts a
//! comment line, blank lines and lines without `=` are skipped, keys and
//! values are trimmed. Parsing here is pure; reading the file from disk is
//! a handler concern.

use crate::audit::QualifierField;
use crate::errors::{GateError, Result};
use crate::request::DirectoryEntry;
use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Shared secret used when none is configured
pub const DEFAULT_SHARED_SECRET: &str = "secret";
/// Audit log path used when none is configured
pub const DEFAULT_AUDIT_LOG: &str = "log.txt";
/// Remote verifier timeout used when none is configured
pub const DEFAULT_VERIFIER_TIMEOUT_MS: u64 = 5_000;
/// Audit writer queue bound used when none is configured
pub const DEFAULT_AUDIT_QUEUE_CAPACITY: usize = 1_024;

const KNOWN_KEYS: &[&str] = &[
    "server_ip",
    "server_port",
    "shared_secret",
    "verifier",
    "verifier_url",
    "verifier_timeout_ms",
    "directory_file",
    "audit_log",
    "audit_qualifier_field",
    "audit_queue_capacity",
];

/// Parse `key=value` lines, preserving order and duplicates
pub fn parse_key_value_lines(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Parse `key=value` lines into a map; later keys win
pub fn parse_key_value_map(text: &str) -> BTreeMap<String, String> {
    parse_key_value_lines(text).into_iter().collect()
}

/// Parse a static user directory (`username=password` per line)
pub fn parse_directory(text: &str) -> Vec<DirectoryEntry> {
    parse_key_value_lines(text)
        .into_iter()
        .map(|(username, password)| DirectoryEntry::new(username, password))
        .collect()
}

/// RADIUS shared secret; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Wrap raw secret bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Which identity backend verifies credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierConfig {
    /// External HTTP identity endpoint
    Remote {
        /// Login endpoint URL
        url: String,
        /// Per-call timeout
        timeout: Duration,
    },
    /// Static user directory loaded from a file at startup
    Directory {
        /// Path of the directory file
        path: PathBuf,
    },
}

impl VerifierConfig {
    /// Backend name as written in the config file
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Remote { .. } => "remote",
            Self::Directory { .. } => "directory",
        }
    }
}

/// Audit trail settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Append-only log file
    pub log_path: PathBuf,
    /// JSON key for the organizational qualifier
    pub qualifier_field: QualifierField,
    /// Bound of the writer queue
    pub queue_capacity: usize,
}

/// Complete, validated gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// UDP address the RADIUS server binds
    pub listen_addr: SocketAddr,
    /// RADIUS shared secret
    pub shared_secret: SharedSecret,
    /// Whether `shared_secret` fell back to the built-in default
    pub default_secret: bool,
    /// Credential backend
    pub verifier: VerifierConfig,
    /// Audit trail
    pub audit: AuditConfig,
}

impl GatewayConfig {
    /// Parse configuration file text
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_map(&parse_key_value_map(text))
    }

    /// Build configuration from a parsed key/value map
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        for key in map.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::debug!(key = %key, "Ignoring unknown configuration key");
            }
        }

        let listen_addr = listen_addr(map)?;

        let (shared_secret, default_secret) = match non_empty(map, "shared_secret") {
            Some(secret) => (SharedSecret::new(secret.as_bytes()), false),
            None => (SharedSecret::new(DEFAULT_SHARED_SECRET.as_bytes()), true),
        };

        let verifier = match non_empty(map, "verifier").unwrap_or("remote") {
            "remote" => VerifierConfig::Remote {
                url: required(map, "verifier_url")?.to_string(),
                timeout: Duration::from_millis(parse_number(
                    map,
                    "verifier_timeout_ms",
                    DEFAULT_VERIFIER_TIMEOUT_MS,
                )?),
            },
            "directory" => VerifierConfig::Directory {
                path: PathBuf::from(required(map, "directory_file")?),
            },
            other => {
                return Err(GateError::config(format!(
                    "verifier must be 'remote' or 'directory', got '{other}'"
                )))
            }
        };

        let qualifier_field = match non_empty(map, "audit_qualifier_field") {
            Some(value) => value.parse()?,
            None => QualifierField::default(),
        };
        let queue_capacity =
            parse_number(map, "audit_queue_capacity", DEFAULT_AUDIT_QUEUE_CAPACITY as u64)?;
        if let VerifierConfig::Remote { timeout, .. } = &verifier {
            if timeout.is_zero() {
                return Err(GateError::config("verifier_timeout_ms must be positive"));
            }
        }
        if queue_capacity == 0 {
            return Err(GateError::config("audit_queue_capacity must be positive"));
        }

        let audit = AuditConfig {
            log_path: PathBuf::from(non_empty(map, "audit_log").unwrap_or(DEFAULT_AUDIT_LOG)),
            qualifier_field,
            queue_capacity: usize::try_from(queue_capacity)
                .map_err(|_| GateError::config("audit_queue_capacity is too large"))?,
        };

        Ok(Self {
            listen_addr,
            shared_secret,
            default_secret,
            verifier,
            audit,
        })
    }
}

fn non_empty<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    map.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn required<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str> {
    non_empty(map, key).ok_or_else(|| GateError::config(format!("missing required key '{key}'")))
}

fn parse_number(map: &BTreeMap<String, String>, key: &str, default: u64) -> Result<u64> {
    match non_empty(map, key) {
        Some(value) => value
            .parse()
            .map_err(|e| GateError::config(format!("invalid {key} '{value}': {e}"))),
        None => Ok(default),
    }
}

// An empty `server_ip` binds every interface.
fn listen_addr(map: &BTreeMap<String, String>) -> Result<SocketAddr> {
    let port = required(map, "server_port")?;
    let port: u16 = port
        .parse()
        .map_err(|e| GateError::config(format!("invalid server_port '{port}': {e}")))?;

    let ip = match map.get("server_ip") {
        None => return Err(GateError::config("missing required key 'server_ip'")),
        Some(ip) if ip.is_empty() => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        Some(ip) => ip
            .parse()
            .map_err(|e| GateError::config(format!("invalid server_ip '{ip}': {e}")))?,
    };

    Ok(SocketAddr::new(ip, port))
}

//! RADIUS packet codec (RFC 2865 section 3)
//!
//! ```text
//!  0                   1                   2                   3
//! |     Code      |  Identifier   |            Length             |
//! |                         Authenticator (16)                    |
//! |  Attributes ...
//! ```
//!
//! Attributes are `type (1) | length (1, header included) | value`.

use radgate_core::{Decision, GateError, Result};

/// Fixed header length (code, identifier, length, authenticator)
pub const HEADER_LEN: usize = 20;
/// Authenticator field length
pub const AUTHENTICATOR_LEN: usize = 16;
/// Largest packet RFC 2865 permits
pub const MAX_PACKET_LEN: usize = 4096;
/// Largest attribute value (length byte covers the 2-byte header)
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 253;

/// User-Name attribute type
pub const USER_NAME: u8 = 1;
/// User-Password attribute type
pub const USER_PASSWORD: u8 = 2;
/// Reply-Message attribute type
pub const REPLY_MESSAGE: u8 = 18;

/// RADIUS packet codes handled or recognised by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Code {
    AccessRequest = 1,
    AccessAccept = 2,
    AccessReject = 3,
    AccountingRequest = 4,
    AccountingResponse = 5,
    AccessChallenge = 11,
    StatusServer = 12,
    StatusClient = 13,
}

impl Code {
    /// Decode a code byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::AccessRequest),
            2 => Some(Self::AccessAccept),
            3 => Some(Self::AccessReject),
            4 => Some(Self::AccountingRequest),
            5 => Some(Self::AccountingResponse),
            11 => Some(Self::AccessChallenge),
            12 => Some(Self::StatusServer),
            13 => Some(Self::StatusClient),
            _ => None,
        }
    }
}

impl From<Decision> for Code {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => Self::AccessAccept,
            Decision::Reject => Self::AccessReject,
        }
    }
}

/// One type-length-value attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute type
    pub kind: u8,
    /// Raw value
    pub value: Vec<u8>,
}

impl Attribute {
    /// Create an attribute
    pub fn new(kind: u8, value: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Decoded RADIUS packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Packet code
    pub code: Code,
    /// Identifier matching requests to responses
    pub identifier: u8,
    /// Request or response authenticator
    pub authenticator: [u8; AUTHENTICATOR_LEN],
    /// Attributes in wire order
    pub attributes: Vec<Attribute>,
}

impl Packet {
    /// Create a packet without attributes
    pub fn new(code: Code, identifier: u8, authenticator: [u8; AUTHENTICATOR_LEN]) -> Self {
        Self {
            code,
            identifier,
            authenticator,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute (builder pattern)
    pub fn with_attribute(mut self, kind: u8, value: impl Into<Vec<u8>>) -> Self {
        self.attributes.push(Attribute::new(kind, value));
        self
    }

    /// First value of the given attribute type
    pub fn attribute(&self, kind: u8) -> Option<&[u8]> {
        self.attributes
            .iter()
            .find(|attr| attr.kind == kind)
            .map(|attr| attr.value.as_slice())
    }

    /// Decode a datagram
    ///
    /// Octets past the declared length are padding and ignored.
    pub fn decode(buffer: &[u8]) -> Result<Self> {
        if buffer.len() < HEADER_LEN {
            return Err(GateError::protocol(format!(
                "packet too short: {} bytes",
                buffer.len()
            )));
        }

        let code = Code::from_u8(buffer[0])
            .ok_or_else(|| GateError::protocol(format!("unknown packet code {}", buffer[0])))?;
        let identifier = buffer[1];
        let length = u16::from_be_bytes([buffer[2], buffer[3]]) as usize;

        if !(HEADER_LEN..=MAX_PACKET_LEN).contains(&length) {
            return Err(GateError::protocol(format!("invalid packet length {length}")));
        }
        if buffer.len() < length {
            return Err(GateError::protocol(format!(
                "packet truncated: declared {length}, received {}",
                buffer.len()
            )));
        }

        let mut authenticator = [0u8; AUTHENTICATOR_LEN];
        authenticator.copy_from_slice(&buffer[4..HEADER_LEN]);

        let mut attributes = Vec::new();
        let mut offset = HEADER_LEN;
        while offset < length {
            if offset + 2 > length {
                return Err(GateError::protocol("attribute header truncated"));
            }
            let kind = buffer[offset];
            let attr_length = buffer[offset + 1] as usize;
            if attr_length < 2 || offset + attr_length > length {
                return Err(GateError::protocol(format!(
                    "invalid length {attr_length} for attribute {kind}"
                )));
            }
            attributes.push(Attribute::new(
                kind,
                &buffer[offset + 2..offset + attr_length],
            ));
            offset += attr_length;
        }

        Ok(Self {
            code,
            identifier,
            authenticator,
            attributes,
        })
    }

    /// Encoded attribute section
    pub fn encode_attributes(&self) -> Result<Vec<u8>> {
        let mut encoded = Vec::new();
        for attr in &self.attributes {
            if attr.value.len() > MAX_ATTRIBUTE_VALUE_LEN {
                return Err(GateError::protocol(format!(
                    "attribute {} value too long: {} bytes",
                    attr.kind,
                    attr.value.len()
                )));
            }
            encoded.push(attr.kind);
            encoded.push((attr.value.len() + 2) as u8);
            encoded.extend_from_slice(&attr.value);
        }
        Ok(encoded)
    }

    /// Encode the packet with its current authenticator
    pub fn encode(&self) -> Result<Vec<u8>> {
        let attributes = self.encode_attributes()?;
        let length = HEADER_LEN + attributes.len();
        if length > MAX_PACKET_LEN {
            return Err(GateError::protocol(format!("packet too long: {length} bytes")));
        }

        let mut packet = Vec::with_capacity(length);
        packet.push(self.code as u8);
        packet.push(self.identifier);
        packet.extend_from_slice(&(length as u16).to_be_bytes());
        packet.extend_from_slice(&self.authenticator);
        packet.extend_from_slice(&attributes);
        Ok(packet)
    }
}

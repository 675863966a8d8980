//! Shared-secret operations of RFC 2865
//!
//! User-Password hiding (section 5.2) and the Response Authenticator
//! (section 3). Both are MD5 constructions over the shared secret.

use crate::packet::{Code, Packet, AUTHENTICATOR_LEN, HEADER_LEN};
use md5::{Digest, Md5};
use radgate_core::{GateError, Result, SharedSecret};

const BLOCK_LEN: usize = 16;
const MAX_PASSWORD_LEN: usize = 128;

fn hiding_block(secret: &SharedSecret, previous: &[u8]) -> [u8; BLOCK_LEN] {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    hasher.update(previous);
    to_block(&hasher.finalize())
}

fn to_block(digest: &[u8]) -> [u8; BLOCK_LEN] {
    let mut block = [0u8; BLOCK_LEN];
    block.copy_from_slice(digest);
    block
}

/// Recover a User-Password value
///
/// Trailing NUL padding is removed.
pub fn decrypt_user_password(
    secret: &SharedSecret,
    request_authenticator: &[u8; AUTHENTICATOR_LEN],
    hidden: &[u8],
) -> Result<Vec<u8>> {
    if hidden.is_empty() || hidden.len() % BLOCK_LEN != 0 || hidden.len() > MAX_PASSWORD_LEN {
        return Err(GateError::protocol(format!(
            "invalid User-Password length {}",
            hidden.len()
        )));
    }

    let mut plain = Vec::with_capacity(hidden.len());
    let mut previous: &[u8] = request_authenticator;
    for chunk in hidden.chunks(BLOCK_LEN) {
        let block = hiding_block(secret, previous);
        plain.extend(chunk.iter().zip(block.iter()).map(|(c, b)| c ^ b));
        previous = chunk;
    }

    while plain.last() == Some(&0) {
        plain.pop();
    }
    Ok(plain)
}

/// Hide a User-Password value for an Access-Request
pub fn encrypt_user_password(
    secret: &SharedSecret,
    request_authenticator: &[u8; AUTHENTICATOR_LEN],
    password: &[u8],
) -> Result<Vec<u8>> {
    if password.len() > MAX_PASSWORD_LEN {
        return Err(GateError::protocol(format!(
            "password too long: {} bytes",
            password.len()
        )));
    }

    let padded_len = password.len().div_ceil(BLOCK_LEN).max(1) * BLOCK_LEN;
    let mut padded = password.to_vec();
    padded.resize(padded_len, 0);

    let mut hidden: Vec<u8> = Vec::with_capacity(padded_len);
    for (index, chunk) in padded.chunks(BLOCK_LEN).enumerate() {
        let block = if index == 0 {
            hiding_block(secret, request_authenticator)
        } else {
            hiding_block(secret, &hidden[(index - 1) * BLOCK_LEN..index * BLOCK_LEN])
        };
        let cipher: Vec<u8> = chunk.iter().zip(block.iter()).map(|(p, b)| p ^ b).collect();
        hidden.extend_from_slice(&cipher);
    }
    Ok(hidden)
}

/// Response Authenticator: MD5(Code | Identifier | Length | RequestAuth | Attributes | Secret)
pub fn response_authenticator(
    code: Code,
    identifier: u8,
    request_authenticator: &[u8; AUTHENTICATOR_LEN],
    attributes: &[u8],
    secret: &SharedSecret,
) -> [u8; AUTHENTICATOR_LEN] {
    let length = (HEADER_LEN + attributes.len()) as u16;
    let mut hasher = Md5::new();
    hasher.update([code as u8, identifier]);
    hasher.update(length.to_be_bytes());
    hasher.update(request_authenticator);
    hasher.update(attributes);
    hasher.update(secret.as_bytes());
    to_block(&hasher.finalize())
}

/// Encode a response to `request_authenticator` with a valid Response Authenticator
pub fn encode_response(
    response: &Packet,
    request_authenticator: &[u8; AUTHENTICATOR_LEN],
    secret: &SharedSecret,
) -> Result<Vec<u8>> {
    let attributes = response.encode_attributes()?;
    let mut signed = response.clone();
    signed.authenticator = response_authenticator(
        response.code,
        response.identifier,
        request_authenticator,
        &attributes,
        secret,
    );
    signed.encode()
}

/// Check the Response Authenticator of a received response
pub fn verify_response(
    response: &Packet,
    request_authenticator: &[u8; AUTHENTICATOR_LEN],
    secret: &SharedSecret,
) -> Result<bool> {
    let attributes = response.encode_attributes()?;
    let expected = response_authenticator(
        response.code,
        response.identifier,
        request_authenticator,
        &attributes,
        secret,
    );
    Ok(expected == response.authenticator)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 2865 section 7.1
    const SECRET: &str = "xyzzy5461";
    const REQUEST_AUTH: &str = "0f403f9473978057bd83d5cb98f4227a";
    const HIDDEN: &str = "0dbe708d93d413ce3196e43f782a0aee";

    fn request_auth() -> [u8; AUTHENTICATOR_LEN] {
        hex::decode(REQUEST_AUTH).unwrap().try_into().unwrap()
    }

    #[test]
    fn rfc_password_vector() {
        let secret = SharedSecret::new(SECRET);
        let hidden = encrypt_user_password(&secret, &request_auth(), b"arctangent").unwrap();
        assert_eq!(hex::encode(&hidden), HIDDEN);

        let plain = decrypt_user_password(&secret, &request_auth(), &hidden).unwrap();
        assert_eq!(plain, b"arctangent");
    }

    #[test]
    fn multi_block_password() {
        let secret = SharedSecret::new("s");
        let password = b"a-password-longer-than-one-block-of-sixteen";
        let hidden = encrypt_user_password(&secret, &request_auth(), password).unwrap();
        assert_eq!(hidden.len(), 48);
        assert_eq!(
            decrypt_user_password(&secret, &request_auth(), &hidden).unwrap(),
            password
        );
        let wrong = decrypt_user_password(&SharedSecret::new("t"), &request_auth(), &hidden);
        assert_ne!(wrong.unwrap(), password);
    }

    #[test]
    fn invalid_hidden_lengths() {
        let secret = SharedSecret::new(SECRET);
        assert!(decrypt_user_password(&secret, &request_auth(), &[]).is_err());
        assert!(decrypt_user_password(&secret, &request_auth(), &[1; 15]).is_err());
        assert!(decrypt_user_password(&secret, &request_auth(), &[1; 144]).is_err());
        assert!(encrypt_user_password(&secret, &request_auth(), &[1; 129]).is_err());
    }

    #[test]
    fn response_authenticator_vector() {
        let secret = SharedSecret::new(SECRET);
        let auth = response_authenticator(Code::AccessAccept, 0, &request_auth(), &[], &secret);
        assert_eq!(hex::encode(auth), "9ef2e97b4e94755c8f16b6394f6e0595");
    }

    #[test]
    fn encoded_response_verifies() {
        let secret = SharedSecret::new(SECRET);
        let response = Packet::new(Code::AccessReject, 9, [0; AUTHENTICATOR_LEN]);
        let wire = encode_response(&response, &request_auth(), &secret).unwrap();
        let decoded = Packet::decode(&wire).unwrap();
        assert!(verify_response(&decoded, &request_auth(), &secret).unwrap());
        assert!(!verify_response(&decoded, &request_auth(), &SharedSecret::new("x")).unwrap());
    }
}

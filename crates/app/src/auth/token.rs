//! Session token formatting, parsing, and hashing.
//!
//! Tokens are opaque strings of the form `<prefix>_v1_<session>.<secret>`
//! where the prefix tells access tokens (`eka`) from refresh tokens (`ekr`).
//! Only a SHA-256 digest of the secret is ever persisted.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Number of secret bytes encoded in a token.
pub const TOKEN_SECRET_BYTES: usize = 32;

const TOKEN_SECRET_HEX_CHARS: usize = TOKEN_SECRET_BYTES * 2;

/// Which half of a session a token unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Access => "eka",
            Self::Refresh => "ekr",
        }
    }

    fn from_prefix(prefix: &str) -> Result<Self, TokenError> {
        match prefix {
            "eka" => Ok(Self::Access),
            "ekr" => Ok(Self::Refresh),
            _ => Err(TokenError::InvalidFormat),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVersion {
    V1,
}

impl TokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for TokenVersion {
    type Err = TokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(TokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct TokenSecret {
    bytes: [u8; TOKEN_SECRET_BYTES],
}

impl TokenSecret {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self { bytes }
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    /// Hex digest that gets stored against the session.
    #[must_use]
    pub fn digest(&self) -> String {
        encode_hex(&Sha256::digest(self.bytes))
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedToken {
    pub kind: TokenKind,
    pub version: TokenVersion,
    pub session_uuid: Uuid,
    pub secret: TokenSecret,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token format is invalid")]
    InvalidFormat,

    #[error("token uses an unsupported version")]
    UnsupportedVersion,

    #[error("token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn format_token(kind: TokenKind, session_uuid: Uuid, secret: &TokenSecret) -> String {
    format!(
        "{}_{}_{}.{}",
        kind.prefix(),
        TokenVersion::V1.segment(),
        session_uuid.simple(),
        encode_hex(&secret.bytes)
    )
}

/// Parse a raw bearer or refresh token.
///
/// # Errors
///
/// Returns an error when the token is not in the expected shape.
pub fn parse_token(token: &str) -> Result<ParsedToken, TokenError> {
    let (head, secret_hex) = token.split_once('.').ok_or(TokenError::InvalidFormat)?;

    let mut parts = head.splitn(3, '_');

    let kind = TokenKind::from_prefix(parts.next().ok_or(TokenError::InvalidFormat)?)?;
    let version = parts
        .next()
        .ok_or(TokenError::InvalidFormat)?
        .parse::<TokenVersion>()?;
    let session_uuid = parts
        .next()
        .and_then(|segment| Uuid::try_parse(segment).ok())
        .ok_or(TokenError::InvalidFormat)?;

    let bytes = decode_hex(secret_hex).ok_or(TokenError::InvalidSecretEncoding)?;

    Ok(ParsedToken {
        kind,
        version,
        session_uuid,
        secret: TokenSecret::from_bytes(bytes),
    })
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

fn decode_hex(value: &str) -> Option<[u8; TOKEN_SECRET_BYTES]> {
    if value.len() != TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut bytes = [0_u8; TOKEN_SECRET_BYTES];

    for (byte, pair) in bytes.iter_mut().zip(value.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (nibble(*hi)? << 4) | nibble(*lo)?;
    }

    Some(bytes)
}

fn nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

//! Principal identities.
//!
//! An identity is an opaque, address-like token. The store only ever compares
//! identities for equality and checks for the zero identity.

use hex::{FromHex, FromHexError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of bytes in an identity.
pub const IDENTITY_LEN: usize = 20;

/// Opaque principal reference used for ownership and caller checks.
///
/// Displayed and serialized as `0x` followed by 40 lowercase hex digits.
///
/// # Example
///
/// ```rust
/// use valuestore::core::Identity;
///
/// let id: Identity = "0x00000000000000000000000000000000000000aa".parse().unwrap();
/// assert!(!id.is_zero());
/// assert!(Identity::ZERO.is_zero());
/// assert_eq!(id.to_string(), "0x00000000000000000000000000000000000000aa");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity([u8; IDENTITY_LEN]);

/// Errors produced when parsing an identity from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseIdentityError {
    #[error("identity must start with 0x")]
    MissingPrefix,

    #[error("identity must have 40 hex digits, found {found}")]
    InvalidLength { found: usize },

    #[error("invalid hex digit at position {index}")]
    InvalidHexDigit { index: usize },
}

impl Identity {
    /// The null identity. Never a valid owner.
    pub const ZERO: Identity = Identity([0u8; IDENTITY_LEN]);

    pub const fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
        Identity(bytes)
    }

    /// Identity with every byte set to `byte`.
    pub const fn repeat_byte(byte: u8) -> Self {
        Identity([byte; IDENTITY_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl FromStr for Identity {
    type Err = ParseIdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(ParseIdentityError::MissingPrefix)?;

        if digits.len() != IDENTITY_LEN * 2 {
            return Err(ParseIdentityError::InvalidLength {
                found: digits.len(),
            });
        }

        let bytes = <[u8; IDENTITY_LEN]>::from_hex(digits).map_err(|e| match e {
            FromHexError::InvalidHexCharacter { index, .. } => {
                ParseIdentityError::InvalidHexDigit { index }
            }
            FromHexError::OddLength | FromHexError::InvalidStringLength => {
                ParseIdentityError::InvalidLength {
                    found: digits.len(),
                }
            }
        })?;

        Ok(Identity(bytes))
    }
}

impl TryFrom<String> for Identity {
    type Error = ParseIdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.to_string()
    }
}

impl From<[u8; IDENTITY_LEN]> for Identity {
    fn from(bytes: [u8; IDENTITY_LEN]) -> Self {
        Identity(bytes)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({self})")
    }
}
